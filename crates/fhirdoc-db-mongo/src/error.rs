use fhirdoc_storage::{STORAGE_KEY, StorageError};
use mongodb::error::{Error as DriverError, ErrorKind, WriteFailure};

/// E11000
const DUPLICATE_KEY: i32 = 11000;
const IMMUTABLE_FIELD: i32 = 66;

/// Server error code carried by a driver error, if any.
fn server_code(err: &DriverError) -> Option<i32> {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => Some(write_error.code),
        ErrorKind::Command(command_error) => Some(command_error.code),
        _ => None,
    }
}

fn is_connection_failure(err: &DriverError) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::ServerSelection { .. } | ErrorKind::Io(_) | ErrorKind::DnsResolve { .. }
    )
}

/// Maps a driver error raised on `collection` to a storage error.
pub fn map_driver_error(collection: &str, err: DriverError) -> StorageError {
    if is_connection_failure(&err) {
        return StorageError::connection_error(err.to_string());
    }
    classify(collection, server_code(&err), err.to_string())
}

fn classify(collection: &str, code: Option<i32>, message: String) -> StorageError {
    match code {
        Some(DUPLICATE_KEY) => StorageError::duplicate_key(collection, duplicate_key_of(&message)),
        Some(IMMUTABLE_FIELD) => StorageError::immutable_field(collection, STORAGE_KEY),
        code => StorageError::backend(code, message),
    }
}

/// The `{ _id: ... }` part of an E11000 message, or the whole message.
fn duplicate_key_of(message: &str) -> &str {
    message
        .split_once("dup key: ")
        .map_or(message, |(_, key)| key.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_duplicate_key() {
        let err = classify(
            "Organization",
            Some(11000),
            "E11000 duplicate key error".to_string(),
        );
        assert!(err.is_duplicate_key());

        let err = classify(
            "Organization",
            Some(11000),
            "E11000 duplicate key error collection: fhirdoc.Organization index: _id_ dup key: { _id: \"42\" }".to_string(),
        );
        assert!(matches!(
            err,
            StorageError::DuplicateKey { ref key, .. } if key == "{ _id: \"42\" }"
        ));
    }

    #[test]
    fn test_classify_immutable_field() {
        let err = classify("Organization", Some(66), "immutable".to_string());
        assert!(matches!(
            err,
            StorageError::ImmutableField { ref field, .. } if field == "_id"
        ));
    }

    #[test]
    fn test_classify_other_codes() {
        match classify("c", Some(13), "unauthorized".to_string()) {
            StorageError::Backend { code, message } => {
                assert_eq!(code, Some(13));
                assert_eq!(message, "unauthorized");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            classify("c", None, "x".to_string()),
            StorageError::Backend { code: None, .. }
        ));
    }
}
