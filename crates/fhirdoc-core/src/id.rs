/// Generates a fresh logical resource id.
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Returns the supplied id when there is one, otherwise a generated one.
pub fn id_or_generate(existing: Option<&str>) -> String {
    match existing {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => generate_id(),
    }
}
