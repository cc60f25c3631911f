pub mod observation;
pub mod organization;

use std::fs;
use std::io::{self, Read};

use anyhow::{Context, Result};
use fhirdoc_core::FhirVersion;
use fhirdoc_server::config::StorageBackend;
use fhirdoc_services::ServiceArgs;
use serde_json::Value;

use crate::cli::Commands;

/// Refuses commands whose writes the backend would drop on exit.
pub fn ensure_persistent(backend: StorageBackend, command: &Commands) -> Result<()> {
    if backend == StorageBackend::Memory && command.writes() {
        anyhow::bail!(
            "the memory backend keeps nothing after this command exits; \
             set storage.backend = \"mongodb\" to store resources"
        );
    }
    Ok(())
}

fn read_body(file: &Option<String>) -> Result<Value> {
    let content = match file {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))?
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            buf
        }
    };
    serde_json::from_str(&content).context("Invalid JSON")
}

/// Arguments carrying the `base_version` every Observation call needs.
fn versioned_args(version: FhirVersion) -> ServiceArgs {
    ServiceArgs::new().with("base_version", version.as_base_version())
}

/// Parses `key=value` search parameters onto `args`.
fn parse_params(args: &mut ServiceArgs, params: &[String]) -> Result<()> {
    for param in params {
        let Some((key, value)) = param.split_once('=') else {
            anyhow::bail!("Invalid search parameter \"{param}\". Expected format: key=value");
        };
        if key.is_empty() {
            anyhow::bail!("Invalid search parameter \"{param}\": empty name");
        }
        args.insert(key, value);
    }
    Ok(())
}
