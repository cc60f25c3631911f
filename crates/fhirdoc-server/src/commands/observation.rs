use anyhow::Result;
use colored::Colorize;
use fhirdoc_core::FhirVersion;
use fhirdoc_server::AppState;
use fhirdoc_services::RequestContext;

use super::{parse_params, read_body, versioned_args};
use crate::cli::{ObservationCommands, OutputFormat};
use crate::output::{print_success, print_value};

pub async fn run(
    state: &AppState,
    command: &ObservationCommands,
    version: FhirVersion,
    format: OutputFormat,
) -> Result<()> {
    let service = &state.observations;
    match command {
        ObservationCommands::Search(args) => {
            let mut service_args = versioned_args(version);
            parse_params(&mut service_args, &args.params)?;
            let observations = service.search(&service_args).await?;
            print_value(&observations, format)?;
        }
        ObservationCommands::Create(args) => {
            let ctx = RequestContext::with_body(read_body(&args.file)?);
            let outcome = service.create(&versioned_args(version), &ctx).await?;
            let id = outcome.id.as_deref().unwrap_or("?");
            print_success(&format!("Created {}/{}", "Observation".cyan(), id.cyan()));
            print_value(&outcome, format)?;
        }
        ObservationCommands::History(args) => {
            let history = match &args.id {
                Some(id) => {
                    service
                        .history_by_id(&versioned_args(version).with("id", id.as_str()))
                        .await?
                }
                None => service.history(&versioned_args(version)).await?,
            };
            print_value(&history, format)?;
        }
    }
    Ok(())
}
