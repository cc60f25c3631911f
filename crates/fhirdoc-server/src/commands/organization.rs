use anyhow::Result;
use colored::Colorize;
use fhirdoc_server::AppState;
use fhirdoc_services::ServiceArgs;

use super::read_body;
use crate::cli::{CreateOrganizationArgs, OrganizationCommands, OutputFormat, UpdateArgs};
use crate::output::{print_success, print_value};

pub async fn run(state: &AppState, command: &OrganizationCommands, format: OutputFormat) -> Result<()> {
    let service = &state.organizations;
    match command {
        OrganizationCommands::Count => {
            let count = service.get_count(&ServiceArgs::new()).await?;
            print_value(&serde_json::json!({ "count": count }), format)?;
        }
        OrganizationCommands::Get(args) => {
            match service
                .get_organization_by_id(&ServiceArgs::new().with("id", args.id.as_str()))
                .await?
            {
                Some(organization) => print_value(&organization, format)?,
                None => anyhow::bail!("Organization/{} not found", args.id),
            }
        }
        OrganizationCommands::Create(args) => create(state, args, format).await?,
        OrganizationCommands::Update(args) => update(state, args, format).await?,
        OrganizationCommands::Delete(args) => {
            service
                .delete_organization(&ServiceArgs::new().with("id", args.id.as_str()))
                .await?;
            print_success(&format!("Deleted {}/{}", "Organization".cyan(), args.id.cyan()));
        }
    }
    Ok(())
}

async fn create(state: &AppState, args: &CreateOrganizationArgs, format: OutputFormat) -> Result<()> {
    let mut service_args = ServiceArgs::new().with("resource", read_body(&args.file)?);
    if let Some(id) = &args.id {
        service_args.insert("id", id.as_str());
    }
    let outcome = state.organizations.create_organization(&service_args).await?;
    let id = outcome.id.as_deref().unwrap_or("?");
    print_success(&format!("Created {}/{}", "Organization".cyan(), id.cyan()));
    print_value(&outcome, format)
}

async fn update(state: &AppState, args: &UpdateArgs, format: OutputFormat) -> Result<()> {
    let service_args = ServiceArgs::new()
        .with("id", args.id.as_str())
        .with("resource", read_body(&args.file)?);
    let outcome = state.organizations.update_organization(&service_args).await?;
    let verb = if outcome.created { "Created" } else { "Updated" };
    print_success(&format!("{verb} {}/{}", "Organization".cyan(), args.id.cyan()));
    print_value(&outcome, format)
}
