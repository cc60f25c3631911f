use clap::{Parser, Subcommand, ValueEnum};

/// Shown under `--help`.
pub const MEMORY_BACKEND_NOTE: &str = "\
Storage: with storage.backend = \"memory\" (the default) every run starts with an
empty store and nothing is kept after it exits, so create, update and delete
are refused. Set storage.backend = \"mongodb\" and build with --features mongodb
to keep data between runs.";

#[derive(Parser)]
#[command(name = "fhirdoc")]
#[command(about = "fhirdoc: Organization and Observation resources over a document store")]
#[command(version)]
#[command(after_help = MEMORY_BACKEND_NOTE)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the configuration file (default: fhirdoc.toml)
    #[arg(short, long, global = true, env = "FHIRDOC_CONFIG")]
    pub config: Option<String>,

    /// FHIR version (base_version, e.g. 4_0_0); defaults to fhir.default_version
    #[arg(long, global = true, env = "FHIRDOC_FHIR_VERSION")]
    pub fhir_version: Option<String>,

    /// Output format
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,
}

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Table,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Organization operations
    #[command(subcommand)]
    Organization(OrganizationCommands),
    /// Observation operations
    #[command(subcommand)]
    Observation(ObservationCommands),
    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

impl Commands {
    /// Whether the command changes stored data.
    pub fn writes(&self) -> bool {
        match self {
            Commands::Organization(command) => matches!(
                command,
                OrganizationCommands::Create(_)
                    | OrganizationCommands::Update(_)
                    | OrganizationCommands::Delete(_)
            ),
            Commands::Observation(command) => matches!(command, ObservationCommands::Create(_)),
            Commands::Config(_) => false,
        }
    }
}

#[derive(Subcommand)]
pub enum OrganizationCommands {
    /// Count stored organizations
    Count,
    /// Read an organization by id
    Get(IdArgs),
    /// Store a new organization
    Create(CreateOrganizationArgs),
    /// Replace an organization, inserting it when absent
    Update(UpdateArgs),
    /// Delete an organization
    Delete(IdArgs),
}

#[derive(Subcommand)]
pub enum ObservationCommands {
    /// Search observations
    Search(SearchArgs),
    /// Store a new observation
    Create(BodyArgs),
    /// View observation history
    History(HistoryArgs),
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,
}

#[derive(clap::Args)]
pub struct IdArgs {
    /// Resource id
    pub id: String,
}

#[derive(clap::Args)]
pub struct BodyArgs {
    /// Path to JSON file (reads from stdin if omitted)
    #[arg(long)]
    pub file: Option<String>,
}

#[derive(clap::Args)]
pub struct CreateOrganizationArgs {
    /// Storage key; generated when omitted
    #[arg(long)]
    pub id: Option<String>,
    /// Path to JSON file (reads from stdin if omitted)
    #[arg(long)]
    pub file: Option<String>,
}

#[derive(clap::Args)]
pub struct UpdateArgs {
    /// Resource id
    pub id: String,
    /// Path to JSON file (reads from stdin if omitted)
    #[arg(long)]
    pub file: Option<String>,
}

#[derive(clap::Args)]
pub struct SearchArgs {
    /// Search parameters as key=value pairs (e.g. code=http://loinc.org|8867-4)
    pub params: Vec<String>,
}

#[derive(clap::Args)]
pub struct HistoryArgs {
    /// Resource id; omit for the history of every observation
    pub id: Option<String>,
}
