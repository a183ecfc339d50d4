use crate::domain::model::DeclarationKind;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "ergani")]
#[command(about = "Submit work cards, overtime and work schedules to the Ergani API")]
pub struct CliConfig {
    #[arg(
        long,
        help = "TOML configuration file. ERGANI_USERNAME / ERGANI_PASSWORD / ERGANI_BASE_URL are used when omitted"
    )]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum)]
    pub kind: DeclarationKind,

    #[arg(long, help = "JSON file holding an array of company declarations")]
    pub input: PathBuf,

    #[arg(long, help = "Print the request payload instead of sending it")]
    pub dry_run: bool,

    #[arg(long, help = "Log as JSON lines")]
    pub json_logs: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}
