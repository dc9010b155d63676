use crate::config::LogFormat;
use clap::Parser;

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "clinic-scheduler")]
#[command(about = "Register patients and book clinic appointments")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory holding the data files
    #[arg(long)]
    pub data_dir: Option<String>,

    /// Patients file, relative to the data directory unless absolute
    #[arg(long)]
    pub patients_file: Option<String>,

    /// Appointments file, relative to the data directory unless absolute
    #[arg(long)]
    pub appointments_file: Option<String>,

    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}
