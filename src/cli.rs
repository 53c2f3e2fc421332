use std::path::PathBuf;

use clap::Parser;

use mods_migrate::date::UnknownMonthPolicy;

#[derive(Parser, Debug)]
#[command(
    name = "mods-migrate",
    about = "Normalize legacy MODS records into flat migration worksheet fields",
    version
)]
pub struct Cli {
    /// MODS files, or directories of `<pid>.xml` files
    #[arg(default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Config file [default: ./.mods-migrate/config.toml, fallback ~/.config/mods-migrate/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// How "<Word> YYYY" dates with an unknown month are handled (overrides config)
    #[arg(long, value_name = "POLICY")]
    pub unknown_month: Option<UnknownMonthArg>,

    /// Extract records that have no <titleInfo> instead of failing them
    #[arg(long)]
    pub allow_missing_title: bool,

    /// Show every extracted field, and debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print summary line
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum UnknownMonthArg {
    FallThrough,
    Sentinel,
}

impl From<&UnknownMonthArg> for UnknownMonthPolicy {
    fn from(arg: &UnknownMonthArg) -> Self {
        match arg {
            UnknownMonthArg::FallThrough => UnknownMonthPolicy::FallThrough,
            UnknownMonthArg::Sentinel => UnknownMonthPolicy::Sentinel,
        }
    }
}
