pub mod toml_config;

pub use toml_config::DemoConfig;

use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "fault-demo")]
#[command(about = "Triggers eleven runtime faults and reports how each one is caught")]
pub struct CliConfig {
    /// TOML file overriding the routine inputs
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Output machine-readable JSON")]
    pub json: bool,

    #[arg(long, help = "List routine names and exit")]
    pub list: bool,

    /// Run only these routines (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,
}

impl CliConfig {
    pub fn load_demo_config(&self) -> crate::Result<DemoConfig> {
        match &self.config {
            Some(path) => DemoConfig::from_file(path),
            None => Ok(DemoConfig::default()),
        }
    }
}
