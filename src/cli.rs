//! 命令行参数定义

use std::path::PathBuf;

use clap::Parser;

use crate::config::Overrides;
use crate::models::OverlapPolicy;

/// CLI arguments for caddie
#[derive(Parser, Debug)]
#[command(name = "caddie")]
#[command(version, about = "Ask your golf assistant any question")]
#[command(long_about = r#"
A terminal question form: type a question, submit it, and the reply from the
text-processing service is shown below the form.

Configuration is read from --config <path> or ~/.config/caddie/config.toml.
Logs are written to ~/.local/share/caddie/caddie.log unless `log_file` is set.
"#)]
pub struct Cli {
    /// Text-processing endpoint (overrides the config file)
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Config file path
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// What to do when several submits are in flight
    #[arg(long, value_enum)]
    pub overlap: Option<OverlapPolicy>,

    /// Log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            endpoint: self.endpoint.clone(),
            overlap: self.overlap,
        }
    }
}
