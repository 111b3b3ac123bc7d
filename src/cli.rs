use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::types::Architecture;

/// QuickLook - EC2 instance and EBS volume price lookup
#[derive(Parser, Debug)]
#[command(name = "quicklook")]
#[command(about = "Look up and compare EC2 instance and EBS volume prices")]
#[command(version)]
pub struct Cli {
    /// Pricing API base URL (overrides the config file)
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Path to a configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Write logs to this file (the TUI discards them otherwise)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Run the interactive TUI (default)
    Tui,
    /// Look up instance and volume prices without the TUI
    Lookup {
        /// Region code (e.g., us-east-1)
        #[arg(short, long)]
        region: Option<String>,
        /// Instance type (e.g., m5.large)
        #[arg(short = 't', long = "type")]
        instance_type: String,
        /// Operation code (defaults to the configured platform's)
        #[arg(long)]
        op: Option<String>,
        /// EBS volume type (e.g., gp3)
        #[arg(long)]
        volume_type: Option<String>,
        /// EBS volume size in GiB
        #[arg(long)]
        volume_size: Option<u32>,
    },
    /// List the sizes of a family, rank-sorted, with the best match marked
    Sizes {
        /// Region code (e.g., us-east-1)
        #[arg(short, long)]
        region: Option<String>,
        /// Processor architecture (x86_64 or arm64)
        #[arg(short, long)]
        arch: Option<Architecture>,
        /// Instance family (e.g., m7g)
        #[arg(short, long)]
        family: String,
        /// Previously selected instance type whose size should carry over
        #[arg(short, long)]
        previous: Option<String>,
    },
    /// Validate a configuration file
    Validate {
        /// Path to configuration file to validate
        config: PathBuf,
    },
    /// Write a configuration file with default values
    InitConfig {
        /// Where to write the file
        path: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_tui() {
        let cli = Cli::try_parse_from(["quicklook"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.endpoint.is_none());
    }

    #[test]
    fn test_lookup_arguments() {
        let cli = Cli::try_parse_from([
            "quicklook",
            "--endpoint",
            "http://pricing.internal/",
            "lookup",
            "-r",
            "eu-west-1",
            "--type",
            "m5.large",
            "--volume-size",
            "100",
        ])
        .unwrap();
        assert_eq!(cli.endpoint.as_deref(), Some("http://pricing.internal/"));
        assert_eq!(
            cli.command,
            Some(Commands::Lookup {
                region: Some("eu-west-1".to_string()),
                instance_type: "m5.large".to_string(),
                op: None,
                volume_type: None,
                volume_size: Some(100),
            })
        );
    }

    #[test]
    fn test_sizes_parses_architecture() {
        let cli =
            Cli::try_parse_from(["quicklook", "sizes", "--arch", "arm64", "--family", "m7g"])
                .unwrap();
        match cli.command {
            Some(Commands::Sizes { arch, family, .. }) => {
                assert_eq!(arch, Some(Architecture::Arm64));
                assert_eq!(family, "m7g");
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(Cli::try_parse_from(["quicklook", "sizes", "--arch", "sparc", "-f", "m5"]).is_err());
    }
}
