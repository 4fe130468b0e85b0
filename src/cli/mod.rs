//! Command-line interface definitions.
//!
//! Defines the CLI structure for the sfdeploy tool using `clap`. The tool
//! exposes a single `deploy` subcommand that reconciles a packaged
//! application onto a cluster.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use url::Url;

pub mod deploy;

/// Idempotent Service Fabric application deployment
#[derive(Parser, Debug)]
#[command(name = "sfdeploy")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Top-level subcommands for the sfdeploy CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Deploy an application package to a cluster, skipping work already done
    Deploy(DeployArgs),
}

/// Arguments for the `deploy` subcommand.
///
/// The package URL and parameters file are required; everything else falls
/// back to the configuration file and its defaults.
#[derive(Parser, Debug)]
pub struct DeployArgs {
    /// Download URL of the application package (.sfpkg)
    #[arg(short, long)]
    pub remote_url: Url,

    /// Path to the application parameters XML file
    #[arg(short, long)]
    pub application_parameters: PathBuf,

    /// Cluster management endpoint (overrides the config file)
    #[arg(short, long)]
    pub endpoint: Option<String>,

    /// Provisioning timeout in seconds (overrides the config file)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Create missing services even when the application already exists
    #[arg(long)]
    pub reconcile_services: bool,

    /// Path to the configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level filter (overrides the config file)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Emit JSON-formatted logs
    #[arg(long)]
    pub json_logs: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    // Tests for CLI structure validation

    #[test]
    fn test_cli_command_factory_builds() {
        // Verifies that the CLI definition is valid
        let _ = Cli::command();
    }

    #[test]
    fn test_cli_has_version() {
        let cmd = Cli::command();
        assert!(cmd.get_version().is_some());
    }

    #[test]
    fn test_cli_has_about() {
        let cmd = Cli::command();
        assert!(cmd.get_about().is_some());
    }

    #[test]
    fn test_cli_name() {
        let cmd = Cli::command();
        assert_eq!(cmd.get_name(), "sfdeploy");
    }

    // Tests for parsing the deploy subcommand

    #[test]
    fn test_parse_deploy_with_long_flags() {
        let cli = Cli::try_parse_from([
            "sfdeploy",
            "deploy",
            "--remote-url",
            "https://packages.example.com/shop.sfpkg",
            "--application-parameters",
            "params/Cloud.xml",
        ])
        .unwrap();

        let Some(Commands::Deploy(args)) = cli.command else {
            panic!("expected deploy subcommand");
        };
        assert_eq!(
            args.remote_url.as_str(),
            "https://packages.example.com/shop.sfpkg"
        );
        assert_eq!(
            args.application_parameters,
            PathBuf::from("params/Cloud.xml")
        );
    }

    #[test]
    fn test_parse_deploy_with_short_flags() {
        let cli = Cli::try_parse_from([
            "sfdeploy",
            "deploy",
            "-r",
            "https://packages.example.com/shop.sfpkg",
            "-a",
            "params.xml",
            "-e",
            "http://cluster:19080",
            "-c",
            "sfdeploy.toml",
        ])
        .unwrap();

        let Some(Commands::Deploy(args)) = cli.command else {
            panic!("expected deploy subcommand");
        };
        assert_eq!(args.endpoint.as_deref(), Some("http://cluster:19080"));
        assert_eq!(args.config, Some(PathBuf::from("sfdeploy.toml")));
    }

    #[test]
    fn test_deploy_requires_remote_url() {
        let result = Cli::try_parse_from([
            "sfdeploy",
            "deploy",
            "--application-parameters",
            "params.xml",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_deploy_requires_application_parameters() {
        let result = Cli::try_parse_from([
            "sfdeploy",
            "deploy",
            "--remote-url",
            "https://packages.example.com/shop.sfpkg",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_deploy_rejects_malformed_url() {
        let result = Cli::try_parse_from([
            "sfdeploy",
            "deploy",
            "--remote-url",
            "not a url",
            "--application-parameters",
            "params.xml",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_deploy_flag_defaults() {
        let cli = Cli::try_parse_from([
            "sfdeploy",
            "deploy",
            "-r",
            "https://packages.example.com/shop.sfpkg",
            "-a",
            "params.xml",
        ])
        .unwrap();

        let Some(Commands::Deploy(args)) = cli.command else {
            panic!("expected deploy subcommand");
        };
        assert!(!args.reconcile_services);
        assert!(!args.json_logs);
        assert!(args.endpoint.is_none());
        assert!(args.timeout.is_none());
        assert!(args.config.is_none());
        assert!(args.log_level.is_none());
    }

    #[test]
    fn test_parse_reconcile_services_flag() {
        let cli = Cli::try_parse_from([
            "sfdeploy",
            "deploy",
            "-r",
            "https://packages.example.com/shop.sfpkg",
            "-a",
            "params.xml",
            "--reconcile-services",
        ])
        .unwrap();

        let Some(Commands::Deploy(args)) = cli.command else {
            panic!("expected deploy subcommand");
        };
        assert!(args.reconcile_services);
    }

    #[test]
    fn test_parse_timeout_override() {
        let cli = Cli::try_parse_from([
            "sfdeploy",
            "deploy",
            "-r",
            "https://packages.example.com/shop.sfpkg",
            "-a",
            "params.xml",
            "--timeout",
            "30",
        ])
        .unwrap();

        let Some(Commands::Deploy(args)) = cli.command else {
            panic!("expected deploy subcommand");
        };
        assert_eq!(args.timeout, Some(30));
    }

    #[test]
    fn test_no_subcommand_parses_to_none() {
        let cli = Cli::try_parse_from(["sfdeploy"]).unwrap();
        assert!(cli.command.is_none());
    }
}
