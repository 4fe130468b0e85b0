//! Deploy command execution.
//!
//! Wires the resolver, the REST adapter, and the reconciler together:
//! resolve the desired state from the package and parameters file, then
//! reconcile the cluster toward it.

use std::sync::Arc;

use tracing::info;

use super::DeployArgs;
use crate::adapter::FabricRestClient;
use crate::config::Config;
use crate::error::Result;
use crate::reconciler::{ReconcileOptions, Reconciler};
use crate::resolver::PackageResolver;

/// Merge file configuration with command-line overrides.
///
/// Overrides are applied before validation, so a bad `--endpoint` or
/// `--timeout 0` fails here rather than mid-deployment.
///
/// # Errors
///
/// Returns the errors of [`Config::load_or_default`] plus validation
/// failures on the overridden values.
pub fn build_config(args: &DeployArgs) -> Result<Config> {
    let mut config = Config::load_or_default(args.config.as_deref())?;
    if let Some(endpoint) = &args.endpoint {
        config.cluster.endpoint = endpoint.clone();
    }
    if let Some(timeout) = args.timeout {
        config.provision.timeout_secs = timeout;
    }
    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }
    if args.json_logs {
        config.logging.format = "json".into();
    }
    config.validate()?;
    Ok(config)
}

/// Run a deployment end to end.
///
/// # Errors
///
/// Returns resolution errors before any cluster call, and the first cluster
/// error after that. A failed run leaves completed steps in place; rerunning
/// picks up where it stopped.
pub async fn execute(args: &DeployArgs, config: &Config) -> Result<()> {
    let resolver = PackageResolver::new();
    let spec = resolver
        .resolve(&args.remote_url, &args.application_parameters)
        .await?;

    let cluster = Arc::new(FabricRestClient::from_config(&config.cluster));
    let options = ReconcileOptions {
        provision_timeout: config.provision.timeout(),
        reconcile_existing_services: args.reconcile_services,
    };
    let report = Reconciler::with_options(cluster, options)
        .reconcile(&spec)
        .await?;

    if report.is_noop() {
        info!("Cluster already matches the package, nothing to do");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::{Cli, Commands};
    use crate::error::{ConfigError, Error};

    fn deploy_args(extra: &[&str]) -> DeployArgs {
        let mut argv = vec![
            "sfdeploy",
            "deploy",
            "-r",
            "https://packages.example.com/shop.sfpkg",
            "-a",
            "params.xml",
        ];
        argv.extend_from_slice(extra);
        match Cli::try_parse_from(argv).unwrap().command {
            Some(Commands::Deploy(args)) => args,
            _ => unreachable!(),
        }
    }

    #[test]
    fn build_config_uses_defaults_without_overrides() {
        let args = deploy_args(&[]);
        let config = build_config(&args).unwrap();
        assert_eq!(config.provision.timeout_secs, 300);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn build_config_applies_cli_overrides() {
        let args = deploy_args(&[
            "--endpoint",
            "http://cluster:19080",
            "--timeout",
            "42",
            "--log-level",
            "debug",
            "--json-logs",
        ]);
        let config = build_config(&args).unwrap();
        assert_eq!(config.cluster.endpoint, "http://cluster:19080");
        assert_eq!(config.provision.timeout_secs, 42);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn build_config_rejects_zero_timeout_override() {
        let args = deploy_args(&["--timeout", "0"]);
        let err = build_config(&args).unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue {
                field: "timeout_secs",
                ..
            })
        ));
    }

    #[test]
    fn build_config_rejects_malformed_endpoint_override() {
        let args = deploy_args(&["--endpoint", "not a url"]);
        assert!(build_config(&args).is_err());
    }

    #[test]
    fn build_config_fails_on_missing_config_file() {
        let args = deploy_args(&["--config", "/nonexistent/sfdeploy.toml"]);
        let err = build_config(&args).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::ReadFile(_))));
    }
}
