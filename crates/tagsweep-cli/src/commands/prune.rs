//! Prune command implementation.
//!
//! Lists the tags of one image, keeps the newest versions matching the
//! version pattern and deletes the manifests of the rest.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use tagsweep_core::{Notice, PruneConfig, Pruner};
use tagsweep_registry::{RegistryAuth, RegistryClient, RegistryConfig};

/// Arguments for pruning a repository.
#[derive(Args, Debug)]
pub struct PruneArgs {
    /// Regular docker path '<registry>/repo/image', optionally prefixed with http:// or https://
    #[arg(long, env = "REGISTRY_PATH")]
    pub path: String,

    /// Registry username (optional)
    #[arg(short, long, env = "USERNAME", default_value = "")]
    pub username: String,

    /// Registry password (optional)
    #[arg(short, long, env = "PASSWORD", default_value = "", hide_env_values = true)]
    pub password: String,

    /// Image versions to delete, as a regex matched against the whole tag
    #[arg(
        short = 'i',
        long = "imageversion",
        visible_alias = "iv",
        env = "IMAGE_VERSION",
        default_value = PruneConfig::DEFAULT_VERSION_PATTERN
    )]
    pub image_version: String,

    /// Number of newest matching versions to keep
    #[arg(short, long, env = "KEEP", default_value_t = PruneConfig::DEFAULT_KEEP)]
    pub keep: usize,

    /// Do not actually delete anything
    #[arg(
        short,
        long = "dryrun",
        env = "DRYRUN",
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    pub dry_run: bool,

    /// Request timeout in seconds
    #[arg(long, env = "TIMEOUT", default_value = "30")]
    pub timeout: u64,
}

/// Runs the prune command.
///
/// # Errors
///
/// Returns an error if:
/// - The path or version pattern is invalid
/// - The registry cannot be reached or rejects the credentials
/// - The tags of the image cannot be listed
///
/// Failures to delete individual versions are reported but are not errors.
pub async fn run(args: &PruneArgs) -> Result<()> {
    let config = build_config(args)?;
    let target = config.target();

    println!("Parsed hostname: {}", target.host());
    println!("Parsed protocol: {}", target.scheme());
    println!("Parsed image: {}", target.repository());

    info!(
        registry = %target.registry_url(),
        repository = target.repository(),
        pattern = config.filter().pattern(),
        keep = config.keep(),
        dry_run = config.dry_run(),
        "Pruning repository"
    );

    let registry_config = RegistryConfig::new(target.registry_url())
        .with_auth(RegistryAuth::from_credentials(&args.username, &args.password))
        .with_timeout(Duration::from_secs(args.timeout))
        .with_user_agent(format!("tagsweep/{}", env!("CARGO_PKG_VERSION")));

    let client = RegistryClient::new(registry_config).context("Failed to create registry client")?;
    client
        .ping()
        .await
        .with_context(|| format!("Registry {} is not available", target.registry_url()))?;

    let report = Pruner::new(&client, &config)
        .run(&mut print_notice)
        .await
        .context("Failed to prune repository")?;

    if !report.deletions.is_clean() {
        tracing::warn!(
            failed = report.deletions.failed(),
            "Some versions could not be deleted"
        );
    }

    Ok(())
}

/// Validates the arguments into a pruning configuration.
fn build_config(args: &PruneArgs) -> Result<PruneConfig> {
    let config = PruneConfig::new(&args.path)?
        .with_pattern(&args.image_version)?
        .with_keep(args.keep)
        .with_dry_run(args.dry_run);
    Ok(config)
}

/// Prints a notice to stdout, separating per-version blocks with a blank line.
fn print_notice(notice: &Notice) {
    match notice {
        Notice::DryRun
        | Notice::Summary { .. }
        | Notice::Keep { .. }
        | Notice::Delete { .. }
        | Notice::Finished { .. } => println!("\n{notice}"),
        _ => println!("{notice}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Cli;
    use clap::Parser;
    use tagsweep_core::PruneError;

    fn args(path: &str, image_version: &str) -> PruneArgs {
        PruneArgs {
            path: path.to_string(),
            username: String::new(),
            password: String::new(),
            image_version: image_version.to_string(),
            keep: 3,
            dry_run: false,
            timeout: 30,
        }
    }

    #[test]
    fn test_build_config() {
        let config = build_config(&args("example.com/a/b", ".*-SNAPSHOT.*")).unwrap();
        assert_eq!(config.target().scheme(), "https");
        assert_eq!(config.target().host(), "example.com");
        assert_eq!(config.target().repository(), "a/b");
        assert_eq!(config.keep(), 3);
    }

    #[test]
    fn test_build_config_missing_image_is_usage_error() {
        let err = build_config(&args("example.com", ".*")).unwrap_err();
        let prune_err = err.downcast_ref::<PruneError>().unwrap();
        assert!(prune_err.is_configuration());
    }

    #[test]
    fn test_build_config_invalid_pattern_is_usage_error() {
        let err = build_config(&args("example.com/a/b", "(")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PruneError>(),
            Some(PruneError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_parse_short_flags() {
        let cli = Cli::try_parse_from([
            "tagsweep",
            "--path",
            "registry.example.com/myorg/app",
            "-u",
            "ci",
            "-p",
            "secret",
            "-i",
            r"\d+\.\d+\.\d+-rc\.\d+",
            "-k",
            "5",
            "-d",
        ])
        .unwrap();

        assert_eq!(cli.prune.path, "registry.example.com/myorg/app");
        assert_eq!(cli.prune.username, "ci");
        assert_eq!(cli.prune.password, "secret");
        assert_eq!(cli.prune.image_version, r"\d+\.\d+\.\d+-rc\.\d+");
        assert_eq!(cli.prune.keep, 5);
        assert!(cli.prune.dry_run);
    }

    #[test]
    fn test_parse_long_flags() {
        let cli = Cli::try_parse_from([
            "tagsweep",
            "--path",
            "http://localhost:5000/app",
            "--imageversion",
            ".*",
            "--keep",
            "0",
            "--dryrun",
            "--timeout",
            "5",
        ])
        .unwrap();

        assert_eq!(cli.prune.image_version, ".*");
        assert_eq!(cli.prune.keep, 0);
        assert!(cli.prune.dry_run);
        assert_eq!(cli.prune.timeout, 5);
    }

    #[test]
    fn test_parse_iv_alias() {
        let cli = Cli::try_parse_from(["tagsweep", "--path", "example.com/a", "--iv", "1\\..*"])
            .unwrap();
        assert_eq!(cli.prune.image_version, "1\\..*");
    }

    #[test]
    fn test_parse_rejects_negative_keep() {
        let result = Cli::try_parse_from(["tagsweep", "--path", "example.com/a", "--keep", "-1"]);
        assert!(result.is_err());
    }
}
