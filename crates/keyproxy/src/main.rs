use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use keyproxy::{PrivateKeyProvider, ProxyConfig, Registries};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
struct Args {
    #[clap(long, env = "KEYPROXY_CONFIG", default_value = "keyproxy.yaml")]
    config: PathBuf,
    /// Log filter used when `RUST_LOG` is unset.
    #[clap(long, env = "KEYPROXY_LOG", default_value = "info")]
    log: String,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Wiring defects stop the process before any configuration is touched.
    let registries = match Registries::builtin() {
        Ok(registries) => registries,
        Err(error) => {
            tracing::error!(%error, "fatal: invalid provider registration");
            return ExitCode::from(2);
        }
    };

    match resolve(&registries, &args.config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!("configuration resolution failed: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn resolve(registries: &Registries, config_path: &Path) -> Result<()> {
    let config = ProxyConfig::load(config_path)?;

    let provider = registries
        .key_providers
        .create(&config.private_key)
        .context("building private key provider")?;
    report_key(provider.as_ref())?;

    if let Some(source) = &config.credential_source {
        registries
            .credential_stores
            .create(source)
            .context("building credential store")?;
    }

    Ok(())
}

fn report_key(provider: &dyn PrivateKeyProvider) -> Result<()> {
    let key = provider.private_key()?;
    tracing::info!(
        key_id = %key.key_id(),
        bits = key.bits(),
        fingerprint = %key.fingerprint()?,
        "signing key ready"
    );
    Ok(())
}
