//! `nudeny`: send images to a moderation service from the shell.
//!
//! Prints the response body to stdout and the status line to stderr. Exits
//! non-zero when the service answers with a non-2xx status.

mod args;

use std::io::Write;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use nudeny_core::{ClientConfig, Dispatcher};
use tracing_subscriber::EnvFilter;

use crate::args::Cli;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::new(&cli.base_url)?;
    let (capability, sources) = cli.command.into_parts();
    let payload = sources.into_payload()?;

    let dispatcher = Dispatcher::new(config);
    let response = dispatcher
        .dispatch(capability, payload)
        .await
        .with_context(|| format!("{capability} request failed"))?;

    eprintln!("HTTP {}", response.status);
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&response.body)?;
    if !response.body.ends_with(b"\n") {
        stdout.write_all(b"\n")?;
    }

    let code = exit_code(response.status);
    if code != 0 {
        tracing::warn!(status = response.status, "service returned an error status");
    }
    Ok(ExitCode::from(code))
}

/// Process exit code for a response status: 0 for 2xx, 1 otherwise.
fn exit_code(status: u16) -> u8 {
    if (200..300).contains(&status) {
        0
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_statuses_exit_zero() {
        assert_eq!(exit_code(200), 0);
        assert_eq!(exit_code(204), 0);
        assert_eq!(exit_code(299), 0);
    }

    #[test]
    fn other_statuses_exit_non_zero() {
        assert_eq!(exit_code(199), 1);
        assert_eq!(exit_code(301), 1);
        assert_eq!(exit_code(404), 1);
        assert_eq!(exit_code(500), 1);
    }
}
