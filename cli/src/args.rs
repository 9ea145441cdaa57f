//! Command-line arguments for the `nudeny` binary.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use nudeny_core::{sources_from_json, Capability, Payload, BASE_URL_ENV, DEFAULT_BASE_URL};

/// Send images to a Nudeny moderation service
#[derive(Parser, Debug)]
#[command(name = "nudeny")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Base address of the moderation service
    #[arg(long, global = true, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify images as safe or not
    Classify(SourceArgs),

    /// Detect exposed regions in images
    Detect(SourceArgs),

    /// Censor exposed regions in images
    Censor(SourceArgs),
}

impl Commands {
    pub fn into_parts(self) -> (Capability, SourceArgs) {
        match self {
            Commands::Classify(args) => (Capability::Classify, args),
            Commands::Detect(args) => (Capability::Detect, args),
            Commands::Censor(args) => (Capability::Censor, args),
        }
    }
}

#[derive(Args, Debug)]
pub struct SourceArgs {
    /// Treat sources as image URLs instead of file paths
    #[arg(long)]
    pub url: bool,

    /// Also read sources from a JSON array of strings
    #[arg(long, value_name = "FILE")]
    pub from_json: Option<PathBuf>,

    /// Image file paths, or URLs with --url
    pub sources: Vec<String>,
}

impl SourceArgs {
    /// Positional sources first, then any read from `--from-json`.
    pub fn into_payload(self) -> Result<Payload> {
        let mut sources = self.sources;
        if let Some(file) = &self.from_json {
            let raw = std::fs::read_to_string(file)
                .with_context(|| format!("reading {}", file.display()))?;
            let value: serde_json::Value = serde_json::from_str(&raw)
                .with_context(|| format!("parsing {}", file.display()))?;
            sources.extend(sources_from_json(&value)?);
        }

        Ok(if self.url {
            Payload::urls(sources)
        } else {
            Payload::paths(sources)
        })
    }
}
