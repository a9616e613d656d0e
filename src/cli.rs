//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Upload, fetch and browse pastes on paste.run.
#[derive(Parser, Debug)]
#[command(name = "pasterun")]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Bearer token for authenticated requests
    #[arg(long, env = "PASTERUN_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    /// Service base URL
    #[arg(long, env = "PASTERUN_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Extra request header as NAME:VALUE (repeatable)
    #[arg(short = 'H', long = "header", value_parser = parse_header, global = true)]
    pub headers: Vec<(String, String)>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Upload a file (or stdin) and print the paste URL
    Upload {
        /// File to upload; reads stdin when omitted
        file: Option<PathBuf>,

        /// Paste author
        #[arg(long)]
        author: Option<String>,

        /// Paste title (defaults to the file name)
        #[arg(long)]
        title: Option<String>,

        /// Paste description
        #[arg(long = "desc")]
        description: Option<String>,

        /// Paste type, e.g. a language class or file extension
        #[arg(long = "type")]
        paste_type: Option<String>,
    },

    /// Write a paste's content to stdout
    Get {
        /// Paste ID or https://www.paste.run/ URL
        paste: String,

        /// Print metadata instead of content
        #[arg(long)]
        info: bool,
    },

    /// List supported languages
    Languages {
        /// Search text
        query: Option<String>,
    },
}

fn parse_header(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected NAME:VALUE, got '{raw}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("empty header name in '{raw}'"));
    }
    Ok((name.to_string(), value.trim().to_string()))
}
