//! CLI entry point for the pasterun tool.

use std::io::IsTerminal;

use anyhow::{Context, Result};
use clap::Parser;
use pasterun::{CancelHandle, PasteClient, PasteInfo, RequestOption};
use tracing::{debug, info, warn};

mod cli;

use cli::{Args, Command};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (warn)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    // stdout carries paste content and URLs only
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!(command = ?args.command, "CLI arguments parsed");

    let cancel = CancelHandle::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("interrupt received, cancelling request");
                cancel.cancel();
            }
        });
    }

    let client = PasteClient::with_options(base_options(&args, &cancel))?;

    match args.command {
        Command::Upload {
            file,
            author,
            title,
            description,
            paste_type,
        } => {
            let options = [
                author.map(RequestOption::author),
                title.map(RequestOption::title),
                description.map(RequestOption::description),
                paste_type.map(RequestOption::paste_type),
            ]
            .into_iter()
            .flatten();

            let url = match file {
                Some(path) => client
                    .upload_file(&path, options)
                    .await
                    .with_context(|| format!("uploading {}", path.display()))?,
                None => {
                    if std::io::stdin().is_terminal() {
                        info!("reading paste from the terminal; finish with Ctrl-D");
                    }
                    client
                        .upload(tokio::io::stdin(), options)
                        .await
                        .context("uploading stdin")?
                }
            };
            println!("{url}");
        }
        Command::Get { paste, info } => {
            let fetched = client
                .get(&paste, [])
                .await
                .with_context(|| format!("fetching {paste}"))?;
            if info {
                print_info(&fetched);
            } else {
                let mut stdout = tokio::io::stdout();
                let copied = fetched.content.copy_to(&mut stdout).await?;
                debug!(bytes = copied, "paste written to stdout");
            }
        }
        Command::Languages { query } => {
            let languages = client
                .get_languages(query.map(RequestOption::query))
                .await
                .context("listing languages")?;
            if languages.is_empty() {
                info!("no matching languages");
            }
            for language in languages {
                match language.mode {
                    Some(mode) => println!("{}\t{}\t{mode}", language.name, language.class),
                    None => println!("{}\t{}", language.name, language.class),
                }
            }
        }
    }

    Ok(())
}

fn base_options(args: &Args, cancel: &CancelHandle) -> Vec<RequestOption> {
    let mut options = vec![RequestOption::cancel(cancel.clone())];
    if let Some(token) = &args.token {
        options.push(RequestOption::token(token.clone()));
    }
    if let Some(base_url) = &args.base_url {
        options.push(RequestOption::base_url(base_url.clone()));
    }
    if !args.headers.is_empty() {
        options.push(RequestOption::headers(
            args.headers
                .iter()
                .flat_map(|(name, value)| [name.clone(), value.clone()]),
        ));
    }
    options
}

fn print_info(info: &PasteInfo) {
    let time = |t: Option<std::time::SystemTime>, missing: &str| {
        t.map_or_else(|| missing.to_string(), httpdate::fmt_http_date)
    };
    println!("title:     {}", info.title);
    println!("author:    {}", info.author);
    println!("language:  {}", info.language);
    println!("class:     {}", info.class);
    println!("type:      {}", info.content_type);
    match info.size {
        Some(size) => println!("size:      {size}"),
        None => println!("size:      unknown"),
    }
    println!("created:   {}", time(info.created, "unknown"));
    println!("expires:   {}", time(info.expires, "never"));
}
