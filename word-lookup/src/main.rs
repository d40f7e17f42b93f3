use std::{
    io::{self, IsTerminal},
    process::ExitCode,
};

use clap::Parser;
use config::{Config, LogFormat, DEFAULT_LOG_FILTER};
use dictionary::Dictionary;
use render::render_as;
use shell::Shell;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;
use view::{DefinitionSource, LookupView, Outcome};

mod config;
mod render;
mod shell;
mod utilities;
mod view;

/// Look up English words in the free dictionary API.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Look up a single word and exit instead of starting the prompt
    word: Option<String>,
    /// Print results as JSON
    #[arg(long)]
    json: bool,
    /// Base URL of the entries endpoint, overrides DICTIONARY_API_URL
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    let config = Config::from_env()?;
    init_tracing(config.log_format);

    let api_url = args.api_url.unwrap_or(config.api_url);
    tracing::debug!(%api_url, "starting");
    let view = LookupView::new(Dictionary::with_base_url(api_url));

    match args.word {
        Some(word) => lookup_once(&view, &word, args.json).await,
        None => {
            let inline = !io::stdin().is_terminal();
            let shell = Shell::new(view, args.json, inline);
            let mut stdout = tokio::io::stdout();
            shell
                .run(BufReader::new(tokio::io::stdin()), &mut stdout)
                .await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

async fn lookup_once<S: DefinitionSource>(
    view: &LookupView<S>,
    word: &str,
    json: bool,
) -> anyhow::Result<ExitCode> {
    view.set_query(word).await;
    if !view.submit(word).await {
        eprintln!("Nothing to look up.");
        return Ok(ExitCode::FAILURE);
    }
    let state = view.snapshot().await;
    let rendered = render_as(&state, json)?;
    let rendered = rendered.trim_end();
    match state.outcome {
        Outcome::Error(_) => {
            if json {
                println!("{rendered}");
            } else {
                eprintln!("{rendered}");
            }
            Ok(ExitCode::FAILURE)
        }
        _ => {
            println!("{rendered}");
            Ok(ExitCode::SUCCESS)
        }
    }
}
