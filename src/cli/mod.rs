//! Command-line interface parsing and dispatch.

pub mod chat;
pub mod history;
pub mod navigate;

use std::error::Error;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::core::config::Config;

#[derive(Parser)]
#[command(name = "herochat")]
#[command(about = "A CLI to chat with Heroku's Claude-4-Sonnet model")]
#[command(
    long_about = "Herochat sends prompts to a remote inference endpoint, streams back the \
response, and records every exchange in a tagged, append-only conversation log \
(conversations.json). Prior turns with the same tag are replayed as context, so \
a tag behaves like an ongoing conversation.\n\n\
Environment Variables:\n\
  INFERENCE_KEY    Bearer credential for the endpoint (required)\n\
  INFERENCE_URL    Endpoint base URL (optional, defaults to https://eu.inference.heroku.com)"
)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Tag grouping this turn with prior same-tag turns
    pub tag: Option<String>,

    /// Prompt text; remaining words are joined with spaces
    #[arg(trailing_var_arg = true)]
    pub prompt: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// View conversation history, optionally filtered by tag
    History { tag: Option<String> },
    /// Navigate through conversation history, optionally filtered by tag
    Navigate { tag: Option<String> },
}

pub fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    tokio::runtime::Runtime::new()
        .unwrap()
        .block_on(async_main())
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let config = Config::load()?;

    match args.command {
        Some(Commands::History { tag }) => history::run(&config, tag.as_deref().unwrap_or("")),
        Some(Commands::Navigate { tag }) => navigate::run(&config, tag.as_deref().unwrap_or("")),
        None => {
            let Some(tag) = args.tag else {
                return Err("usage: herochat <tag> <prompt...>".into());
            };
            if args.prompt.is_empty() {
                return Err("prompt cannot be empty; usage: herochat <tag> <prompt...>".into());
            }
            let prompt = args.prompt.join(" ");
            chat::run(&config, &tag, &prompt).await
        }
    }
}
