mod config;
mod plan_cmds;
mod search_cmd;
mod serve_cmd;
#[cfg(test)]
mod test_util;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use skillpath_core::provider::SerperClient;
use skillpath_core::{Curator, ResourceResolver};

use config::{Overrides, SkillpathConfig};
use search_cmd::SearchKind;

#[derive(Parser)]
#[command(name = "skillpath", about = "Turn a learning topic into a curated 7-day curriculum")]
struct Cli {
    /// Gemini model name (overrides SKILLPATH_MODEL env var)
    #[arg(long, global = true)]
    model: Option<String>,

    /// How many days' resources are looked up at the same time
    #[arg(long, global = true)]
    max_concurrent_days: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a skillpath config file with API keys
    Init {
        /// Google Gemini API key
        #[arg(long)]
        gemini_key: Option<String>,
        /// Serper search API key
        #[arg(long)]
        serper_key: Option<String>,
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Generate a 7-day learning plan for a topic
    Plan {
        /// Learning topic, e.g. "Python for Data Analysis"
        topic: String,
        /// Print JSON instead of Markdown
        #[arg(long)]
        json: bool,
    },
    /// Expand one day of a plan into a detailed study guide
    Day {
        /// Overall learning topic
        topic: String,
        /// The day's focus, as listed in the plan
        day_topic: String,
        /// Day number (1-7)
        #[arg(allow_negative_numbers = true)]
        day_number: i64,
        /// Print JSON instead of Markdown
        #[arg(long)]
        json: bool,
    },
    /// Search for videos or articles on a topic
    Search {
        /// Topic to search for
        topic: String,
        /// What to look for
        #[arg(long, value_enum, default_value_t = SearchKind::Videos)]
        kind: SearchKind,
        /// Maximum number of results
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },
    /// Serve the plan API over HTTP
    Serve {
        /// Address to bind (default 127.0.0.1)
        #[arg(long)]
        bind: Option<String>,
        /// Port to listen on (default 8000)
        #[arg(long)]
        port: Option<u16>,
    },
}

/// Execute the `skillpath init` command: write config file.
fn cmd_init(gemini_key: Option<String>, serper_key: Option<String>, force: bool) -> anyhow::Result<()> {
    let path = config::config_path();

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    let has_gemini = gemini_key.is_some();
    let has_serper = serper_key.is_some();

    let mut cfg = config::ConfigFile::default();
    cfg.gemini.api_key = gemini_key;
    cfg.serper.api_key = serper_key;
    let path = config::save_config(&cfg)?;

    println!("Config written to {}", path.display());
    println!("  gemini.api_key = {}", if has_gemini { "set" } else { "not set" });
    println!("  serper.api_key = {}", if has_serper { "set" } else { "not set" });
    if !has_gemini {
        println!();
        println!(
            "Plan generation needs a Gemini key: set {} or re-run with --gemini-key.",
            config::GEMINI_KEY_ENV
        );
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut overrides = Overrides {
        model: cli.model,
        max_concurrent_days: cli.max_concurrent_days,
        ..Overrides::default()
    };

    match cli.command {
        Commands::Init {
            gemini_key,
            serper_key,
            force,
        } => {
            cmd_init(gemini_key, serper_key, force)?;
        }
        Commands::Plan { topic, json } => {
            let resolved = SkillpathConfig::resolve(&overrides)?;
            let curator = Curator::from_configs(resolved.gemini, resolved.serper, resolved.curation);
            plan_cmds::run_plan(&curator, &topic, json).await?;
        }
        Commands::Day {
            topic,
            day_topic,
            day_number,
            json,
        } => {
            let resolved = SkillpathConfig::resolve(&overrides)?;
            let curator = Curator::from_configs(resolved.gemini, resolved.serper, resolved.curation);
            plan_cmds::run_day(&curator, &topic, &day_topic, day_number, json).await?;
        }
        Commands::Search { topic, kind, limit } => {
            let resolved = SkillpathConfig::resolve(&overrides)?;
            let resolver = ResourceResolver::new(Arc::new(SerperClient::new(resolved.serper)));
            search_cmd::run_search(&resolver, &topic, kind, limit).await?;
        }
        Commands::Serve { bind, port } => {
            overrides.bind = bind;
            overrides.port = port;
            let resolved = SkillpathConfig::resolve(&overrides)?;
            let curator = Curator::from_configs(resolved.gemini, resolved.serper, resolved.curation);
            serve_cmd::run_serve(curator, &resolved.bind, resolved.port).await?;
        }
    }

    Ok(())
}
