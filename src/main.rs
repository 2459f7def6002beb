//! `assetmatch` CLI: resolve a prompt to a catalog asset.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, bail};
use assetmatch::{AppConfig, AssetMatcher, DEMO_PROMPTS, MatchResult, config::LoggingSection};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print results as JSON lines
    #[arg(long)]
    json: bool,

    /// Run the built-in demo prompts
    #[arg(long)]
    demo: bool,

    /// Prompt to match
    prompt: Option<String>,
}

fn init_tracing(logging: &LoggingSection) {
    // RUST_LOG wins over the configured level.
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn print_result(
    out: &mut impl Write,
    prompt: &str,
    result: &MatchResult,
    json: bool,
) -> anyhow::Result<()> {
    if json {
        let line = serde_json::json!({ "prompt": prompt, "result": result });
        writeln!(out, "{line}")?;
    } else {
        let score = result
            .score
            .map(|s| format!("{s:.4}"))
            .unwrap_or_else(|| "-".to_string());
        writeln!(
            out,
            "{prompt:<40} -> {:<10} [{}] score={score} {}",
            result.asset.id, result.method, result.asset.url
        )?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => AppConfig::default(),
    };
    config.apply_env_overrides()?;
    config.validate()?;

    init_tracing(&config.logging);

    let matcher = AssetMatcher::from_config(&config)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.demo {
        for prompt in DEMO_PROMPTS {
            let result = matcher.match_prompt_with_timeout(prompt).await?;
            print_result(&mut out, prompt, &result, cli.json)?;
        }
        return Ok(());
    }

    let Some(prompt) = cli.prompt else {
        bail!("a prompt is required unless --demo is given");
    };
    let result = matcher.match_prompt_with_timeout(&prompt).await?;
    print_result(&mut out, prompt.trim(), &result, cli.json)?;
    Ok(())
}
