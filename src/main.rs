use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;
use std::fs;
use std::time::Instant;
use tracing::{debug, info};

use urlcanon::config::AppConfig;
use urlcanon::multibyte::BackendKind;
use urlcanon::utils::logger::init_logger;
use urlcanon::{ComponentSelector, ComponentSet, NormalizeCache, Normalized};

/// Normalize URLs into canonical components.
#[derive(Parser, Debug)]
#[command(name = "urlcanon", version, about)]
struct Cli {
    /// URLs to normalize
    urls: Vec<String>,

    /// Component to print: all, scheme, host, port, user, pass, path, query, fragment
    #[arg(short, long, default_value = "all")]
    component: String,

    /// Print one JSON object per line
    #[arg(long)]
    json: bool,

    /// Read URLs from a file, one per line; blank lines and lines starting with # are skipped
    #[arg(long, value_name = "FILE")]
    batch: Option<String>,

    /// Configuration file (toml, yaml or json)
    #[arg(long, value_name = "FILE")]
    config: Option<String>,

    /// Leave internationalized host labels unconverted
    #[arg(long)]
    no_idn: bool,

    /// Use the byte-safe multibyte backend
    #[arg(long)]
    byte_safe: bool,
}

#[derive(Serialize)]
struct JsonLine<'a> {
    input: &'a str,
    #[serde(flatten)]
    components: &'a ComponentSet,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if cli.no_idn {
        config.idn = false;
    }
    if cli.byte_safe {
        config.text_backend = Some(BackendKind::ByteSafe);
    }
    init_logger(config.log_dir.as_deref(), &config.log_filter)?;
    debug!("Using configuration {:?}", config);

    let selector: ComponentSelector = cli.component.parse()?;

    let mut urls = cli.urls.clone();
    if let Some(path) = &cli.batch {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read batch file {}", path))?;
        urls.extend(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
                .map(str::to_string),
        );
    }
    if urls.is_empty() {
        bail!("No URLs given; pass them as arguments or with --batch <FILE>");
    }

    let cache = NormalizeCache::with_capacity(config.normalizer(), config.cache_capacity);
    let start = Instant::now();

    for url in &urls {
        let result = cache.get_or_normalize(url, selector)?;
        if cli.json {
            println!("{}", render_json(url, &result)?);
        } else {
            println!("{}", render_text(&result));
        }
    }

    info!(
        "Normalized {} URLs ({} distinct) in {:?}",
        urls.len(),
        cache.len(),
        start.elapsed()
    );
    Ok(())
}

fn render_json(input: &str, result: &Normalized) -> Result<String> {
    match result {
        Normalized::All(components) => Ok(serde_json::to_string(&JsonLine { input, components })?),
        Normalized::Component(value) => Ok(serde_json::to_string(&serde_json::json!({
            "input": input,
            "value": value,
        }))?),
    }
}

fn render_text(result: &Normalized) -> String {
    match result {
        Normalized::All(set) => {
            let fields = [
                ("scheme", set.scheme.clone()),
                ("host", set.host.clone()),
                ("port", set.port.map(|port| port.to_string())),
                ("user", set.user.clone()),
                ("pass", set.pass.clone()),
                ("path", set.path.clone()),
                ("query", set.query.clone()),
                ("fragment", set.fragment.clone()),
            ];
            fields
                .iter()
                .filter_map(|(name, value)| value.as_ref().map(|v| format!("{}={}", name, v)))
                .collect::<Vec<_>>()
                .join("\t")
        }
        Normalized::Component(value) => value
            .as_ref()
            .map(|value| value.to_string())
            .unwrap_or_default(),
    }
}
