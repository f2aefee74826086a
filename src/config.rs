use anyhow::{Context, Result};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

use crate::multibyte::{BackendKind, Multibyte};
use crate::url_parser::url_validator::DEFAULT_SCHEME;
use crate::url_parser::{detect_idn, NoopPassthrough, UrlNormalizer};

/// Prefix of environment variables read by [`AppConfig::load`].
pub const ENV_PREFIX: &str = "URLCANON";

/// Settings for the command-line front end.
///
/// The library itself reads no configuration; these values only decide how
/// the [`UrlNormalizer`] is built and where logs go.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Convert internationalized host labels when the build supports it.
    pub idn: bool,

    /// Multibyte string backend; `None` picks from the build's capabilities.
    pub text_backend: Option<BackendKind>,

    /// Scheme given to protocol-relative URLs.
    pub default_scheme: String,

    /// Directory for log files; stderr when unset.
    pub log_dir: Option<String>,

    /// Filter used when `RUST_LOG` is not set.
    pub log_filter: String,

    /// Number of normalized results kept while processing a batch.
    pub cache_capacity: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            idn: true,
            text_backend: None,
            default_scheme: DEFAULT_SCHEME.to_string(),
            log_dir: None,
            log_filter: "warn".to_string(),
            cache_capacity: crate::url_parser::url_cache::DEFAULT_CAPACITY,
        }
    }
}

impl AppConfig {
    /// Loads settings from an optional file, then `URLCANON_*` environment
    /// variables, on top of the defaults.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            debug!("Loading configuration from {}", path);
            builder = builder.add_source(config::File::with_name(path));
        }
        builder = builder.add_source(config::Environment::with_prefix(ENV_PREFIX));

        let settings = builder.build().context("Failed to read configuration")?;
        settings
            .try_deserialize::<AppConfig>()
            .context("Invalid configuration")
    }

    /// Builds the normalizer these settings describe.
    pub fn normalizer(&self) -> UrlNormalizer {
        let text = match self.text_backend {
            Some(kind) => Multibyte::with_kind(kind),
            None => Multibyte::detect(),
        };
        let idn = if self.idn {
            detect_idn()
        } else {
            Arc::new(NoopPassthrough)
        };

        UrlNormalizer::new()
            .with_idn(idn)
            .with_text_backend(text)
            .with_default_scheme(&self.default_scheme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert!(config.idn);
        assert_eq!(config.default_scheme, "https");
        let normalizer = config.normalizer();
        assert_eq!(normalizer.default_scheme(), "https");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "idn = false").unwrap();
        writeln!(file, "text_backend = \"byte-safe\"").unwrap();
        writeln!(file, "default_scheme = \"http\"").unwrap();
        file.flush().unwrap();

        let config = AppConfig::load(Some(file.path().to_str().unwrap())).unwrap();
        assert!(!config.idn);
        assert_eq!(config.text_backend, Some(BackendKind::ByteSafe));
        assert_eq!(config.default_scheme, "http");
        assert_eq!(config.log_filter, "warn");

        let normalizer = config.normalizer();
        assert!(!normalizer.idn_available());
        assert_eq!(normalizer.text_backend().backend_name(), "byte-safe");
        assert_eq!(normalizer.parse("//x.test").scheme.as_deref(), Some("http"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(AppConfig::load(Some("/nonexistent/urlcanon-config")).is_err());
    }
}
