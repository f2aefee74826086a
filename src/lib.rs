//! urlcanon - best-effort URL normalization.
//!
//! Takes arbitrary, possibly malformed or scheme-less URL text and breaks it
//! into canonical components: lowercase scheme, lowercase ASCII host (IDN
//! converted, surrounding dots removed, IP literals validated), numeric port
//! and percent-decoded user, password, path, query and fragment.
//!
//! Malformed input never fails; missing or unusable parts are simply absent.
//! The only error is asking for a component that does not exist.
//!
//! # Quick Start
//!
//! ```
//! use urlcanon::{normalize, parse, ComponentSelector};
//!
//! let host = normalize("example.com/a/b", ComponentSelector::Host)?;
//! assert_eq!(host.into_component().unwrap(), "example.com");
//!
//! let parts = parse("[::1]:8080/status?verbose=1");
//! assert_eq!(parts.host.as_deref(), Some("[::1]"));
//! assert_eq!(parts.port, Some(8080));
//!
//! assert!(normalize("example.com", 42).is_err());
//! # Ok::<(), urlcanon::NormalizeError>(())
//! ```
//!
//! # Cargo features
//!
//! - `idn` (default): convert internationalized host labels to ASCII
//! - `unicode` (default): use the native multibyte string path; without it
//!   the byte-safe fallback is used

pub mod config;
pub mod error;
pub mod multibyte;
pub mod url_parser;
pub mod utils;

pub use error::NormalizeError;
pub use multibyte::Multibyte;
pub use url_parser::{
    normalize, normalize_bytes, parse, query_pairs, ComponentSelector, ComponentSet,
    ComponentValue, IdnConverter, IntoSelector, NoopPassthrough, NormalizeCache, Normalized,
    UrlNormalizer,
};
#[cfg(feature = "idn")]
pub use url_parser::IdnaConverter;
