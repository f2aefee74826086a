use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::NormalizeError;

/// Which part of a URL the caller wants back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentSelector {
    Scheme,
    Host,
    Port,
    User,
    Pass,
    Path,
    Query,
    Fragment,
    All,
}

impl ComponentSelector {
    pub const ALL_COMPONENTS: [ComponentSelector; 8] = [
        ComponentSelector::Scheme,
        ComponentSelector::Host,
        ComponentSelector::Port,
        ComponentSelector::User,
        ComponentSelector::Pass,
        ComponentSelector::Path,
        ComponentSelector::Query,
        ComponentSelector::Fragment,
    ];

    /// Maps the integer codes used by form and option collaborators.
    ///
    /// `-1` is everything, `0..=7` are scheme, host, port, user, pass, path,
    /// query and fragment.
    pub fn from_code(code: i32) -> Result<Self, NormalizeError> {
        match code {
            -1 => Ok(ComponentSelector::All),
            0 => Ok(ComponentSelector::Scheme),
            1 => Ok(ComponentSelector::Host),
            2 => Ok(ComponentSelector::Port),
            3 => Ok(ComponentSelector::User),
            4 => Ok(ComponentSelector::Pass),
            5 => Ok(ComponentSelector::Path),
            6 => Ok(ComponentSelector::Query),
            7 => Ok(ComponentSelector::Fragment),
            other => Err(NormalizeError::InvalidArgument(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ComponentSelector::Scheme => "scheme",
            ComponentSelector::Host => "host",
            ComponentSelector::Port => "port",
            ComponentSelector::User => "user",
            ComponentSelector::Pass => "pass",
            ComponentSelector::Path => "path",
            ComponentSelector::Query => "query",
            ComponentSelector::Fragment => "fragment",
            ComponentSelector::All => "all",
        }
    }
}

impl fmt::Display for ComponentSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ComponentSelector {
    type Err = NormalizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(ComponentSelector::All),
            "scheme" => Ok(ComponentSelector::Scheme),
            "host" => Ok(ComponentSelector::Host),
            "port" => Ok(ComponentSelector::Port),
            "user" => Ok(ComponentSelector::User),
            "pass" => Ok(ComponentSelector::Pass),
            "path" => Ok(ComponentSelector::Path),
            "query" => Ok(ComponentSelector::Query),
            "fragment" => Ok(ComponentSelector::Fragment),
            _ => Err(NormalizeError::InvalidArgument(s.to_string())),
        }
    }
}

impl TryFrom<i32> for ComponentSelector {
    type Error = NormalizeError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        ComponentSelector::from_code(code)
    }
}

/// Anything that can name a component: the enum itself, an integer code or
/// a component name.
pub trait IntoSelector {
    fn into_selector(self) -> Result<ComponentSelector, NormalizeError>;
}

impl IntoSelector for ComponentSelector {
    fn into_selector(self) -> Result<ComponentSelector, NormalizeError> {
        Ok(self)
    }
}

impl IntoSelector for i32 {
    fn into_selector(self) -> Result<ComponentSelector, NormalizeError> {
        ComponentSelector::from_code(self)
    }
}

impl IntoSelector for &str {
    fn into_selector(self) -> Result<ComponentSelector, NormalizeError> {
        self.parse()
    }
}

/// A single normalized component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ComponentValue {
    Text(String),
    Port(u16),
}

impl ComponentValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ComponentValue::Text(text) => Some(text),
            ComponentValue::Port(_) => None,
        }
    }

    pub fn as_port(&self) -> Option<u16> {
        match self {
            ComponentValue::Port(port) => Some(*port),
            ComponentValue::Text(_) => None,
        }
    }
}

impl fmt::Display for ComponentValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentValue::Text(text) => f.write_str(text),
            ComponentValue::Port(port) => write!(f, "{}", port),
        }
    }
}

impl PartialEq<&str> for ComponentValue {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

impl PartialEq<u16> for ComponentValue {
    fn eq(&self, other: &u16) -> bool {
        self.as_port() == Some(*other)
    }
}

/// Canonical breakdown of a URL. Components missing from the input are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComponentSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pass: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fragment: Option<String>,
}

impl ComponentSet {
    /// One component of the set. `All` has no single value and yields `None`.
    pub fn get(&self, selector: ComponentSelector) -> Option<ComponentValue> {
        let text = |value: &Option<String>| value.clone().map(ComponentValue::Text);
        match selector {
            ComponentSelector::Scheme => text(&self.scheme),
            ComponentSelector::Host => text(&self.host),
            ComponentSelector::Port => self.port.map(ComponentValue::Port),
            ComponentSelector::User => text(&self.user),
            ComponentSelector::Pass => text(&self.pass),
            ComponentSelector::Path => text(&self.path),
            ComponentSelector::Query => text(&self.query),
            ComponentSelector::Fragment => text(&self.fragment),
            ComponentSelector::All => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == ComponentSet::default()
    }
}

/// Result of a normalization call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Normalized {
    All(ComponentSet),
    Component(Option<ComponentValue>),
}

impl Normalized {
    pub fn into_set(self) -> Option<ComponentSet> {
        match self {
            Normalized::All(set) => Some(set),
            Normalized::Component(_) => None,
        }
    }

    pub fn into_component(self) -> Option<ComponentValue> {
        match self {
            Normalized::Component(value) => value,
            Normalized::All(_) => None,
        }
    }
}
