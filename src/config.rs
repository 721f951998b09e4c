//! Configuration for the extlinks filter
//!
//! The filter reads a single section of the site configuration:
//!
//! ```toml
//! [extlinks]
//! attributes = { rel = "nofollow", target = "_blank" }
//! exclude = ["host3.com"]
//! ```
//!
//! Only `attributes` is required for anything to happen; every other key is
//! optional.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::Deserialize;

use crate::core::ExtLinksResult;

/// Attribute names and values to add to external links, in declared order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name` to `value`, keeping the original position when `name` is
    /// already present.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();

        match self.0.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Attributes
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attributes = Attributes::new();
        for (name, value) in iter {
            attributes.insert(name, value);
        }
        attributes
    }
}

impl<'de> Deserialize<'de> for Attributes {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct AttributesVisitor;

        impl<'de> Visitor<'de> for AttributesVisitor {
            type Value = Attributes;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a table of attribute names to scalar values")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut attributes = Attributes::new();
                while let Some((name, value)) = map.next_entry::<String, toml::Value>()? {
                    let value = attribute_value(value).ok_or_else(|| {
                        <A::Error as de::Error>::custom(format!(
                            "attribute `{}` must be a string, number, boolean or datetime",
                            name
                        ))
                    })?;
                    attributes.insert(name, value);
                }
                Ok(attributes)
            }
        }

        deserializer.deserialize_map(AttributesVisitor)
    }
}

/// Scalars are written the way TOML spells them (`1`, `1.5`, `true`); arrays
/// and tables have no attribute form.
fn attribute_value(value: toml::Value) -> Option<String> {
    match value {
        toml::Value::String(text) => Some(text),
        toml::Value::Array(_) | toml::Value::Table(_) => None,
        scalar => Some(scalar.to_string()),
    }
}

/// The `extlinks` section of a site configuration
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ExtLinksConfig {
    /// Attributes to add to external links
    pub attributes: Option<Attributes>,
    /// Substrings; a URL containing any of them is left untouched
    #[serde(deserialize_with = "one_or_many")]
    pub exclude: Vec<String>,
    /// Regular expressions; a URL matching any of them is left untouched
    #[serde(deserialize_with = "one_or_many")]
    pub exclude_patterns: Vec<String>,
    /// Compare attribute names without regard to ASCII case
    pub case_insensitive_attributes: bool,
}

impl ExtLinksConfig {
    pub fn with_attributes<I, K, V>(attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        ExtLinksConfig {
            attributes: Some(attributes.into_iter().collect()),
            ..Default::default()
        }
    }

    pub fn exclude(mut self, entry: impl Into<String>) -> Self {
        self.exclude.push(entry.into());
        self
    }

    pub fn exclude_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    pub fn case_insensitive_attributes(mut self, enabled: bool) -> Self {
        self.case_insensitive_attributes = enabled;
        self
    }

    /// True when the configuration can't change any link
    pub fn is_noop(&self) -> bool {
        self.attributes.as_ref().map_or(true, Attributes::is_empty)
    }

    /// Converts an already parsed TOML value into a typed section
    pub fn from_value(value: toml::Value) -> ExtLinksResult<Self> {
        Ok(value.try_into::<ExtLinksConfig>()?)
    }
}

/// Accepts either a single string or a list of strings
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(entry) => vec![entry],
        OneOrMany::Many(entries) => entries,
    })
}

/// A whole site configuration, of which only the `extlinks` table is read
#[derive(Clone, Debug, Default)]
pub struct SiteConfig {
    table: toml::Table,
}

impl SiteConfig {
    pub fn from_toml_str(source: &str) -> ExtLinksResult<Self> {
        Ok(SiteConfig {
            table: source.parse::<toml::Table>()?,
        })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> ExtLinksResult<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)?;
        tracing::debug!("Loaded site config from {}", path.display());
        Self::from_toml_str(&source)
    }

    pub fn section(&self, name: &str) -> Option<&toml::Value> {
        self.table.get(name)
    }

    /// The typed `extlinks` section; an absent section is an empty config
    pub fn extlinks(&self) -> ExtLinksResult<ExtLinksConfig> {
        match self.section(crate::filter::CONFIG_SECTION) {
            Some(value) => ExtLinksConfig::from_value(value.clone()),
            None => Ok(ExtLinksConfig::default()),
        }
    }
}

impl From<toml::Table> for SiteConfig {
    fn from(table: toml::Table) -> Self {
        SiteConfig { table }
    }
}
