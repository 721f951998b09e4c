//! Template filter entry point
//!
//! Hosts expose their site configuration through [`ConfigRegistry`]; the
//! filter looks up the `extlinks` section on every call and runs the rewriter
//! over the rendered content.
//!
//! ```
//! use extlinks::config::SiteConfig;
//! use extlinks::filter::extlinks;
//!
//! let site = SiteConfig::from_toml_str(
//!     r#"
//!     [extlinks]
//!     attributes = { rel = "nofollow", target = "_blank" }
//!     exclude = ["host3.com"]
//!     "#,
//! )
//! .unwrap();
//!
//! let output = extlinks(r#"<a href="https://example.com">x</a>"#, &site).unwrap();
//! assert_eq!(
//!     output,
//!     r#"<a href="https://example.com" rel="nofollow" target="_blank">x</a>"#
//! );
//! ```

use crate::config::{ExtLinksConfig, SiteConfig};
use crate::core::{rewrite, ExtLinksResult};

/// Name the filter is registered under in templates
pub const FILTER_NAME: &str = "extlinks";

/// Site configuration section the filter reads
pub const CONFIG_SECTION: &str = "extlinks";

/// Read-only access to a host's site configuration
pub trait ConfigRegistry {
    fn section(&self, name: &str) -> Option<&toml::Value>;
}

impl ConfigRegistry for SiteConfig {
    fn section(&self, name: &str) -> Option<&toml::Value> {
        SiteConfig::section(self, name)
    }
}

impl ConfigRegistry for toml::Table {
    fn section(&self, name: &str) -> Option<&toml::Value> {
        self.get(name)
    }
}

/// Rewrites external links in `content` using the host's `extlinks` section
///
/// A missing section behaves like an empty one and passes `content` through.
pub fn extlinks<R>(content: &str, registry: &R) -> ExtLinksResult<String>
where
    R: ConfigRegistry + ?Sized,
{
    let config = match registry.section(CONFIG_SECTION) {
        Some(section) => ExtLinksConfig::from_value(section.clone())?,
        None => {
            tracing::debug!("No [{}] section in site config", CONFIG_SECTION);
            ExtLinksConfig::default()
        }
    };

    rewrite(content, &config)
}
