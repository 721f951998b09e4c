use thiserror::Error;

use crate::config::ExtLinksConfig;
use crate::parsers::html::{html_to_fragment, serialize_fragment};
use crate::parsers::link_rewriter::{rewrite_links_in_dom, AnchorRules, Exclusions};

pub use crate::parsers::link_rewriter::RewriteReport;

/// Errors that can occur while setting up or running the extlinks filter
///
/// Processing HTML itself never fails: input the parser can't handle is
/// passed through unchanged. Errors only come from configuration.
#[derive(Error, Debug)]
pub enum ExtLinksError {
    /// An exclusion pattern is not a valid regular expression
    #[error("invalid exclusion pattern '{pattern}': {source}")]
    InvalidExclusion {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The configuration could not be parsed
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    /// The configuration file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ExtLinksResult<T> = Result<T, ExtLinksError>;

/// A compiled extlinks configuration, ready to rewrite any number of documents
///
/// # Examples
///
/// ```
/// use extlinks::{ExtLinks, ExtLinksConfig};
///
/// let config = ExtLinksConfig::with_attributes([("rel", "nofollow")]).exclude("host3.com");
/// let extlinks = ExtLinks::new(&config).unwrap();
///
/// assert_eq!(
///     extlinks.rewrite(r#"<a href="http://someurl.com">x</a>"#),
///     r#"<a href="http://someurl.com" rel="nofollow">x</a>"#
/// );
/// assert_eq!(
///     extlinks.rewrite(r#"<a href="http://host3.com">x</a>"#),
///     r#"<a href="http://host3.com">x</a>"#
/// );
/// ```
#[derive(Clone, Debug, Default)]
pub struct ExtLinks {
    rules: AnchorRules,
}

impl ExtLinks {
    /// Compiles `config`, failing only on invalid exclusion patterns
    pub fn new(config: &ExtLinksConfig) -> ExtLinksResult<Self> {
        Ok(ExtLinks {
            rules: AnchorRules {
                attributes: config.attributes.clone().unwrap_or_default(),
                exclusions: Exclusions::new(&config.exclude, &config.exclude_patterns)?,
                ignore_case: config.case_insensitive_attributes,
            },
        })
    }

    pub fn is_noop(&self) -> bool {
        self.rules.attributes.is_empty()
    }

    /// Adds the configured attributes to every external link in `content`
    pub fn rewrite(&self, content: &str) -> String {
        self.rewrite_with_report(content).0
    }

    /// Same as [`ExtLinks::rewrite`], also returning what was done
    ///
    /// When nothing was changed the original `content` is returned as is,
    /// not a re-serialized copy of it.
    pub fn rewrite_with_report(&self, content: &str) -> (String, RewriteReport) {
        if self.is_noop() {
            tracing::debug!("No attributes configured, passing content through");
            return (content.to_string(), RewriteReport::default());
        }

        let dom = match html_to_fragment(content) {
            Some(dom) => dom,
            None => {
                tracing::warn!("Unable to parse content as HTML, passing it through");
                return (content.to_string(), RewriteReport::default());
            }
        };

        let report = rewrite_links_in_dom(&dom, &self.rules);
        tracing::debug!(
            anchors = report.anchors,
            local = report.local,
            excluded = report.excluded,
            rewritten = report.rewritten,
            "Processed links"
        );

        if report.is_unchanged() {
            return (content.to_string(), report);
        }

        match serialize_fragment(&dom) {
            Some(output) => (output, report),
            None => {
                tracing::warn!("Unable to serialize rewritten HTML, passing content through");
                (content.to_string(), RewriteReport::default())
            }
        }
    }
}

/// Adds the attributes from `config` to every external link in `content`
///
/// Returns `content` unchanged when `config` has no attributes or the input
/// can't be parsed. Fails only when an exclusion pattern is invalid.
pub fn rewrite(content: &str, config: &ExtLinksConfig) -> ExtLinksResult<String> {
    if config.is_noop() {
        return Ok(content.to_string());
    }

    Ok(ExtLinks::new(config)?.rewrite(content))
}
