//! docsync.toml configuration

use docsync_content::{AdjacencyMatcher, DEFAULT_GAPS, RenderOptions};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{CliError, Result};

/// File looked up in the working directory when `--config` is not given
pub const DEFAULT_FILE: &str = "docsync.toml";

fn default_gaps() -> Vec<usize> {
    DEFAULT_GAPS.to_vec()
}

/// Origin matcher settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MatcherSection {
    /// Byte distances accepted between an original and its translation
    #[serde(default = "default_gaps")]
    pub gaps: Vec<usize>,
}

impl Default for MatcherSection {
    fn default() -> Self {
        Self {
            gaps: default_gaps(),
        }
    }
}

/// Parsed configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Width limits
    #[serde(default)]
    pub render: RenderOptions,

    /// Origin matching
    #[serde(default)]
    pub matcher: MatcherSection,
}

impl Config {
    /// Parse a configuration from TOML content
    ///
    /// # Example
    ///
    /// ```ignore
    /// let config = Config::parse("[render]\nsource_width = 70\n").unwrap();
    /// assert_eq!(config.render.source_width, 70);
    /// assert_eq!(config.render.text_width, 76);
    /// ```
    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        if config.matcher.gaps.is_empty() {
            return Err(CliError::user("matcher.gaps must list at least one gap"));
        }
        Ok(config)
    }

    /// Load `path`, or `./docsync.toml` when present, or the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path,
            None if Path::new(DEFAULT_FILE).is_file() => Path::new(DEFAULT_FILE),
            None => return Ok(Self::default()),
        };
        tracing::debug!(path = %path.display(), "loading configuration");
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn matcher(&self) -> AdjacencyMatcher {
        AdjacencyMatcher::with_gaps(self.matcher.gaps.iter().copied())
    }
}
