use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

use crate::error::{ArxivToPromptError, Result};

pub mod source;

pub use source::SourceFetcher;

// Commonly used regex patterns compiled once
static ARXIV_ID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d+\.\d+(?:v\d+)?$").expect("Invalid arXiv ID regex pattern")
});
static ARXIV_URL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"arxiv\.org/(?:abs|pdf)/(\d+\.\d+(?:v\d+)?)")
        .expect("Invalid arXiv URL regex pattern")
});
static VERSION_SUFFIX_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"v(\d+)$").expect("Invalid version suffix regex pattern")
});

/// Canonical arXiv identifier such as `2402.02392` or `2402.02392v1`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArxivId(String);

impl ArxivId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Identifier without its version suffix, used to fetch the latest source
    pub fn base_id(&self) -> &str {
        match VERSION_SUFFIX_REGEX.find(&self.0) {
            Some(m) => &self.0[..m.start()],
            None => &self.0,
        }
    }

    pub fn version(&self) -> Option<u32> {
        VERSION_SUFFIX_REGEX
            .captures(&self.0)
            .and_then(|caps| caps.get(1))
            .and_then(|v| v.as_str().parse().ok())
    }
}

impl fmt::Display for ArxivId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ArxivId {
    type Err = ArxivToPromptError;

    fn from_str(s: &str) -> Result<Self> {
        extract_arxiv_id(s)
    }
}

/// Extract the arXiv ID from a bare ID, an abstract URL or a PDF URL
pub fn extract_arxiv_id(input: &str) -> Result<ArxivId> {
    if ARXIV_ID_REGEX.is_match(input) {
        return Ok(ArxivId(input.to_string()));
    }

    if let Some(captures) = ARXIV_URL_REGEX.captures(input) {
        if let Some(id_match) = captures.get(1) {
            return Ok(ArxivId(id_match.as_str().to_string()));
        }
    }

    Err(ArxivToPromptError::InvalidIdentifier(input.to_string()))
}
