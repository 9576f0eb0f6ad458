use std::time::Duration;

pub const DEFAULT_ARXIV_BASE_URL: &str = "https://arxiv.org";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LATEXPAND_PROGRAM: &str = "latexpand";
pub const DEFAULT_LATEXPAND_TIMEOUT_SECS: u64 = 60;

/// Runtime settings, overridable through environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the arXiv e-print endpoint (`ARXIV_BASE_URL`)
    pub arxiv_base_url: String,
    /// Timeout applied to the source download (`ARXIV_TIMEOUT_SECS`)
    pub http_timeout: Duration,
    /// Name or path of the latexpand executable (`LATEXPAND`)
    pub latexpand_program: String,
    /// Upper bound for a single latexpand run (`LATEXPAND_TIMEOUT_SECS`)
    pub latexpand_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            arxiv_base_url: DEFAULT_ARXIV_BASE_URL.to_string(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            latexpand_program: DEFAULT_LATEXPAND_PROGRAM.to_string(),
            latexpand_timeout: Duration::from_secs(DEFAULT_LATEXPAND_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Read the configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let secs = |key: &str, default: u64| {
            lookup(key)
                .and_then(|s| s.trim().parse::<u64>().ok())
                .unwrap_or(default)
        };

        let arxiv_base_url = lookup("ARXIV_BASE_URL")
            .filter(|s| !s.trim().is_empty())
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_ARXIV_BASE_URL.to_string());

        let latexpand_program = lookup("LATEXPAND")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LATEXPAND_PROGRAM.to_string());

        Self {
            arxiv_base_url,
            http_timeout: Duration::from_secs(secs(
                "ARXIV_TIMEOUT_SECS",
                DEFAULT_HTTP_TIMEOUT_SECS,
            )),
            latexpand_program,
            latexpand_timeout: Duration::from_secs(secs(
                "LATEXPAND_TIMEOUT_SECS",
                DEFAULT_LATEXPAND_TIMEOUT_SECS,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config, Config::default());
        assert_eq!(config.latexpand_timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = Config::from_lookup(lookup_from(&[
            ("ARXIV_BASE_URL", "http://127.0.0.1:1234/"),
            ("ARXIV_TIMEOUT_SECS", "5"),
            ("LATEXPAND", "/opt/tex/bin/latexpand"),
            ("LATEXPAND_TIMEOUT_SECS", "120"),
        ]));
        assert_eq!(config.arxiv_base_url, "http://127.0.0.1:1234");
        assert_eq!(config.http_timeout, Duration::from_secs(5));
        assert_eq!(config.latexpand_program, "/opt/tex/bin/latexpand");
        assert_eq!(config.latexpand_timeout, Duration::from_secs(120));
    }

    #[test]
    fn test_unparseable_numbers_fall_back() {
        let config = Config::from_lookup(lookup_from(&[
            ("ARXIV_TIMEOUT_SECS", "soon"),
            ("LATEXPAND_TIMEOUT_SECS", "-1"),
        ]));
        assert_eq!(config.http_timeout, Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS));
        assert_eq!(
            config.latexpand_timeout,
            Duration::from_secs(DEFAULT_LATEXPAND_TIMEOUT_SECS)
        );
    }
}
