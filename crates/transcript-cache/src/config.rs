//! Configuration loading.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Cache settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Time-to-live of a cached result, in seconds.
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
        }
    }
}

fn default_ttl_secs() -> u64 {
    300
}

/// Top-level transcript configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptConfig {
    #[serde(default)]
    pub cache: CacheConfig,
    /// Default enrollment data file (JSON map of student id → enrollments).
    #[serde(default)]
    pub enrollments_file: Option<PathBuf>,
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are inserted verbatim and not scanned again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + end];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `transcript.toml` in the current directory
/// 2. `~/.config/transcript/config.toml`
///
/// Environment variable override: `TRANSCRIPT_CACHE_TTL_SECS`.
pub fn load_config() -> Result<TranscriptConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<TranscriptConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => {
            let local = PathBuf::from("transcript.toml");
            if local.exists() {
                Some(local)
            } else {
                config_dir()
                    .map(|dir| dir.join("config.toml"))
                    .filter(|global| global.exists())
            }
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => TranscriptConfig::default(),
    };

    if let Ok(ttl) = std::env::var("TRANSCRIPT_CACHE_TTL_SECS") {
        config.cache.ttl_secs = ttl
            .trim()
            .parse()
            .with_context(|| format!("TRANSCRIPT_CACHE_TTL_SECS is not a number: {ttl}"))?;
    }

    Ok(config)
}

/// Parse a TOML config string, expanding `${VAR}` in the data file path.
pub fn parse_config(content: &str) -> Result<TranscriptConfig> {
    let mut config: TranscriptConfig = toml::from_str(content)?;
    if let Some(file) = &config.enrollments_file {
        config.enrollments_file = Some(PathBuf::from(resolve_env_vars(&file.to_string_lossy())));
    }
    Ok(config)
}

fn config_dir() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("transcript"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_TRANSCRIPT_TEST_VAR", "data");
        assert_eq!(resolve_env_vars("${_TRANSCRIPT_TEST_VAR}"), "data");
        assert_eq!(
            resolve_env_vars("/srv/${_TRANSCRIPT_TEST_VAR}/students.json"),
            "/srv/data/students.json"
        );
        assert_eq!(resolve_env_vars("no vars"), "no vars");
        assert_eq!(resolve_env_vars("${UNCLOSED"), "${UNCLOSED");
        std::env::remove_var("_TRANSCRIPT_TEST_VAR");
    }

    #[test]
    fn resolve_env_vars_does_not_expand_values() {
        std::env::set_var("_TRANSCRIPT_SELF_REF", "${_TRANSCRIPT_SELF_REF}");
        assert_eq!(
            resolve_env_vars("a/${_TRANSCRIPT_SELF_REF}/b"),
            "a/${_TRANSCRIPT_SELF_REF}/b"
        );
        std::env::remove_var("_TRANSCRIPT_SELF_REF");

        std::env::set_var("_TRANSCRIPT_ROOT", "/srv");
        assert_eq!(
            resolve_env_vars("${_TRANSCRIPT_ROOT}/x/${_TRANSCRIPT_ROOT}/${UNCLOSED"),
            "/srv/x//srv/${UNCLOSED"
        );
        std::env::remove_var("_TRANSCRIPT_ROOT");
    }

    #[test]
    fn default_config() {
        let config = TranscriptConfig::default();
        assert_eq!(config.cache.ttl_secs, 300);
        assert_eq!(config.cache.ttl(), Duration::from_secs(300));
        assert!(config.enrollments_file.is_none());
    }

    #[test]
    fn parse_full_config() {
        let config = parse_config(
            r#"
enrollments_file = "fixtures/students.json"

[cache]
ttl_secs = 45
"#,
        )
        .unwrap();
        assert_eq!(config.cache.ttl_secs, 45);
        assert_eq!(
            config.enrollments_file,
            Some(PathBuf::from("fixtures/students.json"))
        );
    }

    #[test]
    fn empty_config_uses_defaults() {
        assert_eq!(parse_config("").unwrap(), TranscriptConfig::default());
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config_from(Some(&dir.path().join("missing.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn explicit_path_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transcript.toml");
        std::fs::write(&path, "[cache]\nttl_secs = 12\n").unwrap();
        let config = load_config_from(Some(&path)).unwrap();
        // TRANSCRIPT_CACHE_TTL_SECS is not set by the test harness.
        if std::env::var("TRANSCRIPT_CACHE_TTL_SECS").is_err() {
            assert_eq!(config.cache.ttl_secs, 12);
        }
    }
}
