use crate::alphabet::Alphabet;
use crate::lock::{DigestLock, SecretLock};
use crate::search::SearchConfig;
use serde::Deserialize;
use std::convert::Infallible;
use std::path::Path;

#[derive(Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
#[serde(deny_unknown_fields)]
pub struct SearchSettings {
    /// Unbounded when absent.
    #[serde(default)]
    pub max_depth: Option<usize>,
    #[serde(default)]
    pub alphabet: Alphabet,
    /// Caller-side cap on lock queries. Unbounded when absent.
    #[serde(default)]
    pub max_attempts: Option<u64>,
}

impl SearchSettings {
    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            max_depth: self.max_depth.unwrap_or(usize::MAX),
            alphabet: self.alphabet,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
#[serde(tag = "kind")]
pub enum LockSettings {
    /// Opens for one hex-encoded combination.
    Secret { secret: String },
    /// Opens for any combination with the given hex MD5 digest.
    Digest { digest: String },
}

impl LockSettings {
    pub fn build(&self) -> Result<ConfiguredLock, anyhow::Error> {
        match self {
            LockSettings::Secret { secret } => SecretLock::from_hex(secret)
                .map(ConfiguredLock::Secret)
                .map_err(|e| anyhow::anyhow!("Invalid secret {:?}: {}", secret, e)),
            LockSettings::Digest { digest } => DigestLock::from_hex(digest)
                .map(ConfiguredLock::Digest)
                .map_err(|e| anyhow::anyhow!("Invalid digest {:?}: {}", digest, e)),
        }
    }
}

/// One of the built-in locks, as selected by [`LockSettings`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfiguredLock {
    Secret(SecretLock),
    Digest(DigestLock),
}

impl crate::lock::Lock for ConfiguredLock {
    type Error = Infallible;

    fn try_open(&mut self, key: &[u8]) -> Result<bool, Self::Error> {
        match self {
            ConfiguredLock::Secret(lock) => lock.try_open(key),
            ConfiguredLock::Digest(lock) => lock.try_open(key),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
#[serde(deny_unknown_fields)]
pub struct LockpickConfig {
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub lock: Option<LockSettings>,
}

impl LockpickConfig {
    pub fn load_from_file(path: &Path) -> Result<Self, anyhow::Error> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file at {:?}: {}", path, e))?;

        Self::from_toml_str(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse TOML from config file {:?}: {}", path, e)
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lock::Lock;
    use std::io::Write;

    #[test]
    fn empty_config_uses_defaults() {
        let config = LockpickConfig::from_toml_str("").expect("empty TOML is valid");
        assert_eq!(config, LockpickConfig::default());
        assert_eq!(config.search.search_config(), SearchConfig::default());
        assert!(config.lock.is_none());
    }

    #[test]
    fn parses_full_config() {
        let config = LockpickConfig::from_toml_str(
            r#"
            [search]
            max-depth = 3
            alphabet = "signed"
            max-attempts = 1000

            [lock]
            kind = "secret"
            secret = "0a0b"
            "#,
        )
        .expect("valid config");

        assert_eq!(config.search.max_depth, Some(3));
        assert_eq!(config.search.alphabet, Alphabet::Signed);
        assert_eq!(config.search.max_attempts, Some(1000));
        assert_eq!(
            config.search.search_config(),
            SearchConfig {
                max_depth: 3,
                alphabet: Alphabet::Signed,
            }
        );
        assert_eq!(
            config.lock,
            Some(LockSettings::Secret {
                secret: "0a0b".to_string()
            })
        );
    }

    #[test]
    fn rejects_unknown_search_fields() {
        let result = LockpickConfig::from_toml_str("[search]\nthreads = 4\n");
        assert!(result.is_err(), "unknown keys should be rejected");
    }

    #[test]
    fn digest_settings_build_a_working_lock() {
        let settings = LockSettings::Digest {
            digest: "900150983cd24fb0d6963f7d28e17f72".to_string(),
        };
        let mut lock = settings.build().expect("valid digest");
        assert_eq!(lock.try_open(b"abc"), Ok(true));
        assert_eq!(lock.try_open(b"abd"), Ok(false));
    }

    #[test]
    fn malformed_secret_is_reported() {
        let settings = LockSettings::Secret {
            secret: "xyz".to_string(),
        };
        let err = settings.build().expect_err("not hex");
        assert!(
            err.to_string().contains("Invalid secret"),
            "unexpected error message: {err}"
        );
    }

    #[test]
    fn loads_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[lock]\nkind = \"digest\"\ndigest = \"00\"").expect("write config");

        let config = LockpickConfig::load_from_file(file.path()).expect("parsable config");
        assert_eq!(
            config.lock,
            Some(LockSettings::Digest {
                digest: "00".to_string()
            })
        );
        assert!(config.lock.as_ref().map(LockSettings::build).is_some_and(|r| r.is_err()));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = LockpickConfig::load_from_file(&dir.path().join("absent.toml"))
            .expect_err("file does not exist");
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
