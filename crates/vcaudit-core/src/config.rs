use std::env;

/// Environment variable overriding the index used when a last-round request
/// names none.
pub const DEFAULT_INDEX_ENV: &str = "VCAUDIT_DEFAULT_INDEX";

const DEFAULT_PUBLIC_INDEX: &str = "NASDAQ_COMPOSITE";

/// Engine-wide settings fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub default_public_index: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_public_index: String::from(DEFAULT_PUBLIC_INDEX),
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(index) = lookup(DEFAULT_INDEX_ENV)
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
        {
            config.default_public_index = index;
        }
        config
    }

    pub fn with_default_public_index(mut self, index: impl Into<String>) -> Self {
        self.default_public_index = index.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_nasdaq() {
        assert_eq!(EngineConfig::default().default_public_index, "NASDAQ_COMPOSITE");
    }

    #[test]
    fn env_override_is_trimmed() {
        let config = EngineConfig::from_lookup(|key| {
            (key == DEFAULT_INDEX_ENV).then(|| String::from(" RUSSELL_2000 "))
        });
        assert_eq!(config.default_public_index, "RUSSELL_2000");
    }

    #[test]
    fn blank_env_value_is_ignored() {
        let config = EngineConfig::from_lookup(|_| Some(String::from("  ")));
        assert_eq!(config, EngineConfig::default());
    }
}
