use std::env;

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Completion-provider settings. The credential is carried as an `Option` and
/// checked when a completion is actually requested, so the logging endpoints
/// keep working on a host with no key configured.
#[derive(Clone, Debug)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    pub model: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

impl ProviderConfig {
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(v) = env::var("OPENAI_API_KEY") {
            if !v.is_empty() {
                cfg.api_key = Some(v);
            }
        }
        if let Ok(v) = env::var("IEPSIM_MODEL") {
            if !v.is_empty() {
                cfg.model = v;
            }
        }
        cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_credential() {
        let cfg = ProviderConfig::default();
        assert!(cfg.api_key.is_none());
        assert_eq!(cfg.model, DEFAULT_MODEL);
    }
}
