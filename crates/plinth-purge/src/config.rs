use serde::Deserialize;

pub const DEFAULT_API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// Credentials and addressing for the upstream purge API.
///
/// An empty or absent `zone_id`/`api_token` means purging is not configured;
/// the notifier then becomes a logged no-op.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct PurgeConfig {
    pub zone_id: Option<String>,
    pub api_token: Option<String>,
    /// Public origin artifacts are served from, e.g. `https://apps.example.com`.
    pub public_base_url: String,
    /// Purge API root. Overridable so tests can point at a local server.
    pub api_base: String,
}

impl Default for PurgeConfig {
    fn default() -> Self {
        Self {
            zone_id: None,
            api_token: None,
            public_base_url: "http://127.0.0.1:8000".to_owned(),
            api_base: DEFAULT_API_BASE.to_owned(),
        }
    }
}

impl PurgeConfig {
    /// Zone and token, present and non-empty, or `None`.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.zone_id.as_deref(), self.api_token.as_deref()) {
            (Some(zone), Some(token)) if !zone.is_empty() && !token.is_empty() => {
                Some((zone, token))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_no_credentials() {
        assert!(PurgeConfig::default().credentials().is_none());
    }

    #[test]
    fn empty_strings_do_not_count_as_credentials() {
        let config = PurgeConfig {
            zone_id: Some(String::new()),
            api_token: Some("token".to_owned()),
            ..PurgeConfig::default()
        };
        assert!(config.credentials().is_none());
    }

    #[test]
    fn deserializes_partial_json() {
        let config: PurgeConfig =
            serde_json::from_str(r#"{"zone_id": "z1", "api_token": "t1"}"#).unwrap();
        assert_eq!(config.credentials(), Some(("z1", "t1")));
        assert_eq!(config.api_base, DEFAULT_API_BASE);
    }
}
