//! Startup configuration
//!
//! Everything the catalog adapter needs is read once, here, and handed to it
//! by reference. Request handling never looks at the process environment.

use std::env;

/// Marketplace used when `AMAZON_MARKETPLACE_ID` is unset (amazon.com).
pub const DEFAULT_MARKETPLACE_ID: &str = "ATVPDKIKX0DER";
/// AWS-style region used when `AMAZON_REGION` is unset.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Raw credential fields. Values are kept as provided; presence is judged by
/// [`is_present`].
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub refresh_token: Option<String>,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
}

impl Credentials {
    /// Names of the required fields that are absent or still placeholders.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            ("AMAZON_CLIENT_ID", &self.client_id),
            ("AMAZON_CLIENT_SECRET", &self.client_secret),
            ("AMAZON_REFRESH_TOKEN", &self.refresh_token),
            ("AMAZON_ACCESS_KEY_ID", &self.access_key_id),
            ("AMAZON_SECRET_ACCESS_KEY", &self.secret_access_key),
        ]
        .into_iter()
        .filter(|(_, value)| !is_present(value.as_deref()))
        .map(|(name, _)| name)
        .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }
}

/// A credential counts as present only when it is non-empty and not a
/// template placeholder such as `your_client_id_here`.
pub fn is_present(value: Option<&str>) -> bool {
    match value {
        Some(v) => !v.is_empty() && !v.contains("your_") && !v.contains("_here"),
        None => false,
    }
}

/// Immutable application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    /// AWS-style region name, e.g. `us-east-1`.
    pub region: String,
    pub marketplace_id: String,
    pub sandbox: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let credentials = Credentials {
            client_id: lookup("AMAZON_CLIENT_ID"),
            client_secret: lookup("AMAZON_CLIENT_SECRET"),
            refresh_token: lookup("AMAZON_REFRESH_TOKEN"),
            access_key_id: lookup("AMAZON_ACCESS_KEY_ID"),
            secret_access_key: lookup("AMAZON_SECRET_ACCESS_KEY"),
        };

        Self {
            credentials,
            region: lookup("AMAZON_REGION")
                .filter(|r| !r.is_empty())
                .unwrap_or_else(|| DEFAULT_REGION.to_string()),
            marketplace_id: lookup("AMAZON_MARKETPLACE_ID")
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| DEFAULT_MARKETPLACE_ID.to_string()),
            sandbox: lookup("AMAZON_SANDBOX").as_deref() == Some("true"),
        }
    }
}

impl Default for Config {
    /// An empty configuration: no credentials, default region and marketplace.
    fn default() -> Self {
        Self::from_lookup(|_| None)
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
    fn test_placeholders_are_not_present() {
        assert!(!is_present(None));
        assert!(!is_present(Some("")));
        assert!(!is_present(Some("your_client_id")));
        assert!(!is_present(Some("client_secret_here")));
        assert!(is_present(Some("amzn1.application-oa2-client.abc")));
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = Config::default();
        assert_eq!(config.marketplace_id, DEFAULT_MARKETPLACE_ID);
        assert_eq!(config.region, DEFAULT_REGION);
        assert!(!config.sandbox);
        assert_eq!(config.credentials.missing().len(), 5);
    }

    #[test]
    fn test_missing_lists_only_absent_fields() {
        let config = Config::from_lookup(lookup_from(&[
            ("AMAZON_CLIENT_ID", "id"),
            ("AMAZON_CLIENT_SECRET", "secret"),
            ("AMAZON_REFRESH_TOKEN", "your_refresh_token"),
            ("AMAZON_ACCESS_KEY_ID", "AKIA"),
        ]));

        assert_eq!(
            config.credentials.missing(),
            vec!["AMAZON_REFRESH_TOKEN", "AMAZON_SECRET_ACCESS_KEY"]
        );
        assert!(!config.credentials.is_complete());
    }

    #[test]
    fn test_sandbox_requires_literal_true() {
        let on = Config::from_lookup(lookup_from(&[("AMAZON_SANDBOX", "true")]));
        let off = Config::from_lookup(lookup_from(&[("AMAZON_SANDBOX", "1")]));
        assert!(on.sandbox);
        assert!(!off.sandbox);
    }
}
