use serde::Deserialize;

pub fn filter_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.trim().is_empty()))
}

/// Settings for the Indigenius speech API.
///
/// Every field is optional here; a missing credential is reported by the
/// caller as a configuration error rather than as an `envy` failure.
#[derive(Clone, Default, Deserialize)]
pub struct IndigeniusEnv {
    #[serde(default, deserialize_with = "filter_empty")]
    pub indigenius_api_key: Option<String>,
    #[serde(default, deserialize_with = "filter_empty")]
    pub indigenius_org_id: Option<String>,
    #[serde(default, deserialize_with = "filter_empty")]
    pub indigenius_api_base: Option<String>,
}

#[derive(Clone, Default, Deserialize)]
pub struct SentryEnv {
    #[serde(default, deserialize_with = "filter_empty")]
    pub sentry_dsn: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_indigenius_env_present() {
        let env: IndigeniusEnv = envy::from_iter(vars(&[
            ("INDIGENIUS_API_KEY", "key-123"),
            ("INDIGENIUS_ORG_ID", "org-456"),
        ]))
        .unwrap();

        assert_eq!(env.indigenius_api_key.as_deref(), Some("key-123"));
        assert_eq!(env.indigenius_org_id.as_deref(), Some("org-456"));
        assert_eq!(env.indigenius_api_base, None);
    }

    #[test]
    fn test_indigenius_env_missing() {
        let env: IndigeniusEnv = envy::from_iter(vars(&[])).unwrap();

        assert_eq!(env.indigenius_api_key, None);
        assert_eq!(env.indigenius_org_id, None);
    }

    #[test]
    fn test_empty_values_are_absent() {
        let env: IndigeniusEnv = envy::from_iter(vars(&[
            ("INDIGENIUS_API_KEY", ""),
            ("INDIGENIUS_ORG_ID", "   "),
        ]))
        .unwrap();

        assert_eq!(env.indigenius_api_key, None);
        assert_eq!(env.indigenius_org_id, None);
    }
}
