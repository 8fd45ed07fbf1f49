//! # Credentials Module
//!
//! Collects the access key, secret key and region for one comparison.
//!
//! Values typed by the operator win; blank fields fall back to the
//! configured defaults. Key formats are not checked locally. Only the
//! service can say whether a key is valid.

use crate::config::CredentialDefaults;
use crate::error::MissingInput;

const MASK: &str = "********";

/// Service credentials, held in memory for a single request
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    access_key: String,
    secret_key: String,
    region: String,
}

impl Credentials {
    /// Keys are stored exactly as given. Only the region is trimmed.
    pub fn new(
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
            region: region.into().trim().to_string(),
        }
    }

    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// Secret key as it may be shown anywhere
    pub fn masked_secret(&self) -> &'static str {
        if is_blank(&self.secret_key) {
            ""
        } else {
            MASK
        }
    }

    /// Blank fields, in form order. Values are kept exactly as entered;
    /// whitespace only matters here.
    pub fn missing_fields(&self) -> Vec<MissingInput> {
        let mut missing = Vec::new();
        if is_blank(&self.access_key) {
            missing.push(MissingInput::AccessKey);
        }
        if is_blank(&self.secret_key) {
            missing.push(MissingInput::SecretKey);
        }
        if is_blank(&self.region) {
            missing.push(MissingInput::Region);
        }
        missing
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &self.masked_secret())
            .field("region", &self.region)
            .finish()
    }
}

/// Values entered interactively. `None` or blank means "use the default".
#[derive(Debug, Clone, Default)]
pub struct CredentialInput {
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub region: Option<String>,
}

/// Builds [`Credentials`] from operator input and configured defaults
#[derive(Debug, Clone)]
pub struct CredentialCollector {
    defaults: CredentialDefaults,
}

impl CredentialCollector {
    pub fn new(defaults: CredentialDefaults) -> Self {
        Self { defaults }
    }

    /// Merge `input` over the defaults. Never fails; completeness is
    /// checked when a comparison is submitted.
    pub fn collect(&self, input: CredentialInput) -> Credentials {
        fn pick(entered: Option<String>, fallback: Option<&String>) -> String {
            entered
                .filter(|v| !is_blank(v))
                .or_else(|| fallback.cloned())
                .unwrap_or_default()
        }

        Credentials::new(
            pick(input.access_key, self.defaults.access_key_id.as_ref()),
            pick(input.secret_key, self.defaults.secret_access_key.as_ref()),
            pick(input.region, Some(&self.defaults.region)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> CredentialDefaults {
        CredentialDefaults {
            access_key_id: Some("AKIADEFAULT".to_string()),
            secret_access_key: Some("default-secret".to_string()),
            region: "us-east-1".to_string(),
        }
    }

    #[test]
    fn input_wins_over_defaults() {
        let collector = CredentialCollector::new(defaults());
        let credentials = collector.collect(CredentialInput {
            access_key: Some("AKIATYPED".to_string()),
            secret_key: Some("typed-secret".to_string()),
            region: Some("eu-west-1".to_string()),
        });

        assert_eq!(credentials.access_key(), "AKIATYPED");
        assert_eq!(credentials.secret_key(), "typed-secret");
        assert_eq!(credentials.region(), "eu-west-1");
    }

    #[test]
    fn blank_input_falls_back_to_defaults() {
        let collector = CredentialCollector::new(defaults());
        let credentials = collector.collect(CredentialInput {
            access_key: Some("   ".to_string()),
            secret_key: None,
            region: Some(String::new()),
        });

        assert_eq!(credentials.access_key(), "AKIADEFAULT");
        assert_eq!(credentials.secret_key(), "default-secret");
        assert_eq!(credentials.region(), "us-east-1");
        assert!(credentials.is_complete());
    }

    #[test]
    fn missing_secret_is_reported() {
        let collector = CredentialCollector::new(CredentialDefaults::default());
        let credentials = collector.collect(CredentialInput {
            access_key: Some("AKIATYPED".to_string()),
            ..Default::default()
        });

        assert_eq!(credentials.missing_fields(), vec![MissingInput::SecretKey]);
        assert!(!credentials.is_complete());
    }

    #[test]
    fn no_format_validation() {
        let credentials = Credentials::new("x", "y", "not-a-region");
        assert!(credentials.is_complete());
    }

    #[test]
    fn keys_are_kept_exactly_as_entered() {
        let credentials = Credentials::new(" AKIA ", "secret/with+padding ", "eu-west-1");
        assert_eq!(credentials.access_key(), " AKIA ");
        assert_eq!(credentials.secret_key(), "secret/with+padding ");
        assert!(credentials.is_complete());
    }

    #[test]
    fn whitespace_only_fields_count_as_missing() {
        let credentials = Credentials::new("AKIA", "   ", "\t");
        assert_eq!(
            credentials.missing_fields(),
            vec![MissingInput::SecretKey, MissingInput::Region]
        );
        assert_eq!(credentials.masked_secret(), "");
    }

    #[test]
    fn secret_is_masked_in_debug() {
        let credentials = Credentials::new("AKIA", "wJalrXUtnFEMI/K7MDENG", "us-east-1");
        let debug = format!("{:?}", credentials);

        assert!(!debug.contains("wJalrXUtnFEMI"));
        assert!(debug.contains("********"));
        assert_eq!(credentials.masked_secret(), "********");
    }
}
