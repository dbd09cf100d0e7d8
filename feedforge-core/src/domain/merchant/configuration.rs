// feedforge-core/src/domain/merchant/configuration.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::catalog::ProductType;
use crate::domain::error::DomainError;

/// Everything a transformer needs to know about the merchant.
///
/// Passed to transformer constructors by value; there is no process-wide
/// default that tests could leak into each other.
#[derive(Debug, Serialize, Deserialize, Validate, Clone, PartialEq)]
pub struct FeedConfig {
    #[validate(nested)]
    #[serde(default)]
    pub seller: SellerPolicy,

    #[validate(nested)]
    #[serde(default)]
    pub return_windows: ReturnWindows,

    #[validate(nested)]
    #[serde(default)]
    pub shopping: ShoppingDefaults,

    #[validate(length(min = 1, message = "output_dir cannot be empty"))]
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            seller: SellerPolicy::default(),
            return_windows: ReturnWindows::default(),
            shopping: ShoppingDefaults::default(),
            output_dir: default_output_dir(),
        }
    }
}

impl FeedConfig {
    /// Runs the declarative checks and folds them into a domain error.
    pub fn check(&self) -> Result<(), DomainError> {
        self.validate()
            .map_err(|e| DomainError::InvalidConfig(e.to_string()))
    }
}

#[derive(Debug, Serialize, Deserialize, Validate, Clone, PartialEq)]
#[serde(default)]
pub struct SellerPolicy {
    #[validate(length(min = 1, max = 100))]
    pub store_name: String,

    #[validate(url)]
    pub seller_url: String,

    #[validate(length(equal = 2, message = "store_country must be a two-letter code"))]
    pub store_country: String,

    #[validate(length(min = 1, message = "at least one target country is required"))]
    pub target_countries: Vec<String>,

    #[validate(url)]
    pub privacy_policy_url: String,

    #[validate(url)]
    pub terms_url: String,

    #[validate(url)]
    pub return_policy_url: String,

    #[validate(length(min = 1, max = 5000))]
    pub return_policy_text: String,
}

impl Default for SellerPolicy {
    fn default() -> Self {
        Self {
            store_name: "Example Store".to_string(),
            seller_url: "https://www.example.com".to_string(),
            store_country: "US".to_string(),
            target_countries: vec!["US".to_string()],
            privacy_policy_url: "https://www.example.com/privacy/".to_string(),
            terms_url: "https://www.example.com/terms-conditions/".to_string(),
            return_policy_url: "https://www.example.com/returns-exchanges/".to_string(),
            return_policy_text: "To be eligible for a return, your item(s) must be unused, in their original packaging, and in the same condition that you received it.".to_string(),
        }
    }
}

/// Return window in days, per product type.
#[derive(Debug, Serialize, Deserialize, Validate, Clone, PartialEq)]
#[serde(default)]
pub struct ReturnWindows {
    #[validate(range(max = 365))]
    pub new_watch: u32,
    #[validate(range(max = 365))]
    pub rolex_certified_preowned: u32,
    #[validate(range(max = 365))]
    pub preowned_watch: u32,
    #[validate(range(max = 365))]
    pub jewelry: u32,
    #[validate(range(max = 365))]
    pub handbag: u32,
}

impl Default for ReturnWindows {
    fn default() -> Self {
        Self {
            new_watch: 14,
            rolex_certified_preowned: 14,
            preowned_watch: 7,
            jewelry: 14,
            handbag: 14,
        }
    }
}

impl ReturnWindows {
    pub fn days(&self, product_type: ProductType) -> u32 {
        match product_type {
            ProductType::NewWatch => self.new_watch,
            ProductType::RolexCertifiedPreowned => self.rolex_certified_preowned,
            ProductType::PreownedWatch => self.preowned_watch,
            ProductType::Jewelry => self.jewelry,
            ProductType::Handbag => self.handbag,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Validate, Clone, PartialEq)]
#[serde(default)]
pub struct ShoppingDefaults {
    #[validate(length(min = 1))]
    pub shipping_weight: String,

    #[validate(length(min = 1, max = 100))]
    pub price_tier: String,
}

impl Default for ShoppingDefaults {
    fn default() -> Self {
        Self {
            shipping_weight: "1 lb".to_string(),
            price_tier: "luxury".to_string(),
        }
    }
}

fn default_output_dir() -> String {
    "output".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_return_windows() {
        let windows = ReturnWindows::default();
        assert_eq!(windows.days(ProductType::NewWatch), 14);
        assert_eq!(windows.days(ProductType::RolexCertifiedPreowned), 14);
        assert_eq!(windows.days(ProductType::Jewelry), 14);
        assert_eq!(windows.days(ProductType::Handbag), 14);
        assert_eq!(windows.days(ProductType::PreownedWatch), 7);
    }

    #[test]
    fn test_defaults_pass_validation() {
        assert!(FeedConfig::default().check().is_ok());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let mut config = FeedConfig::default();
        config.seller.seller_url = "not a url".to_string();
        config.return_windows.handbag = 400;

        let err = config.check().err().map(|e| e.to_string()).unwrap_or_default();
        assert!(err.contains("seller_url"), "got: {err}");
        assert!(err.contains("handbag"), "got: {err}");
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() -> anyhow::Result<()> {
        let yaml = r#"
seller:
  store_name: "Maison Test"
return_windows:
  preowned_watch: 10
"#;
        let config: FeedConfig = serde_yaml::from_str(yaml)?;
        assert_eq!(config.seller.store_name, "Maison Test");
        assert_eq!(config.seller.store_country, "US");
        assert_eq!(config.return_windows.preowned_watch, 10);
        assert_eq!(config.return_windows.jewelry, 14);
        assert_eq!(config.output_dir, "output");
        Ok(())
    }
}
