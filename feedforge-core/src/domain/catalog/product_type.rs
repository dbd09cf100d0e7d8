// feedforge-core/src/domain/catalog/product_type.rs

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    #[default]
    NewWatch,
    RolexCertifiedPreowned,
    PreownedWatch,
    Jewelry,
    Handbag,
}

impl ProductType {
    pub const ALL: [ProductType; 5] = [
        Self::NewWatch,
        Self::RolexCertifiedPreowned,
        Self::PreownedWatch,
        Self::Jewelry,
        Self::Handbag,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NewWatch => "new_watch",
            Self::RolexCertifiedPreowned => "rolex_certified_preowned",
            Self::PreownedWatch => "preowned_watch",
            Self::Jewelry => "jewelry",
            Self::Handbag => "handbag",
        }
    }

    pub fn is_watch(&self) -> bool {
        matches!(
            self,
            Self::NewWatch | Self::RolexCertifiedPreowned | Self::PreownedWatch
        )
    }

    /// Google product taxonomy node used by the shopping-search format.
    pub fn google_category(&self) -> &'static str {
        match self {
            Self::NewWatch | Self::RolexCertifiedPreowned | Self::PreownedWatch => {
                "Apparel & Accessories > Jewelry > Watches"
            }
            Self::Jewelry => "Apparel & Accessories > Jewelry",
            Self::Handbag => "Apparel & Accessories > Handbags, Wallets & Cases > Handbags",
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ProductType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "new_watch" => Ok(Self::NewWatch),
            "rolex_certified_preowned" | "rolex_cpo" => Ok(Self::RolexCertifiedPreowned),
            "preowned_watch" => Ok(Self::PreownedWatch),
            "jewelry" => Ok(Self::Jewelry),
            "handbag" => Ok(Self::Handbag),
            _ => Err(format!("Unknown product type: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_new_watch() {
        assert_eq!(ProductType::default(), ProductType::NewWatch);
    }

    #[test]
    fn test_display_and_parsing_consistency() -> anyhow::Result<()> {
        use std::str::FromStr;

        for product_type in ProductType::ALL {
            let parsed =
                ProductType::from_str(&product_type.to_string()).map_err(|e| anyhow::anyhow!(e))?;
            assert_eq!(parsed, product_type);
        }
        assert_eq!(
            ProductType::from_str("ROLEX_CPO").map_err(|e| anyhow::anyhow!(e))?,
            ProductType::RolexCertifiedPreowned
        );
        assert!(ProductType::from_str("sneaker").is_err());
        Ok(())
    }

    #[test]
    fn test_serde_uses_snake_case() -> anyhow::Result<()> {
        let json = serde_json::to_string(&ProductType::RolexCertifiedPreowned)?;
        assert_eq!(json, "\"rolex_certified_preowned\"");
        Ok(())
    }
}
