// feedforge-core/src/domain/content/taxonomy.rs

use crate::domain::catalog::ProductType;

/// Human-oriented category path, ` > ` delimited.
///
/// Rolex CPO is pinned to a fixed node whatever the brand column says.
pub fn category_path(product_type: ProductType, brand: Option<&str>, category: Option<&str>) -> String {
    let with_leaf = |base: &str, leaf: Option<&str>| match leaf {
        Some(leaf) => format!("{} > {}", base, leaf),
        None => base.to_string(),
    };

    match product_type {
        ProductType::RolexCertifiedPreowned => "Watches > Certified Pre-Owned > Rolex".to_string(),
        ProductType::PreownedWatch => with_leaf("Watches > Pre-Owned", brand),
        ProductType::NewWatch => with_leaf("Watches > Luxury Watches", brand),
        ProductType::Jewelry => with_leaf("Jewelry", category),
        ProductType::Handbag => with_leaf("Handbags > Designer", brand),
    }
}
