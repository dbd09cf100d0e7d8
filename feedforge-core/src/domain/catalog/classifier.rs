// feedforge-core/src/domain/catalog/classifier.rs

use crate::domain::catalog::product_type::ProductType;
use crate::domain::parsing::ParsedSpecs;
use crate::domain::record::RawRecord;

/// Id prefix the catalog uses for jewelry items.
pub const JEWELRY_ID_PREFIX: &str = "ns-j-";

/// Specification flag marking a pre-owned item.
pub const PREOWNED_FLAG: &str = "isPreOwned";

pub fn is_preowned(specs: &ParsedSpecs) -> bool {
    specs.flag(PREOWNED_FLAG)
}

/// Assigns exactly one product type to a record.
///
/// Rules run in a fixed order and the first match wins. Category checks come
/// before brand and condition, so a pre-owned Rolex filed under jewelry stays
/// jewelry.
pub fn classify(record: &RawRecord, specs: &ParsedSpecs) -> ProductType {
    let category = record.get("category").unwrap_or("").to_lowercase();
    let id = record.get("id").unwrap_or("").to_lowercase();
    let brand = record.get("brand").unwrap_or("");
    let preowned = is_preowned(specs);

    if category.contains("jewelry") || id.starts_with(JEWELRY_ID_PREFIX) {
        return ProductType::Jewelry;
    }

    // Matches "handbag" too.
    if category.contains("bag") {
        return ProductType::Handbag;
    }

    if brand.eq_ignore_ascii_case("rolex") && preowned {
        return ProductType::RolexCertifiedPreowned;
    }

    if preowned {
        return ProductType::PreownedWatch;
    }

    ProductType::NewWatch
}
