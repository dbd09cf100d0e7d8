// feedforge-core/src/domain/content/highlights.rs

use crate::domain::catalog::ProductType;
use crate::domain::content::canonical::CanonicalFields;

pub const MAX_HIGHLIGHTS: usize = 10;

const TRAILING_HIGHLIGHTS: [&str; 2] = ["Free shipping available", "Expert customer service"];

/// Short discovery facts, capped at [`MAX_HIGHLIGHTS`].
pub fn build(fields: &CanonicalFields) -> Vec<String> {
    let mut out = Vec::new();

    if let Some(brand) = &fields.brand {
        out.push(format!("Authentic {} product", brand));
    }
    out.push(if fields.is_preowned() {
        "Certified pre-owned with warranty".to_string()
    } else {
        "Brand new with manufacturer warranty".to_string()
    });
    if let Some(material) = &fields.material {
        out.push(format!("Crafted in {}", material));
    }
    if let Some(color) = &fields.color {
        out.push(format!("{} dial", color));
    }
    if let Some(size) = &fields.size {
        out.push(format!("{} case size", size));
    }
    if let Some(water) = &fields.water_resistance {
        out.push(format!("Water resistant to {}", water));
    }
    if let Some(movement) = &fields.movement {
        out.push(format!("{} movement", movement));
    }
    if fields.product_type == ProductType::Jewelry {
        if let Some(stones) = &fields.gemstones {
            out.push(format!("Features {}", stones));
        }
    }

    for extra in TRAILING_HIGHLIGHTS {
        if out.len() < MAX_HIGHLIGHTS {
            out.push(extra.to_string());
        }
    }
    out.truncate(MAX_HIGHLIGHTS);
    out
}

/// Ordered `(label, value)` facts for the structured product detail.
pub fn structured_details(fields: &CanonicalFields) -> Vec<(&'static str, String)> {
    [
        ("Brand", &fields.brand),
        ("Reference", &fields.mpn),
        ("Material", &fields.material),
        ("Case Size", &fields.size),
        ("Dial Color", &fields.color),
        ("Water Resistance", &fields.water_resistance),
        ("Movement", &fields.movement),
    ]
    .into_iter()
    .filter_map(|(label, value)| value.as_ref().map(|v| (label, v.clone())))
    .collect()
}
