// feedforge-core/src/domain/content/canonical.rs

use tracing::debug;

use crate::domain::catalog::{Availability, Condition, ProductType, classify, is_preowned};
use crate::domain::content::{highlights, qa, taxonomy};
use crate::domain::content::qa::QaBlock;
use crate::domain::error::DomainError;
use crate::domain::merchant::FeedConfig;
use crate::domain::parsing::{
    ParsedSpecs, extract_description, extract_image_list, parse_json_field,
};
use crate::domain::record::RawRecord;

// --- ALIAS CHAINS ---
// First present, non-empty key wins. Later keys are fallbacks only.

pub const MATERIAL_KEYS: &[&str] = &["caseMaterial", "case_material", "material"];
pub const SIZE_KEYS: &[&str] = &["caseSize", "caseDiameter", "diameter"];
pub const THICKNESS_KEYS: &[&str] = &["caseThickness", "thickness"];
pub const COLOR_KEYS: &[&str] = &["dialColor", "dial_color", "color"];
pub const DIMENSION_KEYS: &[&str] = &["dimensions", "bagDimensions"];
pub const WATER_RESISTANCE_KEYS: &[&str] = &["waterResistance", "water_resistance"];
pub const MOVEMENT_KEYS: &[&str] = &["movementType", "movement", "caliber"];
pub const POWER_RESERVE_KEYS: &[&str] = &["powerReserve", "power_reserve"];
pub const WARRANTY_KEYS: &[&str] = &["warranty", "warrantyYears"];
pub const MPN_KEYS: &[&str] = &["baseRefNum", "referenceNumber", "reference", "modelNumber", "sku"];
pub const YEAR_KEYS: &[&str] = &["year", "productionYear"];
pub const GEMSTONE_KEYS: &[&str] = &["gemstones", "stones"];
pub const METAL_KEYS: &[&str] = &["metalKarat", "karat", "metal"];
pub const RING_SIZE_KEYS: &[&str] = &["ringSize", "ring_size"];
pub const HARDWARE_KEYS: &[&str] = &["hardware", "hardwareColor"];
pub const BOX_KEYS: &[&str] = &["hasBox", "box"];
pub const PAPERS_KEYS: &[&str] = &["hasPapers", "papers"];
pub const GTIN_COLUMNS: &[&str] = &["gtin", "upc", "ean"];
pub const TITLE_COLUMNS: &[&str] = &["title", "name"];

/// Format-agnostic view of one catalog row.
///
/// Derived once per record and shared by both transformers so that
/// extraction rules live in a single place.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalFields {
    pub id: String,
    pub title: String,
    pub brand: Option<String>,
    pub description: String,
    pub link: Option<String>,
    pub image_link: Option<String>,
    pub additional_images: Vec<String>,
    pub price: f64,
    pub currency: String,
    pub availability: Availability,
    pub condition: Condition,
    pub product_type: ProductType,
    pub category: Option<String>,
    pub category_path: String,
    pub group_id: Option<String>,
    pub allow_buy_now: bool,
    pub return_window: u32,

    // Attributes
    pub material: Option<String>,
    pub size: Option<String>,
    pub thickness: Option<String>,
    pub color: Option<String>,
    pub dimensions: Option<String>,
    pub gender: Option<String>,
    pub mpn: Option<String>,
    pub gtin: Option<String>,
    pub year: Option<String>,
    pub water_resistance: Option<String>,
    pub movement: Option<String>,
    pub power_reserve: Option<String>,
    pub warranty: Option<String>,
    pub gemstones: Option<String>,
    pub metal: Option<String>,
    pub ring_size: Option<String>,
    pub hardware: Option<String>,
    pub has_box: bool,
    pub has_papers: bool,

    // Derived content
    pub qa: QaBlock,
    pub highlights: Vec<String>,
    pub details: Vec<(&'static str, String)>,
}

impl CanonicalFields {
    pub fn is_preowned(&self) -> bool {
        self.condition == Condition::Used
    }

    /// `key:value` pairs joined with `|`.
    pub fn details_text(&self) -> String {
        self.details
            .iter()
            .map(|(k, v)| format!("{}:{}", k, v))
            .collect::<Vec<_>>()
            .join("|")
    }
}

/// Builds [`CanonicalFields`] from a raw row and an already resolved price.
///
/// Price resolution happens in the skip gate, so it is passed in rather than
/// recomputed. Fails only when the row has no id.
pub fn synthesize(
    record: &RawRecord,
    price: f64,
    currency: &str,
    config: &FeedConfig,
) -> Result<CanonicalFields, DomainError> {
    let id = record.get("id").ok_or(DomainError::MissingIdentity)?.to_string();

    let specs = ParsedSpecs::parse(record.raw("specifications"));
    let description_field = parse_json_field(record.raw("description"));
    if description_field.is_malformed() {
        debug!(id = %id, "description column is not valid JSON, using empty description");
    }

    let product_type = classify(record, &specs);
    let brand = record.get("brand").map(str::to_string);
    let category = record.get("category").map(str::to_string);

    let size = specs.first_of(SIZE_KEYS);
    let thickness = specs.first_of(THICKNESS_KEYS);
    let dimensions = specs
        .first_of(DIMENSION_KEYS)
        .or_else(|| match (&size, &thickness) {
            (Some(s), Some(t)) => Some(format!("{} x {}", s, t)),
            (Some(s), None) => Some(format!("{} diameter", s)),
            _ => None,
        });

    let gender = specs
        .text("gender")
        .or_else(|| record.get("gender").map(str::to_string))
        .map(|g| normalize_gender(&g).to_string());

    let mut fields = CanonicalFields {
        title: record.first_of(TITLE_COLUMNS).unwrap_or("").to_string(),
        description: extract_description(&description_field.into_value()),
        link: record.get("link").map(str::to_string),
        image_link: record.get("image_link").map(str::to_string),
        additional_images: extract_image_list(record.raw("additional_image_link")),
        price,
        currency: currency.to_string(),
        availability: Availability::from_status(record.get("availability_status")),
        condition: Condition::from_preowned(is_preowned(&specs)),
        product_type,
        category_path: taxonomy::category_path(product_type, brand.as_deref(), category.as_deref()),
        group_id: record.get("item_group_id").map(str::to_string),
        allow_buy_now: record.is_true("allow_buy_now"),
        return_window: config.return_windows.days(product_type),

        material: specs.first_of(MATERIAL_KEYS),
        color: specs.first_of(COLOR_KEYS),
        gender,
        mpn: specs.first_of(MPN_KEYS),
        gtin: record.first_of(GTIN_COLUMNS).map(str::to_string),
        year: specs.first_of(YEAR_KEYS),
        water_resistance: specs.first_of(WATER_RESISTANCE_KEYS),
        movement: specs.first_of(MOVEMENT_KEYS),
        power_reserve: specs.first_of(POWER_RESERVE_KEYS),
        warranty: specs.first_of(WARRANTY_KEYS),
        gemstones: specs.first_of(GEMSTONE_KEYS),
        metal: specs.first_of(METAL_KEYS),
        ring_size: specs.first_of(RING_SIZE_KEYS),
        hardware: specs.first_of(HARDWARE_KEYS),
        has_box: specs.any_flag(BOX_KEYS),
        has_papers: specs.any_flag(PAPERS_KEYS),
        size,
        thickness,
        dimensions,
        id,
        brand,
        category,

        qa: QaBlock::default(),
        highlights: Vec::new(),
        details: Vec::new(),
    };

    fields.qa = qa::build(&fields, &config.seller);
    fields.highlights = highlights::build(&fields);
    fields.details = highlights::structured_details(&fields);

    Ok(fields)
}

pub fn normalize_gender(raw: &str) -> &'static str {
    match raw.trim().to_lowercase().as_str() {
        "male" | "men" | "mens" | "men's" => "male",
        "female" | "women" | "womens" | "women's" => "female",
        _ => "unisex",
    }
}
