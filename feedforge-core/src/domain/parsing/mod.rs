// feedforge-core/src/domain/parsing/mod.rs

pub mod field;
pub mod specs;

pub use field::{
    DEFAULT_CURRENCY, MAX_DESCRIPTION_LEN, ParsedField, extract_description, extract_image_list,
    extract_price, parse_json_field, strip_markup, truncate_chars,
};
pub use specs::ParsedSpecs;
