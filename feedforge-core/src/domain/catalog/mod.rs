// feedforge-core/src/domain/catalog/mod.rs

pub mod availability;
pub mod classifier;
pub mod product_type;

pub use availability::{Availability, Condition};
pub use classifier::{classify, is_preowned};
pub use product_type::ProductType;
