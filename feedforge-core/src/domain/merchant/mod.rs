// feedforge-core/src/domain/merchant/mod.rs

pub mod configuration;

pub use configuration::{FeedConfig, ReturnWindows, SellerPolicy, ShoppingDefaults};
