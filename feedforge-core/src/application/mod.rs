// feedforge-core/src/application/mod.rs

pub mod ports;
pub mod transform;

pub mod pipeline;
pub mod preview;
pub mod report;
pub mod validation;

// --- RE-EXPORTS (FACADE PATTERN) ---
// Lets the CLI write `use feedforge_core::application::{transform_file, SchemaValidator};`
// without knowing the file layout.

pub use pipeline::{TransformStats, run_transform, transform_file};
pub use preview::{Preview, RowSelector, preview_file};
pub use report::render_text_report;
pub use transform::{AssistantTransformer, ShoppingTransformer, transformer_for};
pub use validation::{FeedReport, SchemaValidator, ValidationResult};
