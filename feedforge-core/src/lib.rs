// feedforge-core/src/lib.rs

// 1. Documentation
#![allow(missing_docs)]

// 2. Memory safety
#![deny(unsafe_code)]
// 3. Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
// 4. Performance
#![warn(clippy::perf)]

// --- HEXAGONAL MODULES ---

// 1. Ports (Interfaces / Traits)
// Row sources and record sinks.
pub mod ports;

// 2. Domain (business core)
// Parsing, classification, content synthesis, feed formats, schemas.
// Depends on nothing else in the crate.
pub mod domain;

// 3. Infrastructure (Adapters)
// CSV input, feed writers/loaders, config files, templates, discovery.
// Depends on the Domain and the Ports.
pub mod infrastructure;

// 4. Application (Use Cases)
// Transformers, pipeline, validation, reports, preview.
pub mod application;

// --- GLOBAL ERROR HANDLING ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
pub use error::FeedError;
