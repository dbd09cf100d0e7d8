pub mod catalog;
pub mod content;
pub mod error;
pub mod feed;
pub mod merchant;
pub mod parsing;
pub mod ports;
pub mod record;
pub mod schema;

pub use error::DomainError;
pub use record::RawRecord;
