// feedforge-core/src/domain/feed/format.rs

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FeedFormat {
    /// AI-assistant commerce feed (line-delimited JSON, gzip by default).
    #[default]
    Assistant,
    /// Merchant-center style shopping-search feed.
    Shopping,
}

impl FeedFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Assistant => "assistant",
            Self::Shopping => "shopping",
        }
    }

    /// Key holding the record identifier in emitted records.
    pub fn id_field(&self) -> &'static str {
        match self {
            Self::Assistant => "item_id",
            Self::Shopping => "id",
        }
    }

    /// Required fields in canonical column order.
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            Self::Assistant => &[
                "item_id",
                "title",
                "description",
                "url",
                "image_url",
                "price",
                "currency",
                "availability",
            ],
            Self::Shopping => &[
                "id",
                "title",
                "description",
                "link",
                "image_link",
                "availability",
                "price",
                "brand",
                "condition",
                "identifier_exists",
                "mpn",
                "google_product_category",
            ],
        }
    }

    pub fn default_encoding(&self) -> Encoding {
        match self {
            Self::Assistant => Encoding::JsonLines { gzip: true },
            Self::Shopping => Encoding::Delimited(Delimiter::Tab),
        }
    }

    /// Assistant feeds carry typed values and are only written as JSON lines.
    pub fn supports(&self, encoding: Encoding) -> bool {
        match self {
            Self::Assistant => matches!(encoding, Encoding::JsonLines { .. }),
            Self::Shopping => true,
        }
    }

    pub fn default_file_stem(&self) -> &'static str {
        match self {
            Self::Assistant => "assistant_feed",
            Self::Shopping => "shopping_feed",
        }
    }
}

impl fmt::Display for FeedFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for FeedFormat {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "assistant" | "assistant-commerce" | "openai" => Ok(Self::Assistant),
            "shopping" | "shopping-search" | "google" | "gemini" => Ok(Self::Shopping),
            _ => Err(DomainError::UnknownFormat(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Tab,
    Comma,
}

impl Delimiter {
    pub fn byte(&self) -> u8 {
        match self {
            Self::Tab => b'\t',
            Self::Comma => b',',
        }
    }
}

/// Wire encoding of a written feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    JsonLines { gzip: bool },
    Delimited(Delimiter),
}

impl Encoding {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::JsonLines { gzip: true } => ".jsonl.gz",
            Self::JsonLines { gzip: false } => ".jsonl",
            Self::Delimited(Delimiter::Tab) => ".tsv",
            Self::Delimited(Delimiter::Comma) => ".csv",
        }
    }

    /// Infers the encoding from a file name, as written by this crate.
    pub fn from_path_name(name: &str) -> Option<Self> {
        let name = name.to_lowercase();
        if name.ends_with(".gz") {
            Some(Self::JsonLines { gzip: true })
        } else if name.ends_with(".jsonl") || name.ends_with(".json") {
            Some(Self::JsonLines { gzip: false })
        } else if name.ends_with(".tsv") {
            Some(Self::Delimited(Delimiter::Tab))
        } else if name.ends_with(".csv") {
            Some(Self::Delimited(Delimiter::Comma))
        } else {
            None
        }
    }
}
