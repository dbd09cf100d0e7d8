// feedforge-core/src/domain/catalog/availability.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stock status as the catalog reports it in `availability_status`.
///
/// Each target format maps this to its own vocabulary; see
/// [`Availability::assistant_value`] and [`Availability::shopping_value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    InStock,
    OutOfStock,
    PreOrder,
    Backorder,
    #[default]
    Unknown,
}

impl Availability {
    pub fn from_status(status: Option<&str>) -> Self {
        match status.map(|s| s.trim().to_uppercase()).as_deref() {
            Some("IN_STOCK") => Self::InStock,
            Some("OUT_OF_STOCK") => Self::OutOfStock,
            Some("PRE_ORDER") | Some("PREORDER") => Self::PreOrder,
            Some("BACKORDER") => Self::Backorder,
            _ => Self::Unknown,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }

    pub fn assistant_value(&self) -> &'static str {
        match self {
            Self::InStock => "in_stock",
            Self::OutOfStock => "out_of_stock",
            Self::PreOrder => "pre_order",
            Self::Backorder => "backorder",
            Self::Unknown => "unknown",
        }
    }

    /// Merchant-center vocabulary has no "unknown"; it falls back to out of stock.
    pub fn shopping_value(&self) -> &'static str {
        match self {
            Self::InStock => "in_stock",
            Self::PreOrder => "preorder",
            Self::Backorder => "backorder",
            Self::OutOfStock | Self::Unknown => "out_of_stock",
        }
    }

    /// Sentence used by the availability Q&A pair.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::InStock => "Yes, this item is in stock and ready to ship.",
            Self::OutOfStock => "This item is currently out of stock.",
            Self::PreOrder => "This item is available for pre-order.",
            Self::Backorder => "This item is on backorder and will ship once restocked.",
            Self::Unknown => "Please contact us for current availability.",
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.assistant_value())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    #[default]
    New,
    Used,
}

impl Condition {
    pub fn from_preowned(is_preowned: bool) -> Self {
        if is_preowned { Self::Used } else { Self::New }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Used => "used",
        }
    }

    /// Segment label used by the shopping custom labels.
    pub fn segment(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Used => "pre-owned",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
