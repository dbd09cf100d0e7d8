// feedforge-core/src/application/transform/shopping.rs

use tracing::debug;

use crate::application::transform::assistant::{MAX_ADDITIONAL_IMAGES, MAX_BRAND_LEN, MAX_TITLE_LEN};
use crate::application::transform::{clip, clip_opt, screen};
use crate::domain::content::{CanonicalFields, synthesize};
use crate::domain::error::DomainError;
use crate::domain::feed::{FeedFormat, TargetRecord, TransformOutcome};
use crate::domain::merchant::FeedConfig;
use crate::domain::parsing::MAX_DESCRIPTION_LEN;
use crate::domain::ports::FeedTransformer;
use crate::domain::record::RawRecord;

const PREOWNED_NOTICE: &str = "Pre-owned luxury item. Authenticity guaranteed. All items inspected and certified by expert watchmakers.";
const NEW_NOTICE: &str = "Authorized retailer. Factory warranty included. Authenticity guaranteed.";

/// Shopping-search feed: merchant-center attributes plus the AI checkout
/// extension block.
#[derive(Debug, Clone)]
pub struct ShoppingTransformer {
    config: FeedConfig,
}

impl ShoppingTransformer {
    pub fn new(config: FeedConfig) -> Self {
        Self { config }
    }

    fn map(&self, fields: &CanonicalFields) -> TargetRecord {
        let defaults = &self.config.shopping;
        let mut out = TargetRecord::new();

        out.set("id", fields.id.as_str());
        out.set("title", clip(&fields.title, MAX_TITLE_LEN));
        out.set("description", clip(&fields.description, MAX_DESCRIPTION_LEN));
        out.set_opt("link", fields.link.clone());
        out.set_opt("image_link", fields.image_link.clone());
        out.set("availability", fields.availability.shopping_value());
        out.set("price", format!("{:.2} {}", fields.price, fields.currency));
        out.set_opt("brand", clip_opt(&fields.brand, MAX_BRAND_LEN));
        out.set("condition", fields.condition.as_str());

        // The catalog carries no global trade numbers; the part number stands in.
        out.set("identifier_exists", "false");
        out.set(
            "mpn",
            clip(fields.mpn.as_deref().unwrap_or(&fields.id), MAX_BRAND_LEN),
        );

        out.set("google_product_category", fields.product_type.google_category());
        out.set_opt("product_type", fields.category.clone());
        out.set_opt("item_group_id", clip_opt(&fields.group_id, MAX_BRAND_LEN));

        for (i, url) in fields.additional_images.iter().take(MAX_ADDITIONAL_IMAGES).enumerate() {
            let key = match i {
                0 => "additional_image_link".to_string(),
                n => format!("additional_image_link_{}", n + 1),
            };
            out.set(&key, url.as_str());
        }

        out.set_opt("color", clip_opt(&fields.color, 100));
        out.set_opt("material", clip_opt(&fields.material, 200));
        out.set_opt("size", clip_opt(&fields.size, 100));
        out.set_opt("gender", fields.gender.clone());
        out.set("age_group", "adult");
        out.set("shipping_weight", defaults.shipping_weight.as_str());

        out.set("custom_label_0", fields.product_type.as_str());
        out.set("custom_label_1", defaults.price_tier.as_str());
        out.set("custom_label_2", fields.condition.segment());

        // AI checkout extension
        out.set("native_commerce", "TRUE");
        out.set("merchant_item_id", fields.id.as_str());
        out.set(
            "consumer_notice",
            if fields.is_preowned() { PREOWNED_NOTICE } else { NEW_NOTICE },
        );
        out.set("product_highlight", fields.highlights.join("|"));
        out.set("product_detail", fields.details_text());
        out.set("structured_description", clip(&fields.qa.render(), MAX_DESCRIPTION_LEN));

        out
    }
}

impl FeedTransformer for ShoppingTransformer {
    fn format(&self) -> FeedFormat {
        FeedFormat::Shopping
    }

    fn transform(&self, record: &RawRecord) -> Result<TransformOutcome, DomainError> {
        let (price, currency) = match screen(record) {
            Ok(resolved) => resolved,
            Err(reason) => {
                debug!(id = ?record.get("id"), ?reason, "Row skipped");
                return Ok(TransformOutcome::Skipped(reason));
            }
        };

        let fields = synthesize(record, price, &currency, &self.config)?;
        Ok(TransformOutcome::Emitted {
            record: self.map(&fields),
            product_type: fields.product_type,
        })
    }
}
