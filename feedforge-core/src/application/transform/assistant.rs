// feedforge-core/src/application/transform/assistant.rs

use tracing::debug;

use crate::application::transform::{clip, clip_opt, screen};
use crate::domain::content::{CanonicalFields, synthesize};
use crate::domain::error::DomainError;
use crate::domain::feed::{FeedFormat, TargetRecord, TransformOutcome};
use crate::domain::merchant::FeedConfig;
use crate::domain::parsing::MAX_DESCRIPTION_LEN;
use crate::domain::ports::FeedTransformer;
use crate::domain::record::RawRecord;

pub const MAX_TITLE_LEN: usize = 150;
pub const MAX_BRAND_LEN: usize = 70;
pub const MAX_ADDITIONAL_IMAGES: usize = 10;

/// Assistant-commerce feed: flat JSON objects with seller policy and the
/// full enhancement bundle.
#[derive(Debug, Clone)]
pub struct AssistantTransformer {
    config: FeedConfig,
}

impl AssistantTransformer {
    pub fn new(config: FeedConfig) -> Self {
        Self { config }
    }

    fn map(&self, fields: &CanonicalFields) -> TargetRecord {
        let seller = &self.config.seller;
        let mut out = TargetRecord::new();

        // Required
        out.set("item_id", fields.id.as_str());
        out.set("title", clip(&fields.title, MAX_TITLE_LEN));
        out.set("description", self.description(fields));
        out.set_opt("brand", clip_opt(&fields.brand, MAX_BRAND_LEN));
        out.set_opt("url", fields.link.clone());
        out.set_opt("image_url", fields.image_link.clone());
        out.set("price", fields.price);
        out.set("currency", fields.currency.as_str());
        out.set("availability", fields.availability.assistant_value());

        // Eligibility
        out.set("is_eligible_search", true);
        out.set("is_eligible_checkout", fields.allow_buy_now);

        // Variants
        out.set_opt("group_id", clip_opt(&fields.group_id, MAX_BRAND_LEN));
        out.set("listing_has_variations", fields.group_id.is_some());

        // Store and policies
        out.set("store_name", seller.store_name.as_str());
        out.set("seller_url", seller.seller_url.as_str());
        out.set("store_country", seller.store_country.as_str());
        out.set("target_countries", seller.target_countries.clone());
        out.set("seller_privacy_policy", seller.privacy_policy_url.as_str());
        out.set("seller_tos", seller.terms_url.as_str());
        out.set("return_policy", seller.return_policy_text.as_str());
        out.set("return_window", fields.return_window);

        out.set("condition", fields.condition.as_str());
        out.set("product_category", fields.category_path.as_str());

        let images: Vec<&str> = fields
            .additional_images
            .iter()
            .take(MAX_ADDITIONAL_IMAGES)
            .map(String::as_str)
            .collect();
        out.set("additional_image_urls", images.join(","));

        // Enhancement bundle
        out.set("q_and_a", fields.qa.render());
        out.set_opt("material", clip_opt(&fields.material, 200));
        out.set_opt("color", clip_opt(&fields.color, 40));
        out.set_opt("size", clip_opt(&fields.size, 20));
        out.set_opt("dimensions", clip_opt(&fields.dimensions, 100));
        out.set_opt("mpn", clip_opt(&fields.mpn, 70));
        out.set_opt("gtin", fields.gtin.clone());
        out.set_opt("gender", fields.gender.clone());

        out
    }

    /// Year of production rides along as trailing description text.
    fn description(&self, fields: &CanonicalFields) -> String {
        match (&fields.year, fields.description.is_empty()) {
            (Some(year), false) => clip(
                &format!("{}\n\nYear: {}", fields.description, year),
                MAX_DESCRIPTION_LEN,
            ),
            _ => fields.description.clone(),
        }
    }
}

impl FeedTransformer for AssistantTransformer {
    fn format(&self) -> FeedFormat {
        FeedFormat::Assistant
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
