// feedforge-core/src/domain/content/qa.rs

use crate::domain::catalog::ProductType;
use crate::domain::content::canonical::CanonicalFields;
use crate::domain::merchant::SellerPolicy;

/// Every record carries at least this many pairs.
pub const MIN_QA_PAIRS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QaPair {
    pub question: String,
    pub answer: String,
}

impl QaPair {
    fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QaBlock {
    pairs: Vec<QaPair>,
}

impl QaBlock {
    pub fn pairs(&self) -> &[QaPair] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    fn push(&mut self, question: impl Into<String>, answer: impl Into<String>) {
        self.pairs.push(QaPair::new(question, answer));
    }

    /// `Q: ...\nA: ...` pairs separated by a blank line.
    pub fn render(&self) -> String {
        self.pairs
            .iter()
            .map(|p| format!("Q: {}\nA: {}", p.question, p.answer))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Builds the Q&A block for one record.
///
/// Universal pairs come first, then the pairs specific to the product
/// family, then generic fallbacks until [`MIN_QA_PAIRS`] is reached.
pub fn build(fields: &CanonicalFields, seller: &SellerPolicy) -> QaBlock {
    let mut block = QaBlock::default();

    universal_pairs(&mut block, fields);

    match fields.product_type {
        ProductType::NewWatch | ProductType::RolexCertifiedPreowned | ProductType::PreownedWatch => {
            watch_pairs(&mut block, fields)
        }
        ProductType::Jewelry => jewelry_pairs(&mut block, fields),
        ProductType::Handbag => handbag_pairs(&mut block, fields),
    }

    let fallbacks = [
        QaPair::new(
            "How is this item shipped?",
            "Every order ships free, fully insured, with signature required on delivery.",
        ),
        QaPair::new(
            "Is this item authentic?",
            "Yes, every item is authenticated by our specialists before it ships.",
        ),
        QaPair::new(
            "Can I ask more questions about this item?",
            format!(
                "Yes, contact {} and a specialist will be happy to help.",
                seller.store_name
            ),
        ),
    ];
    for pair in fallbacks {
        if block.len() >= MIN_QA_PAIRS {
            break;
        }
        block.pairs.push(pair);
    }

    block
}

fn noun(product_type: ProductType) -> &'static str {
    match product_type {
        ProductType::Jewelry => "piece",
        ProductType::Handbag => "bag",
        _ => "watch",
    }
}

fn universal_pairs(block: &mut QaBlock, fields: &CanonicalFields) {
    let noun = noun(fields.product_type);

    if fields.availability.is_known() {
        block.push("Is this item available?", fields.availability.describe());
    }

    if let Some(brand) = &fields.brand {
        block.push(
            format!("Who makes this {}?", noun),
            format!("This {} is made by {}.", noun, brand),
        );
    }

    match (fields.product_type, fields.is_preowned()) {
        (ProductType::RolexCertifiedPreowned, _) => block.push(
            "Is this watch certified?",
            "Yes, this is a Rolex Certified Pre-Owned watch with a 2-year international guarantee from Rolex.",
        ),
        (_, true) => block.push(
            "What is the condition?",
            format!(
                "This is a pre-owned {} that has been inspected and authenticated by our experts.",
                noun
            ),
        ),
        (_, false) => block.push(
            "What is the condition?",
            format!("This {} is brand new.", noun),
        ),
    }

    let returns = if fields.return_window == 0 {
        "This item is final sale and cannot be returned.".to_string()
    } else {
        format!(
            "Returns are accepted within {} days of delivery.",
            fields.return_window
        )
    };
    block.push("What is the return policy?", returns);
}

fn watch_pairs(block: &mut QaBlock, fields: &CanonicalFields) {
    if let Some(water) = &fields.water_resistance {
        block.push(
            "Is this watch waterproof?",
            format!("This watch has a water resistance rating of {}.", water),
        );
    }

    if let Some(movement) = &fields.movement {
        let answer = match &fields.power_reserve {
            Some(reserve) => format!("{} with approximately {} power reserve.", movement, reserve),
            None => format!("{}.", movement),
        };
        block.push("What type of movement does it have?", answer);
    }

    match (fields.has_box, fields.has_papers) {
        (true, true) => block.push(
            "Does it come with box and papers?",
            "Yes, includes original box and papers/documentation.",
        ),
        (true, false) => block.push(
            "Does it come with the original box?",
            "Yes, includes original box.",
        ),
        (false, true) => block.push(
            "Does it come with papers?",
            "Yes, includes original papers/documentation.",
        ),
        (false, false) => {}
    }

    match (&fields.warranty, fields.product_type) {
        (Some(warranty), _) => block.push(
            "Is there a warranty?",
            format!("Yes, this watch comes with a {} warranty.", warranty),
        ),
        (None, ProductType::RolexCertifiedPreowned) => block.push(
            "Is there a warranty?",
            "Yes, Rolex Certified Pre-Owned watches come with a 2-year international guarantee.",
        ),
        _ => {}
    }

    if let Some(size) = &fields.size {
        block.push(
            "What size is the watch?",
            format!("The case diameter is {}.", size),
        );
    }
}

fn jewelry_pairs(block: &mut QaBlock, fields: &CanonicalFields) {
    if let Some(stones) = &fields.gemstones {
        block.push(
            "What gemstones does it feature?",
            format!("This piece features {}.", stones),
        );
    }
    if let Some(metal) = &fields.metal {
        block.push("What metal is it made of?", format!("It is crafted in {}.", metal));
    }
    if let Some(ring_size) = &fields.ring_size {
        block.push(
            "What size is it?",
            format!("This piece is ring size {}. Contact us about resizing options.", ring_size),
        );
    }
    block.push(
        "How should I care for this piece?",
        "Store it separately in a soft pouch and clean it gently with a lint-free cloth.",
    );
}

fn handbag_pairs(block: &mut QaBlock, fields: &CanonicalFields) {
    if let Some(dimensions) = &fields.dimensions {
        block.push("What are the dimensions?", format!("It measures {}.", dimensions));
    }
    if let Some(color) = &fields.color {
        block.push("What color is it?", format!("{}.", color));
    }
    if let Some(hardware) = &fields.hardware {
        block.push("What hardware does it have?", format!("{} hardware.", hardware));
    }
    block.push(
        "How should I care for this bag?",
        "Keep it stuffed and stored in its dust bag, away from direct sunlight and moisture.",
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::content::synthesize;
    use crate::domain::merchant::FeedConfig;
    use crate::domain::record::RawRecord;

    fn fields_for(pairs: &[(&str, &str)]) -> anyhow::Result<CanonicalFields> {
        let row = RawRecord::from_pairs(pairs.iter().copied());
        Ok(synthesize(&row, 100.0, "USD", &FeedConfig::default())?)
    }

    #[test]
    fn test_bare_record_reaches_the_floor() -> anyhow::Result<()> {
        let fields = fields_for(&[("id", "ns-w-1")])?;
        assert_eq!(fields.qa.len(), MIN_QA_PAIRS);
        assert_eq!(fields.qa.pairs()[2].question, "How is this item shipped?");
        Ok(())
    }

    #[test]
    fn test_every_product_type_meets_the_floor() -> anyhow::Result<()> {
        let rows: [&[(&str, &str)]; 5] = [
            &[("id", "ns-w-1")],
            &[("id", "ns-w-2"), ("brand", "Rolex"), ("specifications", r#"{"isPreOwned":"true"}"#)],
            &[("id", "ns-w-3"), ("specifications", r#"{"isPreOwned":"true"}"#)],
            &[("id", "ns-j-4")],
            &[("id", "ns-h-5"), ("category", "handbags")],
        ];
        for row in rows {
            let fields = fields_for(row)?;
            assert!(fields.qa.len() >= MIN_QA_PAIRS, "{:?}", fields.product_type);
        }
        Ok(())
    }

    #[test]
    fn test_watch_pairs_follow_spec_order() -> anyhow::Result<()> {
        let fields = fields_for(&[
            ("id", "ns-w-9"),
            ("brand", "Omega"),
            ("availability_status", "IN_STOCK"),
            (
                "specifications",
                r#"{"waterResistance":"300m","movementType":"Automatic","powerReserve":"55 hours","hasBox":"true","hasPapers":"TRUE","warranty":"5-year","caseSize":"42mm"}"#,
            ),
        ])?;
        let questions: Vec<&str> = fields.qa.pairs().iter().map(|p| p.question.as_str()).collect();
        assert_eq!(
            questions,
            vec![
                "Is this item available?",
                "Who makes this watch?",
                "What is the condition?",
                "What is the return policy?",
                "Is this watch waterproof?",
                "What type of movement does it have?",
                "Does it come with box and papers?",
                "Is there a warranty?",
                "What size is the watch?",
            ]
        );
        assert!(fields.qa.render().contains("Automatic with approximately 55 hours power reserve."));
        Ok(())
    }

    #[test]
    fn test_cpo_defaults_to_rolex_guarantee() -> anyhow::Result<()> {
        let fields = fields_for(&[
            ("id", "ns-w-1"),
            ("brand", "Rolex"),
            ("specifications", r#"{"isPreOwned":"true"}"#),
        ])?;
        let rendered = fields.qa.render();
        assert!(rendered.contains("Rolex Certified Pre-Owned watch"));
        assert!(rendered.contains("2-year international guarantee."));
        Ok(())
    }

    #[test]
    fn test_render_layout() -> anyhow::Result<()> {
        let fields = fields_for(&[("id", "ns-w-1")])?;
        insta::assert_snapshot!(fields.qa.render(), @r"
        Q: What is the condition?
        A: This watch is brand new.

        Q: What is the return policy?
        A: Returns are accepted within 14 days of delivery.

        Q: How is this item shipped?
        A: Every order ships free, fully insured, with signature required on delivery.
        ");
        Ok(())
    }

    #[test]
    fn test_zero_day_window_is_final_sale() -> anyhow::Result<()> {
        let mut config = FeedConfig::default();
        config.return_windows.jewelry = 0;
        let row = RawRecord::from_pairs([("id", "ns-j-1")]);
        let fields = synthesize(&row, 100.0, "USD", &config)?;
        assert!(fields.qa.render().contains("final sale"));
        Ok(())
    }
}
