//! Intake aggregation and classification
//!
//! Folds a product list into per-nutrient daily totals, records which products
//! contributed, and classifies each total against the threshold table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::intake::{DosageThresholds, IntakeError, IntakeResult, ThresholdTable};
use crate::models::{Nutrient, NutrientGroup, NutrientUnit, Product, Stage};

/// Classification of a daily total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    /// total < recommended
    BelowRecommended,
    /// recommended <= total < aggressive
    WithinRecommendedRange,
    /// aggressive <= total < upper
    WithinAggressiveRange,
    /// total >= upper
    AboveUpper,
    /// total >= aggressive and the nutrient has no upper limit
    AboveAggressiveUnbounded,
}

impl Band {
    pub fn as_str(&self) -> &'static str {
        match self {
            Band::BelowRecommended => "below_recommended",
            Band::WithinRecommendedRange => "within_recommended_range",
            Band::WithinAggressiveRange => "within_aggressive_range",
            Band::AboveUpper => "above_upper",
            Band::AboveAggressiveUnbounded => "above_aggressive_unbounded",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Band::BelowRecommended => "Below recommended",
            Band::WithinRecommendedRange => "Recommended range",
            Band::WithinAggressiveRange => "Aggressive range",
            Band::AboveUpper => "Above upper limit",
            Band::AboveAggressiveUnbounded => "Aggressive (no upper limit)",
        }
    }

    /// False for the two bands the user should act on
    pub fn is_acceptable(&self) -> bool {
        !matches!(self, Band::BelowRecommended | Band::AboveUpper)
    }
}

/// Classify a daily total
///
/// Every crossing is strict-less-than, so a total equal to a threshold lands
/// in the band above it.
pub fn classify(total: f64, thresholds: &DosageThresholds) -> Band {
    if total < thresholds.recommended {
        return Band::BelowRecommended;
    }
    if total < thresholds.aggressive {
        return Band::WithinRecommendedRange;
    }
    match thresholds.upper {
        Some(upper) if total < upper => Band::WithinAggressiveRange,
        Some(_) => Band::AboveUpper,
        None => Band::AboveAggressiveUnbounded,
    }
}

/// One product's share of a nutrient total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceContribution {
    pub product_id: i64,
    pub product_name: String,
    pub dose: f64,
}

/// Assessment of a single nutrient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutrientIntake {
    pub nutrient: Nutrient,
    pub unit: NutrientUnit,
    pub total: f64,
    /// Products with a strictly positive dose, in product-list order
    pub sources: Vec<SourceContribution>,
    pub band: Band,
    pub thresholds: DosageThresholds,
}

/// Full assessment, split into the two display groups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntakeReport {
    pub stage: Option<Stage>,
    pub core: Vec<NutrientIntake>,
    pub supplementary: Vec<NutrientIntake>,
}

impl IntakeReport {
    /// Entries of one display group
    pub fn group(&self, group: NutrientGroup) -> &[NutrientIntake] {
        match group {
            NutrientGroup::Core => &self.core,
            NutrientGroup::Supplementary => &self.supplementary,
        }
    }

    pub fn get(&self, nutrient: Nutrient) -> Option<&NutrientIntake> {
        self.group(nutrient.group())
            .iter()
            .find(|entry| entry.nutrient == nutrient)
    }

    /// Core entries followed by supplementary entries
    pub fn iter(&self) -> impl Iterator<Item = &NutrientIntake> {
        self.core.iter().chain(self.supplementary.iter())
    }

    pub fn by_nutrient(&self) -> BTreeMap<Nutrient, &NutrientIntake> {
        self.iter().map(|entry| (entry.nutrient, entry)).collect()
    }

    /// Entries whose band is not acceptable
    pub fn needs_attention(&self) -> Vec<&NutrientIntake> {
        self.iter().filter(|entry| !entry.band.is_acceptable()).collect()
    }
}

/// Evaluate a product list against a threshold table
///
/// Every product is validated before anything is summed; one bad product
/// fails the whole call. Inputs are only read.
pub fn evaluate(products: &[Product], thresholds: &ThresholdTable) -> IntakeResult<IntakeReport> {
    for product in products {
        if let Err(e) = product.validate() {
            tracing::warn!(product_id = product.id, "Rejected product during evaluation: {}", e);
            return Err(e);
        }
    }

    let assess = |nutrient: Nutrient| -> IntakeResult<NutrientIntake> {
        let sources: Vec<SourceContribution> = products
            .iter()
            .filter_map(|p| {
                let dose = p.dose(nutrient);
                (dose > 0.0).then(|| SourceContribution {
                    product_id: p.id,
                    product_name: p.name.clone(),
                    dose,
                })
            })
            .collect();
        // Zero doses add nothing, so the sum over sources is the full total
        let total = sources.iter().fold(0.0, |acc, s| acc + s.dose);
        if !total.is_finite() {
            let names: Vec<&str> = sources.iter().map(|s| s.product_name.as_str()).collect();
            let e = IntakeError::InvalidDose {
                product: names.join(", "),
                detail: format!("combined {} total overflows", nutrient.label()),
            };
            tracing::warn!("Rejected product list during evaluation: {}", e);
            return Err(e);
        }
        let limits = thresholds.get(nutrient);

        Ok(NutrientIntake {
            nutrient,
            unit: nutrient.unit(),
            total,
            sources,
            band: classify(total, &limits),
            thresholds: limits,
        })
    };

    let report = IntakeReport {
        stage: thresholds.stage(),
        core: Nutrient::CORE
            .iter()
            .copied()
            .map(&assess)
            .collect::<IntakeResult<_>>()?,
        supplementary: Nutrient::SUPPLEMENTARY
            .iter()
            .copied()
            .map(&assess)
            .collect::<IntakeResult<_>>()?,
    };

    tracing::debug!(
        products = products.len(),
        flagged = report.needs_attention().len(),
        "Evaluated intake"
    );

    Ok(report)
}
