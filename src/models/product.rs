//! Supplement product model
//!
//! A user-entered supplement: a per-unit nutrient profile taken `count` times a day.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::intake::{IntakeError, IntakeResult};
use crate::models::Nutrient;

/// A supplement product
///
/// `id` is assigned once at creation and never reused, so it stays attached
/// to the same product when earlier entries are deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    /// Amount per unit, keyed by nutrient; missing entries count as 0
    pub ingredients: BTreeMap<Nutrient, f64>,
    /// Units taken per day
    pub count: u32,
}

/// Data for creating a new product
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductCreate {
    /// Defaults to a positional label ("Product N")
    pub name: Option<String>,
    pub ingredients: BTreeMap<Nutrient, f64>,
    /// Defaults to 1
    pub count: Option<u32>,
}

/// Field-level edit of a product; unset fields are left alone
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    /// Only the listed nutrients are overwritten
    pub ingredients: BTreeMap<Nutrient, f64>,
    pub count: Option<u32>,
}

impl Product {
    /// Create an empty product with every nutrient at 0
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ingredients: Nutrient::ALL.iter().map(|n| (*n, 0.0)).collect(),
            count: 1,
        }
    }

    /// Per-unit amount of a nutrient
    pub fn amount(&self, nutrient: Nutrient) -> f64 {
        self.ingredients.get(&nutrient).copied().unwrap_or(0.0)
    }

    /// Daily dose of a nutrient from this product
    pub fn dose(&self, nutrient: Nutrient) -> f64 {
        self.amount(nutrient) * f64::from(self.count)
    }

    /// Check every amount and the daily count
    pub fn validate(&self) -> IntakeResult<()> {
        validate_count(&self.name, self.count)?;
        for (nutrient, amount) in &self.ingredients {
            validate_amount(&self.name, *nutrient, *amount)?;
            let dose = self.dose(*nutrient);
            if !dose.is_finite() {
                return Err(IntakeError::InvalidDose {
                    product: self.name.clone(),
                    detail: format!(
                        "{} daily dose overflows ({} x {})",
                        nutrient.label(),
                        amount,
                        self.count
                    ),
                });
            }
        }
        Ok(())
    }

    /// Apply an edit, all-or-nothing
    ///
    /// A blank name keeps the current one.
    pub fn apply(&mut self, update: &ProductUpdate) -> IntakeResult<()> {
        let mut edited = self.clone();
        if let Some(name) = update.name.as_ref().filter(|n| !n.trim().is_empty()) {
            edited.name = name.clone();
        }
        if let Some(count) = update.count {
            edited.count = count;
        }
        for (nutrient, amount) in &update.ingredients {
            edited.ingredients.insert(*nutrient, *amount);
        }
        edited.validate()?;
        *self = edited;
        Ok(())
    }
}

/// Reject negative or non-finite amounts
pub fn validate_amount(product: &str, nutrient: Nutrient, amount: f64) -> IntakeResult<()> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(IntakeError::InvalidDose {
            product: product.to_string(),
            detail: format!("{} amount must be a non-negative number, got {}", nutrient.label(), amount),
        });
    }
    Ok(())
}

/// Reject a zero daily count
pub fn validate_count(product: &str, count: u32) -> IntakeResult<()> {
    if count == 0 {
        return Err(IntakeError::InvalidDose {
            product: product.to_string(),
            detail: "daily count must be at least 1".to_string(),
        });
    }
    Ok(())
}

/// Convert a signed count from the outside world into a daily count
pub fn parse_count(product: &str, count: i64) -> IntakeResult<u32> {
    if count <= 0 {
        return Err(IntakeError::InvalidDose {
            product: product.to_string(),
            detail: format!("daily count must be at least 1, got {}", count),
        });
    }
    u32::try_from(count).map_err(|_| IntakeError::InvalidDose {
        product: product.to_string(),
        detail: format!("daily count {} is too large", count),
    })
}

/// Parse an ingredient map keyed by nutrient name
pub fn parse_ingredients(
    product: &str,
    raw: &HashMap<String, f64>,
) -> IntakeResult<BTreeMap<Nutrient, f64>> {
    let mut ingredients = BTreeMap::new();
    for (key, amount) in raw {
        let nutrient = Nutrient::from_key(key)?;
        validate_amount(product, nutrient, *amount)?;
        ingredients.insert(nutrient, *amount);
    }
    Ok(ingredients)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_product_has_every_nutrient_at_zero() {
        let p = Product::new(1, "Product 1");
        assert_eq!(p.ingredients.len(), Nutrient::COUNT);
        assert!(p.ingredients.values().all(|v| *v == 0.0));
        assert_eq!(p.count, 1);
    }

    #[test]
    fn test_dose_scales_by_count() {
        let mut p = Product::new(1, "Cal-Mag");
        p.ingredients.insert(Nutrient::Calcium, 600.0);
        p.count = 2;
        assert!((p.dose(Nutrient::Calcium) - 1200.0).abs() < 0.001);
        assert_eq!(p.dose(Nutrient::Iron), 0.0);
    }

    #[test]
    fn test_amount_defaults_to_zero_when_missing() {
        let mut p = Product::new(1, "Sparse");
        p.ingredients.clear();
        assert_eq!(p.amount(Nutrient::Folate), 0.0);
    }

    #[test]
    fn test_validate_rejects_negative_amount() {
        let mut p = Product::new(1, "Bad");
        p.ingredients.insert(Nutrient::Zinc, -1.0);
        assert!(matches!(p.validate(), Err(IntakeError::InvalidDose { .. })));
    }

    #[test]
    fn test_validate_rejects_nan_and_zero_count() {
        let mut p = Product::new(1, "Bad");
        p.ingredients.insert(Nutrient::Zinc, f64::NAN);
        assert!(p.validate().is_err());

        let mut p = Product::new(2, "Also bad");
        p.count = 0;
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_apply_is_all_or_nothing() {
        let mut p = Product::new(1, "Prenatal");
        p.ingredients.insert(Nutrient::Iron, 27.0);
        let before = p.clone();

        let mut update = ProductUpdate {
            name: Some("Renamed".to_string()),
            ..Default::default()
        };
        update.ingredients.insert(Nutrient::Iodine, -150.0);
        assert!(p.apply(&update).is_err());
        assert_eq!(p, before);

        update.ingredients.insert(Nutrient::Iodine, 150.0);
        p.apply(&update).unwrap();
        assert_eq!(p.name, "Renamed");
        assert_eq!(p.amount(Nutrient::Iodine), 150.0);
        assert_eq!(p.amount(Nutrient::Iron), 27.0);
    }

    #[test]
    fn test_validate_rejects_overflowing_dose() {
        let mut p = Product::new(1, "Huge");
        p.ingredients.insert(Nutrient::Calcium, 1e308);
        assert!(p.validate().is_ok());

        p.count = 2;
        assert!(matches!(p.validate(), Err(IntakeError::InvalidDose { .. })));
    }

    #[test]
    fn test_apply_keeps_name_when_blank() {
        let mut p = Product::new(1, "Prenatal");
        let update = ProductUpdate {
            name: Some("   ".to_string()),
            count: Some(2),
            ..Default::default()
        };
        p.apply(&update).unwrap();
        assert_eq!(p.name, "Prenatal");
        assert_eq!(p.count, 2);
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("p", 3).unwrap(), 3);
        assert!(parse_count("p", 0).is_err());
        assert!(parse_count("p", -2).is_err());
    }

    #[test]
    fn test_parse_ingredients() {
        let mut raw = HashMap::new();
        raw.insert("calcium".to_string(), 500.0);
        raw.insert("Vitamin D".to_string(), 1000.0);
        let parsed = parse_ingredients("p", &raw).unwrap();
        assert_eq!(parsed.get(&Nutrient::Calcium), Some(&500.0));
        assert_eq!(parsed.get(&Nutrient::VitaminD), Some(&1000.0));

        raw.insert("unobtainium".to_string(), 1.0);
        assert!(matches!(
            parse_ingredients("p", &raw),
            Err(IntakeError::UnknownNutrient(_))
        ));
    }
}
