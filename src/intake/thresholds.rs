//! Dosage threshold table
//!
//! Per-nutrient (recommended, aggressive, upper) triples for daily supplement
//! intake during pregnancy, with the iron and choline targets depending on the
//! selected stage.

use serde::{Deserialize, Serialize};

use crate::intake::IntakeResult;
use crate::models::{Nutrient, Stage};

/// Threshold triple for one nutrient, in the nutrient's own unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DosageThresholds {
    /// Minimum adequate daily intake
    pub recommended: f64,
    /// Target for aggressive supplementation
    pub aggressive: f64,
    /// Safe upper limit; `None` means no ceiling
    pub upper: Option<f64>,
}

impl DosageThresholds {
    pub const fn bounded(recommended: f64, aggressive: f64, upper: f64) -> Self {
        Self {
            recommended,
            aggressive,
            upper: Some(upper),
        }
    }

    pub const fn unbounded(recommended: f64, aggressive: f64) -> Self {
        Self {
            recommended,
            aggressive,
            upper: None,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.upper.is_none()
    }

    /// recommended <= aggressive <= upper
    pub fn is_ordered(&self) -> bool {
        self.recommended <= self.aggressive
            && self.upper.map_or(true, |upper| self.aggressive <= upper)
    }
}

/// Reference table, indexed by `Nutrient::index`
const REFERENCE: [DosageThresholds; Nutrient::COUNT] = [
    DosageThresholds::bounded(500.0, 1500.0, 2500.0), // calcium
    DosageThresholds::bounded(0.0, 40.0, 40.0),       // iron
    DosageThresholds::bounded(75.0, 350.0, 350.0),    // magnesium
    DosageThresholds::bounded(5.0, 15.0, 35.0),       // zinc
    DosageThresholds::bounded(25.0, 150.0, 1000.0),   // iodine
    DosageThresholds::bounded(0.0, 1200.0, 5000.0),   // vitamin A
    DosageThresholds::bounded(400.0, 2000.0, 4000.0), // vitamin D
    DosageThresholds::bounded(0.0, 20.0, 400.0),      // vitamin E
    DosageThresholds::bounded(0.0, 200.0, 2000.0),    // vitamin C
    DosageThresholds::bounded(150.0, 600.0, 7500.0),  // choline
    DosageThresholds::bounded(0.0, 10.0, 100.0),      // vitamin B6
    DosageThresholds::unbounded(0.0, 25.0),           // vitamin B12
    DosageThresholds::bounded(400.0, 600.0, 1000.0),  // folate
    DosageThresholds::bounded(200.0, 1000.0, 2000.0), // omega-3
];

/// Stage-specific (nutrient, recommended, aggressive) overrides
fn stage_overrides(stage: Stage) -> [(Nutrient, f64, f64); 2] {
    match stage {
        Stage::EarlyMid => [(Nutrient::Iron, 0.0, 15.0), (Nutrient::Choline, 150.0, 350.0)],
        Stage::Late => [(Nutrient::Iron, 30.0, 40.0), (Nutrient::Choline, 150.0, 600.0)],
    }
}

/// Immutable snapshot of thresholds for every nutrient
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdTable {
    stage: Option<Stage>,
    entries: [DosageThresholds; Nutrient::COUNT],
}

impl ThresholdTable {
    /// Constructed defaults, no stage applied
    pub fn reference() -> Self {
        Self {
            stage: None,
            entries: REFERENCE,
        }
    }

    /// Reference table with the stage overrides applied
    pub fn for_stage(stage: Stage) -> Self {
        Self::reference().apply_stage(stage)
    }

    /// Return a copy with iron and choline set for `stage`
    ///
    /// Overrides replace, never accumulate: applying a second stage leaves no
    /// trace of the first. Upper limits are never touched.
    pub fn apply_stage(&self, stage: Stage) -> Self {
        let mut entries = self.entries;
        for (nutrient, recommended, aggressive) in stage_overrides(stage) {
            let entry = &mut entries[nutrient.index()];
            entry.recommended = recommended;
            entry.aggressive = aggressive;
        }
        tracing::debug!(stage = stage.as_str(), "Applied stage thresholds");
        Self {
            stage: Some(stage),
            entries,
        }
    }

    /// Stage the table was built for, if any
    pub fn stage(&self) -> Option<Stage> {
        self.stage
    }

    pub fn get(&self, nutrient: Nutrient) -> DosageThresholds {
        self.entries[nutrient.index()]
    }

    /// Look up thresholds by nutrient key
    pub fn lookup(&self, key: &str) -> IntakeResult<DosageThresholds> {
        Ok(self.get(Nutrient::from_key(key)?))
    }

    /// All entries in canonical nutrient order
    pub fn iter(&self) -> impl Iterator<Item = (Nutrient, DosageThresholds)> + '_ {
        Nutrient::ALL.iter().map(move |n| (*n, self.get(*n)))
    }

    /// True if every entry satisfies recommended <= aggressive <= upper
    pub fn is_consistent(&self) -> bool {
        self.entries.iter().all(DosageThresholds::is_ordered)
    }
}

impl Default for ThresholdTable {
    fn default() -> Self {
        Self::reference()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intake::IntakeError;

    #[test]
    fn test_reference_values() {
        let table = ThresholdTable::reference();
        assert_eq!(table.get(Nutrient::Calcium), DosageThresholds::bounded(500.0, 1500.0, 2500.0));
        assert_eq!(table.get(Nutrient::Folate), DosageThresholds::bounded(400.0, 600.0, 1000.0));
        assert!(table.get(Nutrient::VitaminB12).is_unbounded());
        assert_eq!(table.stage(), None);
    }

    #[test]
    fn test_only_b12_is_unbounded() {
        let unbounded: Vec<Nutrient> = ThresholdTable::reference()
            .iter()
            .filter(|(_, t)| t.is_unbounded())
            .map(|(n, _)| n)
            .collect();
        assert_eq!(unbounded, vec![Nutrient::VitaminB12]);
    }

    #[test]
    fn test_every_table_is_consistent() {
        assert!(ThresholdTable::reference().is_consistent());
        assert!(ThresholdTable::for_stage(Stage::EarlyMid).is_consistent());
        assert!(ThresholdTable::for_stage(Stage::Late).is_consistent());
    }

    #[test]
    fn test_early_mid_overrides() {
        let table = ThresholdTable::for_stage(Stage::EarlyMid);
        assert_eq!(table.get(Nutrient::Iron), DosageThresholds::bounded(0.0, 15.0, 40.0));
        assert_eq!(table.get(Nutrient::Choline), DosageThresholds::bounded(150.0, 350.0, 7500.0));
        assert_eq!(table.stage(), Some(Stage::EarlyMid));
    }

    #[test]
    fn test_late_overrides() {
        let table = ThresholdTable::for_stage(Stage::Late);
        assert_eq!(table.get(Nutrient::Iron), DosageThresholds::bounded(30.0, 40.0, 40.0));
        assert_eq!(table.get(Nutrient::Choline), DosageThresholds::bounded(150.0, 600.0, 7500.0));
    }

    #[test]
    fn test_apply_stage_is_idempotent() {
        let once = ThresholdTable::reference().apply_stage(Stage::EarlyMid);
        let twice = once.apply_stage(Stage::EarlyMid);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_apply_stage_replaces_previous_stage() {
        let reference = ThresholdTable::reference();
        let switched = reference.apply_stage(Stage::EarlyMid).apply_stage(Stage::Late);
        assert_eq!(switched, ThresholdTable::for_stage(Stage::Late));

        for (nutrient, thresholds) in switched.iter() {
            if nutrient != Nutrient::Iron && nutrient != Nutrient::Choline {
                assert_eq!(thresholds, reference.get(nutrient));
            }
        }
    }

    #[test]
    fn test_apply_stage_leaves_receiver_untouched() {
        let reference = ThresholdTable::reference();
        let _early = reference.apply_stage(Stage::EarlyMid);
        assert_eq!(reference, ThresholdTable::reference());
    }

    #[test]
    fn test_lookup_by_key() {
        let table = ThresholdTable::reference();
        assert_eq!(table.lookup("zinc").unwrap().aggressive, 15.0);
        assert!(matches!(
            table.lookup("selenium"),
            Err(IntakeError::UnknownNutrient(_))
        ));
    }
}
