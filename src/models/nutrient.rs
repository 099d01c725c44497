//! Nutrient model
//!
//! The closed set of nutrients tracked by the assessor, each with a fixed unit.

use serde::{Deserialize, Serialize};

use crate::intake::{IntakeError, IntakeResult};

/// Unit of measure a nutrient is always expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NutrientUnit {
    #[serde(rename = "mg")]
    Mg,
    #[serde(rename = "mcg")]
    Mcg,
    #[serde(rename = "IU")]
    Iu,
}

impl NutrientUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            NutrientUnit::Mg => "mg",
            NutrientUnit::Mcg => "mcg",
            NutrientUnit::Iu => "IU",
        }
    }
}

/// Presentation grouping of nutrients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NutrientGroup {
    /// Strongly recommended during pregnancy
    Core,
    /// Worth topping up, lower priority
    Supplementary,
}

impl NutrientGroup {
    pub fn display_name(&self) -> &'static str {
        match self {
            NutrientGroup::Core => "Core nutrients (strongly recommended)",
            NutrientGroup::Supplementary => "Supplementary nutrients (nice to have)",
        }
    }
}

/// A tracked nutrient
///
/// Declaration order is the canonical order used for tables and iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Nutrient {
    Calcium,
    Iron,
    Magnesium,
    Zinc,
    Iodine,
    VitaminA,
    VitaminD,
    VitaminE,
    VitaminC,
    Choline,
    VitaminB6,
    VitaminB12,
    Folate,
    #[serde(rename = "omega_3")]
    Omega3,
}

impl Nutrient {
    /// Number of tracked nutrients
    pub const COUNT: usize = 14;

    /// Every nutrient in canonical order
    pub const ALL: [Nutrient; Nutrient::COUNT] = [
        Nutrient::Calcium,
        Nutrient::Iron,
        Nutrient::Magnesium,
        Nutrient::Zinc,
        Nutrient::Iodine,
        Nutrient::VitaminA,
        Nutrient::VitaminD,
        Nutrient::VitaminE,
        Nutrient::VitaminC,
        Nutrient::Choline,
        Nutrient::VitaminB6,
        Nutrient::VitaminB12,
        Nutrient::Folate,
        Nutrient::Omega3,
    ];

    pub const CORE: [Nutrient; 6] = [
        Nutrient::Calcium,
        Nutrient::Iron,
        Nutrient::Iodine,
        Nutrient::VitaminD,
        Nutrient::Folate,
        Nutrient::Omega3,
    ];

    pub const SUPPLEMENTARY: [Nutrient; 8] = [
        Nutrient::Magnesium,
        Nutrient::Zinc,
        Nutrient::VitaminA,
        Nutrient::VitaminE,
        Nutrient::VitaminC,
        Nutrient::Choline,
        Nutrient::VitaminB6,
        Nutrient::VitaminB12,
    ];

    /// Position in `Nutrient::ALL`
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Stable key used in tool parameters and JSON files
    pub fn key(&self) -> &'static str {
        match self {
            Nutrient::Calcium => "calcium",
            Nutrient::Iron => "iron",
            Nutrient::Magnesium => "magnesium",
            Nutrient::Zinc => "zinc",
            Nutrient::Iodine => "iodine",
            Nutrient::VitaminA => "vitamin_a",
            Nutrient::VitaminD => "vitamin_d",
            Nutrient::VitaminE => "vitamin_e",
            Nutrient::VitaminC => "vitamin_c",
            Nutrient::Choline => "choline",
            Nutrient::VitaminB6 => "vitamin_b6",
            Nutrient::VitaminB12 => "vitamin_b12",
            Nutrient::Folate => "folate",
            Nutrient::Omega3 => "omega_3",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Nutrient::Calcium => "Calcium",
            Nutrient::Iron => "Iron",
            Nutrient::Magnesium => "Magnesium",
            Nutrient::Zinc => "Zinc",
            Nutrient::Iodine => "Iodine",
            Nutrient::VitaminA => "Vitamin A",
            Nutrient::VitaminD => "Vitamin D",
            Nutrient::VitaminE => "Vitamin E",
            Nutrient::VitaminC => "Vitamin C",
            Nutrient::Choline => "Choline",
            Nutrient::VitaminB6 => "Vitamin B6",
            Nutrient::VitaminB12 => "Vitamin B12",
            Nutrient::Folate => "Folate",
            Nutrient::Omega3 => "Omega-3",
        }
    }

    pub fn unit(&self) -> NutrientUnit {
        match self {
            Nutrient::Iodine | Nutrient::Folate => NutrientUnit::Mcg,
            Nutrient::VitaminA | Nutrient::VitaminD | Nutrient::VitaminE => NutrientUnit::Iu,
            // B12 is tabulated in mg like the other B vitamins
            _ => NutrientUnit::Mg,
        }
    }

    pub fn group(&self) -> NutrientGroup {
        if Nutrient::CORE.contains(self) {
            NutrientGroup::Core
        } else {
            NutrientGroup::Supplementary
        }
    }

    /// Label with unit, e.g. "Iodine (mcg)"
    pub fn label(&self) -> String {
        format!("{} ({})", self.display_name(), self.unit().as_str())
    }

    /// Parse a nutrient key
    ///
    /// Case-insensitive; spaces and dashes are treated as underscores.
    pub fn from_key(s: &str) -> IntakeResult<Self> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        let nutrient = match normalized.as_str() {
            "calcium" | "ca" => Nutrient::Calcium,
            "iron" | "fe" => Nutrient::Iron,
            "magnesium" => Nutrient::Magnesium,
            "zinc" | "zn" => Nutrient::Zinc,
            "iodine" => Nutrient::Iodine,
            "vitamin_a" | "vit_a" => Nutrient::VitaminA,
            "vitamin_d" | "vit_d" | "vitamin_d3" => Nutrient::VitaminD,
            "vitamin_e" | "vit_e" => Nutrient::VitaminE,
            "vitamin_c" | "vit_c" => Nutrient::VitaminC,
            "choline" => Nutrient::Choline,
            "vitamin_b6" | "vit_b6" | "b6" => Nutrient::VitaminB6,
            "vitamin_b12" | "vit_b12" | "b12" => Nutrient::VitaminB12,
            "folate" | "folic_acid" => Nutrient::Folate,
            "omega_3" | "omega3" | "dha" => Nutrient::Omega3,
            _ => return Err(IntakeError::UnknownNutrient(s.to_string())),
        };
        Ok(nutrient)
    }
}

impl std::fmt::Display for Nutrient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_in_index_order() {
        for (i, n) in Nutrient::ALL.iter().enumerate() {
            assert_eq!(n.index(), i);
        }
    }

    #[test]
    fn test_groups_partition_all_nutrients() {
        let mut seen: Vec<Nutrient> = Nutrient::CORE
            .iter()
            .chain(Nutrient::SUPPLEMENTARY.iter())
            .copied()
            .collect();
        seen.sort();
        assert_eq!(seen, Nutrient::ALL.to_vec());

        for n in Nutrient::CORE {
            assert_eq!(n.group(), NutrientGroup::Core);
        }
        for n in Nutrient::SUPPLEMENTARY {
            assert_eq!(n.group(), NutrientGroup::Supplementary);
        }
    }

    #[test]
    fn test_units() {
        assert_eq!(Nutrient::Calcium.unit(), NutrientUnit::Mg);
        assert_eq!(Nutrient::Iodine.unit(), NutrientUnit::Mcg);
        assert_eq!(Nutrient::Folate.unit(), NutrientUnit::Mcg);
        assert_eq!(Nutrient::VitaminD.unit(), NutrientUnit::Iu);
        assert_eq!(Nutrient::VitaminB12.unit(), NutrientUnit::Mg);
        assert_eq!(Nutrient::Iodine.label(), "Iodine (mcg)");
    }

    #[test]
    fn test_from_key_round_trips_keys() {
        for n in Nutrient::ALL {
            assert_eq!(Nutrient::from_key(n.key()).unwrap(), n);
        }
    }

    #[test]
    fn test_from_key_aliases() {
        assert_eq!(Nutrient::from_key("Vitamin D").unwrap(), Nutrient::VitaminD);
        assert_eq!(Nutrient::from_key("omega-3").unwrap(), Nutrient::Omega3);
        assert_eq!(Nutrient::from_key(" B12 ").unwrap(), Nutrient::VitaminB12);
        assert_eq!(Nutrient::from_key("folic acid").unwrap(), Nutrient::Folate);
    }

    #[test]
    fn test_from_key_unknown() {
        let err = Nutrient::from_key("selenium").unwrap_err();
        assert_eq!(err, IntakeError::UnknownNutrient("selenium".to_string()));
    }

    #[test]
    fn test_serde_key_matches_key() {
        for n in Nutrient::ALL {
            let json = serde_json::to_string(&n).unwrap();
            assert_eq!(json, format!("\"{}\"", n.key()));
        }
    }
}
