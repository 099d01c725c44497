//! Data models
//!
//! Plain types shared by the intake core, the session and the MCP tools.

mod nutrient;
mod product;
mod stage;

pub use nutrient::{Nutrient, NutrientGroup, NutrientUnit};
pub use product::{
    parse_count, parse_ingredients, validate_amount, validate_count, Product, ProductCreate,
    ProductUpdate,
};
pub use stage::Stage;
