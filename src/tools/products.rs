//! Product MCP Tools
//!
//! Tools for editing the session's supplement product list.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::models::{parse_count, parse_ingredients, Nutrient, Product, ProductCreate, ProductUpdate};
use crate::session::Session;

/// Response for add_product
#[derive(Debug, Serialize)]
pub struct AddProductResponse {
    pub id: i64,
    pub name: String,
    pub position: usize,
    pub count: u32,
    pub total_products: usize,
}

/// Product summary for listing
#[derive(Debug, Serialize)]
pub struct ProductSummary {
    pub id: i64,
    pub position: usize,
    pub name: String,
    pub count: u32,
    /// Nutrients with a non-zero amount
    pub nutrients: Vec<&'static str>,
}

impl ProductSummary {
    fn from_product(product: &Product, position: usize) -> Self {
        Self {
            id: product.id,
            position,
            name: product.name.clone(),
            count: product.count,
            nutrients: product
                .ingredients
                .iter()
                .filter(|(_, amount)| **amount > 0.0)
                .map(|(n, _)| n.key())
                .collect(),
        }
    }
}

/// Full product detail
#[derive(Debug, Serialize)]
pub struct ProductDetail {
    pub id: i64,
    pub position: usize,
    pub name: String,
    pub count: u32,
    /// Amount per unit
    pub ingredients: BTreeMap<Nutrient, f64>,
    /// Amount per unit times count
    pub daily_doses: BTreeMap<Nutrient, f64>,
}

impl ProductDetail {
    fn from_product(product: &Product, position: usize) -> Self {
        Self {
            id: product.id,
            position,
            name: product.name.clone(),
            count: product.count,
            ingredients: product.ingredients.clone(),
            daily_doses: Nutrient::ALL
                .iter()
                .map(|n| (*n, product.dose(*n)))
                .collect(),
        }
    }
}

/// Response for list_products
#[derive(Debug, Serialize)]
pub struct ListProductsResponse {
    pub products: Vec<ProductSummary>,
    pub total: usize,
}

/// Response for delete_product
#[derive(Debug, Serialize)]
pub struct DeleteProductResponse {
    pub success: bool,
    pub deleted_id: i64,
    pub deleted_name: String,
    pub remaining: usize,
}

// ============================================================================
// Tool Functions
// ============================================================================

/// Add a product to the end of the list
pub fn add_product(
    session: &mut Session,
    name: Option<String>,
    ingredients: &HashMap<String, f64>,
    count: Option<i64>,
) -> Result<AddProductResponse, String> {
    let label = name
        .clone()
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| format!("Product {}", session.products.count() + 1));
    let ingredients = parse_ingredients(&label, ingredients).map_err(|e| e.to_string())?;
    let count = count
        .map(|c| parse_count(&label, c))
        .transpose()
        .map_err(|e| e.to_string())?;

    let data = ProductCreate {
        name,
        ingredients,
        count,
    };

    let product = session
        .products
        .create(data)
        .map_err(|e| format!("Failed to add product: {}", e))?
        .clone();
    let total_products = session.products.count();

    Ok(AddProductResponse {
        id: product.id,
        name: product.name,
        position: total_products - 1,
        count: product.count,
        total_products,
    })
}

/// List products in order
pub fn list_products(session: &Session) -> ListProductsResponse {
    let products: Vec<ProductSummary> = session
        .products
        .list()
        .iter()
        .enumerate()
        .map(|(i, p)| ProductSummary::from_product(p, i))
        .collect();
    let total = products.len();

    ListProductsResponse { products, total }
}

/// Get a product by ID
pub fn get_product(session: &Session, id: i64) -> Option<ProductDetail> {
    let position = session.products.position_of(id)?;
    session
        .products
        .get_by_id(id)
        .map(|p| ProductDetail::from_product(p, position))
}

/// Edit a product's name, amounts or count
pub fn update_product(
    session: &mut Session,
    id: i64,
    name: Option<String>,
    ingredients: Option<&HashMap<String, f64>>,
    count: Option<i64>,
) -> Result<Option<ProductDetail>, String> {
    let Some(existing) = session.products.get_by_id(id) else {
        return Ok(None);
    };
    let label = existing.name.clone();

    let ingredients = match ingredients {
        Some(raw) => parse_ingredients(&label, raw).map_err(|e| e.to_string())?,
        None => BTreeMap::new(),
    };
    let count = count
        .map(|c| parse_count(&label, c))
        .transpose()
        .map_err(|e| e.to_string())?;

    let data = ProductUpdate {
        name,
        ingredients,
        count,
    };

    session
        .products
        .update(id, &data)
        .map_err(|e| format!("Failed to update product: {}", e))?;

    Ok(get_product(session, id))
}

/// Delete a product by ID
pub fn delete_product(session: &mut Session, id: i64) -> Result<DeleteProductResponse, String> {
    let removed = session
        .products
        .delete(id)
        .ok_or_else(|| format!("Product not found with id: {}", id))?;

    Ok(DeleteProductResponse {
        success: true,
        deleted_id: removed.id,
        deleted_name: removed.name,
        remaining: session.products.count(),
    })
}
