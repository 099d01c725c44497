//! Session state
//!
//! The product list and stage selection for one user, owned by the caller and
//! passed into the pure intake functions.

use crate::intake::{evaluate, IntakeReport, IntakeResult, ThresholdTable};
use crate::models::{validate_count, Product, ProductCreate, ProductUpdate, Stage};

/// Ordered list of products with stable ids
#[derive(Debug, Clone, Default)]
pub struct ProductList {
    products: Vec<Product>,
    next_id: i64,
}

impl ProductList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new product
    pub fn create(&mut self, data: ProductCreate) -> IntakeResult<&Product> {
        let name = data
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| format!("Product {}", self.products.len() + 1));

        let mut product = Product::new(self.next_id + 1, name);
        if let Some(count) = data.count {
            validate_count(&product.name, count)?;
            product.count = count;
        }
        product.ingredients.extend(data.ingredients);
        product.validate()?;

        self.next_id += 1;
        tracing::info!(product_id = product.id, name = %product.name, "Added product");
        self.products.push(product);
        Ok(&self.products[self.products.len() - 1])
    }

    pub fn get_by_id(&self, id: i64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Current list position of a product
    pub fn position_of(&self, id: i64) -> Option<usize> {
        self.products.iter().position(|p| p.id == id)
    }

    pub fn list(&self) -> &[Product] {
        &self.products
    }

    /// Apply a field-level edit; the product is unchanged on error
    pub fn update(&mut self, id: i64, data: &ProductUpdate) -> IntakeResult<Option<&Product>> {
        let Some(product) = self.products.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        if let Err(e) = product.apply(data) {
            tracing::warn!(product_id = id, "Rejected product edit: {}", e);
            return Err(e);
        }
        tracing::info!(product_id = id, "Updated product");
        Ok(Some(&*product))
    }

    /// Remove a product by id; later products keep their ids
    pub fn delete(&mut self, id: i64) -> Option<Product> {
        let index = self.position_of(id)?;
        let removed = self.products.remove(index);
        tracing::info!(product_id = id, name = %removed.name, "Deleted product");
        Some(removed)
    }

    pub fn count(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// One user's products and stage selection
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub products: ProductList,
    stage: Stage,
}

impl Session {
    pub fn new(stage: Stage) -> Self {
        Self {
            products: ProductList::new(),
            stage,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn select_stage(&mut self, stage: Stage) {
        if stage != self.stage {
            tracing::info!(from = self.stage.as_str(), to = stage.as_str(), "Stage changed");
        }
        self.stage = stage;
    }

    /// Fresh threshold snapshot for the selected stage
    pub fn thresholds(&self) -> ThresholdTable {
        ThresholdTable::for_stage(self.stage)
    }

    pub fn evaluate(&self) -> IntakeResult<IntakeReport> {
        evaluate(self.products.list(), &self.thresholds())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intake::{Band, IntakeError};
    use crate::models::Nutrient;

    fn create_named(list: &mut ProductList, name: &str) -> i64 {
        list.create(ProductCreate {
            name: Some(name.to_string()),
            ..Default::default()
        })
        .unwrap()
        .id
    }

    #[test]
    fn test_create_uses_positional_default_name() {
        let mut list = ProductList::new();
        let first = list.create(ProductCreate::default()).unwrap().clone();
        let second = list.create(ProductCreate::default()).unwrap().clone();
        assert_eq!(first.name, "Product 1");
        assert_eq!(second.name, "Product 2");
        assert_eq!(first.count, 1);
        assert_eq!(first.ingredients.len(), Nutrient::COUNT);
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_create_rejects_bad_input_without_consuming_id() {
        let mut list = ProductList::new();
        let mut data = ProductCreate::default();
        data.ingredients.insert(Nutrient::Zinc, -3.0);
        assert!(matches!(list.create(data), Err(IntakeError::InvalidDose { .. })));

        let zero = ProductCreate {
            count: Some(0),
            ..Default::default()
        };
        assert!(list.create(zero).is_err());
        assert!(list.is_empty());

        let id = create_named(&mut list, "Ok");
        assert_eq!(id, 1);
    }

    #[test]
    fn test_create_rejects_overflowing_dose() {
        let mut list = ProductList::new();
        let mut data = ProductCreate {
            count: Some(2),
            ..Default::default()
        };
        data.ingredients.insert(Nutrient::Calcium, 1e308);
        assert!(matches!(list.create(data), Err(IntakeError::InvalidDose { .. })));
        assert!(list.is_empty());
    }

    #[test]
    fn test_blank_rename_keeps_name() {
        let mut list = ProductList::new();
        let id = create_named(&mut list, "Prenatal");
        let update = ProductUpdate {
            name: Some(String::new()),
            ..Default::default()
        };
        list.update(id, &update).unwrap();
        assert_eq!(list.get_by_id(id).unwrap().name, "Prenatal");
    }

    #[test]
    fn test_delete_keeps_identity_of_survivors() {
        let mut list = ProductList::new();
        let a = create_named(&mut list, "A");
        let b = create_named(&mut list, "B");
        let c = create_named(&mut list, "C");

        assert!(list.delete(b).is_some());
        assert_eq!(list.count(), 2);
        assert_eq!(list.position_of(c), Some(1));

        // An edit addressed to C still lands on C after B is gone
        let update = ProductUpdate {
            name: Some("C renamed".to_string()),
            ..Default::default()
        };
        list.update(c, &update).unwrap();
        assert_eq!(list.get_by_id(c).unwrap().name, "C renamed");
        assert_eq!(list.get_by_id(a).unwrap().name, "A");

        assert!(list.delete(b).is_none());
    }

    #[test]
    fn test_ids_are_never_reused() {
        let mut list = ProductList::new();
        let a = create_named(&mut list, "A");
        list.delete(a);
        let b = create_named(&mut list, "B");
        assert_ne!(a, b);
    }

    #[test]
    fn test_update_unknown_id() {
        let mut list = ProductList::new();
        assert!(list.update(42, &ProductUpdate::default()).unwrap().is_none());
    }

    #[test]
    fn test_rejected_update_leaves_product_unchanged() {
        let mut list = ProductList::new();
        let id = create_named(&mut list, "Prenatal");
        let before = list.get_by_id(id).unwrap().clone();

        let update = ProductUpdate {
            count: Some(0),
            ..Default::default()
        };
        assert!(list.update(id, &update).is_err());
        assert_eq!(list.get_by_id(id).unwrap(), &before);
    }

    #[test]
    fn test_session_evaluates_with_selected_stage() {
        let mut session = Session::new(Stage::EarlyMid);
        let mut data = ProductCreate {
            name: Some("Iron 20".to_string()),
            ..Default::default()
        };
        data.ingredients.insert(Nutrient::Iron, 20.0);
        session.products.create(data).unwrap();

        let report = session.evaluate().unwrap();
        assert_eq!(report.get(Nutrient::Iron).unwrap().band, Band::WithinAggressiveRange);

        session.select_stage(Stage::Late);
        let report = session.evaluate().unwrap();
        assert_eq!(report.get(Nutrient::Iron).unwrap().band, Band::BelowRecommended);
        assert_eq!(report.stage, Some(Stage::Late));
    }
}
