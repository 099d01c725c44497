//! Utility to assess a saved product list without running the server
//!
//! Usage: assess_products <session.json>

use std::collections::HashMap;
use std::path::PathBuf;

use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use prenatal_intake::intake::render_markdown;
use prenatal_intake::models::{parse_count, parse_ingredients, ProductCreate, Stage};
use prenatal_intake::session::Session;

#[derive(Debug, Deserialize)]
struct SessionFile {
    #[serde(default)]
    stage: Option<String>,
    #[serde(default)]
    products: Vec<ProductEntry>,
}

#[derive(Debug, Deserialize)]
struct ProductEntry {
    name: Option<String>,
    #[serde(default)]
    ingredients: HashMap<String, f64>,
    count: Option<i64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("prenatal_intake=warn".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .ok_or("usage: assess_products <session.json>")?;

    let contents = std::fs::read_to_string(&path)?;
    let file: SessionFile = serde_json::from_str(&contents)?;

    let stage = match file.stage.as_deref() {
        Some(s) => Stage::from_str(s)?,
        None => Stage::default(),
    };
    let mut session = Session::new(stage);

    for entry in file.products {
        let label = entry.name.clone().unwrap_or_else(|| "unnamed product".to_string());
        let data = ProductCreate {
            ingredients: parse_ingredients(&label, &entry.ingredients)?,
            count: entry.count.map(|c| parse_count(&label, c)).transpose()?,
            name: entry.name,
        };
        session.products.create(data)?;
    }

    let report = session.evaluate()?;
    let generated_at = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();
    println!("{}", render_markdown(&report, &generated_at));

    Ok(())
}
