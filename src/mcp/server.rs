//! Intake MCP Server Implementation
//!
//! Implements the MCP server with all intake assessment tools.

use std::collections::HashMap;
use std::sync::{Arc, MutexGuard};

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::models::Stage;
use crate::session::Session;
use crate::tools::assessment;
use crate::tools::products;
use crate::tools::status::StatusTracker;

/// Intake MCP Service
///
/// Holds one session for the lifetime of the stdio connection.
#[derive(Clone)]
pub struct IntakeService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    session: Arc<std::sync::Mutex<Session>>,
    tool_router: ToolRouter<IntakeService>,
}

impl IntakeService {
    pub fn new(stage: Stage) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new())),
            session: Arc::new(std::sync::Mutex::new(Session::new(stage))),
            tool_router: Self::tool_router(),
        }
    }

    fn session(&self) -> Result<MutexGuard<'_, Session>, McpError> {
        self.session
            .lock()
            .map_err(|_| McpError::internal_error("Session state is unavailable", None))
    }
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Product Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddProductParams {
    /// Product name (defaults to "Product N")
    pub name: Option<String>,
    /// Amount per unit keyed by nutrient (calcium, iron, magnesium, zinc, iodine,
    /// vitamin_a, vitamin_d, vitamin_e, vitamin_c, choline, vitamin_b6,
    /// vitamin_b12, folate, omega_3). Missing nutrients are 0.
    #[serde(default)]
    pub ingredients: HashMap<String, f64>,
    /// Units taken per day (default 1)
    pub count: Option<i64>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetProductParams {
    /// Product ID
    pub id: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateProductParams {
    /// Product ID to update
    pub id: i64,
    /// New name (optional)
    pub name: Option<String>,
    /// Per-unit amounts to overwrite; nutrients not listed keep their value
    pub ingredients: Option<HashMap<String, f64>>,
    /// New units per day (optional)
    pub count: Option<i64>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DeleteProductParams {
    /// Product ID to delete
    pub id: i64,
}

// ============================================================================
// Assessment Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SelectStageParams {
    /// early_mid (weeks 1-28) or late (week 29+)
    pub stage: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetThresholdsParams {
    /// Stage to show (defaults to the selected stage)
    pub stage: Option<String>,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl IntakeService {
    // --- Status ---

    #[tool(description = "Get the current status of the intake service including build info, process information, product count and selected stage")]
    async fn intake_status(&self) -> Result<CallToolResult, McpError> {
        let (product_count, stage) = {
            let session = self.session()?;
            (session.products.count(), session.stage())
        };
        let tracker = self.status_tracker.lock().await;
        json_result(&tracker.get_status(product_count, stage))
    }

    #[tool(description = "Get step-by-step instructions for assessing supplement intake. Call this when starting a session or when unsure how to use the tools.")]
    fn assessment_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::ASSESSMENT_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(ASSESSMENT_INSTRUCTIONS)]))
    }

    // --- Products ---

    #[tool(description = "Add a supplement product with per-unit nutrient amounts and a daily count")]
    fn add_product(&self, Parameters(p): Parameters<AddProductParams>) -> Result<CallToolResult, McpError> {
        let mut session = self.session()?;
        let result = products::add_product(&mut session, p.name, &p.ingredients, p.count)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "List products in order with their IDs and positions")]
    fn list_products(&self) -> Result<CallToolResult, McpError> {
        let session = self.session()?;
        json_result(&products::list_products(&session))
    }

    #[tool(description = "Get full details for a product including per-unit amounts and daily doses")]
    fn get_product(&self, Parameters(p): Parameters<GetProductParams>) -> Result<CallToolResult, McpError> {
        let session = self.session()?;
        match products::get_product(&session, p.id) {
            Some(detail) => json_result(&detail),
            None => Ok(CallToolResult::success(vec![Content::text(format!(
                r#"{{"error": "Product not found", "id": {}}}"#,
                p.id
            ))])),
        }
    }

    #[tool(description = "Update a product's name, count, or individual nutrient amounts. The product is left unchanged if any value is invalid.")]
    fn update_product(&self, Parameters(p): Parameters<UpdateProductParams>) -> Result<CallToolResult, McpError> {
        let mut session = self.session()?;
        let result = products::update_product(&mut session, p.id, p.name, p.ingredients.as_ref(), p.count)
            .map_err(|e| McpError::internal_error(e, None))?;
        match result {
            Some(detail) => json_result(&detail),
            None => Ok(CallToolResult::success(vec![Content::text(format!(
                r#"{{"error": "Product not found", "id": {}}}"#,
                p.id
            ))])),
        }
    }

    #[tool(description = "Delete a product by ID. Other products keep their IDs.")]
    fn delete_product(&self, Parameters(p): Parameters<DeleteProductParams>) -> Result<CallToolResult, McpError> {
        let mut session = self.session()?;
        let result = products::delete_product(&mut session, p.id)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    // --- Assessment ---

    #[tool(description = "Select the pregnancy stage (early_mid or late). This changes the iron and choline targets.")]
    fn select_stage(&self, Parameters(p): Parameters<SelectStageParams>) -> Result<CallToolResult, McpError> {
        let mut session = self.session()?;
        let result = assessment::select_stage(&mut session, &p.stage)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Get recommended, aggressive and upper-limit thresholds for every nutrient")]
    fn get_thresholds(&self, Parameters(p): Parameters<GetThresholdsParams>) -> Result<CallToolResult, McpError> {
        let session = self.session()?;
        let result = assessment::get_thresholds(&session, p.stage.as_deref())
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Evaluate total daily intake per nutrient, with contributing products and a classification band")]
    fn evaluate_intake(&self) -> Result<CallToolResult, McpError> {
        let session = self.session()?;
        let result = assessment::evaluate_intake(&session)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Export the current intake assessment as a markdown document")]
    fn export_intake_markdown(&self) -> Result<CallToolResult, McpError> {
        let session = self.session()?;
        let result = assessment::export_intake_markdown(&session)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for IntakeService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "prenatal-intake".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Prenatal Intake Assessor".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Prenatal Intake Assessor - classifies daily supplement intake during pregnancy. \
                 IMPORTANT: Call assessment_instructions first. \
                 Stage: select_stage (early_mid/late), get_thresholds. \
                 Products: add/list/get/update/delete_product (always address products by id). \
                 Assessment: evaluate_intake, export_intake_markdown. \
                 Products are kept in memory for this session only."
                    .into(),
            ),
        }
    }
}
