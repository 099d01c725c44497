//! Assessment MCP Tools
//!
//! Stage selection, threshold lookup and intake evaluation for the session.

use serde::Serialize;

use crate::intake::{render_markdown, NutrientIntake, SourceContribution, ThresholdTable};
use crate::models::{Nutrient, NutrientGroup, Stage};
use crate::session::Session;

/// Response for select_stage
#[derive(Debug, Serialize)]
pub struct SelectStageResponse {
    pub success: bool,
    pub stage: Stage,
    pub stage_display: String,
    pub previous_stage: Stage,
}

/// One row of the threshold table
#[derive(Debug, Serialize)]
pub struct ThresholdEntry {
    pub nutrient: Nutrient,
    pub label: String,
    pub unit: &'static str,
    pub group: NutrientGroup,
    pub recommended: f64,
    pub aggressive: f64,
    /// Absent when there is no upper limit
    pub upper: Option<f64>,
}

/// Response for get_thresholds
#[derive(Debug, Serialize)]
pub struct ThresholdsResponse {
    pub stage: Stage,
    pub stage_display: String,
    pub thresholds: Vec<ThresholdEntry>,
}

/// Assessment of one nutrient, flattened for display
#[derive(Debug, Serialize)]
pub struct NutrientAssessment {
    pub nutrient: Nutrient,
    pub label: String,
    pub total: f64,
    pub band: &'static str,
    pub band_display: &'static str,
    pub acceptable: bool,
    pub recommended: f64,
    pub aggressive: f64,
    pub upper: Option<f64>,
    pub sources: Vec<SourceContribution>,
}

impl From<&NutrientIntake> for NutrientAssessment {
    fn from(entry: &NutrientIntake) -> Self {
        Self {
            nutrient: entry.nutrient,
            label: entry.nutrient.label(),
            total: entry.total,
            band: entry.band.as_str(),
            band_display: entry.band.display_name(),
            acceptable: entry.band.is_acceptable(),
            recommended: entry.thresholds.recommended,
            aggressive: entry.thresholds.aggressive,
            upper: entry.thresholds.upper,
            sources: entry.sources.clone(),
        }
    }
}

/// Response for evaluate_intake
#[derive(Debug, Serialize)]
pub struct EvaluateIntakeResponse {
    pub stage: Stage,
    pub product_count: usize,
    pub core: Vec<NutrientAssessment>,
    pub supplementary: Vec<NutrientAssessment>,
    /// Labels of nutrients below recommended or above the upper limit
    pub needs_attention: Vec<String>,
}

/// Response for export_intake_markdown
#[derive(Debug, Serialize)]
pub struct ExportIntakeResponse {
    pub markdown: String,
    pub product_count: usize,
    pub generated_at: String,
}

// ============================================================================
// Tool Functions
// ============================================================================

/// Select the pregnancy stage used for future evaluations
pub fn select_stage(session: &mut Session, stage: &str) -> Result<SelectStageResponse, String> {
    let stage = Stage::from_str(stage).map_err(|e| e.to_string())?;
    let previous_stage = session.stage();
    session.select_stage(stage);

    Ok(SelectStageResponse {
        success: true,
        stage,
        stage_display: stage.display_name().to_string(),
        previous_stage,
    })
}

/// Threshold table for the selected stage, or for `stage` if given
pub fn get_thresholds(session: &Session, stage: Option<&str>) -> Result<ThresholdsResponse, String> {
    let stage = match stage {
        Some(s) => Stage::from_str(s).map_err(|e| e.to_string())?,
        None => session.stage(),
    };
    let table = ThresholdTable::for_stage(stage);

    let thresholds = table
        .iter()
        .map(|(nutrient, t)| ThresholdEntry {
            nutrient,
            label: nutrient.label(),
            unit: nutrient.unit().as_str(),
            group: nutrient.group(),
            recommended: t.recommended,
            aggressive: t.aggressive,
            upper: t.upper,
        })
        .collect();

    Ok(ThresholdsResponse {
        stage,
        stage_display: stage.display_name().to_string(),
        thresholds,
    })
}

/// Evaluate the session's products against the selected stage
pub fn evaluate_intake(session: &Session) -> Result<EvaluateIntakeResponse, String> {
    let report = session
        .evaluate()
        .map_err(|e| format!("Evaluation failed: {}", e))?;

    Ok(EvaluateIntakeResponse {
        stage: session.stage(),
        product_count: session.products.count(),
        core: report.core.iter().map(NutrientAssessment::from).collect(),
        supplementary: report.supplementary.iter().map(NutrientAssessment::from).collect(),
        needs_attention: report
            .needs_attention()
            .iter()
            .map(|e| e.nutrient.label())
            .collect(),
    })
}

/// Export the current assessment as markdown
pub fn export_intake_markdown(session: &Session) -> Result<ExportIntakeResponse, String> {
    let report = session
        .evaluate()
        .map_err(|e| format!("Evaluation failed: {}", e))?;

    let generated_at = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();
    let markdown = render_markdown(&report, &generated_at);

    Ok(ExportIntakeResponse {
        markdown,
        product_count: session.products.count(),
        generated_at,
    })
}
