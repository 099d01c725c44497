//! Prenatal Intake Assessor
//!
//! An MCP server for assessing daily supplement intake during pregnancy.

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use prenatal_intake::build_info;
use prenatal_intake::mcp::IntakeService;
use prenatal_intake::models::Stage;

/// Get the initial stage from the environment or use the default
fn get_initial_stage() -> Stage {
    match std::env::var("PNI_STAGE") {
        Ok(value) => Stage::from_str(&value).unwrap_or_else(|e| {
            tracing::warn!("Ignoring PNI_STAGE: {}", e);
            Stage::default()
        }),
        Err(_) => Stage::default(),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (output to stderr to not interfere with MCP stdio)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("prenatal_intake=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner();
    eprintln!("Starting MCP server on stdio...");

    let stage = get_initial_stage();
    tracing::info!(stage = stage.as_str(), "Initial stage selected");

    let service = IntakeService::new(stage);

    let transport = (stdin(), stdout());
    let server = service.serve(transport).await?;
    server.waiting().await?;

    Ok(())
}
