//! Markdown rendering of an intake report

use crate::intake::{IntakeReport, NutrientIntake};
use crate::models::NutrientGroup;

/// Render a report as markdown, core block first
pub fn render_markdown(report: &IntakeReport, generated_at: &str) -> String {
    let mut markdown = String::new();

    markdown.push_str("# Daily Supplement Intake Assessment\n\n");
    let stage = report
        .stage
        .map(|s| s.display_name())
        .unwrap_or("Not selected");
    markdown.push_str(&format!("**Stage:** {}\n\n", stage));
    markdown.push_str(&format!("**Generated:** {}\n\n", generated_at));
    markdown.push_str("---\n\n");

    for group in [NutrientGroup::Core, NutrientGroup::Supplementary] {
        markdown.push_str(&format!("## {}\n\n", group.display_name()));
        for entry in report.group(group) {
            markdown.push_str(&render_line(entry));
            markdown.push('\n');
        }
        markdown.push('\n');
    }

    let flagged = report.needs_attention();
    if !flagged.is_empty() {
        markdown.push_str("## Needs attention\n\n");
        for entry in flagged {
            markdown.push_str(&format!(
                "- {}: {}\n",
                entry.nutrient.label(),
                entry.band.display_name()
            ));
        }
        markdown.push('\n');
    }

    markdown
}

/// `- Calcium (mg): 1200.0 -> Recommended range; sources: A (600.0), B (600.0)`
fn render_line(entry: &NutrientIntake) -> String {
    let band = if entry.band.is_acceptable() {
        entry.band.display_name().to_string()
    } else {
        format!("**{}**", entry.band.display_name())
    };

    let mut line = format!("- {}: {:.1} -> {}", entry.nutrient.label(), entry.total, band);
    if !entry.sources.is_empty() {
        let sources: Vec<String> = entry
            .sources
            .iter()
            .map(|s| format!("{} ({:.1})", s.product_name, s.dose))
            .collect();
        line.push_str(&format!("; sources: {}", sources.join(", ")));
    }
    line
}
