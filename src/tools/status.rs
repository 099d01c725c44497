//! Status Tool
//!
//! Runtime status of the intake service and the usage guide served to clients.

use serde::Serialize;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::models::Stage;

/// Assessment workflow instructions for AI assistants
pub const ASSESSMENT_INSTRUCTIONS: &str = r#"
# Prenatal Supplement Intake Instructions

This guide explains how to assess a pregnant user's daily supplement intake.

## Overview

An assessment needs:
1. **Stage** - the pregnancy stage, which sets the iron and choline targets
2. **Products** - every supplement the user takes, with per-unit amounts and a daily count
3. **Evaluation** - per-nutrient totals classified against the thresholds

Products live only for the current session. Nothing is saved.

---

## Step 1: Select the Stage

**Tool:** `select_stage`
- `early_mid` - trimester 1-2 (weeks 1-28)
- `late` - trimester 3 (week 29 onward)

| Nutrient | early_mid | late |
|----------|-----------|------|
| Iron (mg) | 0 / 15 / 40 | 30 / 40 / 40 |
| Choline (mg) | 150 / 350 / 7500 | 150 / 600 / 7500 |

(recommended / aggressive / upper). All other nutrients do not depend on the stage.
Call `get_thresholds` to see the full table.

---

## Step 2: Enter Products

**Tool:** `add_product`
- `name` (optional) - defaults to "Product N"
- `ingredients` - amount **per unit** keyed by nutrient
- `count` (optional) - units per day, default 1

### Nutrient Keys and Units

| Key | Unit |
|-----|------|
| calcium | mg |
| iron | mg |
| magnesium | mg |
| zinc | mg |
| iodine | mcg |
| vitamin_a | IU |
| vitamin_d | IU |
| vitamin_e | IU |
| vitamin_c | mg |
| choline | mg |
| vitamin_b6 | mg |
| vitamin_b12 | mg |
| folate | mcg |
| omega_3 | mg |

Enter amounts in exactly these units. There is no unit conversion.
Amounts must be zero or positive; count must be at least 1.

**Example:** a prenatal multivitamin taken twice a day
```json
{"name": "Prenatal Multi", "ingredients": {"folate": 400, "iron": 13.5, "iodine": 75}, "count": 2}
```

### Editing and Removing

- `update_product` - change name, count, or individual nutrient amounts
- `delete_product` - remove by `id`
- Always address products by `id`, never by list position. Positions shift after a delete; ids never do.

---

## Step 3: Evaluate

**Tool:** `evaluate_intake`

Each nutrient gets one band:

| Band | Meaning |
|------|---------|
| below_recommended | Total below the recommended minimum |
| within_recommended_range | At or above recommended, below aggressive |
| within_aggressive_range | At or above aggressive, below the upper limit |
| above_upper | At or above the safe upper limit |
| above_aggressive_unbounded | At or above aggressive for a nutrient with no upper limit (vitamin B12) |

Flag `below_recommended` and `above_upper` to the user. Core nutrients
(calcium, iron, iodine, vitamin D, folate, omega-3) matter most.

**Tool:** `export_intake_markdown` for a printable summary.
"#;

/// Service status information
#[derive(Debug, Clone, Serialize)]
pub struct IntakeStatus {
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
    pub product_count: usize,
    pub stage: Stage,
}

/// Status tracker for the intake service
pub struct StatusTracker {
    start_time: Instant,
}

impl StatusTracker {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
        }
    }

    /// Get the current status
    pub fn get_status(&self, product_count: usize, stage: Stage) -> IntakeStatus {
        let build_info = BuildInfo::current();

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        IntakeStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
            product_count,
            stage,
        }
    }
}

impl Default for StatusTracker {
    fn default() -> Self {
        Self::new()
    }
}
