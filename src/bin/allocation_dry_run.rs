// Dev utility: run one allocation scenario from a JSON file and print the result.
//
// Usage:
//   cargo run --bin allocation_dry_run -- <scenario.json> [--json-logs]
//
// Scenario fields: fleet, deliveries, target_weight, target_date (optional),
// selected_truck_ids (optional; when present only redistribution runs).
// Engine parameters come from $TRUCK_ALLOCATION_CONFIG or the user config dir.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::process::ExitCode;
use truck_allocation::api::{
    AllocationApi, PlanAllocationRequest, RedistributeRequest, WeightInput,
};
use truck_allocation::config::ConfigManager;
use truck_allocation::logging;
use truck_allocation::{DeliveryRecord, Truck};

#[derive(Debug, Deserialize)]
struct Scenario {
    fleet: Vec<Truck>,
    #[serde(default)]
    deliveries: Vec<DeliveryRecord>,
    target_weight: WeightInput,
    #[serde(default)]
    target_date: Option<String>,
    #[serde(default)]
    selected_truck_ids: Option<Vec<String>>,
}

fn main() -> Result<ExitCode> {
    let mut scenario_path = None;
    let mut json_logs = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--json-logs" => json_logs = true,
            _ => scenario_path = Some(arg),
        }
    }
    if json_logs {
        logging::init_json();
    } else {
        logging::init();
    }

    let scenario_path =
        scenario_path.context("usage: allocation_dry_run <scenario.json> [--json-logs]")?;
    let raw = std::fs::read_to_string(&scenario_path)
        .with_context(|| format!("failed to read scenario {}", scenario_path))?;
    let scenario: Scenario = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse scenario {}", scenario_path))?;

    let api = AllocationApi::from_config_manager(&ConfigManager::from_env())
        .context("failed to load allocation config")?;

    let output = match scenario.selected_truck_ids {
        Some(selected_truck_ids) => {
            let request = RedistributeRequest {
                selected_truck_ids,
                target_weight: scenario.target_weight,
            };
            api.redistribute_selection(&request, &scenario.fleet)
                .map(serde_json::to_value)
        }
        None => {
            let request = PlanAllocationRequest {
                target_weight: scenario.target_weight,
                target_date: scenario.target_date,
            };
            api.plan_allocation(&request, &scenario.fleet, &scenario.deliveries)
                .map(serde_json::to_value)
        }
    };

    match output {
        Ok(value) => {
            let value = value.context("failed to serialize response")?;
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            println!("{}", serde_json::to_string_pretty(&err.to_response())?);
            Ok(ExitCode::from(2))
        }
    }
}
