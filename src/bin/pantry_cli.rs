// ABOUTME: Pantry CLI - command-line front door for search, aggregation, and weekly planning
// ABOUTME: Reads inventory/profile JSON files, drives the pipeline, prints structured JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Planner Project
//!
//! Usage:
//! ```bash
//! # Search the USDA food database
//! pantry-cli search "chicken breast"
//!
//! # Aggregate estimated nutrients across an inventory file
//! pantry-cli aggregate --inventory pantry.json
//!
//! # Plan a week toward the profile's calorie target
//! pantry-cli plan --inventory pantry.json --profile profile.json --goal lose
//! ```
//!
//! The USDA API key is read from the `USDA_API_KEY` environment variable.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pantry_planner::config::EngineConfig;
use pantry_planner::external::{UsdaClient, UsdaClientConfig};
use pantry_planner::logging::LoggingConfig;
use pantry_planner::models::{InventoryEntry, TargetInputs};
use pantry_planner::nutrition::{aggregate_inventory, calculate_target_profile, plan_week};
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "pantry-cli",
    about = "Pantry nutrition estimation and weekly meal allocation",
    long_about = "Estimates nutrient availability from a pantry inventory via USDA FoodData \
                  Central and proposes a greedy 7-day allocation toward a calorie target."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Search the USDA food database
    Search {
        /// Search query (e.g. "apple", "chicken breast")
        query: String,

        /// Number of results to return (1-200)
        #[arg(long, default_value = "10")]
        page_size: u32,
    },

    /// Aggregate estimated nutrients across an inventory file
    Aggregate {
        /// Path to a JSON array of inventory entries
        #[arg(long)]
        inventory: PathBuf,
    },

    /// Plan a 7-day allocation toward the profile's calorie target
    Plan {
        /// Path to a JSON array of inventory entries
        #[arg(long)]
        inventory: PathBuf,

        /// Path to a JSON profile with body metrics
        #[arg(long)]
        profile: PathBuf,

        /// Goal override: lose, maintain, or gain
        #[arg(long)]
        goal: Option<String>,

        /// Informational meals-per-day hint recorded with the plan
        #[arg(long, default_value = "3")]
        meals_per_day: u32,
    },
}

fn load_inventory(path: &Path) -> Result<Vec<InventoryEntry>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading inventory file {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing inventory {}", path.display()))
}

fn load_profile(path: &Path) -> Result<TargetInputs> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading profile file {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing profile {}", path.display()))
}

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging.level = "debug".into();
    }
    logging.init()?;

    let config = EngineConfig::default();
    config.validate()?;

    let client = UsdaClient::new(UsdaClientConfig::from_env()?);

    match cli.command {
        Command::Search { query, page_size } => {
            let results = client.search_foods(&query, page_size).await?;
            info!(count = results.len(), "search complete");
            print_json(&results)?;
        }
        Command::Aggregate { inventory } => {
            let entries = load_inventory(&inventory)?;
            let aggregate = aggregate_inventory(&entries, &client, &config).await?;
            print_json(&aggregate)?;
        }
        Command::Plan {
            inventory,
            profile,
            goal,
            meals_per_day,
        } => {
            let entries = load_inventory(&inventory)?;
            let mut inputs = load_profile(&profile)?;
            if goal.is_some() {
                inputs.goal = goal;
            }

            let targets = calculate_target_profile(&inputs, &config.profile);
            let aggregate = aggregate_inventory(&entries, &client, &config).await?;
            let plan = plan_week(
                Some(targets.nutrition.calories),
                &aggregate.breakdown,
                meals_per_day,
                &config.planner,
            )?;

            print_json(&json!({
                "targets": targets,
                "pantry_totals": aggregate.totals,
                "breakdown": aggregate.breakdown,
                "plan": plan,
            }))?;
        }
    }

    Ok(())
}
