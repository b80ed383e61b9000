//! Fetch and export commands.

use log::info;
use std::str::FromStr;
use tct_cyclone::api::fetch_cyclone_data;
use tct_cyclone::export::export_cyclones_csv;
use tct_cyclone::scenario::{Scenario, ScenarioSelection, SstModel};
use tct_cyclone::track::{filter_by_years, Cyclone};
use tct_cyclone::year_range::YearRange;

/// Build and validate a selection from CLI arguments.
fn build_selection(
    scenario: &str,
    ensemble: u32,
    sst: Option<&str>,
) -> anyhow::Result<ScenarioSelection> {
    let scenario = Scenario::from_str(scenario)?;
    let sst = match (scenario.requires_sst(), sst) {
        (true, Some(id)) => Some(SstModel::from_str(id)?),
        (true, None) => anyhow::bail!(
            "scenario '{}' requires an SST model (--sst CC|GF|HA|MI|MP|MR)",
            scenario
        ),
        (false, _) => None,
    };
    let selection = ScenarioSelection {
        scenario,
        ensemble,
        sst,
    };
    selection.validate()?;
    Ok(selection)
}

/// Fetch cyclone data from the API and write the parsed cyclone array
/// as JSON.
pub async fn run_fetch(
    endpoint: &str,
    scenario: &str,
    ensemble: u32,
    sst: Option<&str>,
    output: &str,
) -> anyhow::Result<()> {
    let selection = build_selection(scenario, ensemble, sst)?;

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(60))
        .build()?;
    info!("Fetching {} from {}", selection.describe(), endpoint);

    let data = fetch_cyclone_data(&client, endpoint, &selection).await?;
    info!(
        "Fetched {} cyclones (reported total {:?})",
        data.cyclones.len(),
        data.total_cyclones
    );

    std::fs::write(output, serde_json::to_string_pretty(&data.cyclones)?)?;
    info!("Wrote {}", output);
    Ok(())
}

/// Read a cyclone JSON file written by `fetch`.
pub fn read_cyclone_file(path: &str) -> anyhow::Result<Vec<Cyclone>> {
    let body = std::fs::read_to_string(path)?;
    let mut cyclones: Vec<Cyclone> = serde_json::from_str(&body)?;
    for cyclone in &mut cyclones {
        cyclone.recompute_aggregates();
    }
    Ok(cyclones)
}

/// Export a fetched cyclone file as the fixed-column CSV, optionally
/// filtered to an inclusive year range given as "min:max".
pub fn run_export(input: &str, years: Option<&str>, output: &str) -> anyhow::Result<()> {
    let cyclones = read_cyclone_file(input)?;
    let range = match years {
        Some(raw) => parse_year_filter(raw)?,
        None => YearRange::Unset,
    };
    let filtered = filter_by_years(&cyclones, &range);
    info!(
        "Exporting {} of {} cyclones ({})",
        filtered.len(),
        cyclones.len(),
        range.label()
    );
    std::fs::write(output, export_cyclones_csv(&filtered)?)?;
    info!("Wrote {}", output);
    Ok(())
}

fn parse_year_filter(raw: &str) -> anyhow::Result<YearRange> {
    let (min, max) = raw
        .split_once(':')
        .ok_or_else(|| anyhow::anyhow!("year filter must be min:max, got '{}'", raw))?;
    let min: i32 = min.trim().parse()?;
    let max: i32 = max.trim().parse()?;
    if min > max {
        anyhow::bail!("year filter min {} exceeds max {}", min, max);
    }
    Ok(YearRange::Range { min, max })
}
