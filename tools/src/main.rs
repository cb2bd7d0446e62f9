//! fiscal-runner: headless runner for the DROM-COM fiscal-data engine.
//!
//! Usage:
//!   fiscal-runner --seed 12345 --territory REUNION
//!   fiscal-runner --territory MAYOTTE --live-updates 5
//!   fiscal-runner --territory POLYNESIE --json
//!   fiscal-runner --config engine.json

use anyhow::Result;
use fiscal_core::{config::EngineConfig, engine::FiscalEngine, territory::TerritoryCode};
use std::env;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let live_updates = parse_arg(&args, "--live-updates", 0u32);
    let json_mode = args.iter().any(|a| a == "--json");
    let territory: TerritoryCode = args
        .windows(2)
        .find(|w| w[0] == "--territory")
        .map(|w| w[1].parse())
        .transpose()?
        .unwrap_or(TerritoryCode::Reunion);

    let config = match args.windows(2).find(|w| w[0] == "--config") {
        Some(w) => EngineConfig::load(&w[1])?,
        None => EngineConfig {
            master_seed: seed,
            ..EngineConfig::default()
        },
    };

    let engine = FiscalEngine::with_config(config);

    for _ in 0..live_updates {
        engine.apply_live_update(territory)?;
    }

    if json_mode {
        let data = engine.territory_data(territory)?;
        println!("{}", serde_json::to_string_pretty(&data)?);
        return Ok(());
    }

    print_report(&engine, territory)
}

fn print_report(engine: &FiscalEngine, territory: TerritoryCode) -> Result<()> {
    let data = engine.territory_data(territory)?;
    let metrics = engine.key_metrics(territory)?;

    println!("fiscal-runner — {}", data.territory.name);
    println!("  session:    {}", engine.session_id);
    println!("  type:       {:?}", data.territory.admin_type);
    println!("  population: {}", data.territory.population);
    println!("  gdp:        {:.1} Md€", data.territory.gdp_billions);
    println!();

    println!("Key metrics");
    println!("  monthly revenue:   {:.1} M€", metrics.monthly_total);
    println!("  annual projection: {:.1} M€", metrics.annual_total);
    println!("  mean variation:    {:+.2} %", metrics.avg_change_pct);
    println!("  taxpayers:         {:.0}", metrics.taxpayers_total);
    println!("  tax per capita:    {:.0} €", metrics.tax_per_capita);
    println!("  levy rate:         {:.1} % of GDP", metrics.levy_rate_pct);
    if let Some(stamp) = engine.last_update() {
        println!("  last live update:  {stamp}");
    }
    println!();

    println!("Categories (current month)");
    let mut rows = data.snapshot.clone();
    rows.sort_by(|a, b| b.monthly_amount.total_cmp(&a.monthly_amount));
    for row in &rows {
        println!(
            "  {:<22} {:>8.1} M€  {:+6.2} %  {:?}",
            row.category.as_str(),
            row.monthly_amount,
            row.change_pct,
            row.tax_class
        );
    }
    println!();

    println!("Income brackets");
    for bracket in &data.brackets {
        println!(
            "  {:<10} {:>9.0} taxpayers  {:>8.0} € avg  {:>5.1} %",
            bracket.bracket, bracket.taxpayer_count, bracket.avg_tax_amount, bracket.effective_rate
        );
    }
    println!();

    println!("Reform impacts (observed vs planned)");
    for impact in engine.reform_impacts(territory) {
        println!(
            "  {:<24} planned ×{:.2}  observed ×{:.2}",
            impact.reform.name, impact.reform.planned_impact, impact.actual_impact
        );
    }
    println!();

    println!("Territory comparison (active territories)");
    for record in engine.compare_territories() {
        println!(
            "  {:<12} {:>8.0} M€ total  pressure {:>5.1} %",
            record.territory.as_str(),
            record.total_tax_amount,
            record.fiscal_pressure
        );
    }

    Ok(())
}

fn parse_arg<T: std::str::FromStr>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
