use anyhow::Result;
use clap::Parser;
use log::{info, Level, LevelFilter};
use std::fs;
use std::path::Path;
use stowage::util::io;
use stowage::util::io::Scenario;

pub const OUTPUT_DIR: &str = "output";

const LOG_LEVEL_FILTER_DEBUG: LevelFilter = LevelFilter::Debug;
const LOG_LEVEL_FILTER_RELEASE: LevelFilter = LevelFilter::Info;

/// Pack a scenario's items into its containers and write the result.
#[derive(Parser)]
struct MainCli {
    /// Path to the input scenario JSON file (containers + items)
    #[arg(short = 'i', long, help = "Path to the input scenario JSON file")]
    input: String,
}

fn main() -> Result<()> {
    fs::create_dir_all(OUTPUT_DIR)?;
    let log_file_path = format!("{OUTPUT_DIR}/log.txt");
    match cfg!(debug_assertions) {
        true => io::init_logger(LOG_LEVEL_FILTER_DEBUG, Path::new(&log_file_path))?,
        false => io::init_logger(LOG_LEVEL_FILTER_RELEASE, Path::new(&log_file_path))?,
    }

    let args = MainCli::parse();
    let mut scenario: Scenario = io::read_scenario_json(Path::new(&args.input))?;

    info!(
        "[MAIN] loaded scenario with {} containers and {} items",
        scenario.containers.len(),
        scenario.items.len()
    );

    let result = stowage::pack(&mut scenario.containers, scenario.items);
    info!(
        "[MAIN] packed {} items, {} left unplaced",
        result.placed,
        result.unplaced.len()
    );

    let input_stem = Path::new(&args.input)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("scenario");
    let json_path = format!("{OUTPUT_DIR}/packed_{input_stem}.json");
    io::write_json(&scenario.containers, Path::new(&json_path), Level::Info)?;

    if !result.unplaced.is_empty() {
        let unplaced_path = format!("{OUTPUT_DIR}/unplaced_{input_stem}.json");
        io::write_json(&result.unplaced, Path::new(&unplaced_path), Level::Info)?;
    }

    Ok(())
}
