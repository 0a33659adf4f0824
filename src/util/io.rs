//! JSON scenario I/O and logger setup, mirroring the teacher's
//! `util::io`: a `fern` dispatch writing to stdout and a log file, plus
//! thin `serde_json` read/write helpers.

use crate::model::Item;
use crate::packing::Container;
use crate::EPOCH;
use anyhow::{Context, Result};
use log::{log, Level, LevelFilter};
use serde::{Deserialize, Serialize};
use std::fs;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// A scenario on disk: the containers (with their current contents, if
/// any) and the items still to be packed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub containers: Vec<Container>,
    pub items: Vec<Item>,
}

pub fn init_logger(level_filter: LevelFilter, log_file_path: &Path) -> Result<()> {
    let _ = fs::remove_file(log_file_path);
    fern::Dispatch::new()
        .format(|out, message, record| {
            let handle = std::thread::current();
            let thread_name = handle.name().unwrap_or("-");

            let duration = EPOCH.elapsed();
            let sec = duration.as_secs() % 60;
            let min = (duration.as_secs() / 60) % 60;
            let hours = (duration.as_secs() / 60) / 60;

            let prefix = format!(
                "[{}] [{:0>2}:{:0>2}:{:0>2}] <{}>",
                record.level(),
                hours,
                min,
                sec,
                thread_name,
            );

            out.finish(format_args!("{:<25}{}", prefix, message))
        })
        .level(level_filter)
        .chain(std::io::stdout())
        .chain(fern::log_file(log_file_path)?)
        .apply()?;
    log!(Level::Info, "[EPOCH]: {}", jiff::Timestamp::now());
    Ok(())
}

pub fn read_scenario_json(path: &Path) -> Result<Scenario> {
    let file = File::open(path).context("could not open scenario file")?;
    serde_json::from_reader(BufReader::new(file)).context("not a valid scenario (Scenario)")
}

pub fn write_json(json: &impl Serialize, path: &Path, log_lvl: Level) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("could not create parent directory for json file")?;
    }
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, json)?;
    log!(
        log_lvl,
        "[IO] json exported to file://{}",
        fs::canonicalize(path)
            .expect("could not canonicalize path")
            .to_str()
            .unwrap()
    );
    Ok(())
}
