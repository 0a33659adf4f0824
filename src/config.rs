//! Small typed configuration surface, in the shape of the teacher's
//! `SparrowConfig`/`DEFAULT_SPARROW_CONFIG` pair — the core algorithm is
//! a deterministic heuristic with almost no tunable knobs, so this stays
//! intentionally thin.

#[derive(Debug, Clone, Copy)]
pub struct StowageConfig {
    /// Upper bound on how many placements the rearrangement planner will
    /// evict from a single container while searching for room.
    pub max_rearrangement_evictions: usize,
    /// Logging verbosity for the demo CLI.
    pub log_level: log::LevelFilter,
}

pub const DEFAULT_STOWAGE_CONFIG: StowageConfig = StowageConfig {
    max_rearrangement_evictions: 32,
    log_level: log::LevelFilter::Info,
};
