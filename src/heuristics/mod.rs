//! Diagnostics for tuning the keyword heuristics

mod logger;

pub use logger::HeuristicLogger;
