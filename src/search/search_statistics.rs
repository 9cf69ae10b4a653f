use crate::search::HeuristicValue;
use ordered_float::Float;
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct SearchStatistics {
    /// Number of nodes expanded
    expanded_nodes: u64,
    /// Number of transitions produced by the problem
    generated_nodes: u64,
    /// Number of nodes admitted to the open list
    opened_nodes: u64,
    /// Number of open nodes superseded by a cheaper path
    reopened_nodes: u64,
    /// Number of generated or popped nodes dropped as duplicates
    discarded_duplicates: u64,
    /// Best heuristic value of an expanded node so far
    best_heuristic_value: HeuristicValue,
    /// Time when the search started
    search_start_time: Instant,
    /// Time when the last log was printed, used for periodic logging
    last_log_time: Instant,
}

impl Default for SearchStatistics {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchStatistics {
    pub fn new() -> Self {
        debug!("starting search");
        Self {
            expanded_nodes: 0,
            generated_nodes: 0,
            opened_nodes: 0,
            reopened_nodes: 0,
            discarded_duplicates: 0,
            best_heuristic_value: HeuristicValue::infinity(),
            search_start_time: Instant::now(),
            last_log_time: Instant::now(),
        }
    }

    pub fn register_heuristic_value(&mut self, heuristic_value: HeuristicValue) {
        if heuristic_value < self.best_heuristic_value {
            self.best_heuristic_value = heuristic_value;
            debug!(best_heuristic_value = self.best_heuristic_value.into_inner());
        }
    }

    pub fn increment_expanded_nodes(&mut self) {
        self.expanded_nodes += 1;
        self.log_if_needed();
    }

    pub fn increment_generated_nodes(&mut self) {
        self.generated_nodes += 1;
    }

    pub fn increment_opened_nodes(&mut self) {
        self.opened_nodes += 1;
    }

    pub fn increment_reopened_nodes(&mut self) {
        self.reopened_nodes += 1;
    }

    pub fn increment_discarded_duplicates(&mut self) {
        self.discarded_duplicates += 1;
    }

    pub fn expanded_nodes(&self) -> u64 {
        self.expanded_nodes
    }

    pub fn generated_nodes(&self) -> u64 {
        self.generated_nodes
    }

    pub fn opened_nodes(&self) -> u64 {
        self.opened_nodes
    }

    pub fn reopened_nodes(&self) -> u64 {
        self.reopened_nodes
    }

    pub fn discarded_duplicates(&self) -> u64 {
        self.discarded_duplicates
    }

    pub fn best_heuristic_value(&self) -> HeuristicValue {
        self.best_heuristic_value
    }

    pub fn elapsed(&self) -> Duration {
        self.search_start_time.elapsed()
    }

    fn log_if_needed(&mut self) {
        if self.last_log_time.elapsed().as_secs() > 10 {
            self.last_log_time = Instant::now();
            self.log();
        }
    }

    fn log(&self) {
        debug!(
            expanded_nodes = self.expanded_nodes,
            generated_nodes = self.generated_nodes,
            opened_nodes = self.opened_nodes,
            reopened_nodes = self.reopened_nodes,
            discarded_duplicates = self.discarded_duplicates,
            best_heuristic_value = self.best_heuristic_value.into_inner(),
        );
    }

    pub fn finalise_search(&self) {
        debug!("finalising search");
        self.log();
        debug!(search_duration = self.search_start_time.elapsed().as_secs_f64());
    }
}
