//! Transition counters for an editing session.
//!
//! The engine updates these on every applied or rejected operation and
//! the embedding application can periodically snapshot them into the
//! structured log.

use crate::logging::{LogEvent, LogFields, LogLevel};
use serde_json::json;
use std::time::Duration;

#[derive(Debug, Default, Clone)]
pub struct EngineMetrics {
    operations: u64,
    placements: u64,
    swaps: u64,
    unplacements: u64,
    containment_moves: u64,
    rejections: u64,
    orphaned: u64,
}

impl EngineMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_placement(&mut self) {
        self.operations = self.operations.saturating_add(1);
        self.placements = self.placements.saturating_add(1);
    }

    pub fn record_swap(&mut self) {
        self.operations = self.operations.saturating_add(1);
        self.swaps = self.swaps.saturating_add(1);
    }

    pub fn record_unplacement(&mut self) {
        self.operations = self.operations.saturating_add(1);
        self.unplacements = self.unplacements.saturating_add(1);
    }

    pub fn record_containment_move(&mut self) {
        self.operations = self.operations.saturating_add(1);
        self.containment_moves = self.containment_moves.saturating_add(1);
    }

    pub fn record_rejection(&mut self) {
        self.operations = self.operations.saturating_add(1);
        self.rejections = self.rejections.saturating_add(1);
    }

    pub fn record_orphaned(&mut self, count: usize) {
        if count > 0 {
            self.orphaned = self.orphaned.saturating_add(count as u64);
        }
    }

    pub fn snapshot(&self, uptime: Duration) -> MetricSnapshot {
        MetricSnapshot {
            uptime_ms: uptime.as_millis() as u64,
            operations: self.operations,
            placements: self.placements,
            swaps: self.swaps,
            unplacements: self.unplacements,
            containment_moves: self.containment_moves,
            rejections: self.rejections,
            orphaned: self.orphaned,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MetricSnapshot {
    pub uptime_ms: u64,
    pub operations: u64,
    pub placements: u64,
    pub swaps: u64,
    pub unplacements: u64,
    pub containment_moves: u64,
    pub rejections: u64,
    pub orphaned: u64,
}

impl MetricSnapshot {
    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("uptime_ms".to_string(), json!(self.uptime_ms));
        map.insert("operations".to_string(), json!(self.operations));
        map.insert("placements".to_string(), json!(self.placements));
        map.insert("swaps".to_string(), json!(self.swaps));
        map.insert("unplacements".to_string(), json!(self.unplacements));
        map.insert(
            "containment_moves".to_string(),
            json!(self.containment_moves),
        );
        map.insert("rejections".to_string(), json!(self.rejections));
        map.insert("orphaned".to_string(), json!(self.orphaned));
        map
    }

    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(
            LogLevel::Info,
            target.to_string(),
            "engine_metrics".to_string(),
            self.as_fields(),
        )
    }
}
