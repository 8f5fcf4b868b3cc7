//! Per-stage timing and narrowing metrics for listing queries.

use std::time::{Duration, Instant};

use dawa_catalog::search::{Pagination, Stage, StageObserver};
use serde::{Deserialize, Serialize};

use crate::{QueryId, StructuredLogger};

/// Metrics for a single query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueryMetrics {
    /// Query ID for correlation.
    pub query_id: String,
    /// Number of products fed into the pipeline.
    pub input: usize,
    /// Stages that ran, in order.
    pub stages: Vec<StageMetrics>,
    /// Matching products across all pages.
    pub total: usize,
    pub total_pages: usize,
    /// Page actually served, after clamping.
    pub page: usize,
    /// Total query duration (microseconds).
    pub total_duration_us: u64,
}

/// Metrics for one pipeline stage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StageMetrics {
    pub stage: Stage,
    /// Products before the stage ran.
    pub before: usize,
    /// Products left after the stage.
    pub after: usize,
    /// Stage duration (microseconds).
    pub duration_us: u64,
}

impl StageMetrics {
    /// Products this stage removed.
    pub fn removed(&self) -> usize {
        self.before.saturating_sub(self.after)
    }
}

/// Collects `QueryMetrics` by observing a pipeline run.
#[derive(Debug)]
pub struct QueryMetricsCollector {
    query_id: QueryId,
    start: Instant,
    input: usize,
    current: usize,
    stage_start: Option<(Stage, Instant)>,
    stages: Vec<StageMetrics>,
    pagination: Option<Pagination>,
}

impl QueryMetricsCollector {
    pub fn new(query_id: QueryId) -> Self {
        Self {
            query_id,
            start: Instant::now(),
            input: 0,
            current: 0,
            stage_start: None,
            stages: Vec::new(),
            pagination: None,
        }
    }

    /// Get total elapsed time.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Finalize and return the metrics.
    pub fn finalize(self) -> QueryMetrics {
        let pagination = self.pagination.unwrap_or_default();
        QueryMetrics {
            query_id: self.query_id.to_string(),
            input: self.input,
            stages: self.stages,
            total: pagination.total,
            total_pages: pagination.total_pages,
            page: pagination.page,
            total_duration_us: self.start.elapsed().as_micros() as u64,
        }
    }
}

impl StageObserver for QueryMetricsCollector {
    fn query_started(&mut self, input: usize) {
        self.start = Instant::now();
        self.input = input;
        self.current = input;
    }

    fn stage_started(&mut self, stage: Stage) {
        self.stage_start = Some((stage, Instant::now()));
    }

    fn stage_finished(&mut self, stage: Stage, remaining: usize) {
        let duration = match self.stage_start.take() {
            Some((started, at)) if started == stage => at.elapsed(),
            _ => Duration::ZERO,
        };
        self.stages.push(StageMetrics {
            stage,
            before: self.current,
            after: remaining,
            duration_us: duration.as_micros() as u64,
        });
        self.current = remaining;
    }

    fn query_finished(&mut self, pagination: &Pagination) {
        self.pagination = Some(*pagination);
    }
}

impl QueryMetrics {
    /// Metrics of `stage`, if it ran.
    pub fn stage(&self, stage: Stage) -> Option<&StageMetrics> {
        self.stages.iter().find(|s| s.stage == stage)
    }

    /// The filter stage that removed the most products.
    pub fn narrowest_stage(&self) -> Option<&StageMetrics> {
        self.stages
            .iter()
            .filter(|s| s.stage.is_filter() && s.removed() > 0)
            .max_by_key(|s| s.removed())
    }

    /// Format as JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Format as JSON (pretty printed).
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Format as human-readable summary.
    pub fn to_summary(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Query: {}", self.query_id));
        lines.push(format!(
            "  {} products in, {} matched, page {} of {}",
            self.input, self.total, self.page, self.total_pages
        ));
        lines.push(format!(
            "  Total: {}us ({:.2}ms)",
            self.total_duration_us,
            self.total_duration_us as f64 / 1000.0
        ));

        if !self.stages.is_empty() {
            lines.push("  Stages:".to_string());
            for stage in &self.stages {
                lines.push(format!(
                    "    {:<12} {:>5} -> {:<5} {}us",
                    stage.stage.as_str(),
                    stage.before,
                    stage.after,
                    stage.duration_us
                ));
            }
        }

        lines.join("\n")
    }

    /// Write one debug entry per stage and an info summary to `logger`.
    pub fn log(&self, logger: &StructuredLogger) {
        for stage in &self.stages {
            logger
                .debug_builder("stage finished")
                .field("stage", stage.stage.as_str())
                .field_u64("before", stage.before as u64)
                .field_u64("after", stage.after as u64)
                .field_u64("duration_us", stage.duration_us)
                .emit();
        }

        logger
            .info_builder("query evaluated")
            .field_u64("input", self.input as u64)
            .field_u64("total", self.total as u64)
            .field_u64("page", self.page as u64)
            .field_u64("total_pages", self.total_pages as u64)
            .field_u64("duration_us", self.total_duration_us)
            .emit();
    }
}
