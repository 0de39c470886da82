//! Run report: a self-contained JSON export of one cascade
//!
//! Reports are output only. Nothing in the crate reads them back.

use crate::engine::CascadeRequest;
use crate::error::Result;
use crate::graph::Graph;
use crate::layout::{Layout, LayoutConfig};
use crate::stage::{stages, Stage};
use chrono::{DateTime, Utc};
use log::info;
use serde::Serialize;
use std::path::Path;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
pub struct CascadeReport<'a> {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub request: &'a CascadeRequest,
    /// Seed used for the randomness source, if the run was seeded
    pub seed: Option<u64>,
    pub fingerprint: String,
    pub graph: &'a Graph,
    pub layout: Layout,
    pub stages: Vec<Stage>,
}

impl<'a> CascadeReport<'a> {
    pub fn new(request: &'a CascadeRequest, graph: &'a Graph, seed: Option<u64>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            request,
            seed,
            fingerprint: graph.fingerprint(),
            graph,
            layout: Layout::compute(graph.skeleton(), &LayoutConfig::default()),
            stages: stages(graph),
        }
    }

    /// Keep only the given stages, e.g. a single stage picked by the caller
    pub fn with_stages(mut self, stages: Vec<Stage>) -> Self {
        self.stages = stages;
        self
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?)?;
        info!("Wrote report {} to {}", self.run_id, path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::run;
    use crate::propagation::AggregationMode;
    use crate::random::MinimalSource;

    #[test]
    fn test_report_json_shape() {
        let request = CascadeRequest::new(5, -5, AggregationMode::AllPredecessors);
        let graph = run(&request, &mut MinimalSource).unwrap();
        let report = CascadeReport::new(&request, &graph, None);

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["request"]["mode"], "AllPredecessors");
        assert_eq!(json["graph"]["nodes"].as_array().unwrap().len(), 10);
        assert_eq!(json["stages"].as_array().unwrap().len(), 4);
        assert_eq!(json["stages"][0]["nodes"][0]["tone"], "positive");
        assert_eq!(json["fingerprint"], graph.fingerprint());
        assert!(json["seed"].is_null());
    }

    #[test]
    fn test_report_with_selected_stage() {
        let request = CascadeRequest::new(5, -5, AggregationMode::DirectPredecessors);
        let graph = run(&request, &mut MinimalSource).unwrap();
        let report = CascadeReport::new(&request, &graph, None).with_stages(vec![Stage::build(&graph, 2)]);

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        let stages = json["stages"].as_array().unwrap();
        assert_eq!(stages.len(), 1);
        assert_eq!(stages[0]["index"], 2);
        assert_eq!(stages[0]["active_layers"], 3);
        assert_eq!(json["graph"]["nodes"].as_array().unwrap().len(), 10);
    }

    #[test]
    fn test_reports_get_distinct_run_ids() {
        let request = CascadeRequest::new(5, -5, AggregationMode::DirectPredecessors);
        let graph = run(&request, &mut MinimalSource).unwrap();
        let a = CascadeReport::new(&request, &graph, Some(1));
        let b = CascadeReport::new(&request, &graph, Some(1));
        assert_ne!(a.run_id, b.run_id);
        assert_eq!(a.fingerprint, b.fingerprint);
    }

    #[test]
    fn test_write_to_file() {
        let request = CascadeRequest::new(2, -2, AggregationMode::DirectPredecessors);
        let graph = run(&request, &mut MinimalSource).unwrap();
        let path = std::env::temp_dir().join(format!("cascade-report-{}.json", Uuid::new_v4()));
        CascadeReport::new(&request, &graph, None).write_to(&path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"fingerprint\""));
        std::fs::remove_file(&path).unwrap();
    }
}
