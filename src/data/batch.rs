use serde::{Serialize, Deserialize};
use crate::error::Result;

/// A set of ground-truth labels and the predictions a model made for them,
/// stored as JSON for offline scoring.
///
/// ```json
/// { "name": "xor", "labels": [0, 1, 1, 0], "predictions": [0.1, 0.9, 0.8, 0.2] }
/// ```
///
/// Lengths are not checked on load; the evaluator reports any mismatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionBatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub labels: Vec<f64>,
    pub predictions: Vec<f64>,
}

impl PredictionBatch {
    pub fn new(labels: Vec<f64>, predictions: Vec<f64>) -> Self {
        PredictionBatch { name: None, labels, predictions }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Serializes the batch to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a batch from a JSON file.
    pub fn load_json(path: &str) -> Result<PredictionBatch> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}
