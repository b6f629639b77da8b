//! Curator-label loading.
//!
//! ```json
//! [ { "text_id": "FindKey", "min_steps": 4,
//!     "narrative_deps": [ { "begin_dep": "Door1", "narr_id": "Key" } ] } ]
//! ```

use std::path::Path;

use serde_json::{Map, Value};
use storyline_core::config::GraphConfig;
use storyline_core::errors::CuratorLoadError;
use storyline_core::tracing::metrics;
use storyline_core::types::FxHashSet;

use super::tracker::CuratorTracker;
use super::types::CuratorLabel;

impl CuratorTracker {
    /// Tracker loaded from `curators_path`, or empty when it is unset.
    pub fn from_config(config: &GraphConfig) -> Result<Self, CuratorLoadError> {
        let mut tracker = Self::new();
        if let Some(path) = &config.curators_path {
            tracker.load_labels_file(path)?;
        }
        Ok(tracker)
    }

    /// Replace the label table with the labels in `json`.
    ///
    /// The whole document is validated first; on error the current labels
    /// stay as they were. Returns the number of labels loaded.
    pub fn load_labels_str(&mut self, json: &str) -> Result<usize, CuratorLoadError> {
        let labels = match parse_labels(json) {
            Ok(labels) => labels,
            Err(e) => {
                tracing::warn!(error = %e, "curator labels rejected, previous labels kept");
                return Err(e);
            }
        };
        let count = labels.len();
        let objectives: usize = labels.iter().map(|l| l.objectives().len()).sum();
        self.replace_labels(labels);
        tracing::info!(
            { metrics::LABELS_LOADED } = count,
            objectives,
            "curator labels loaded"
        );
        Ok(count)
    }

    /// Read and load a curator-label file.
    pub fn load_labels_file(&mut self, path: &Path) -> Result<usize, CuratorLoadError> {
        let json = std::fs::read_to_string(path).map_err(|e| CuratorLoadError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        self.load_labels_str(&json)
    }
}

fn parse_labels(json: &str) -> Result<Vec<CuratorLabel>, CuratorLoadError> {
    let root: Value = serde_json::from_str(json)?;
    let entries = root.as_array().ok_or(CuratorLoadError::NotArray)?;

    let mut seen: FxHashSet<&str> = FxHashSet::default();
    let mut labels = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let malformed = |reason: &str| CuratorLoadError::MalformedLabel {
            index,
            reason: reason.to_string(),
        };
        let object = entry
            .as_object()
            .ok_or_else(|| malformed("entry is not an object"))?;
        let text_id = object
            .get("text_id")
            .and_then(Value::as_str)
            .ok_or_else(|| malformed("missing string `text_id`"))?;
        if !seen.insert(text_id) {
            return Err(CuratorLoadError::DuplicateLabel(text_id.to_string()));
        }
        let min_steps = parse_min_steps(object).map_err(|reason| malformed(&reason))?;

        let mut label = CuratorLabel::new(text_id, min_steps);
        match object.get("narrative_deps") {
            None | Some(Value::Null) => {}
            Some(Value::Array(deps)) => {
                for (dep_index, dep) in deps.iter().enumerate() {
                    let dep = dep.as_object().ok_or_else(|| {
                        malformed(&format!("narrative_deps[{dep_index}] is not an object"))
                    })?;
                    for key in ["begin_dep", "narr_id"] {
                        match dep.get(key) {
                            None | Some(Value::Null) => {}
                            Some(Value::String(id)) => {
                                label.add_objective(id.as_str());
                            }
                            Some(_) => {
                                return Err(malformed(&format!(
                                    "narrative_deps[{dep_index}].{key} must be a string"
                                )))
                            }
                        }
                    }
                }
            }
            Some(_) => return Err(malformed("`narrative_deps` must be an array")),
        }
        labels.push(label);
    }
    Ok(labels)
}

fn parse_min_steps(object: &Map<String, Value>) -> Result<u32, String> {
    let value = object
        .get("min_steps")
        .ok_or_else(|| "missing `min_steps`".to_string())?;
    if let Some(n) = value.as_u64() {
        return u32::try_from(n).map_err(|_| format!("`min_steps` {n} out of range"));
    }
    match value.as_f64() {
        Some(f) if f.is_finite() && f >= 0.0 && f <= f64::from(u32::MAX) => Ok(f as u32),
        Some(f) => Err(format!("`min_steps` {f} out of range")),
        None => Err("`min_steps` must be a number".to_string()),
    }
}
