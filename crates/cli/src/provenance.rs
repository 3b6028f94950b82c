//! Sidecar metadata for reports: which engine, which surface model, which
//! evaluation bounds and which words produced an artifact.

use anyhow::{Context, Result};
use dehn::SurfaceModel;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::report::CfgRecord;

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct EngineRecord {
    pub name: &'static str,
    pub version: &'static str,
}

impl EngineRecord {
    pub fn current() -> Self {
        Self {
            name: "dehn",
            version: dehn::VERSION,
        }
    }
}

/// The parts of a `SurfaceModel` a report depends on.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ModelRecord {
    pub genus: usize,
    pub reference_curves: Vec<String>,
    pub witness_curves: usize,
}

impl From<&SurfaceModel> for ModelRecord {
    fn from(model: &SurfaceModel) -> Self {
        Self {
            genus: model.genus(),
            reference_curves: model
                .reference()
                .curves()
                .iter()
                .map(|c| c.name.clone())
                .collect(),
            witness_curves: model.witnesses().len(),
        }
    }
}

/// Where the evaluated words came from.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum WordSource {
    Batch { input: String, words: usize },
    Sample { count: u64, length: usize, seed: u64 },
}

/// Contents of `<report>.provenance.json`.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Provenance {
    pub code_rev: String,
    pub engine: EngineRecord,
    pub model: ModelRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cfg: Option<CfgRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<WordSource>,
    pub outputs: Vec<String>,
}

impl Provenance {
    /// Engine and model only, as printed by `cli report`.
    pub fn of_model(model: &SurfaceModel) -> Self {
        Self {
            code_rev: code_rev(),
            engine: EngineRecord::current(),
            model: ModelRecord::from(model),
            cfg: None,
            source: None,
            outputs: Vec::new(),
        }
    }

    pub fn for_report(model: &SurfaceModel, cfg: CfgRecord, source: WordSource) -> Self {
        Self {
            cfg: Some(cfg),
            source: Some(source),
            ..Self::of_model(model)
        }
    }
}

/// Write `provenance` next to `report` and return the sidecar path.
pub fn write_sidecar(report: &Path, mut provenance: Provenance) -> Result<PathBuf> {
    let path = sidecar_path(report);
    provenance.outputs = vec![report.to_string_lossy().into_owned()];
    fs::write(&path, serde_json::to_vec_pretty(&provenance)?)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

fn sidecar_path(report: &Path) -> PathBuf {
    let stem = report
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "report".to_string());
    report.with_file_name(format!("{stem}.provenance.json"))
}

/// `GIT_COMMIT` (build time, then run time), else `git rev-parse HEAD`.
fn code_rev() -> String {
    option_env!("GIT_COMMIT")
        .map(str::to_string)
        .or_else(|| std::env::var("GIT_COMMIT").ok())
        .filter(|rev| !rev.is_empty())
        .or_else(git_head)
        .unwrap_or_else(|| "unknown".to_string())
}

fn git_head() -> Option<String> {
    let output = Command::new("git").args(["rev-parse", "HEAD"]).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|s| s.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use tempfile::tempdir;

    #[test]
    fn sidecar_sits_next_to_the_report() {
        let derived = sidecar_path(Path::new("/tmp/output/genus2.json"));
        assert_eq!(derived, Path::new("/tmp/output/genus2.provenance.json"));
    }

    #[test]
    fn sidecar_records_model_bounds_and_source() {
        let dir = tempdir().unwrap();
        let report = dir.path().join("sample.json");
        fs::write(&report, "{}").unwrap();
        let model = SurfaceModel::closed(2).unwrap();
        let cfg = CfgRecord {
            max_order: 64,
            stretch_iterations: 1000,
            stretch_tolerance: 1e-9,
            stretch_max_letters: 1 << 22,
        };
        let source = WordSource::Sample {
            count: 4,
            length: 12,
            seed: 7,
        };
        let path = write_sidecar(&report, Provenance::for_report(&model, cfg, source)).unwrap();
        let parsed: Value = serde_json::from_slice(&fs::read(path).unwrap()).unwrap();
        assert_eq!(parsed["outputs"][0], report.to_string_lossy().as_ref());
        assert_eq!(parsed["engine"]["version"], dehn::VERSION);
        assert_eq!(parsed["model"]["genus"], 2);
        assert_eq!(
            parsed["model"]["reference_curves"].as_array().unwrap().len(),
            model.reference().len()
        );
        assert_eq!(parsed["cfg"]["max_order"], 64);
        assert_eq!(parsed["cfg"]["stretch_max_letters"], 1 << 22);
        assert_eq!(parsed["source"]["command"], "sample");
        assert_eq!(parsed["source"]["seed"], 7);
    }

    #[test]
    fn model_summary_has_no_outputs() {
        let model = SurfaceModel::closed(1).unwrap();
        let value = serde_json::to_value(Provenance::of_model(&model)).unwrap();
        assert_eq!(value["outputs"], serde_json::json!([]));
        assert!(value.get("cfg").is_none());
        assert_eq!(value["model"]["genus"], 1);
        assert!(value["code_rev"].is_string());
    }
}
