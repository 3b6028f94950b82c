//! Serializable records for the JSON outputs of `batch` and `sample`.

use dehn::solve::{BatchCfg, StretchEstimate, WordReport};
use dehn::{MappingClassWord, Result as EngineResult};
use serde::Serialize;

/// Ratios kept in a record; the full history stays in the library value.
const RATIO_TAIL: usize = 8;

#[derive(Debug, Serialize)]
pub struct BatchReport {
    pub genus: usize,
    pub cfg: CfgRecord,
    pub words: Vec<WordRecord>,
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq)]
pub struct CfgRecord {
    pub max_order: usize,
    pub stretch_iterations: usize,
    pub stretch_tolerance: f64,
    pub stretch_max_letters: usize,
}

impl From<BatchCfg> for CfgRecord {
    fn from(cfg: BatchCfg) -> Self {
        Self {
            max_order: cfg.order.max_iterations,
            stretch_iterations: cfg.stretch.iterations,
            stretch_tolerance: cfg.stretch.tolerance,
            stretch_max_letters: cfg.stretch.max_letters,
        }
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct StretchRecord {
    pub factor: f64,
    pub converged: bool,
    pub iterations: usize,
    pub last_ratios: Vec<f64>,
}

impl From<&StretchEstimate> for StretchRecord {
    fn from(est: &StretchEstimate) -> Self {
        let tail = est.ratios.len().saturating_sub(RATIO_TAIL);
        Self {
            factor: est.factor,
            converged: est.converged,
            iterations: est.iterations,
            last_ratios: est.ratios[tail..].to_vec(),
        }
    }
}

/// One evaluated word. A failed evaluation keeps the word and its error.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct WordRecord {
    pub word: String,
    pub letters: usize,
    pub twists: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<bool>,
    /// Smallest trivial power; 0 for infinite order or when `max_order` ran out.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stretch: Option<StretchRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl WordRecord {
    pub fn new(word: &MappingClassWord, outcome: &EngineResult<WordReport>) -> Self {
        let mut record = Self {
            word: word.to_string(),
            letters: word.len(),
            twists: word.twist_count(),
            identity: None,
            order: None,
            stretch: None,
            error: None,
        };
        match outcome {
            Ok(report) => {
                record.identity = Some(report.identity);
                record.order = Some(report.order.as_sentinel());
                record.stretch = Some(StretchRecord::from(&report.stretch));
            }
            Err(e) => record.error = Some(e.to_string()),
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dehn::generators::hyperelliptic_involution;
    use dehn::solve::{evaluate, OrderCfg, StretchCfg};
    use dehn::{MappingClassError, SurfaceModel};

    #[test]
    fn record_of_involution() {
        let m = SurfaceModel::closed(2).unwrap();
        let iota = hyperelliptic_involution(&m).unwrap();
        let cfg = BatchCfg {
            order: OrderCfg { max_iterations: 8 },
            stretch: StretchCfg {
                iterations: 20,
                tolerance: 1e-10,
                max_letters: 1 << 20,
            },
        };
        let rec = WordRecord::new(&iota, &evaluate(&iota, cfg));
        assert_eq!(rec.identity, Some(false));
        assert_eq!(rec.order, Some(2));
        assert_eq!(rec.twists, 10);
        assert!(rec.error.is_none());
        // Period two: the ratios settle at 1, which is not a stretch.
        let stretch = rec.stretch.unwrap();
        assert!(!stretch.converged);
        assert_eq!(stretch.last_ratios, vec![1.0, 1.0]);
        let json = serde_json::to_value(CfgRecord::from(cfg)).unwrap();
        assert_eq!(json["stretch_max_letters"], 1 << 20);
    }

    #[test]
    fn anosov_word_reports_order_zero() {
        let m = SurfaceModel::closed(1).unwrap();
        let w = MappingClassWord::parse(&m, "c1 c2^-1").unwrap();
        let cfg = BatchCfg {
            order: OrderCfg { max_iterations: 8 },
            stretch: StretchCfg::default(),
        };
        let rec = WordRecord::new(&w, &evaluate(&w, cfg));
        assert_eq!(rec.identity, Some(false));
        assert_eq!(rec.order, Some(0));
        let stretch = rec.stretch.unwrap();
        assert!(stretch.converged);
        assert!((stretch.factor - 2.618_033_988_749_895).abs() < 1e-8);
    }

    #[test]
    fn failed_evaluation_keeps_the_error() {
        let m = SurfaceModel::closed(1).unwrap();
        let w = MappingClassWord::parse(&m, "c1").unwrap();
        let rec = WordRecord::new(&w, &Err(MappingClassError::DegenerateCoordinate));
        assert_eq!(rec.word, "c1");
        assert!(rec.identity.is_none());
        let json = serde_json::to_value(&rec).unwrap();
        assert!(json.get("order").is_none());
        assert!(json["error"].is_string());
    }
}
