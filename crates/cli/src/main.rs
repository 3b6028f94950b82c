mod provenance;
mod report;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use dehn::generators::{random_word, ReplayToken};
use dehn::solve::{
    evaluate_batch, BatchCfg, OrderCfg, StretchCfg, DEFAULT_MAX_ORDER, DEFAULT_STRETCH_ITERATIONS,
    DEFAULT_STRETCH_LETTERS, DEFAULT_STRETCH_TOLERANCE,
};
use dehn::{MappingClassWord, SurfaceModel};
use provenance::{Provenance, WordSource};
use report::{BatchReport, StretchRecord, WordRecord};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::fmt::SubscriberBuilder;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Mapping class words on closed surfaces: identity, order, stretch factor")]
struct Cmd {
    /// Genus of the closed surface
    #[arg(long, global = true, default_value_t = 2)]
    genus: usize,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Decide whether a word is the identity on the witness curves
    Identity {
        #[arg(long, allow_hyphen_values = true)]
        word: String,
    },
    /// Decide whether two words act identically
    Equals {
        #[arg(long, allow_hyphen_values = true)]
        word: String,
        #[arg(long, allow_hyphen_values = true)]
        other: String,
    },
    /// Smallest trivial power, 0 for infinite order or an exhausted bound
    Order {
        #[arg(long, allow_hyphen_values = true)]
        word: String,
        #[arg(long, default_value_t = DEFAULT_MAX_ORDER)]
        max_iterations: usize,
    },
    /// Power-iteration estimate of the stretch factor
    Stretch {
        #[arg(long, allow_hyphen_values = true)]
        word: String,
        #[arg(long, default_value_t = DEFAULT_STRETCH_ITERATIONS)]
        iterations: usize,
        #[arg(long, default_value_t = DEFAULT_STRETCH_TOLERANCE)]
        tolerance: f64,
        /// Stop once the iterated curve word exceeds this many letters
        #[arg(long, default_value_t = DEFAULT_STRETCH_LETTERS)]
        max_letters: usize,
        /// Reference curve to seed from (default: the generic seed curve)
        #[arg(long)]
        seed_curve: Option<String>,
    },
    /// Evaluate a JSON array of word strings and write a report
    Batch {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
        #[command(flatten)]
        eval: EvalArgs,
    },
    /// Evaluate reproducible random Humphries words and write a report
    Sample {
        #[arg(long, default_value_t = 16)]
        count: u64,
        #[arg(long, default_value_t = 20)]
        length: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long)]
        out: PathBuf,
        #[command(flatten)]
        eval: EvalArgs,
    },
    /// Print the engine version and the surface model in use
    Report,
}

#[derive(Args, Clone, Copy)]
struct EvalArgs {
    #[arg(long, default_value_t = DEFAULT_MAX_ORDER)]
    max_order: usize,
    #[arg(long, default_value_t = DEFAULT_STRETCH_ITERATIONS)]
    iterations: usize,
    #[arg(long, default_value_t = DEFAULT_STRETCH_TOLERANCE)]
    tolerance: f64,
    #[arg(long, default_value_t = DEFAULT_STRETCH_LETTERS)]
    max_letters: usize,
}

impl From<EvalArgs> for BatchCfg {
    fn from(a: EvalArgs) -> Self {
        BatchCfg {
            order: OrderCfg {
                max_iterations: a.max_order,
            },
            stretch: StretchCfg {
                iterations: a.iterations,
                tolerance: a.tolerance,
                max_letters: a.max_letters,
            },
        }
    }
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    let model = SurfaceModel::closed(cmd.genus)
        .with_context(|| format!("building surface model for genus {}", cmd.genus))?;
    match cmd.action {
        Action::Identity { word } => identity(&model, word),
        Action::Equals { word, other } => equals(&model, word, other),
        Action::Order {
            word,
            max_iterations,
        } => order(&model, word, max_iterations),
        Action::Stretch {
            word,
            iterations,
            tolerance,
            max_letters,
            seed_curve,
        } => {
            let cfg = StretchCfg {
                iterations,
                tolerance,
                max_letters,
            };
            stretch(&model, word, cfg, seed_curve)
        }
        Action::Batch { input, out, eval } => batch(&model, input, out, eval.into()),
        Action::Sample {
            count,
            length,
            seed,
            out,
            eval,
        } => sample(&model, count, length, seed, out, eval.into()),
        Action::Report => report(&model),
    }
}

fn parse_word(model: &Arc<SurfaceModel>, text: &str) -> Result<MappingClassWord> {
    MappingClassWord::parse(model, text).with_context(|| format!("parsing word `{text}`"))
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn identity(model: &Arc<SurfaceModel>, word: String) -> Result<()> {
    tracing::info!(genus = model.genus(), word, "identity");
    let w = parse_word(model, &word)?;
    print_json(&json!({ "word": word, "identity": w.is_identity()? }))
}

fn equals(model: &Arc<SurfaceModel>, word: String, other: String) -> Result<()> {
    tracing::info!(genus = model.genus(), word, other, "equals");
    let equal = parse_word(model, &word)?.equals(&parse_word(model, &other)?)?;
    print_json(&json!({ "word": word, "other": other, "equal": equal }))
}

fn order(model: &Arc<SurfaceModel>, word: String, max_iterations: usize) -> Result<()> {
    tracing::info!(genus = model.genus(), word, max_iterations, "order");
    let order = parse_word(model, &word)?.order(max_iterations)?;
    print_json(&json!({ "word": word, "order": order, "max_iterations": max_iterations }))
}

fn stretch(
    model: &Arc<SurfaceModel>,
    word: String,
    cfg: StretchCfg,
    seed_curve: Option<String>,
) -> Result<()> {
    tracing::info!(
        genus = model.genus(),
        word,
        iterations = cfg.iterations,
        tolerance = cfg.tolerance,
        max_letters = cfg.max_letters,
        seed_curve = ?seed_curve,
        "stretch"
    );
    let w = parse_word(model, &word)?;
    let seed = match &seed_curve {
        Some(name) => {
            let index = model.reference().index_of(name)?;
            model.reference().curve_word(index)?.clone()
        }
        None => model.generic_seed()?,
    };
    let est = w.estimate_stretch(&seed, cfg)?;
    if !est.converged {
        tracing::warn!(iterations = est.iterations, last = est.factor, "stretch factor did not converge");
    }
    print_json(&json!({ "word": word, "stretch": StretchRecord::from(&est) }))
}

fn batch(model: &Arc<SurfaceModel>, input: PathBuf, out: PathBuf, cfg: BatchCfg) -> Result<()> {
    tracing::info!(genus = model.genus(), input = %input.display(), out = %out.display(), "batch");
    let raw = std::fs::read(&input).with_context(|| format!("reading {}", input.display()))?;
    let texts: Vec<String> = serde_json::from_slice(&raw)
        .with_context(|| format!("{} must be a JSON array of word strings", input.display()))?;
    let words = texts
        .iter()
        .map(|t| parse_word(model, t))
        .collect::<Result<Vec<_>>>()?;
    let source = WordSource::Batch {
        input: input.to_string_lossy().into_owned(),
        words: words.len(),
    };
    evaluate_and_write(model, &words, cfg, &out, source)
}

fn sample(
    model: &Arc<SurfaceModel>,
    count: u64,
    length: usize,
    seed: u64,
    out: PathBuf,
    cfg: BatchCfg,
) -> Result<()> {
    tracing::info!(genus = model.genus(), count, length, seed, out = %out.display(), "sample");
    let words = (0..count)
        .map(|index| random_word(model, length, ReplayToken { seed, index }))
        .collect::<dehn::Result<Vec<_>>>()?;
    let source = WordSource::Sample {
        count,
        length,
        seed,
    };
    evaluate_and_write(model, &words, cfg, &out, source)
}

fn evaluate_and_write(
    model: &Arc<SurfaceModel>,
    words: &[MappingClassWord],
    cfg: BatchCfg,
    out: &Path,
    source: WordSource,
) -> Result<()> {
    let outcomes = evaluate_batch(words, cfg);
    let records: Vec<WordRecord> = words
        .iter()
        .zip(outcomes.iter())
        .map(|(w, o)| WordRecord::new(w, o))
        .collect();
    let failed = records.iter().filter(|r| r.error.is_some()).count();
    let unconverged = records
        .iter()
        .filter(|r| r.stretch.as_ref().is_some_and(|s| !s.converged))
        .count();
    tracing::info!(words = records.len(), failed, unconverged, "evaluated");

    let report = BatchReport {
        genus: model.genus(),
        cfg: cfg.into(),
        words: records,
    };
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    std::fs::write(out, serde_json::to_vec_pretty(&report)?)
        .with_context(|| format!("writing {}", out.display()))?;

    let provenance = Provenance::for_report(model, report.cfg, source);
    let prov_path = provenance::write_sidecar(out, provenance)?;
    tracing::info!(report = %out.display(), provenance = %prov_path.display(), "wrote");
    Ok(())
}

fn report(model: &Arc<SurfaceModel>) -> Result<()> {
    print_json(&serde_json::to_value(Provenance::of_model(model))?)
}
