//! Minimal CLI: load JSON → (bin | merge | compare | sort) → JSON
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use bigdecimal::{BigDecimal, RoundingMode};
use clap::{Args, Parser, Subcommand, ValueEnum};
use indexmap::IndexMap;
use num_bigint::BigInt;
use serde_json::{json, Map, Value};

use crate::input::{self, Decimal, Integer};
use crate::interval::{self, DivisionContext};
use crate::{merge, ordering, sets};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// aggregate keyed numeric JSON documents: histograms, merged counts, set overlap
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    /// more log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// bin the values of a `{id: number}` object into fixed-width intervals
    Bin(BinOut),
    /// sum `{key: integer}` objects key by key
    Merge(MergeOut),
    /// overlap and uniqueness between two JSON arrays treated as sets
    Compare(CompareOut),
    /// re-emit a `{key: number}` object ordered by value
    Sort(SortOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(Args, Debug, Clone)]
struct OutputSettings {
    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(clap::Parser, Debug)]
struct BinOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// origin of bin 0 (defaults to the smallest input value)
    #[arg(long, allow_hyphen_values = true)]
    min: Option<BigDecimal>,

    /// bin width; 0 puts every value in bin 0, a negative width counts bins downward
    #[arg(long, allow_hyphen_values = true)]
    width: BigDecimal,

    /// significant digits kept when dividing by the width (1 to 100)
    #[arg(long, default_value_t = 34)]
    precision: u64,

    #[arg(long, value_enum, default_value_t = Rounding::HalfEven)]
    rounding: Rounding,

    #[command(flatten)]
    output_settings: OutputSettings,
}

#[derive(clap::Parser, Debug)]
struct MergeOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    output_settings: OutputSettings,
}

#[derive(clap::Parser, Debug)]
struct CompareOut {
    /// the `s0` set
    left: PathBuf,
    /// the `s1` set
    right: PathBuf,

    /// also list the overlapping and unique members
    #[arg(long)]
    members: bool,

    #[command(flatten)]
    output_settings: OutputSettings,
}

#[derive(clap::Parser, Debug)]
struct SortOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    output_settings: OutputSettings,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Rounding {
    Up,
    Down,
    Ceiling,
    Floor,
    HalfUp,
    HalfDown,
    HalfEven,
}

impl From<Rounding> for RoundingMode {
    fn from(r: Rounding) -> Self {
        match r {
            Rounding::Up => RoundingMode::Up,
            Rounding::Down => RoundingMode::Down,
            Rounding::Ceiling => RoundingMode::Ceiling,
            Rounding::Floor => RoundingMode::Floor,
            Rounding::HalfUp => RoundingMode::HalfUp,
            Rounding::HalfDown => RoundingMode::HalfDown,
            Rounding::HalfEven => RoundingMode::HalfEven,
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl OutputSettings {
    fn emit(&self, value: &Value) -> Result<()> {
        let src = serde_json::to_string_pretty(value)?;
        match self.out.as_ref() {
            Some(out) => {
                if let Some(parent) = out.parent() {
                    std::fs::create_dir_all(parent)
                        .with_context(|| format!("failed to create {}", parent.display()))?;
                }
                std::fs::write(out, &src)
                    .with_context(|| format!("failed to write {}", out.display()))?;
                tracing::info!(path = %out.display(), "wrote output");
            }
            None => println!("{src}"),
        }
        Ok(())
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    /// Env-filter level for the `-v` count.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    pub fn init_logging(&self) {
        tracing_subscriber::fmt()
            .with_env_filter(self.log_level())
            .with_writer(std::io::stderr)
            .with_target(self.verbose >= 2)
            .with_line_number(self.verbose >= 3)
            .init();
        tracing::debug!(verbose = self.verbose, "logging initialised");
    }

    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Bin(target) => {
                let value = target.execute()?;
                target.output_settings.emit(&value)
            }
            Command::Merge(target) => {
                let value = target.execute()?;
                target.output_settings.emit(&value)
            }
            Command::Compare(target) => {
                let value = target.execute()?;
                target.output_settings.emit(&value)
            }
            Command::Sort(target) => {
                let value = target.execute()?;
                target.output_settings.emit(&value)
            }
        }
    }
}

impl BinOut {
    fn execute(&self) -> Result<Value> {
        let ctx = DivisionContext::new(self.precision, self.rounding.into())?;
        let mut values: IndexMap<String, BigDecimal> = IndexMap::new();
        for (path, doc) in input::load_documents::<IndexMap<String, Decimal>>(&self.input_settings.input)? {
            tracing::info!(path = %path.display(), entries = doc.len(), "binning input");
            values.extend(doc.into_iter().map(|(k, Decimal(v))| (k, v)));
        }
        let min = match &self.min {
            Some(min) => min.clone(),
            None => ordering::min_max(values.values())
                .context("cannot pick a default --min")?
                .min,
        };
        tracing::debug!(%min, width = %self.width, ?ctx, "bin settings");

        let histogram = interval::bin(&min, &self.width, values.values(), &ctx)?;
        let mut counts = Map::new();
        let mut labels = Map::new();
        let mut mins = Map::new();
        for (index, count, label, bin_min) in histogram.rows() {
            counts.insert(index.to_string(), json!(count));
            labels.insert(index.to_string(), json!(label));
            mins.insert(index.to_string(), json!(bin_min.to_string()));
        }
        Ok(json!({ "counts": counts, "labels": labels, "mins": mins }))
    }
}

impl MergeOut {
    fn execute(&self) -> Result<Value> {
        let mut total: IndexMap<String, BigInt> = IndexMap::new();
        for (path, doc) in input::load_documents::<IndexMap<String, Integer>>(&self.input_settings.input)? {
            tracing::info!(path = %path.display(), entries = doc.len(), "merging input");
            let part: BTreeMap<String, BigInt> = doc.into_iter().map(|(k, Integer(v))| (k, v)).collect();
            merge::merge_into(&mut total, &part);
        }
        let out = total
            .into_iter()
            .map(|(k, v)| (k, integer_json(&v)))
            .collect::<Map<_, _>>();
        Ok(Value::Object(out))
    }
}

impl CompareOut {
    fn execute(&self) -> Result<Value> {
        let s0 = load_set(&self.left)?;
        let s1 = load_set(&self.right)?;
        tracing::info!(s0 = s0.len(), s1 = s1.len(), "comparing sets");
        if !self.members {
            return Ok(serde_json::to_value(sets::union_counts(&s0, &s1))?);
        }
        let counts = sets::union_and_counts(&s0, &s1).counts;
        let uniques = sets::union_and_uniques(&s0, &s1);
        Ok(json!({
            "counts": counts,
            "overlap": sorted(uniques.overlap),
            "unique_to_s1": sorted(uniques.unique_to_s1),
            "unique_to_s0": sorted(uniques.unique_to_s0),
        }))
    }
}

impl SortOut {
    fn execute(&self) -> Result<Value> {
        let mut values: IndexMap<String, BigDecimal> = IndexMap::new();
        for (_, doc) in input::load_documents::<IndexMap<String, Decimal>>(&self.input_settings.input)? {
            values.extend(doc.into_iter().map(|(k, Decimal(v))| (k, v)));
        }
        let out = ordering::order_by_value(&values)
            .into_iter()
            .map(|(k, v)| (k, Value::String(v.to_string())))
            .collect::<Map<_, _>>();
        Ok(Value::Object(out))
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

/// Set members are compared by their canonical JSON text.
fn load_set(path: &Path) -> Result<HashSet<String>> {
    let doc = input::load_document::<Value>(path)?;
    let Value::Array(items) = doc else {
        bail!("{} must hold a JSON array", path.display());
    };
    Ok(items
        .into_iter()
        .map(|item| match item {
            Value::String(s) => s,
            other => other.to_string(),
        })
        .collect())
}

fn sorted(set: HashSet<String>) -> Vec<String> {
    let mut xs = set.into_iter().collect::<Vec<_>>();
    xs.sort();
    xs
}

/// JSON number when it fits in `i64`, string otherwise.
fn integer_json(v: &BigInt) -> Value {
    match i64::try_from(v) {
        Ok(n) => Value::from(n),
        Err(_) => Value::String(v.to_string()),
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————
