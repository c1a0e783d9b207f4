//! Loading JSON input documents for the command line.
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};
use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use serde::de::{self, DeserializeOwned, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

// ————————————————————————————————————————————————————————————————————————————
// NUMBERS
// ————————————————————————————————————————————————————————————————————————————

/// The source text of a JSON number, or the contents of a JSON string.
///
/// With serde_json's `arbitrary_precision` a number reaches the visitor as
/// its literal digits, so `0.1000000000000000000001` never passes through
/// `f64`.
pub struct RawNumber(String);

impl fmt::Display for RawNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.trim())
    }
}

impl<'de> Deserialize<'de> for RawNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RawNumberVisitor)
    }
}

struct RawNumberVisitor;

impl<'de> Visitor<'de> for RawNumberVisitor {
    type Value = RawNumber;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number or a numeric string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<RawNumber, E> {
        Ok(RawNumber(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<RawNumber, E> {
        Ok(RawNumber(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<RawNumber, E> {
        Ok(RawNumber(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<RawNumber, E> {
        Ok(RawNumber(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<RawNumber, E> {
        Ok(RawNumber(v.to_string()))
    }

    // arbitrary_precision hands numbers over as a one-entry map
    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<RawNumber, A::Error> {
        let number = serde_json::Number::deserialize(de::value::MapAccessDeserializer::new(map))?;
        Ok(RawNumber(number.to_string()))
    }
}

/// Decimal read from a JSON number or string, digit for digit.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawNumber")]
pub struct Decimal(pub BigDecimal);

impl TryFrom<RawNumber> for Decimal {
    type Error = String;
    fn try_from(raw: RawNumber) -> Result<Self, Self::Error> {
        let text = raw.to_string();
        BigDecimal::from_str(&text)
            .map(Decimal)
            .map_err(|error| format!("`{text}` is not a decimal: {error}"))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawNumber")]
pub struct Integer(pub BigInt);

impl TryFrom<RawNumber> for Integer {
    type Error = String;
    fn try_from(raw: RawNumber) -> Result<Self, Self::Error> {
        let text = raw.to_string();
        BigInt::from_str(&text)
            .map(Integer)
            .map_err(|error| format!("`{text}` is not an integer: {error}"))
    }
}

// ————————————————————————————————————————————————————————————————————————————
// DOCUMENTS
// ————————————————————————————————————————————————————————————————————————————

/// Deserialize with JSON-path context in error messages.
pub fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(|err| {
        let path = err.path().to_string();
        anyhow!("at JSON path {path} → {}", err.into_inner())
    })
}

pub fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    from_str_with_path(&source)
        .with_context(|| format!("failed to parse {}", path.display()))
}

/// Load every document matched by `patterns`, in pattern order.
pub fn load_documents<T: DeserializeOwned>(patterns: &[String]) -> Result<Vec<(PathBuf, T)>> {
    let paths = resolve_file_path_patterns(patterns)?;
    let mut out = Vec::with_capacity(paths.len());
    for path in paths {
        let doc = load_document(&path)?;
        tracing::debug!(path = %path.display(), "loaded input document");
        out.push((path, doc));
    }
    Ok(out)
}

/// Expand glob patterns; literal paths pass through untouched.
pub fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{' ))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern).with_context(|| format!("bad glob pattern: {pattern}"))? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————
