use std::cmp::Ordering;
use std::fmt;

/// Tokens read as a missing cell, in addition to blank text.
const NA_TOKENS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>",
    "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

pub fn is_missing_text(text: &str) -> bool {
    text.trim().is_empty() || NA_TOKENS.contains(&text)
}

/// A present cell value. Missing cells never make it into a dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl CellValue {
    /// Reads a delimited-text cell. Returns `None` for a missing cell.
    pub fn from_text(text: &str) -> Option<Self> {
        if is_missing_text(text) {
            return None;
        }
        if is_integer_literal(text) {
            // too wide for i64: keep the digits so distinct keys stay distinct
            return Some(match text.parse::<i64>() {
                Ok(i) => Self::Int(i),
                Err(_) => Self::Text(text.to_string()),
            });
        }
        match text.parse::<f64>() {
            Ok(f) if f.is_finite() => Some(Self::Float(f)),
            _ => Some(Self::Text(text.to_string())),
        }
    }

    pub fn key(&self) -> CellKey<'_> {
        match self {
            Self::Int(i) => CellKey::Int(*i),
            Self::Float(f) => float_key(*f),
            Self::Bool(b) => CellKey::Bool(*b),
            Self::Text(s) => CellKey::Text(s),
        }
    }
}

fn is_integer_literal(text: &str) -> bool {
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

// Integral floats fold onto the integer key so 1000 and 1000.0 compare equal.
fn float_key(f: f64) -> CellKey<'static> {
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        CellKey::Int(f as i64)
    } else {
        CellKey::Float(f.to_bits())
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v:?}"),
            Self::Bool(true) => f.write_str("True"),
            Self::Bool(false) => f.write_str("False"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Hashable, totally ordered view of a cell used for grouping and sorting.
///
/// `Float` holds the bits of a non-integral value. Loading never produces a
/// non-finite float, so for loaded data bit equality is value equality.
/// Ordering is booleans, then numbers, then text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKey<'a> {
    Bool(bool),
    Int(i64),
    Float(u64),
    Text(&'a str),
}

impl CellKey<'_> {
    fn rank(&self) -> u8 {
        match self {
            CellKey::Bool(_) => 0,
            CellKey::Int(_) | CellKey::Float(_) => 1,
            CellKey::Text(_) => 2,
        }
    }
}

impl Ord for CellKey<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (CellKey::Bool(a), CellKey::Bool(b)) => a.cmp(b),
            (CellKey::Int(a), CellKey::Int(b)) => a.cmp(b),
            (CellKey::Float(a), CellKey::Float(b)) => {
                f64::from_bits(*a).total_cmp(&f64::from_bits(*b))
            }
            // ties between an integer and a nearby float put the integer first
            (CellKey::Int(a), CellKey::Float(b)) => (*a as f64)
                .total_cmp(&f64::from_bits(*b))
                .then(Ordering::Less),
            (CellKey::Float(a), CellKey::Int(b)) => f64::from_bits(*a)
                .total_cmp(&(*b as f64))
                .then(Ordering::Greater),
            (CellKey::Text(a), CellKey::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for CellKey<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
