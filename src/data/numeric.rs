use std::cmp::Ordering;
use std::fmt;

use super::model::CellValue;

// ---------------------------------------------------------------------------
// Numeric – result of coercing a cell to a number
// ---------------------------------------------------------------------------

/// A coerced cell: either a number or the missing marker.
///
/// `NaN` is never stored in `Value`; it becomes `Missing` on the way in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Numeric {
    Value(f64),
    Missing,
}

impl Numeric {
    /// Best-effort conversion of a cell. Never fails.
    pub fn coerce(cell: &CellValue) -> Self {
        match cell {
            CellValue::Integer(i) => Numeric::from(*i as f64),
            CellValue::Float(v) => Numeric::from(*v),
            CellValue::Text(s) => Self::parse(s),
            CellValue::Missing => Numeric::Missing,
        }
    }

    /// Parse free text, mapping anything unparsable to `Missing`.
    pub fn parse(text: &str) -> Self {
        text.trim()
            .parse::<f64>()
            .map(Numeric::from)
            .unwrap_or(Numeric::Missing)
    }

    pub fn value(self) -> Option<f64> {
        match self {
            Numeric::Value(v) => Some(v),
            Numeric::Missing => None,
        }
    }

    pub fn is_missing(self) -> bool {
        matches!(self, Numeric::Missing)
    }

    /// Ascending order with `Missing` below every number.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Numeric::Value(a), Numeric::Value(b)) => a.total_cmp(b),
            (Numeric::Value(_), Numeric::Missing) => Ordering::Greater,
            (Numeric::Missing, Numeric::Value(_)) => Ordering::Less,
            (Numeric::Missing, Numeric::Missing) => Ordering::Equal,
        }
    }
}

impl From<f64> for Numeric {
    fn from(v: f64) -> Self {
        if v.is_nan() {
            Numeric::Missing
        } else {
            Numeric::Value(v)
        }
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Numeric::Value(v) => write!(f, "{v}"),
            Numeric::Missing => write!(f, "n/a"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerces_typed_cells() {
        assert_eq!(Numeric::coerce(&CellValue::Integer(42)), Numeric::Value(42.0));
        assert_eq!(Numeric::coerce(&CellValue::Float(-1.5)), Numeric::Value(-1.5));
        assert_eq!(Numeric::coerce(&CellValue::Missing), Numeric::Missing);
    }

    #[test]
    fn coerces_text_cells() {
        assert_eq!(Numeric::coerce(&CellValue::Text("300".into())), Numeric::Value(300.0));
        assert_eq!(Numeric::coerce(&CellValue::Text(" 1e3 ".into())), Numeric::Value(1000.0));
        assert_eq!(Numeric::coerce(&CellValue::Text("bad".into())), Numeric::Missing);
        assert_eq!(Numeric::coerce(&CellValue::Text("".into())), Numeric::Missing);
        assert_eq!(Numeric::coerce(&CellValue::Text("1,234".into())), Numeric::Missing);
        assert_eq!(Numeric::coerce(&CellValue::Text("NaN".into())), Numeric::Missing);
    }

    #[test]
    fn coercion_is_idempotent() {
        for v in [0.0, -99.0, 3.25, 1e12] {
            let once = Numeric::from(v);
            let again = Numeric::coerce(&CellValue::Float(once.value().unwrap()));
            assert_eq!(once, again);
            assert_eq!(Numeric::parse(&once.to_string()), once);
        }
        assert_eq!(Numeric::parse(&Numeric::Missing.to_string()), Numeric::Missing);
    }

    #[test]
    fn missing_ranks_below_every_number() {
        let low = Numeric::Value(f64::NEG_INFINITY);
        assert_eq!(Numeric::Missing.rank_cmp(&low), Ordering::Less);
        assert_eq!(low.rank_cmp(&Numeric::Missing), Ordering::Greater);
        assert_eq!(Numeric::Missing.rank_cmp(&Numeric::Missing), Ordering::Equal);
        assert_eq!(
            Numeric::Value(1.0).rank_cmp(&Numeric::Value(2.0)),
            Ordering::Less
        );
    }
}
