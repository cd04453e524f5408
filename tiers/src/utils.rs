use crate::error::{Result, TierError};

/// Parse textual tier inputs into finite `f64` values.
///
/// `field` names the input list in the error (`"threshold"`, `"rate"`).
///
/// # Errors
///
/// Returns `TierError::InvalidInput` for the first value that does not parse
/// or parses to NaN/infinity.
pub fn parse_values<S: AsRef<str>>(field: &'static str, raw: &[S]) -> Result<Vec<f64>> {
    raw.iter()
        .enumerate()
        .map(|(index, s)| parse_value(field, index, s.as_ref()))
        .collect()
}

fn parse_value(field: &'static str, index: usize, raw: &str) -> Result<f64> {
    let invalid = || TierError::InvalidInput {
        field,
        index,
        value: raw.to_string(),
    };
    let value: f64 = raw.trim().parse().map_err(|_| invalid())?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(invalid())
    }
}

/// Reject any non-finite value in an already-numeric input list.
pub fn ensure_finite(field: &'static str, values: &[f64]) -> Result<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(TierError::InvalidInput {
            field,
            index,
            value: values[index].to_string(),
        }),
        None => Ok(()),
    }
}

/// Check `len(rates) == len(thresholds) + 1`.
pub fn ensure_shape(thresholds: usize, rates: usize) -> Result<()> {
    if rates == thresholds + 1 {
        Ok(())
    } else {
        Err(TierError::ShapeMismatch { thresholds, rates })
    }
}

/// Render a number without currency symbols or digit grouping.
///
/// Whole numbers drop the fractional part (`2000000`, not `2000000.0`).
pub fn plain_number(value: f64) -> String {
    format!("{value}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_values_basic() {
        let out = parse_values("rate", &["1.25", "1.00", " 0.75 "]).unwrap();
        assert_eq!(out, vec![1.25, 1.0, 0.75]);
    }

    #[test]
    fn test_parse_values_empty() {
        let out = parse_values::<&str>("threshold", &[]).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_parse_values_rejects_garbage() {
        let err = parse_values("threshold", &["2000000", "abc"]).unwrap_err();
        match err {
            TierError::InvalidInput {
                field,
                index,
                value,
            } => {
                assert_eq!(field, "threshold");
                assert_eq!(index, 1);
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_values_rejects_non_finite() {
        assert!(parse_values("rate", &["inf"]).is_err());
        assert!(parse_values("rate", &["NaN"]).is_err());
        assert!(parse_values("rate", &[""]).is_err());
    }

    #[test]
    fn test_ensure_finite() {
        assert!(ensure_finite("rate", &[1.0, 2.0]).is_ok());
        let err = ensure_finite("rate", &[1.0, f64::NAN]).unwrap_err();
        assert!(matches!(
            err,
            TierError::InvalidInput { field: "rate", index: 1, .. }
        ));
    }

    #[test]
    fn test_ensure_shape() {
        assert!(ensure_shape(0, 1).is_ok());
        assert!(ensure_shape(2, 3).is_ok());
        assert!(matches!(
            ensure_shape(2, 2),
            Err(TierError::ShapeMismatch {
                thresholds: 2,
                rates: 2
            })
        ));
    }

    #[test]
    fn test_plain_number() {
        assert_eq!(plain_number(2_000_000.0), "2000000");
        assert_eq!(plain_number(1_500_000.5), "1500000.5");
        assert_eq!(plain_number(0.0), "0");
    }
}
