use crate::{QtError, QtResult};

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: f64,
    pub rel: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: f64, b: f64, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: f64, what: &'static str) -> QtResult<f64> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(QtError::NonFinite { what, value: v })
    }
}

/// Finite and strictly greater than zero.
pub fn ensure_positive(v: f64, what: &'static str) -> QtResult<f64> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(QtError::InvalidArg { what })
    }
}

/// Finite and within the closed interval `[min, max]`.
pub fn ensure_in_range(v: f64, min: f64, max: f64, what: &'static str) -> QtResult<f64> {
    let v = ensure_finite(v, what)?;
    if (min..=max).contains(&v) {
        Ok(v)
    } else {
        Err(QtError::OutOfRange {
            what,
            value: v,
            min,
            max,
        })
    }
}

/// Square root with the radicand clamped at zero.
///
/// Negative inputs map to 0.0 instead of NaN. NaN stays NaN.
#[inline]
pub fn clamped_sqrt(v: f64) -> f64 {
    if v <= 0.0 { 0.0 } else { v.sqrt() }
}
