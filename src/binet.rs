use std::fmt;

/// √5, the denominator of the Euler–Binet formula.
pub const SQRT_5: f64 = 2.236_067_977_499_79;

/// The golden ratio φ = (1 + √5) / 2.
pub const PHI: f64 = (1.0 + SQRT_5) / 2.0;

/// The conjugate of the golden ratio, ψ = 1 - φ.
pub const PSI: f64 = 1.0 - PHI;

/// Largest rank for which the closed form, evaluated in double precision and rounded to the
/// nearest integer, equals the true Fibonacci number.
pub const MAX_EXACT_RANK: i64 = 70;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FibonacciError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Rank {rank} is out of range, the closed form is only exact up to rank {max}")]
    RankOutOfRange { rank: i64, max: i64 },
}

/// How the real-valued result of the closed form is turned into an integer.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    /// Round to the nearest integer, halfway cases away from zero.
    #[default]
    Nearest,
    /// Truncate toward zero. Drifts off by one as soon as the floating point error pushes the
    /// result below the true value.
    Truncate,
}

impl Rounding {
    pub fn apply(self, x: f64) -> f64 {
        match self {
            Rounding::Nearest => x.round(),
            Rounding::Truncate => x.trunc(),
        }
    }
}

impl fmt::Display for Rounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rounding::Nearest => f.write_str("nearest"),
            Rounding::Truncate => f.write_str("truncate"),
        }
    }
}

/// The Fibonacci number closest to some arbitrary value, together with the sequence values
/// enclosing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nearest {
    pub value: u64,
    pub lower: u64,
    pub upper: u64,
}

impl Nearest {
    /// Whether `a` itself is a Fibonacci number, i.e. it coincides with one of the bounds.
    pub fn is_fibonacci(&self, a: f64) -> bool {
        a == self.lower as f64 || a == self.upper as f64
    }
}

/// Evaluates (φⁿ - ψⁿ) / √5 without rounding it.
pub fn closed_form(n: u64) -> f64 {
    let n = n as f64;
    (PHI.powf(n) - PSI.powf(n)) / SQRT_5
}

fn checked_rank(n: i64) -> Result<u64, FibonacciError> {
    if n < 0 {
        return Err(FibonacciError::InvalidArgument(format!(
            "rank must be non-negative, got {n}"
        )));
    }
    if n > MAX_EXACT_RANK {
        return Err(FibonacciError::RankOutOfRange {
            rank: n,
            max: MAX_EXACT_RANK,
        });
    }
    Ok(n as u64)
}

/// Computes the Fibonacci number at rank `n` with the Euler–Binet formula.
///
/// # Example
/// ```
/// use fibonacci_binet::binet::rank_to_value;
/// assert_eq!(rank_to_value(10), Ok(55));
/// ```
pub fn rank_to_value(n: i64) -> Result<u64, FibonacciError> {
    rank_to_value_with(n, Rounding::Nearest)
}

/// Same as [`rank_to_value`] with an explicit rounding mode.
pub fn rank_to_value_with(n: i64, rounding: Rounding) -> Result<u64, FibonacciError> {
    let n = checked_rank(n)?;

    // Within the exact range the value is far below 2^53, so the cast is lossless. Tiny
    // negative results for rank 0 saturate to 0.
    Ok(rounding.apply(closed_form(n)) as u64)
}

/// Computes the Fibonacci numbers for every rank in `ranks`, in the same order.
///
/// Fails on the first rank that is out of the formula's domain, no partial result is returned.
///
/// # Example
/// ```
/// use fibonacci_binet::binet::ranks_to_values;
/// assert_eq!(ranks_to_values(&[5, 10, 15]), Ok(vec![5, 55, 610]));
/// ```
pub fn ranks_to_values(ranks: &[i64]) -> Result<Vec<u64>, FibonacciError> {
    ranks_to_values_with(ranks, Rounding::Nearest)
}

pub fn ranks_to_values_with(
    ranks: &[i64],
    rounding: Rounding,
) -> Result<Vec<u64>, FibonacciError> {
    ranks
        .iter()
        .map(|&n| rank_to_value_with(n, rounding))
        .collect()
}

/// Real-valued rank at which the closed form equals `a`: ln(a·√5) / ln(φ).
pub fn rank_estimate(a: f64) -> f64 {
    (a * SQRT_5).ln() / PHI.ln()
}

/// Rounds a rank estimate to an integer rank. Halfway cases go away from zero.
pub fn nearest_rank(estimate: f64) -> i64 {
    estimate.round() as i64
}

/// Finds the Fibonacci number closest to `a` along with its neighbors in the sequence.
///
/// If `a` is itself a Fibonacci number, it is returned as `value` and matches one of the
/// bounds, see [`Nearest::is_fibonacci`].
///
/// # Example
/// ```
/// use fibonacci_binet::binet::value_to_rank;
/// let nearest = value_to_rank(100.0).unwrap();
/// assert_eq!((nearest.value, nearest.lower, nearest.upper), (89, 89, 144));
/// assert!(!nearest.is_fibonacci(100.0));
/// ```
pub fn value_to_rank(a: f64) -> Result<Nearest, FibonacciError> {
    value_to_rank_with(a, Rounding::Nearest)
}

pub fn value_to_rank_with(a: f64, rounding: Rounding) -> Result<Nearest, FibonacciError> {
    if !a.is_finite() || a <= 0.0 {
        return Err(FibonacciError::InvalidArgument(format!(
            "value must be a positive finite number, got {a}"
        )));
    }

    let estimate = rank_estimate(a);
    let rank = nearest_rank(estimate);
    log::trace!("value {a} has rank estimate {estimate}, rounded to {rank}");

    // Nothing lies below rank 0, so small values are bracketed by F(0) and F(1).
    if rank <= 0 {
        return Ok(Nearest {
            value: rank_to_value_with(0, rounding)?,
            lower: rank_to_value_with(0, rounding)?,
            upper: rank_to_value_with(1, rounding)?,
        });
    }

    let value = rank_to_value_with(rank, rounding)?;
    let nearest = if (rank as f64) < estimate {
        Nearest {
            value,
            lower: value,
            upper: rank_to_value_with(rank + 1, rounding)?,
        }
    } else {
        Nearest {
            value,
            lower: rank_to_value_with(rank - 1, rounding)?,
            upper: value,
        }
    };

    Ok(nearest)
}
