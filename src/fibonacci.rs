use num_bigint::BigUint;
use num_traits::{FromPrimitive, One, Zero};

use crate::binet::{closed_form, Rounding};

/// Generates the first `n` Fibonacci numbers using an iterative approach.
///
/// This algorithm computes each Fibonacci number by summing the two previous values,
/// storing the results in a vector. It runs in O(n) time and uses O(n) space.
///
/// # Parameters
/// - `n`: The number of Fibonacci numbers to compute.
///
/// # Returns
/// A vector containing the first `n` Fibonacci numbers.
///
/// # Example
/// ```
/// use fibonacci_binet::fibonacci;
/// use num_bigint::BigUint;
/// let fib_sequence = fibonacci::seq_basic(10);
/// assert_eq!(fib_sequence[9], BigUint::from(34u32));
/// ```
pub fn seq_basic(n: usize) -> Vec<BigUint> {
    let mut fib_sequence = Vec::with_capacity(n);
    if n == 0 {
        return fib_sequence;
    }
    fib_sequence.push(BigUint::zero());
    if n == 1 {
        return fib_sequence;
    }
    fib_sequence.push(BigUint::one());
    for i in 2..n {
        let next_value = &fib_sequence[i - 1] + &fib_sequence[i - 2];
        fib_sequence.push(next_value);
    }
    fib_sequence
}

/// Finds the largest rank `r` such that the closed form, rounded with `rounding`, agrees with the
/// iterative sequence for every rank in `0..=r`. Ranks above `max_rank` are not examined.
///
/// The sequence is walked one rank at a time and the walk stops at the first mismatch, so the
/// cost does not depend on `max_rank` once the closed form has diverged.
///
/// Returns `None` if the closed form is already wrong at rank 0.
pub fn exact_rank_limit(rounding: Rounding, max_rank: u64) -> Option<u64> {
    let mut expected = BigUint::zero();
    let mut next = BigUint::one();

    let mut limit = None;
    for rank in 0..=max_rank {
        // Negative results can only come from rounding noise at rank 0.
        let computed = BigUint::from_f64(rounding.apply(closed_form(rank)).max(0.0));
        if computed.as_ref() != Some(&expected) {
            log::debug!("closed form diverges at rank {rank}: {computed:?} != {expected}");
            break;
        }
        limit = Some(rank);

        let following = &expected + &next;
        expected = std::mem::replace(&mut next, following);
    }
    limit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binet::MAX_EXACT_RANK;
    use num_traits::ToPrimitive;

    #[test]
    fn short_sequences() {
        assert!(seq_basic(0).is_empty());
        assert_eq!(seq_basic(1), vec![BigUint::zero()]);
        assert_eq!(seq_basic(2), vec![BigUint::zero(), BigUint::one()]);
    }

    #[test]
    fn exceeds_u64() {
        let fibs = seq_basic(100);
        assert_eq!(fibs[93].to_u64(), Some(12_200_160_415_121_876_738));
        assert_eq!(fibs[94].to_u64(), None);
        assert_eq!(
            fibs[99],
            BigUint::parse_bytes(b"218922995834555169026", 10).unwrap()
        );
    }

    #[test]
    fn rounding_is_exact_through_max_exact_rank() {
        let limit = exact_rank_limit(Rounding::Nearest, 100).unwrap();
        assert!(limit >= MAX_EXACT_RANK as u64, "limit {limit}");
        assert!(limit < 100);
    }

    #[test]
    fn unbounded_search_stops_at_first_mismatch() {
        assert_eq!(
            exact_rank_limit(Rounding::Nearest, u64::MAX),
            exact_rank_limit(Rounding::Nearest, 100)
        );
        assert_eq!(exact_rank_limit(Rounding::Nearest, u64::MAX), Some(70));
    }

    #[test]
    fn max_rank_caps_the_search() {
        assert_eq!(exact_rank_limit(Rounding::Nearest, 20), Some(20));
        assert_eq!(exact_rank_limit(Rounding::Nearest, 0), Some(0));
    }
}
