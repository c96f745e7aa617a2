//! # Binet Fibonacci Library
//!
//! This library computes Fibonacci numbers with the Euler–Binet closed form, and performs the
//! inverse lookup: given an arbitrary number, find the nearest Fibonacci number together with its
//! neighbors in the sequence. Both operations are a handful of floating point operations, so they
//! run in constant time.
//!
//! ## Key Features
//! - **Closed Form**: `F(n) = (φⁿ - ψⁿ) / √5`, rounded to the nearest integer.
//! - **Inverse Lookup**: the rank of a value is estimated as `ln(a·√5) / ln(φ)` and rounded.
//! - **Exact Reference**: an iterative sequence over big integers to check the closed form against.
//! - **Interactive Menu**: a small terminal calculator with a timing report for every lookup.
//!
//! ## Overview of Modules
//!
//! ### `binet`
//! `rank_to_value`, `ranks_to_values` and `value_to_rank`, the constants they are built on and
//! `FibonacciError`. Double precision keeps the closed form exact up to `MAX_EXACT_RANK`; larger
//! ranks are rejected instead of returning a value that might be off.
//!
//! ### `fibonacci`
//! `seq_basic` generates the first `n` Fibonacci numbers iteratively. `exact_rank_limit` walks
//! the same recurrence to find where the closed form stops matching.
//!
//! ### `timing`
//! Repeats a call and reports the mean and standard deviation of its wall-clock duration.
//!
//! ### `display` and `menu`
//! Input parsing, the sentences shown to the user, and the menu loop behind a `Terminal` trait.
//!
//! ## Usage Example
//! ```rust
//! use fibonacci_binet::binet::{ranks_to_values, value_to_rank};
//! assert_eq!(ranks_to_values(&[5, 10, 15]).unwrap(), vec![5, 55, 610]);
//!
//! let nearest = value_to_rank(100.0).unwrap();
//! assert_eq!((nearest.lower, nearest.upper), (89, 144));
//! ```

pub mod binet;
pub mod display;
pub mod fibonacci;
pub mod menu;
pub mod timing;
