use std::fmt::Display;

use crate::binet::Nearest;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("Invalid input '{0}'. Needs to be either 1, 2 or 3. Please try again.")]
    InvalidSelection(String),
    #[error("Could not parse '{input}': {reason}")]
    Parse { input: String, reason: String },
}

/// English ordinal of `n`: 1st, 2nd, 3rd, 4th, 11th, 21st, ...
pub fn ordinal(n: i64) -> String {
    let suffix = match (n.unsigned_abs() % 10, n.unsigned_abs() % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

// "a", "a and b", "a, b and c"
fn join_list<T: Display>(items: &[T]) -> String {
    let items: Vec<String> = items.iter().map(|i| i.to_string()).collect();
    match items.split_last() {
        None => String::new(),
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} and {}", rest.join(", "), last),
    }
}

/// Sentence reporting the Fibonacci numbers found for `ranks`.
///
/// ```
/// use fibonacci_binet::display::describe_ranks;
/// assert_eq!(
///     describe_ranks(&[5, 10, 15], &[5, 55, 610]),
///     "The 5th, 10th and 15th Fibonacci numbers are 5, 55 and 610."
/// );
/// ```
pub fn describe_ranks(ranks: &[i64], values: &[u64]) -> String {
    let ordinals: Vec<String> = ranks.iter().map(|&n| ordinal(n)).collect();
    let (noun, verb) = if ranks.len() == 1 {
        ("number", "is")
    } else {
        ("numbers", "are")
    };
    format!(
        "The {} Fibonacci {noun} {verb} {}.",
        join_list(&ordinals),
        join_list(values)
    )
}

/// Report for the nearest Fibonacci number to `a`.
pub fn describe_nearest(a: f64, nearest: &Nearest) -> String {
    if nearest.is_fibonacci(a) {
        format!("{a} is a Fibonacci number")
    } else {
        format!(
            "The closest number to {a} in the Fibonacci sequence is {}.\n\
             The Fibonacci number immediately lower than {a} is {}.\n\
             The Fibonacci number immediately higher than {a} is {}.",
            nearest.value, nearest.lower, nearest.upper
        )
    }
}

/// Parses a comma separated list of ranks such as `5, 10,15`.
pub fn parse_ranks(input: &str) -> Result<Vec<i64>, InputError> {
    input
        .split(',')
        .map(|item| {
            let item = item.trim();
            item.parse::<i64>().map_err(|e| InputError::Parse {
                input: item.to_string(),
                reason: e.to_string(),
            })
        })
        .collect()
}

/// Parses a single real number.
pub fn parse_value(input: &str) -> Result<f64, InputError> {
    let input = input.trim();
    input.parse::<f64>().map_err(|e| InputError::Parse {
        input: input.to_string(),
        reason: e.to_string(),
    })
}
