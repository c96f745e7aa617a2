use std::hint::black_box;
use std::time::Instant;

/// Wall-clock statistics of repeated calls, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    pub mean: f64,
    pub std_dev: f64,
    pub samples: usize,
}

impl Timing {
    /// Mean and population standard deviation of `samples`.
    pub fn from_samples(samples: &[f64]) -> Timing {
        if samples.is_empty() {
            return Timing {
                mean: 0.0,
                std_dev: 0.0,
                samples: 0,
            };
        }

        let count = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / count;
        let variance = samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / count;

        Timing {
            mean,
            std_dev: variance.sqrt(),
            samples: samples.len(),
        }
    }
}

/// Calls `f` `iterations` times, timing every call separately.
pub fn measure<T, F>(iterations: usize, mut f: F) -> Timing
where
    F: FnMut() -> T,
{
    let mut samples = Vec::with_capacity(iterations);
    for _ in 0..iterations {
        let start = Instant::now();
        black_box(f());
        samples.push(start.elapsed().as_secs_f64());
    }

    let timing = Timing::from_samples(&samples);
    log::debug!(
        "timed {} calls: mean {}s, std dev {}s",
        timing.samples,
        timing.mean,
        timing.std_dev
    );
    timing
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn population_statistics() {
        let timing = Timing::from_samples(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_eq!(timing.mean, 5.0);
        assert_eq!(timing.std_dev, 2.0);
        assert_eq!(timing.samples, 8);
    }

    #[test]
    fn no_samples() {
        let timing = Timing::from_samples(&[]);
        assert_eq!((timing.mean, timing.std_dev, timing.samples), (0.0, 0.0, 0));
    }

    #[test]
    fn calls_the_closure_once_per_iteration() {
        let mut calls = 0;
        let timing = measure(25, || calls += 1);
        assert_eq!(calls, 25);
        assert_eq!(timing.samples, 25);
        assert!(timing.mean >= 0.0);
        assert!(timing.std_dev >= 0.0);
    }
}
