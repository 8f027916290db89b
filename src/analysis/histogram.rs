use crate::errors::{PricingError, PricingResult};

/// Equal-width binned view of simulated terminal prices. Display-only.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Histogram {
    /// `bins + 1` bin edges, ascending
    pub edges: Vec<f64>,
    /// Sample count per bin
    pub counts: Vec<u64>,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub total: u64,
}

impl Histogram {
    /// Bin `samples` into `bins` equal-width buckets spanning [min, max].
    /// The maximum sample is counted in the last bucket.
    pub fn from_samples(samples: &[f64], bins: usize) -> PricingResult<Self> {
        if bins == 0 {
            return Err(PricingError::Histogram("bin count must be >= 1".into()));
        }
        if samples.is_empty() {
            return Err(PricingError::Histogram("no samples to bin".into()));
        }
        if samples.iter().any(|s| !s.is_finite()) {
            return Err(PricingError::Histogram("samples must be finite".into()));
        }

        let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
        let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        let width = (max - min) / bins as f64;

        let edges = (0..=bins)
            .map(|i| if i == bins { max } else { min + width * i as f64 })
            .collect();

        let mut counts = vec![0u64; bins];
        for &s in samples {
            counts[value_to_bin(s, min, width, bins)] += 1;
        }

        Ok(Self {
            edges,
            counts,
            min,
            max,
            mean,
            total: samples.len() as u64,
        })
    }

    #[inline]
    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    /// Bin midpoints, handy for plotting.
    pub fn centers(&self) -> Vec<f64> {
        self.edges.windows(2).map(|w| 0.5 * (w[0] + w[1])).collect()
    }

    /// Share of samples per bin. Sums to 1.
    pub fn frequencies(&self) -> Vec<f64> {
        let total = self.total as f64;
        self.counts.iter().map(|&c| c as f64 / total).collect()
    }
}

#[inline]
fn value_to_bin(value: f64, min: f64, width: f64, bins: usize) -> usize {
    if width <= 0.0 {
        return 0;
    }
    let idx = ((value - min) / width) as usize;
    idx.min(bins - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bin_mapping() {
        assert_eq!(value_to_bin(0.0, 0.0, 1.0, 10), 0);
        assert_eq!(value_to_bin(0.99, 0.0, 1.0, 10), 0);
        assert_eq!(value_to_bin(1.0, 0.0, 1.0, 10), 1);
        assert_eq!(value_to_bin(10.0, 0.0, 1.0, 10), 9);
    }

    #[test]
    fn test_counts_sum_to_total() {
        let samples: Vec<f64> = (0..1000).map(|i| 50.0 + i as f64 * 0.1).collect();
        let h = Histogram::from_samples(&samples, 20).unwrap();
        assert_eq!(h.counts.iter().sum::<u64>(), 1000);
        assert_eq!(h.edges.len(), 21);
        assert_eq!(h.bins(), 20);
        assert_eq!(h.edges[0], h.min);
        assert_eq!(h.edges[20], h.max);
        let freq: f64 = h.frequencies().iter().sum();
        assert!((freq - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_uniform_samples_spread_evenly() {
        let samples: Vec<f64> = (0..100).map(|i| i as f64).collect();
        let h = Histogram::from_samples(&samples, 4).unwrap();
        assert_eq!(h.counts, vec![25, 25, 25, 25]);
        assert_eq!(h.centers().len(), 4);
    }

    #[test]
    fn test_constant_samples() {
        let h = Histogram::from_samples(&[7.0; 5], 3).unwrap();
        assert_eq!(h.counts, vec![5, 0, 0]);
        assert_eq!(h.min, 7.0);
        assert_eq!(h.max, 7.0);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(Histogram::from_samples(&[], 5).is_err());
        assert!(Histogram::from_samples(&[1.0, 2.0], 0).is_err());
        assert!(Histogram::from_samples(&[1.0, f64::NAN], 2).is_err());
    }
}
