// Copyright (C) 2025 Category Labs, Inc.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

use crate::error::ConfigError;

/// How far the last CDF entry may sit from 1.
pub const CDF_TOLERANCE: f64 = 1e-9;

/// A cumulative distribution over encoded block degrees.
///
/// `cdf[d]` is the probability of drawing a degree of at most `d`.  Entry 0 is always zero
/// and the last entry is 1 up to [`CDF_TOLERANCE`], so the table covers degrees
/// `1..=max_degree()`.
#[derive(Clone, Debug, PartialEq)]
pub struct DegreeDistribution {
    cdf: Vec<f64>,
}

impl DegreeDistribution {
    pub fn ideal_soliton(n: usize) -> Result<DegreeDistribution, ConfigError> {
        if n == 0 {
            return Err(ConfigError::NoSourceBlocks);
        }

        let mut cdf = vec![0.0; n + 1];
        cdf[1] = 1.0 / n as f64;
        for i in 2..=n {
            cdf[i] = cdf[i - 1] + 1.0 / (i * (i - 1)) as f64;
        }

        DegreeDistribution::from_cdf(cdf)
    }

    /// The robust soliton distribution with spike position `m` and failure bound `delta`.
    pub fn robust_soliton(n: usize, m: usize, delta: f64) -> Result<DegreeDistribution, ConfigError> {
        if n == 0 {
            return Err(ConfigError::NoSourceBlocks);
        }
        if m == 0 || m > n {
            return Err(ConfigError::InvalidParameter {
                name: "m",
                value: m as f64,
            });
        }
        if !(delta > 0.0 && delta <= 1.0) {
            return Err(ConfigError::InvalidParameter {
                name: "delta",
                value: delta,
            });
        }

        let m_f = m as f64;

        let mut pdf = vec![0.0; n + 1];
        pdf[1] = 1.0 / n as f64 + 1.0 / m_f;
        for i in 2..=n {
            pdf[i] = 1.0 / (i * (i - 1)) as f64;
            if i < m {
                pdf[i] += 1.0 / (i as f64 * m_f);
            }
            if i == m {
                pdf[i] += (n as f64 / (m_f * delta)).ln() / m_f;
            }
        }

        let total: f64 = pdf.iter().sum();

        let mut cdf = vec![0.0; n + 1];
        for i in 1..=n {
            cdf[i] = cdf[i - 1] + pdf[i] / total;
        }

        DegreeDistribution::from_cdf(cdf)
    }

    /// The degree distribution of online codes, with failure probability `epsilon`.
    pub fn online(epsilon: f64) -> Result<DegreeDistribution, ConfigError> {
        if !(epsilon > 0.0 && epsilon < 1.0) {
            return Err(ConfigError::InvalidParameter {
                name: "epsilon",
                value: epsilon,
            });
        }

        let f = ((epsilon * epsilon / 4.0).ln() / (1.0 - epsilon / 2.0).ln()).ceil();
        let max_degree = f as usize;

        // Very large epsilon collapses the distribution onto degree one, which the closed
        // form below can't express.
        if max_degree < 2 {
            return Err(ConfigError::InvalidParameter {
                name: "epsilon",
                value: epsilon,
            });
        }

        let rho = 1.0 - (1.0 + 1.0 / f) / (1.0 + epsilon);

        let mut cdf = vec![0.0; max_degree + 1];
        cdf[1] = rho;
        for i in 2..=max_degree {
            let i_f = i as f64;
            cdf[i] = cdf[i - 1] + (1.0 - rho) * f / ((f - 1.0) * (i_f - 1.0) * i_f);
        }

        DegreeDistribution::from_cdf(cdf)
    }

    /// Takes a precomputed table, entry 0 included.
    pub fn from_cdf(cdf: Vec<f64>) -> Result<DegreeDistribution, ConfigError> {
        if cdf.len() < 2 {
            return Err(ConfigError::EmptyDistribution);
        }

        for (index, value) in cdf.iter().copied().enumerate() {
            if !value.is_finite() || value < 0.0 || value > 1.0 + CDF_TOLERANCE {
                return Err(ConfigError::InvalidProbability { index, value });
            }
        }

        if cdf[0] != 0.0 {
            return Err(ConfigError::InvalidProbability {
                index: 0,
                value: cdf[0],
            });
        }

        if let Some(index) = (1..cdf.len()).find(|i| cdf[*i] < cdf[i - 1]) {
            return Err(ConfigError::NonMonotonic { index });
        }

        let total = cdf[cdf.len() - 1];
        if (total - 1.0).abs() > CDF_TOLERANCE {
            return Err(ConfigError::NotNormalized { total });
        }

        Ok(DegreeDistribution { cdf })
    }

    pub fn cdf(&self) -> &[f64] {
        &self.cdf
    }

    pub fn max_degree(&self) -> usize {
        self.cdf.len() - 1
    }

    /// Maps a uniform draw `r` in `[0, 1)` to the smallest degree whose cumulative
    /// probability reaches `r`.  Draws past the final entry, which rounding can produce,
    /// map to the maximum degree.
    pub fn pick_degree(&self, r: f64) -> usize {
        let max_degree = self.max_degree();

        let mut lower = 1;
        let mut upper = max_degree + 1;

        while lower < upper {
            let pivot = (lower + upper) / 2;

            if self.cdf[pivot] >= r {
                upper = pivot;
            } else {
                lower = pivot + 1;
            }
        }

        lower.min(max_degree)
    }
}

#[cfg(test)]
mod test {
    use rand::Rng;
    use test_case::test_case;

    use super::{DegreeDistribution, CDF_TOLERANCE};
    use crate::error::ConfigError;

    fn assert_valid(distribution: &DegreeDistribution) {
        let cdf = distribution.cdf();

        assert_eq!(cdf[0], 0.0);
        assert!(cdf.windows(2).all(|w| w[0] <= w[1]));
        assert!((cdf[cdf.len() - 1] - 1.0).abs() <= CDF_TOLERANCE);
    }

    #[test_case(1)]
    #[test_case(2)]
    #[test_case(10)]
    #[test_case(1000)]
    fn test_ideal_soliton(n: usize) {
        let distribution = DegreeDistribution::ideal_soliton(n).unwrap();

        assert_valid(&distribution);
        assert_eq!(distribution.max_degree(), n);
        assert_eq!(distribution.cdf()[1], 1.0 / n as f64);
    }

    #[test_case(10, 1, 0.5)]
    #[test_case(10, 3, 0.05)]
    #[test_case(100, 10, 0.01)]
    #[test_case(100, 100, 1.0)]
    fn test_robust_soliton(n: usize, m: usize, delta: f64) {
        let distribution = DegreeDistribution::robust_soliton(n, m, delta).unwrap();

        assert_valid(&distribution);
        assert_eq!(distribution.max_degree(), n);
    }

    #[test]
    fn test_robust_soliton_spike() {
        let distribution = DegreeDistribution::robust_soliton(100, 10, 0.01).unwrap();
        let cdf = distribution.cdf();

        let pdf = |d: usize| cdf[d] - cdf[d - 1];

        assert!(pdf(10) > pdf(9));
        assert!(pdf(10) > pdf(11));
    }

    #[test_case(0.01)]
    #[test_case(0.1)]
    #[test_case(0.5)]
    fn test_online(epsilon: f64) {
        let distribution = DegreeDistribution::online(epsilon).unwrap();

        assert_valid(&distribution);
        assert!(distribution.max_degree() >= 2);
    }

    #[test]
    fn test_online_max_degree() {
        assert_eq!(DegreeDistribution::online(0.01).unwrap().max_degree(), 2115);
        assert_eq!(DegreeDistribution::online(0.1).unwrap().max_degree(), 117);
        assert_eq!(DegreeDistribution::online(0.5).unwrap().max_degree(), 10);
    }

    #[test]
    fn test_invalid_parameters() {
        assert_eq!(
            DegreeDistribution::ideal_soliton(0),
            Err(ConfigError::NoSourceBlocks)
        );
        assert!(matches!(
            DegreeDistribution::robust_soliton(10, 0, 0.5),
            Err(ConfigError::InvalidParameter { name: "m", .. })
        ));
        assert!(matches!(
            DegreeDistribution::robust_soliton(10, 11, 0.5),
            Err(ConfigError::InvalidParameter { name: "m", .. })
        ));
        assert!(matches!(
            DegreeDistribution::robust_soliton(10, 3, 0.0),
            Err(ConfigError::InvalidParameter { name: "delta", .. })
        ));
        assert!(matches!(
            DegreeDistribution::online(0.0),
            Err(ConfigError::InvalidParameter {
                name: "epsilon",
                ..
            })
        ));
        assert!(matches!(
            DegreeDistribution::online(1.0),
            Err(ConfigError::InvalidParameter {
                name: "epsilon",
                ..
            })
        ));
    }

    #[test]
    fn test_from_cdf_rejects_bad_tables() {
        assert_eq!(
            DegreeDistribution::from_cdf(vec![]),
            Err(ConfigError::EmptyDistribution)
        );
        assert_eq!(
            DegreeDistribution::from_cdf(vec![0.0]),
            Err(ConfigError::EmptyDistribution)
        );
        assert_eq!(
            DegreeDistribution::from_cdf(vec![0.0, 0.6, 0.4, 1.0]),
            Err(ConfigError::NonMonotonic { index: 2 })
        );
        assert_eq!(
            DegreeDistribution::from_cdf(vec![0.0, 0.5, 0.9]),
            Err(ConfigError::NotNormalized { total: 0.9 })
        );
        assert!(matches!(
            DegreeDistribution::from_cdf(vec![0.0, f64::NAN, 1.0]),
            Err(ConfigError::InvalidProbability { index: 1, .. })
        ));
        assert!(matches!(
            DegreeDistribution::from_cdf(vec![0.0, -0.1, 1.0]),
            Err(ConfigError::InvalidProbability { index: 1, .. })
        ));
        assert!(matches!(
            DegreeDistribution::from_cdf(vec![0.2, 0.5, 1.0]),
            Err(ConfigError::InvalidProbability { index: 0, .. })
        ));
    }

    #[test]
    fn test_pick_degree() {
        let distribution = DegreeDistribution::from_cdf(vec![0.0, 0.25, 0.25, 0.75, 1.0]).unwrap();

        assert_eq!(distribution.pick_degree(0.0), 1);
        assert_eq!(distribution.pick_degree(0.25), 1);
        assert_eq!(distribution.pick_degree(0.2500001), 3);
        assert_eq!(distribution.pick_degree(0.75), 3);
        assert_eq!(distribution.pick_degree(0.9), 4);
        assert_eq!(distribution.pick_degree(1.5), 4);
    }

    #[test]
    fn test_pick_degree_against_linear_scan() {
        let mut rng = rand::thread_rng();

        for _ in 0..100 {
            let distribution = DegreeDistribution::ideal_soliton(rng.gen_range(1..200)).unwrap();
            let cdf = distribution.cdf();

            for _ in 0..100 {
                let r: f64 = rng.gen();

                let expected = (1..cdf.len())
                    .find(|d| cdf[*d] >= r)
                    .unwrap_or(distribution.max_degree());

                assert_eq!(distribution.pick_degree(r), expected);
            }
        }
    }
}
