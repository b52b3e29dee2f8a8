/// Leading moments of the crystal size distribution, per m³ of suspension.
///
/// `m0` counts crystals, `m1` sums their sizes, and `m2` and `m3` are
/// proportional to the total crystal surface and volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Moments {
    pub m0: f64,
    pub m1: f64,
    pub m2: f64,
    pub m3: f64,
}

impl Moments {
    /// Small nonzero seed population.
    ///
    /// A zero population would leave the nucleation and growth terms
    /// identically zero.
    pub const SEED: Self = Self {
        m0: 1e6,
        m1: 1e-3,
        m2: 1e-9,
        m3: 1e-15,
    };

    pub(super) fn to_array(self) -> [f64; 4] {
        [self.m0, self.m1, self.m2, self.m3]
    }

    pub(super) fn from_array([m0, m1, m2, m3]: [f64; 4]) -> Self {
        Self { m0, m1, m2, m3 }
    }

    /// Returns the size statistics implied by these moments.
    #[must_use]
    pub fn distribution(&self) -> SizeDistribution {
        SizeDistribution::from_moments(self)
    }
}

/// Size statistics of a crystal population.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeDistribution {
    /// Number-mean crystal size `m1 / m0`, m.
    pub mean_size: f64,

    /// Size variance `m2 / m0 - mean_size²`, m².
    pub variance: f64,

    /// Coefficient of variation, percent.
    pub coefficient_of_variation: f64,
}

impl SizeDistribution {
    /// Derives the statistics from the leading moments.
    ///
    /// An empty population (`m0 <= 0`) reports zero size and spread. A
    /// non-positive variance, which only arises from round-off on a nearly
    /// monodisperse population, reports a zero coefficient of variation.
    #[must_use]
    pub fn from_moments(moments: &Moments) -> Self {
        if moments.m0 <= 0.0 {
            return Self {
                mean_size: 0.0,
                variance: 0.0,
                coefficient_of_variation: 0.0,
            };
        }

        let mean_size = moments.m1 / moments.m0;
        let variance = moments.m2 / moments.m0 - mean_size * mean_size;
        let coefficient_of_variation = if variance > 0.0 && mean_size > 0.0 {
            100.0 * variance.sqrt() / mean_size
        } else {
            0.0
        };

        Self {
            mean_size,
            variance,
            coefficient_of_variation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn seed_statistics() {
        let stats = Moments::SEED.distribution();
        assert_relative_eq!(stats.mean_size, 1e-9, max_relative = 1e-12);
        assert_relative_eq!(stats.variance, 1e-15 - 1e-18, max_relative = 1e-9);
        assert_relative_eq!(
            stats.coefficient_of_variation,
            100.0 * (1e-15_f64 - 1e-18).sqrt() / 1e-9,
            max_relative = 1e-9
        );
    }

    #[test]
    fn monodisperse_population_has_no_spread() {
        // Four crystals of the same size.
        let moments = Moments {
            m0: 4.0,
            m1: 2.0,
            m2: 1.0,
            m3: 0.5,
        };
        let stats = moments.distribution();
        assert_relative_eq!(stats.mean_size, 0.5);
        assert_eq!(stats.coefficient_of_variation, 0.0);
    }

    #[test]
    fn negative_variance_floors_the_spread() {
        let moments = Moments {
            m0: 1.0,
            m1: 1.0,
            m2: 0.5,
            m3: 0.0,
        };
        let stats = moments.distribution();
        assert!(stats.variance < 0.0);
        assert_eq!(stats.coefficient_of_variation, 0.0);
    }

    #[test]
    fn empty_population_reports_zero() {
        let moments = Moments {
            m0: 0.0,
            m1: 0.0,
            m2: 0.0,
            m3: 0.0,
        };
        let stats = moments.distribution();
        assert_eq!(stats.mean_size, 0.0);
        assert_eq!(stats.coefficient_of_variation, 0.0);
    }
}
