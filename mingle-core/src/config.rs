//! Configuration and builder for the dataset generator.
//!
//! All range and degeneracy checks live in [`GeneratorBuilder::build`], so a
//! rejected configuration fails before a single random draw or output file.

use serde::Serialize;

use crate::{dataset::Generator, error::ConfigError};

const DEFAULT_PEOPLE: usize = 25;
const DEFAULT_PLACES: usize = 5;
const DEFAULT_GLOBAL_LIKES: usize = 5;
const DEFAULT_LOCAL_LIKES: usize = 5;
const DEFAULT_PLACES_LIVED_MEAN: f64 = 3.0;
const DEFAULT_PLACES_LIVED_SD: f64 = 1.0;
const DEFAULT_LOCAL_LIKES_VARIANCE: f64 = 1.0;
const DEFAULT_TARGET_RATIO: f64 = 0.2;

/// A validated generator configuration.
///
/// Instances only exist after [`GeneratorBuilder::build`] has accepted every
/// field, so downstream code can rely on the invariants documented on the
/// accessors.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GeneratorConfig {
    people: usize,
    places: usize,
    global_likes: usize,
    local_likes: usize,
    places_lived_mean: f64,
    places_lived_sd: f64,
    local_likes_variance: f64,
    target_ratio: f64,
    #[serde(skip)]
    seed: Option<u64>,
}

impl GeneratorConfig {
    /// Number of people in the population. Always at least two.
    #[must_use]
    pub const fn people(&self) -> usize {
        self.people
    }

    /// Number of places. Always at least one.
    #[must_use]
    pub const fn places(&self) -> usize {
        self.places
    }

    /// Number of globally likeable things.
    #[must_use]
    pub const fn global_likes(&self) -> usize {
        self.global_likes
    }

    /// Number of locally likeable things.
    #[must_use]
    pub const fn local_likes(&self) -> usize {
        self.local_likes
    }

    /// Mean of the places-lived count distribution.
    #[must_use]
    pub const fn places_lived_mean(&self) -> f64 {
        self.places_lived_mean
    }

    /// Standard deviation of the places-lived count distribution. Non-negative.
    #[must_use]
    pub const fn places_lived_sd(&self) -> f64 {
        self.places_lived_sd
    }

    /// Noise applied when deriving local preferences from place affinity,
    /// used as the standard deviation of the per-place truncated normal.
    /// Non-negative.
    #[must_use]
    pub const fn local_likes_variance(&self) -> f64 {
        self.local_likes_variance
    }

    /// Fraction of ordered non-self pairs held out as targets. In `[0, 1]`.
    #[must_use]
    pub const fn target_ratio(&self) -> f64 {
        self.target_ratio
    }

    /// Explicit seed, if one was supplied.
    #[must_use]
    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Number of ordered non-self pairs, `people * (people - 1)`.
    #[must_use]
    pub const fn ordered_pair_count(&self) -> usize {
        self.people * (self.people - 1)
    }
}

/// Configures and constructs [`Generator`] instances.
///
/// # Examples
/// ```
/// use mingle_core::GeneratorBuilder;
///
/// let generator = GeneratorBuilder::new()
///     .with_people(10)
///     .with_places(3)
///     .with_seed(42)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(generator.config().people(), 10);
/// ```
#[derive(Debug, Clone)]
pub struct GeneratorBuilder {
    people: usize,
    places: usize,
    global_likes: usize,
    local_likes: usize,
    places_lived_mean: f64,
    places_lived_sd: f64,
    local_likes_variance: f64,
    target_ratio: f64,
    seed: Option<u64>,
}

impl Default for GeneratorBuilder {
    fn default() -> Self {
        Self {
            people: DEFAULT_PEOPLE,
            places: DEFAULT_PLACES,
            global_likes: DEFAULT_GLOBAL_LIKES,
            local_likes: DEFAULT_LOCAL_LIKES,
            places_lived_mean: DEFAULT_PLACES_LIVED_MEAN,
            places_lived_sd: DEFAULT_PLACES_LIVED_SD,
            local_likes_variance: DEFAULT_LOCAL_LIKES_VARIANCE,
            target_ratio: DEFAULT_TARGET_RATIO,
            seed: None,
        }
    }
}

impl GeneratorBuilder {
    /// Creates a builder populated with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the population size.
    #[must_use]
    pub const fn with_people(mut self, people: usize) -> Self {
        self.people = people;
        self
    }

    /// Overrides the place count.
    #[must_use]
    pub const fn with_places(mut self, places: usize) -> Self {
        self.places = places;
        self
    }

    /// Overrides the global-thing count.
    #[must_use]
    pub const fn with_global_likes(mut self, global_likes: usize) -> Self {
        self.global_likes = global_likes;
        self
    }

    /// Overrides the local-thing count.
    #[must_use]
    pub const fn with_local_likes(mut self, local_likes: usize) -> Self {
        self.local_likes = local_likes;
        self
    }

    /// Overrides the places-lived distribution mean.
    #[must_use]
    pub const fn with_places_lived_mean(mut self, mean: f64) -> Self {
        self.places_lived_mean = mean;
        self
    }

    /// Overrides the places-lived distribution standard deviation.
    #[must_use]
    pub const fn with_places_lived_sd(mut self, sd: f64) -> Self {
        self.places_lived_sd = sd;
        self
    }

    /// Overrides the local-preference noise.
    #[must_use]
    pub const fn with_local_likes_variance(mut self, variance: f64) -> Self {
        self.local_likes_variance = variance;
        self
    }

    /// Overrides the target hold-out ratio.
    #[must_use]
    pub const fn with_target_ratio(mut self, ratio: f64) -> Self {
        self.target_ratio = ratio;
        self
    }

    /// Pins the RNG seed. Without one, a seed is drawn from OS entropy at
    /// generation time and recorded in the run metadata.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration and constructs a [`Generator`].
    ///
    /// # Errors
    /// Returns [`ConfigError`] when a parameter is out of range or the
    /// configuration is degenerate: fewer than two people (no pairs to
    /// relate) or zero places (residency undrawable).
    pub fn build(self) -> Result<Generator, ConfigError> {
        if self.people < 2 {
            return Err(ConfigError::PopulationTooSmall { got: self.people });
        }
        if self.places == 0 {
            return Err(ConfigError::NoPlaces);
        }
        validate_finite(self.places_lived_mean, "places_lived_mean")?;
        validate_finite(self.places_lived_sd, "places_lived_sd")?;
        validate_finite(self.local_likes_variance, "local_likes_variance")?;
        validate_finite(self.target_ratio, "target_ratio")?;
        if self.places_lived_sd < 0.0 {
            return Err(ConfigError::NegativeStandardDeviation {
                got: self.places_lived_sd,
            });
        }
        if self.local_likes_variance < 0.0 {
            return Err(ConfigError::NegativeVariance {
                got: self.local_likes_variance,
            });
        }
        if !(0.0..=1.0).contains(&self.target_ratio) {
            return Err(ConfigError::TargetRatioOutOfRange {
                got: self.target_ratio,
            });
        }

        Ok(Generator::new(GeneratorConfig {
            people: self.people,
            places: self.places,
            global_likes: self.global_likes,
            local_likes: self.local_likes,
            places_lived_mean: self.places_lived_mean,
            places_lived_sd: self.places_lived_sd,
            local_likes_variance: self.local_likes_variance,
            target_ratio: self.target_ratio,
            seed: self.seed,
        }))
    }
}

fn validate_finite(value: f64, parameter: &'static str) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFiniteParameter { parameter })
    }
}
