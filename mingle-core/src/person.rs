//! Person entities and their feature synthesis.
//!
//! People are built one at a time in ascending index order, each constructed
//! in a single step from its sampled fields. The per-person draw order —
//! places-lived count, residency, global preferences, local preferences — is
//! fixed and part of the reproducibility contract.

use tracing::instrument;

use crate::{affinity::PlaceAffinity, config::GeneratorConfig, rng::RandomSource};

/// An immutable member of the generated population.
#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    index: usize,
    residency: Vec<bool>,
    global_prefs: Vec<f64>,
    local_prefs: Vec<f64>,
}

impl Person {
    /// Index of this person in `[0, people)`.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Per-place residency bits. At least one bit is set.
    #[must_use]
    pub fn residency(&self) -> &[bool] {
        &self.residency
    }

    /// Ascending indices of the places this person has lived in.
    pub fn places_lived(&self) -> impl Iterator<Item = usize> + '_ {
        self.residency
            .iter()
            .enumerate()
            .filter_map(|(place, &lived)| lived.then_some(place))
    }

    /// Preference per global thing, index-ordered, each in `[0, 1]`.
    #[must_use]
    pub fn global_prefs(&self) -> &[f64] {
        &self.global_prefs
    }

    /// Preference per local thing, index-ordered, each in `[0, 1]`. Derived
    /// from residency and place affinity rather than sampled independently.
    #[must_use]
    pub fn local_prefs(&self) -> &[f64] {
        &self.local_prefs
    }

    /// Position of this person in similarity space: residency as `0.0`/`1.0`,
    /// then global preferences, then local preferences.
    #[must_use]
    pub fn feature_vector(&self) -> Vec<f64> {
        let mut features =
            Vec::with_capacity(self.residency.len() + self.global_prefs.len() + self.local_prefs.len());
        features.extend(self.residency.iter().map(|&lived| f64::from(u8::from(lived))));
        features.extend_from_slice(&self.global_prefs);
        features.extend_from_slice(&self.local_prefs);
        features
    }
}

/// Generates the whole population in ascending index order.
#[instrument(name = "mingle.generate_people", skip_all, fields(people = config.people()))]
pub(crate) fn generate_people(
    config: &GeneratorConfig,
    affinity: &PlaceAffinity,
    rng: &mut RandomSource,
) -> Vec<Person> {
    (0..config.people())
        .map(|index| generate_person(index, config, affinity, rng))
        .collect()
}

fn generate_person(
    index: usize,
    config: &GeneratorConfig,
    affinity: &PlaceAffinity,
    rng: &mut RandomSource,
) -> Person {
    let residency = sample_residency(config, rng);
    let global_prefs = (0..config.global_likes()).map(|_| rng.uniform()).collect();
    let local_prefs = derive_local_prefs(&residency, config, affinity, rng);
    Person {
        index,
        residency,
        global_prefs,
        local_prefs,
    }
}

/// Draws the residency bit vector: a truncated-normal places-lived count on
/// `[1, places]`, then that many distinct places without replacement.
#[expect(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "the places-lived count is bounded by the place count, far below either limit"
)]
fn sample_residency(config: &GeneratorConfig, rng: &mut RandomSource) -> Vec<bool> {
    let places = config.places();
    let drawn = rng.truncated_normal(
        config.places_lived_mean(),
        config.places_lived_sd(),
        1.0,
        places as f64,
    );
    // Truncation toward zero, matching integer conversion of the draw; the
    // clamp keeps the invariant even at the floating-point boundary.
    let count = (drawn.trunc() as usize).clamp(1, places);

    let mut residency = vec![false; places];
    for place in rng.sample_distinct(count, places) {
        if let Some(bit) = residency.get_mut(place) {
            *bit = true;
        }
    }
    residency
}

/// Derives local preferences: for each local thing, the mean over resident
/// places (ascending) of one truncated-normal draw centred on that place's
/// affinity for the thing.
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "averaging preference draws requires floating-point arithmetic"
)]
fn derive_local_prefs(
    residency: &[bool],
    config: &GeneratorConfig,
    affinity: &PlaceAffinity,
    rng: &mut RandomSource,
) -> Vec<f64> {
    let lived: Vec<usize> = residency
        .iter()
        .enumerate()
        .filter_map(|(place, &bit)| bit.then_some(place))
        .collect();

    (0..config.local_likes())
        .map(|thing| {
            let sum: f64 = lived
                .iter()
                .map(|&place| {
                    rng.truncated_normal(
                        affinity.value(place, thing),
                        config.local_likes_variance(),
                        0.0,
                        1.0,
                    )
                })
                .sum();
            // `lived` is never empty: sample_residency guarantees at least
            // one residency bit.
            sum / lived.len().max(1) as f64
        })
        .collect()
}
