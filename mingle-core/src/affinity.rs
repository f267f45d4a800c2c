//! Latent place-to-local-thing affinity table.

use crate::rng::RandomSource;

/// Propensity of each place to make each local thing likeable.
///
/// Drawn once per run, before any person exists, and held fixed thereafter.
/// Rows are places, columns local things; every cell is uniform on `[0, 1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceAffinity {
    places: usize,
    local_likes: usize,
    values: Vec<f64>,
}

impl PlaceAffinity {
    /// Draws the full table from `rng`, ascending place-major order.
    ///
    /// The draw order is part of the reproducibility contract: place 0's
    /// local things first, then place 1's, and so on.
    #[must_use]
    pub fn sample(places: usize, local_likes: usize, rng: &mut RandomSource) -> Self {
        let values = (0..places.saturating_mul(local_likes))
            .map(|_| rng.uniform())
            .collect();
        Self {
            places,
            local_likes,
            values,
        }
    }

    /// Affinity of `place` towards local `thing`.
    ///
    /// Returns `0.0` for out-of-range coordinates; callers index with the
    /// configured counts so the fallback never fires in the pipeline.
    #[must_use]
    pub fn value(&self, place: usize, thing: usize) -> f64 {
        if thing >= self.local_likes {
            return 0.0;
        }
        place
            .checked_mul(self.local_likes)
            .and_then(|offset| offset.checked_add(thing))
            .and_then(|index| self.values.get(index))
            .copied()
            .unwrap_or_default()
    }

    /// Number of places covered by the table.
    #[must_use]
    pub const fn places(&self) -> usize {
        self.places
    }

    /// Number of local things covered by the table.
    #[must_use]
    pub const fn local_likes(&self) -> usize {
        self.local_likes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_fills_every_cell_with_unit_interval_values() {
        let mut rng = RandomSource::from_seed(42);
        let affinity = PlaceAffinity::sample(4, 3, &mut rng);
        assert_eq!(affinity.places(), 4);
        assert_eq!(affinity.local_likes(), 3);
        for place in 0..4 {
            for thing in 0..3 {
                let value = affinity.value(place, thing);
                assert!((0.0..1.0).contains(&value), "got {value}");
            }
        }
    }

    #[test]
    fn sampling_is_deterministic_for_a_fixed_seed() {
        let mut a = RandomSource::from_seed(42);
        let mut b = RandomSource::from_seed(42);
        assert_eq!(
            PlaceAffinity::sample(5, 5, &mut a),
            PlaceAffinity::sample(5, 5, &mut b)
        );
    }

    #[test]
    fn out_of_range_coordinates_read_as_zero() {
        let mut rng = RandomSource::from_seed(42);
        let affinity = PlaceAffinity::sample(2, 2, &mut rng);
        assert_eq!(affinity.value(2, 0), 0.0);
        assert_eq!(affinity.value(0, 2), 0.0);
    }

    #[test]
    fn empty_dimensions_are_harmless() {
        let mut rng = RandomSource::from_seed(1);
        let affinity = PlaceAffinity::sample(3, 0, &mut rng);
        assert_eq!(affinity.local_likes(), 0);
        assert_eq!(affinity.value(0, 0), 0.0);
    }
}
