//! Symmetric `knows` ground-truth matrix.

use tracing::{info, instrument};

use crate::{person::Person, rng::RandomSource, similarity::cosine_similarity};

/// Square boolean relation over the population.
///
/// Symmetric by construction: each unordered pair receives exactly one
/// Bernoulli draw, assigned to both directions. The diagonal is never set and
/// never read by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowsMatrix {
    people: usize,
    cells: Vec<bool>,
}

impl KnowsMatrix {
    fn new(people: usize) -> Self {
        Self {
            people,
            cells: vec![false; people.saturating_mul(people)],
        }
    }

    /// Samples the full matrix from pairwise feature similarity.
    ///
    /// Pairs are visited in ascending lexicographic `(i, j)` order with
    /// `i < j`; this fixed enumeration keeps the draw sequence reproducible.
    #[instrument(name = "mingle.sample_knows", skip_all, fields(people = people.len()))]
    pub(crate) fn sample(people: &[Person], rng: &mut RandomSource) -> Self {
        // Feature vectors are deterministic functions of the people, so
        // building them up front consumes no draws and changes nothing.
        let features: Vec<Vec<f64>> = people.iter().map(Person::feature_vector).collect();
        let mut matrix = Self::new(people.len());
        let mut edges = 0_usize;
        for (i, left) in features.iter().enumerate() {
            for (j, right) in features.iter().enumerate().skip(i + 1) {
                let similarity = cosine_similarity(left, right);
                let knows = rng.bernoulli(similarity);
                matrix.set_pair(i, j, knows);
                if knows {
                    edges += 1;
                }
            }
        }
        info!(
            people = people.len(),
            edges, "knows matrix sampled from pairwise similarity"
        );
        matrix
    }

    fn set_pair(&mut self, i: usize, j: usize, knows: bool) {
        for index in [i * self.people + j, j * self.people + i] {
            if let Some(cell) = self.cells.get_mut(index) {
                *cell = knows;
            }
        }
    }

    /// Whether person `i` knows person `j`. Out-of-range queries and the
    /// diagonal read as `false`.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> bool {
        if i >= self.people || j >= self.people {
            return false;
        }
        self.cells.get(i * self.people + j).copied().unwrap_or(false)
    }

    /// Population size this matrix covers.
    #[must_use]
    pub const fn people(&self) -> usize {
        self.people
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{
        affinity::PlaceAffinity,
        config::{GeneratorBuilder, GeneratorConfig},
        person::generate_people,
        similarity::person_similarity,
    };

    fn generated(people: usize, seed: u64) -> (GeneratorConfig, Vec<Person>, RandomSource) {
        let generator = GeneratorBuilder::new()
            .with_people(people)
            .with_places(4)
            .with_global_likes(3)
            .with_local_likes(3)
            .with_seed(seed)
            .build()
            .expect("test configuration is valid");
        let config = generator.config().clone();
        let mut rng = RandomSource::from_seed(seed);
        let affinity = PlaceAffinity::sample(config.places(), config.local_likes(), &mut rng);
        let persons = generate_people(&config, &affinity, &mut rng);
        (config, persons, rng)
    }

    #[test]
    fn matrix_is_symmetric_with_an_unset_diagonal() {
        let (_, persons, mut rng) = generated(12, 42);
        let matrix = KnowsMatrix::sample(&persons, &mut rng);
        for i in 0..matrix.people() {
            assert!(!matrix.get(i, i));
            for j in 0..matrix.people() {
                assert_eq!(matrix.get(i, j), matrix.get(j, i));
            }
        }
    }

    #[test]
    fn sampling_is_deterministic_for_a_fixed_seed() {
        let (_, persons_a, mut rng_a) = generated(10, 7);
        let (_, persons_b, mut rng_b) = generated(10, 7);
        assert_eq!(
            KnowsMatrix::sample(&persons_a, &mut rng_a),
            KnowsMatrix::sample(&persons_b, &mut rng_b)
        );
    }

    #[test]
    fn identical_people_always_know_each_other() {
        // Cosine similarity of identical feature vectors is 1, and a uniform
        // draw on [0, 1) is always below a bias of 1.
        let (_, persons, mut rng) = generated(6, 3);
        let clones: Vec<Person> = persons
            .iter()
            .map(|_| persons.first().expect("non-empty").clone())
            .collect();
        let matrix = KnowsMatrix::sample(&clones, &mut rng);
        for i in 0..matrix.people() {
            for j in 0..matrix.people() {
                if i != j {
                    assert!(matrix.get(i, j));
                }
            }
        }
    }

    #[test]
    fn out_of_range_queries_read_false() {
        let (_, persons, mut rng) = generated(4, 1);
        let matrix = KnowsMatrix::sample(&persons, &mut rng);
        assert!(!matrix.get(99, 0));
        assert!(!matrix.get(0, 99));
    }

    #[test]
    fn higher_similarity_pairs_know_each_other_more_often() {
        // Statistical check over a seeded run: knowing follows a Bernoulli
        // with the similarity as bias, so the mean similarity of connected
        // pairs must exceed the mean similarity of unconnected pairs.
        let (_, persons, mut rng) = generated(60, 42);
        let matrix = KnowsMatrix::sample(&persons, &mut rng);

        let mut connected = Vec::new();
        let mut unconnected = Vec::new();
        for (i, left) in persons.iter().enumerate() {
            for (j, right) in persons.iter().enumerate().skip(i + 1) {
                let similarity = person_similarity(left, right);
                if matrix.get(i, j) {
                    connected.push(similarity);
                } else {
                    unconnected.push(similarity);
                }
            }
        }
        assert!(!connected.is_empty() && !unconnected.is_empty());
        let mean = |values: &[f64]| values.iter().sum::<f64>() / values.len() as f64;
        assert!(
            mean(&connected) > mean(&unconnected),
            "connected pairs must be more similar on average"
        );
    }
}
