//! Pipeline orchestration: configuration in, complete dataset out.
//!
//! The run is one deterministic, single-threaded pass: affinity table, then
//! people in ascending order, then pairwise edge sampling, then partition
//! selection, every stochastic step drawing from the same [`RandomSource`].
//! Reordering any stage would shift the draw sequence and break bit-for-bit
//! reproducibility, so the pairwise stage stays sequential even though it is
//! the `O(people²)` bound on practical population size.

use tracing::{info, instrument};

use crate::{
    affinity::PlaceAffinity,
    config::GeneratorConfig,
    knows::KnowsMatrix,
    partition::Partitions,
    person::{Person, generate_people},
    rng::RandomSource,
};

/// Entry point for running the generation pipeline.
///
/// Constructed via [`crate::GeneratorBuilder`], which owns all validation.
///
/// # Examples
/// ```
/// use mingle_core::GeneratorBuilder;
///
/// let dataset = GeneratorBuilder::new()
///     .with_people(4)
///     .with_places(2)
///     .with_global_likes(1)
///     .with_local_likes(1)
///     .with_target_ratio(0.5)
///     .with_seed(42)
///     .build()
///     .expect("configuration is valid")
///     .run();
/// assert_eq!(dataset.people().len(), 4);
/// assert_eq!(dataset.partitions().targets().len(), 6);
/// assert_eq!(dataset.seed(), 42);
/// ```
#[derive(Debug, Clone)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    pub(crate) const fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Returns the validated configuration this generator runs with.
    #[must_use]
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Executes the full pipeline and returns the in-memory dataset.
    ///
    /// Generation is infallible once the configuration has been validated;
    /// failures can only occur later, when the dataset is serialized.
    #[instrument(name = "mingle.run", skip(self), fields(people = self.config.people()))]
    #[must_use]
    pub fn run(&self) -> Dataset {
        let mut rng = match self.config.seed() {
            Some(seed) => RandomSource::from_seed(seed),
            None => RandomSource::from_entropy(),
        };
        let seed = rng.seed();
        info!(seed, "starting generation");

        let affinity = PlaceAffinity::sample(
            self.config.places(),
            self.config.local_likes(),
            &mut rng,
        );
        let people = generate_people(&self.config, &affinity, &mut rng);
        let knows = KnowsMatrix::sample(&people, &mut rng);
        let partitions = Partitions::split(&knows, self.config.target_ratio(), &mut rng);

        info!(
            seed,
            people = people.len(),
            observed = partitions.observed().len(),
            targets = partitions.targets().len(),
            "generation completed"
        );
        Dataset {
            config: self.config.clone(),
            seed,
            people,
            knows,
            partitions,
        }
    }
}

/// A fully generated dataset, held in memory until serialized.
///
/// Immutable after construction; the latent affinity table is not retained,
/// as it only exists to correlate local preferences during generation.
#[derive(Debug, Clone)]
pub struct Dataset {
    config: GeneratorConfig,
    seed: u64,
    people: Vec<Person>,
    knows: KnowsMatrix,
    partitions: Partitions,
}

impl Dataset {
    /// Configuration the dataset was generated from.
    #[must_use]
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// The seed actually used, whether supplied or drawn from entropy.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// The generated population, index-ordered.
    #[must_use]
    pub fn people(&self) -> &[Person] {
        &self.people
    }

    /// The symmetric ground-truth `knows` matrix.
    #[must_use]
    pub const fn knows(&self) -> &KnowsMatrix {
        &self.knows
    }

    /// The observed/target/truth partition views.
    #[must_use]
    pub const fn partitions(&self) -> &Partitions {
        &self.partitions
    }
}
