//! Mingle core library.
//!
//! Synthesizes a reproducible, labeled relational dataset: a population of
//! people, the places they have lived, the things they like, and a symmetric
//! `knows` relation whose ground truth is sampled from pairwise feature
//! similarity. The generated edges are split into observed / target / truth
//! partitions for a downstream relational-inference engine.
//!
//! The whole run is one deterministic, single-threaded pipeline driven by a
//! single seeded [`RandomSource`]: two runs with the same configuration and
//! seed produce byte-identical output. The pairwise edge stage is
//! `O(people²)` in time and memory, which bounds practical population size.

mod affinity;
mod config;
mod dataset;
mod error;
mod knows;
mod partition;
mod person;
mod rng;
mod similarity;
mod writer;

pub use crate::{
    affinity::PlaceAffinity,
    config::{GeneratorBuilder, GeneratorConfig},
    dataset::{Dataset, Generator},
    error::{ConfigError, ConfigErrorCode, DatasetError, DatasetErrorCode, Result},
    knows::KnowsMatrix,
    partition::{LabeledPair, Partitions},
    person::Person,
    rng::RandomSource,
    similarity::{cosine_similarity, person_similarity},
    writer::{DatasetWriter, WriteReport},
};
