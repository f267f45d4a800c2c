//! Splitting the `knows` relation into observed, target, and truth sets.
//!
//! Every ordered non-self pair lands in exactly one of Observed or Target;
//! Truth carries the held-out labels for the Target pairs, and a full labeled
//! reference listing is retained for debugging and analysis.

use std::collections::HashSet;

use tracing::{info, instrument};

use crate::{knows::KnowsMatrix, rng::RandomSource};

/// An ordered pair annotated with its `knows` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabeledPair {
    /// First person of the ordered pair.
    pub i: usize,
    /// Second person of the ordered pair.
    pub j: usize,
    /// Ground-truth `knows` value for the pair.
    pub knows: bool,
}

/// The three partition views plus the full labeled reference listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partitions {
    observed: Vec<LabeledPair>,
    targets: Vec<(usize, usize)>,
    truth: Vec<LabeledPair>,
    reference: Vec<LabeledPair>,
}

impl Partitions {
    /// Splits `matrix` by drawing `round(target_ratio * total)` pairs without
    /// replacement as targets.
    ///
    /// Pair selection maps each ordered non-self pair `(i, j)` to a code via
    /// `i * (people - 1) + (j - 1 if j > i else j)`, a bijection onto
    /// `[0, people * (people - 1))`, so the drawn codes correspond exactly to
    /// candidate pairs and the target partition always has the requested
    /// size.
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::float_arithmetic,
        reason = "the rounded target count is bounded by the pair count"
    )]
    #[instrument(
        name = "mingle.split_partitions",
        skip_all,
        fields(people = matrix.people(), target_ratio)
    )]
    pub(crate) fn split(
        matrix: &KnowsMatrix,
        target_ratio: f64,
        rng: &mut RandomSource,
    ) -> Self {
        let people = matrix.people();
        let total = people * people.saturating_sub(1);
        let target_count = (target_ratio * total as f64).round() as usize;
        let selected: HashSet<usize> = rng
            .sample_distinct(target_count, total)
            .into_iter()
            .collect();

        let mut observed = Vec::with_capacity(total - selected.len());
        let mut targets = Vec::with_capacity(selected.len());
        let mut truth = Vec::with_capacity(selected.len());
        let mut reference = Vec::with_capacity(total);
        for i in 0..people {
            for j in 0..people {
                if i == j {
                    continue;
                }
                let pair = LabeledPair {
                    i,
                    j,
                    knows: matrix.get(i, j),
                };
                reference.push(pair);
                if selected.contains(&pair_code(i, j, people)) {
                    targets.push((i, j));
                    truth.push(pair);
                } else {
                    observed.push(pair);
                }
            }
        }

        info!(
            observed = observed.len(),
            targets = targets.len(),
            "partitioned ordered pairs"
        );
        Self {
            observed,
            targets,
            truth,
            reference,
        }
    }

    /// Fully observed pairs with their labels.
    #[must_use]
    pub fn observed(&self) -> &[LabeledPair] {
        &self.observed
    }

    /// Held-out query pairs, without labels.
    #[must_use]
    pub fn targets(&self) -> &[(usize, usize)] {
        &self.targets
    }

    /// Ground-truth labels for exactly the target pairs.
    #[must_use]
    pub fn truth(&self) -> &[LabeledPair] {
        &self.truth
    }

    /// Every ordered non-self pair with its label, for debugging/analysis.
    #[must_use]
    pub fn reference(&self) -> &[LabeledPair] {
        &self.reference
    }
}

/// Bijection from ordered non-self pairs onto `[0, people * (people - 1))`.
const fn pair_code(i: usize, j: usize, people: usize) -> usize {
    let column = if j < i { j } else { j - 1 };
    i * (people - 1) + column
}
