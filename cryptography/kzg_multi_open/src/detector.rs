use bls12_381::{multi_pairings, G1Point};
use rand::RngCore;

use crate::{sample::Sample, verifier::Verifier};

impl Verifier {
    /// Localises corrupted samples in `samples` by binary search, using `rng` to draw
    /// each recursive step's random linear-combination challenge.
    ///
    /// Returns the ascending list of indices (into `samples`) of corrupted samples.
    /// Returns `[]` if the whole set verifies.
    ///
    /// # Panics
    ///
    /// Panics if `samples` is empty.
    pub fn detect_aggregated_with_rng(
        &self,
        samples: &[Sample],
        commitments: &[G1Point],
        rng: &mut impl RngCore,
    ) -> Vec<usize> {
        assert!(!samples.is_empty(), "detect_aggregated requires a non-empty sample set");
        self.detect_range(samples, commitments, 0, samples.len(), rng)
    }

    /// As [`Self::detect_aggregated_with_rng`], drawing challenges from a cryptographic
    /// RNG.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    pub fn detect_aggregated(&self, samples: &[Sample], commitments: &[G1Point]) -> Vec<usize> {
        self.detect_aggregated_with_rng(samples, commitments, &mut rand::rngs::OsRng)
    }

    /// Checks the half-open range `samples[begin..end]` as a single aggregate, and
    /// recurses on both halves if it fails.
    ///
    /// The power base for the aggregate's random exponents is `begin + 1`, not a
    /// constant `1`: this keeps each recursive sub-range's exponent window disjoint
    /// from, and contiguous with, its siblings' (see the design notes on this
    /// subtlety — optimising the base to a constant breaks the recursion's
    /// correctness, even though any single call's own soundness does not depend on
    /// which base it uses).
    fn detect_range(
        &self,
        samples: &[Sample],
        commitments: &[G1Point],
        begin: usize,
        end: usize,
        rng: &mut impl RngCore,
    ) -> Vec<usize> {
        debug_assert!(begin < end);

        let range = &samples[begin..end];
        let power_base = (begin + 1) as u64;
        let (left, right) = self.aggregated_pairing_inputs(range, commitments, power_base, rng);

        if multi_pairings(&[(&left.0, &left.1), (&right.0, &right.1)]) {
            return Vec::new();
        }

        if end - begin == 1 {
            return vec![begin];
        }

        let mid = (begin + end) / 2;
        let mut corrupted = self.detect_range(samples, commitments, begin, mid, rng);
        corrupted.extend(self.detect_range(samples, commitments, mid, end, rng));
        corrupted
    }
}
