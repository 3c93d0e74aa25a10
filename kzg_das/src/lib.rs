#[cfg(all(feature = "singlethreaded", feature = "multithreaded"))]
compile_error!("`singlethreaded` and `multithreaded` cannot be enabled simultaneously");

use bls12_381::{G1Point, Scalar};
use kzg_multi_open::{Crs, Prover, Sample, Verifier};

pub use kzg_multi_open::VerifierError;

/// Generates a (simulated) trusted setup of length `size + 1`, from the discarded
/// trapdoor `s`.
///
/// The caller is responsible for discarding `s` once this returns; a real deployment
/// would instead obtain a `Crs` from a multi-party ceremony transcript.
pub fn generate_setup(s: Scalar, size: usize) -> Crs {
    Crs::generate(s, size)
}

/// The shared environment for building and checking data-availability samples.
///
/// `DasContext` pairs a `Prover` and a `Verifier` configured from the same `Crs` and
/// the same `(N_locs, N_cols)` dimensions, mirroring the teacher's `DASContext`: both
/// sides of the protocol are constructed once and reused across many blobs, rather
/// than re-deriving their precomputed coset factors on every call.
#[derive(Debug, Clone)]
pub struct DasContext {
    prover_ctx: Prover,
    verifier_ctx: Verifier,
}

impl DasContext {
    /// Creates a context for blobs sharded into `num_cols` samples of `num_locs`
    /// values each, under the given `Crs`.
    ///
    /// # Panics
    ///
    /// Panics if `num_locs`/`num_cols` are not powers of two, or if `crs` is too
    /// short for either side's requirements (see `Prover::new`/`Verifier::new`).
    pub fn new(crs: Crs, num_locs: usize, num_cols: usize) -> Self {
        Self {
            prover_ctx: Prover::new(crs.clone(), num_locs, num_cols),
            verifier_ctx: Verifier::new(crs, num_locs, num_cols),
        }
    }

    /// Shards `blobs` into a matrix of samples and their per-row commitments.
    pub fn create_matrix(&self, blobs: &[Vec<Scalar>]) -> (Vec<Vec<Sample>>, Vec<G1Point>) {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("create_matrix", num_blobs = blobs.len()).entered();

        self.prover_ctx.create_matrix(blobs)
    }

    /// Verifies a single sample against its row's commitment.
    pub fn verify(&self, sample: &Sample, commitments: &[G1Point]) -> bool {
        self.verifier_ctx.verify(sample, commitments)
    }

    /// `Result`-returning counterpart of [`Self::verify`].
    pub fn try_verify(&self, sample: &Sample, commitments: &[G1Point]) -> Result<(), VerifierError> {
        self.verifier_ctx.try_verify(sample, commitments)
    }

    /// Checks whether every sample in `samples` is a valid opening, via a single
    /// aggregated pairing check. An empty `samples` is vacuously accepted.
    pub fn verify_aggregated(&self, samples: &[Sample], commitments: &[G1Point]) -> bool {
        self.verifier_ctx.verify_aggregated(samples, commitments)
    }

    /// Localises corrupted samples in `samples` by binary search over aggregated
    /// pairing checks. Returns the ascending list of corrupted indices, `[]` if the
    /// whole set verifies.
    ///
    /// # Panics
    ///
    /// Panics if `samples` is empty.
    pub fn detect_aggregated(&self, samples: &[Sample], commitments: &[G1Point]) -> Vec<usize> {
        self.verifier_ctx.detect_aggregated(samples, commitments)
    }
}
