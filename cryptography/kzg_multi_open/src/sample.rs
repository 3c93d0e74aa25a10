use bls12_381::{G1Point, Scalar};

/// A single sample drawn from the matrix: the evaluations of one row's polynomial over
/// one column's coset, together with the KZG multi-proof attesting to them.
///
/// Samples are value types. Nothing in a `Sample` holds a back-reference to the matrix
/// or commitments it came from; `row` and `column` are the only addressing information.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// Index into the commitment list identifying which row's polynomial this sample
    /// is an opening of.
    pub row: usize,
    /// Index of the coset (column) these values were evaluated on.
    pub column: usize,
    /// The `N_locs` evaluations of the row's polynomial over the column's coset, in
    /// the same order as they appear in the original blob (not bit-reversed).
    pub values: Vec<Scalar>,
    /// The KZG multi-proof attesting that `values` are genuine evaluations of the
    /// committed row polynomial over this column's coset.
    pub proof: G1Point,
}
