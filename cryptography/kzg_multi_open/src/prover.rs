use bls12_381::{G1Point, Scalar};
use maybe_rayon::prelude::*;
use polynomial::{cosets::coset_gens, cosets::reverse_bit_order, domain::Domain};

use crate::{
    kzg::{commit_to_poly, compute_proof_multi},
    sample::Sample,
    Crs,
};

/// Shards blobs into samples, committing each row and producing a KZG multi-proof for
/// every one of its samples.
///
/// Mirrors the teacher's `FK20Prover`/`ProverContext` shape: the dimensions (`num_locs`,
/// `num_cols`) and the coset factors they imply are fixed once at construction, and
/// `create_matrix` is then a pure function of the blobs.
#[derive(Debug, Clone)]
pub struct Prover {
    crs: Crs,
    num_locs: usize,
    num_cols: usize,
    domain: Domain,
    /// Bit-reversed coset shifts `h_j`, one per column.
    coset_shifts: Vec<Scalar>,
}

impl Prover {
    /// Creates a prover for blobs of length `num_locs * num_cols`, where `num_locs` is
    /// the sample width and `num_cols` the number of samples per row.
    ///
    /// # Panics
    ///
    /// Panics if `num_locs`/`num_cols` are not powers of two, or if the CRS does not
    /// have enough G1 powers to commit to a degree-`<num_locs * num_cols` polynomial.
    pub fn new(crs: Crs, num_locs: usize, num_cols: usize) -> Self {
        assert!(num_locs.is_power_of_two(), "num_locs must be a power of two");
        assert!(num_cols.is_power_of_two(), "num_cols must be a power of two");

        let row_len = num_locs * num_cols;
        assert!(
            crs.s1.len() >= row_len,
            "CRS has {} G1 powers but rows have {row_len} coefficients",
            crs.s1.len()
        );

        let coset_shifts = coset_gens(num_locs, num_cols, true);

        Self {
            crs,
            num_locs,
            num_cols,
            domain: Domain::new(row_len),
            coset_shifts,
        }
    }

    /// Shards `blobs` into a matrix of samples and returns it together with the list
    /// of per-row commitments.
    ///
    /// # Panics
    ///
    /// Panics if any blob does not have exactly `num_locs * num_cols` elements.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    pub fn create_matrix(&self, blobs: &[Vec<Scalar>]) -> (Vec<Vec<Sample>>, Vec<G1Point>) {
        let row_len = self.num_locs * self.num_cols;

        let rows: Vec<(Vec<Sample>, G1Point)> = blobs
            .iter()
            .collect::<Vec<_>>()
            .maybe_par_iter()
            .enumerate()
            .map(|(row, &blob)| {
                assert_eq!(
                    blob.len(),
                    row_len,
                    "row {row} has {} elements, expected {row_len}",
                    blob.len()
                );

                let mut coeffs_input = blob.clone();
                reverse_bit_order(&mut coeffs_input);
                let poly = self.domain.ifft_scalars(coeffs_input);

                let commitment = commit_to_poly(&self.crs, &poly);

                let samples = (0..self.num_cols)
                    .map(|column| {
                        let h_j = self.coset_shifts[column];
                        let values = blob[self.num_locs * column..self.num_locs * (column + 1)].to_vec();
                        let proof = compute_proof_multi(&self.crs, &poly, h_j, self.num_locs);
                        Sample {
                            row,
                            column,
                            values,
                            proof,
                        }
                    })
                    .collect();

                (samples, commitment)
            })
            .collect();

        rows.into_iter().unzip()
    }
}
