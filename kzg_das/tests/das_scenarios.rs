use bls12_381::{ff::Field, Scalar};
use kzg_das::{generate_setup, DasContext};
use rand::{rngs::StdRng, SeedableRng};

fn random_blobs(rng: &mut StdRng, rows: usize, row_len: usize) -> Vec<Vec<Scalar>> {
    (0..rows)
        .map(|_| (0..row_len).map(|_| Scalar::random(&mut *rng)).collect())
        .collect()
}

/// S1: every sample produced by `create_matrix` individually verifies.
#[test]
fn s1_every_sample_in_a_small_matrix_verifies() {
    let mut rng = StdRng::seed_from_u64(1);
    let (num_rows, num_cols, num_locs) = (2, 2, 16);
    let crs = generate_setup(Scalar::random(&mut rng), num_locs * num_cols - 1);
    let ctx = DasContext::new(crs, num_locs, num_cols);

    let blobs = random_blobs(&mut rng, num_rows, num_locs * num_cols);
    let (matrix, commitments) = ctx.create_matrix(&blobs);

    assert_eq!(matrix.len(), num_rows);
    for row in &matrix {
        assert_eq!(row.len(), num_cols);
        for sample in row {
            assert!(ctx.verify(sample, &commitments));
        }
    }
}

/// S2/S3: an arbitrary subset of a well-formed matrix aggregate-verifies, and stops
/// doing so the moment one of its samples is tampered with.
#[test]
fn s2_s3_aggregated_subset_verifies_until_tampered() {
    let mut rng = StdRng::seed_from_u64(2);
    let (num_cols, num_locs) = (4, 16);
    let crs = generate_setup(Scalar::random(&mut rng), num_locs * num_cols - 1);
    let ctx = DasContext::new(crs, num_locs, num_cols);

    let blobs = random_blobs(&mut rng, 4, num_locs * num_cols);
    let (matrix, commitments) = ctx.create_matrix(&blobs);

    let mut samples = vec![
        matrix[0][3].clone(),
        matrix[2][0].clone(),
        matrix[2][2].clone(),
        matrix[3][2].clone(),
    ];

    assert!(ctx.verify_aggregated(&samples, &commitments));

    samples[0].values[0] += Scalar::ONE;
    assert!(!ctx.verify_aggregated(&samples, &commitments));
}

/// S4/S5/S6: the detector localises one, then two, then every corrupted sample in
/// the same subset used in S2/S3.
#[test]
fn s4_s5_s6_detector_localises_growing_corruption() {
    let mut rng = StdRng::seed_from_u64(3);
    let (num_cols, num_locs) = (4, 16);
    let crs = generate_setup(Scalar::random(&mut rng), num_locs * num_cols - 1);
    let ctx = DasContext::new(crs, num_locs, num_cols);

    let blobs = random_blobs(&mut rng, 4, num_locs * num_cols);
    let (matrix, commitments) = ctx.create_matrix(&blobs);

    let mut samples = vec![
        matrix[0][3].clone(),
        matrix[2][0].clone(),
        matrix[2][2].clone(),
        matrix[3][2].clone(),
    ];

    // S4: corrupt one sample.
    samples[0].values[0] += Scalar::ONE;
    assert_eq!(ctx.detect_aggregated(&samples, &commitments), vec![0]);

    // S5: corrupt a second, independent sample.
    samples[3].values[3] += Scalar::ONE;
    assert_eq!(ctx.detect_aggregated(&samples, &commitments), vec![0, 3]);

    // S6: corrupt everything.
    for sample in &mut samples {
        sample.values[0] += Scalar::ONE;
    }
    assert_eq!(
        ctx.detect_aggregated(&samples, &commitments),
        vec![0, 1, 2, 3]
    );
}

/// Boundary behaviour: an empty sample set vacuously aggregate-verifies.
#[test]
fn empty_sample_set_aggregate_verifies() {
    let crs = generate_setup(Scalar::from(7u64), 15);
    let ctx = DasContext::new(crs, 4, 4);
    assert!(ctx.verify_aggregated(&[], &[]));
}
