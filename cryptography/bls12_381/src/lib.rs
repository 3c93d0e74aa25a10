use pairing::{MillerLoopResult, MultiMillerLoop};
use traits::*;

pub mod batch_inversion;
pub mod lincomb;

// Re-export ff and group, so other crates do not need to directly import
// (and independently version) them.
pub use ff;
pub use group;

pub mod traits {
    pub use ff::{Field, PrimeField};
    pub use group::{prime::PrimeCurveAffine, Curve, Group};
}

/// Affine representation of a point in the BLS12-381 G1 curve group.
pub type G1Point = blstrs::G1Affine;

/// Projective representation of a point in the BLS12-381 G1 curve group.
pub type G1Projective = blstrs::G1Projective;

/// Affine representation of a point in the BLS12-381 G2 curve group.
pub type G2Point = blstrs::G2Affine;

/// Projective representation of a point in the BLS12-381 G2 curve group.
pub type G2Projective = blstrs::G2Projective;

/// Precomputed G2 point for efficient pairing computations.
///
/// This representation allows reusing expensive Miller loop setup across multiple pairings.
pub type G2Prepared = blstrs::G2Prepared;

/// Scalar field element for the BLS12-381 curve.
pub type Scalar = blstrs::Scalar;

/// Checks whether the product of pairings over the given G1 x G2 pairs equals the identity
/// in the target group, after final exponentiation.
pub fn multi_pairings(pairs: &[(&G1Point, &G2Prepared)]) -> bool {
    blstrs::Bls12::multi_miller_loop(pairs)
        .final_exponentiation()
        .is_identity()
        .into()
}

/// Converts projective G1 points to normalized (affine) points efficiently.
///
/// Note: this efficient variation is needed here and not for G2 because it is called
/// from the multi-scalar-multiplication call sites in `lincomb`.
pub fn g1_batch_normalize(projective_points: &[G1Projective]) -> Vec<G1Point> {
    if projective_points.is_empty() {
        return Vec::new();
    }

    // Track which points are identity and create a filtered vec without them.
    //
    // This is because blst will convert all points into the identity point
    // if even one of them is the identity point.
    let mut identity_positions = Vec::new();
    let mut non_identity_points = Vec::new();

    for (idx, point) in projective_points.iter().enumerate() {
        if point.is_identity().into() {
            identity_positions.push(idx);
        } else {
            non_identity_points.push(*point);
        }
    }

    if non_identity_points.is_empty() {
        return vec![G1Point::identity(); projective_points.len()];
    }

    let points = unsafe {
        std::slice::from_raw_parts(
            non_identity_points.as_ptr().cast::<blst::blst_p1>(),
            non_identity_points.len(),
        )
    };

    let normalized = blst::p1_affines::from(points);

    let mut result: Vec<_> = normalized
        .as_slice()
        .iter()
        .map(|p| G1Point::from_raw_unchecked(p.x.into(), p.y.into(), false))
        .collect();

    for pos in identity_positions {
        result.insert(pos, G1Point::identity());
    }

    result
}

/// Efficiently batch-normalizes a slice of G2 projective points to their affine representation.
pub fn g2_batch_normalize(projective_points: &[G2Projective]) -> Vec<G2Point> {
    batch_normalize_points(projective_points)
}

/// Generic utility to batch-normalize projective points for any curve implementing
/// `PrimeCurveAffine`.
pub fn batch_normalize_points<T: PrimeCurveAffine>(points: &[T::Curve]) -> Vec<T>
where
    T::Curve: Curve<AffineRepr = T>,
{
    let mut affine_points = vec![T::identity(); points.len()];
    T::Curve::batch_normalize(points, &mut affine_points);
    affine_points
}
