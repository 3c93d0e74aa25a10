use bls12_381::{
    ff::Field,
    lincomb::g1_lincomb,
    multi_pairings,
    {G1Point, G1Projective, G2Point, G2Prepared, G2Projective, Scalar},
};
use polynomial::{domain::Domain, poly_coeff::divide_by_vanishing};

use crate::crs::Crs;

/// Commits to a polynomial in monomial form: `C = [P(s)]*G1`, computed as the MSM of
/// `poly`'s coefficients against the CRS's G1 powers.
///
/// # Panics
///
/// Panics if `poly` has more coefficients than the CRS has G1 powers; this is a
/// pre-condition violation, not a verification failure.
pub fn commit_to_poly(crs: &Crs, poly: &[Scalar]) -> G1Point {
    assert!(
        poly.len() <= crs.s1.len(),
        "polynomial has {} coefficients but the CRS only has {} G1 powers",
        poly.len(),
        crs.s1.len()
    );
    g1_lincomb(&crs.s1[..poly.len()], poly)
        .expect("g1 points and polynomial coefficients have the same length by construction")
        .into()
}

/// Produces a KZG multi-proof attesting to the evaluations of `poly` over the coset
/// `x * <n-th roots of unity>`.
///
/// `Z(X) = X^n - x^n` vanishes on that coset, so the proof is the commitment to the
/// quotient `Q(X) = P(X) / Z(X)`. The division is exact because `n` divides `poly.len()`
/// by construction: every residue class of `poly`'s coefficients modulo `n` is itself a
/// multiple of `(Y - x^n)` under the substitution `Y = X^n` (see
/// `polynomial::poly_coeff::divide_by_vanishing`).
///
/// # Panics
///
/// Panics if `n` does not divide `poly.len()`, or if `n` is not a power of two.
pub fn compute_proof_multi(crs: &Crs, poly: &[Scalar], x: Scalar, n: usize) -> G1Point {
    assert!(n.is_power_of_two(), "coset size must be a power of two");
    assert_eq!(
        poly.len() % n,
        0,
        "polynomial length must be a multiple of the coset size"
    );

    let quotient = divide_by_vanishing(poly, x, n);
    commit_to_poly(crs, &quotient)
}

/// Verifies a single KZG multi-proof: that `commitment` opens, at the coset `x * <n-th
/// roots of unity>` (`n = ys.len()`), to the evaluations `ys` (in the coset's natural,
/// non-bit-reversed point order), with opening proof `proof`.
///
/// Implements the pairing check described in the design:
/// 1. Interpolate `I`, the degree-`<n` polynomial with `I(x * w^l) = ys[l]`, via an IFFT
///    over the `n`-th roots of unity followed by an `x^-l` coefficient rescale.
/// 2. `A = [s^n]*G2 - [x^n]*G2`.
/// 3. `B = commitment - [I(s)]*G1`.
/// 4. Accept iff `e(G2, -B) * e(A, proof) == 1_GT`.
///
/// # Panics
///
/// Panics if `ys` is empty, not a power-of-two length, or if the CRS does not have a
/// `s2[n]` power (i.e. `crs.s2.len() <= n`).
pub fn check_proof_multi(crs: &Crs, commitment: G1Point, proof: G1Point, x: Scalar, ys: &[Scalar]) -> bool {
    let n = ys.len();
    assert!(n.is_power_of_two(), "ys must have power-of-two length");
    assert!(
        crs.s2.len() > n,
        "CRS needs {} G2 powers to check a degree-{n} coset opening, has {}",
        n + 1,
        crs.s2.len()
    );

    let domain = Domain::new(n);
    let i_raw = domain.ifft_scalars(ys.to_vec());

    // x is a coset shift (a power of the domain's generator), hence always non-zero.
    let x_inv = x.invert().expect("coset shift is non-zero");
    let mut scale = Scalar::ONE;
    let interpolation_poly: Vec<Scalar> = i_raw
        .into_iter()
        .map(|coeff| {
            let rescaled = coeff * scale;
            scale *= x_inv;
            rescaled
        })
        .collect();

    let comm_interpolation_poly = commit_to_poly(crs, &interpolation_poly);
    let b = G1Projective::from(commitment) - G1Projective::from(comm_interpolation_poly);
    let neg_b: G1Point = (-b).into();

    let x_n = x.pow_vartime([n as u64]);
    let g2_gen = crs.s2[0];
    let a: G2Point = (G2Projective::from(crs.s2[n]) - G2Projective::from(g2_gen) * x_n).into();

    multi_pairings(&[
        (&neg_b, &G2Prepared::from(g2_gen)),
        (&proof, &G2Prepared::from(a)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use bls12_381::group::Group;

    fn commit_proof_check_roundtrip(n: usize, x: Scalar) {
        let crs = Crs::generate(Scalar::from(1927409816240961209u64), n);

        let poly: Vec<Scalar> = (0..n).map(|i| Scalar::from((i * 7 + 3) as u64)).collect();
        let commitment = commit_to_poly(&crs, &poly);

        // check_proof_multi expects `ys` in the domain's natural root order (the caller
        // is responsible for undoing any bit-reversed storage order beforehand).
        let domain = Domain::new(n);
        let ys: Vec<Scalar> = domain
            .roots
            .iter()
            .map(|root| poly_eval(&poly, &(x * root)))
            .collect();

        let proof = compute_proof_multi(&crs, &poly, x, n);

        assert!(check_proof_multi(&crs, commitment, proof, x, &ys));
    }

    fn poly_eval(poly: &[Scalar], x: &Scalar) -> Scalar {
        let mut result = Scalar::ZERO;
        for coeff in poly.iter().rev() {
            result = result * x + coeff;
        }
        result
    }

    #[test]
    fn multi_proof_roundtrip_small() {
        commit_proof_check_roundtrip(4, Scalar::from(11u64));
    }

    #[test]
    fn multi_proof_roundtrip_larger() {
        commit_proof_check_roundtrip(16, Scalar::from(999u64));
    }

    #[test]
    fn multi_proof_rejects_tampered_evaluation() {
        let n = 8;
        let x = Scalar::from(5u64);
        let crs = Crs::generate(Scalar::from(123456789u64), n);

        let poly: Vec<Scalar> = (0..n).map(|i| Scalar::from(i as u64)).collect();
        let commitment = commit_to_poly(&crs, &poly);
        let proof = compute_proof_multi(&crs, &poly, x, n);

        let domain = Domain::new(n);
        let mut ys: Vec<Scalar> = domain.roots.iter().map(|root| poly_eval(&poly, &(x * root))).collect();
        ys[0] += Scalar::ONE;

        assert!(!check_proof_multi(&crs, commitment, proof, x, &ys));
    }

    #[test]
    fn commit_to_poly_matches_direct_msm() {
        let crs = Crs::generate(Scalar::from(2u64), 3);
        let poly = vec![Scalar::from(1u64), Scalar::from(2u64)];
        let expected = G1Projective::from(crs.s1[0]) * poly[0] + G1Projective::from(crs.s1[1]) * poly[1];
        assert_eq!(G1Projective::from(commit_to_poly(&crs, &poly)), expected);
    }

    #[test]
    #[should_panic]
    fn commit_to_poly_panics_when_poly_too_long() {
        let crs = Crs::generate(Scalar::from(2u64), 1);
        let poly = vec![Scalar::ONE, Scalar::ONE, Scalar::ONE];
        let _ = commit_to_poly(&crs, &poly);
    }
}
