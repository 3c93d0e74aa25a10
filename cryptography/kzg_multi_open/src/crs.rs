use bls12_381::{
    ff::Field,
    g1_batch_normalize, g2_batch_normalize,
    group::Group,
    {G1Point, G1Projective, G2Point, G2Projective, Scalar},
};

/// The common reference string produced by a (simulated) trusted setup.
///
/// `s1[i] = [s^i]*G1` and `s2[i] = [s^i]*G2` for `i` in `[0, size]`, where `s` is the
/// discarded trapdoor. Once constructed, a `Crs` is an immutable, `Clone`-able value with
/// no internal mutability: there is no global singleton and no lock to take when reading it.
#[derive(Debug, Clone)]
pub struct Crs {
    /// Powers of `s` in G1: `{ s^i * G1 }`.
    pub s1: Vec<G1Point>,
    /// Powers of `s` in G2: `{ s^i * G2 }`.
    pub s2: Vec<G2Point>,
}

impl Crs {
    /// Generates a `Crs` of length `size + 1` from the trapdoor `s`.
    ///
    /// This corresponds to `generate_setup(s, size)` in the design: a one-shot,
    /// `Uninitialised -> Initialised` transition expressed as ordinary value
    /// construction rather than a process-wide singleton.
    ///
    /// The trapdoor `s` must be discarded by the caller after this call; this
    /// function does not (and cannot) enforce that.
    pub fn generate(s: Scalar, size: usize) -> Self {
        let num_points = size + 1;

        let g1_gen = G1Projective::generator();
        let mut s1_proj = Vec::with_capacity(num_points);
        let mut current_power = Scalar::ONE;
        for _ in 0..num_points {
            s1_proj.push(g1_gen * current_power);
            current_power *= s;
        }

        let g2_gen = G2Projective::generator();
        let mut s2_proj = Vec::with_capacity(num_points);
        let mut current_power = Scalar::ONE;
        for _ in 0..num_points {
            s2_proj.push(g2_gen * current_power);
            current_power *= s;
        }

        Self {
            s1: g1_batch_normalize(&s1_proj),
            s2: g2_batch_normalize(&s2_proj),
        }
    }

    /// The number of `G1`/`G2` powers held by this CRS (`size + 1`).
    pub fn size(&self) -> usize {
        self.s1.len()
    }
}
