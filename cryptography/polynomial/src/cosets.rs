use crate::domain::Domain;
use bls12_381::ff::Field;
use bls12_381::Scalar;

/// Reverses the least significant `bits` of the given number `n`.
///
/// Taken and modified from: https://github.com/Plonky3/Plonky3/blob/a374139abead1008f84a439e95bb495e81ea4be5/util/src/lib.rs#L67-L76
pub const fn reverse_bits(n: usize, bits: u32) -> usize {
    n.reverse_bits().overflowing_shr(usize::BITS - bits).0
}

/// Computes log2 of an integer.
///
/// Panics if the integer is not a power of two.
pub const fn log2(x: u32) -> u32 {
    assert!(x > 0 && x.is_power_of_two(), "x must be a power of two.");
    x.trailing_zeros()
}

/// In-place bit-reversal permutation of a slice.
///
/// For example, if `a.len() == 8` (i.e., `log2(n) = 3`), the index permutation would be:
///
/// ```text
/// Index  Binary   Reversed   Swapped With
/// -----  -------  ---------  -------------
///   0     000       000           -
///   1     001       100           4
///   2     010       010           -
///   3     011       110           6
///   4     100       001           1
///   5     101       101           -
///   6     110       011           3
///   7     111       111           -
/// ```
///
/// This transformation is its own inverse, so applying it twice restores the original order.
///
/// # Panics
/// Panics if the slice length is not a power of two.
///
/// Taken and modified from: https://github.com/filecoin-project/ec-gpu/blob/bdde768d0613ae546524c5612e2ad576a646e036/ec-gpu-gen/src/fft_cpu.rs#L10C8-L10C18
pub fn reverse_bit_order<T>(a: &mut [T]) {
    let n = a.len() as u32;
    assert!(n.is_power_of_two(), "n must be a power of two");

    let log_n = log2(n);

    for k in 0..n {
        let rk = reverse_bits(k as usize, log_n) as u32;
        if k < rk {
            a.swap(rk as usize, k as usize);
        }
    }
}

/// Generates the coset factors `h_j` that tie each column `j` to its coset
/// `h_j * <num_points-th roots of unity>` of a domain of size `num_points * num_cosets`.
///
/// - `num_points` is the size of each coset (`N_locs` in a sampled row).
/// - `num_cosets` is the number of cosets (`N_cols`).
///
/// Returns a `Vec<Scalar>` of length `num_cosets`. Setting `bit_reversed` reorders the
/// cosets to match the order in which columns are laid out after a bit-reversal
/// permutation of the full domain.
pub fn coset_gens(num_points: usize, num_cosets: usize, bit_reversed: bool) -> Vec<Scalar> {
    // The full domain has `num_points * num_cosets` roots of unity; its generator,
    // raised to the appropriate power, generates the coset shifts.
    let full_domain_size = num_points * num_cosets;
    let coset_gen = Domain::new(full_domain_size).generator;

    let bits = log2(num_cosets as u32);

    (0..num_cosets)
        .map(|i| {
            let exp = if bit_reversed { reverse_bits(i, bits) } else { i };
            coset_gen.pow_vartime([exp as u64])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::{seq::SliceRandom, thread_rng};

    use super::*;

    #[test]
    fn test_reverse_bits_small() {
        assert_eq!(reverse_bits(0b000, 3), 0b000);
        assert_eq!(reverse_bits(0b001, 3), 0b100);
        assert_eq!(reverse_bits(0b010, 3), 0b010);
        assert_eq!(reverse_bits(0b011, 3), 0b110);
        assert_eq!(reverse_bits(0b100, 3), 0b001);
        assert_eq!(reverse_bits(0b101, 3), 0b101);
        assert_eq!(reverse_bits(0b110, 3), 0b011);
        assert_eq!(reverse_bits(0b111, 3), 0b111);
    }

    #[test]
    fn test_reverse_bit_order_len_4() {
        let mut arr = [10, 20, 30, 40];
        reverse_bit_order(&mut arr);
        assert_eq!(arr, [10, 30, 20, 40]);
    }

    #[test]
    fn test_reverse_bit_order_roundtrip() {
        for log_n in 1..=10 {
            let n = 1 << log_n;
            let mut rng = thread_rng();

            let mut original: Vec<u32> = (0..n).collect();
            original.shuffle(&mut rng);

            let mut reversed = original.clone();
            reverse_bit_order(&mut reversed);
            reverse_bit_order(&mut reversed);

            assert_eq!(
                reversed, original,
                "Mismatch after double reversal for len={n}"
            );
        }
    }

    #[test]
    fn coset_gens_partition_full_domain() {
        use std::collections::HashSet;

        let num_points = 8;
        let num_cosets = 4;
        let gens = coset_gens(num_points, num_cosets, true);
        assert_eq!(gens.len(), num_cosets);

        let subgroup = Domain::new(num_points).roots;
        let mut union = HashSet::new();
        for gen in &gens {
            for root in &subgroup {
                union.insert((gen * root).to_bytes_be());
            }
        }

        let full_domain: HashSet<_> = Domain::new(num_points * num_cosets)
            .roots
            .into_iter()
            .map(|s| s.to_bytes_be())
            .collect();
        assert_eq!(union, full_domain);
    }

    #[test]
    fn coset_gens_single_coset_is_trivial() {
        let gens = coset_gens(16, 1, true);
        assert_eq!(gens, vec![Scalar::ONE]);
    }
}
