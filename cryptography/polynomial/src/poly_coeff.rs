use std::ops::{Deref, DerefMut};

use bls12_381::{ff::Field, Scalar};

/// A polynomial in monomial form over the field `Scalar`.
///
/// Internally stores coefficients in ascending order of degree:
///
/// ```text
/// Layout: x^0 * a_0 + x^1 * a_1 + ... + x^(n-1) * a_(n-1)
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Default)]
pub struct PolyCoeff(pub Vec<Scalar>);

impl PolyCoeff {
    /// Adds two polynomials `self + other` and returns the result.
    ///
    /// Polynomials may have different lengths; the shorter one is padded with zeros.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        let mut result = self.clone();
        if other.len() > result.len() {
            result.resize(other.len(), Scalar::ZERO);
        }
        for (i, &b) in other.iter().enumerate() {
            result[i] += b;
        }
        result.truncate_leading_zeros();
        result
    }

    /// Computes the additive inverse `-self` and returns the result.
    #[must_use]
    pub fn neg(&self) -> Self {
        Self(self.iter().map(|c| -*c).collect())
    }

    /// Subtracts `other` from `self`, returning `self - other`.
    ///
    /// Internally implemented as `self + (-other)`.
    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    /// Evaluates the polynomial at the given scalar point `x`.
    ///
    /// Uses Horner's method for efficient evaluation.
    #[must_use]
    pub fn eval(&self, x: &Scalar) -> Scalar {
        let mut result = Scalar::ZERO;
        for coeff in self.iter().rev() {
            result = result * x + coeff;
        }
        result
    }

    /// Multiplies two polynomials `self * other` and returns the result.
    ///
    /// The result has degree `self.degree() + other.degree()`.
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        let mut result = Self(vec![
            Scalar::ZERO;
            (self.len() + other.len()).saturating_sub(1)
        ]);
        for (i, a) in self.iter().enumerate() {
            for (j, b) in other.iter().enumerate() {
                result[i + j] += a * b;
            }
        }

        result.truncate_leading_zeros();
        result
    }

    /// Truncate the polynomial to remove trailing zeros.
    fn truncate_leading_zeros(&mut self) {
        while self.last().is_some_and(|c| c.is_zero().into()) {
            self.pop();
        }
    }
}

impl Deref for PolyCoeff {
    type Target = Vec<Scalar>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for PolyCoeff {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Vec<Scalar>> for PolyCoeff {
    fn from(value: Vec<Scalar>) -> Self {
        Self(value)
    }
}

/// Given a list of points, this method will compute the polynomial
/// Z(x) which is equal to zero when evaluated at each point.
///
/// Example: vanishing_poly([1, 2, 3]) = (x - 1)(x - 2)(x - 3)
pub fn vanishing_poly(roots: &[Scalar]) -> PolyCoeff {
    let mut poly = PolyCoeff(vec![Scalar::ONE]);
    for root in roots {
        poly = poly.mul(&PolyCoeff(vec![-root, Scalar::ONE]));
    }
    poly
}

/// Divides a polynomial by the linear divisor `(X - z)` using Ruffini's rule.
///
/// The caller is responsible for only calling this when the division is exact;
/// the remainder term is silently discarded.
pub fn divide_by_linear(poly: &[Scalar], z: Scalar) -> Vec<Scalar> {
    let mut quotient: Vec<Scalar> = Vec::with_capacity(poly.len());
    let mut k = Scalar::ZERO;

    for coeff in poly.iter().rev() {
        let t = *coeff + k;
        quotient.push(t);
        k = z * t;
    }

    // Pop off the remainder term.
    quotient.pop();

    // Reverse the results, since we built them highest-degree-first.
    quotient.reverse();
    quotient
}

/// Divides a polynomial by the sparse vanishing polynomial of a coset, `Z(X) = X^n - x^n`,
/// which vanishes on every point of `x * <n-th roots of unity>`.
///
/// `poly.len()` must be a multiple of `n`; the division must be exact (as it is whenever
/// `poly` is itself a multiple of `Z`, e.g. `P(X) - I(X)` where `I` interpolates `P`'s values
/// on that coset).
///
/// This generalizes `divide_by_linear` (the `n == 1` case) by noting that `Z` only couples
/// coefficients that are `n` apart: writing `Y = X^n`, each of the `n` residue-class
/// subsequences of `poly` (indices `r, r + n, r + 2n, ...`) is itself divisible by `(Y - x^n)`,
/// and `divide_by_linear` applies to each independently.
pub fn divide_by_vanishing(poly: &[Scalar], x: Scalar, n: usize) -> Vec<Scalar> {
    assert!(n > 0, "coset size must be non-zero");
    let m = poly.len();
    assert_eq!(m % n, 0, "polynomial length must be a multiple of n");

    let groups = m / n;
    let x_n = x.pow_vartime([n as u64]);

    let mut quotient = vec![Scalar::ZERO; m - n];
    for r in 0..n {
        let residue_class: Vec<Scalar> = (0..groups).map(|t| poly[r + t * n]).collect();
        let residue_quotient = divide_by_linear(&residue_class, x_n);
        for (t, q) in residue_quotient.into_iter().enumerate() {
            quotient[r + t * n] = q;
        }
    }
    quotient
}

/// Interpolates a set of points to a given polynomial in monomial form.
///
/// Given a list of points (x_i, y_i), this method will return the lowest degree polynomial
/// in monomial form that passes through all the points.
///
/// A simple O(n^2) algorithm (lagrange interpolation).
///
/// Note: This method is only used for testing. Our domain will always be the roots
/// of unity, so we use IFFT to interpolate.
pub fn lagrange_interpolate(points: &[(Scalar, Scalar)]) -> Option<PolyCoeff> {
    let max_degree_plus_one = points.len();
    assert!(
        max_degree_plus_one >= 2,
        "should interpolate for degree >= 1"
    );
    let mut coeffs = vec![Scalar::ZERO; max_degree_plus_one];
    for (k, p_k) in points.iter().enumerate() {
        let (x_k, y_k) = p_k;
        let mut contribution = vec![Scalar::ZERO; max_degree_plus_one];
        let mut denominator = Scalar::ONE;
        let mut max_contribution_degree = 0;
        for (j, p_j) in points.iter().enumerate() {
            let (x_j, _) = p_j;
            if j == k {
                continue;
            }

            let mut diff = *x_k;
            diff -= x_j;
            denominator *= diff;

            if max_contribution_degree == 0 {
                max_contribution_degree = 1;
                *contribution
                    .get_mut(0)
                    .expect("must have enough coefficients") -= x_j;
                *contribution
                    .get_mut(1)
                    .expect("must have enough coefficients") += Scalar::from(1u64);
            } else {
                let mul_by_minus_x_j: Vec<Scalar> = contribution
                    .iter()
                    .map(|el| {
                        let mut tmp = *el;
                        tmp *= x_j;

                        -tmp
                    })
                    .collect();

                contribution.insert(0, Scalar::ZERO);
                contribution.truncate(max_degree_plus_one);

                assert_eq!(mul_by_minus_x_j.len(), max_degree_plus_one);
                for (i, c) in contribution.iter_mut().enumerate() {
                    let other = mul_by_minus_x_j
                        .get(i)
                        .expect("should have enough elements");
                    *c += other;
                }
            }
        }

        denominator = denominator
            .invert()
            .expect("unexpected zero in denominator");
        for (i, this_contribution) in contribution.into_iter().enumerate() {
            let c = coeffs.get_mut(i).expect("should have enough coefficients");
            let mut tmp = this_contribution;
            tmp *= denominator;
            tmp *= y_k;
            *c += tmp;
        }
    }

    Some(coeffs.into())
}
