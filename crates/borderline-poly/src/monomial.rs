//! Packed monomial representation.
//!
//! Monomials are fixed-size exponent vectors with a cached total degree,
//! giving cheap comparison, multiplication and divisibility tests.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use smallvec::SmallVec;

/// Maximum number of variables supported.
pub const MAX_VARS: usize = 16;

/// Signed exponent difference between two monomials, one entry per variable.
pub type ExponentDiff = SmallVec<[i32; 8]>;

/// A monomial in up to [`MAX_VARS`] variables.
///
/// Each exponent is stored as a u16. The total degree is cached for
/// graded comparisons.
#[derive(Clone, Copy)]
pub struct Monomial {
    exponents: [u16; MAX_VARS],
    num_vars: u8,
    total_degree: u32,
}

impl Monomial {
    /// Creates a monomial from its exponents.
    ///
    /// # Panics
    ///
    /// Panics if more than [`MAX_VARS`] exponents are given.
    #[must_use]
    pub fn new(exps: &[u16]) -> Self {
        assert!(exps.len() <= MAX_VARS, "at most {MAX_VARS} variables");
        let mut exponents = [0u16; MAX_VARS];
        exponents[..exps.len()].copy_from_slice(exps);

        let total_degree: u32 = exps.iter().map(|&e| u32::from(e)).sum();

        Self {
            exponents,
            num_vars: exps.len() as u8,
            total_degree,
        }
    }

    /// The monomial 1 in `num_vars` variables.
    #[must_use]
    pub fn one(num_vars: usize) -> Self {
        assert!(num_vars <= MAX_VARS, "at most {MAX_VARS} variables");
        Self {
            exponents: [0u16; MAX_VARS],
            num_vars: num_vars as u8,
            total_degree: 0,
        }
    }

    /// Creates the monomial x_i.
    #[must_use]
    pub fn var(i: usize, num_vars: usize) -> Self {
        assert!(i < num_vars, "variable index {i} out of range");
        let mut m = Self::one(num_vars);
        m.exponents[i] = 1;
        m.total_degree = 1;
        m
    }

    /// Exponent of x_i (zero past the last variable).
    #[must_use]
    pub fn exponent(&self, i: usize) -> u16 {
        if i < MAX_VARS {
            self.exponents[i]
        } else {
            0
        }
    }

    /// Exponents of the active variables.
    #[must_use]
    pub fn exponents(&self) -> &[u16] {
        &self.exponents[..self.num_vars as usize]
    }

    /// Number of active variables.
    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.num_vars as usize
    }

    /// Sum of the exponents.
    #[must_use]
    pub fn total_degree(&self) -> u32 {
        self.total_degree
    }

    /// True for the monomial 1.
    #[must_use]
    pub fn is_one(&self) -> bool {
        self.total_degree == 0
    }

    /// Product of two monomials.
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        let mut exponents = [0u16; MAX_VARS];
        let n = self.num_vars.max(other.num_vars) as usize;

        for i in 0..n {
            exponents[i] = self.exponents[i].saturating_add(other.exponents[i]);
        }

        Self {
            exponents,
            num_vars: n as u8,
            total_degree: self.total_degree + other.total_degree,
        }
    }

    /// Multiplies by the variable x_i.
    #[must_use]
    pub fn mul_var(&self, i: usize) -> Self {
        let mut m = *self;
        m.exponents[i] = m.exponents[i].saturating_add(1);
        m.total_degree += 1;
        m
    }

    /// Exact quotient `self / other`.
    ///
    /// `None` unless `other` divides `self`.
    #[must_use]
    pub fn div(&self, other: &Self) -> Option<Self> {
        if !self.is_divisible_by(other) {
            return None;
        }

        let mut exponents = [0u16; MAX_VARS];
        let n = self.num_vars.max(other.num_vars) as usize;

        for i in 0..n {
            exponents[i] = self.exponents[i] - other.exponents[i];
        }

        Some(Self {
            exponents,
            num_vars: n as u8,
            total_degree: self.total_degree - other.total_degree,
        })
    }

    /// True if `other` divides `self`.
    #[must_use]
    pub fn is_divisible_by(&self, other: &Self) -> bool {
        if other.total_degree > self.total_degree {
            return false;
        }

        let n = self.num_vars.max(other.num_vars) as usize;
        for i in 0..n {
            if other.exponents[i] > self.exponents[i] {
                return false;
            }
        }
        true
    }

    /// Coordinate-wise difference `self - other`.
    ///
    /// `other` divides `self` iff every entry is non-negative; the entry sum
    /// is the degree distance between the two.
    #[must_use]
    pub fn difference(&self, other: &Self) -> ExponentDiff {
        let n = self.num_vars.max(other.num_vars) as usize;
        (0..n)
            .map(|i| i32::from(self.exponents[i]) - i32::from(other.exponents[i]))
            .collect()
    }

    /// Iterates over all divisors of this monomial, including 1 and itself.
    pub fn divisors(&self) -> impl Iterator<Item = Monomial> + '_ {
        let n = self.num_vars();
        let count: usize = self.exponents().iter().map(|&e| e as usize + 1).product();
        (0..count).map(move |mut k| {
            let mut exps = [0u16; MAX_VARS];
            for (i, exp) in exps.iter_mut().enumerate().take(n) {
                let radix = self.exponents[i] as usize + 1;
                *exp = (k % radix) as u16;
                k /= radix;
            }
            Monomial::new(&exps[..n])
        })
    }

    /// Graded reverse lexicographic comparison.
    #[must_use]
    pub fn cmp_grevlex(&self, other: &Self) -> Ordering {
        match self.total_degree.cmp(&other.total_degree) {
            Ordering::Equal => {}
            ord => return ord,
        }

        // Reverse lex: last variable first, comparison reversed.
        let n = self.num_vars.max(other.num_vars) as usize;
        for i in (0..n).rev() {
            match other.exponents[i].cmp(&self.exponents[i]) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }

        Ordering::Equal
    }

    /// Compares using graded lexicographic ordering.
    #[must_use]
    pub fn cmp_grlex(&self, other: &Self) -> Ordering {
        match self.total_degree.cmp(&other.total_degree) {
            Ordering::Equal => self.cmp_lex(other),
            ord => ord,
        }
    }

    /// Lexicographic comparison, x_0 most significant.
    #[must_use]
    pub fn cmp_lex(&self, other: &Self) -> Ordering {
        let n = self.num_vars.max(other.num_vars) as usize;
        for i in 0..n {
            match self.exponents[i].cmp(&other.exponents[i]) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        Ordering::Equal
    }

    /// Formats the monomial with the given variable names.
    #[must_use]
    pub fn display_with(&self, names: &[String]) -> String {
        let parts: Vec<String> = self
            .exponents()
            .iter()
            .enumerate()
            .filter(|&(_, &e)| e > 0)
            .map(|(i, &e)| {
                let name = names.get(i).cloned().unwrap_or_else(|| format!("x{i}"));
                if e == 1 {
                    name
                } else {
                    format!("{name}^{e}")
                }
            })
            .collect();

        if parts.is_empty() {
            "1".to_string()
        } else {
            parts.join("*")
        }
    }
}

impl PartialEq for Monomial {
    fn eq(&self, other: &Self) -> bool {
        if self.total_degree != other.total_degree {
            return false;
        }
        let n = self.num_vars.max(other.num_vars) as usize;
        self.exponents[..n] == other.exponents[..n]
    }
}

impl Eq for Monomial {}

impl Hash for Monomial {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Consistent with PartialEq, which ignores trailing zero exponents.
        self.total_degree.hash(state);

        let last_nonzero = self
            .exponents
            .iter()
            .rposition(|&e| e != 0)
            .map_or(0, |i| i + 1);
        self.exponents[..last_nonzero].hash(state);
    }
}

impl fmt::Debug for Monomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mono({self})")
    }
}

impl fmt::Display for Monomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_with(&[]))
    }
}

impl Default for Monomial {
    fn default() -> Self {
        Self::one(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monomial_mul() {
        let m1 = Monomial::new(&[1, 2, 0]); // x*y^2
        let m2 = Monomial::new(&[2, 0, 1]); // x^2*z

        let product = m1.mul(&m2);
        assert_eq!(product.exponent(0), 3);
        assert_eq!(product.exponent(1), 2);
        assert_eq!(product.exponent(2), 1);
        assert_eq!(product.total_degree(), 6);
        assert_eq!(m1.mul_var(2), Monomial::new(&[1, 2, 1]));
    }

    #[test]
    fn test_monomial_div() {
        let m1 = Monomial::new(&[3, 2, 1]);
        let m2 = Monomial::new(&[1, 1, 0]);

        let quotient = m1.div(&m2).unwrap();
        assert_eq!(quotient, Monomial::new(&[2, 1, 1]));

        let m3 = Monomial::new(&[1, 0, 0]);
        let m4 = Monomial::new(&[2, 0, 0]);
        assert!(m3.div(&m4).is_none());
    }

    #[test]
    fn test_difference() {
        let t = Monomial::new(&[2, 1]);
        let s = Monomial::new(&[1, 2]);

        assert_eq!(t.difference(&s).as_slice(), &[1, -1]);
        assert_eq!(t.difference(&Monomial::one(2)).iter().sum::<i32>(), 3);
    }

    #[test]
    fn test_divisors() {
        let m = Monomial::new(&[2, 1]);
        let divisors: Vec<_> = m.divisors().collect();

        assert_eq!(divisors.len(), 6);
        assert!(divisors.iter().all(|d| m.is_divisible_by(d)));
        assert!(divisors.contains(&Monomial::one(2)));
        assert!(divisors.contains(&m));
    }

    #[test]
    fn test_grevlex_ordering() {
        let x2 = Monomial::new(&[2, 0]);
        let xy = Monomial::new(&[1, 1]);
        let y2 = Monomial::new(&[0, 2]);
        let x = Monomial::new(&[1, 0]);
        let y = Monomial::new(&[0, 1]);
        let one = Monomial::one(2);

        assert_eq!(x2.cmp_grevlex(&xy), Ordering::Greater);
        assert_eq!(xy.cmp_grevlex(&y2), Ordering::Greater);
        assert_eq!(y2.cmp_grevlex(&x), Ordering::Greater);
        assert_eq!(x.cmp_grevlex(&y), Ordering::Greater);
        assert_eq!(y.cmp_grevlex(&one), Ordering::Greater);
    }

    #[test]
    fn test_grevlex_differs_from_grlex() {
        // x*z^2 vs y^3: grlex prefers x, grevlex looks at z first.
        let xz2 = Monomial::new(&[1, 0, 2]);
        let y3 = Monomial::new(&[0, 3, 0]);

        assert_eq!(xz2.cmp_grlex(&y3), Ordering::Greater);
        assert_eq!(xz2.cmp_grevlex(&y3), Ordering::Less);
    }

    #[test]
    fn test_hash_ignores_width() {
        use std::collections::hash_map::DefaultHasher;

        let hash = |m: &Monomial| {
            let mut h = DefaultHasher::new();
            m.hash(&mut h);
            h.finish()
        };

        let narrow = Monomial::new(&[1, 2]);
        let wide = Monomial::new(&[1, 2, 0]);
        assert_eq!(narrow, wide);
        assert_eq!(hash(&narrow), hash(&wide));
    }

    #[test]
    fn test_display() {
        let m = Monomial::new(&[2, 0, 1]);
        assert_eq!(m.to_string(), "x0^2*x2");
        assert_eq!(Monomial::one(3).to_string(), "1");
        let names = vec!["x".to_string(), "y".to_string(), "z".to_string()];
        assert_eq!(m.display_with(&names), "x^2*z");
    }
}
