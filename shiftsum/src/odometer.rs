//! Enumeration of shift assignments.
//!
//! An assignment picks one shift in `0..radix` for each of `positions` rows.
//! The [`Odometer`] walks through all `radix^positions` of them like a
//! mixed-radix counter where the last position turns fastest, so the
//! assignments come out in lexicographic order:
//! `(0, 0), (0, 1), (1, 0), (1, 1)` for two positions with radix two.

use num_bigint::BigUint;

/// Counts through all assignments of `0..radix` to `positions` slots.
#[derive(Debug, Clone)]
pub struct Odometer {
    radix: usize,
    digits: Vec<usize>,
    started: bool,
    exhausted: bool,
}

impl Odometer {
    /// Creates an odometer positioned before the first assignment.
    pub fn new(positions: usize, radix: usize) -> Self {
        Self {
            radix,
            digits: vec![0; positions],
            started: false,
            // There is nothing to assign to a non-empty set of positions.
            exhausted: radix == 0 && positions != 0,
        }
    }

    /// The number of positions.
    pub fn positions(&self) -> usize {
        self.digits.len()
    }

    /// Total number of assignments, `radix^positions`.
    pub fn total(&self) -> BigUint {
        total_assignments(self.positions(), self.radix)
    }

    /// Moves to the next assignment and returns it, or `None` once every
    /// assignment has been produced.
    ///
    /// Unlike [`Iterator::next`] this doesn't allocate.
    pub fn advance(&mut self) -> Option<&[usize]> {
        if self.exhausted {
            return None;
        }

        if !self.started {
            self.started = true;
            return Some(&self.digits);
        }

        let mut pos = self.digits.len();
        while pos > 0 {
            pos -= 1;
            self.digits[pos] += 1;
            if self.digits[pos] < self.radix {
                return Some(&self.digits);
            }
            self.digits[pos] = 0;
        }

        // Every position wrapped around.
        self.exhausted = true;
        None
    }
}

impl Iterator for Odometer {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance().map(<[usize]>::to_vec)
    }
}

/// Computes `radix^positions` without overflowing.
pub fn total_assignments(positions: usize, radix: usize) -> BigUint {
    num_traits::pow(BigUint::from(radix), positions)
}

#[cfg(test)]
mod test {
    use itertools::Itertools;
    use num_traits::ToPrimitive;

    use super::*;

    #[test]
    fn two_by_two() {
        let all: Vec<_> = Odometer::new(2, 2).collect();
        assert_eq!(all, [[0, 0], [0, 1], [1, 0], [1, 1]]);
    }

    /// The order has to be the same as the one of the cartesian product.
    #[test]
    fn matches_cartesian_product() {
        for positions in 1..5 {
            for radix in 1..5 {
                let expected: Vec<Vec<usize>> = (0..positions)
                    .map(|_| 0..radix)
                    .multi_cartesian_product()
                    .collect();
                let actual: Vec<_> = Odometer::new(positions, radix).collect();
                assert_eq!(actual, expected, "positions: {positions}, radix: {radix}");
                assert_eq!(
                    Odometer::new(positions, radix).total().to_usize(),
                    Some(expected.len())
                );
            }
        }
    }

    #[test]
    fn degenerate() {
        assert_eq!(Odometer::new(3, 0).count(), 0);
        assert_eq!(Odometer::new(3, 0).total(), BigUint::from(0u32));

        // There is exactly one way to assign nothing.
        let mut o = Odometer::new(0, 3);
        assert_eq!(o.advance(), Some(&[][..]));
        assert_eq!(o.advance(), None);
        assert_eq!(Odometer::new(0, 3).total(), BigUint::from(1u32));
    }

    #[test]
    fn stays_exhausted() {
        let mut o = Odometer::new(1, 2);
        assert_eq!(o.advance(), Some(&[0][..]));
        assert_eq!(o.advance(), Some(&[1][..]));
        assert_eq!(o.advance(), None);
        assert_eq!(o.advance(), None);
    }

    #[test]
    fn big_total() {
        let total = total_assignments(30, 6);
        assert_eq!(total.to_string(), "221073919720733357899776");
    }
}
