//! Donor cursors: sequential consumption of donor material with padding.

use rand::Rng;

use crate::strategy::PaddingPolicy;

/// Tracks consumption of one donor's turn (or sentence) indices.
///
/// `next` yields indices from `order` in sequence; once the order is
/// exhausted, the padding policy decides what comes next. `None` means the
/// synthetic dialogue should stop growing (Cut, or an empty donor).
#[derive(Debug)]
pub(crate) struct DonorCursor {
    order: Vec<usize>,
    pos: usize,
    /// RandomWrap's jump target, chosen at the first exhaustion and
    /// reused on later ones.
    wrap_point: Option<usize>,
}

impl DonorCursor {
    pub fn new(order: Vec<usize>) -> Self {
        Self {
            order,
            pos: 0,
            wrap_point: None,
        }
    }

    pub fn next<R: Rng>(&mut self, padding: PaddingPolicy, rng: &mut R) -> Option<usize> {
        if self.order.is_empty() {
            return None;
        }
        if self.pos < self.order.len() {
            let value = self.order[self.pos];
            self.pos += 1;
            return Some(value);
        }
        match padding {
            PaddingPolicy::Wrap => {
                self.pos = 1;
                Some(self.order[0])
            }
            PaddingPolicy::RepeatLast => self.order.last().copied(),
            PaddingPolicy::RandomWrap => {
                let start = match self.wrap_point {
                    Some(p) => p,
                    None => {
                        let p = rng.gen_range(0..self.order.len());
                        self.wrap_point = Some(p);
                        p
                    }
                };
                self.pos = start + 1;
                Some(self.order[start])
            }
            PaddingPolicy::RandomEachTime => {
                Some(self.order[rng.gen_range(0..self.order.len())])
            }
            PaddingPolicy::Cut => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn drain(cursor: &mut DonorCursor, padding: PaddingPolicy, n: usize) -> Vec<Option<usize>> {
        let mut rng = SmallRng::seed_from_u64(5);
        (0..n).map(|_| cursor.next(padding, &mut rng)).collect()
    }

    #[test]
    fn test_wrap_restarts_at_zero() {
        let mut cursor = DonorCursor::new(vec![10, 20, 30]);
        let taken = drain(&mut cursor, PaddingPolicy::Wrap, 7);
        assert_eq!(
            taken,
            vec![Some(10), Some(20), Some(30), Some(10), Some(20), Some(30), Some(10)]
        );
    }

    #[test]
    fn test_repeat_last_clamps() {
        let mut cursor = DonorCursor::new(vec![10, 20]);
        let taken = drain(&mut cursor, PaddingPolicy::RepeatLast, 5);
        assert_eq!(taken, vec![Some(10), Some(20), Some(20), Some(20), Some(20)]);
    }

    #[test]
    fn test_cut_stops() {
        let mut cursor = DonorCursor::new(vec![10, 20]);
        let taken = drain(&mut cursor, PaddingPolicy::Cut, 4);
        assert_eq!(taken, vec![Some(10), Some(20), None, None]);
    }

    #[test]
    fn test_random_wrap_continues_sequentially() {
        let mut cursor = DonorCursor::new(vec![10, 20, 30, 40]);
        let taken = drain(&mut cursor, PaddingPolicy::RandomWrap, 9);
        // The first four are the sequential pass.
        assert_eq!(&taken[..4], &[Some(10), Some(20), Some(30), Some(40)]);
        // After exhaustion, consumption resumes somewhere and stays
        // sequential, wrapping back to the same point each time.
        let after: Vec<usize> = taken[4..].iter().map(|v| v.unwrap()).collect();
        for pair in after.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            assert!(b == a + 10 || (a == 40 && [10, 20, 30, 40].contains(&b)));
        }
    }

    #[test]
    fn test_random_each_time_draws_from_order() {
        let mut cursor = DonorCursor::new(vec![10, 20]);
        let taken = drain(&mut cursor, PaddingPolicy::RandomEachTime, 10);
        for value in taken.iter().skip(2) {
            assert!([Some(10), Some(20)].contains(value));
        }
    }

    #[test]
    fn test_empty_donor_yields_nothing() {
        let mut cursor = DonorCursor::new(Vec::new());
        assert_eq!(drain(&mut cursor, PaddingPolicy::Wrap, 2), vec![None, None]);
    }
}
