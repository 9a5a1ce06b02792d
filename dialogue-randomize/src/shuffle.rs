//! The windowed-rejection shuffler.
//!
//! A plain uniform shuffle can land turns at or near their original
//! positions, letting a control corpus accidentally reproduce short-range
//! genuine alignment. The shuffler redraws whole permutations until no
//! position coincides with the original ordering anywhere in its local
//! neighborhood.

use rand::seq::SliceRandom;
use rand::Rng;

/// Redraws per window size before the window shrinks.
const ATTEMPTS_PER_WINDOW: usize = 1000;

/// Produce a permutation of `original` such that for every position `i`,
/// the value at `i` differs from the original value at every position in
/// `[i - window, i]`.
///
/// The constraint is unsatisfiable for short sequences (any sequence of
/// length `<= window + 1` has a position whose whole neighborhood is
/// forbidden), so after a bounded number of failed draws the window
/// shrinks by one and the budget resets. Window zero accepts any
/// permutation, which guarantees termination for every input.
pub(crate) fn window_shuffle<R: Rng>(rng: &mut R, original: &[usize], window: usize) -> Vec<usize> {
    let mut order: Vec<usize> = original.to_vec();
    if original.len() < 2 {
        return order;
    }
    let mut window = window.min(original.len() - 1);
    loop {
        for _ in 0..ATTEMPTS_PER_WINDOW {
            order.shuffle(rng);
            if satisfies_window(&order, original, window) {
                return order;
            }
        }
        if window == 0 {
            // Unreachable: window zero always satisfies.
            return order;
        }
        window -= 1;
    }
}

pub(crate) fn satisfies_window(shuffled: &[usize], original: &[usize], window: usize) -> bool {
    if window == 0 {
        return true;
    }
    for i in 0..shuffled.len() {
        let lo = i.saturating_sub(window);
        for j in lo..=i {
            if shuffled[i] == original[j] {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_window_constraint_holds() {
        let original: Vec<usize> = (0..30).collect();
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..20 {
            let shuffled = window_shuffle(&mut rng, &original, 3);
            assert_eq!(shuffled.len(), original.len());
            for i in 0..shuffled.len() {
                for j in i.saturating_sub(3)..=i {
                    assert_ne!(shuffled[i], original[j], "position {} hit original {}", i, j);
                }
            }
        }
    }

    #[test]
    fn test_result_is_a_permutation() {
        let original = vec![4, 9, 2, 7, 11, 0, 5, 3, 8, 1, 10, 6];
        let mut rng = SmallRng::seed_from_u64(11);
        let mut shuffled = window_shuffle(&mut rng, &original, 2);
        shuffled.sort_unstable();
        let mut expected = original.clone();
        expected.sort_unstable();
        assert_eq!(shuffled, expected);
    }

    #[test]
    fn test_short_sequences_terminate() {
        let mut rng = SmallRng::seed_from_u64(3);
        // Length <= window + 1: constraint unsatisfiable, window shrinks.
        assert_eq!(window_shuffle(&mut rng, &[0], 5), vec![0]);
        let two = window_shuffle(&mut rng, &[0, 1], 5);
        assert_eq!(two.len(), 2);
    }

    #[test]
    fn test_satisfies_window_rejects_identity() {
        let original: Vec<usize> = (0..10).collect();
        assert!(!satisfies_window(&original, &original, 1));
        assert!(satisfies_window(&original, &original, 0));
    }
}
