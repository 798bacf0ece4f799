// ============================================================
// Layer 4 — Eval/Training Splitter
// ============================================================
// Randomly shuffles the corpus and splits it into two sets:
//   - Eval set:     held out to measure the fine-tuned model
//   - Training set: fed to the fine-tuning engine
//
// Videos are gathered one after another, so prompts from the
// same lecture sit next to each other. Shuffling first keeps the
// eval set from being a few whole lectures.
//
// Split size:
//   eval_count = ceil(len * eval_split), clamped to len
//   e.g. 4 prompts, eval_split 0.5 → 2 eval, 2 training
//        10 prompts, eval_split 0.15 → 2 eval, 8 training
//
// Uses Fisher-Yates shuffle via rand::seq::SliceRandom, so every
// permutation is equally likely.
//
// Reference: Rust Book §8 (Vectors)
//            rand crate documentation

use rand::seq::SliceRandom;
use rand::Rng;

/// Number of items held out for a corpus of `total` items
pub fn eval_count(total: usize, eval_fraction: Option<f64>) -> usize {
    match eval_fraction {
        Some(f) if f > 0.0 => (((total as f64) * f).ceil() as usize).min(total),
        _ => 0,
    }
}

/// Shuffle `samples` with `rng` and split into (eval, training).
///
/// The shuffle happens even when nothing is held out, so the
/// training file is never in video order.
pub fn split_eval_train<T, R>(
    mut samples:   Vec<T>,
    eval_fraction: Option<f64>,
    rng:           &mut R,
) -> (Vec<T>, Vec<T>)
where
    R: Rng + ?Sized,
{
    samples.shuffle(rng);

    let total    = samples.len();
    let split_at = eval_count(total, eval_fraction);

    // After this: samples = eval [0..split_at], train = [split_at..total]
    let train = samples.split_off(split_at);

    tracing::debug!(
        "Corpus split: {} eval, {} training",
        samples.len(),
        train.len(),
    );

    (samples, train)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_half_split_of_four() {
        let items: Vec<usize> = (0..4).collect();
        let (eval, train)     = split_eval_train(items, Some(0.5), &mut rng());
        assert_eq!(eval.len(),  2);
        assert_eq!(train.len(), 2);

        let all: HashSet<usize> = eval.iter().chain(train.iter()).copied().collect();
        assert_eq!(all, (0..4).collect());
    }

    #[test]
    fn test_eval_count_rounds_up() {
        assert_eq!(eval_count(10, Some(0.15)), 2);
        assert_eq!(eval_count(3,  Some(0.01)), 1);
        assert_eq!(eval_count(0,  Some(0.5)),  0);
        assert_eq!(eval_count(5,  Some(1.0)),  5);
        assert_eq!(eval_count(5,  Some(0.0)),  0);
        assert_eq!(eval_count(5,  None),       0);
    }

    #[test]
    fn test_split_sizes_hold_for_many_lengths() {
        for total in 0..50usize {
            let items: Vec<usize> = (0..total).collect();
            let (eval, train)     = split_eval_train(items, Some(0.3), &mut rng());
            assert_eq!(eval.len(), ((total as f64) * 0.3).ceil() as usize);
            assert_eq!(eval.len() + train.len(), total);

            let mut all: Vec<usize> = eval.into_iter().chain(train).collect();
            all.sort_unstable();
            assert_eq!(all, (0..total).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_no_split_keeps_everything_for_training() {
        let items: Vec<usize> = (0..10).collect();
        let (eval, train)     = split_eval_train(items, None, &mut rng());
        assert!(eval.is_empty());
        assert_eq!(train.len(), 10);
    }

    #[test]
    fn test_shuffle_reorders() {
        let items: Vec<usize> = (0..100).collect();
        let (_, train)        = split_eval_train(items, None, &mut rng());
        assert_ne!(train, (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn test_empty_corpus() {
        let items: Vec<usize> = Vec::new();
        let (eval, train)     = split_eval_train(items, Some(0.2), &mut rng());
        assert!(eval.is_empty());
        assert!(train.is_empty());
    }
}
