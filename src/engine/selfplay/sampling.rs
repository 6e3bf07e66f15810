use rand::Rng;
use rand_distr::{Dirichlet, Distribution};
use crate::engine::selfplay::config::ExplorationNoise;
use crate::r#move::Move;

/// Roulette selection over `(move, probability)` pairs.
///
/// Draws `r` in `[0, 1)` and walks the candidates subtracting each probability until `r`
/// drops below zero. If the probabilities run out first, the most probable move is taken;
/// ties go to the earliest candidate. Returns `None` only when there are no candidates.
pub fn pick_move<R: Rng + ?Sized>(candidates: &[(Move, f32)], rng: &mut R) -> Option<Move> {
    let mut r: f32 = rng.gen();
    for &(mv, probability) in candidates {
        r -= probability;
        if r < 0.0 {
            return Some(mv);
        }
    }
    most_probable(candidates)
}

/// The first candidate with the highest probability.
pub fn most_probable(candidates: &[(Move, f32)]) -> Option<Move> {
    let mut best: Option<(Move, f32)> = None;
    for &(mv, probability) in candidates {
        match best {
            Some((_, best_probability)) if probability <= best_probability => {},
            _ => best = Some((mv, probability)),
        }
    }
    best.map(|(mv, _)| mv)
}

/// Mixes Dirichlet noise into the candidate probabilities.
/// Fewer than two candidates leaves them untouched.
pub fn add_exploration_noise<R: Rng + ?Sized>(candidates: &mut [(Move, f32)], noise: ExplorationNoise, rng: &mut R) {
    if candidates.len() < 2 {
        return;
    }
    let alpha = vec![noise.alpha; candidates.len()];
    let dirichlet = match Dirichlet::new(&alpha) {
        Ok(dirichlet) => dirichlet,
        Err(err) => {
            tracing::warn!(alpha = noise.alpha, %err, "skipping exploration noise");
            return;
        }
    };
    let sample: Vec<f64> = dirichlet.sample(rng);
    for ((_, probability), eta) in candidates.iter_mut().zip(sample) {
        *probability = (1.0 - noise.epsilon) * *probability + noise.epsilon * eta as f32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use crate::state::Position;

    fn candidates(probabilities: &[f32]) -> Vec<(Move, f32)> {
        Position::initial().legal_moves().into_iter().zip(probabilities.iter().copied()).collect()
    }

    #[test]
    fn test_certain_move_is_always_picked() {
        let candidates = candidates(&[0.0, 1.0, 0.0]);
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            assert_eq!(pick_move(&candidates, &mut rng), Some(candidates[1].0));
        }
    }

    #[test]
    fn test_exhausted_roulette_falls_back_to_most_probable() {
        // The probabilities sum to well under any r, except for rare tiny draws.
        let candidates = candidates(&[1e-9, 3e-9, 3e-9, 2e-9]);
        let mut rng = StdRng::seed_from_u64(5);
        let picked: Vec<Move> = (0..20).filter_map(|_| pick_move(&candidates, &mut rng)).collect();
        assert!(picked.iter().filter(|&&mv| mv == candidates[1].0).count() >= 19);
        assert_eq!(most_probable(&candidates), Some(candidates[1].0));
    }

    #[test]
    fn test_no_candidates() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(pick_move(&[], &mut rng), None);
        assert_eq!(most_probable(&[]), None);
    }

    #[test]
    fn test_roulette_follows_probabilities() {
        let candidates = candidates(&[0.25, 0.75]);
        let mut rng = StdRng::seed_from_u64(42);
        let first = (0..4000).filter(|_| pick_move(&candidates, &mut rng) == Some(candidates[0].0)).count();
        assert!((800..1200).contains(&first), "picked first move {} times", first);
    }

    #[test]
    fn test_exploration_noise() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut noisy = candidates(&[0.5, 0.3, 0.2]);
        add_exploration_noise(&mut noisy, ExplorationNoise::default(), &mut rng);
        let total: f32 = noisy.iter().map(|(_, p)| p).sum();
        assert!((total - 1.0).abs() < 1e-4);
        assert!(noisy.iter().zip([0.5, 0.3, 0.2]).any(|((_, p), original)| (p - original).abs() > 1e-6));

        let mut single = candidates(&[0.4]);
        add_exploration_noise(&mut single, ExplorationNoise::default(), &mut rng);
        assert_eq!(single[0].1, 0.4);
    }
}
