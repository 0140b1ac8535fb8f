use rand::RngExt;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Create a deterministic StdRng from a u64 seed.
/// This is the ONLY way to create an RNG in the game.
/// All randomness flows through world.rng which is created by this function.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Uniform [0, 1) draw compared against `probability`.
pub fn chance(rng: &mut StdRng, probability: f64) -> bool {
    rng.random::<f64>() < probability
}

/// Index into `weights` chosen proportionally to each weight. Zero weights
/// are never chosen; an all-zero or empty table yields None.
pub fn pick_weighted(rng: &mut StdRng, weights: &[u32]) -> Option<usize> {
    let total: u64 = weights.iter().map(|&w| u64::from(w)).sum();
    if total == 0 {
        return None;
    }
    let mut roll = (rng.random::<f64>() * total as f64) as u64;
    for (i, &w) in weights.iter().enumerate() {
        let w = u64::from(w);
        if roll < w {
            return Some(i);
        }
        roll -= w;
    }
    // Only reachable through float rounding at the very top of the range.
    weights.iter().rposition(|&w| w > 0)
}
