use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use superlotto_db::error::{LottoError, Result};
use superlotto_db::models::CandidateCombination;

/// Source aléatoire reproductible si `seed` est fourni, sinon tirée de l'entropie système.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_rng(&mut rand::rng()),
    }
}

/// Tire `count` combinaisons distinctes, uniformément et sans remise.
pub fn select_random<R: Rng + ?Sized>(
    candidates: &[CandidateCombination],
    count: usize,
    rng: &mut R,
) -> Result<Vec<CandidateCombination>> {
    if candidates.len() < count {
        return Err(LottoError::InsufficientCandidates {
            requested: count,
            available: candidates.len(),
        });
    }
    Ok(rand::seq::index::sample(rng, candidates.len(), count)
        .into_iter()
        .map(|i| candidates[i])
        .collect())
}
