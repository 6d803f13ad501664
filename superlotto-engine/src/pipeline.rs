use std::collections::BTreeSet;

use chrono::NaiveDateTime;

use superlotto_db::config::LottoConfig;
use superlotto_db::error::{LottoError, Result};
use superlotto_db::models::{CandidateCombination, DrawRecord, PredictionBatch};
use superlotto_db::store::PredictionStore;

use crate::constraints::{select_constraints, ConstraintOverrides, ConstraintSet};
use crate::frequency::FrequencyAnalyzer;
use crate::generator::{CombinationGenerator, FilterReport};

#[derive(Debug, Clone)]
pub struct PredictionRun {
    pub constraints: ConstraintSet,
    pub batch: PredictionBatch,
    pub report: FilterReport,
    /// `false` si l'écriture a échoué ; le lot reste valide.
    pub persisted: bool,
}

/// Fréquences → contraintes → énumération → écriture.
pub fn run_prediction(
    history: &[DrawRecord],
    overrides: &ConstraintOverrides,
    config: &LottoConfig,
    store: &mut dyn PredictionStore,
    timestamp: NaiveDateTime,
) -> Result<PredictionRun> {
    if history.is_empty() {
        return Err(LottoError::data_load(&config.history_file, "aucun tirage"));
    }

    let analyzer = FrequencyAnalyzer::new(history, config.zones);
    let constraints = select_constraints(&analyzer, overrides, config.top_k)?;
    log::info!("Contraintes : {}", constraints);

    let generation = CombinationGenerator::new(config).generate(history, &constraints)?;
    log::info!("{} combinaisons retenues", generation.candidates.len());

    let batch = PredictionBatch::new(timestamp, generation.candidates);
    let persisted = match store.append(&batch) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("Lot non enregistré dans {} : {}", store.name(), e);
            false
        }
    };

    Ok(PredictionRun {
        constraints,
        batch,
        report: generation.report,
        persisted,
    })
}

/// Numéros avant et arrière utilisés par l'ensemble du lot (grille multiple).
pub fn compound_sets(candidates: &[CandidateCombination]) -> (BTreeSet<u8>, BTreeSet<u8>) {
    let mut front = BTreeSet::new();
    let mut back = BTreeSet::new();
    for c in candidates {
        front.extend(c.front);
        back.extend(c.back);
    }
    (front, back)
}
