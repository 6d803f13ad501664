use std::path::PathBuf;

/// Erreurs du moteur d'analyse et de ses collaborateurs.
#[derive(Debug, thiserror::Error)]
pub enum LottoError {
    #[error("Chargement de l'historique impossible ({path}) : {reason}")]
    DataLoad { path: PathBuf, reason: String },

    #[error("Tirage invalide : {0}")]
    InvalidDraw(String),

    #[error("Écriture des prédictions impossible : {0}")]
    PersistenceWrite(String),

    #[error("Pas assez de combinaisons : {requested} demandées, {available} disponibles")]
    InsufficientCandidates { requested: usize, available: usize },

    #[error("Caractéristique dégénérée : {0}")]
    DegenerateFeature(String),

    #[error("Configuration invalide : {0}")]
    Config(String),

    #[error("Mise à jour des données impossible : {0}")]
    Refresh(String),

    #[error("Erreur SQLite : {0}")]
    Sqlite(#[from] rusqlite::Error),
}

impl LottoError {
    pub fn data_load(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        LottoError::DataLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T, E = LottoError> = std::result::Result<T, E>;
