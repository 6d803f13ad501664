use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use chrono::NaiveDateTime;

use crate::error::{LottoError, Result};
use crate::models::{CandidateCombination, PredictionBatch, TIMESTAMP_FORMAT};

/// Destination des lots de prédictions. Les lots sont ajoutés, jamais réécrits.
pub trait PredictionStore {
    fn append(&mut self, batch: &PredictionBatch) -> Result<()>;

    fn name(&self) -> String;
}

/// Fichier texte : une ligne d'horodatage puis une ligne par combinaison.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Relit tous les lots écrits, du plus ancien au plus récent.
    pub fn read_batches(&self) -> Result<Vec<PredictionBatch>> {
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| LottoError::data_load(&self.path, e))?;

        let mut batches: Vec<PredictionBatch> = Vec::new();
        for (i, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Ok(timestamp) = NaiveDateTime::parse_from_str(line, TIMESTAMP_FORMAT) {
                batches.push(PredictionBatch::new(timestamp, Vec::new()));
                continue;
            }
            let combo: CandidateCombination = line
                .parse()
                .map_err(|e| LottoError::data_load(&self.path, format!("ligne {} : {}", i + 1, e)))?;
            match batches.last_mut() {
                Some(batch) => batch.candidates.push(combo),
                None => {
                    return Err(LottoError::data_load(
                        &self.path,
                        format!("ligne {} : combinaison sans horodatage", i + 1),
                    ))
                }
            }
        }
        Ok(batches)
    }
}

impl PredictionStore for FileStore {
    fn append(&mut self, batch: &PredictionBatch) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| LottoError::PersistenceWrite(format!("{:?} : {}", parent, e)))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| LottoError::PersistenceWrite(format!("{:?} : {}", self.path, e)))?;

        let mut writer = BufWriter::new(file);
        let write_all = |w: &mut BufWriter<std::fs::File>| -> std::io::Result<()> {
            writeln!(w, "{}", batch.timestamp_line())?;
            for combo in &batch.candidates {
                writeln!(w, "{}", combo)?;
            }
            w.flush()
        };
        write_all(&mut writer).map_err(|e| LottoError::PersistenceWrite(format!("{:?} : {}", self.path, e)))?;

        log::debug!("{} combinaisons ajoutées à {:?}", batch.candidates.len(), self.path);
        Ok(())
    }

    fn name(&self) -> String {
        self.path.display().to_string()
    }
}
