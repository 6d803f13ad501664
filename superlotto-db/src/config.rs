use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{LottoError, Result};

/// Bornes inclusives des trois zones de la grille avant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneLayout {
    pub bounds: [(u8, u8); 3],
}

impl Default for ZoneLayout {
    fn default() -> Self {
        Self {
            bounds: [(1, 12), (13, 24), (25, 35)],
        }
    }
}

impl ZoneLayout {
    /// Index de la zone contenant `n`, ou `None` hors grille.
    pub fn zone_of(&self, n: u8) -> Option<usize> {
        self.bounds.iter().position(|&(lo, hi)| lo <= n && n <= hi)
    }
}

/// Règles structurelles fixes appliquées après les filtres statistiques.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructuralRules {
    pub sum_min: u16,
    pub sum_max: u16,
    pub required: Vec<u8>,
    pub forbidden: Vec<u8>,
    /// Nombre maximal de numéros voisins (±1) du tirage précédent.
    pub max_neighbor_hits: u32,
    /// Nombre maximal de numéros repris du tirage précédent.
    pub max_repeat_hits: u32,
}

impl Default for StructuralRules {
    fn default() -> Self {
        Self {
            sum_min: 80,
            sum_max: 100,
            required: vec![26],
            forbidden: vec![35],
            max_neighbor_hits: 1,
            max_repeat_hits: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrizeRule {
    pub front_hits: u8,
    pub back_hits: u8,
    pub amount: u64,
}

/// Barème des gains (hors gains variables, avant impôt).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrizeTable {
    pub rules: Vec<PrizeRule>,
}

impl Default for PrizeTable {
    fn default() -> Self {
        let rule = |front_hits, back_hits, amount| PrizeRule { front_hits, back_hits, amount };
        Self {
            rules: vec![
                rule(5, 2, 10_000_000),
                rule(5, 1, 800_691),
                rule(5, 0, 10_000),
                rule(4, 2, 3_000),
                rule(4, 1, 300),
                rule(3, 2, 200),
                rule(4, 0, 100),
                rule(3, 1, 15),
                rule(2, 2, 15),
                rule(3, 0, 5),
                rule(2, 1, 5),
                rule(1, 2, 5),
                rule(0, 2, 5),
            ],
        }
    }
}

impl PrizeTable {
    pub fn prize_for(&self, front_hits: u8, back_hits: u8) -> Option<u64> {
        self.rules
            .iter()
            .find(|r| r.front_hits == front_hits && r.back_hits == back_hits)
            .map(|r| r.amount)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LottoConfig {
    pub history_file: PathBuf,
    pub predict_file: PathBuf,
    pub sqlite_file: PathBuf,
    pub front_size: u8,
    pub back_size: u8,
    pub zones: ZoneLayout,
    pub rules: StructuralRules,
    pub top_k: usize,
    pub sample_count: usize,
    pub download_url: String,
    pub prizes: PrizeTable,
}

impl Default for LottoConfig {
    fn default() -> Self {
        Self {
            history_file: PathBuf::from("lottery.csv"),
            predict_file: PathBuf::from("predict.csv"),
            sqlite_file: PathBuf::from("data/predictions.db"),
            front_size: 35,
            back_size: 12,
            zones: ZoneLayout::default(),
            rules: StructuralRules::default(),
            top_k: 1,
            sample_count: 5,
            download_url: String::new(),
            prizes: PrizeTable::default(),
        }
    }
}

impl LottoConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| LottoError::Config(format!("lecture de {:?} : {}", path, e)))?;
        let config: LottoConfig = serde_json::from_str(&json)
            .map_err(|e| LottoError::Config(format!("JSON invalide dans {:?} : {}", path, e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.front_size < 5 || self.front_size > 62 {
            return Err(LottoError::Config(format!("front_size {} hors limites (5-62)", self.front_size)));
        }
        if self.back_size < 2 {
            return Err(LottoError::Config(format!("back_size {} hors limites", self.back_size)));
        }
        if self.rules.sum_min > self.rules.sum_max {
            return Err(LottoError::Config(format!(
                "sum_min {} > sum_max {}",
                self.rules.sum_min, self.rules.sum_max
            )));
        }
        if self.top_k == 0 {
            return Err(LottoError::Config("top_k doit être >= 1".to_string()));
        }
        let in_range = |n: &u8| (1..=self.front_size).contains(n);
        for (name, numbers) in [("required", &self.rules.required), ("forbidden", &self.rules.forbidden)] {
            if let Some(n) = numbers.iter().find(|n| !in_range(n)) {
                return Err(LottoError::Config(format!(
                    "rules.{} : {} hors de 1-{}",
                    name, n, self.front_size
                )));
            }
        }
        Ok(())
    }
}
