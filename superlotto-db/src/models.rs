use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;

use crate::error::{LottoError, Result};

pub const FRONT_PICK: usize = 5;
pub const BACK_PICK: usize = 2;

/// Un tirage historique, tel que lu dans la source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawRecord {
    pub period: String,
    pub date: String,
    pub front: [u8; FRONT_PICK],
    pub back: [u8; BACK_PICK],
}

impl DrawRecord {
    pub fn new(period: impl Into<String>, date: impl Into<String>, front: [u8; 5], back: [u8; 2]) -> Self {
        Self {
            period: period.into(),
            date: date.into(),
            front,
            back,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Front,
    Back,
}

impl Zone {
    pub fn numbers_from<'a>(&self, draw: &'a DrawRecord) -> &'a [u8] {
        match self {
            Zone::Front => &draw.front,
            Zone::Back => &draw.back,
        }
    }
}

/// Combinaison candidate : 5 numéros avant croissants + 2 numéros arrière.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CandidateCombination {
    pub front: [u8; FRONT_PICK],
    pub back: [u8; BACK_PICK],
}

impl CandidateCombination {
    pub fn new(front: [u8; 5], back: [u8; 2]) -> Self {
        Self { front, back }
    }

    pub fn numbers(&self) -> impl Iterator<Item = u8> + '_ {
        self.front.iter().chain(self.back.iter()).copied()
    }
}

impl fmt::Display for CandidateCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = self.numbers().map(|n| n.to_string()).collect::<Vec<_>>();
        write!(f, "{}", fields.join(","))
    }
}

impl FromStr for CandidateCombination {
    type Err = LottoError;

    fn from_str(s: &str) -> Result<Self> {
        let nums = s
            .split(',')
            .map(|part| part.trim().parse::<u8>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| LottoError::InvalidDraw(format!("combinaison '{}' : {}", s, e)))?;
        if nums.len() != FRONT_PICK + BACK_PICK {
            return Err(LottoError::InvalidDraw(format!(
                "combinaison '{}' : {} numéros au lieu de 7",
                s,
                nums.len()
            )));
        }
        Ok(Self {
            front: [nums[0], nums[1], nums[2], nums[3], nums[4]],
            back: [nums[5], nums[6]],
        })
    }
}

/// Lot de combinaisons produit par une exécution, horodaté à l'écriture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionBatch {
    pub timestamp: NaiveDateTime,
    pub candidates: Vec<CandidateCombination>,
}

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

impl PredictionBatch {
    pub fn new(timestamp: NaiveDateTime, candidates: Vec<CandidateCombination>) -> Self {
        Self { timestamp, candidates }
    }

    pub fn timestamp_line(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }
}

pub fn validate_draw(front: &[u8; 5], back: &[u8; 2], front_size: u8, back_size: u8) -> Result<()> {
    for &n in front {
        if n < 1 || n > front_size {
            return Err(LottoError::InvalidDraw(format!(
                "numéro avant {} hors limites (1-{})",
                n, front_size
            )));
        }
    }
    for &n in back {
        if n < 1 || n > back_size {
            return Err(LottoError::InvalidDraw(format!(
                "numéro arrière {} hors limites (1-{})",
                n, back_size
            )));
        }
    }
    for i in 0..front.len() {
        for j in (i + 1)..front.len() {
            if front[i] == front[j] {
                return Err(LottoError::InvalidDraw(format!("numéro avant en double : {}", front[i])));
            }
        }
    }
    if back[0] == back[1] {
        return Err(LottoError::InvalidDraw(format!("numéro arrière en double : {}", back[0])));
    }
    Ok(())
}
