use superlotto_db::config::PrizeTable;
use superlotto_db::models::{CandidateCombination, DrawRecord};

use crate::bitset::NumberSet;

/// Numéros avant et arrière en commun avec le tirage.
pub fn hits(candidate: &CandidateCombination, draw: &DrawRecord) -> (u8, u8) {
    let front = NumberSet::from_numbers(&candidate.front).intersection_len(&NumberSet::from_numbers(&draw.front));
    let back = NumberSet::from_numbers(&candidate.back).intersection_len(&NumberSet::from_numbers(&draw.back));
    (front as u8, back as u8)
}

pub fn evaluate(table: &PrizeTable, candidate: &CandidateCombination, draw: &DrawRecord) -> Option<u64> {
    let (front, back) = hits(candidate, draw);
    table.prize_for(front, back)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Winner {
    pub combination: CandidateCombination,
    pub front_hits: u8,
    pub back_hits: u8,
    pub amount: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchScore {
    pub examined: usize,
    pub winners: Vec<Winner>,
    pub total: u64,
}

pub fn score_batch(table: &PrizeTable, candidates: &[CandidateCombination], draw: &DrawRecord) -> BatchScore {
    let mut score = BatchScore {
        examined: candidates.len(),
        ..BatchScore::default()
    };
    for combination in candidates {
        let (front_hits, back_hits) = hits(combination, draw);
        if let Some(amount) = table.prize_for(front_hits, back_hits) {
            score.total += amount;
            score.winners.push(Winner {
                combination: *combination,
                front_hits,
                back_hits,
                amount,
            });
        }
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::make_record;

    #[test]
    fn test_hits_ignore_order() {
        let draw = make_record([33, 1, 22, 12, 26], [7, 3]);
        let combo = CandidateCombination::new([1, 12, 22, 26, 33], [3, 7]);
        assert_eq!(hits(&combo, &draw), (5, 2));
    }

    #[test]
    fn test_evaluate() {
        let table = PrizeTable::default();
        let draw = make_record([1, 12, 22, 26, 33], [3, 7]);
        let jackpot = CandidateCombination::new([1, 12, 22, 26, 33], [3, 7]);
        let nothing = CandidateCombination::new([2, 13, 23, 27, 34], [4, 8]);
        let small = CandidateCombination::new([2, 13, 23, 27, 34], [3, 7]);
        assert_eq!(evaluate(&table, &jackpot, &draw), Some(10_000_000));
        assert_eq!(evaluate(&table, &nothing, &draw), None);
        assert_eq!(evaluate(&table, &small, &draw), Some(5));
    }

    #[test]
    fn test_score_batch() {
        let table = PrizeTable::default();
        let draw = make_record([1, 12, 22, 26, 33], [3, 7]);
        let batch = vec![
            CandidateCombination::new([1, 12, 22, 4, 5], [3, 9]),
            CandidateCombination::new([2, 13, 23, 27, 34], [4, 8]),
            CandidateCombination::new([1, 12, 22, 26, 5], [3, 7]),
        ];
        let score = score_batch(&table, &batch, &draw);
        assert_eq!(score.examined, 3);
        assert_eq!(score.winners.len(), 2);
        assert_eq!(score.winners[0].amount, 15);
        assert_eq!(score.winners[1].amount, 3_000);
        assert_eq!(score.total, 3_015);
    }
}
