use std::collections::HashMap;
use std::hash::Hash;

use superlotto_db::config::ZoneLayout;
use superlotto_db::error::Result;
use superlotto_db::models::{DrawRecord, Zone};

use crate::features::{front_sum, odd_even_ratio, span, zone_ratio, OddEvenRatio, ZoneRatio};

/// Table de fréquences classée par nombre d'occurrences décroissant.
///
/// À égalité, la valeur apparue la première dans l'historique passe devant.
/// L'ordre ne dépend pas de la stabilité du tri : l'index de première
/// apparition fait partie de la clé.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable<V> {
    entries: Vec<(V, u32)>,
}

impl<V: Eq + Hash + Clone> FrequencyTable<V> {
    pub fn from_values<I: IntoIterator<Item = V>>(values: I) -> Self {
        let mut index: HashMap<V, usize> = HashMap::new();
        let mut first_seen: Vec<(V, u32)> = Vec::new();

        for value in values {
            match index.get(&value) {
                Some(&i) => first_seen[i].1 += 1,
                None => {
                    index.insert(value.clone(), first_seen.len());
                    first_seen.push((value, 1));
                }
            }
        }

        let mut ranked: Vec<(usize, (V, u32))> = first_seen.into_iter().enumerate().collect();
        ranked.sort_unstable_by(|(ia, (_, ca)), (ib, (_, cb))| cb.cmp(ca).then(ia.cmp(ib)));

        Self {
            entries: ranked.into_iter().map(|(_, entry)| entry).collect(),
        }
    }
}

impl<V: Clone> FrequencyTable<V> {
    pub fn entries(&self) -> &[(V, u32)] {
        &self.entries
    }

    /// Les `k` valeurs les plus fréquentes (moins si la table est plus courte).
    pub fn top(&self, k: usize) -> Vec<V> {
        self.entries.iter().take(k).map(|(v, _)| v.clone()).collect()
    }

    pub fn total(&self) -> u32 {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Agrège les caractéristiques de tout l'historique.
pub struct FrequencyAnalyzer<'a> {
    records: &'a [DrawRecord],
    zones: ZoneLayout,
}

impl<'a> FrequencyAnalyzer<'a> {
    pub fn new(records: &'a [DrawRecord], zones: ZoneLayout) -> Self {
        Self { records, zones }
    }

    fn table<V, F>(&self, feature: F) -> FrequencyTable<V>
    where
        V: Eq + Hash + Clone,
        F: Fn(&DrawRecord) -> V,
    {
        FrequencyTable::from_values(self.records.iter().map(feature))
    }

    pub fn sum_frequency(&self) -> FrequencyTable<u16> {
        self.table(|r| front_sum(&r.front))
    }

    pub fn front_frequency(&self) -> FrequencyTable<[u8; 5]> {
        self.table(|r| r.front)
    }

    pub fn back_frequency(&self) -> FrequencyTable<[u8; 2]> {
        self.table(|r| r.back)
    }

    pub fn odd_even_frequency(&self) -> FrequencyTable<OddEvenRatio> {
        self.table(|r| odd_even_ratio(Zone::Front.numbers_from(r)))
    }

    pub fn zone_frequency(&self) -> Result<FrequencyTable<ZoneRatio>> {
        let ratios = self
            .records
            .iter()
            .map(|r| zone_ratio(&r.front, &self.zones))
            .collect::<Result<Vec<_>>>()?;
        Ok(FrequencyTable::from_values(ratios))
    }

    pub fn span_frequency(&self) -> FrequencyTable<u8> {
        self.table(|r| span(Zone::Front.numbers_from(r)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{make_record, make_test_records, scenario_history};

    #[test]
    fn test_counts_sum_to_record_count() {
        let records = make_test_records(60);
        let analyzer = FrequencyAnalyzer::new(&records, ZoneLayout::default());
        assert_eq!(analyzer.sum_frequency().total(), 60);
        assert_eq!(analyzer.front_frequency().total(), 60);
        assert_eq!(analyzer.back_frequency().total(), 60);
        assert_eq!(analyzer.odd_even_frequency().total(), 60);
        assert_eq!(analyzer.zone_frequency().unwrap().total(), 60);
        assert_eq!(analyzer.span_frequency().total(), 60);
    }

    #[test]
    fn test_sorted_by_count_descending() {
        let table = FrequencyTable::from_values(vec![1, 2, 2, 3, 3, 3]);
        assert_eq!(table.entries(), &[(3, 3), (2, 2), (1, 1)]);
        assert_eq!(table.top(2), vec![3, 2]);
        assert_eq!(table.top(10), vec![3, 2, 1]);
    }

    #[test]
    fn test_ties_ranked_by_first_occurrence() {
        let table = FrequencyTable::from_values(vec!["b", "a", "c", "a", "b", "d"]);
        assert_eq!(table.entries(), &[("b", 2), ("a", 2), ("c", 1), ("d", 1)]);

        let table = FrequencyTable::from_values(vec![9, 8, 7, 6, 5, 4, 3, 2, 1]);
        assert_eq!(table.top(9), vec![9, 8, 7, 6, 5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_scenario_odd_even_tie_break() {
        let records = scenario_history();
        let analyzer = FrequencyAnalyzer::new(&records, ZoneLayout::default());
        let table = analyzer.odd_even_frequency();
        assert_eq!(
            table.entries(),
            &[(OddEvenRatio::new(2, 3), 1), (OddEvenRatio::new(3, 2), 1)]
        );
        assert_eq!(table.top(1), vec![OddEvenRatio::new(2, 3)]);
    }

    #[test]
    fn test_back_and_span_frequency() {
        let records = vec![
            make_record([1, 2, 3, 4, 5], [1, 2]),
            make_record([10, 11, 12, 13, 14], [3, 4]),
            make_record([20, 21, 22, 23, 24], [3, 4]),
        ];
        let analyzer = FrequencyAnalyzer::new(&records, ZoneLayout::default());
        assert_eq!(analyzer.back_frequency().top(1), vec![[3, 4]]);
        assert_eq!(analyzer.span_frequency().entries(), &[(4, 3)]);
        assert_eq!(analyzer.sum_frequency().top(3), vec![15, 60, 110]);
    }

    #[test]
    fn test_empty_history_gives_empty_tables() {
        let analyzer = FrequencyAnalyzer::new(&[], ZoneLayout::default());
        assert!(analyzer.odd_even_frequency().is_empty());
        assert!(analyzer.odd_even_frequency().top(1).is_empty());
        assert_eq!(analyzer.span_frequency().total(), 0);
    }
}
