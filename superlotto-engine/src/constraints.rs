use std::fmt;

use superlotto_db::error::Result;

use crate::features::{OddEvenRatio, ZoneRatio};
use crate::frequency::FrequencyAnalyzer;

/// Valeurs imposées explicitement ; `None` = choisir d'après l'historique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstraintOverrides {
    pub backs: Option<Vec<[u8; 2]>>,
    pub odd_even: Option<Vec<OddEvenRatio>>,
    pub zones: Option<Vec<ZoneRatio>>,
    pub spans: Option<Vec<u8>>,
}

/// Valeurs autorisées pour chaque dimension filtrée.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintSet {
    pub backs: Vec<[u8; 2]>,
    pub odd_even_ratios: Vec<OddEvenRatio>,
    pub zone_ratios: Vec<ZoneRatio>,
    pub spans: Vec<u8>,
}

fn join<T: fmt::Display>(values: &[T]) -> String {
    values.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(", ")
}

impl fmt::Display for ConstraintSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let backs = self
            .backs
            .iter()
            .map(|b| format!("{}-{}", b[0], b[1]))
            .collect::<Vec<_>>();
        write!(
            f,
            "arrière: [{}], impair:pair: [{}], zones: [{}], écart: [{}]",
            backs.join(", "),
            join(&self.odd_even_ratios),
            join(&self.zone_ratios),
            join(&self.spans),
        )
    }
}

/// Retient les `top_k` valeurs les plus fréquentes de chaque dimension non imposée.
pub fn select_constraints(
    analyzer: &FrequencyAnalyzer<'_>,
    overrides: &ConstraintOverrides,
    top_k: usize,
) -> Result<ConstraintSet> {
    let backs = match &overrides.backs {
        Some(backs) => backs.clone(),
        None => analyzer.back_frequency().top(top_k),
    };
    let odd_even_ratios = match &overrides.odd_even {
        Some(ratios) => ratios.clone(),
        None => analyzer.odd_even_frequency().top(top_k),
    };
    let zone_ratios = match &overrides.zones {
        Some(ratios) => ratios.clone(),
        None => analyzer.zone_frequency()?.top(top_k),
    };
    let spans = match &overrides.spans {
        Some(spans) => spans.clone(),
        None => analyzer.span_frequency().top(top_k),
    };

    Ok(ConstraintSet {
        backs,
        odd_even_ratios,
        zone_ratios,
        spans,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{make_record, scenario_history};
    use superlotto_db::config::ZoneLayout;

    #[test]
    fn test_default_top_one() {
        let records = scenario_history();
        let analyzer = FrequencyAnalyzer::new(&records, ZoneLayout::default());
        let set = select_constraints(&analyzer, &ConstraintOverrides::default(), 1).unwrap();
        assert_eq!(set.backs, vec![[3, 7]]);
        assert_eq!(set.odd_even_ratios, vec![OddEvenRatio::new(2, 3)]);
        assert_eq!(set.zone_ratios, vec![ZoneRatio([2, 1, 2])]);
        assert_eq!(set.spans, vec![32]);
    }

    #[test]
    fn test_top_k() {
        let records = vec![
            make_record([1, 2, 3, 4, 5], [1, 2]),
            make_record([10, 11, 12, 13, 14], [3, 4]),
            make_record([20, 21, 22, 23, 24], [3, 4]),
            make_record([6, 8, 10, 12, 33], [5, 6]),
        ];
        let analyzer = FrequencyAnalyzer::new(&records, ZoneLayout::default());
        let set = select_constraints(&analyzer, &ConstraintOverrides::default(), 2).unwrap();
        assert_eq!(set.backs, vec![[3, 4], [1, 2]]);
        assert_eq!(set.spans, vec![4, 27]);
    }

    #[test]
    fn test_overrides_win() {
        let records = scenario_history();
        let analyzer = FrequencyAnalyzer::new(&records, ZoneLayout::default());
        let overrides = ConstraintOverrides {
            backs: Some(vec![[1, 12]]),
            odd_even: Some(vec![OddEvenRatio::new(3, 2), OddEvenRatio::new(2, 3)]),
            zones: None,
            spans: Some(vec![20, 21]),
        };
        let set = select_constraints(&analyzer, &overrides, 1).unwrap();
        assert_eq!(set.backs, vec![[1, 12]]);
        assert_eq!(set.odd_even_ratios.len(), 2);
        assert_eq!(set.zone_ratios, vec![ZoneRatio([2, 1, 2])]);
        assert_eq!(set.spans, vec![20, 21]);
    }

    #[test]
    fn test_display() {
        let set = ConstraintSet {
            backs: vec![[3, 7]],
            odd_even_ratios: vec![OddEvenRatio::new(2, 3)],
            zone_ratios: vec![ZoneRatio([2, 1, 2])],
            spans: vec![32],
        };
        assert_eq!(
            set.to_string(),
            "arrière: [3-7], impair:pair: [2:3], zones: [2:1:2], écart: [32]"
        );
    }
}
