use std::collections::HashSet;
use std::fmt;

use rayon::prelude::*;

use superlotto_db::config::{LottoConfig, ZoneLayout};
use superlotto_db::error::{LottoError, Result};
use superlotto_db::models::{CandidateCombination, DrawRecord};

use crate::bitset::NumberSet;
use crate::constraints::ConstraintSet;
use crate::features::{front_sum, neighbor_set, odd_even_ratio, span, zone_ratio, OddEvenRatio, ZoneRatio};

/// Filtres dans leur ordre d'application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    OddEven,
    Zone,
    Span,
    Historical,
    Neighbor,
    Repeat,
    Structural,
}

impl Filter {
    pub const ALL: [Filter; 7] = [
        Filter::OddEven,
        Filter::Zone,
        Filter::Span,
        Filter::Historical,
        Filter::Neighbor,
        Filter::Repeat,
        Filter::Structural,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Filter::OddEven => "impair:pair",
            Filter::Zone => "zones",
            Filter::Span => "écart",
            Filter::Historical => "déjà tiré",
            Filter::Neighbor => "voisins",
            Filter::Repeat => "répétition",
            Filter::Structural => "règles fixes",
        };
        write!(f, "{}", label)
    }
}

/// Nombre de grilles avant examinées, rejetées par filtre, retenues.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterReport {
    pub examined: usize,
    pub rejected: [usize; 7],
    pub accepted: usize,
}

impl FilterReport {
    fn merge(&mut self, other: &FilterReport) {
        self.examined += other.examined;
        self.accepted += other.accepted;
        for (total, n) in self.rejected.iter_mut().zip(other.rejected) {
            *total += n;
        }
    }

    pub fn rejected_by(&self, filter: Filter) -> usize {
        self.rejected[filter.index()]
    }
}

#[derive(Debug, Clone)]
pub struct Generation {
    pub candidates: Vec<CandidateCombination>,
    pub report: FilterReport,
}

/// Toutes les grilles avant croissantes de 5 numéros dont le plus petit est `first`.
fn combinations_from(first: u8, max: u8) -> impl Iterator<Item = [u8; 5]> {
    (first + 1..=max).flat_map(move |b| {
        (b + 1..=max).flat_map(move |c| {
            (c + 1..=max).flat_map(move |d| (d + 1..=max).map(move |e| [first, b, c, d, e]))
        })
    })
}

/// Les C(max, 5) grilles avant, en ordre lexicographique.
pub fn front_combinations(max: u8) -> impl Iterator<Item = [u8; 5]> {
    (1..=max).flat_map(move |first| combinations_from(first, max))
}

struct FilterContext<'a> {
    odd_even: &'a [OddEvenRatio],
    zone_ratios: &'a [ZoneRatio],
    spans: NumberSet,
    zones: ZoneLayout,
    history: HashSet<NumberSet>,
    previous: NumberSet,
    neighbors: NumberSet,
    required: NumberSet,
    forbidden: NumberSet,
    sum_range: std::ops::RangeInclusive<u16>,
    max_neighbor_hits: u32,
    max_repeat_hits: u32,
}

impl FilterContext<'_> {
    /// Premier filtre qui rejette la grille, ou `None` si elle passe tout.
    fn rejection(&self, front: &[u8; 5]) -> Result<Option<Filter>> {
        if !self.odd_even.contains(&odd_even_ratio(front)) {
            return Ok(Some(Filter::OddEven));
        }
        if !self.zone_ratios.contains(&zone_ratio(front, &self.zones)?) {
            return Ok(Some(Filter::Zone));
        }
        if !self.spans.contains(span(front)) {
            return Ok(Some(Filter::Span));
        }

        let set = NumberSet::from_numbers(front);
        if self.history.contains(&set) {
            return Ok(Some(Filter::Historical));
        }
        if set.intersection_len(&self.neighbors) > self.max_neighbor_hits {
            return Ok(Some(Filter::Neighbor));
        }
        if set.intersection_len(&self.previous) > self.max_repeat_hits {
            return Ok(Some(Filter::Repeat));
        }
        if !self.sum_range.contains(&front_sum(front))
            || !set.is_superset(&self.required)
            || set.intersection_len(&self.forbidden) > 0
        {
            return Ok(Some(Filter::Structural));
        }
        Ok(None)
    }

    fn scan(&self, first: u8, max: u8) -> Result<(Vec<[u8; 5]>, FilterReport)> {
        let mut fronts = Vec::new();
        let mut report = FilterReport::default();
        for front in combinations_from(first, max) {
            report.examined += 1;
            match self.rejection(&front)? {
                Some(filter) => report.rejected[filter.index()] += 1,
                None => {
                    report.accepted += 1;
                    fronts.push(front);
                }
            }
        }
        Ok((fronts, report))
    }
}

/// Énumère et filtre l'espace des grilles avant, puis associe les paires arrière.
pub struct CombinationGenerator<'a> {
    config: &'a LottoConfig,
}

impl<'a> CombinationGenerator<'a> {
    pub fn new(config: &'a LottoConfig) -> Self {
        Self { config }
    }

    /// `history` est ordonné du plus ancien au plus récent.
    ///
    /// L'énumération est répartie par plus petit numéro ; le résultat reste
    /// en ordre lexicographique des grilles avant, puis dans l'ordre des
    /// paires arrière de `constraints`.
    pub fn generate(&self, history: &[DrawRecord], constraints: &ConstraintSet) -> Result<Generation> {
        let latest = history
            .last()
            .ok_or_else(|| LottoError::data_load("<historique>", "aucun tirage précédent"))?;

        let rules = &self.config.rules;
        let ctx = FilterContext {
            odd_even: &constraints.odd_even_ratios,
            zone_ratios: &constraints.zone_ratios,
            spans: constraints.spans.iter().copied().collect(),
            zones: self.config.zones,
            history: history.iter().map(|r| NumberSet::from_numbers(&r.front)).collect(),
            previous: NumberSet::from_numbers(&latest.front),
            neighbors: neighbor_set(&latest.front),
            required: NumberSet::from_numbers(&rules.required),
            forbidden: NumberSet::from_numbers(&rules.forbidden),
            sum_range: rules.sum_min..=rules.sum_max,
            max_neighbor_hits: rules.max_neighbor_hits,
            max_repeat_hits: rules.max_repeat_hits,
        };

        let max = self.config.front_size;
        let partitions = (1..=max)
            .into_par_iter()
            .map(|first| ctx.scan(first, max))
            .collect::<Result<Vec<_>>>()?;

        let mut report = FilterReport::default();
        let mut candidates = Vec::new();
        for (fronts, partial) in &partitions {
            report.merge(partial);
            for front in fronts {
                for back in &constraints.backs {
                    candidates.push(CandidateCombination::new(*front, *back));
                }
            }
        }

        log::debug!(
            "{} grilles examinées, {} retenues, {} combinaisons",
            report.examined,
            report.accepted,
            candidates.len()
        );
        Ok(Generation { candidates, report })
    }
}
