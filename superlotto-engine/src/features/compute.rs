use superlotto_db::config::ZoneLayout;
use superlotto_db::error::Result;

use super::{OddEvenRatio, ZoneRatio};
use crate::bitset::NumberSet;

pub(crate) fn gcd(a: u8, b: u8) -> u8 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

pub fn odd_even_ratio(numbers: &[u8]) -> OddEvenRatio {
    let odd = numbers.iter().filter(|&&n| n % 2 == 1).count() as u8;
    OddEvenRatio::new(odd, numbers.len() as u8 - odd)
}

/// Comptes bruts par zone ; les numéros hors des trois zones ne comptent pas.
pub fn zone_counts(numbers: &[u8], zones: &ZoneLayout) -> [u8; 3] {
    let mut counts = [0u8; 3];
    for &n in numbers {
        if let Some(z) = zones.zone_of(n) {
            counts[z] += 1;
        }
    }
    counts
}

pub fn zone_ratio(numbers: &[u8], zones: &ZoneLayout) -> Result<ZoneRatio> {
    ZoneRatio::from_counts(zone_counts(numbers, zones))
}

pub fn span(numbers: &[u8]) -> u8 {
    match (numbers.iter().max(), numbers.iter().min()) {
        (Some(max), Some(min)) => max - min,
        _ => 0,
    }
}

pub fn front_sum(numbers: &[u8]) -> u16 {
    numbers.iter().map(|&n| n as u16).sum()
}

/// Numéros voisins (±1) d'une grille, sans bornage : 0 et 36 peuvent y
/// figurer mais ne correspondent à aucun numéro avant valide.
pub fn neighbor_set(previous_front: &[u8]) -> NumberSet {
    let mut set = NumberSet::new();
    for &n in previous_front {
        if let Some(below) = n.checked_sub(1) {
            set.insert(below);
        }
        set.insert(n.saturating_add(1));
    }
    set
}
