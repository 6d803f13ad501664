pub mod compute;

use std::fmt;
use std::str::FromStr;

use superlotto_db::config::ZoneLayout;
use superlotto_db::error::{LottoError, Result};

pub use compute::{front_sum, neighbor_set, odd_even_ratio, span, zone_counts, zone_ratio};

/// Répartition impairs / pairs d'une grille.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OddEvenRatio {
    pub odd: u8,
    pub even: u8,
}

impl OddEvenRatio {
    pub fn new(odd: u8, even: u8) -> Self {
        Self { odd, even }
    }
}

impl fmt::Display for OddEvenRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.odd, self.even)
    }
}

impl FromStr for OddEvenRatio {
    type Err = LottoError;

    fn from_str(s: &str) -> Result<Self> {
        let parts = parse_ratio_parts(s)?;
        match parts.as_slice() {
            [odd, even] => Ok(Self::new(*odd, *even)),
            _ => Err(LottoError::Config(format!("ratio impair:pair invalide '{}'", s))),
        }
    }
}

/// Ratio des trois zones, réduit par le PGCD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ZoneRatio(pub [u8; 3]);

impl ZoneRatio {
    /// Réduit des comptes bruts. Trois zéros n'ont pas de ratio.
    pub fn from_counts(counts: [u8; 3]) -> Result<Self> {
        let divisor = compute::gcd(counts[0], compute::gcd(counts[1], counts[2]));
        if divisor == 0 {
            return Err(LottoError::DegenerateFeature(
                "aucun numéro dans les zones, ratio indéfini".to_string(),
            ));
        }
        Ok(ZoneRatio(counts.map(|c| c / divisor)))
    }
}

impl fmt::Display for ZoneRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.0[0], self.0[1], self.0[2])
    }
}

impl FromStr for ZoneRatio {
    type Err = LottoError;

    fn from_str(s: &str) -> Result<Self> {
        let parts = parse_ratio_parts(s)?;
        match parts.as_slice() {
            [a, b, c] => Ok(ZoneRatio([*a, *b, *c])),
            _ => Err(LottoError::Config(format!("ratio de zones invalide '{}'", s))),
        }
    }
}

fn parse_ratio_parts(s: &str) -> Result<Vec<u8>> {
    s.split(':')
        .map(|p| p.trim().parse::<u8>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| LottoError::Config(format!("ratio invalide '{}' : {}", s, e)))
}

/// Caractéristiques dérivées d'une grille avant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureVector {
    pub odd_even: OddEvenRatio,
    pub zone: ZoneRatio,
    pub span: u8,
    pub sum: u16,
}

impl FeatureVector {
    pub fn of(front: &[u8], zones: &ZoneLayout) -> Result<Self> {
        Ok(Self {
            odd_even: odd_even_ratio(front),
            zone: zone_ratio(front, zones)?,
            span: span(front),
            sum: front_sum(front),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ratios() {
        assert_eq!("3:2".parse::<OddEvenRatio>().unwrap(), OddEvenRatio::new(3, 2));
        assert_eq!(" 2:2:1 ".trim().parse::<ZoneRatio>().unwrap(), ZoneRatio([2, 2, 1]));
        assert!("3".parse::<OddEvenRatio>().is_err());
        assert!("3:2".parse::<ZoneRatio>().is_err());
        assert!("a:b".parse::<OddEvenRatio>().is_err());
    }

    #[test]
    fn test_display_ratios() {
        assert_eq!(OddEvenRatio::new(2, 3).to_string(), "2:3");
        assert_eq!(ZoneRatio([1, 2, 2]).to_string(), "1:2:2");
    }

    #[test]
    fn test_feature_vector() {
        let fv = FeatureVector::of(&[1, 12, 22, 26, 33], &ZoneLayout::default()).unwrap();
        assert_eq!(fv.odd_even, OddEvenRatio::new(2, 3));
        assert_eq!(fv.zone, ZoneRatio([2, 1, 2]));
        assert_eq!(fv.span, 32);
        assert_eq!(fv.sum, 94);
    }

    #[test]
    fn test_zone_ratio_degenerate() {
        let err = ZoneRatio::from_counts([0, 0, 0]).unwrap_err();
        assert!(matches!(err, LottoError::DegenerateFeature(_)));
    }
}
