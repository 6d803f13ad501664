use std::fmt;

/// Ensemble de numéros 0..=63 sur un mot de 64 bits.
///
/// Les grilles avant (1-35) et leurs voisins (0-36) y tiennent entièrement,
/// ce qui rend appartenance et intersection constantes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NumberSet(u64);

impl NumberSet {
    pub const CAPACITY: u8 = 64;

    pub fn new() -> Self {
        Self(0)
    }

    pub fn from_numbers(numbers: &[u8]) -> Self {
        numbers.iter().copied().collect()
    }

    /// Les numéros hors capacité sont ignorés.
    pub fn insert(&mut self, n: u8) {
        if n < Self::CAPACITY {
            self.0 |= 1u64 << n;
        }
    }

    pub fn contains(&self, n: u8) -> bool {
        n < Self::CAPACITY && self.0 & (1u64 << n) != 0
    }

    pub fn len(&self) -> u32 {
        self.0.count_ones()
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn intersection(&self, other: &NumberSet) -> NumberSet {
        NumberSet(self.0 & other.0)
    }

    pub fn intersection_len(&self, other: &NumberSet) -> u32 {
        (self.0 & other.0).count_ones()
    }

    pub fn is_superset(&self, other: &NumberSet) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0..Self::CAPACITY).filter(move |&n| self.contains(n))
    }
}

impl FromIterator<u8> for NumberSet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut set = NumberSet::new();
        for n in iter {
            set.insert(n);
        }
        set
    }
}

impl fmt::Display for NumberSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nums = self.iter().map(|n| n.to_string()).collect::<Vec<_>>();
        write!(f, "{{{}}}", nums.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_contains() {
        let set = NumberSet::from_numbers(&[0, 1, 26, 35, 36]);
        assert!(set.contains(0));
        assert!(set.contains(36));
        assert!(!set.contains(2));
        assert_eq!(set.len(), 5);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![0, 1, 26, 35, 36]);
    }

    #[test]
    fn test_out_of_capacity_ignored() {
        let mut set = NumberSet::new();
        set.insert(64);
        set.insert(200);
        assert!(set.is_empty());
        assert!(!set.contains(64));
    }

    #[test]
    fn test_intersection() {
        let a = NumberSet::from_numbers(&[1, 12, 22, 26, 33]);
        let b = NumberSet::from_numbers(&[2, 12, 23, 26, 34]);
        assert_eq!(a.intersection_len(&b), 2);
        assert_eq!(a.intersection(&b), NumberSet::from_numbers(&[12, 26]));
        assert!(a.is_superset(&NumberSet::from_numbers(&[26])));
        assert!(!a.is_superset(&NumberSet::from_numbers(&[26, 35])));
        assert!(a.is_superset(&NumberSet::new()));
    }

    #[test]
    fn test_display() {
        assert_eq!(NumberSet::from_numbers(&[3, 1]).to_string(), "{1, 3}");
    }
}
