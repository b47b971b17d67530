//! Index-based visited set.

/// A set of city indices packed into `u64` words.
///
/// Instances of up to 64 cities fit in a single word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitedSet {
    words: Vec<u64>,
    len: usize,
}

impl VisitedSet {
    /// An empty set able to hold indices `0..capacity`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            words: vec![0; capacity.div_ceil(64).max(1)],
            len: 0,
        }
    }

    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        self.words[index / 64] & (1u64 << (index % 64)) != 0
    }

    /// Adds `index`. Returns `false` if it was already present.
    #[inline]
    pub fn insert(&mut self, index: usize) -> bool {
        let bit = 1u64 << (index % 64);
        let word = &mut self.words[index / 64];
        if *word & bit != 0 {
            return false;
        }
        *word |= bit;
        self.len += 1;
        true
    }

    /// Removes `index`. Returns `false` if it was absent.
    #[inline]
    pub fn remove(&mut self, index: usize) -> bool {
        let bit = 1u64 << (index % 64);
        let word = &mut self.words[index / 64];
        if *word & bit == 0 {
            return false;
        }
        *word &= !bit;
        self.len -= 1;
        true
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_remove_roundtrip_restores_state() {
        let mut set = VisitedSet::with_capacity(10);
        set.insert(0);
        let before = set.clone();

        assert!(set.insert(7));
        assert!(set.contains(7));
        assert!(!set.insert(7));
        assert!(set.remove(7));
        assert!(!set.remove(7));

        assert_eq!(set, before);
    }

    #[test]
    fn test_multi_word() {
        let mut set = VisitedSet::with_capacity(130);
        set.insert(3);
        set.insert(64);
        set.insert(129);
        assert_eq!(set.len(), 3);
        assert!(set.contains(64));
        assert!(!set.contains(63));
        assert!(!set.contains(128));
    }
}
