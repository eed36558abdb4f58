//! Per-character bucket of the fingerprint index

/// Entry ids indexed under one fingerprint character
///
/// Ids are kept sorted; inserting an id twice is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntrySet {
    ids: Vec<usize>,
}

impl EntrySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an id. Returns false if it was already present.
    pub fn insert(&mut self, id: usize) -> bool {
        // ids are handed out in increasing order, so this is almost always a push
        match self.ids.last() {
            Some(&last) if last < id => {
                self.ids.push(id);
                true
            }
            None => {
                self.ids.push(id);
                true
            }
            Some(_) => match self.ids.binary_search(&id) {
                Ok(_) => false,
                Err(pos) => {
                    self.ids.insert(pos, id);
                    true
                }
            },
        }
    }

    pub fn contains(&self, id: usize) -> bool {
        self.ids.binary_search(&id).is_ok()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[usize] {
        &self.ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_is_idempotent() {
        let mut set = EntrySet::new();
        assert!(set.insert(3));
        assert!(!set.insert(3));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_out_of_order_insert_stays_sorted() {
        let mut set = EntrySet::new();
        set.insert(5);
        set.insert(1);
        set.insert(3);
        assert!(!set.insert(1));
        assert_eq!(set.ids(), &[1, 3, 5]);
        assert!(set.contains(3));
        assert!(!set.contains(4));
    }
}
