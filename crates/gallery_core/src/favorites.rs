use crate::Item;

/// Favorited items keyed by identifier, kept in insertion order.
///
/// The set is small and local, so membership is a linear scan.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FavoriteSet {
    entries: Vec<Item>,
}

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from stored records. Later records repeating an
    /// identifier are dropped.
    pub fn from_items(items: Vec<Item>) -> Self {
        let mut set = Self::new();
        for item in items {
            set.insert(item);
        }
        set
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.entries
            .iter()
            .any(|item| item.identifier() == identifier)
    }

    /// Returns false when the identifier is already present.
    pub fn insert(&mut self, item: Item) -> bool {
        if self.contains(item.identifier()) {
            return false;
        }
        self.entries.push(item);
        true
    }

    pub fn remove(&mut self, identifier: &str) -> Option<Item> {
        let index = self
            .entries
            .iter()
            .position(|item| item.identifier() == identifier)?;
        Some(self.entries.remove(index))
    }

    pub fn items(&self) -> &[Item] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
