use crate::Item;

/// Items loaded so far, in arrival order. Duplicates are kept.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Feed {
    items: Vec<Item>,
}

impl Feed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, batch: Vec<Item>) {
        self.items.extend(batch);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// First item with the given identifier, if loaded.
    pub fn find(&self, identifier: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.identifier() == identifier)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
