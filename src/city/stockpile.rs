//! Inventory - item counts carried by units or held by tiles

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::Item;

/// Item counts; absent items count as zero
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    items: AHashMap<Item, u32>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get current amount of an item
    pub fn get(&self, item: Item) -> u32 {
        self.items.get(&item).copied().unwrap_or(0)
    }

    /// Add without limit
    pub fn add(&mut self, item: Item, amount: u32) {
        if amount > 0 {
            *self.items.entry(item).or_insert(0) += amount;
        }
    }

    /// Add as much as fits under `limit`, returns amount actually added
    pub fn add_up_to(&mut self, item: Item, amount: u32, limit: u32) -> u32 {
        let space = limit.saturating_sub(self.get(item));
        let added = amount.min(space);
        self.add(item, added);
        added
    }

    /// Try to remove items, returns amount actually removed
    pub fn remove(&mut self, item: Item, amount: u32) -> u32 {
        match self.items.get_mut(&item) {
            Some(count) => {
                let removed = amount.min(*count);
                *count -= removed;
                if *count == 0 {
                    self.items.remove(&item);
                }
                removed
            }
            None => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.values().all(|&count| count == 0)
    }

    pub fn total(&self) -> u32 {
        self.items.values().sum()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Non-zero entries in `Item::ALL` order
    pub fn iter(&self) -> impl Iterator<Item = (Item, u32)> + '_ {
        Item::ALL
            .into_iter()
            .map(|item| (item, self.get(item)))
            .filter(|(_, count)| *count > 0)
    }
}
