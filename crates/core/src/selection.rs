//! Toggle-membership helpers for checkbox groups, removable tags, bulk
//! select/deselect and "mark one as default" flags.
//!
//! Two shapes are covered:
//!
//! - [`ToggleSet`]: a set of selected keys kept beside the records.
//! - [`Selectable`] / [`Exclusive`]: records that carry their own flags.
//!
//! Multi-select toggling and exclusive flags are deliberately separate
//! traits: a record can be both selected and the default, and the two never
//! influence each other.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// ToggleSet
// ---------------------------------------------------------------------------

/// An ordered set of selected items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleSet<T: Ord> {
    items: BTreeSet<T>,
}

impl<T: Ord> Default for ToggleSet<T> {
    fn default() -> Self {
        Self {
            items: BTreeSet::new(),
        }
    }
}

impl<T: Ord + Clone> ToggleSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `item` if absent, remove it if present.
    ///
    /// Returns `true` when `item` is a member after the call.
    pub fn toggle(&mut self, item: T) -> bool {
        if self.items.remove(&item) {
            false
        } else {
            self.items.insert(item);
            true
        }
    }

    /// Value-returning form of [`toggle`](Self::toggle).
    pub fn toggled(&self, item: T) -> Self {
        let mut next = self.clone();
        next.toggle(item);
        next
    }

    /// Remove `item` (e.g. the "x" on a tag badge). Returns whether it was
    /// present.
    pub fn remove(&mut self, item: &T) -> bool {
        self.items.remove(item)
    }

    pub fn contains(&self, item: &T) -> bool {
        self.items.contains(item)
    }

    /// Replace the selection with every item in `all`.
    pub fn select_all<I: IntoIterator<Item = T>>(&mut self, all: I) {
        self.items = all.into_iter().collect();
    }

    pub fn select_none(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

impl<T: Ord> FromIterator<T> for ToggleSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Flagged records
// ---------------------------------------------------------------------------

/// A record carrying its own multi-select checkbox flag.
pub trait Selectable {
    fn key(&self) -> &str;
    fn is_selected(&self) -> bool;
    fn set_selected(&mut self, selected: bool);
}

/// A record carrying a single-choice flag such as "default" or "favorite".
pub trait Exclusive {
    fn key(&self) -> &str;
    fn is_flagged(&self) -> bool;
    fn set_flagged(&mut self, flagged: bool);
}

/// Flip the selected flag of the record with `key`.
///
/// Returns the new flag, or `None` when no record has that key.
pub fn toggle_selected<T: Selectable>(items: &mut [T], key: &str) -> Option<bool> {
    let item = items.iter_mut().find(|i| i.key() == key)?;
    let next = !item.is_selected();
    item.set_selected(next);
    Some(next)
}

pub fn select_all_items<T: Selectable>(items: &mut [T]) {
    items.iter_mut().for_each(|i| i.set_selected(true));
}

pub fn select_no_items<T: Selectable>(items: &mut [T]) {
    items.iter_mut().for_each(|i| i.set_selected(false));
}

/// Keys of the selected records, in list order.
pub fn selected_keys<T: Selectable>(items: &[T]) -> Vec<&str> {
    items
        .iter()
        .filter(|i| i.is_selected())
        .map(|i| i.key())
        .collect()
}

/// `true` when every record is selected (and there is at least one).
pub fn all_selected<T: Selectable>(items: &[T]) -> bool {
    !items.is_empty() && items.iter().all(|i| i.is_selected())
}

/// Flag exactly the record with `key` and clear the flag on every other one.
///
/// An unknown key is an error and leaves `items` untouched.
pub fn set_exclusive<T: Exclusive>(items: &mut [T], key: &str) -> Result<(), CoreError> {
    if !items.iter().any(|i| i.key() == key) {
        return Err(CoreError::KeyNotFound {
            entity: "item",
            key: key.to_string(),
        });
    }
    for item in items.iter_mut() {
        let flag = item.key() == key;
        item.set_flagged(flag);
    }
    Ok(())
}

/// The currently flagged record, if any.
pub fn flagged<T: Exclusive>(items: &[T]) -> Option<&T> {
    items.iter().find(|i| i.is_flagged())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
