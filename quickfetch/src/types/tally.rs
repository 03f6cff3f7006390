//! Installed package counts per package manager

use super::NO_COUNT;

/// Ordered manager name -> installed package count.
///
/// Only positive counts are ever stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageTally {
    entries: Vec<(String, u64)>,
}

impl PackageTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `count` for `manager`. [`NO_COUNT`] is dropped and a repeated
    /// manager keeps its original position with the new count.
    pub fn insert(&mut self, manager: impl Into<String>, count: u64) {
        if count == NO_COUNT {
            return;
        }
        let manager = manager.into();
        match self.entries.iter_mut().find(|(name, _)| *name == manager) {
            Some(entry) => entry.1 = count,
            None => self.entries.push((manager, count)),
        }
    }

    pub fn get(&self, manager: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|(name, _)| name == manager)
            .map(|(_, count)| *count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(name, count)| (name.as_str(), *count))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
