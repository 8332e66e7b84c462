//! Disjoint sets of component labels
//!
//! Labels live in an arena; every set keeps its members in insertion order
//! so the representative of a merged set is always the first member of
//! the set that absorbed the other.

use std::collections::HashMap;

use crate::io::error::{MissingSide, PuzzleError, Result};
use crate::spatial::cell::Label;

/// Identifies one set; goes stale once that set is absorbed by a `union`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SetHandle(usize);

/// Union-find over arbitrary labels with order-preserving merges
#[derive(Debug, Clone, Default)]
pub struct DisjointSet {
    labels: Vec<Label>,
    slots: HashMap<Label, usize>,
    parent: Vec<usize>,
    /// Ordered member slots per root; empty for absorbed slots
    members: Vec<Vec<usize>>,
}

impl DisjointSet {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a singleton set holding `label`
    ///
    /// Registering a label that is already present is a no-op and returns
    /// the handle of the set that currently holds it.
    pub fn make_set(&mut self, label: Label) -> SetHandle {
        if let Some(handle) = self.find_set(label) {
            return handle;
        }

        let slot = self.labels.len();
        self.labels.push(label);
        self.slots.insert(label, slot);
        self.parent.push(slot);
        self.members.push(vec![slot]);

        SetHandle(slot)
    }

    /// Set holding `label`, or `None` if the label was never registered
    pub fn find_set(&mut self, label: Label) -> Option<SetHandle> {
        let mut slot = *self.slots.get(&label)?;

        // Path halving; roots never change so representatives are unaffected
        loop {
            let parent = *self.parent.get(slot)?;
            if parent == slot {
                return Some(SetHandle(slot));
            }
            let grandparent = *self.parent.get(parent)?;
            if let Some(entry) = self.parent.get_mut(slot) {
                *entry = grandparent;
            }
            slot = grandparent;
        }
    }

    /// Merge the set holding `a` into the set holding `b`
    ///
    /// Members of `a`'s set are appended after those of `b`'s set, so the
    /// merged representative is `b`'s. Already sharing a set is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `MissingElement` naming the side whose label is in no set
    pub fn union(&mut self, a: Label, b: Label) -> Result<SetHandle> {
        let absorbed = self.find_set(a).ok_or(PuzzleError::MissingElement {
            side: MissingSide::First,
            label: a,
        })?;
        let absorbing = self.find_set(b).ok_or(PuzzleError::MissingElement {
            side: MissingSide::Second,
            label: b,
        })?;

        if absorbed == absorbing {
            return Ok(absorbing);
        }

        if let Some(parent) = self.parent.get_mut(absorbed.0) {
            *parent = absorbing.0;
        }
        let moved = self
            .members
            .get_mut(absorbed.0)
            .map(std::mem::take)
            .unwrap_or_default();
        if let Some(members) = self.members.get_mut(absorbing.0) {
            members.extend(moved);
        }

        Ok(absorbing)
    }

    /// First member of a set, used as the canonical label of everything in it
    pub fn representative(&self, handle: SetHandle) -> Option<Label> {
        self.members
            .get(handle.0)
            .and_then(|members| members.first())
            .and_then(|&slot| self.labels.get(slot).copied())
    }

    /// Members of a set in order; empty for a stale handle
    pub fn members(&self, handle: SetHandle) -> Vec<Label> {
        self.members
            .get(handle.0)
            .map(|members| {
                members
                    .iter()
                    .filter_map(|&slot| self.labels.get(slot).copied())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of disjoint sets
    pub fn set_count(&self) -> usize {
        self.members.iter().filter(|members| !members.is_empty()).count()
    }

    /// Number of registered labels
    pub const fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether no label has been registered
    pub const fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
