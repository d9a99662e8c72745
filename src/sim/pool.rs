//! Fixed-capacity object pool
//!
//! Slots are allocated once at construction and reused in place. Allocation
//! is a linear scan for the first slot that does not exist; the caller then
//! reinitializes it with the slot's own `create_self`. Retiring is just
//! clearing the slot's exist flag.

use serde::{Deserialize, Serialize};

/// A pooled object that knows whether it is in use
pub trait Poolable {
    fn exists(&self) -> bool;
}

/// What `claim` does when every slot is in use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Exhausted {
    /// Hand out slot 0 anyway, clobbering whatever lives there
    #[default]
    ReuseFirst,
    /// Refuse the allocation; the spawn is skipped
    Drop,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pool<T> {
    slots: Vec<T>,
    #[serde(default)]
    policy: Exhausted,
}

impl<T: Poolable> Pool<T> {
    /// Create a pool of `capacity` slots, each built by `make(index)`
    pub fn new(capacity: usize, make: impl FnMut(usize) -> T) -> Self {
        Self {
            slots: (0..capacity).map(make).collect(),
            policy: Exhausted::default(),
        }
    }

    pub fn with_policy(mut self, policy: Exhausted) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> Exhausted {
        self.policy
    }

    pub fn set_policy(&mut self, policy: Exhausted) {
        self.policy = policy;
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Index of the first free slot, if any
    pub fn first_free(&self) -> Option<usize> {
        self.slots.iter().position(|s| !s.exists())
    }

    /// Claim a slot index for a new object, applying the exhaustion policy
    pub fn claim(&mut self) -> Option<usize> {
        if let Some(i) = self.first_free() {
            return Some(i);
        }
        match self.policy {
            Exhausted::ReuseFirst => {
                log::warn!("Pool of {} exhausted, reusing slot 0", self.slots.len());
                if self.slots.is_empty() { None } else { Some(0) }
            }
            Exhausted::Drop => {
                log::warn!("Pool of {} exhausted, dropping spawn", self.slots.len());
                None
            }
        }
    }

    /// Number of slots currently in use
    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.exists()).count()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slots.get_mut(index)
    }

    /// All slots, in use or not, in index order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.slots.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.slots.iter_mut()
    }

    /// Slots currently in use
    pub fn active(&self) -> impl Iterator<Item = &T> {
        self.slots.iter().filter(|s| s.exists())
    }
}
