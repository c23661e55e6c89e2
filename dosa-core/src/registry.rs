//! Fixed-capacity arena of region slots.
//!
//! Slot indices are handed to renderers as color/identity keys, so a region keeps its slot for as
//! long as it lives, and a new region always takes the lowest free slot.

use derive_more::Deref;
use log::debug;
use serde::Serialize;
use tsify::Tsify;

use crate::rect::Rect;

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Tsify, Deref)]
pub struct Region {
    pub slot: usize,
    #[deref]
    pub rect: Rect,
}

/// Slot lifecycle notifications, for graph views that mirror regions as nodes.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Tsify)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SlotEvent {
    Allocated { slot: usize, rect: Rect },
    Freed { slot: usize },
}

#[derive(Debug, Clone)]
pub struct Registry {
    slots: Vec<Option<Region>>,
    events: Vec<SlotEvent>,
}

impl Registry {
    pub fn new(capacity: usize) -> Self {
        Registry { slots: vec![None; capacity], events: Vec::new() }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|s| s.is_none())
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(|s| s.is_some())
    }

    /// Place `rect` in the lowest free slot; `None` when every slot is taken, in which case
    /// nothing changes.
    pub fn allocate(&mut self, rect: Rect) -> Option<usize> {
        let slot = self.slots.iter().position(|s| s.is_none())?;
        self.slots[slot] = Some(Region { slot, rect });
        self.events.push(SlotEvent::Allocated { slot, rect });
        debug!("allocated region slot {}: {}", slot, rect);
        Some(slot)
    }

    /// Empty `slot`. Freeing an empty or out-of-range slot is a no-op; returns whether a region was
    /// removed.
    pub fn free(&mut self, slot: usize) -> bool {
        match self.slots.get_mut(slot).and_then(Option::take) {
            Some(region) => {
                self.events.push(SlotEvent::Freed { slot });
                debug!("freed region slot {}: {}", slot, region.rect);
                true
            }
            None => false,
        }
    }

    /// Free every occupied slot, lowest first.
    pub fn clear(&mut self) -> usize {
        (0..self.capacity()).filter(|&slot| self.free(slot)).count()
    }

    pub fn rectangle_of(&self, slot: usize) -> Option<&Region> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    pub fn is_active(&self, slot: usize) -> bool {
        self.rectangle_of(slot).is_some()
    }

    /// Active regions in ascending slot order.
    pub fn active(&self) -> impl Iterator<Item = &Region> + '_ {
        self.slots.iter().flatten()
    }

    pub fn drain_events(&mut self) -> Vec<SlotEvent> {
        std::mem::take(&mut self.events)
    }
}
