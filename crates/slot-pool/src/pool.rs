//! Fixed-capacity generational pool.

use crate::error::{PoolError, Result};
use crate::handle::Handle;
use crate::key::{FIRST_GENERATION, MAX_INDEX, NEVER_ISSUED, SlotKey};
use tracing::{debug, warn};

/// One pool cell.
struct Slot<T> {
    /// Own index plus current generation.
    key: SlotKey,
    /// Set between allocate and release.
    in_use: bool,
    value: Option<T>,
}

/// Fixed-capacity store that hands out generation-checked handles.
///
/// The pool owns every stored value. Handles are plain copies of a packed
/// key; once a slot is released its generation moves on and all outstanding
/// handles for it go stale. Stale or foreign handles never fault: lookups
/// return `None` and releases do nothing.
///
/// Freed indices are reused in LIFO order.
pub struct SlotPool<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u16>,
    retired: usize,
}

impl<T> SlotPool<T> {
    /// Largest capacity a pool can be built with.
    pub const MAX_CAPACITY: usize = MAX_INDEX;

    /// Create a pool with `capacity` slots, all free, all at generation 1.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity > Self::MAX_CAPACITY {
            return Err(PoolError::CapacityExceeded {
                requested: capacity,
                max: Self::MAX_CAPACITY,
            });
        }

        let slots = (0..capacity)
            .map(|index| Slot {
                key: SlotKey::encode(index as u32, FIRST_GENERATION as u32),
                in_use: false,
                value: None,
            })
            .collect();
        // Highest index pushed first so index 0 is handed out first.
        let free = (0..capacity as u16).rev().collect();

        Ok(Self {
            slots,
            free,
            retired: 0,
        })
    }

    /// Total number of slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of slots currently handed out.
    #[inline]
    pub fn len(&self) -> usize {
        self.capacity() - self.free.len() - self.retired
    }

    /// Returns true if no slot is handed out.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of slots that can still be allocated.
    #[inline]
    pub fn available(&self) -> usize {
        self.free.len()
    }

    /// Slots permanently withdrawn after exhausting their generations.
    #[inline]
    pub fn retired(&self) -> usize {
        self.retired
    }

    /// True when no free slot remains.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.free.is_empty()
    }

    /// Reserve an empty slot.
    ///
    /// Returns [`PoolError::PoolExhausted`] without touching the pool when
    /// every slot is in use.
    pub fn allocate(&mut self) -> Result<Handle<T>> {
        let Some(index) = self.free.pop() else {
            return Err(PoolError::PoolExhausted {
                capacity: self.capacity(),
            });
        };
        let slot = &mut self.slots[index as usize];
        slot.in_use = true;

        let handle = Handle::new(slot.key);
        debug!(%handle, "allocated slot");
        Ok(handle)
    }

    /// Allocate a slot and store `value` in it.
    pub fn insert(&mut self, value: T) -> Result<Handle<T>> {
        let handle = self.allocate()?;
        let index = handle.index() as usize;
        self.slots[index].value = Some(value);
        Ok(handle)
    }

    /// Store `value` in the live slot behind `handle`, returning what was
    /// there before.
    pub fn set(&mut self, handle: &Handle<T>, value: T) -> Result<Option<T>> {
        let index = self.resolve(handle.key)?;
        Ok(self.slots[index].value.replace(value))
    }

    /// Release the slot behind `handle` and return its value.
    ///
    /// Stale, foreign and never-issued handles are ignored, so releasing the
    /// same handle twice is harmless.
    pub fn release(&mut self, handle: Handle<T>) -> Option<T> {
        let index = match self.resolve(handle.key) {
            Ok(index) => index,
            Err(err) => {
                debug!(%handle, %err, "ignoring release");
                return None;
            }
        };

        let slot = &mut self.slots[index];
        let value = slot.value.take();
        slot.in_use = false;
        slot.key = slot.key.increment_generation();

        if slot.key.generation() == NEVER_ISSUED {
            // Reusing the slot would let a handle from 65535 releases ago
            // validate again.
            self.retired += 1;
            warn!(index, "slot exhausted its generations and was retired");
        } else {
            self.free.push(index as u16);
            debug!(%handle, generation = slot.key.generation(), "released slot");
        }
        value
    }

    /// Shared access to the value behind `handle`.
    ///
    /// Returns `None` for an empty slot, and logs a warning when the handle is
    /// stale or out of range.
    pub fn get(&self, handle: &Handle<T>) -> Option<&T> {
        match self.resolve(handle.key) {
            Ok(index) => self.slots[index].value.as_ref(),
            Err(err) => {
                warn!(%handle, %err, "lookup through an expired handle");
                None
            }
        }
    }

    /// Mutable access to the value behind `handle`. Same rules as [`get`](Self::get).
    pub fn get_mut(&mut self, handle: &Handle<T>) -> Option<&mut T> {
        match self.resolve(handle.key) {
            Ok(index) => self.slots[index].value.as_mut(),
            Err(err) => {
                warn!(%handle, %err, "lookup through an expired handle");
                None
            }
        }
    }

    /// Like [`get`](Self::get) but reports exactly why a lookup failed, and
    /// logs nothing.
    pub fn try_get(&self, handle: &Handle<T>) -> Result<&T> {
        let index = self.resolve(handle.key)?;
        self.slots[index].value.as_ref().ok_or(PoolError::Vacant {
            index: handle.index(),
        })
    }

    /// Check whether `handle` still refers to a live slot.
    #[inline]
    pub fn contains(&self, handle: &Handle<T>) -> bool {
        self.resolve(handle.key).is_ok()
    }

    /// Iterate over live slots that hold a value, in index order.
    pub fn iter(&self) -> impl Iterator<Item = (Handle<T>, &T)> + '_ {
        self.slots
            .iter()
            .filter(|slot| slot.in_use)
            .filter_map(|slot| slot.value.as_ref().map(|v| (Handle::new(slot.key), v)))
    }

    /// Bound, occupancy and generation checks shared by every accessor.
    fn resolve(&self, key: SlotKey) -> Result<usize> {
        let index = key.index() as usize;
        let Some(slot) = self.slots.get(index) else {
            return Err(PoolError::OutOfRange {
                index: key.index(),
                capacity: self.capacity(),
            });
        };
        if !slot.in_use || slot.key.generation() != key.generation() {
            return Err(PoolError::StaleHandle {
                index: key.index(),
                presented: key.generation(),
                current: slot.key.generation(),
            });
        }
        Ok(index)
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for SlotPool<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlotPool")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("retired", &self.retired)
            .finish()
    }
}
