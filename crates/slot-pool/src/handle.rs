//! Typed pool handle.

use crate::key::SlotKey;
use std::marker::PhantomData;

/// A handle to a slot in a [`SlotPool`](crate::SlotPool).
///
/// Handles carry a packed [`SlotKey`] that is validated on every access. Once
/// the slot has been released the handle is stale and every access through it
/// becomes a no-op.
///
/// Handles are always `Copy` regardless of whether `T` is `Copy`, since they
/// only contain the key, not the value itself.
///
/// # Example
///
/// ```
/// use slot_pool::SlotPool;
///
/// let mut pool: SlotPool<&str> = SlotPool::new(4)?;
/// let handle = pool.insert("hello")?;
/// assert_eq!(pool.get(&handle), Some(&"hello"));
/// # Ok::<(), slot_pool::PoolError>(())
/// ```
pub struct Handle<T> {
    pub(crate) key: SlotKey,
    _marker: PhantomData<fn() -> T>,
}

// Manual impls so that none of these require the same trait on T.
impl<T> Clone for Handle<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> PartialEq for Handle<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<T> Eq for Handle<T> {}

impl<T> std::hash::Hash for Handle<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl<T> Handle<T> {
    #[inline]
    pub(crate) const fn new(key: SlotKey) -> Self {
        Self {
            key,
            _marker: PhantomData,
        }
    }

    /// Rebuild a handle from an integer previously obtained with
    /// [`Handle::to_raw`]. Nothing is validated until the handle is used.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self::new(SlotKey::from_raw(raw))
    }

    /// The packed integer form of this handle.
    #[inline]
    pub const fn to_raw(&self) -> u32 {
        self.key.to_raw()
    }

    /// The packed key.
    #[inline]
    pub const fn key(&self) -> SlotKey {
        self.key
    }

    /// Slot index.
    #[inline]
    pub const fn index(&self) -> u16 {
        self.key.index()
    }

    /// Generation the slot had when this handle was issued.
    #[inline]
    pub const fn generation(&self) -> u16 {
        self.key.generation()
    }
}

impl<T> std::fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Handle")
            .field("index", &self.index())
            .field("generation", &self.generation())
            .finish()
    }
}

impl<T> std::fmt::Display for Handle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}v{}", self.index(), self.generation())
    }
}
