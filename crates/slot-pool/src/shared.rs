//! Thread-safe pool wrapper.
//!
//! A [`SlotPool`] mutates its free stack and slot array together, so the
//! concurrent form guards the whole pool with one lock. References never
//! leave the lock: values are reached through closures.

use crate::error::Result;
use crate::handle::Handle;
use crate::pool::SlotPool;
use parking_lot::Mutex;
use std::sync::Arc;

/// Cloneable, lock-protected [`SlotPool`].
pub struct SharedPool<T> {
    inner: Arc<Mutex<SlotPool<T>>>,
}

impl<T> Clone for SharedPool<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> SharedPool<T> {
    /// Create a shared pool with `capacity` slots.
    pub fn new(capacity: usize) -> Result<Self> {
        Ok(Self::from_pool(SlotPool::new(capacity)?))
    }

    /// Wrap an existing pool.
    pub fn from_pool(pool: SlotPool<T>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(pool)),
        }
    }

    pub fn allocate(&self) -> Result<Handle<T>> {
        self.inner.lock().allocate()
    }

    pub fn insert(&self, value: T) -> Result<Handle<T>> {
        self.inner.lock().insert(value)
    }

    pub fn release(&self, handle: Handle<T>) -> Option<T> {
        self.inner.lock().release(handle)
    }

    pub fn is_full(&self) -> bool {
        self.inner.lock().is_full()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Run `f` on the value behind `handle` while holding the lock.
    pub fn with<R>(&self, handle: &Handle<T>, f: impl FnOnce(&T) -> R) -> Option<R> {
        self.inner.lock().get(handle).map(f)
    }

    /// Run `f` on the value behind `handle` mutably while holding the lock.
    pub fn with_mut<R>(&self, handle: &Handle<T>, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        self.inner.lock().get_mut(handle).map(f)
    }

    /// Run `f` with the whole pool locked, for multi-step updates that must
    /// not interleave with other threads.
    pub fn lock_with<R>(&self, f: impl FnOnce(&mut SlotPool<T>) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_concurrent_allocation_is_exact() {
        let pool: SharedPool<usize> = SharedPool::new(64).unwrap();
        let workers: Vec<_> = (0..8)
            .map(|t| {
                let pool = pool.clone();
                thread::spawn(move || {
                    (0..16)
                        .filter(|i| pool.insert(t * 100 + i).is_ok())
                        .count()
                })
            })
            .collect();

        let granted: usize = workers.into_iter().map(|w| w.join().unwrap()).sum();
        assert_eq!(granted, 64);
        assert!(pool.is_full());
    }

    #[test]
    fn test_with_mut_updates_in_place() {
        let pool: SharedPool<Vec<u8>> = SharedPool::new(2).unwrap();
        let h = pool.insert(vec![1]).unwrap();
        pool.with_mut(&h, |v| v.push(2));
        assert_eq!(pool.with(&h, |v| v.clone()), Some(vec![1, 2]));

        pool.release(h);
        assert_eq!(pool.with(&h, |v| v.len()), None);
    }

    #[test]
    fn test_lock_with_swaps_without_interleaving() {
        let pool: SharedPool<&str> = SharedPool::new(1).unwrap();
        let old = pool.insert("old").unwrap();

        let (released, new) = pool.lock_with(|p| {
            let released = p.release(old);
            let new = p.insert("new");
            (released, new)
        });
        let new = new.unwrap();

        assert_eq!(released, Some("old"));
        assert_eq!((new.index(), new.generation()), (0, 2));
        assert_eq!(pool.with(&new, |v| *v), Some("new"));
        assert_eq!(pool.with(&old, |v| *v), None);
        assert!(pool.is_full());
    }

    #[test]
    fn test_release_from_other_thread() {
        let pool: SharedPool<u32> = SharedPool::new(1).unwrap();
        let h = pool.insert(9).unwrap();
        let remote = pool.clone();
        let released = thread::spawn(move || remote.release(h)).join().unwrap();
        assert_eq!(released, Some(9));
        assert!(!pool.is_full());
    }
}
