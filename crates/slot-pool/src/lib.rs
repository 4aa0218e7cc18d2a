//! # Slot-Pool
//!
//! A fixed-capacity object pool addressed through compact generational
//! handles.
//!
//! ## Features
//!
//! - **Packed keys**: index and generation share one `u32` (16 bits each)
//! - **Stale-handle detection**: a handle to a released slot never reaches
//!   the slot's next occupant
//! - **LIFO recycling**: the most recently released slot is reused first
//! - **No faults on misuse**: stale or foreign handles read as `None` and
//!   release as a no-op
//! - **Shared form**: [`SharedPool`] puts the pool behind a single lock
//!
//! ## Quick Start
//!
//! ```rust
//! use slot_pool::SlotPool;
//!
//! let mut pool: SlotPool<String> = SlotPool::new(8)?;
//! let handle = pool.insert("hello".to_string())?;
//! assert_eq!(pool.get(&handle).map(String::as_str), Some("hello"));
//! pool.release(handle);
//! assert!(pool.get(&handle).is_none());
//! # Ok::<(), slot_pool::PoolError>(())
//! ```

mod error;
mod handle;
pub mod key;
mod pool;
mod shared;

pub use error::{PoolError, Result};
pub use handle::Handle;
pub use key::SlotKey;
pub use pool::SlotPool;
pub use shared::SharedPool;
