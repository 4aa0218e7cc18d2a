//! Pool error types.

use thiserror::Error;

/// Everything a pool operation can report.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolError {
    #[error("cannot build a pool of {requested} slots, keys address at most {max}")]
    CapacityExceeded { requested: usize, max: usize },

    #[error("all {capacity} slots are in use")]
    PoolExhausted { capacity: usize },

    #[error("slot {index} is at generation {current}, handle carries {presented}")]
    StaleHandle {
        index: u16,
        presented: u16,
        current: u16,
    },

    #[error("slot {index} is outside a pool of {capacity} slots")]
    OutOfRange { index: u16, capacity: usize },

    #[error("slot {index} is allocated but holds no value")]
    Vacant { index: u16 },
}

pub type Result<T> = std::result::Result<T, PoolError>;
