use event_channel::DispatchError;
use slot_pool::PoolError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CollectionError {
    #[error("collection is full ({capacity} items)")]
    Full { capacity: usize },

    #[error(transparent)]
    Pool(#[from] PoolError),

    #[error("event dispatch failed: {0}")]
    Dispatch(#[from] DispatchError),
}

pub type Result<T> = std::result::Result<T, CollectionError>;
