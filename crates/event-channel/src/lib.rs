//! # Event-Channel
//!
//! Minimal synchronous publish/subscribe.
//!
//! An [`EventChannel`] belongs to one publisher and carries one payload type.
//! Raising an event calls every subscriber in reverse registration order and
//! stops at the first subscriber error. Subscribers may subscribe or
//! unsubscribe (including themselves) while an event is being raised.
//!
//! Channels are single-threaded (`!Send`); guard them externally if they must
//! be shared.

mod channel;
mod error;
mod subscriber;

pub use channel::EventChannel;
pub use error::{DispatchError, Result};
pub use subscriber::Subscriber;
