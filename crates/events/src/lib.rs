//! Change notifications and the pub/sub mechanics that carry them.
//!
//! Domain crates define their own event enums and implement [`Event`]; this
//! crate only moves them from one publisher to many observers.

pub mod bus;
pub mod event;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use event::Event;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
