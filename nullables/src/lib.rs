//! Nullable infrastructure for deterministic testing.
//!
//! External collaborators (clock, channel senders, code renderer) are
//! abstracted behind traits; this crate provides implementations that
//! return deterministic values, can be controlled programmatically, and
//! never touch the network. Swap them in wherever a test needs control.

pub mod clock;
pub mod renderer;
pub mod sender;

pub use clock::NullClock;
pub use renderer::NullRenderer;
pub use sender::NullSender;
