//! Ports (trait boundaries) for episode participants and observers.
//!
//! The episode runner and training pipeline only depend on these traits;
//! agents, the human player and output sinks implement them.

pub mod learner;
pub mod observer;

pub use learner::Learner;
pub use observer::Observer;
