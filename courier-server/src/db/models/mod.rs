//! Database Models

pub mod order;
pub mod sender;
pub mod serde_helpers;

pub use order::{Order, OrderWithSender};
pub use sender::Sender;
