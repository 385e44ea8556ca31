pub mod chats;
pub mod error;
pub mod messages;
pub mod middleware;
pub mod router;
pub mod state;
pub mod views;

#[cfg(test)]
mod testing;

pub use router::router;
pub use state::{AppState, AppStateInner};
