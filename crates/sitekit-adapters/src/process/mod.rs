//! Process execution adapters.

pub mod scripted;
pub mod system;

pub use scripted::ScriptedRunner;
pub use system::SystemRunner;
