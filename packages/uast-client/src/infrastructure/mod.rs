//! Session implementations

pub mod memory;

pub use memory::{Operation, RecordedCall, ScriptedSession, Surface};
