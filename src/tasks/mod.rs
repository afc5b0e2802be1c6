//! Background tasks module
//!
//! The event loop that owns the reminder state, and the producers feeding it.

pub mod console_input;
pub mod event_loop;

// Re-export main functions
pub use console_input::console_input_task;
pub use event_loop::event_loop;
