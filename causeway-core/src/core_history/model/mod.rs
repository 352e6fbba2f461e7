/*
    Model subsystem - Data structures for channel history
*/

pub mod message;
pub mod types;

pub use message::*;
pub use types::*;
