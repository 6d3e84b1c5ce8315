//! Messages exchanged with the model gateway.
//!
//! A run only ever needs plain text turns, so a message is a role and a string.
//! Providers convert these to whatever wire format they speak.
pub mod message;
pub mod role;
