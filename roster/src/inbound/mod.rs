//! Inbound adapters translating user input into domain calls.
//!
//! - **cli**: terminal commands for listing, inspecting, and editing the
//!   cached user collection

pub mod cli;
