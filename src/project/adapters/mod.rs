//! Adapter implementations of the project ports.

pub mod memory;
pub mod postgres;
