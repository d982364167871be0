//! Step definitions for task listing scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
