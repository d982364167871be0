//! Unit tests for the project module.
