//! Unit tests for the task module.

mod service_tests;
