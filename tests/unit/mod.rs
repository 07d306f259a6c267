//! Unit-level tests for the statistics engine and the toggle operation
mod statistics_tests;
mod toggle_tests;
