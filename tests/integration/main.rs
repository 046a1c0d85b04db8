//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises a specific part of the
//! gesture machine against mock pins and a simulated clock. All tests run
//! on the host with no real hardware required.

mod dynamic_tests;
mod gesture_tests;
mod isr_contention_tests;
mod queue_power_tests;
