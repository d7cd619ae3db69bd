//! Environment-driven knobs for running the suites in CI.

pub mod property_test_profile;
