//! End-to-end runs of the hostcheck binary.

mod common;
mod run_tests;
