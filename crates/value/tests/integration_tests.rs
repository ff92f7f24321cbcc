//! Integration tests for strata-value
//!
//! These tests verify that the value kinds, the comparator and the writer
//! sinks work together

mod common;

mod integration {
    mod cross_module;
    mod temporal_workflow;
    mod writer_round_trip;
}
