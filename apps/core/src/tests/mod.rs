//! Test Module
//!
//! Test suite for the chat funnel pipeline.
//!
//! ## Test Categories
//! - `brain_tests`: Intent, funnel stage, brand and support classification
//! - `pipeline_tests`: Scanning, sampling, labeling and summary aggregation
//! - `integration_tests`: Full runs writing the labeled dataset and summary

pub mod pipeline_tests;
