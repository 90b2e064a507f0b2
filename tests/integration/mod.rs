//! Integration Tests Module
//!
//! End-to-end tests that load CSV exports into an on-disk store and build
//! every report kind through the assembler and formatter.

pub mod report_assembly;
pub mod report_formats;
