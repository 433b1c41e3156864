//! Integration tests for the harvester
//!
//! These tests use wiremock to stand up a mock listing site and exercise the
//! pagination walk, article extraction and feed output end-to-end.

mod harvest_tests;
