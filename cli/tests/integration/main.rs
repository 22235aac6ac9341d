//! Integration tests for firebase-provision
//!
//! These tests spawn the actual binary. None of them get past project ID or
//! configuration validation, so no provider CLI is ever invoked.
