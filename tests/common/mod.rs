//! Common test utilities for aeolus.
//!
//! This module provides shared utilities for testing the atlas core.

// Re-export all common test utilities
pub mod assertions;
pub mod test_data;
