//! Property-based tests for the activity store.
