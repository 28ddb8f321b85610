//! Property-based tests for expression arithmetic and subspace geometry.
