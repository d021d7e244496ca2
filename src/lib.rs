//! Public library API for adapting schema-described dynamic attribute
//! values to strongly-typed Rust structs.

/// Dynamic value model, nested-list adapters, diagnostics, and wire decoding.
pub mod attr;
