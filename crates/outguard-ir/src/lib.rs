//! OutGuard IR — resolved Go syntax trees.
//!
//! The tree is produced by the Go front-end bridge and deserialized here:
//! identifier bindings, receiver types, and single-definition links are
//! already resolved onto the nodes. This crate is pure data; the analysis
//! lives in outguard-check.

pub mod ast;
