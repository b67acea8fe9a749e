//! Form-driven filter building
//!
//! The advanced search widget also offers a "basic filters" form where the
//! attribute, condition and value are picked separately. This module turns
//! that form into the same `attribute code value` string the normalizer emits.

pub mod basic;

pub use basic::*;
