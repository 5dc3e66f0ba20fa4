//! Implementation of the `#[derive(Record)]` macro.
//!
//! Generates a `tabula::Record` implementation and field key constants
//! from `#[record(...)]` field annotations.

mod attrs;
mod derive;

pub use derive::record_derive_impl;
