//! Encyclopedia reference sources for OneMinute.
//!
//! All sources implement the `oneminute_core::ReferenceSource` trait.

pub mod wikipedia;

pub use wikipedia::WikipediaSource;
