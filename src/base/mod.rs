//! Base types for sequence representation.
//!
//! This module provides the symbolic side of the store: single nucleotide
//! bases carrying their 2-bit storage codes, and owned sequences of them.

mod nucleotide;
mod sequence;

pub use nucleotide::{Base, InvalidSymbol};
pub use sequence::Sequence;
