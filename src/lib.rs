//! A crate to build and simplify local sequence-assembly graphs.
//!
//! Raw reads are threaded into a de Bruijn graph of overlapping k-mers, which is then
//! converted into a sequence graph whose vertices carry variable-length base sequences.
//! The sequence graph is simplified to a fixed point by contracting non-branching chains
//! and collapsing diamond (bubble) subgraphs into their shared and divergent sequence.
//! The simplified graph is meant to be consumed by downstream haplotype discovery, which
//! is not part of this crate.
#![warn(missing_docs)]
#![recursion_limit = "1024"]
#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate log;

/// Contains the graph algorithms: structural equality and simplification.
pub mod algo;
/// Contains the vertex and edge payload types of sequence graphs.
pub mod data;
/// Contains the de Bruijn graph builder and its conversion into a sequence graph.
pub mod debruijn;
/// Contains the error types used by this crate.
pub mod error;
/// Contains the graph implementations.
pub mod implementation;
/// Contains the strongly typed graph indices.
pub mod index;
/// Contains the graph traits.
pub mod interface;
/// Contains functions for writing graphs in diagnostic formats.
pub mod io;
