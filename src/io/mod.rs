//! Input and output of sequence graphs.

pub mod dot;
