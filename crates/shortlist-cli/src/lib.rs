//! File-based screening pipeline for the `shortlist` binary: request and
//! catalog loading, candidate resolution, and response rendering.

pub mod error;
pub mod input;
pub mod screen;
