//! TargetScope - build-target dependency queries and graph export
//!
//! This crate builds a directed graph of build targets from project
//! records and answers reachability queries over it: what a target
//! depends on, what depends on a target, and the whole filtered topology
//! for handing to Graphviz.

pub mod commands;
pub mod export;
pub mod filter;
pub mod graph;
pub mod logging;
pub mod project;
