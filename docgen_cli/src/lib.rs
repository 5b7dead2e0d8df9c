//! # MW Docs CLI
//!
//! Command line front end for the documentation generator. Argument parsing
//! lives here so it can be tested without spawning the binary.

pub mod cli;
