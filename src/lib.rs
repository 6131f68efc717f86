//! # cvphoto
//!
//! Local photo store for the CV editor. The library exposes the composition
//! root; the `cvphoto` binary is a maintenance CLI on top of it.

pub mod bootstrap;
pub mod cli;
