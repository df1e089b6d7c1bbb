// src/lib.rs
//! openv0 project bootstrapper library.

#![deny(missing_docs)]

pub mod archive;
pub mod bootstrap;
pub mod cli;
pub mod clone;
pub mod config;
pub mod env_file;
pub mod error;
pub mod install;
pub mod logging;
pub mod progress;
pub mod project;
pub mod prompt;
pub mod runner;
pub mod server;
pub mod template;
