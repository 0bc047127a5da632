//! intellirank - terminal client for the IntelliRank semantic ranking
//! service.
//!
//! The crate is organised around a handful of client-side session
//! controllers (connectivity, filter cascade, search) that run on a single
//! event loop and talk to the remote service through [`api::RankingService`].

pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod session;
pub mod shell;
pub mod test_utils;
pub mod tui;

pub use error::{IrError, Result};
