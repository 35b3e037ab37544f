//! Wonkey Kong: a single-screen platform board simulated one tick at a time.
//!
//! `compute` holds the simulation core, `entities` its data model. The
//! terminal driver in `main.rs` adds level loading, input, rendering and
//! session bookkeeping on top.

pub mod compute;
pub mod config;
pub mod entities;
pub mod level;
pub mod session;
