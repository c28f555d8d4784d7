//! Core types and trait definitions for the sign-up board.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! The storage backends and the web layer depend on it.

pub mod date;
pub mod error;
pub mod grid;
pub mod memory;
pub mod registry;

pub use date::DateKey;
pub use error::{Error, Result};
pub use grid::{DayCell, MonthGrid, MonthRef, build_grid};
pub use memory::MemoryRegistry;
pub use registry::{DateNames, NameRegistry};
