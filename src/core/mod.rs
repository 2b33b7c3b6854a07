//! Core functionality shared by everything built on top of the MIP
//! map.
//!
//! - error
//! - geometry
//! - memory
//! - mipmap
//! - parallel
//! - paramset
//! - pbrt
//! - spectrum
//! - stats
//! - texture

pub mod error;
pub mod geometry;
pub mod memory;
pub mod mipmap;
pub mod parallel;
pub mod paramset;
pub mod pbrt;
pub mod spectrum;
pub mod stats;
pub mod texture;
