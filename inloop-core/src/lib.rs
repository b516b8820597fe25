//! # Inloop Core
//!
//! Core types and utilities for the inloop filter kernel library.
//!
//! This crate provides the fundamental building blocks used across all
//! inloop components:
//! - Error handling types
//! - Strided sample-plane views with signed in-block addressing
//! - Channel and bit-depth helpers
//! - Runtime CPU capability detection

pub mod detect;
pub mod error;
pub mod plane;

pub use detect::{detect_cpu, CpuCapabilities};
pub use error::{Error, Result};
pub use plane::{sample_max, ChannelType, PlaneView, PlaneViewMut};
