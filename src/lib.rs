//! Deblur TUI - Terminal Image Deblurring Client
//!
//! A terminal client for a remote image deblurring service. Pick an
//! image, send it to the server, view and download the enhanced result.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
