//! A toolkit for painting texts as images.
//!
//! # Overview
//!
//! Verso turns a text into a square picture: the text is split into word
//! tokens, a **metric** maps the token sequence to one normalized value per
//! token (or per adjacent token pair), a **color mapper** turns each value
//! into an RGB triple, and the **renderer** lays the colors out row-major on
//! a `ceil(sqrt(n))`-sided grid. The optional **viewer** export wraps the
//! raster and its per-pixel labels in a single self-contained interactive
//! HTML document.
//!
//! The pipeline is a straight line:
//!
//! ```text
//! text -> tokenize -> metric.measure -> render -> raster.save
//!                                         |
//!                                         +-> viewer::export (optional)
//! ```
//!
//! Each run is independent and synchronous; metrics are pure functions of
//! the full token sequence, computed as an immutable count table in one pass
//! and emitted in a second, so identical input and configuration always
//! produce byte-identical output.

#[macro_use]
pub mod error;
pub mod token;
pub mod metric;
pub mod color;
pub mod raster;
pub mod viewer;

pub use token::{tokenize, TokenizeOptions, Tokens};
pub use metric::{Measurement, Metric};
pub use color::ColorMap;
pub use raster::{render, Raster};
pub use viewer::RunMeta;

pub use rayon;
