//! Renderers that turn a bound [`Page`](crate::surface::Page) into output.
//!
//! - [`html`]: a self-contained page that hands each chart spec to Chart.js
//! - [`text`]: plain terminal output with ASCII bars

pub mod html;
pub mod text;
