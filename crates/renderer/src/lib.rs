//! Layout and drawing engine for the usage chart.
//!
//! Rendering is a pure mapping from a plot rectangle and a set of series to
//! calls on a [`Surface`].  The window crate adapts an Iced canvas frame to
//! [`Surface`]; tests draw into a [`Recorder`] and inspect the primitives.

pub mod chart;
pub mod surface;

pub use chart::{plot_area, render_chart, ChartInput, Margins};
pub use surface::{Anchor, Label, Point, Primitive, Recorder, Rect, Stroke, Surface};
