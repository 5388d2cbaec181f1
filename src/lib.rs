//! Retained-mode element tree with a two-pass measure/arrange layout.
//!
//! Elements live in an [`ElementTree`] arena. A frame measures the root
//! window against the viewport, arranges it, then runs update and draw
//! passes over the visual tree. Concrete widgets plug into layout through
//! the capability traits in [`view`].

pub mod error;
pub mod style;
pub mod ui;
pub mod view;

pub use error::{LayoutError, LayoutResult};
pub use view::{ElementId, ElementTree};
