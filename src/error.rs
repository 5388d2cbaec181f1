use smol_str::SmolStr;
use thiserror::Error;

use crate::ElementId;
use crate::style::Size;

/// Failures reported by tree mutations. A failed call leaves the tree unmodified.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("{property} cannot be negative (got {value})")]
    NegativeSize { property: &'static str, value: i32 },

    #[error("{property}: minimum {min} exceeds maximum {max}")]
    MinExceedsMax {
        property: &'static str,
        min: i32,
        max: i32,
    },

    #[error("border thickness {thickness} exceeds half of the enclosing size {enclosing:?}")]
    BorderTooThick { thickness: i32, enclosing: Size },

    #[error("opacity must be a finite number (got {0})")]
    InvalidOpacity(f32),

    #[error("element {0:?} does not exist")]
    UnknownElement(ElementId),

    #[error("element {child:?} already has a parent")]
    AlreadyParented { child: ElementId },

    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    Cycle { parent: ElementId, child: ElementId },

    #[error("elements {child:?} and {parent:?} belong to different windows")]
    ForeignWindow { parent: ElementId, child: ElementId },

    #[error("element {0:?} does not host content")]
    ContentNotSupported(ElementId),

    #[error("element {child:?} is not a content child of {parent:?}")]
    NotAChild { parent: ElementId, child: ElementId },

    #[error("components of {0:?} must be registered before its first arrange pass")]
    ComponentAfterLayout(ElementId),

    #[error("name `{0}` is already used in this window")]
    DuplicateName(SmolStr),

    #[error("element {0:?} is not of the requested widget type")]
    WidgetTypeMismatch(ElementId),
}

pub type LayoutResult<T> = Result<T, LayoutError>;
