//! Drawing elements that make up a room's board.
//!
//! Elements are opaque to the session coordinator: they are appended or
//! replaced as units and their geometry is never interpreted server-side.
//! The wire shape mirrors what the drawing clients produce.

use serde::{Deserialize, Serialize};

/// One drawing element on the shared board.
///
/// Tagged by tool type; `path` carries the ordered point path of freehand
/// tools, `width` / `height` the extents of shape tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum DrawElement {
    Pencil {
        offset_x: f64,
        offset_y: f64,
        path: Vec<(f64, f64)>,
        color: String,
    },
    Line {
        offset_x: f64,
        offset_y: f64,
        width: f64,
        height: f64,
        color: String,
    },
    Rect {
        offset_x: f64,
        offset_y: f64,
        width: f64,
        height: f64,
        color: String,
    },
    Eraser {
        offset_x: f64,
        offset_y: f64,
        path: Vec<(f64, f64)>,
        color: String,
    },
}
