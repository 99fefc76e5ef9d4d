//! Pointer-driven resizing of columns, rows and single cells.
//!
//! A [`ResizeSession`] lives from pointer-down to pointer-up. Each pointer
//! move writes the clamped size straight into the document; history is the
//! caller's business (the editor records one entry per gesture).

use crate::document::TemplateDocument;
use crate::error::ValidationError;
use crate::settings::EditorSettings;
use theatre_grid_model::CellId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// What a resize gesture grabbed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResizeTarget {
    /// One cell's own width or height override.
    Cell { id: CellId, axis: Axis },
    Column(usize),
    Row(usize),
}

impl ResizeTarget {
    pub fn axis(&self) -> Axis {
        match self {
            ResizeTarget::Cell { axis, .. } => *axis,
            ResizeTarget::Column(_) => Axis::Horizontal,
            ResizeTarget::Row(_) => Axis::Vertical,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResizeSession {
    target: ResizeTarget,
    origin: (f64, f64),
    /// Size at pointer-down; deltas are measured from here.
    start: u32,
    /// Raw stored value at pointer-down, restored on cancel.
    initial: Option<u32>,
}

impl ResizeSession {
    /// Start a resize at pointer position `origin` (x, y). A cell target on a
    /// covered cell resizes its anchor.
    pub fn begin(
        doc: &TemplateDocument,
        target: ResizeTarget,
        origin: (f64, f64),
    ) -> Result<Self, ValidationError> {
        let target = match target {
            ResizeTarget::Cell { id, axis } => {
                let anchor = doc
                    .resolve_anchor(id)
                    .ok_or(ValidationError::UnknownCell(id))?;
                ResizeTarget::Cell {
                    id: anchor.id,
                    axis,
                }
            }
            ResizeTarget::Column(col) if col >= doc.cols() => {
                return Err(ValidationError::OutOfBounds {
                    index: col,
                    size: doc.cols(),
                });
            }
            ResizeTarget::Row(row) if row >= doc.rows() => {
                return Err(ValidationError::OutOfBounds {
                    index: row,
                    size: doc.rows(),
                });
            }
            other => other,
        };

        let start = match target {
            ResizeTarget::Cell {
                id,
                axis: Axis::Horizontal,
            } => doc
                .rendered_width(id)
                .ok_or(ValidationError::UnknownCell(id))?,
            ResizeTarget::Cell {
                id,
                axis: Axis::Vertical,
            } => doc
                .rendered_height(id)
                .ok_or(ValidationError::UnknownCell(id))?,
            ResizeTarget::Column(col) => doc.column_widths()[col],
            ResizeTarget::Row(row) => doc.row_heights()[row],
        };

        let session = ResizeSession {
            target,
            origin,
            start,
            initial: None,
        };
        Ok(ResizeSession {
            initial: session.stored(doc),
            ..session
        })
    }

    pub fn target(&self) -> ResizeTarget {
        self.target
    }

    pub fn axis(&self) -> Axis {
        self.target.axis()
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    fn minimum(&self, settings: &EditorSettings) -> u32 {
        match self.axis() {
            Axis::Horizontal => settings.min_column_width,
            Axis::Vertical => settings.min_row_height,
        }
    }

    /// The size the pointer at `pointer` asks for, clamped to the minimum.
    /// A pointer with a NaN coordinate leaves the starting size in place.
    pub fn size_at(&self, pointer: (f64, f64), settings: &EditorSettings) -> u32 {
        let delta = match self.axis() {
            Axis::Horizontal => pointer.0 - self.origin.0,
            Axis::Vertical => pointer.1 - self.origin.1,
        };
        let wanted = (self.start as f64 + delta).round();
        if wanted.is_nan() {
            return self.start;
        }
        let minimum = self.minimum(settings);
        if wanted <= minimum as f64 {
            minimum
        } else if wanted >= u32::MAX as f64 {
            u32::MAX
        } else {
            wanted as u32
        }
    }

    /// Follow the pointer: write the new size into the document and return it.
    pub fn update(
        &self,
        doc: &mut TemplateDocument,
        pointer: (f64, f64),
        settings: &EditorSettings,
    ) -> u32 {
        let size = self.size_at(pointer, settings);
        self.write(doc, Some(size));
        size
    }

    /// Put back whatever was stored at pointer-down.
    pub fn cancel(&self, doc: &mut TemplateDocument) {
        self.write(doc, self.initial);
    }

    /// Whether the gesture has left the document as it found it.
    pub fn is_unchanged(&self, doc: &TemplateDocument) -> bool {
        self.stored(doc) == self.initial
    }

    fn stored(&self, doc: &TemplateDocument) -> Option<u32> {
        match self.target {
            ResizeTarget::Cell { id, axis } => doc.cell(id).and_then(|cell| match axis {
                Axis::Horizontal => cell.width,
                Axis::Vertical => cell.height,
            }),
            ResizeTarget::Column(col) => doc.column_widths().get(col).copied(),
            ResizeTarget::Row(row) => doc.row_heights().get(row).copied(),
        }
    }

    fn write(&self, doc: &mut TemplateDocument, value: Option<u32>) {
        match self.target {
            ResizeTarget::Cell { id, axis } => {
                if let Some(idx) = doc.index_of(id) {
                    let cell = &mut doc.cells[idx];
                    match axis {
                        Axis::Horizontal => cell.width = value,
                        Axis::Vertical => cell.height = value,
                    }
                }
            }
            ResizeTarget::Column(col) => {
                if let (Some(slot), Some(value)) = (doc.column_widths.get_mut(col), value) {
                    *slot = value;
                }
            }
            ResizeTarget::Row(row) => {
                if let (Some(slot), Some(value)) = (doc.row_heights.get_mut(row), value) {
                    *slot = value;
                }
            }
        }
    }
}
