/// The only mutable state of a composition run, passed by value.
///
/// Within a page `y` only grows; a page break resets it to the content top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageCursor {
    pub y: f32,
    pub page_index: usize,
}

impl PageCursor {
    pub fn new(top: f32) -> Self {
        Self { y: top, page_index: 0 }
    }

    #[must_use]
    pub fn advance(self, dy: f32) -> Self {
        Self {
            y: self.y + dy.max(0.0),
            ..self
        }
    }

    #[must_use]
    pub fn next_page(self, top: f32) -> Self {
        Self {
            y: top,
            page_index: self.page_index + 1,
        }
    }

    /// Moves down to `y` if it lies below the cursor.
    #[must_use]
    pub fn at_least(self, y: f32) -> Self {
        Self {
            y: self.y.max(y),
            ..self
        }
    }
}
