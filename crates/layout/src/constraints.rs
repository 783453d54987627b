use crate::LayoutError;
use folio_style::{Margins, PageSize};

/// Page geometry fixed for the whole document. All `y` values are measured from the
/// top edge of the page downwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConstraints {
    pub page_width: f32,
    pub page_height: f32,
    pub margins: Margins,
    /// Band below the top margin reserved for the page header.
    pub header_height: f32,
    /// Space above the bottom margin kept free for the stamped footer.
    pub footer_height: f32,
}

impl LayoutConstraints {
    pub fn new(
        page: PageSize,
        margins: Margins,
        header_height: f32,
        footer_height: f32,
    ) -> Result<Self, LayoutError> {
        let (page_width, page_height) = page.dimensions_pt();
        let constraints = Self {
            page_width,
            page_height,
            margins,
            header_height,
            footer_height,
        };
        if constraints.content_width() <= 0.0 {
            return Err(LayoutError::InvalidConstraints(format!(
                "margins leave no horizontal room on a {:.0}pt wide page",
                page_width
            )));
        }
        if constraints.content_height() <= 0.0 {
            return Err(LayoutError::InvalidConstraints(format!(
                "header, footer and margins leave no vertical room on a {:.0}pt tall page",
                page_height
            )));
        }
        Ok(constraints)
    }

    pub fn content_left(&self) -> f32 {
        self.margins.left
    }

    pub fn content_right(&self) -> f32 {
        self.page_width - self.margins.right
    }

    pub fn content_width(&self) -> f32 {
        self.page_width - self.margins.horizontal()
    }

    /// First `y` available to body content on every page.
    pub fn content_top(&self) -> f32 {
        self.margins.top + self.header_height
    }

    /// Lowest `y` body content may reach.
    pub fn usable_bottom(&self) -> f32 {
        self.page_height - self.margins.bottom - self.footer_height
    }

    /// Height of an empty page's body area.
    pub fn content_height(&self) -> f32 {
        self.usable_bottom() - self.content_top()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a4_geometry() {
        let c = LayoutConstraints::new(PageSize::A4, Margins::all(36.0), 64.0, 40.0).unwrap();
        assert!((c.content_width() - 523.28).abs() < 0.01);
        assert_eq!(c.content_top(), 100.0);
        assert!((c.usable_bottom() - 765.89).abs() < 0.01);
    }

    #[test]
    fn rejects_pages_with_no_room() {
        let tiny = PageSize::Custom { width: 100.0, height: 120.0 };
        assert!(LayoutConstraints::new(tiny, Margins::all(36.0), 64.0, 40.0).is_err());
        assert!(LayoutConstraints::new(tiny, Margins::all(60.0), 0.0, 0.0).is_err());
    }
}
