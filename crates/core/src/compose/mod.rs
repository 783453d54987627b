//! Page flow for one document.
//!
//! A [`Composer`] owns the PDF writer, the canvas of the page being drawn and the
//! [`PageCursor`]. Sections ask it for room before drawing; it consults the layout
//! optimizer and starts a new page (with its header band) when the block would not
//! fit. Footers are stamped on every page once the page count is known.

mod theme;

pub use theme::Theme;

use crate::error::PipelineError;
use folio_format::Formatter;
use folio_layout::{split_lines, LayoutConstraints, LayoutOptimizer, PageCursor};
use folio_render_lopdf::{
    DocumentInfo, ImageHandle, PageCanvas, PdfWriter, TextAnchor, TextStyle,
};
use folio_style::{BrandingProfile, StandardFont};
use folio_types::{Rect, Size};
use image::RgbImage;
use log::{debug, warn};

/// Text shown wherever a section has nothing to display.
pub const NO_DATA_TEXT: &str = "No data for this period";

const NOTICE_HEIGHT: f32 = 34.0;

pub struct Composer<'a> {
    writer: PdfWriter,
    canvas: PageCanvas,
    cursor: PageCursor,
    optimizer: LayoutOptimizer,
    theme: Theme,
    profile: &'a BrandingProfile,
    formatter: &'a Formatter,
    logo: Option<(ImageHandle, Size)>,
    caption: String,
    kpi_font_floor: f32,
}

impl<'a> Composer<'a> {
    /// Starts the first page. `caption` is repeated at the right of every header band.
    pub fn new(
        optimizer: LayoutOptimizer,
        profile: &'a BrandingProfile,
        formatter: &'a Formatter,
        info: DocumentInfo,
        logo: Option<&RgbImage>,
        kpi_font_floor: f32,
    ) -> Self {
        let constraints = *optimizer.constraints();
        let mut writer =
            PdfWriter::new(constraints.page_width, constraints.page_height).with_info(info.clone());
        let logo = logo.and_then(|raster| match writer.add_image(raster) {
            Ok(handle) => {
                let size = Size::new(raster.width() as f32, raster.height() as f32);
                Some((handle, size))
            }
            Err(e) => {
                warn!("Logo could not be embedded, continuing without it: {}", e);
                None
            }
        });
        let canvas = writer.canvas();
        let mut composer = Self {
            writer,
            canvas,
            cursor: PageCursor::new(constraints.content_top()),
            optimizer,
            theme: Theme::from_profile(profile),
            profile,
            formatter,
            logo,
            caption: info.title,
            kpi_font_floor,
        };
        composer.paint_header();
        composer
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn profile(&self) -> &BrandingProfile {
        self.profile
    }

    pub fn formatter(&self) -> &Formatter {
        self.formatter
    }

    pub fn optimizer(&self) -> &LayoutOptimizer {
        &self.optimizer
    }

    pub fn constraints(&self) -> &LayoutConstraints {
        self.optimizer.constraints()
    }

    pub fn kpi_font_floor(&self) -> f32 {
        self.kpi_font_floor
    }

    pub fn cursor(&self) -> PageCursor {
        self.cursor
    }

    pub fn y(&self) -> f32 {
        self.cursor.y
    }

    pub fn left(&self) -> f32 {
        self.constraints().content_left()
    }

    pub fn width(&self) -> f32 {
        self.constraints().content_width()
    }

    pub fn canvas(&mut self) -> &mut PageCanvas {
        &mut self.canvas
    }

    pub fn available_height(&self) -> f32 {
        self.optimizer.available_height(self.cursor.y)
    }

    pub fn at_page_top(&self) -> bool {
        self.cursor.y <= self.constraints().content_top() + folio_layout::EPSILON
    }

    pub fn advance(&mut self, dy: f32) {
        self.cursor = self.cursor.advance(dy);
    }

    /// Adds vertical space unless the cursor sits at the top of a page.
    pub fn gap(&mut self, dy: f32) {
        if !self.at_page_top() {
            self.advance(dy.min(self.available_height()));
        }
    }

    pub fn add_image(&mut self, raster: &RgbImage) -> Result<ImageHandle, PipelineError> {
        Ok(self.writer.add_image(raster)?)
    }

    /// Closes the current page and opens the next one.
    pub fn page_break(&mut self) -> Result<(), PipelineError> {
        let finished = std::mem::replace(&mut self.canvas, self.writer.canvas());
        self.writer.add_page(finished)?;
        let top = self.constraints().content_top();
        self.cursor = self.cursor.next_page(top);
        debug!("Started page {}", self.cursor.page_index + 1);
        self.paint_header();
        Ok(())
    }

    /// Breaks the page when a block of `height` would not fit below the cursor.
    /// Returns whether a break happened.
    pub fn ensure(&mut self, height: f32, allow_partial: bool) -> Result<bool, PipelineError> {
        if self.optimizer.should_break(self.cursor.y, height, allow_partial) {
            self.page_break()?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Breaks the page when fewer than two of `sections` would fit together.
    pub fn keep_together(&mut self, sections: &[f32]) -> Result<bool, PipelineError> {
        if self.optimizer.orphan_guard(self.cursor.y, sections) {
            self.page_break()?;
            return Ok(true);
        }
        self.ensure(sections.first().copied().unwrap_or_default(), false)
    }

    fn paint_header(&mut self) {
        let c = *self.constraints();
        let band = Rect::new(c.content_left(), c.margins.top, c.content_width(), c.header_height);
        let theme = self.theme;
        let profile = self.profile;
        let mut text_x = band.x;

        if let Some((handle, size)) = &self.logo {
            let max_height = (band.height - 20.0).max(12.0);
            let scale = (max_height / size.height).min(120.0 / size.width);
            let rect = Rect::new(band.x, band.y, size.width * scale, size.height * scale);
            self.canvas.image(handle, rect);
            text_x = rect.right() + 10.0;
        }

        self.canvas.text(
            &profile.company_name,
            text_x,
            band.y + 2.0,
            TextStyle::bold(14.0, theme.primary),
            TextAnchor::Left,
        );
        self.canvas.text(
            &profile.tagline,
            text_x,
            band.y + 21.0,
            TextStyle::regular(8.0, theme.muted),
            TextAnchor::Left,
        );
        self.canvas.text(
            &profile.address,
            band.right(),
            band.y + 4.0,
            TextStyle::regular(8.0, theme.muted),
            TextAnchor::Right,
        );
        self.canvas.text(
            &self.caption,
            band.right(),
            band.y + 16.0,
            TextStyle::new(StandardFont::HelveticaBold, 8.0, theme.secondary),
            TextAnchor::Right,
        );

        let rule_y = band.bottom() - 10.0;
        self.canvas
            .line((band.x, rule_y), (band.right(), rule_y), theme.primary, 1.5);
    }

    /// One line of text at the cursor. Breaks the page first if the line does not fit.
    pub fn line(&mut self, text: &str, style: TextStyle, anchor: TextAnchor) -> Result<(), PipelineError> {
        let height = self.theme.line(style.size);
        self.ensure(height, false)?;
        let x = match anchor {
            TextAnchor::Left => self.left(),
            TextAnchor::Center => self.left() + self.width() / 2.0,
            TextAnchor::Right => self.left() + self.width(),
        };
        let y = self.cursor.y;
        self.canvas.text(text, x, y, style, anchor);
        self.advance(height);
        Ok(())
    }

    /// Line-split text flowing across pages, indented by `indent`.
    pub fn paragraph(&mut self, text: &str, style: TextStyle, indent: f32) -> Result<(), PipelineError> {
        let width = (self.width() - indent).max(style.size);
        let lines = split_lines(text, style.font, style.size, width);
        let height = self.theme.line(style.size);
        for line in lines {
            self.ensure(height, false)?;
            let y = self.cursor.y;
            let x = self.left() + indent;
            self.canvas.text(&line, x, y, style, TextAnchor::Left);
            self.advance(height);
        }
        Ok(())
    }

    /// A section heading kept on the same page as the first `following` points of
    /// its content.
    pub fn heading(&mut self, text: &str, following: f32) -> Result<(), PipelineError> {
        let style = TextStyle::bold(self.theme.heading_size, self.theme.primary);
        let height = self.theme.line(style.size) + 4.0;
        self.keep_together(&[height, following])?;
        let (x, y) = (self.left(), self.cursor.y);
        self.canvas.text(text, x, y, style, TextAnchor::Left);
        self.advance(height);
        Ok(())
    }

    /// A dashed box with centered muted text, used for empty sections.
    pub fn notice(&mut self, text: &str) -> Result<(), PipelineError> {
        self.ensure(NOTICE_HEIGHT, false)?;
        let rect = Rect::new(self.left(), self.cursor.y, self.width(), NOTICE_HEIGHT - 6.0);
        let theme = self.theme;
        self.canvas.fill_rect(rect, theme.card_fill);
        self.canvas.stroke_rect_dashed(rect, theme.rule, 0.75, 3.0);
        let style = TextStyle::new(StandardFont::HelveticaOblique, theme.body_size, theme.muted);
        let text_top = rect.y + (rect.height - style.size) / 2.0;
        self.canvas
            .text(text, rect.x + rect.width / 2.0, text_top, style, TextAnchor::Center);
        self.advance(NOTICE_HEIGHT);
        Ok(())
    }

    /// Closes the last page, stamps footers on every page and serializes the
    /// document. Returns the bytes and the page count.
    pub fn finish(mut self, generated: &str) -> Result<(Vec<u8>, usize), PipelineError> {
        let last = std::mem::replace(&mut self.canvas, self.writer.canvas());
        self.writer.add_page(last)?;
        let total = self.writer.page_count();
        for index in 0..total {
            let footer = self.footer(index + 1, total, generated);
            self.writer.overlay(index, footer)?;
        }
        let bytes = self.writer.finish()?;
        Ok((bytes, total))
    }

    fn footer(&self, page: usize, total: usize, generated: &str) -> PageCanvas {
        let c = self.constraints();
        let theme = self.theme;
        let mut canvas = self.writer.canvas();
        let top = c.page_height - c.margins.bottom - c.footer_height + 10.0;
        let (left, right) = (c.content_left(), c.content_right());
        let style = TextStyle::regular(7.5, theme.muted);

        canvas.line((left, top), (right, top), theme.rule, 0.5);
        canvas.text(&self.profile.footer_text, left, top + 6.0, style, TextAnchor::Left);
        canvas.text(
            &format!("Page {} of {}", page, total),
            right,
            top + 6.0,
            TextStyle::bold(7.5, theme.secondary),
            TextAnchor::Right,
        );
        canvas.text(&self.profile.contact_line(), left, top + 17.0, style, TextAnchor::Left);
        canvas.text(
            &format!("Generated {}", generated),
            right,
            top + 17.0,
            style,
            TextAnchor::Right,
        );
        canvas
    }
}
