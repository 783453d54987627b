use crate::compose::Composer;
use crate::error::PipelineError;
use folio_render_lopdf::{TextAnchor, TextStyle};
use folio_style::StandardFont;
use folio_types::Rect;

const UNDERLINE_WIDTH: f32 = 56.0;
const UNDERLINE_HEIGHT: f32 = 3.0;

/// Document title with an accent underline, followed by an optional muted subtitle.
pub fn render_title(c: &mut Composer, title: &str, subtitle: &str) -> Result<(), PipelineError> {
    let theme = *c.theme();
    let title_style = TextStyle::bold(theme.title_size, theme.text);
    let subtitle_height = if subtitle.trim().is_empty() {
        0.0
    } else {
        theme.line(theme.body_size)
    };
    let height = theme.line(theme.title_size) + UNDERLINE_HEIGHT + 6.0 + subtitle_height;
    c.ensure(height, false)?;

    let (x, y) = (c.left(), c.y());
    c.canvas().text(title, x, y, title_style, TextAnchor::Left);
    c.advance(theme.line(theme.title_size));

    let underline_width = title_style.width(title).clamp(UNDERLINE_WIDTH.min(c.width()), UNDERLINE_WIDTH * 2.0);
    let underline = Rect::new(x, c.y(), underline_width.min(c.width()), UNDERLINE_HEIGHT);
    c.canvas().fill_rect(underline, theme.primary);
    c.advance(UNDERLINE_HEIGHT + 6.0);

    if subtitle_height > 0.0 {
        let style = TextStyle::new(StandardFont::HelveticaOblique, theme.body_size, theme.muted);
        c.line(subtitle, style, TextAnchor::Left)?;
    }
    c.gap(theme.section_gap);
    Ok(())
}

/// Narrative paragraph under the title. Empty summaries draw nothing.
pub fn render_summary(c: &mut Composer, summary: &str) -> Result<(), PipelineError> {
    if summary.trim().is_empty() {
        return Ok(());
    }
    let theme = *c.theme();
    c.heading("Summary", theme.line(theme.body_size) * 2.0)?;
    c.paragraph(summary, TextStyle::regular(theme.body_size, theme.text), 0.0)?;
    c.gap(theme.section_gap);
    Ok(())
}
