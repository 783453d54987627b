use crate::compose::Composer;
use crate::document::LetterContent;
use crate::documents::invoice::display_date;
use crate::error::PipelineError;
use folio_render_lopdf::{TextAnchor, TextStyle};

const SIGNATURE_SPACE: f32 = 30.0;

/// Date, recipient, subject, then the body paragraphs flowing across pages.
pub fn compose_letter(c: &mut Composer, letter: &LetterContent, today: &str) -> Result<(), PipelineError> {
    let theme = *c.theme();
    let body = TextStyle::regular(theme.body_size, theme.text);
    let strong = TextStyle::bold(theme.body_size, theme.text);

    let date = match &letter.date {
        Some(raw) => display_date(c.formatter(), raw),
        None => today.to_string(),
    };
    c.line(&date, body, TextAnchor::Right)?;
    c.gap(theme.block_gap);

    c.line(&letter.recipient.name, strong, TextAnchor::Left)?;
    if let Some(address) = &letter.recipient.address {
        for line in address.lines().map(str::trim).filter(|l| !l.is_empty()) {
            c.line(line, body, TextAnchor::Left)?;
        }
    }
    c.gap(theme.section_gap);

    if let Some(subject) = letter.subject.as_deref().filter(|s| !s.trim().is_empty()) {
        c.paragraph(&format!("Re: {}", subject), strong, 0.0)?;
        c.gap(theme.block_gap);
    }

    let salutation = letter
        .salutation
        .clone()
        .unwrap_or_else(|| format!("Dear {},", letter.recipient.name));
    c.line(&salutation, body, TextAnchor::Left)?;
    c.gap(theme.block_gap);

    for paragraph in letter.body.iter().filter(|p| !p.trim().is_empty()) {
        c.paragraph(paragraph, body, 0.0)?;
        c.gap(theme.block_gap);
    }

    let closing = letter.closing.as_deref().unwrap_or("Yours sincerely,");
    let signatory = letter
        .signatory
        .clone()
        .unwrap_or_else(|| c.profile().company_name.clone());
    let line = theme.line(theme.body_size);
    c.ensure(line * 2.0 + SIGNATURE_SPACE, false)?;
    c.line(closing, body, TextAnchor::Left)?;
    c.advance(SIGNATURE_SPACE);
    c.line(&signatory, strong, TextAnchor::Left)?;
    Ok(())
}
