use lopdf::{Document as LopdfDocument, Object};

/// Extract all text content from a PDF document
pub fn extract_text(doc: &LopdfDocument) -> String {
    let mut text = String::new();
    let pages = doc.get_pages();
    for page_num in 1..=pages.len() {
        if let Ok(page_text) = doc.extract_text(&[page_num as u32]) {
            text.push_str(&page_text);
            text.push('\n');
        }
    }
    text
}

/// Count image XObjects stored in the document
#[allow(dead_code)]
pub fn count_images(doc: &LopdfDocument) -> usize {
    doc.objects
        .values()
        .filter(|object| match object {
            Object::Stream(stream) => stream
                .dict
                .get(b"Subtype")
                .and_then(|s| s.as_name())
                .map(|name| name == b"Image")
                .unwrap_or(false),
            _ => false,
        })
        .count()
}

/// Where an image was painted: page number, then the `cm` matrix origin and width
/// in effect at its `Do`.
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImagePlacement {
    pub page: u32,
    pub x: f32,
    pub y: f32,
    pub width: f32,
}

/// Image placements in page order, read back from the content streams
#[allow(dead_code)]
pub fn image_placements(doc: &LopdfDocument) -> Vec<ImagePlacement> {
    let mut placements = Vec::new();
    for (page, page_id) in doc.get_pages() {
        let Ok(bytes) = doc.get_page_content(page_id) else {
            continue;
        };
        let Ok(content) = lopdf::content::Content::decode(&bytes) else {
            continue;
        };
        let mut matrix = [0.0f32; 6];
        for op in &content.operations {
            match op.operator.as_str() {
                "cm" if op.operands.len() == 6 => {
                    for (slot, operand) in matrix.iter_mut().zip(&op.operands) {
                        *slot = operand.as_float().unwrap_or(0.0);
                    }
                }
                "Do" => placements.push(ImagePlacement {
                    page,
                    x: matrix[4],
                    y: matrix[5],
                    width: matrix[0],
                }),
                _ => {}
            }
        }
    }
    placements
}

/// Occurrences of `needle` across every page
#[allow(dead_code)]
pub fn count_text(doc: &LopdfDocument, needle: &str) -> usize {
    extract_text(doc).matches(needle).count()
}

/// Assert that PDF contains specific text
#[macro_export]
macro_rules! assert_pdf_contains_text {
    ($pdf:expr, $text:expr) => {
        let extracted = $crate::common::pdf_assertions::extract_text(&$pdf.doc);
        assert!(
            extracted.contains($text),
            "PDF should contain '{}', but extracted text was:\n{}",
            $text,
            extracted
        );
    };
}

/// Assert that PDF does NOT contain specific text
#[macro_export]
macro_rules! assert_pdf_not_contains_text {
    ($pdf:expr, $text:expr) => {
        let extracted = $crate::common::pdf_assertions::extract_text(&$pdf.doc);
        assert!(
            !extracted.contains($text),
            "PDF should NOT contain '{}', but it was found in:\n{}",
            $text,
            extracted
        );
    };
}

/// Assert the number of pages in a PDF
#[macro_export]
macro_rules! assert_pdf_page_count {
    ($pdf:expr, $count:expr) => {
        assert_eq!(
            $pdf.page_count(),
            $count,
            "Expected {} pages, got {}",
            $count,
            $pdf.page_count()
        );
    };
}

/// Assert minimum number of pages
#[macro_export]
macro_rules! assert_pdf_min_pages {
    ($pdf:expr, $min:expr) => {
        assert!(
            $pdf.page_count() >= $min,
            "Expected at least {} pages, got {}",
            $min,
            $pdf.page_count()
        );
    };
}
