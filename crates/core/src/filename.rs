use chrono::NaiveDate;
use slug::slugify;

fn slug_or(text: &str, fallback: &str) -> String {
    let slug = slugify(text);
    if slug.is_empty() { fallback.to_string() } else { slug }
}

/// `<title>_<owner>_<MM-DD-YYYY>.pdf`, with title and owner slugified.
pub fn document_filename(title: &str, owner: Option<&str>, date: NaiveDate) -> String {
    format!(
        "{}_{}_{}.pdf",
        slug_or(title, "document"),
        slug_or(owner.unwrap_or_default(), "report"),
        date.format("%m-%d-%Y")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn march_fifth() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 5).unwrap()
    }

    #[test]
    fn slugifies_title_and_owner() {
        assert_eq!(
            document_filename("Rent Collection Report", Some("Jane O'Neil & Sons"), march_fifth()),
            "rent-collection-report_jane-o-neil-sons_03-05-2025.pdf"
        );
    }

    #[test]
    fn falls_back_when_parts_are_empty() {
        assert_eq!(
            document_filename("  ", None, march_fifth()),
            "document_report_03-05-2025.pdf"
        );
        assert_eq!(
            document_filename("Invoice INV-7", Some("***"), march_fifth()),
            "invoice-inv-7_report_03-05-2025.pdf"
        );
    }
}
