//! Space-saving variants of numbers and labels.

const UNITS: [(f64, char); 3] = [(1e9, 'B'), (1e6, 'M'), (1e3, 'K')];

/// `12_345_678.0` → `12.3M`, `1_200.0` → `1.2K`, `12_000.0` → `12K`, `950.0` → `950`.
pub fn compact_number(value: f64, decimal_separator: char) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }
    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();

    for (idx, (scale, suffix)) in UNITS.iter().enumerate() {
        if abs >= *scale {
            let scaled = abs / scale;
            let mut text = format!("{:.1}", scaled);
            // 999_950 rounds to "1000.0K"; promote it to the next unit instead.
            if text.starts_with("1000") && idx > 0 {
                let (next_scale, next_suffix) = UNITS[idx - 1];
                text = format!("{:.1}", abs / next_scale);
                return finish(sign, &text, next_suffix, decimal_separator);
            }
            return finish(sign, &text, *suffix, decimal_separator);
        }
    }
    let rounded = format!("{:.0}", abs);
    if rounded == "0" {
        return rounded;
    }
    format!("{}{}", sign, rounded)
}

fn finish(sign: &str, text: &str, suffix: char, decimal_separator: char) -> String {
    let trimmed = text.strip_suffix(".0").unwrap_or(text);
    let localized = trimmed.replace('.', &decimal_separator.to_string());
    format!("{}{}{}", sign, localized, suffix)
}

const ABBREVIATIONS: [(&str, &str); 12] = [
    ("percentage", "%"),
    ("management", "Mgmt"),
    ("maintenance", "Maint."),
    ("collection", "Coll."),
    ("outstanding", "O/S"),
    ("occupancy", "Occ."),
    ("expenses", "Exp."),
    ("average", "Avg"),
    ("number", "No."),
    ("amount", "Amt"),
    ("revenue", "Rev."),
    ("total", "Tot."),
];

/// Shortens a label by abbreviating common reporting words.
///
/// Returns `None` when nothing could be abbreviated.
pub fn compact_label(label: &str) -> Option<String> {
    let mut changed = false;
    let words: Vec<String> = label
        .split_whitespace()
        .map(|word| {
            let lower = word.to_lowercase();
            match ABBREVIATIONS.iter().find(|(long, _)| *long == lower) {
                Some((_, short)) => {
                    changed = true;
                    short.to_string()
                }
                None => word.to_string(),
            }
        })
        .collect();
    changed.then(|| words.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compacts_by_magnitude() {
        assert_eq!(compact_number(12_345_678.0, '.'), "12.3M");
        assert_eq!(compact_number(1_200.0, '.'), "1.2K");
        assert_eq!(compact_number(12_000.0, '.'), "12K");
        assert_eq!(compact_number(2_500_000_000.0, '.'), "2.5B");
        assert_eq!(compact_number(950.0, '.'), "950");
        assert_eq!(compact_number(-4_400.0, '.'), "-4.4K");
    }

    #[test]
    fn rounding_promotes_to_next_unit() {
        assert_eq!(compact_number(999_990.0, '.'), "1M");
    }

    #[test]
    fn abbreviates_labels() {
        assert_eq!(compact_label("Total Revenue").as_deref(), Some("Tot. Rev."));
        assert_eq!(compact_label("Occupancy Rate").as_deref(), Some("Occ. Rate"));
        assert_eq!(compact_label("Vacant Units"), None);
    }
}
