//! WinAnsi (CP1252) encoding for the standard Type1 fonts.

/// Encodes `s` for a `WinAnsiEncoding` font. Characters outside the code page become `?`.
pub fn to_win_ansi(s: &str) -> Vec<u8> {
    s.chars().map(encode_char).collect()
}

fn encode_char(c: char) -> u8 {
    match c {
        '\u{20AC}' => 0x80,
        '\u{201A}' => 0x82,
        '\u{201E}' => 0x84,
        '\u{2026}' => 0x85,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{2122}' => 0x99,
        // Only Latin-1 maps onto itself; 0x80..0x9F are reassigned above.
        c if (c as u32) < 0x80 || (0xA0..=0xFF).contains(&(c as u32)) => c as u8,
        _ => b'?',
    }
}
