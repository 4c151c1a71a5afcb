//! Text clean-up for the PDF builtin fonts.
//!
//! The builtin fonts only cover a single-byte encoding, so everything is
//! folded to printable ASCII before layout. Measuring and drawing the same
//! folded string keeps wrap widths honest.

/// Folds typographic punctuation and Latin-1 letters to ASCII.
/// Anything else unprintable becomes `?`.
pub fn fold_to_ascii(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            ' '..='~' => out.push(c),
            '\t' | '\n' | '\r' | '\u{00A0}' => out.push(' '),
            '\u{2010}'..='\u{2015}' | '\u{2212}' => out.push('-'),
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{2032}' => out.push('\''),
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{2033}' => out.push('"'),
            '\u{2022}' | '\u{00B7}' => out.push('*'),
            '\u{2026}' => out.push_str("..."),
            '\u{2122}' => out.push_str("TM"),
            '\u{00A9}' => out.push_str("(c)"),
            '\u{00AE}' => out.push_str("(R)"),
            '\u{20AC}' => out.push_str("EUR"),
            '\u{00DF}' => out.push_str("ss"),
            '\u{00C6}' => out.push_str("AE"),
            '\u{00E6}' => out.push_str("ae"),
            _ => out.push(fold_letter(c).unwrap_or('?')),
        }
    }
    out
}

fn fold_letter(c: char) -> Option<char> {
    let folded = match c {
        'À'..='Å' => 'A',
        'à'..='å' => 'a',
        'Ç' => 'C',
        'ç' => 'c',
        'È'..='Ë' => 'E',
        'è'..='ë' => 'e',
        'Ì'..='Ï' => 'I',
        'ì'..='ï' => 'i',
        'Ñ' => 'N',
        'ñ' => 'n',
        'Ò'..='Ö' | 'Ø' => 'O',
        'ò'..='ö' | 'ø' => 'o',
        'Ù'..='Ü' => 'U',
        'ù'..='ü' => 'u',
        'Ý' => 'Y',
        'ý' | 'ÿ' => 'y',
        _ => return None,
    };
    Some(folded)
}
