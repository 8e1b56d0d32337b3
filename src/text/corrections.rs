/// Characters OCR engines emit in place of plain punctuation
const CORRECTIONS: &[(char, char)] = &[
    ('\u{2018}', '\''),
    ('\u{2019}', '\''),
    ('\u{201A}', '\''),
    ('\u{2032}', '\''),
    ('\u{201C}', '"'),
    ('\u{201D}', '"'),
    ('\u{201E}', '"'),
    ('\u{2013}', '-'),
    ('\u{2014}', '-'),
    ('\u{2212}', '-'),
    ('\u{00A0}', ' '),
    ('\u{00B7}', '.'),
];

fn correct_char(c: char) -> char {
    CORRECTIONS
        .iter()
        .find(|(from, _)| *from == c)
        .map(|(_, to)| *to)
        .unwrap_or(c)
}

/// Replace commonly misrecognized glyphs, leaving every other character as is
pub fn apply_corrections(text: &str) -> String {
    text.chars().map(correct_char).collect()
}
