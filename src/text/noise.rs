/// Whether a string carries enough text to be worth translating.
///
/// Single characters and strings without any alphabetic character (page numbers,
/// prices, bullet glyphs) are passed through untouched instead.
pub fn should_translate(text: &str) -> bool {
    let stripped = text.trim();
    if stripped.chars().count() <= 1 {
        return false;
    }
    stripped.chars().any(char::is_alphabetic)
}
