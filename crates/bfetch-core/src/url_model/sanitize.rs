//! Filename sanitization for the output directory.

/// Linux NAME_MAX.
const NAME_MAX: usize = 255;

/// Makes `name` safe to create inside the output directory.
///
/// Separators, NUL and control characters become `_`; leading and trailing
/// dots and whitespace are trimmed so the name cannot escape or hide.
pub fn sanitize_filename(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    let trimmed = replaced.trim_matches(|c: char| c == '.' || c.is_whitespace());
    if trimmed.len() <= NAME_MAX {
        return trimmed.to_string();
    }
    let mut take = NAME_MAX;
    while !trimmed.is_char_boundary(take) {
        take -= 1;
    }
    trimmed[..take].to_string()
}
