//! Skill-name normalization — reduces a raw name to its comparison key.

/// Reduces a raw skill name to the key used for equality comparison between
/// profile and target lists. Lower-cases the whole string, removes every
/// parenthesized span (non-greedy, parentheses included), and trims. Keys are
/// only compared, never displayed.
///
/// A `(` with no later `)` is left in place along with everything after it.
/// No Unicode normalization, no punctuation stripping beyond parentheses.
pub fn normalize(name: &str) -> String {
    let lower = name.to_lowercase();
    let mut out = String::with_capacity(lower.len());
    let mut rest = lower.as_str();

    while let Some(open) = rest.find('(') {
        match rest[open..].find(')') {
            Some(close) => {
                out.push_str(&rest[..open]);
                rest = &rest[open + close + 1..];
            }
            // Unbalanced: no match, no removal.
            None => break,
        }
    }
    out.push_str(rest);

    out.trim().to_string()
}
