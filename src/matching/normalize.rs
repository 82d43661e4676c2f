/// Removes every whitespace code point, including full-width spaces, tabs and newlines.
pub fn remove_all_space(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Canonical form of a title used for comparisons.
///
/// Drops everything from the first `#`, strips `(...)` and `[...]` groups
/// (nested ones included), removes whitespace and lower-cases the rest.
pub fn normalize_title(s: &str) -> String {
    let mut s = s.trim();
    if let Some(index) = s.find('#') {
        s = &s[..index];
    }

    let s = strip_groups(s, '(', ')');
    let s = strip_groups(&s, '[', ']');

    remove_all_space(&s).to_lowercase()
}

/// Repeatedly removes innermost `open ... close` groups until nothing changes.
///
/// Each pass only removes groups that contain no further `open`/`close` of the
/// same kind, so `(a(b)c)` needs two passes. The pass count is capped at the
/// input length, which is more than any balanced nesting can require.
pub fn strip_groups(s: &str, open: char, close: char) -> String {
    let mut current = s.to_string();
    let max_passes = s.chars().count();

    for _ in 0..max_passes {
        let next = strip_innermost_groups(&current, open, close);
        if next == current {
            break;
        }
        current = next;
    }

    current
}

/// One linear pass removing every `open` immediately followed (without another
/// `open` or `close` in between) by a `close`, together with its contents.
fn strip_innermost_groups(s: &str, open: char, close: char) -> String {
    let mut out = String::with_capacity(s.len());
    // Byte offset into `out` of the most recent unmatched `open`.
    let mut pending_open: Option<usize> = None;

    for c in s.chars() {
        if c == open {
            pending_open = Some(out.len());
            out.push(c);
        } else if c == close {
            match pending_open.take() {
                Some(start) => out.truncate(start),
                None => out.push(c),
            }
        } else {
            out.push(c);
        }
    }

    out
}
