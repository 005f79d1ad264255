//! Text rendering utilities for human-friendly diagnostics.
//!
//! Used by the container to shorten type names in error messages and
//! to suggest registered names when a lookup misses.

/// Renders a list of names as a single comma separated string.
///
/// # Examples
/// ```
/// use sidi_support::rendering::render_names;
///
/// assert_eq!(render_names(&["db", "logger", "mailer"]), "db, logger, mailer");
/// assert_eq!(render_names::<&str>(&[]), "");
/// ```
pub fn render_names<S: AsRef<str>>(names: &[S]) -> String {
    names
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Shortens a fully qualified type name for display.
///
/// Every path keeps only its last segment; generic brackets, commas,
/// references and `dyn` are left in place.
///
/// ```
/// use sidi_support::rendering::shorten_type_name;
///
/// assert_eq!(shorten_type_name("app::widgets::Widget"), "Widget");
/// assert_eq!(
///     shorten_type_name("alloc::sync::Arc<dyn app::Logger>"),
///     "Arc<dyn Logger>"
/// );
/// assert_eq!(
///     shorten_type_name("std::collections::hash::map::HashMap<alloc::string::String, u32>"),
///     "HashMap<String, u32>"
/// );
/// ```
pub fn shorten_type_name(full_name: &str) -> String {
    let mut out = String::with_capacity(full_name.len());
    let mut start = 0;

    for (idx, ch) in full_name.char_indices() {
        if matches!(ch, '<' | '>' | ',' | ' ' | '&' | '(' | ')' | '[' | ']' | ';') {
            out.push_str(last_segment(&full_name[start..idx]));
            out.push(ch);
            start = idx + ch.len_utf8();
        }
    }
    out.push_str(last_segment(&full_name[start..]));
    out
}

fn last_segment(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}

/// Suggests registered names that look like `requested`.
///
/// Matching is case-insensitive. Substring matches rank first, then
/// names within a small edit distance. At most `max_suggestions` names
/// are returned, best match first.
///
/// ```
/// use sidi_support::rendering::suggest_similar;
///
/// let registered = ["widget", "widget_pool", "logger"];
/// let found = suggest_similar("widgit", &registered, 2);
/// assert_eq!(found[0], "widget");
/// ```
pub fn suggest_similar<S: AsRef<str>>(
    requested: &str,
    available: &[S],
    max_suggestions: usize,
) -> Vec<String> {
    let wanted = requested.to_lowercase();
    if wanted.is_empty() {
        return Vec::new();
    }
    let tolerance = (wanted.chars().count() / 3).max(1);

    let mut scored: Vec<(usize, &str)> = available
        .iter()
        .map(|name| name.as_ref())
        .filter(|name| *name != requested)
        .filter_map(|name| {
            let lower = name.to_lowercase();
            if lower.contains(&wanted) || wanted.contains(&lower) {
                return Some((0, name));
            }
            let distance = edit_distance(&lower, &wanted);
            (distance <= tolerance).then_some((distance, name))
        })
        .collect();

    scored.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));
    scored
        .into_iter()
        .take(max_suggestions)
        .map(|(_, name)| name.to_string())
        .collect()
}

/// Levenshtein distance over chars, single row.
fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();

    for (i, ca) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let above = row[j + 1];
            let cost = usize::from(ca != *cb);
            row[j + 1] = (above + 1).min(row[j] + 1).min(diagonal + cost);
            diagonal = above;
        }
    }
    row[b.len()]
}
