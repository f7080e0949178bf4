use scraper::Html;

/// Strip markup from `input` and collapse all whitespace runs to single
/// spaces. Malformed markup is handled best-effort by the HTML5 parser; the
/// worst case is that tag soup comes through as text. Empty input yields an
/// empty string.
pub fn normalize(input: &str) -> String {
    if input.trim().is_empty() {
        return String::new();
    }

    let fragment = Html::parse_fragment(input);
    let extracted: String = fragment
        .root_element()
        .text()
        .collect::<Vec<_>>()
        .join(" ");

    collapse_whitespace(&extracted)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
