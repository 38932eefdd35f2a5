//! Best-effort attribute parsing for code fence info lines.
//!
//! The grammar is whitespace-separated tokens of the shape `name`,
//! `name="value"` or `name='value'`. Anything that does not match stays in
//! the residual; parsing never fails.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static ATTR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z_][A-Za-z0-9_-]*)(?:=(?:"([^"]*)"|'([^']*)'|([^'"\s]\S*)))?"#).unwrap()
});

/// Attributes parsed from a fence info line.
///
/// A `None` value marks a flag given without `=value`. Duplicate names keep
/// the last occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AttributeBag(BTreeMap<String, Option<String>>);

impl AttributeBag {
    /// Whether the bag holds no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Look up an attribute.
    ///
    /// Returns `None` when absent, `Some(None)` for a valueless flag and
    /// `Some(Some(value))` otherwise.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Option<&str>> {
        self.0.get(name).map(Option::as_deref)
    }

    /// Insert an attribute, replacing any previous value for the name.
    pub fn insert(&mut self, name: impl Into<String>, value: Option<String>) {
        self.0.insert(name.into(), value);
    }

    /// Iterate attributes in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    /// Serialize the bag as a JSON object (`null` for flags).
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("serialize attribute bag")
    }
}

impl FromIterator<(String, Option<String>)> for AttributeBag {
    fn from_iter<I: IntoIterator<Item = (String, Option<String>)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Parse attributes out of a fence info line.
///
/// Returns the parsed bag and the residual: whatever did not match, with
/// whitespace normalized and trimmed. Tokens with malformed quoting (an
/// unterminated quote) are left in the residual rather than parsed.
#[must_use]
pub fn parse_meta(meta: &str) -> (AttributeBag, String) {
    let mut bag = AttributeBag::default();
    let mut consumed: Vec<(usize, usize)> = Vec::new();

    for captures in ATTR_PATTERN.captures_iter(meta) {
        let matched = captures.get(0).expect("whole match");

        // Accept only matches anchored at token boundaries, so fragments
        // inside larger tokens are never split out.
        let before_ok = matched.start() == 0
            || meta[..matched.start()]
                .chars()
                .next_back()
                .is_some_and(char::is_whitespace);
        let after_ok = matched.end() == meta.len()
            || meta[matched.end()..]
                .chars()
                .next()
                .is_some_and(char::is_whitespace);
        if !before_ok || !after_ok {
            continue;
        }

        let name = &captures[1];
        let value = captures
            .get(2)
            .or_else(|| captures.get(3))
            .or_else(|| captures.get(4))
            .map(|m| m.as_str().to_owned());
        bag.insert(name, value);
        consumed.push((matched.start(), matched.end()));
    }

    let mut residual = String::new();
    let mut cursor = 0usize;
    for (start, end) in consumed {
        residual.push_str(&meta[cursor..start]);
        cursor = end;
    }
    residual.push_str(&meta[cursor..]);
    let residual = residual.split_whitespace().collect::<Vec<_>>().join(" ");

    (bag, residual)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn bag(entries: &[(&str, Option<&str>)]) -> AttributeBag {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_owned(), v.map(ToOwned::to_owned)))
            .collect()
    }

    #[test]
    fn test_parse_mixed_tokens() {
        let (parsed, residual) = parse_meta(r#"a="1" b c="x y""#);

        assert_eq!(
            parsed,
            bag(&[("a", Some("1")), ("b", None), ("c", Some("x y"))])
        );
        assert_eq!(residual, "");
    }

    #[test]
    fn test_parse_single_quoted_value() {
        let (parsed, residual) = parse_meta("curve='basis'");

        assert_eq!(parsed, bag(&[("curve", Some("basis"))]));
        assert_eq!(residual, "");
    }

    #[test]
    fn test_parse_unquoted_value() {
        let (parsed, residual) = parse_meta("rowHeight=40");

        assert_eq!(parsed, bag(&[("rowHeight", Some("40"))]));
        assert_eq!(residual, "");
    }

    #[test]
    fn test_unterminated_quote_stays_in_residual() {
        let (parsed, residual) = parse_meta(r#"a="1" c="x y"#);

        // `c="x` is malformed and stays put; the trailing `y` is a
        // well-formed flag token on its own.
        assert_eq!(parsed, bag(&[("a", Some("1")), ("y", None)]));
        assert_eq!(residual, r#"c="x"#);
    }

    #[test]
    fn test_duplicate_name_last_wins() {
        let (parsed, _) = parse_meta(r#"theme="dark" theme="forest""#);

        assert_eq!(parsed, bag(&[("theme", Some("forest"))]));
    }

    #[test]
    fn test_fragment_inside_larger_token_not_split() {
        let (parsed, residual) = parse_meta("{a=1} b");

        assert_eq!(parsed, bag(&[("b", None)]));
        assert_eq!(residual, "{a=1}");
    }

    #[test]
    fn test_empty_meta() {
        let (parsed, residual) = parse_meta("");

        assert!(parsed.is_empty());
        assert_eq!(residual, "");
    }

    #[test]
    fn test_residual_whitespace_normalized() {
        let (parsed, residual) = parse_meta("  {1-3}   a=\"1\"   {5}  ");

        assert_eq!(parsed, bag(&[("a", Some("1"))]));
        assert_eq!(residual, "{1-3} {5}");
    }

    #[test]
    fn test_empty_quoted_value_is_not_flag() {
        let (parsed, _) = parse_meta(r#"label="""#);

        assert_eq!(parsed.get("label"), Some(Some("")));
    }

    #[test]
    fn test_to_json_uses_null_for_flags() {
        let (parsed, _) = parse_meta(r#"a="1" b"#);

        assert_eq!(parsed.to_json(), r#"{"a":"1","b":null}"#);
    }
}
