use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static GROUP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(([^)]+)\)").expect("valid regex"));

const GROUP_SEPARATOR: &str = ") and (";
const OR_SEPARATOR: &str = " or ";

/// Parse a tag-group expression such as `(("sport" or "outdoor") and
/// ("sale"))` into AND-ed groups of OR-ed tags.
///
/// The grammar is forgiving: a bare `"a" or "b"` clause yields a single
/// group, and anything without recognizable structure degrades to a plain
/// comma list, so the function is total and never rejects input.
pub fn parse_tag_groups(expression: &str) -> Vec<Vec<String>> {
    let mut groups: Vec<Vec<String>> = Vec::new();

    // Strip up to two layers of outer parentheses, one at a time. The
    // group splitter below repairs fragments that lose a paren this way.
    let mut inner = expression.trim();
    for _ in 0..2 {
        if inner.len() >= 2 && inner.starts_with('(') && inner.ends_with(')') {
            inner = &inner[1..inner.len() - 1];
        }
    }

    if inner.contains(GROUP_SEPARATOR) {
        let parts: Vec<&str> = inner.split(GROUP_SEPARATOR).filter(|p| !p.is_empty()).collect();
        let last = parts.len().saturating_sub(1);
        for (index, part) in parts.iter().enumerate() {
            let mut part = *part;
            if index == 0 {
                part = part.strip_prefix('(').unwrap_or(part);
            }
            if index == last {
                part = part.strip_suffix(')').unwrap_or(part);
            }
            push_group(&mut groups, split_or_clause(part));
        }
    } else {
        for capture in GROUP_RE.captures_iter(inner) {
            push_group(&mut groups, split_or_clause(&capture[1]));
        }
        if groups.is_empty() {
            if inner.contains(OR_SEPARATOR) {
                push_group(&mut groups, split_or_clause(inner));
            } else {
                push_group(&mut groups, split_comma_list(inner));
            }
        }
    }

    debug!(group_count = groups.len(), "parsed tag expression");
    groups
}

fn push_group(groups: &mut Vec<Vec<String>>, tags: Vec<String>) {
    if !tags.is_empty() {
        groups.push(tags);
    }
}

fn split_or_clause(clause: &str) -> Vec<String> {
    clause
        .split(OR_SEPARATOR)
        .map(clean_tag)
        .filter(|tag| !tag.is_empty())
        .collect()
}

fn split_comma_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(clean_tag)
        .filter(|tag| !tag.is_empty())
        .collect()
}

fn clean_tag(raw: &str) -> String {
    raw.trim().trim_matches(|c| c == '"' || c == '\'').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(expression: &str) -> Vec<Vec<String>> {
        parse_tag_groups(expression)
    }

    fn groups(raw: &[&[&str]]) -> Vec<Vec<String>> {
        raw.iter()
            .map(|group| group.iter().map(|t| t.to_string()).collect())
            .collect()
    }

    #[test]
    fn parses_full_grammar() {
        assert_eq!(
            parse(r#"(("sport" or "outdoor") and ("sale"))"#),
            groups(&[&["sport", "outdoor"], &["sale"]])
        );
    }

    #[test]
    fn parses_three_groups() {
        assert_eq!(
            parse(r#"(("378" or "373" or "43384") and ("32973" or "384") and ("737"))"#),
            groups(&[&["378", "373", "43384"], &["32973", "384"], &["737"]])
        );
    }

    #[test]
    fn tolerates_a_stray_trailing_paren() {
        assert_eq!(
            parse(r#"(("a" or "b") and ("c")))"#),
            groups(&[&["a", "b"], &["c"]])
        );
    }

    #[test]
    fn parses_single_group_single_tag() {
        assert_eq!(parse(r#"(("outdoor"))"#), groups(&[&["outdoor"]]));
    }

    #[test]
    fn parses_bare_or_clause() {
        assert_eq!(parse(r#""a" or "b""#), groups(&[&["a", "b"]]));
    }

    #[test]
    fn parses_embedded_groups_without_and() {
        assert_eq!(
            parse(r#"tagged ("a" or "b") pages ("c")"#),
            groups(&[&["a", "b"], &["c"]])
        );
    }

    #[test]
    fn falls_back_to_comma_list() {
        assert_eq!(parse("a,b,c"), groups(&[&["a", "b", "c"]]));
        assert_eq!(parse(" winter , boots "), groups(&[&["winter", "boots"]]));
    }

    #[test]
    fn strips_single_and_double_quotes() {
        assert_eq!(parse(r#"('x' or "y")"#), groups(&[&["x", "y"]]));
    }

    #[test]
    fn empty_input_yields_no_groups() {
        assert_eq!(parse(""), Vec::<Vec<String>>::new());
        assert_eq!(parse("   "), Vec::<Vec<String>>::new());
    }

    #[test]
    fn unbalanced_parens_degrade_to_a_literal_token() {
        assert_eq!(parse("(((("), groups(&[&["(((("]]));
    }

    #[test]
    fn drops_empty_groups_and_tags() {
        assert_eq!(
            parse(r#"(("a" or ) and ("b"))"#),
            groups(&[&["a"], &["b"]])
        );
        assert_eq!(parse("a,,b"), groups(&[&["a", "b"]]));
    }

    #[test]
    fn reparsing_the_canonical_form_is_stable() {
        let cases = [
            r#"(("sport" or "outdoor") and ("sale"))"#,
            r#"(("a" or "b") and ("c")))"#,
            "winter,boots",
            r#"(("outdoor"))"#,
        ];
        for case in cases {
            let first = parse(case);
            let canonical = format!(
                "(({}))",
                first
                    .iter()
                    .map(|group| group.join(" or "))
                    .collect::<Vec<_>>()
                    .join(") and (")
            );
            assert_eq!(parse(&canonical), first, "canonical reparse of {case:?}");
        }
    }
}
