//! Parsing `<path>:<line>:<text>` search output

use crate::{PresentationItem, SearchMatch};

/// Parse search-tool stdout into matches, keeping input order.
///
/// Lines whose description has `max_description_len` characters or more,
/// or whose line number is not a positive integer, are dropped.
pub fn parse_results(stdout: &str, max_description_len: usize) -> Vec<SearchMatch> {
    stdout
        .split('\n')
        .filter(|line| !line.is_empty())
        .filter_map(|line| parse_line(line, max_description_len))
        .collect()
}

fn parse_line(line: &str, max_description_len: usize) -> Option<SearchMatch> {
    let mut fields = line.splitn(3, ':');
    let full_path = fields.next()?;
    let line_number = parse_line_number(fields.next()?)?;
    let description = fields.next().unwrap_or_default().trim();

    if description.chars().count() >= max_description_len {
        return None;
    }

    Some(SearchMatch {
        full_path: full_path.to_string(),
        line_number,
        description: description.to_string(),
        raw_line: line.to_string(),
    })
}

/// Positive integers only; `0` never names a line the tool reports.
fn parse_line_number(field: &str) -> Option<u32> {
    field.trim().parse::<u32>().ok().filter(|n| *n > 0)
}

/// One presentation item per match, same order
pub fn to_presentation_items(matches: &[SearchMatch]) -> Vec<PresentationItem> {
    matches.iter().map(PresentationItem::from).collect()
}

/// Items whose label or description contains `query`, ignoring case
pub fn filter_items<'a>(items: &'a [PresentationItem], query: &str) -> Vec<&'a PresentationItem> {
    let query = query.trim().to_lowercase();
    items
        .iter()
        .filter(|item| {
            query.is_empty()
                || item.label.to_lowercase().contains(&query)
                || item.description.to_lowercase().contains(&query)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_MAX_DESCRIPTION_LEN;

    fn parse(stdout: &str) -> Vec<SearchMatch> {
        parse_results(stdout, DEFAULT_MAX_DESCRIPTION_LEN)
    }

    #[test]
    fn zero_line_numbers_are_rejected() {
        let matches = parse("src/a.ts:10:foo bar\nsrc/b.ts:0:baz");
        assert_eq!(
            matches,
            [SearchMatch {
                full_path: "src/a.ts".to_string(),
                line_number: 10,
                description: "foo bar".to_string(),
                raw_line: "src/a.ts:10:foo bar".to_string(),
            }]
        );
    }

    #[test]
    fn non_numeric_line_numbers_are_rejected() {
        assert!(parse("src/a.ts:ten:foo\nsrc/b.ts:-3:bar\nsrc/c.ts:1.5:baz\nnocolon").is_empty());
    }

    #[test]
    fn empty_output_yields_nothing() {
        assert!(parse("").is_empty());
        assert!(parse("\n\n").is_empty());
    }

    #[test]
    fn description_keeps_embedded_colons() {
        let matches = parse("lib/x.rs:3:  let url = \"http://a:b\";  ");
        assert_eq!(matches[0].description, "let url = \"http://a:b\";");
    }

    #[test]
    fn description_length_boundary_is_exclusive() {
        let at_limit = format!("a.rs:1:{}", "x".repeat(1000));
        let below_limit = format!("b.rs:2:{}", "x".repeat(999));
        let matches = parse(&format!("{at_limit}\n{below_limit}"));
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].full_path, "b.rs");
    }

    #[test]
    fn length_is_counted_in_characters() {
        let wide = format!("a.rs:1:{}", "é".repeat(999));
        assert_eq!(parse(&wide).len(), 1);
    }

    #[test]
    fn missing_description_is_empty() {
        let matches = parse("a.rs:7");
        assert_eq!(matches[0].description, "");
    }

    #[test]
    fn parsing_is_idempotent() {
        let stdout = "a/b.rs:1:one\nc.rs:2:two\nd.rs:0:zero\n";
        assert_eq!(parse(stdout), parse(stdout));
    }

    #[test]
    fn labels_use_basename_and_line() {
        let items = to_presentation_items(&parse("src/deep/dir/main.rs:42:fn main() {}"));
        assert_eq!(
            items,
            [PresentationItem {
                label: "main.rs : 42".to_string(),
                description: "fn main() {}".to_string(),
                detail: "src/deep/dir/main.rs".to_string(),
                line_number: 42,
            }]
        );
    }

    #[test]
    fn label_and_detail_recover_path_and_line() {
        let matches = parse("top.rs:5:a\nx/y/z.rs:12:b");
        for (item, original) in to_presentation_items(&matches).iter().zip(&matches) {
            let (_, line) = item.label.rsplit_once(" : ").expect("label separator");
            assert_eq!(item.detail, original.full_path);
            assert_eq!(line.parse::<u32>().ok(), Some(original.line_number));
        }
    }

    #[test]
    fn filter_matches_description_or_label_case_insensitively() {
        let items = to_presentation_items(&parse("a/one.rs:1:Alpha\nb/two.rs:2:beta\nc/three.rs:3:gamma"));
        let labels = |query| -> Vec<String> {
            filter_items(&items, query).iter().map(|i| i.label.clone()).collect()
        };
        assert_eq!(labels("ALPHA"), ["one.rs : 1"]);
        assert_eq!(labels("two.rs"), ["two.rs : 2"]);
        assert_eq!(labels("  ").len(), 3);
        assert!(labels("delta").is_empty());
    }
}
