//! Indentation-aware block scanning over raw lines.
//!
//! A line's block is every following line indented deeper than it. Blank
//! lines and comment-only lines never end a block. The one exception to the
//! "deeper" rule is YAML's indentless sequence: under a `key:` line, list
//! items may sit at the key's own indentation
//!
//! ```text
//! columns:
//! - name: id
//! - name: status
//! ```
//!
//! so a `- ` line at the key's indentation still belongs to the key.
//! Lookups only match direct children of the block (lines at the block's
//! first indentation), never lines nested further inside a sibling.

use super::buffer::LineBuffer;
use crate::schema::read_scalar;

/// What to look for among a block's direct children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Child<'a> {
    /// A `key:` line.
    Key(&'a str),
    /// A `- name: <name>` list item.
    Named(&'a str),
}

/// Number of leading whitespace characters of a line's content.
pub fn indent_of(content: &str) -> usize {
    content.len() - content.trim_start().len()
}

fn is_insignificant(stripped: &str) -> bool {
    stripped.is_empty() || stripped.starts_with('#')
}

fn is_list_item(stripped: &str) -> bool {
    stripped == "-" || stripped.starts_with("- ")
}

/// Find the first line whose stripped content starts with `key:`.
pub fn find_key_line(buffer: &LineBuffer, key: &str) -> Option<usize> {
    let prefix = format!("{}:", key);
    (0..buffer.len()).find(|&i| buffer.content(i).trim().starts_with(&prefix))
}

/// The value of a `- name: value` line, read as the parser reads names.
pub fn list_item_name(stripped: &str) -> Option<String> {
    stripped.strip_prefix("- name:").and_then(read_scalar)
}

/// Index one past the last line belonging to the block rooted at `parent`.
///
/// Trailing blank and comment lines are not counted as part of the block.
pub fn block_end(buffer: &LineBuffer, parent: usize) -> usize {
    let parent_content = buffer.content(parent);
    let parent_indent = indent_of(parent_content);
    let indentless_items = !is_list_item(parent_content.trim());

    let mut end = parent + 1;
    for i in parent + 1..buffer.len() {
        let content = buffer.content(i);
        let stripped = content.trim();
        if is_insignificant(stripped) {
            continue;
        }

        let indent = indent_of(content);
        let inside = indent > parent_indent
            || (indent == parent_indent && indentless_items && is_list_item(stripped));
        if !inside {
            break;
        }
        end = i + 1;
    }
    end
}

/// Find a direct child of the block rooted at line `parent`.
///
/// Scanning stops at the first significant line outside the block, so a
/// matching line further down the file, outside `parent`, is never returned.
pub fn find_child(buffer: &LineBuffer, parent: usize, child: Child<'_>) -> Option<usize> {
    if parent >= buffer.len() {
        return None;
    }

    let end = block_end(buffer, parent);
    let mut child_indent = None;

    for i in parent + 1..end {
        let content = buffer.content(i);
        let stripped = content.trim();
        if is_insignificant(stripped) {
            continue;
        }

        let indent = indent_of(content);
        let level = *child_indent.get_or_insert(indent);
        if indent != level {
            continue;
        }

        let matched = match child {
            Child::Key(key) => stripped
                .strip_prefix(key)
                .is_some_and(|rest| rest.starts_with(':')),
            Child::Named(name) => list_item_name(stripped).is_some_and(|n| n == name),
        };
        if matched {
            return Some(i);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA: &str = r#"version: 2

models:
  - name: orders
    description: one row per order
    columns:
      - name: id
        tests:
          - unique
      - name: status
        # the order lifecycle state
        description: "order status"
  - name: customers
    columns:
      - name: status
        description: customer status
"#;

    fn buffer() -> LineBuffer {
        LineBuffer::from_text(SCHEMA)
    }

    #[test]
    fn indent_counts_leading_whitespace() {
        assert_eq!(indent_of("    columns:"), 4);
        assert_eq!(indent_of("\t- name: x"), 1);
        assert_eq!(indent_of("models:"), 0);
    }

    #[test]
    fn finds_root_key() {
        assert_eq!(find_key_line(&buffer(), "models"), Some(2));
        assert_eq!(find_key_line(&buffer(), "sources"), None);
    }

    #[test]
    fn finds_named_children_in_order() {
        let b = buffer();
        assert_eq!(find_child(&b, 2, Child::Named("orders")), Some(3));
        assert_eq!(find_child(&b, 2, Child::Named("customers")), Some(12));
        assert_eq!(find_child(&b, 2, Child::Named("payments")), None);
    }

    #[test]
    fn finds_key_children() {
        let b = buffer();
        let columns = find_child(&b, 3, Child::Key("columns")).unwrap();
        assert_eq!(columns, 5);
        let status = find_child(&b, columns, Child::Named("status")).unwrap();
        assert_eq!(status, 9);
        assert_eq!(find_child(&b, status, Child::Key("description")), Some(11));
    }

    #[test]
    fn scan_stops_at_parent_indentation() {
        let b = buffer();
        // `id` has no description; the one below belongs to `status`.
        let columns = find_child(&b, 3, Child::Key("columns")).unwrap();
        let id = find_child(&b, columns, Child::Named("id")).unwrap();
        assert_eq!(find_child(&b, id, Child::Key("description")), None);
    }

    #[test]
    fn scan_never_leaves_the_parent_entry() {
        let text = "models:\n  - name: orders\n    columns:\n      - name: id\n  - name: customers\n    columns:\n      - name: status\n";
        let b = LineBuffer::from_text(text);
        let columns = find_child(&b, 1, Child::Key("columns")).unwrap();
        assert_eq!(find_child(&b, columns, Child::Named("status")), None);
    }

    #[test]
    fn nested_keys_are_not_direct_children() {
        let text = "- name: status\n  tests:\n    - accepted_values:\n        description: nested\n  meta:\n    owner: x\n";
        let b = LineBuffer::from_text(text);
        assert_eq!(find_child(&b, 0, Child::Key("description")), None);
        assert_eq!(find_child(&b, 0, Child::Key("meta")), Some(4));
    }

    #[test]
    fn key_prefix_must_be_whole_key() {
        let text = "- name: status\n  descriptions: x\n";
        let b = LineBuffer::from_text(text);
        assert_eq!(find_child(&b, 0, Child::Key("description")), None);
    }

    #[test]
    fn indentless_sequences_belong_to_their_key() {
        let text = "models:\n- name: orders\n  columns:\n  - name: id\n  - name: status\n  tests: []\n- name: other\n";
        let b = LineBuffer::from_text(text);
        let orders = find_child(&b, 0, Child::Named("orders")).unwrap();
        assert_eq!(orders, 1);
        let columns = find_child(&b, orders, Child::Key("columns")).unwrap();
        assert_eq!(find_child(&b, columns, Child::Named("status")), Some(4));
        assert_eq!(find_child(&b, 0, Child::Named("other")), Some(6));
        // A sibling item does not continue an item's own block.
        assert_eq!(block_end(&b, 4), 5);
    }

    #[test]
    fn quoted_names_match() {
        let text = "columns:\n  - name: \"status\"\n  - name: 'id' # pk\n";
        let b = LineBuffer::from_text(text);
        assert_eq!(find_child(&b, 0, Child::Named("status")), Some(1));
        assert_eq!(find_child(&b, 0, Child::Named("id")), Some(2));
    }

    #[test]
    fn non_string_names_match_their_parsed_form() {
        let text = "columns:\n  - name: 0x1A\n  - name: True\n  - name: 1e3\n";
        let b = LineBuffer::from_text(text);
        assert_eq!(find_child(&b, 0, Child::Named("26")), Some(1));
        assert_eq!(find_child(&b, 0, Child::Named("true")), Some(2));
        assert_eq!(find_child(&b, 0, Child::Named("1000.0")), Some(3));
        assert_eq!(find_child(&b, 0, Child::Named("0x1A")), None);
    }

    #[test]
    fn block_end_skips_trailing_blank_lines() {
        let text = "a:\n  b: 1\n\n# note\nc: 2\n";
        let b = LineBuffer::from_text(text);
        assert_eq!(block_end(&b, 0), 2);
    }

    #[test]
    fn parent_out_of_range_is_not_found() {
        let b = buffer();
        assert_eq!(find_child(&b, 999, Child::Key("columns")), None);
    }
}
