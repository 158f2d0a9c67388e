use quill_span::{Name, Span};
use quill_syntax_tree::{NodeOrToken, SyntaxNode, SyntaxToken};

/// Compares identifiers ignoring case, using full Unicode case folding.
pub fn names_equal_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// Selects the items named `name`.
///
/// Exact matches win. When there are none and the comparison is case
/// insensitive, items whose names differ only in case are returned.
pub fn select_by_name<'a, T: 'a>(
    items: impl IntoIterator<Item = &'a T>,
    name: &str,
    case_sensitive: bool,
    name_of: impl Fn(&T) -> &str,
) -> Vec<&'a T> {
    let items: Vec<&T> = items.into_iter().collect();
    let exact: Vec<&T> = items
        .iter()
        .copied()
        .filter(|item| name_of(*item) == name)
        .collect();

    if !exact.is_empty() || case_sensitive {
        return exact;
    }

    items
        .into_iter()
        .filter(|item| names_equal_ignore_case(name_of(*item), name))
        .collect()
}

/// The span of a node without its leading trivia.
pub fn get_node_span(node: &SyntaxNode) -> Span {
    let text_range = node.text_range();
    let end: usize = text_range.end().into();

    let start = find_first_non_trivia_start(node).unwrap_or_else(|| text_range.start().into());

    start..end
}

fn find_first_non_trivia_start(node: &SyntaxNode) -> Option<usize> {
    for child in node.children_with_tokens() {
        match child {
            NodeOrToken::Token(token) => {
                if !token.kind().is_trivia() {
                    return Some(token.text_range().start().into());
                }
            }
            NodeOrToken::Node(node) => {
                if let Some(start) = find_first_non_trivia_start(&node) {
                    return Some(start);
                }
            }
        }
    }
    None
}

pub fn get_token_span(token: &SyntaxToken) -> Span {
    let range = token.text_range();
    range.start().into()..range.end().into()
}

/// The text of an identifier token, with `[...]` or `"..."` quoting removed.
pub fn identifier_text(token: &SyntaxToken) -> String {
    let text = token.text();
    if let Some(inner) = text.strip_prefix('[').and_then(|t| t.strip_suffix(']')) {
        return inner.replace("]]", "]");
    }
    if let Some(inner) = text.strip_prefix('"').and_then(|t| t.strip_suffix('"')) {
        return inner.replace("\"\"", "\"");
    }
    text.to_string()
}

/// An identifier's unquoted text together with the span of its token.
pub fn identifier_name(token: &SyntaxToken) -> Name {
    Name::new(identifier_text(token), get_token_span(token))
}

/// The value of a string literal token, with quotes removed and doubled
/// quotes collapsed.
pub fn string_literal_value(text: &str) -> String {
    text.strip_prefix('\'')
        .and_then(|t| t.strip_suffix('\''))
        .unwrap_or(text)
        .replace("''", "'")
}
