//! Parameter descriptions
//!
//! Renders each parameter of a function as a short string: the identifier,
//! `{a, b}` for object destructuring, `[a, _, c]` for array destructuring,
//! `...rest` for rest parameters and `complex` for anything else.

use tree_sitter::Node;

/// Fallback for parameter shapes without a readable name
pub const COMPLEX: &str = "complex";

/// Placeholder for an elided array element
pub const HOLE: &str = "_";

/// Describe the parameters of a function, arrow function or method node
pub fn describe_params(function: Node, source: &[u8]) -> Vec<String> {
    // `x => ...` has a bare identifier instead of a parameter list
    if let Some(single) = function.child_by_field_name("parameter") {
        return vec![describe_pattern(single, source)];
    }

    let Some(params) = function.child_by_field_name("parameters") else {
        return Vec::new();
    };

    let mut cursor = params.walk();
    params
        .named_children(&mut cursor)
        .filter(|p| p.kind() != "comment")
        .map(|p| describe_param(p, source))
        .collect()
}

fn describe_param(param: Node, source: &[u8]) -> String {
    match param.kind() {
        // TypeScript wraps the binding together with its type annotation
        "required_parameter" | "optional_parameter" => match param.child_by_field_name("pattern") {
            Some(pattern) => describe_pattern(pattern, source),
            None => COMPLEX.to_string(),
        },
        _ => describe_pattern(param, source),
    }
}

fn describe_pattern(node: Node, source: &[u8]) -> String {
    match node.kind() {
        "identifier" | "shorthand_property_identifier_pattern" | "this" => text(node, source),
        "assignment_pattern" | "object_assignment_pattern" => node
            .child_by_field_name("left")
            .map(|left| describe_pattern(left, source))
            .unwrap_or_else(|| COMPLEX.to_string()),
        "rest_pattern" => {
            let mut cursor = node.walk();
            let inner = node
                .named_children(&mut cursor)
                .find(|c| c.kind() != "type_annotation")
                .map(|c| describe_pattern(c, source))
                .unwrap_or_else(|| COMPLEX.to_string());
            format!("...{}", inner)
        }
        "object_pattern" => {
            let mut cursor = node.walk();
            let fields: Vec<String> = node
                .named_children(&mut cursor)
                .filter_map(|field| match field.kind() {
                    "pair_pattern" => field.child_by_field_name("key").map(|k| text(k, source)),
                    "comment" => None,
                    _ => Some(describe_pattern(field, source)),
                })
                .collect();
            format!("{{{}}}", fields.join(", "))
        }
        "array_pattern" => {
            // Positional: each element ends at a comma, holes become `_`
            let mut items = Vec::new();
            let mut current = None;
            let mut cursor = node.walk();
            for child in node.children(&mut cursor) {
                match child.kind() {
                    "," => items.push(current.take().unwrap_or_else(|| HOLE.to_string())),
                    "]" => items.extend(current.take()),
                    "[" | "comment" => {}
                    _ => current = Some(describe_pattern(child, source)),
                }
            }
            format!("[{}]", items.join(", "))
        }
        _ => COMPLEX.to_string(),
    }
}

fn text(node: Node, source: &[u8]) -> String {
    node.utf8_text(source).unwrap_or(COMPLEX).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::{Language, SourceParser};

    /// Parameters of the first function-like node in `code`
    fn params_of(code: &str, language: Language) -> Vec<String> {
        let mut parser = SourceParser::new(10_000).unwrap();
        let tree = parser.parse("t", language, code).unwrap();
        let root = tree.root_node();
        let node = find(root).expect("no function in fixture");
        describe_params(node, code.as_bytes())
    }

    fn find(node: Node) -> Option<Node> {
        if matches!(node.kind(), "function_declaration" | "arrow_function") {
            return Some(node);
        }
        let mut cursor = node.walk();
        let children: Vec<Node> = node.children(&mut cursor).collect();
        children.into_iter().find_map(find)
    }

    #[test]
    fn test_plain_and_default_params() {
        assert_eq!(
            params_of("function f(a, b = 2) {}", Language::JavaScript),
            vec!["a", "b"]
        );
    }

    #[test]
    fn test_destructured_params() {
        assert_eq!(
            params_of(
                "function Card({ title, user: u, size = 'm', ...rest }, [first, , third]) {}",
                Language::JavaScript
            ),
            vec!["{title, user, size, ...rest}", "[first, _, third]"]
        );
    }

    #[test]
    fn test_array_pattern_keeps_positions() {
        assert_eq!(
            params_of("function pick([, second], [a, b = 1, ...tail], [x, ]) {}", Language::JavaScript),
            vec!["[_, second]", "[a, b, ...tail]", "[x]"]
        );
    }

    #[test]
    fn test_rest_param() {
        assert_eq!(
            params_of("const log = (level, ...args) => {}", Language::JavaScript),
            vec!["level", "...args"]
        );
    }

    #[test]
    fn test_single_bare_arrow_param() {
        assert_eq!(params_of("const double = x => x * 2;", Language::JavaScript), vec!["x"]);
    }

    #[test]
    fn test_typed_params() {
        assert_eq!(
            params_of(
                "export function GET(req: Request, { params }: { params: { id: string } }, opt?: number) {}",
                Language::TypeScript
            ),
            vec!["req", "{params}", "opt"]
        );
    }
}
