use crate::core::error::{Error, Result};
use crate::parse::Language;
use tree_sitter::{Node, Parser, Tree};

/// Parses JS/TS sources into tree-sitter trees.
///
/// Holds one parser per grammar so each file reuses an already configured
/// parser.
pub struct SourceParser {
    javascript: Parser,
    tsx: Parser,
    max_chars: usize,
}

impl SourceParser {
    /// Load both grammars. Failure here means the binary was built against
    /// an incompatible tree-sitter runtime and nothing can be indexed.
    pub fn new(max_chars: usize) -> Result<Self> {
        Ok(Self {
            javascript: load(Language::JavaScript)?,
            tsx: load(Language::TypeScriptReact)?,
            max_chars,
        })
    }

    /// Parse one file.
    ///
    /// Oversized files are rejected before parsing. A tree containing error
    /// or missing nodes counts as a syntax error.
    pub fn parse(&mut self, path: &str, language: Language, content: &str) -> Result<Tree> {
        let chars = content.chars().count();
        if chars > self.max_chars {
            return Err(Error::FileTooLarge {
                path: path.to_string(),
                chars,
                limit: self.max_chars,
            });
        }

        let parser = if language.is_typed() {
            &mut self.tsx
        } else if language.has_ast_support() {
            &mut self.javascript
        } else {
            return Err(Error::Parse {
                path: path.to_string(),
                line: 0,
                column: 0,
            });
        };

        let tree = parser.parse(content, None).ok_or_else(|| Error::Parse {
            path: path.to_string(),
            line: 0,
            column: 0,
        })?;

        let root = tree.root_node();
        if root.has_error() {
            let (line, column) = first_error(root)
                .map(|n| (n.start_position().row + 1, n.start_position().column + 1))
                .unwrap_or((0, 0));
            return Err(Error::Parse {
                path: path.to_string(),
                line,
                column,
            });
        }

        Ok(tree)
    }
}

fn load(language: Language) -> Result<Parser> {
    let grammar = language.tree_sitter_language().ok_or_else(|| Error::Grammar {
        language: language.to_string(),
        message: "no grammar bundled".to_string(),
    })?;
    let mut parser = Parser::new();
    parser.set_language(&grammar).map_err(|e| Error::Grammar {
        language: language.to_string(),
        message: e.to_string(),
    })?;
    Ok(parser)
}

/// Depth-first search for the first error or missing node
fn first_error(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(found) = first_error(child) {
            return Some(found);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> SourceParser {
        SourceParser::new(1_000).unwrap()
    }

    #[test]
    fn test_parses_jsx_in_javascript() {
        let tree = parser()
            .parse(
                "a.jsx",
                Language::JavaScriptReact,
                "export default function App() { return <div>hi</div>; }",
            )
            .unwrap();
        assert_eq!(tree.root_node().kind(), "program");
    }

    #[test]
    fn test_parses_typed_jsx() {
        let source = "type P = { id: string };\nexport const Card = ({ id }: P) => <span>{id}</span>;";
        assert!(parser().parse("a.ts", Language::TypeScript, source).is_ok());
    }

    #[test]
    fn test_unbalanced_braces_is_parse_error() {
        let err = parser()
            .parse("bad.ts", Language::TypeScript, "function broken() {\n  if (x) {\n")
            .unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn test_oversized_file_is_rejected() {
        let big = "const a = 1;\n".repeat(200);
        let err = parser().parse("big.js", Language::JavaScript, &big).unwrap_err();
        assert!(matches!(err, Error::FileTooLarge { limit: 1_000, .. }));
    }
}
