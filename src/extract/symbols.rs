//! Single-pass symbol walk over a tree-sitter tree
//!
//! The tree is traversed with one cursor. Function captures stay "open" until
//! the cursor leaves their node, so JSX and hook calls seen in between are
//! attributed to every enclosing captured function.

use super::params::describe_params;
use super::{is_data_fetching_entry_point, AnalysisBuilder, ExtractLimits, ExtractedFunction, FileAnalysis};
use crate::extract::classify::is_hook_name;
use tree_sitter::{Node, Tree};

/// Extract imports, exports, functions and framework markers from a parsed file
pub fn extract(tree: &Tree, source: &str, limits: ExtractLimits) -> FileAnalysis {
    let mut walk = SymbolWalk {
        source: source.as_bytes(),
        builder: AnalysisBuilder::new(limits),
        open: Vec::new(),
    };

    let mut cursor = tree.walk();
    loop {
        walk.enter(cursor.node());
        if cursor.goto_first_child() {
            continue;
        }
        loop {
            walk.exit(cursor.node());
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return walk.builder.finish();
            }
        }
    }
}

struct SymbolWalk<'s> {
    source: &'s [u8],
    builder: AnalysisBuilder,
    /// (node id, function index) for captures whose node is being walked
    open: Vec<(usize, usize)>,
}

impl<'s> SymbolWalk<'s> {
    fn enter(&mut self, node: Node) {
        match node.kind() {
            "import_statement" => {
                if let Some(source) = node.child_by_field_name("source") {
                    let module = string_value(source, self.source);
                    self.builder.add_import(&module);
                }
            }
            "export_statement" => self.visit_export(node),
            "function_declaration" => {
                if let Some(name) = node.child_by_field_name("name") {
                    let name = self.text(name);
                    self.capture(node, node, name, is_exported(node));
                }
            }
            "variable_declarator" => {
                let name = node.child_by_field_name("name");
                let value = node.child_by_field_name("value");
                if let (Some(name), Some(value)) = (name, value) {
                    if name.kind() == "identifier" && value.kind() == "arrow_function" {
                        let name = self.text(name);
                        self.capture(node, value, name, is_exported(node));
                    }
                }
            }
            "call_expression" => self.visit_call(node),
            "jsx_element" | "jsx_self_closing_element" => {
                for &(_, index) in &self.open {
                    self.builder.mark_jsx(index);
                }
            }
            _ => {}
        }
    }

    fn exit(&mut self, node: Node) {
        if self.open.last().is_some_and(|&(id, _)| id == node.id()) {
            self.open.pop();
        }
    }

    /// Record a function. `span` bounds the capture, `function` carries the
    /// parameters and the async marker.
    fn capture(&mut self, span: Node, function: Node, name: String, exported: bool) {
        let index = self.builder.add_function(ExtractedFunction {
            name,
            params: describe_params(function, self.source),
            is_async: is_async(function),
            exported,
            start_line: span.start_position().row + 1,
            end_line: span.end_position().row + 1,
            has_jsx: false,
            hooks_used: Vec::new(),
        });
        self.open.push((span.id(), index));
    }

    fn visit_export(&mut self, node: Node) {
        let is_default = has_child_kind(node, "default");

        if let Some(decl) = node.child_by_field_name("declaration") {
            let names = declared_names(decl, self.source);
            if is_default {
                let name = names.first().map(String::as_str).unwrap_or("default");
                self.builder.add_export(name);
            } else {
                for name in &names {
                    self.builder.add_export(name);
                }
            }
            self.record_exported_entry_points(decl);
            return;
        }

        if let Some(value) = node.child_by_field_name("value") {
            match value.kind() {
                "identifier" => {
                    let name = self.text(value);
                    self.builder.add_export(&name);
                }
                "function_expression" | "function" | "arrow_function" => {
                    let name = value
                        .child_by_field_name("name")
                        .map(|n| self.text(n))
                        .unwrap_or_else(|| "default".to_string());
                    self.builder.add_export(&name);
                    self.capture(value, value, name, true);
                }
                "class" => {
                    let name = value
                        .child_by_field_name("name")
                        .map(|n| self.text(n))
                        .unwrap_or_else(|| "default".to_string());
                    self.builder.add_export(&name);
                }
                _ => self.builder.add_export("default"),
            }
            return;
        }

        let mut cursor = node.walk();
        for clause in node.named_children(&mut cursor) {
            if clause.kind() != "export_clause" {
                continue;
            }
            let mut inner = clause.walk();
            for specifier in clause.named_children(&mut inner) {
                if specifier.kind() != "export_specifier" {
                    continue;
                }
                let exported = specifier
                    .child_by_field_name("alias")
                    .or_else(|| specifier.child_by_field_name("name"));
                if let Some(exported) = exported {
                    let name = string_value(exported, self.source);
                    self.builder.add_export(&name);
                }
            }
        }
    }

    /// `export function getStaticProps` / `export const getServerSideProps = ...`
    fn record_exported_entry_points(&mut self, decl: Node) {
        match decl.kind() {
            "function_declaration" => {
                if let Some(name) = decl.child_by_field_name("name") {
                    let name = self.text(name);
                    if is_data_fetching_entry_point(&name) {
                        self.builder.add_feature(&name);
                    }
                }
            }
            "lexical_declaration" | "variable_declaration" => {
                let mut cursor = decl.walk();
                for declarator in decl.named_children(&mut cursor) {
                    if declarator.kind() != "variable_declarator"
                        || declarator.child_by_field_name("value").is_none()
                    {
                        continue;
                    }
                    if let Some(name) = declarator.child_by_field_name("name") {
                        let name = self.text(name);
                        if is_data_fetching_entry_point(&name) {
                            self.builder.add_feature(&name);
                        }
                    }
                }
            }
            _ => {}
        }
    }

    fn visit_call(&mut self, node: Node) {
        let Some(callee) = node.child_by_field_name("function") else {
            return;
        };

        let name = match callee.kind() {
            "identifier" => self.text(callee),
            // React.useState(...)
            "member_expression" => match callee.child_by_field_name("property") {
                Some(prop) => self.text(prop),
                None => return,
            },
            _ => return,
        };

        if callee.kind() == "identifier" && is_data_fetching_entry_point(&name) {
            self.builder.add_feature(&name);
        }

        if is_hook_name(&name) {
            for &(_, index) in &self.open {
                self.builder.add_hook_use(index, &name);
            }
        }
    }

    fn text(&self, node: Node) -> String {
        node.utf8_text(self.source).unwrap_or_default().to_string()
    }
}

/// Walk up until an export statement (exported) or the root (not exported)
fn is_exported(node: Node) -> bool {
    let mut current = node.parent();
    while let Some(parent) = current {
        if parent.kind() == "export_statement" {
            return true;
        }
        current = parent.parent();
    }
    false
}

fn is_async(function: Node) -> bool {
    has_child_kind(function, "async")
}

fn has_child_kind(node: Node, kind: &str) -> bool {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).any(|c| c.kind() == kind);
    found
}

/// Names bound by an exported declaration
fn declared_names(decl: Node, source: &[u8]) -> Vec<String> {
    match decl.kind() {
        "lexical_declaration" | "variable_declaration" => {
            let mut cursor = decl.walk();
            decl.named_children(&mut cursor)
                .filter(|d| d.kind() == "variable_declarator")
                .filter_map(|d| d.child_by_field_name("name"))
                .filter(|n| n.kind() == "identifier")
                .filter_map(|n| n.utf8_text(source).ok().map(str::to_string))
                .collect()
        }
        _ => decl
            .child_by_field_name("name")
            .and_then(|n| n.utf8_text(source).ok())
            .map(|n| vec![n.to_string()])
            .unwrap_or_default(),
    }
}

/// Contents of a string literal, or the text of any other node
fn string_value(node: Node, source: &[u8]) -> String {
    let raw = node.utf8_text(source).unwrap_or_default();
    if node.kind() == "string" {
        raw.trim_matches(|c| c == '"' || c == '\'' || c == '`').to_string()
    } else {
        raw.to_string()
    }
}
