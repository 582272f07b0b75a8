//! Markdown rendering of the index

use crate::core::error::Result;
use crate::detect::RouteRecord;
use crate::index::{FileRecord, FunctionInfo, ProjectIndex};
use std::path::Path;

/// Render the whole document
pub fn render(index: &ProjectIndex) -> String {
    let mut output = String::new();
    let meta = &index.metadata;

    output.push_str(&format!("# {} codebase index\n\n", meta.project));
    output.push_str(&format!(
        "- Generated: {}\n",
        meta.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    output.push_str(&format!("- Generator: {}\n", meta.generator));
    output.push_str(&format!("- Mode: {}\n", meta.mode.as_str()));
    match &meta.framework_version {
        Some(version) => output.push_str(&format!("- Framework: {} {}\n", meta.framework, version)),
        None => output.push_str(&format!("- Framework: {}\n", meta.framework)),
    }
    output.push_str(&format!(
        "- Files: {} indexed of {} found\n",
        meta.files_indexed, meta.files_walked
    ));
    output.push_str(&format!(
        "- Tokens: ~{} of {}\n",
        meta.token_estimate, meta.token_budget
    ));
    if meta.truncated {
        output.push_str("\n> Token budget reached; remaining files were not analyzed.\n");
    }

    render_structure(index, &mut output);
    render_patterns(index, &mut output);
    render_routes(index, &mut output);
    render_modules(index, &mut output);
    render_symbols(index, &mut output);

    output
}

/// Render and write in one go
pub fn write(path: &Path, index: &ProjectIndex) -> Result<()> {
    std::fs::write(path, render(index))?;
    Ok(())
}

fn render_structure(index: &ProjectIndex, output: &mut String) {
    output.push_str("\n## Project Structure\n\n");
    if index.directories.is_empty() {
        output.push_str("No source directories found.\n");
        return;
    }
    output.push_str("| Directory | Files | Types | Purpose |\n");
    output.push_str("|---|---|---|---|\n");
    for (dir, record) in &index.directories {
        let types: Vec<String> = record
            .extensions
            .iter()
            .map(|(ext, count)| format!("{} {}", count, ext))
            .collect();
        output.push_str(&format!(
            "| `{}` | {} | {} | {} |\n",
            dir,
            record.file_count,
            types.join(", "),
            record.purpose
        ));
    }
}

fn render_patterns(index: &ProjectIndex, output: &mut String) {
    let facts = &index.facts;
    output.push_str("\n## Patterns\n\n");
    output.push_str(&format!("- Router: {}\n", facts.router));
    output.push_str(&format!("- TypeScript: {}\n", yes_no(facts.typescript)));
    output.push_str(&format!("- Tailwind: {}\n", yes_no(facts.tailwind)));
    output.push_str(&format!("- Styling: {}\n", facts.styling));
    output.push_str(&format!("- State management: {}\n", facts.state_management));
    output.push_str(&format!("- Data fetching: {}\n", facts.data_fetching));
}

fn render_routes(index: &ProjectIndex, output: &mut String) {
    let routes = &index.facts.routes;
    if routes.is_empty() {
        return;
    }
    output.push_str("\n## Routes\n");
    route_table("App Router", &routes.app, output);
    route_table("Pages Router", &routes.pages, output);
}

fn route_table(title: &str, routes: &[RouteRecord], output: &mut String) {
    if routes.is_empty() {
        return;
    }
    output.push_str(&format!("\n### {}\n\n", title));
    output.push_str("| Route | Kind | File |\n");
    output.push_str("|---|---|---|\n");
    for r in routes {
        output.push_str(&format!("| `{}` | {} | `{}` |\n", r.route, r.kind.as_str(), r.file));
    }
}

fn render_modules(index: &ProjectIndex, output: &mut String) {
    output.push_str("\n## Modules\n");
    for record in index.files.values() {
        output.push_str(&format!("\n### `{}`\n\n", record.path));
        output.push_str(&format!("- Role: {}\n", record.role.as_str()));
        render_module_lists(record, output);
    }
}

fn render_module_lists(record: &FileRecord, output: &mut String) {
    if !record.imports.is_empty() {
        let imports: Vec<&str> = record.imports.iter().map(String::as_str).collect();
        output.push_str(&format!("- Imports: {}\n", imports.join(", ")));
    }
    if !record.exports.is_empty() {
        output.push_str(&format!("- Exports: {}\n", record.exports.join(", ")));
    }
    for (label, functions) in [
        ("Components", &record.components),
        ("Hooks", &record.hooks),
        ("API handlers", &record.api_handlers),
        ("Functions", &record.functions),
    ] {
        if !functions.is_empty() {
            output.push_str(&format!("- {}: {}\n", label, names(functions)));
        }
    }
    if !record.framework_features.is_empty() {
        let features: Vec<&str> = record.framework_features.iter().map(String::as_str).collect();
        output.push_str(&format!("- Framework features: {}\n", features.join(", ")));
    }
}

fn render_symbols(index: &ProjectIndex, output: &mut String) {
    if index.symbols.is_empty() {
        return;
    }
    output.push_str("\n## Exported Symbols\n\n");
    for symbol in index.symbols.values() {
        output.push_str(&format!(
            "- `{}` ({}) in `{}`\n",
            symbol.signature,
            symbol.kind.as_str(),
            symbol.file
        ));
    }
}

fn names(functions: &[FunctionInfo]) -> String {
    functions
        .iter()
        .map(|f| f.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::{ProjectFacts, RouteKind, RouteTable, RouterStyle};
    use crate::extract::{FileRole, SymbolRole};
    use crate::index::{IndexMetadata, Mode, SymbolDescriptor};
    use std::collections::{BTreeMap, BTreeSet};

    fn sample() -> ProjectIndex {
        let mut files = BTreeMap::new();
        files.insert(
            "app/page.tsx".to_string(),
            FileRecord {
                path: "app/page.tsx".to_string(),
                role: FileRole::Page,
                imports: BTreeSet::from(["react".to_string()]),
                exports: vec!["default".to_string()],
                functions: Vec::new(),
                components: vec![FunctionInfo {
                    name: "Home".to_string(),
                    params: Vec::new(),
                    is_async: false,
                    exported: true,
                    line: 3,
                }],
                hooks: Vec::new(),
                api_handlers: Vec::new(),
                framework_features: BTreeSet::new(),
            },
        );

        let mut symbols = BTreeMap::new();
        symbols.insert(
            "app/page.tsx:Home".to_string(),
            SymbolDescriptor {
                file: "app/page.tsx".to_string(),
                name: "Home".to_string(),
                kind: SymbolRole::Component,
                params: Vec::new(),
                is_async: false,
                signature: "Home()".to_string(),
            },
        );

        ProjectIndex {
            metadata: IndexMetadata {
                generated_at: chrono::Utc::now(),
                generator: "codeindex test".to_string(),
                project: "shop".to_string(),
                mode: Mode::Full,
                framework: "nextjs".to_string(),
                framework_version: Some("14.2.3".to_string()),
                files_walked: 2,
                files_indexed: 1,
                token_estimate: 120,
                token_budget: 50_000,
                truncated: true,
            },
            directories: BTreeMap::new(),
            files,
            symbols,
            facts: ProjectFacts {
                router: RouterStyle::App,
                typescript: true,
                tailwind: false,
                styling: "css".to_string(),
                state_management: "context".to_string(),
                data_fetching: "fetch".to_string(),
                routes: RouteTable {
                    app: vec![RouteRecord {
                        route: "/".to_string(),
                        file: "app/page.tsx".to_string(),
                        kind: RouteKind::Page,
                    }],
                    pages: Vec::new(),
                },
            },
            deep_detail: BTreeMap::new(),
        }
    }

    #[test]
    fn test_sections_present() {
        let md = render(&sample());
        assert!(md.starts_with("# shop codebase index"));
        assert!(md.contains("- Framework: nextjs 14.2.3"));
        assert!(md.contains("Token budget reached"));
        assert!(md.contains("## Patterns"));
        assert!(md.contains("- Router: app"));
        assert!(md.contains("### App Router"));
        assert!(!md.contains("### Pages Router"));
        assert!(md.contains("| `/` | page | `app/page.tsx` |"));
        assert!(md.contains("- Components: Home"));
        assert!(md.contains("- `Home()` (component) in `app/page.tsx`"));
    }

    #[test]
    fn test_routes_section_omitted_without_routes() {
        let mut index = sample();
        index.facts.routes = RouteTable::default();
        assert!(!render(&index).contains("## Routes"));
    }
}
