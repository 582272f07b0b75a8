//! End-to-end index generation for one project

use super::assembler::{IndexAssembler, ProjectSummary, TokenBudget};
use super::deep::{load_prior_deep_detail, merge_deep_detail};
use super::directories::build_directories;
use super::record::{deep_details, exported_symbols};
use super::types::{DeepDetail, FileRecord, Mode, ProjectIndex};
use crate::core::config::Config;
use crate::core::error::{Error, Result};
use crate::core::project::Project;
use crate::detect::{detect_framework, extract_routes, PatternDetector};
use crate::extract::{extract, ExtractLimits, FileAnalysis};
use crate::output;
use crate::parse::{FileWalker, Language, SourceParser, ASSET_EXTENSIONS, SCRIPT_EXTENSIONS};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Inputs for one generation run
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub root: PathBuf,
    pub mode: Mode,
    /// Overrides `budget.tokens` from the config file
    pub budget: Option<usize>,
    /// Files to elaborate into deep detail (full mode)
    pub deep: Vec<PathBuf>,
    /// Explicit config file instead of `codeindex.toml`
    pub config: Option<PathBuf>,
    /// Suppress progress output on stdout
    pub quiet: bool,
}

impl GenerateOptions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            mode: Mode::Compact,
            budget: None,
            deep: Vec::new(),
            config: None,
            quiet: false,
        }
    }
}

/// What a run produced
#[derive(Debug, Clone)]
pub struct GenerateReport {
    pub json_path: PathBuf,
    pub markdown_path: PathBuf,
    pub files_walked: usize,
    pub files_indexed: usize,
    /// Estimate for the written JSON document
    pub output_tokens: usize,
    pub truncated: bool,
    pub elapsed_ms: f64,
}

/// Walks, parses and assembles a project index, then writes both outputs
pub struct Generator {
    options: GenerateOptions,
    project: Project,
    config: Config,
    parser: SourceParser,
}

impl Generator {
    /// Resolve the project and configuration and load the grammars.
    ///
    /// A grammar failure surfaces here as [`Error::Grammar`].
    pub fn new(options: GenerateOptions) -> Result<Self> {
        let project = Project::from_path(&options.root)?;
        let mut config = Config::load(&project.root, options.config.as_deref())?;
        if let Some(tokens) = options.budget {
            if tokens == 0 {
                return Err(Error::ConfigError {
                    message: "--budget must be greater than zero".to_string(),
                });
            }
            config.budget.tokens = tokens;
        }
        let parser = SourceParser::new(config.limits.max_file_chars)?;

        Ok(Self {
            options,
            project,
            config,
            parser,
        })
    }

    fn progress(&self, message: &str) {
        if !self.options.quiet {
            println!("{}", message);
        }
    }

    fn limits(&self) -> ExtractLimits {
        ExtractLimits {
            max_imports: self.config.limits.max_imports,
            max_exports: self.config.limits.max_exports,
        }
    }

    /// Build the index without writing anything
    pub fn build(&mut self) -> Result<ProjectIndex> {
        let mode = self.options.mode;
        let root = self.project.root.clone();
        info!(project = %self.project.name, root = %root.display(), mode = mode.as_str(), "Generating index");

        self.progress("Scanning project structure...");
        let mut extensions: Vec<&str> = SCRIPT_EXTENSIONS.to_vec();
        if mode == Mode::Full {
            extensions.extend_from_slice(ASSET_EXTENSIONS);
        }
        let files = FileWalker::new(&root)
            .critical_dirs(&self.config.walk.critical_dirs)
            .skip_dirs(&self.config.walk.skip_dirs)
            .extensions(&extensions)
            .respect_gitignore(self.config.walk.respect_gitignore)
            .walk();
        self.progress(&format!("Found {} files", files.len()));

        let mut assembler = IndexAssembler::new(TokenBudget::new(&self.config.budget));
        assembler.add_directories(build_directories(&root, &files));

        self.progress("Analyzing files...");
        for (i, path) in files.iter().enumerate() {
            if assembler.is_exhausted() {
                info!(
                    analyzed = i,
                    remaining = files.len() - i,
                    tokens = assembler.tokens_used(),
                    "Token budget reached, stopping file analysis"
                );
                assembler.mark_truncated();
                break;
            }

            let rel = self.project.relative(path);
            let language = Language::from_path(path);
            if !language.has_ast_support() {
                assembler.add_file(FileRecord::bare(&rel), BTreeMap::new());
                continue;
            }

            let Some(analysis) = self.analyze(path, &rel, language) else {
                continue;
            };
            let record = FileRecord::from_analysis(&rel, &analysis);
            assembler.add_file(record, exported_symbols(&rel, &analysis));
        }

        self.progress("Detecting patterns...");
        let mut facts = PatternDetector::new(&root, &self.project.manifest, &self.config.walk.skip_dirs)
            .verify_router_files(mode == Mode::Full)
            .detect();
        if mode == Mode::Full {
            self.progress("Extracting routes...");
            facts.routes = extract_routes(&root, &self.config.walk.skip_dirs);
            info!(routes = facts.routes.len(), "Extracted routes");
        }

        let deep_detail = if mode == Mode::Full {
            let prior = load_prior_deep_detail(&root.join(&self.config.output.json_file));
            let current = self.collect_deep_detail();
            merge_deep_detail(prior, current)
        } else {
            if !self.options.deep.is_empty() {
                warn!("Deep detail is only produced in full mode; ignoring --deep");
            }
            BTreeMap::new()
        };

        let (framework, framework_version) = detect_framework(&self.project.manifest);
        let summary = ProjectSummary {
            project: self.project.name.clone(),
            mode,
            framework,
            framework_version,
            files_walked: files.len(),
        };
        Ok(assembler.finish(summary, facts, deep_detail))
    }

    /// Build the index and write the JSON and Markdown outputs
    pub fn run(&mut self) -> Result<GenerateReport> {
        let start = Instant::now();
        let index = self.build()?;

        let json_path = self.project.root.join(&self.config.output.json_file);
        let markdown_path = self.project.root.join(&self.config.output.markdown_file);
        self.progress("Writing index...");
        let chars = output::json::write(&json_path, &index)?;
        output::markdown::write(&markdown_path, &index)?;

        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        let output_tokens = TokenBudget::new(&self.config.budget).estimate_chars(chars);
        info!(
            files = index.metadata.files_indexed,
            tokens = output_tokens,
            elapsed_ms,
            "Index written"
        );

        Ok(GenerateReport {
            json_path,
            markdown_path,
            files_walked: index.metadata.files_walked,
            files_indexed: index.metadata.files_indexed,
            output_tokens,
            truncated: index.metadata.truncated,
            elapsed_ms,
        })
    }

    /// Read, parse and extract one script file. Failures skip the file.
    fn analyze(&mut self, path: &Path, rel: &str, language: Language) -> Option<FileAnalysis> {
        if let Ok(meta) = path.metadata() {
            if exceeds_char_limit(meta.len(), self.config.limits.max_file_chars) {
                self.log_skip(rel, &format!("{} bytes exceeds the size limit", meta.len()));
                return None;
            }
        }

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                debug!("Skipping unreadable file {}: {}", rel, e);
                return None;
            }
        };

        match self.parser.parse(rel, language, &content) {
            Ok(tree) => Some(extract(&tree, &content, self.limits())),
            Err(e) => {
                self.log_skip(rel, &e.to_string());
                None
            }
        }
    }

    /// Warn in full mode, stay quiet otherwise
    fn log_skip(&self, rel: &str, reason: &str) {
        if self.options.mode == Mode::Full {
            warn!("Skipping {}: {}", rel, reason);
        } else {
            debug!("Skipping {}: {}", rel, reason);
        }
    }

    /// Deep detail for every file requested with `--deep`
    fn collect_deep_detail(&mut self) -> BTreeMap<String, DeepDetail> {
        let mut details = BTreeMap::new();
        for requested in self.options.deep.clone() {
            let Some(path) = self.resolve(&requested) else {
                warn!("Deep detail file not found: {}", requested.display());
                continue;
            };
            let rel = self.project.relative(&path);
            let language = Language::from_path(&path);
            if !language.has_ast_support() {
                warn!("No deep detail for {} files: {}", language, rel);
                continue;
            }
            if let Some(analysis) = self.analyze(&path, &rel, language) {
                let found = deep_details(&rel, &analysis);
                debug!(file = %rel, functions = found.len(), "Collected deep detail");
                details.extend(found);
            }
        }
        details
    }

    /// Resolve a requested path against the working directory, then the
    /// project root; only files inside the project are accepted.
    fn resolve(&self, requested: &Path) -> Option<PathBuf> {
        let candidates = if requested.is_absolute() {
            vec![requested.to_path_buf()]
        } else {
            vec![requested.to_path_buf(), self.project.root.join(requested)]
        };
        candidates
            .into_iter()
            .filter_map(|c| c.canonicalize().ok())
            .find(|c| c.is_file() && c.starts_with(&self.project.root))
    }
}

/// A UTF-8 character takes at most four bytes, so a file longer than four
/// bytes per allowed character is over the limit without being read
fn exceeds_char_limit(bytes: u64, max_chars: usize) -> bool {
    bytes > (max_chars as u64).saturating_mul(4)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn options(root: &Path, mode: Mode) -> GenerateOptions {
        GenerateOptions {
            mode,
            quiet: true,
            ..GenerateOptions::new(root)
        }
    }

    #[test]
    fn test_compact_mode_skips_assets() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "src/index.ts", "export const run = () => 1;\n");
        write(temp.path(), "src/data.json", "{}");

        let index = Generator::new(options(temp.path(), Mode::Compact))
            .unwrap()
            .build()
            .unwrap();
        assert!(index.files.contains_key("src/index.ts"));
        assert!(!index.files.contains_key("src/data.json"));
        assert!(index.facts.routes.is_empty());
    }

    #[test]
    fn test_full_mode_lists_assets() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "src/index.ts", "export const run = () => 1;\n");
        write(temp.path(), "styles/globals.css", "body { margin: 0; }\n");

        let index = Generator::new(options(temp.path(), Mode::Full))
            .unwrap()
            .build()
            .unwrap();
        assert!(index.files.contains_key("styles/globals.css"));
        assert_eq!(index.metadata.mode, Mode::Full);
    }

    #[test]
    fn test_byte_length_precheck() {
        assert!(!exceeds_char_limit(40, 10));
        assert!(exceeds_char_limit(41, 10));
        assert!(!exceeds_char_limit(u64::MAX, usize::MAX));
    }

    #[test]
    fn test_oversized_file_skipped() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "codeindex.toml", "[limits]\nmax_file_chars = 40\n");
        write(temp.path(), "src/small.ts", "export const a = 1;\n");
        write(
            temp.path(),
            "src/large.ts",
            &"export const value = 1;\n".repeat(20),
        );

        let index = Generator::new(options(temp.path(), Mode::Compact))
            .unwrap()
            .build()
            .unwrap();
        assert!(index.files.contains_key("src/small.ts"));
        assert!(!index.files.contains_key("src/large.ts"));
    }

    #[test]
    fn test_zero_budget_rejected() {
        let temp = TempDir::new().unwrap();
        let mut opts = options(temp.path(), Mode::Compact);
        opts.budget = Some(0);
        assert!(matches!(
            Generator::new(opts),
            Err(Error::ConfigError { .. })
        ));
    }

    #[test]
    fn test_deep_detail_ignored_in_compact_mode() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "src/a.ts", "export function a() {}\n");
        let mut opts = options(temp.path(), Mode::Compact);
        opts.deep = vec![PathBuf::from("src/a.ts")];

        let index = Generator::new(opts).unwrap().build().unwrap();
        assert!(index.deep_detail.is_empty());
    }

    #[test]
    fn test_deep_paths_resolve_against_root() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "src/a.ts", "export async function load(id) { return id; }\n");
        let mut opts = options(temp.path(), Mode::Full);
        opts.deep = vec![PathBuf::from("src/a.ts"), PathBuf::from("src/missing.ts")];

        let index = Generator::new(opts).unwrap().build().unwrap();
        let detail = &index.deep_detail["src/a.ts:load"];
        assert_eq!(detail["async"], true);
        assert_eq!(detail["params"][0], "id");
    }
}
