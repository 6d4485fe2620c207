//! Minimal CLI: read sample → infer → (pydantic module | type tree)
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indexmap::{IndexMap, IndexSet};
use rayon::prelude::*;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::ir::ModelDef;
use crate::jq_exec::Selection;
use crate::options::{ArrayPolicy, InferOptions, OutputTarget, RenderOptions};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// infer pydantic models from a JSON sample document
#[derive(Parser, Debug)]
#[command(name = "json-pyd", version)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// infer and write a pydantic module
    Pydantic(PydanticOut),
    /// infer and print the type tree as JSON
    Tree(TreeOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// One or more sample files. May be literal paths or quoted glob patterns
    #[arg(num_args = 1.., required = true)]
    input: Vec<String>,

    /// JSON Pointer to select the sample inside each document (e.g. /data/items/0)
    #[arg(long)]
    json_pointer: Option<String>,

    /// jq filter applied to each document; must yield exactly one value
    #[arg(long)]
    jq_expr: Option<String>,
}

#[derive(Args, Debug, Clone)]
struct InferSettings {
    /// emit field names in snake_case
    #[arg(long, default_value_t = false)]
    apply_snake_case: bool,

    /// fail on array values instead of inferring list types
    #[arg(long, default_value_t = false)]
    reject_arrays: bool,

    /// name of the top-level model
    #[arg(long)]
    root_model: Option<String>,

    /// JSON file with `infer` / `render` option defaults
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(clap::Parser, Debug)]
struct PydanticOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    infer_settings: InferSettings,

    /// make every primitive field `Optional[...] = None`
    #[arg(long, default_value_t = false)]
    force_optional: bool,

    /// output base name, `.py` is appended (default: <dd-mm-YYYY>_schema)
    #[arg(long)]
    file_name: Option<String>,

    /// directory the module is written to
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// print to stdout instead of writing a file
    #[arg(long, default_value_t = false)]
    stdout: bool,
}

#[derive(clap::Parser, Debug)]
struct TreeOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    infer_settings: InferSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

/// Shape of the `--config` file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    infer: InferOptions,
    render: RenderOptions,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn selection(&self) -> Selection {
        Selection {
            json_pointer: self.json_pointer.clone(),
            jq_expr: self.jq_expr.clone(),
        }
    }

    /// Read, parse and pre-select one sample.
    fn load(&self, source_path: &Path) -> Result<Value> {
        let source = std::fs::read_to_string(source_path)
            .with_context(|| format!("failed to read {}", source_path.display()))?;
        debug!(path = %source_path.display(), bytes = source.len(), "read input");
        let document = crate::path_de::parse_document(&source)
            .with_context(|| format!("failed to parse {}", source_path.display()))?;
        let selection = self.selection();
        if selection.is_identity() {
            return Ok(document);
        }
        selection
            .apply(document)
            .with_context(|| format!("failed to select sample in {}", source_path.display()))
    }

    /// Run `apply` on every input in parallel; results keep input order.
    fn process<T, F>(&self, apply: F) -> Result<Vec<(PathBuf, Result<T>)>>
    where
        T: Send,
        F: Fn(Value) -> Result<T> + Sync,
    {
        let source_paths = resolve_inputs(&self.input)?;
        Ok(source_paths
            .into_par_iter()
            .map(|path| {
                let out = self.load(&path).and_then(&apply);
                (path, out)
            })
            .collect())
    }
}

impl InferSettings {
    fn options(&self) -> Result<(InferOptions, RenderOptions)> {
        let ConfigFile { mut infer, render } = match self.config.as_ref() {
            None => ConfigFile::default(),
            Some(path) => {
                let src = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read config {}", path.display()))?;
                serde_json::from_str(&src)
                    .with_context(|| format!("invalid config {}", path.display()))?
            }
        };
        if self.apply_snake_case {
            infer.snake_case_fields = true;
        }
        if self.reject_arrays {
            infer.array_policy = ArrayPolicy::Reject;
        }
        if let Some(root) = self.root_model.as_ref() {
            infer.root_name = root.clone();
        }
        Ok((infer, render))
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Pydantic(target) => target.run(),
            Command::Tree(target) => target.run(),
        }
    }
}

impl PydanticOut {
    fn run(&self) -> Result<()> {
        let (infer, mut render) = self.infer_settings.options()?;
        if self.force_optional {
            render.force_optional = true;
        }
        let results = self.input_settings.process(|document| {
            let root = crate::inference::build(&document, &infer)?;
            Ok(crate::codegen::render(&root, &render))
        })?;

        let base_name = self.file_name.clone().unwrap_or_else(default_file_name);
        let targets = if self.stdout {
            vec![OutputTarget::new(base_name); results.len()]
        } else {
            output_targets(&base_name, results.iter().map(|(path, _)| path.as_path()))?
        };
        let total = results.len();
        let mut failed = 0usize;
        for ((path, result), target) in results.into_iter().zip(targets) {
            let src = match result {
                Ok(src) => src,
                Err(error) => {
                    report_failure(&path, &error);
                    failed += 1;
                    continue;
                }
            };
            if self.stdout {
                println!("{src}");
                continue;
            }
            let written = write_module(&self.out_dir, &target, &src)?;
            eprintln!("{} {} → {}", "wrote".green().bold(), path.display(), written.display());
        }
        finish(failed, total)
    }
}

impl TreeOut {
    fn run(&self) -> Result<()> {
        let (infer, _) = self.infer_settings.options()?;
        let results = self.input_settings.process(|document| {
            Ok(crate::inference::build(&document, &infer)?)
        })?;

        let total = results.len();
        let mut failed = 0usize;
        let mut trees: IndexMap<String, ModelDef> = IndexMap::new();
        for (path, result) in results {
            match result {
                Ok(root) => {
                    trees.insert(path.display().to_string(), root);
                }
                Err(error) => {
                    report_failure(&path, &error);
                    failed += 1;
                }
            }
        }

        let tree_src = if total == 1 {
            match trees.values().next() {
                Some(root) => serde_json::to_string_pretty(root)?,
                None => String::new(),
            }
        } else {
            serde_json::to_string_pretty(&trees)?
        };
        if !tree_src.is_empty() {
            if let Some(out) = self.out.as_ref() {
                if let Some(parent) = out.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(out, &tree_src)
                    .with_context(|| format!("failed to write {}", out.display()))?;
            } else {
                println!("{tree_src}");
            }
        }
        finish(failed, total)
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

/// `<dd-mm-YYYY>_schema`, from the local date at invocation time.
fn default_file_name() -> String {
    chrono::Local::now().format("%d-%m-%Y_schema").to_string()
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "input".to_string())
}

/// One output per input: `<base>` alone, or `<base>_<stem>` for several.
/// Two inputs that would land on the same file are refused up front.
fn output_targets<'p>(base_name: &str, paths: impl ExactSizeIterator<Item = &'p Path>) -> Result<Vec<OutputTarget>> {
    if paths.len() == 1 {
        return Ok(vec![OutputTarget::new(base_name)]);
    }
    let mut seen: IndexMap<String, &Path> = IndexMap::new();
    let mut targets = Vec::with_capacity(paths.len());
    for path in paths {
        let target = OutputTarget::new(format!("{base_name}_{}", file_stem(path)));
        if let Some(first) = seen.insert(target.file_name(), path) {
            anyhow::bail!(
                "{} and {} would both be written to {}",
                first.display(),
                path.display(),
                target.file_name()
            );
        }
        targets.push(target);
    }
    Ok(targets)
}

fn write_module(dir: &Path, target: &OutputTarget, src: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create {}", dir.display()))?;
    let path = dir.join(target.file_name());
    std::fs::write(&path, src).with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), "wrote module");
    Ok(path)
}

fn report_failure(path: &Path, error: &anyhow::Error) {
    eprintln!("{} {}: {error:#}", "error".red().bold(), path.display());
}

fn finish(failed: usize, total: usize) -> Result<()> {
    if failed > 0 {
        anyhow::bail!("{failed} of {total} inputs failed");
    }
    Ok(())
}

/// Expand inputs in order. Arguments without glob metacharacters are taken
/// literally; a file named by several arguments is processed once.
fn resolve_inputs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut out: IndexSet<PathBuf> = IndexSet::new();
    for pattern in patterns {
        if glob::Pattern::escape(pattern) == *pattern {
            out.insert(PathBuf::from(pattern));
            continue;
        }
        let mut matched_any = false;
        for entry in glob::glob(pattern).with_context(|| format!("bad glob pattern: {pattern}"))? {
            out.insert(entry?);
            matched_any = true;
        }
        if !matched_any {
            anyhow::bail!("glob pattern matched no files: {pattern}");
        }
    }
    Ok(out.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(xs: &[&str]) -> Vec<String> {
        xs.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn literal_paths_pass_through_once() {
        let paths = resolve_inputs(&strings(&["a.json", "dir/b.json", "a.json"])).unwrap();
        assert_eq!(paths, [PathBuf::from("a.json"), PathBuf::from("dir/b.json")]);
    }

    #[test]
    fn glob_without_matches_is_an_error() {
        let err = resolve_inputs(&strings(&["/definitely/not/here/*.json"])).unwrap_err();
        assert!(err.to_string().contains("matched no files"));
    }

    #[test]
    fn single_input_keeps_the_base_name() {
        let targets = output_targets("model", [Path::new("a/x.json")].into_iter()).unwrap();
        assert_eq!(targets, [OutputTarget::new("model")]);
    }

    #[test]
    fn several_inputs_are_suffixed_by_stem() {
        let targets = output_targets("m", [Path::new("a/x.json"), Path::new("a/y.json")].into_iter()).unwrap();
        assert_eq!(targets, [OutputTarget::new("m_x"), OutputTarget::new("m_y")]);
    }

    #[test]
    fn inputs_sharing_a_stem_are_refused() {
        let err = output_targets("m", [Path::new("a/x.json"), Path::new("b/x.json")].into_iter()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("a/x.json") && msg.contains("b/x.json") && msg.contains("m_x.py"), "{msg}");
    }

    #[test]
    fn default_file_name_is_dated() {
        let name = default_file_name();
        assert!(name.ends_with("_schema"));
        assert_eq!(name.len(), "dd-mm-YYYY_schema".len());
    }

    #[test]
    fn flags_override_config_defaults() {
        let settings = InferSettings {
            apply_snake_case: true,
            reject_arrays: true,
            root_model: Some("Payment".into()),
            config: None,
        };
        let (infer, render) = settings.options().unwrap();
        assert!(infer.snake_case_fields);
        assert_eq!(infer.array_policy, ArrayPolicy::Reject);
        assert_eq!(infer.root_name, "Payment");
        assert!(!render.force_optional);
    }
}
