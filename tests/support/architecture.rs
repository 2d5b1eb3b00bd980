//! Source scanning helpers for architecture contract tests.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// One offending source line.
pub struct Hit {
    pub file: String,
    pub line: usize,
    pub text: String,
}

impl fmt::Debug for Hit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.file, self.line, self.text.trim())
    }
}

fn root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

fn relative_path(path: &Path) -> String {
    path.strip_prefix(root())
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

fn collect_rs_files(dir: &Path, files: &mut Vec<PathBuf>) {
    let entries = fs::read_dir(dir)
        .unwrap_or_else(|e| panic!("failed to read dir {}: {e}", dir.display()));

    for entry in entries {
        let path = entry
            .unwrap_or_else(|e| panic!("failed to read dir entry: {e}"))
            .path();
        if path.is_dir() {
            collect_rs_files(&path, files);
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            files.push(path);
        }
    }
}

/// Every line of every `.rs` file under `relative_dir` that `keep` accepts.
fn scan<F>(relative_dir: &str, mut keep: F) -> Vec<Hit>
where
    F: FnMut(&Path, &str) -> bool,
{
    let mut files = Vec::new();
    collect_rs_files(&root().join(relative_dir), &mut files);
    files.sort();

    let mut hits = Vec::new();
    for file in files {
        let content = fs::read_to_string(&file)
            .unwrap_or_else(|e| panic!("failed to read {}: {e}", file.display()));
        for (idx, line) in content.lines().enumerate() {
            if keep(&file, line) {
                hits.push(Hit {
                    file: relative_path(&file),
                    line: idx + 1,
                    text: line.to_string(),
                });
            }
        }
    }
    hits
}

pub fn find_lines_containing(relative_dir: &str, patterns: &[&str]) -> Vec<Hit> {
    scan(relative_dir, |_, line| patterns.iter().any(|p| line.contains(p)))
}

pub fn find_lines_containing_except_files(
    relative_dir: &str,
    patterns: &[&str],
    allowed_relative_files: &[&str],
) -> Vec<Hit> {
    find_lines_containing(relative_dir, patterns)
        .into_iter()
        .filter(|hit| !allowed_relative_files.contains(&hit.file.as_str()))
        .collect()
}

pub fn path_exists(relative_path: &str) -> bool {
    root().join(relative_path).exists()
}

/// Lines in `mod.rs` files that are not module declarations, comments or
/// `#[cfg]` attributes.
pub fn find_non_export_lines_in_mod_files(relative_dir: &str) -> Vec<Hit> {
    scan(relative_dir, |file, raw| {
        if file.file_name().and_then(|s| s.to_str()) != Some("mod.rs") {
            return false;
        }
        let line = raw.trim();
        !(line.is_empty()
            || line.starts_with("//")
            || line.starts_with("pub mod ")
            || line.starts_with("mod ")
            || line.starts_with("#[cfg"))
    })
}
