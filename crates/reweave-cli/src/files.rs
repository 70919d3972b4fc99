//! Source file discovery

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use glob::Pattern;
use tracing::debug;
use walkdir::WalkDir;

/// Include and exclude globs, matched against paths relative to the directory being walked
pub struct FileFilter {
    include: Vec<Pattern>,
    exclude: Vec<Pattern>,
}

impl FileFilter {
    pub fn new(include: &[String], exclude: &[String]) -> anyhow::Result<Self> {
        let compile = |patterns: &[String]| {
            patterns
                .iter()
                .map(|p| Pattern::new(p).with_context(|| format!("Invalid glob pattern '{p}'")))
                .collect::<anyhow::Result<Vec<_>>>()
        };
        Ok(Self {
            include: compile(include)?,
            exclude: compile(exclude)?,
        })
    }

    fn accepts(&self, relative: &Path) -> bool {
        let included = self.include.is_empty() || self.include.iter().any(|p| p.matches_path(relative));
        included && !self.exclude.iter().any(|p| p.matches_path(relative))
    }
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| extensions.contains(&e))
}

/// Every file under `paths` with one of `extensions`, sorted.
///
/// Files named explicitly bypass the filter; directories are walked and
/// filtered; arguments containing `*` are expanded as globs.
pub fn discover(paths: &[PathBuf], filter: &FileFilter, extensions: &[&str]) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_file() {
            if has_extension(path, extensions) {
                files.push(path.clone());
            }
        } else if path.is_dir() {
            for entry in WalkDir::new(path).follow_links(false) {
                let entry = entry.with_context(|| format!("Failed to walk {}", path.display()))?;
                let file = entry.path();
                if !entry.file_type().is_file() || !has_extension(file, extensions) {
                    continue;
                }
                let relative = file.strip_prefix(path).unwrap_or(file);
                if filter.accepts(relative) {
                    files.push(file.to_path_buf());
                }
            }
        } else if path.to_string_lossy().contains('*') {
            let pattern = path.to_string_lossy();
            for entry in glob::glob(&pattern).with_context(|| format!("Invalid glob pattern '{pattern}'"))? {
                let file = entry?;
                if file.is_file() && has_extension(&file, extensions) {
                    files.push(file);
                }
            }
        } else {
            bail!("Path not found: {}", path.display());
        }
    }
    files.sort();
    files.dedup();
    debug!("Discovered {} files", files.len());
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, relative: &str) {
        let path = dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "x = 1;\n").unwrap();
    }

    #[test]
    fn test_discover_filters_by_extension_and_globs() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "src/A.java");
        touch(temp_dir.path(), "src/notes.txt");
        touch(temp_dir.path(), "target/B.java");

        let filter = FileFilter::new(&[], &["target/**".to_string()]).unwrap();
        let files = discover(&[temp_dir.path().to_path_buf()], &filter, &["java"]).unwrap();
        assert_eq!(files, vec![temp_dir.path().join("src/A.java")]);
    }

    #[test]
    fn test_explicit_files_bypass_filter() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "target/B.java");
        let file = temp_dir.path().join("target/B.java");

        let filter = FileFilter::new(&[], &["target/**".to_string()]).unwrap();
        assert_eq!(discover(&[file.clone()], &filter, &["java"]).unwrap(), vec![file]);
    }

    #[test]
    fn test_missing_path_is_an_error() {
        let filter = FileFilter::new(&[], &[]).unwrap();
        assert!(discover(&[PathBuf::from("/nonexistent/path")], &filter, &["java"]).is_err());
    }
}
