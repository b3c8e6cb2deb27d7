use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use glob::{Pattern, glob};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::TEST_FILE_PATTERNS;
use crate::core::Syntax;

/// Patterns without `*` or `?` are literal paths, so `pages/[slug]` needs no escaping.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains(['*', '?'])
}

/// Files found by [`scan_files`], sorted by path.
#[derive(Debug, Default)]
pub struct ScanResult {
    pub files: BTreeSet<PathBuf>,
    /// Entries walkdir could not read.
    pub skipped_count: usize,
}

/// Paths excluded from a scan: literal prefixes plus globs over the full path.
struct IgnoreSet {
    prefixes: Vec<PathBuf>,
    globs: Vec<Pattern>,
}

impl IgnoreSet {
    fn new(base_dir: &Path, patterns: &[String], ignore_test_files: bool) -> Self {
        let (glob_like, literal): (Vec<&String>, Vec<&String>) =
            patterns.iter().partition(|p| is_glob_pattern(p));

        let mut globs: Vec<Pattern> = glob_like
            .into_iter()
            .filter_map(|p| {
                Pattern::new(p)
                    .inspect_err(|e| warn!(pattern = %p, "ignoring bad glob: {}", e))
                    .ok()
            })
            .collect();
        if ignore_test_files {
            globs.extend(TEST_FILE_PATTERNS.iter().filter_map(|p| Pattern::new(p).ok()));
        }

        Self {
            prefixes: literal.into_iter().map(|p| base_dir.join(p)).collect(),
            globs,
        }
    }

    fn contains(&self, path: &Path) -> bool {
        if self.prefixes.iter().any(|prefix| path.starts_with(prefix)) {
            return true;
        }
        let text = path.to_string_lossy();
        self.globs.iter().any(|glob| glob.matches(&text))
    }
}

/// Walk `includes` under `base_dir` and collect every file with a supported syntax.
///
/// Includes and ignores are either literal paths relative to `base_dir` (prefix match)
/// or glob patterns matched against the full path.
pub fn scan_files(
    base_dir: &Path,
    includes: &[String],
    ignore_patterns: &[String],
    ignore_test_files: bool,
) -> ScanResult {
    let ignored = IgnoreSet::new(base_dir, ignore_patterns, ignore_test_files);
    let mut result = ScanResult::default();

    for root in include_dirs(base_dir, includes) {
        let walker = WalkDir::new(root)
            .into_iter()
            .filter_entry(|entry| !ignored.contains(entry.path()));
        for entry in walker {
            match entry {
                Ok(entry) if entry.file_type().is_file() && is_scannable_file(entry.path()) => {
                    result.files.insert(entry.into_path());
                }
                Ok(_) => {}
                Err(e) => {
                    debug!("skipping unreadable entry: {}", e);
                    result.skipped_count += 1;
                }
            }
        }
    }

    result
}

fn include_dirs(base_dir: &Path, includes: &[String]) -> Vec<PathBuf> {
    if includes.is_empty() {
        return vec![base_dir.to_path_buf()];
    }

    let mut dirs = Vec::new();
    for include in includes {
        let joined = base_dir.join(include);
        if !is_glob_pattern(include) {
            if joined.exists() {
                dirs.push(joined);
            } else {
                debug!(path = %joined.display(), "include does not exist");
            }
            continue;
        }
        match glob(&joined.to_string_lossy()) {
            Ok(paths) => dirs.extend(paths.flatten().filter(|p| p.is_dir())),
            Err(e) => warn!(pattern = %include, "ignoring bad include glob: {}", e),
        }
    }
    dirs
}

fn is_scannable_file(path: &Path) -> bool {
    Syntax::from_path(path).is_some()
}
