//! Scenery definition files on disk.
//!
//! [`FileScanner`] walks a content directory depth-first with children in
//! name order, yielding files whose names match a `;`-separated wildcard
//! list. [`query_directory`] summarises a tree so a caller can tell whether
//! any definition changed since the last load.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use bevy::prelude::*;
use xxhash_rust::xxh32::xxh32;

use crate::scenery::{SceneryDefinition, SceneryRegistry};

/// File patterns recognised as scenery definitions.
pub const SCENERY_FILE_PATTERNS: &str = "*.json;*.scenery";

const PATH_CHECKSUM_SEED: u32 = 0xD843_0DED;

#[derive(Debug)]
pub enum ContentError {
    Io { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: serde_json::Error },
}

impl fmt::Display for ContentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentError::Io { path, source } => write!(f, "I/O error reading {}: {source}", path.display()),
            ContentError::Parse { path, source } => write!(f, "invalid definition {}: {source}", path.display()),
        }
    }
}

impl std::error::Error for ContentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ContentError::Io { source, .. } => Some(source),
            ContentError::Parse { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Wildcards
// ---------------------------------------------------------------------------

/// Case-insensitive match of `name` against `pattern`. `*` matches any run
/// of characters, `?` matches one character other than `.`.
pub fn match_wildcard(name: &str, pattern: &str) -> bool {
    let name: Vec<char> = name.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();
    match_from(&name, &pattern)
}

fn match_from(name: &[char], pattern: &[char]) -> bool {
    match pattern.split_first() {
        None => name.is_empty(),
        Some(('*', rest)) => (0..=name.len()).any(|skip| match_from(&name[skip..], rest)),
        Some(('?', rest)) => match name.split_first() {
            Some((c, tail)) if *c != '.' => match_from(tail, rest),
            _ => false,
        },
        Some((p, rest)) => match name.split_first() {
            Some((c, tail)) if c.to_lowercase().eq(p.to_lowercase()) => match_from(tail, rest),
            _ => false,
        },
    }
}

fn matches_any(patterns: &[String], name: &str) -> bool {
    patterns.iter().any(|pattern| match_wildcard(name, pattern))
}

fn split_patterns(patterns: &str) -> Vec<String> {
    patterns
        .split(';')
        .filter(|pattern| !pattern.is_empty())
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// FileScanner
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
    /// Seconds since the Unix epoch; 0 when unavailable.
    pub last_modified: u64,
}

#[derive(Debug)]
enum DirectoryChild {
    Directory(PathBuf),
    File(FileInfo),
}

#[derive(Debug)]
struct DirectoryState {
    listing: Vec<DirectoryChild>,
    index: usize,
}

/// Depth-first iterator over matching files below a root directory.
/// Unreadable directories are logged and skipped.
#[derive(Debug)]
pub struct FileScanner {
    root: PathBuf,
    patterns: Vec<String>,
    recurse: bool,
    started: bool,
    stack: Vec<DirectoryState>,
}

impl FileScanner {
    pub fn new(root: impl Into<PathBuf>, patterns: &str, recurse: bool) -> Self {
        Self {
            root: root.into(),
            patterns: split_patterns(patterns),
            recurse,
            started: false,
            stack: Vec::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Restart the walk from the root.
    pub fn reset(&mut self) {
        self.started = false;
        self.stack.clear();
    }

    fn push_directory(&mut self, directory: &Path) {
        self.stack.push(DirectoryState {
            listing: read_children(directory),
            index: 0,
        });
    }
}

impl Iterator for FileScanner {
    type Item = FileInfo;

    fn next(&mut self) -> Option<FileInfo> {
        if !self.started {
            self.started = true;
            let root = self.root.clone();
            self.push_directory(&root);
        }

        loop {
            let state = self.stack.last_mut()?;
            let Some(child) = state.listing.get_mut(state.index) else {
                self.stack.pop();
                continue;
            };
            state.index += 1;
            match child {
                DirectoryChild::Directory(path) => {
                    if self.recurse {
                        let path = std::mem::take(path);
                        self.push_directory(&path);
                    }
                }
                DirectoryChild::File(info) => {
                    if matches_any(&self.patterns, &info.name) {
                        return Some(info.clone());
                    }
                }
            }
        }
    }
}

fn read_children(directory: &Path) -> Vec<DirectoryChild> {
    let entries = match fs::read_dir(directory) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("FileScanner: cannot read {}: {}", directory.display(), e);
            return Vec::new();
        }
    };
    let mut children: Vec<(String, DirectoryChild)> = entries
        .filter_map(Result::ok)
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().into_owned();
            let path = entry.path();
            // Follows symlinks, like a plain stat.
            let metadata = fs::metadata(&path).ok()?;
            let child = if metadata.is_dir() {
                DirectoryChild::Directory(path)
            } else {
                let last_modified = metadata
                    .modified()
                    .ok()
                    .and_then(|time| time.duration_since(UNIX_EPOCH).ok())
                    .map_or(0, |elapsed| elapsed.as_secs());
                DirectoryChild::File(FileInfo {
                    path,
                    name: name.clone(),
                    size: metadata.len(),
                    last_modified,
                })
            };
            Some((name, child))
        })
        .collect();
    children.sort_by(|a, b| a.0.cmp(&b.0));
    children.into_iter().map(|(_, child)| child).collect()
}

// ---------------------------------------------------------------------------
// Directory summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueryDirectoryResult {
    pub total_files: u32,
    pub total_file_size: u64,
    pub file_date_modified_checksum: u32,
    pub path_checksum: u32,
}

/// Summarise every matching file below `root`, recursively. Two calls give
/// equal results exactly when no matching file was added, removed, renamed,
/// resized or touched in between (up to hash collisions).
pub fn query_directory(root: &Path, patterns: &str) -> QueryDirectoryResult {
    let mut result = QueryDirectoryResult::default();
    for file in FileScanner::new(root, patterns, true) {
        result.total_files += 1;
        result.total_file_size += file.size;
        result.file_date_modified_checksum ^=
            (file.last_modified >> 32) as u32 ^ (file.last_modified & 0xFFFF_FFFF) as u32;
        result.file_date_modified_checksum = result.file_date_modified_checksum.rotate_right(5);
        let relative = file.path.strip_prefix(root).unwrap_or(&file.path);
        let relative = relative.to_string_lossy();
        result.path_checksum = result
            .path_checksum
            .wrapping_add(xxh32(relative.as_bytes(), PATH_CHECKSUM_SEED));
    }
    result
}

// ---------------------------------------------------------------------------
// Loading definitions
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct ContentLoadReport {
    pub loaded: usize,
    /// Files that could not be read or parsed. They do not stop the load.
    pub failed: Vec<ContentError>,
    pub summary: QueryDirectoryResult,
}

pub fn load_definition(path: &Path) -> Result<SceneryDefinition, ContentError> {
    let text = fs::read_to_string(path).map_err(|source| ContentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ContentError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

impl SceneryRegistry {
    /// The built-in set plus every definition file found below `root`.
    /// Files load in scan order, so indices are deterministic for a given
    /// tree.
    pub fn load_dir(root: &Path) -> Result<(SceneryRegistry, ContentLoadReport), ContentError> {
        let metadata = fs::metadata(root).map_err(|source| ContentError::Io {
            path: root.to_path_buf(),
            source,
        })?;
        if !metadata.is_dir() {
            return Err(ContentError::Io {
                path: root.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a directory"),
            });
        }

        let mut registry = SceneryRegistry::default();
        let mut report = ContentLoadReport {
            summary: query_directory(root, SCENERY_FILE_PATTERNS),
            ..Default::default()
        };
        for file in FileScanner::new(root, SCENERY_FILE_PATTERNS, true) {
            match load_definition(&file.path) {
                Ok(definition) => {
                    registry.add(definition);
                    report.loaded += 1;
                }
                Err(e) => {
                    warn!("content: skipping {}", e);
                    report.failed.push(e);
                }
            }
        }
        info!(
            "content: loaded {} scenery definitions from {} ({} failed)",
            report.loaded,
            root.display(),
            report.failed.len()
        );
        Ok((registry, report))
    }
}
