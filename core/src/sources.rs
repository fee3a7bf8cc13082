//! Ready-made suggestion lookups.
//!
//! Each source turns the current answer text into an ordered candidate
//! list, suitable for [`crate::PromptConfig::with_suggest`]. Candidates are
//! returned as-is; duplicates in the input stay duplicated.

use std::path::{Path, PathBuf};

use crate::error::ConfigError;


/// Filter a fixed list by case-insensitive prefix. An empty prefix matches
/// everything.
pub fn prefix_filter(values: Vec<String>) -> impl Fn(&str) -> Vec<String> {
    move |partial: &str| {
        let partial = partial.to_lowercase();
        values
            .iter()
            .filter(|v| v.to_lowercase().starts_with(&partial))
            .cloned()
            .collect()
    }
}


/// Split a comma-separated list into trimmed, non-empty values.
pub fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}


/// Read candidates from a file, one per line. Blank lines are skipped.
pub fn read_lines(path: &Path) -> Result<Vec<String>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let lines: Vec<String> = content
        .lines()
        .map(str::trim_end)
        .filter(|l| !l.trim().is_empty())
        .map(str::to_string)
        .collect();
    tracing::debug!(count = lines.len(), "read suggestions from {}", path.display());
    Ok(lines)
}


/// Complete filesystem paths relative to `root`.
///
/// The text typed so far is split at its last `/`: the left part names the
/// directory to list, the right part filters its entries by prefix.
/// Directories are suggested with a trailing `/` so that requesting again
/// descends into them. Hidden entries only appear once the typed part
/// starts with a dot. Unreadable directories yield no candidates.
pub fn path_completer(root: PathBuf) -> impl Fn(&str) -> Vec<String> {
    move |typed: &str| complete_path(&root, typed)
}


fn complete_path(root: &Path, typed: &str) -> Vec<String> {
    let (dir_part, file_part) = match typed.rfind('/') {
        Some(idx) => (&typed[..=idx], &typed[idx + 1..]),
        None => ("", typed),
    };

    let dir = if Path::new(dir_part).is_absolute() {
        PathBuf::from(dir_part)
    } else {
        root.join(dir_part)
    };

    let entries = match std::fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!("cannot list {}: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let mut candidates: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().into_owned();
            if !name.starts_with(file_part) {
                return None;
            }
            if name.starts_with('.') && !file_part.starts_with('.') {
                return None;
            }
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            let suffix = if is_dir { "/" } else { "" };
            Some(format!("{}{}{}", dir_part, name, suffix))
        })
        .collect();

    candidates.sort();
    candidates
}
