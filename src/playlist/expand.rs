use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::LibrarySettings;

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Replace every directory in `items` by the files found inside it.
///
/// Files keep their position; a directory's files are inserted where the
/// directory was, sorted by path. Items that do not exist are dropped.
pub(super) fn expand_items<I>(items: I, settings: &LibrarySettings) -> Vec<PathBuf>
where
    I: IntoIterator<Item = PathBuf>,
{
    let mut out = Vec::new();
    for item in items {
        if item.is_dir() {
            out.extend(files_under(&item, settings));
        } else if item.is_file() {
            out.push(item);
        } else {
            tracing::debug!(path = %item.display(), "dropped item does not exist");
        }
    }
    out
}

fn files_under(dir: &Path, settings: &LibrarySettings) -> Vec<PathBuf> {
    let mut walker = WalkDir::new(dir)
        .follow_links(settings.follow_links)
        .sort_by_file_name();

    // Non-recursive = only the root directory.
    if !settings.recursive {
        walker = walker.max_depth(1);
    }

    walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .collect()
}
