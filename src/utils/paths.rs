//! Path normalization

use std::path::{Component, Path, PathBuf};

/// Make `entry` absolute against `base` without touching the filesystem.
///
/// `.` components are dropped and `..` pops the previous component; a `..`
/// at the root stays at the root. The entry text is otherwise kept as
/// written. Returns `None` for a blank entry.
pub fn absolutize(base: &Path, entry: &str) -> Option<PathBuf> {
    if entry.trim().is_empty() {
        return None;
    }

    let candidate = Path::new(entry);
    let joined = if candidate.is_absolute() { candidate.to_path_buf() } else { base.join(candidate) };

    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(part) => out.push(part),
        }
    }
    Some(out)
}
