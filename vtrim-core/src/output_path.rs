//! Path arithmetic for mirroring inputs under the output root.
//!
//! All helpers here are lexical: they never touch the filesystem. The
//! coordinator canonicalizes the roots first so that lexical comparisons are
//! meaningful.

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

/// Computes `path` relative to `base`, inserting `..` where `path` leaves
/// `base`.
///
/// Returns `None` when the two paths cannot be related lexically: one is
/// absolute and the other relative, they live on different prefixes (Windows
/// drives), or `base` contains `..` past the shared part.
pub fn relative_path(base: &Path, path: &Path) -> Option<PathBuf> {
    if base.is_absolute() != path.is_absolute() {
        return None;
    }

    let base_components: Vec<Component<'_>> = base
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    let path_components: Vec<Component<'_>> = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();

    let shared = base_components
        .iter()
        .zip(path_components.iter())
        .take_while(|(a, b)| a == b)
        .count();

    // Diverging before the root means different drives or prefixes.
    if shared == 0 && base.is_absolute() {
        return None;
    }

    let mut relative = PathBuf::new();
    for component in &base_components[shared..] {
        match component {
            Component::Normal(_) => relative.push(".."),
            _ => return None,
        }
    }
    for component in &path_components[shared..] {
        relative.push(component.as_os_str());
    }
    Some(relative)
}

/// True when the root-relative `path` lies inside the root-relative `subtree`.
///
/// A subtree outside the root (starting with `..`) can never contain a
/// root-relative entry. The comparison is per component, so `out` does not
/// contain `outtakes/clip.mp4`.
pub fn is_within(path: &Path, subtree: &Path) -> bool {
    if matches!(subtree.components().next(), Some(Component::ParentDir)) {
        return false;
    }
    path.starts_with(subtree)
}

/// Removes every denylisted character from each component of `path`.
///
/// A component that would end up empty, `.` or `..` is kept as it was, so the
/// result never leaves the directory it is joined onto. Components that are
/// not valid UTF-8 are kept untouched.
pub fn sanitize_path(path: &Path, denylist: &[char]) -> PathBuf {
    if denylist.is_empty() {
        return path.to_path_buf();
    }

    let mut sanitized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(name) => match name.to_str() {
                Some(text) => {
                    let cleaned: String = text.chars().filter(|c| !denylist.contains(c)).collect();
                    if matches!(cleaned.as_str(), "" | "." | "..") {
                        sanitized.push(name);
                    } else {
                        sanitized.push(OsString::from(cleaned));
                    }
                }
                None => sanitized.push(name),
            },
            other => sanitized.push(other.as_os_str()),
        }
    }
    sanitized
}

/// Mirrors a root-relative input under the root-relative output directory,
/// sanitizing the mirrored part.
pub fn mirror_output_path(output_dir: &Path, input: &Path, denylist: &[char]) -> PathBuf {
    output_dir.join(sanitize_path(input, denylist))
}
