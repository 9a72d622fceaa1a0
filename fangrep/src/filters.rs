use std::path::Path;

/// Checks whether a path names a hidden entry under the dot-prefix
/// convention.
///
/// Only the final path segment is examined. The navigation markers `"."`
/// and `".."` are never hidden, and neither is any name beginning with
/// `".."` (so `"..foo"` is not hidden). Everything else is hidden exactly
/// when its first character is `'.'`.
#[cfg(not(windows))]
pub fn is_hidden(path: &Path) -> bool {
    use std::path::Component;

    match path.components().next_back() {
        Some(Component::Normal(name)) => {
            let name = name.to_string_lossy();
            !name.starts_with("..") && name.starts_with('.')
        }
        // CurDir, ParentDir, root, or an empty path: navigation markers,
        // never user-hidden.
        _ => false,
    }
}

/// Hidden-entry detection is only supported on unix-like platforms; on
/// Windows every entry is treated as visible and the include-hidden flag
/// has no effect.
#[cfg(windows)]
pub fn is_hidden(_path: &Path) -> bool {
    false
}
