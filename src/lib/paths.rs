//! Shared helpers reused across modules (e.g., path validation).

use std::path::{Component, Path};

/// Returns true if the path is non-empty and absolute.
pub fn is_nonempty_absolute(path: &Path) -> bool {
    !path.as_os_str().is_empty() && path.is_absolute()
}

/// Returns true if `path` is a non-empty relative path that cannot leave its base directory.
pub fn is_confined_relative(path: &Path) -> bool {
    !path.as_os_str().is_empty() && path.components().all(stays_inside)
}

fn stays_inside(component: Component<'_>) -> bool {
    matches!(component, Component::Normal(_) | Component::CurDir)
}
