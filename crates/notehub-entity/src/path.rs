//! Materialized path helpers.
//!
//! Paths are slash-joined ancestor names with a leading slash, e.g.
//! `/Notes/Work/todo.md`. They are computed once at creation and patched
//! in place on rename; nothing here walks the hierarchy.

/// Path of a node named `name` placed under `parent_path`, or at root.
pub fn child_path(parent_path: Option<&str>, name: &str) -> String {
    match parent_path {
        Some(parent) => format!("{parent}/{name}"),
        None => format!("/{name}"),
    }
}

/// Replace the final segment of `path` with `new_name`.
pub fn rename_last_segment(path: &str, new_name: &str) -> String {
    match path.rsplit_once('/') {
        Some((head, _)) => format!("{head}/{new_name}"),
        None => new_name.to_string(),
    }
}
