//! Virtual-path helpers shared by the file store, explorer, and shell commands.

/// Normalizes a virtual filesystem path for navigation.
///
/// This helper trims whitespace, converts backslashes to `/`, resolves `.`/`..`, ensures a
/// leading slash, and returns `/` for empty or fully-collapsed paths. Trailing slashes are
/// dropped, so callers that need a directory key should pass the result through
/// [`directory_prefix`].
pub fn normalize_virtual_path(path: &str) -> String {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return "/".to_string();
    }

    let mut out = String::new();
    for segment in trimmed.replace('\\', "/").split('/') {
        if segment.is_empty() || segment == "." {
            continue;
        }
        if segment == ".." {
            if let Some(idx) = out.rfind('/') {
                out.truncate(idx);
            }
            continue;
        }
        out.push('/');
        out.push_str(segment);
    }

    if out.is_empty() {
        "/".to_string()
    } else {
        out
    }
}

/// Returns the parent of a virtual path, or `/` for the root and top-level entries.
pub fn parent_virtual_path(path: &str) -> String {
    let normalized = normalize_virtual_path(path);
    match normalized.rfind('/') {
        Some(0) | None => "/".to_string(),
        Some(idx) => normalized[..idx].to_string(),
    }
}

/// Returns `path` with exactly one trailing `/`.
pub fn directory_prefix(path: &str) -> String {
    if path.ends_with('/') {
        path.to_string()
    } else {
        format!("{path}/")
    }
}

/// Resolves `input` against `cwd`; absolute inputs ignore `cwd`.
pub fn join_virtual_path(cwd: &str, input: &str) -> String {
    if input.trim().starts_with('/') {
        return normalize_virtual_path(input);
    }
    normalize_virtual_path(&format!("{}/{}", cwd.trim_end_matches('/'), input))
}
