//! Filename derivation for the one-file-per-configuration direction.

/// Convert a task name into a filesystem-safe stem by replacing path-unsafe
/// characters and spaces with underscores. Deterministic, so repeated
/// conversions of the same name overwrite the same file.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|ch| match ch {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | ' ' => '_',
            other => other,
        })
        .collect()
}
