//! Module search path rules.
//!
//! Lua resolves `require "name"` by substituting `name` for `?` in each
//! `;`-separated pattern of `package.path`. Loading a script appends one
//! pattern rooted at the script's own directory so it can require siblings.

/// Directory portion of `path`, keeping the trailing separator.
///
/// A path without any separator lives in the current directory (`./`).
pub fn script_base_dir(path: &str) -> String {
    match path.rfind(['/', '\\']) {
        Some(idx) => path[..=idx].to_string(),
        None => "./".to_string(),
    }
}

/// Search path fragment for scripts living in `base_dir`.
pub fn package_path_fragment(base_dir: &str) -> String {
    format!(";{}?.lua;", base_dir)
}

/// Append `fragment` to the existing search path; existing patterns keep priority.
pub fn append_search_path(current: &str, fragment: &str) -> String {
    let mut path = String::with_capacity(current.len() + fragment.len());
    path.push_str(current);
    path.push_str(fragment);
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_dir_of_nested_path() {
        assert_eq!(script_base_dir("games/pong/main.lua"), "games/pong/");
    }

    #[test]
    fn test_base_dir_keeps_leading_relative_segment() {
        assert_eq!(script_base_dir("./pong/main.lua"), "./pong/");
        assert_eq!(script_base_dir("../pong/main.lua"), "../pong/");
    }

    #[test]
    fn test_base_dir_of_bare_filename() {
        assert_eq!(script_base_dir("main.lua"), "./");
    }

    #[test]
    fn test_base_dir_of_absolute_and_windows_paths() {
        assert_eq!(script_base_dir("/opt/games/main.lua"), "/opt/games/");
        assert_eq!(script_base_dir(r"C:\games\main.lua"), r"C:\games\");
    }

    #[test]
    fn test_fragment_shape() {
        assert_eq!(package_path_fragment("games/pong/"), ";games/pong/?.lua;");
    }

    #[test]
    fn test_append_preserves_existing_patterns() {
        let current = "/usr/share/lua/5.4/?.lua;./?.lua";
        let updated = append_search_path(current, &package_path_fragment("pong/"));
        assert!(updated.starts_with(current));
        assert!(updated.ends_with(";pong/?.lua;"));
    }
}
