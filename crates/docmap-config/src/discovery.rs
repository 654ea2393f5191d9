//! Configuration file discovery.
//!
//! Discovers `.docmap.toml` files by walking up the directory tree from a starting point,
//! then appending the global `~/.docmap.toml` if present.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::parse::is_root_config;

/// The configuration filename.
pub const CONFIG_FILENAME: &str = ".docmap.toml";

/// Discovers all configuration files relevant to the given directory.
///
/// Returns paths in precedence order: closest to `cwd` first, global (`~/.docmap.toml`) last.
///
/// The walk stops at the first file that sets `root = true`; the global file is then skipped
/// as well. Returns an empty vector if no configuration files are found.
pub fn discover_config_files(cwd: &Path) -> Vec<PathBuf> {
    let mut configs = Vec::new();
    let mut found_root = false;

    let mut current = Some(cwd);
    while let Some(dir) = current {
        let config_path = dir.join(CONFIG_FILENAME);
        if config_path.is_file() {
            let is_root = is_root_config(&config_path);
            configs.push(config_path);
            if is_root {
                found_root = true;
                break;
            }
        }
        current = dir.parent();
    }

    if !found_root
        && let Some(global_path) = global_config_path()
        && global_path.is_file()
        && !configs.contains(&global_path)
    {
        configs.push(global_path);
    }

    configs
}

/// Returns the path to the global configuration file (`~/.docmap.toml`).
///
/// Returns `None` if the home directory cannot be determined.
pub fn global_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(CONFIG_FILENAME))
}

/// Checks if a path is the global configuration file.
pub fn is_global_config(path: &Path) -> bool {
    global_config_path().is_some_and(|global| path == global)
}

/// Renders a path for terminal output.
///
/// Paths under `cwd` are shown relative to it, paths under the home directory with a `~`
/// prefix, and anything else as given.
pub fn format_path_for_display(path: &Path, cwd: &Path) -> String {
    if path.starts_with(cwd)
        && let Some(relative) = pathdiff::diff_paths(path, cwd)
    {
        return relative.display().to_string();
    }
    if let Some(dirs) = BaseDirs::new()
        && let Ok(rest) = path.strip_prefix(dirs.home_dir())
    {
        return Path::new("~").join(rest).display().to_string();
    }
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::test_support::TestDir;

    #[test]
    fn test_discover_no_configs() {
        let test_dir = TestDir::new();
        let subdir = test_dir.create_dir("a/b/c");

        for config in discover_config_files(&subdir) {
            assert!(is_global_config(&config), "unexpected config: {config:?}");
        }
    }

    #[test]
    fn test_discover_multiple_configs_precedence_order() {
        let test_dir = TestDir::new();
        let root_config = test_dir.create_config_at_root();
        let mid_config = test_dir.create_config("a/b");
        let leaf_config = test_dir.create_config("a/b/c/d");
        let working_dir = test_dir.create_dir("a/b/c/d/e");

        let configs = discover_config_files(&working_dir);
        let local_configs: Vec<_> = configs.iter().filter(|p| !is_global_config(p)).collect();

        assert_eq!(local_configs, vec![&leaf_config, &mid_config, &root_config]);
    }

    #[test]
    fn test_discover_skips_non_file_config() {
        let test_dir = TestDir::new();
        fs::create_dir_all(test_dir.path().join(CONFIG_FILENAME)).unwrap();
        let subdir = test_dir.create_dir("subdir");

        let configs = discover_config_files(&subdir);
        assert!(configs.iter().all(|p| is_global_config(p)));
    }

    #[test]
    fn test_root_config_stops_discovery() {
        let test_dir = TestDir::new();
        let _parent_config = test_dir.create_config_at_root();
        let root_config = test_dir.create_root_config("project");
        let child_config = test_dir.create_config("project/docs");
        let working_dir = test_dir.create_dir("project/docs/drafts");

        let configs = discover_config_files(&working_dir);

        // Neither the parent nor the global file is included.
        assert_eq!(configs, vec![child_config, root_config]);
    }

    #[test]
    fn test_root_false_does_not_stop_discovery() {
        let test_dir = TestDir::new();
        let parent_config = test_dir.create_config_at_root();
        let mid_config = test_dir.create_config_with_content("project", "root = false\n");
        let working_dir = test_dir.create_dir("project/src");

        let configs = discover_config_files(&working_dir);
        let local_configs: Vec<_> = configs.iter().filter(|p| !is_global_config(p)).collect();

        assert_eq!(local_configs, vec![&mid_config, &parent_config]);
    }

    #[test]
    fn test_global_config_path_filename() {
        let path = global_config_path().unwrap();
        assert!(path.ends_with(CONFIG_FILENAME));
        assert!(is_global_config(&path));
        assert!(!is_global_config(Path::new("/elsewhere/.docmap.toml")));
    }

    #[test]
    fn test_format_path_relative_to_cwd() {
        let test_dir = TestDir::new();
        let config = test_dir.create_config("notes");

        let shown = format_path_for_display(&config, test_dir.path());
        assert_eq!(shown, Path::new("notes").join(CONFIG_FILENAME).display().to_string());
    }

    #[test]
    fn test_format_path_outside_cwd() {
        let shown = format_path_for_display(Path::new("/opt/data/file.md"), Path::new("/srv"));
        assert_eq!(shown, "/opt/data/file.md");
    }
}
