//! Locating and reading `.spm-studio.toml`

use std::path::PathBuf;

const CONFIG_FILE: &str = ".spm-studio.toml";

/// Places searched for the config file, in priority order:
/// the working directory, then the home directory
fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(CONFIG_FILE)];
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(CONFIG_FILE));
    }
    paths
}

/// Content of the first config file found, if any
pub fn load_config_file() -> Option<String> {
    candidate_paths().into_iter().find_map(|path| {
        let content = std::fs::read_to_string(&path).ok()?;
        log::debug!("Loaded config from {}", path.display());
        Some(content)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_working_directory_is_searched_first() {
        let paths = candidate_paths();
        assert_eq!(paths[0], PathBuf::from(CONFIG_FILE));
    }

    #[test]
    fn test_home_candidate_comes_from_dirs() {
        let paths = candidate_paths();
        match dirs::home_dir() {
            Some(home) => {
                assert_eq!(paths.len(), 2);
                assert_eq!(paths[1], home.join(CONFIG_FILE));
            }
            None => assert_eq!(paths.len(), 1),
        }
    }
}
