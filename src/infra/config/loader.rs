use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::infra::{
    config::{file_config::FileConfig, AppConfig},
    error::AppError,
};

const DEFAULT_CONFIG_PATH: &str = "config.toml";
const APP_DIR_NAME: &str = "chatroom";

/// Configuration plus the non-fatal problems found while reading it.
///
/// Warnings are reported once logging is up; they never abort startup.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoadedConfig {
    pub config: AppConfig,
    pub source: Option<PathBuf>,
    pub warnings: Vec<String>,
}

pub fn load(path: Option<&Path>) -> Result<LoadedConfig, AppError> {
    let Some(config_path) = resolve_path(path) else {
        return Ok(LoadedConfig::default());
    };

    let mut loaded = LoadedConfig::default();

    let raw = match fs::read_to_string(&config_path) {
        Ok(raw) => raw,
        Err(source) if source.kind() == ErrorKind::NotFound => {
            loaded.warnings.push(format!(
                "config file {} not found; using defaults",
                config_path.display()
            ));
            return Ok(loaded);
        }
        Err(source) => {
            return Err(AppError::ConfigRead {
                path: config_path,
                source,
            })
        }
    };

    match toml::from_str::<FileConfig>(&raw) {
        Ok(file_config) => file_config.merge_into(&mut loaded.config, &mut loaded.warnings),
        Err(error) => loaded.warnings.push(format!(
            "config file {} is malformed ({}); using defaults",
            config_path.display(),
            error.message()
        )),
    }

    loaded.source = Some(config_path);
    Ok(loaded)
}

/// An explicit path always wins; otherwise `./config.toml`, then the user
/// config directory.
fn resolve_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    let local = PathBuf::from(DEFAULT_CONFIG_PATH);
    if local.exists() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME).join(DEFAULT_CONFIG_PATH))
        .filter(|path| path.exists())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::infra::config::{app_config::DEFAULT_MAX_POSTS, DisplayZone};

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file should be creatable");
        file.write_all(contents.as_bytes())
            .expect("must write test config");
        file
    }

    #[test]
    fn returns_defaults_when_file_is_missing() {
        let loaded = load(Some(Path::new("./missing-config.toml"))).expect("config must load");

        assert_eq!(loaded.config, AppConfig::default());
        assert_eq!(loaded.warnings.len(), 1);
    }

    #[test]
    fn merges_file_values_over_defaults() {
        let file = write_config(
            r#"[logging]
level = "debug"

[remote]
endpoint = "https://chat.example.com/prod"
timeout_ms = 2500

[posts]
max_posts = 20

[display]
timezone = "local"
clear_screen = true
"#,
        );

        let loaded = load(Some(file.path())).expect("config must load");

        assert!(loaded.warnings.is_empty());
        assert_eq!(loaded.config.logging.level, "debug");
        assert_eq!(loaded.config.remote.endpoint, "https://chat.example.com/prod");
        assert_eq!(loaded.config.remote.timeout_ms, 2_500);
        assert_eq!(loaded.config.posts.max_posts, 20);
        assert_eq!(loaded.config.display.timezone, DisplayZone::Local);
        assert!(loaded.config.display.clear_screen);
        assert_eq!(loaded.source.as_deref(), Some(file.path()));
    }

    #[test]
    fn malformed_max_posts_falls_back_to_default_with_warning() {
        for value in ["\"lots\"", "-3", "0", "1.5"] {
            let file = write_config(&format!("[posts]\nmax_posts = {value}\n"));

            let loaded = load(Some(file.path())).expect("config must load");

            assert_eq!(loaded.config.posts.max_posts, DEFAULT_MAX_POSTS);
            assert_eq!(loaded.warnings.len(), 1, "value {value}");
            assert!(loaded.warnings[0].contains("posts.max_posts"));
        }
    }

    #[test]
    fn numeric_string_max_posts_is_accepted() {
        let file = write_config("[posts]\nmax_posts = \"50\"\n");

        let loaded = load(Some(file.path())).expect("config must load");

        assert_eq!(loaded.config.posts.max_posts, 50);
    }

    #[test]
    fn unparsable_file_yields_defaults_instead_of_aborting() {
        let file = write_config("[posts\nmax_posts = ");

        let loaded = load(Some(file.path())).expect("config must load");

        assert_eq!(loaded.config, AppConfig::default());
        assert!(loaded.warnings[0].contains("malformed"));
    }

    #[test]
    fn unknown_timezone_keeps_utc() {
        let file = write_config("[display]\ntimezone = \"Mars/Olympus\"\n");

        let loaded = load(Some(file.path())).expect("config must load");

        assert_eq!(loaded.config.display.timezone, DisplayZone::Utc);
        assert_eq!(loaded.warnings.len(), 1);
    }
}
