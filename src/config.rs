use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::storage::StoreConfig;

pub const DATABASE_ENV: &str = "HRDASH_DATABASE";
pub const DEFAULT_PORT: u16 = 8501;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct HrdashConfig {
    pub database: Option<String>,
    pub port: Option<u16>,
    pub sample_size: Option<usize>,
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("hrdash.toml")
}

pub fn default_database_path() -> PathBuf {
    PathBuf::from("hrdash.db")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<HrdashConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: HrdashConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &HrdashConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

/// Resolve the store location: flag, then environment, then config file, then default.
///
/// `env` is the variable lookup, normally `|k| std::env::var(k).ok()`.
pub fn resolve_store(
    flag: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
    file: Option<&HrdashConfig>,
) -> StoreConfig {
    let path = flag
        .map(Path::to_path_buf)
        .or_else(|| env(DATABASE_ENV).filter(|v| !v.is_empty()).map(PathBuf::from))
        .or_else(|| file.and_then(|c| c.database.as_ref()).map(PathBuf::from))
        .unwrap_or_else(default_database_path);
    StoreConfig::new(path)
}

pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_config() -> HrdashConfig {
        HrdashConfig {
            database: Some("from_file.db".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_resolution_order() {
        let env = |k: &str| (k == DATABASE_ENV).then(|| "from_env.db".to_string());
        let no_env = |_: &str| None;
        let file = file_config();

        let flag = Path::new("flag.db");
        assert_eq!(resolve_store(Some(flag), env, Some(&file)).path, PathBuf::from("flag.db"));
        assert_eq!(resolve_store(None, env, Some(&file)).path, PathBuf::from("from_env.db"));
        assert_eq!(resolve_store(None, no_env, Some(&file)).path, PathBuf::from("from_file.db"));
        assert_eq!(resolve_store(None, no_env, None).path, default_database_path());
    }

    #[test]
    fn test_write_and_load_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hrdash.toml");
        let config = HrdashConfig {
            database: Some("hr.db".into()),
            port: Some(9000),
            sample_size: Some(50),
        };

        write_config(&path, &config, false).unwrap();
        assert!(write_config(&path, &config, false).is_err());
        write_config(&path, &config, true).unwrap();

        assert_eq!(load_config(Some(&path)).unwrap(), Some(config));
        assert_eq!(load_config(Some(&dir.path().join("absent.toml"))).unwrap(), None);
    }

    #[test]
    fn test_ensure_db_dir() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("nested").join("hr.db");
        ensure_db_dir(&db).unwrap();
        assert!(db.parent().unwrap().exists());
    }
}
