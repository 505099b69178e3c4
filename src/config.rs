use std::path::PathBuf;

pub const DEFAULT_ASSETS_DIR: &str = "./assets";
pub const DEFAULT_DB_PATH: &str = "./data/preferences.db";

/// Paths the binary runs against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub assets_dir: PathBuf,
    pub db_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from(DEFAULT_ASSETS_DIR),
            db_path: PathBuf::from(DEFAULT_DB_PATH),
        }
    }
}

impl AppConfig {
    /// Reads `--assets <dir>` and `--db <path>`; anything else is ignored.
    pub fn from_args(args: Vec<String>) -> Self {
        let mut config = Self::default();
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--assets" => {
                    if let Some(value) = iter.next() {
                        config.assets_dir = PathBuf::from(value);
                    }
                }
                "--db" => {
                    if let Some(value) = iter.next() {
                        config.db_path = PathBuf::from(value);
                    }
                }
                _ => {}
            }
        }
        config
    }
}
