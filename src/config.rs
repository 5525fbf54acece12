//! Command-line options and config file locations.
use std::path::{Path, PathBuf};

use clap::Parser;

/// Manage the users stored in a SQLite database from the terminal.
#[derive(Debug, Parser)]
#[command(name = "user-manager", version, about)]
pub struct Cli {
    /// SQLite database file; created with an empty `User` table if missing.
    #[arg(long, env = "USER_MANAGER_DB", default_value = "users.db")]
    pub db: PathBuf,

    /// Use a throwaway in-memory database. Takes precedence over `--db`.
    #[arg(long)]
    pub in_memory: bool,

    /// Directory holding `theme.conf` and `keybinds.conf`.
    #[arg(long, env = "USER_MANAGER_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    /// Where log records are written; the terminal itself is owned by the UI.
    #[arg(long, default_value = "user-manager.log")]
    pub log_file: PathBuf,

    /// Tracing filter, e.g. `debug` or `user_manager=trace`.
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

impl Cli {
    /// Resolve the config directory: explicit flag, then XDG, then `~/.config`, then `.`.
    pub fn resolved_config_dir(&self) -> PathBuf {
        if let Some(dir) = &self.config_dir {
            return dir.clone();
        }
        default_config_dir(std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from), std::env::var_os("HOME").map(PathBuf::from))
    }
}

pub fn default_config_dir(xdg_config_home: Option<PathBuf>, home: Option<PathBuf>) -> PathBuf {
    if let Some(xdg) = xdg_config_home.filter(|p| !p.as_os_str().is_empty()) {
        return xdg.join("user-manager");
    }
    if let Some(home) = home.filter(|p| !p.as_os_str().is_empty()) {
        return home.join(".config").join("user-manager");
    }
    PathBuf::from(".")
}

pub fn theme_path(config_dir: &Path) -> PathBuf {
    config_dir.join("theme.conf")
}

pub fn keybinds_path(config_dir: &Path) -> PathBuf {
    config_dir.join("keybinds.conf")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_flags() {
        let cli = Cli::try_parse_from(["user-manager"]).unwrap();
        assert!(!cli.in_memory);
        assert_eq!(cli.log_file, PathBuf::from("user-manager.log"));
    }

    #[test]
    fn in_memory_is_accepted_alongside_db() {
        // `--db` may also arrive from USER_MANAGER_DB; both parse and the store opener prefers memory.
        let cli = Cli::try_parse_from(["user-manager", "--in-memory", "--db", "x.db"]).unwrap();
        assert!(cli.in_memory);
        assert_eq!(cli.db, PathBuf::from("x.db"));
    }

    #[test]
    fn explicit_config_dir_wins() {
        let cli = Cli::try_parse_from(["user-manager", "--config-dir", "/tmp/um"]).unwrap();
        assert_eq!(cli.resolved_config_dir(), PathBuf::from("/tmp/um"));
        assert_eq!(theme_path(Path::new("/tmp/um")), PathBuf::from("/tmp/um/theme.conf"));
    }

    #[test]
    fn config_dir_fallback_order() {
        assert_eq!(
            default_config_dir(Some("/xdg".into()), Some("/home/a".into())),
            PathBuf::from("/xdg/user-manager")
        );
        assert_eq!(
            default_config_dir(Some("".into()), Some("/home/a".into())),
            PathBuf::from("/home/a/.config/user-manager")
        );
        assert_eq!(default_config_dir(None, None), PathBuf::from("."));
    }
}
