use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

pub const DEFAULT_DB_URL: &str = "sqlite://quiz_app.db";

#[derive(Debug, Parser)]
#[command(name = "quiz", version, about = "Multiple-choice quizzes backed by SQLite")]
pub struct Cli {
    /// SQLite database URL or file path
    #[arg(long = "db", env = "QUIZ_DB_URL", default_value = DEFAULT_DB_URL, global = true)]
    pub db: String,

    /// Log filter directive, e.g. "info" or "storage=debug"
    #[arg(long, env = "RUST_LOG", default_value = "warn", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Seed the built-in catalog and run the interactive menu
    Play,
    /// Seed a catalog and exit
    Seed {
        /// JSON catalog file; the built-in catalog is used when omitted
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
}

impl Cli {
    #[must_use]
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Play)
    }

    #[must_use]
    pub fn database_url(&self) -> String {
        normalize_sqlite_url(&self.db)
    }
}

/// Turns a bare path or a relative `sqlite://` URL into an absolute
/// `sqlite://` URL. Query parameters are kept.
///
/// In-memory URLs pass through.
#[must_use]
pub fn normalize_sqlite_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed == "sqlite::memory:" || trimmed.starts_with("sqlite:file:") {
        return trimmed.to_owned();
    }

    let rest = trimmed
        .strip_prefix("sqlite://")
        .or_else(|| trimmed.strip_prefix("sqlite:"))
        .unwrap_or(trimmed);
    let (path, query) = match rest.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (rest, None),
    };

    let path = Path::new(path);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    match query {
        Some(query) => format!("sqlite://{}?{query}", absolute.display()),
        None => format!("sqlite://{}", absolute.display()),
    }
}

/// The driver creates the database file itself, but not missing directories.
///
/// # Errors
///
/// Returns the I/O error if the parent directory cannot be created.
pub fn ensure_parent_dir(db_url: &str) -> std::io::Result<()> {
    let Some(path) = db_url.strip_prefix("sqlite://") else {
        return Ok(());
    };
    let path = path.split('?').next().unwrap_or(path);
    match Path::new(path).parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_and_absolute_urls_pass_through() {
        for url in [
            "sqlite::memory:",
            "sqlite:///var/lib/quiz/quiz_app.db",
            "sqlite:file:memdb_x?mode=memory&cache=shared",
        ] {
            assert_eq!(normalize_sqlite_url(url), url);
        }
    }

    #[test]
    fn relative_paths_become_absolute_urls() {
        let cwd = std::env::current_dir().unwrap();
        let expected = format!("sqlite://{}", cwd.join("quiz_app.db").display());
        assert_eq!(normalize_sqlite_url(DEFAULT_DB_URL), expected);
        assert_eq!(normalize_sqlite_url("quiz_app.db"), expected);
        assert_eq!(normalize_sqlite_url(" sqlite:quiz_app.db "), expected);

        let nested = normalize_sqlite_url("data/quiz.db");
        assert_eq!(nested, format!("sqlite://{}", cwd.join("data/quiz.db").display()));
    }

    #[test]
    fn query_parameters_survive_normalization() {
        let url = normalize_sqlite_url("sqlite://quiz.db?mode=rwc");
        assert!(url.starts_with("sqlite:///"));
        assert!(url.ends_with("/quiz.db?mode=rwc"));
    }

    #[test]
    fn play_is_the_default_command() {
        let cli = Cli::parse_from(["quiz", "--db", "sqlite::memory:"]);
        assert_eq!(cli.command(), Command::Play);
        assert_eq!(cli.database_url(), "sqlite::memory:");
    }

    #[test]
    fn seed_accepts_a_catalog_path() {
        let cli = Cli::parse_from(["quiz", "seed", "--catalog", "extra.json"]);
        assert_eq!(
            cli.command(),
            Command::Seed {
                catalog: Some(PathBuf::from("extra.json"))
            }
        );
    }

    #[test]
    fn parent_dir_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("nested/deeper/quiz.db");
        let url = format!("sqlite://{}", db.display());
        ensure_parent_dir(&url).unwrap();
        assert!(db.parent().unwrap().is_dir());
        assert!(ensure_parent_dir("sqlite::memory:").is_ok());
    }
}
