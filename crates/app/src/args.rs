use std::fmt;
use std::path::PathBuf;

use dex_core::model::Group;

pub const DEFAULT_DB_URL: &str = "sqlite://dex-challenge.sqlite3";

#[derive(Debug, PartialEq, Eq)]
pub enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    UnknownCommand(String),
    InvalidDbUrl { raw: String },
    InvalidGroup { raw: String },
    HelpRequested,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownCommand(cmd) => write!(f, "unknown subcommand: {cmd}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidGroup { raw } => write!(f, "invalid --group value: {raw:?}"),
            ArgsError::HelpRequested => write!(f, "help requested"),
        }
    }
}

impl std::error::Error for ArgsError {}

pub fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  dex-challenge [play|status|reset] [--data <path>] [--db <sqlite_url>] [--group <g>]...");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --data  bundled Generation I dataset");
    eprintln!("  --db    {DEFAULT_DB_URL}");
    eprintln!("  --group every group in the dataset (repeat or use commas: --group 1,2)");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  DEX_DATA_PATH, DEX_DB_URL, DEX_GROUPS, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Play,
    Status,
    Reset,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "play" => Some(Self::Play),
            "status" => Some(Self::Status),
            "reset" => Some(Self::Reset),
            _ => None,
        }
    }
}

/// Resolved configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub command: Command,
    pub data_path: Option<PathBuf>,
    pub db_url: String,
    pub groups: Vec<Group>,
}

/// Environment fallbacks, read once so parsing stays testable.
#[derive(Debug, Clone, Default)]
pub struct Env {
    pub data_path: Option<String>,
    pub db_url: Option<String>,
    pub groups: Option<String>,
}

impl Env {
    pub fn from_process() -> Self {
        Self {
            data_path: std::env::var("DEX_DATA_PATH").ok(),
            db_url: std::env::var("DEX_DB_URL").ok(),
            groups: std::env::var("DEX_GROUPS").ok(),
        }
    }
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn parse_groups(raw: &str, groups: &mut Vec<Group>) -> Result<(), ArgsError> {
    for part in raw.split(',') {
        let group = Group::new(part);
        if group.as_str().is_empty() {
            return Err(ArgsError::InvalidGroup {
                raw: raw.to_owned(),
            });
        }
        groups.push(group);
    }
    Ok(())
}

impl Args {
    pub fn parse(argv: impl IntoIterator<Item = String>, env: &Env) -> Result<Self, ArgsError> {
        let mut args = argv.into_iter().peekable();

        let command = match args.peek() {
            Some(first) if !first.starts_with('-') => {
                let first = first.clone();
                args.next();
                Command::from_arg(&first).ok_or(ArgsError::UnknownCommand(first))?
            }
            _ => Command::Play,
        };

        let mut data_path = env.data_path.clone().filter(|p| !p.trim().is_empty());
        let mut db_url = env
            .db_url
            .clone()
            .filter(|url| !url.trim().is_empty())
            .map_or_else(|| DEFAULT_DB_URL.to_owned(), normalize_sqlite_url);
        let mut groups = Vec::new();
        if let Some(raw) = env.groups.as_deref().filter(|raw| !raw.trim().is_empty()) {
            parse_groups(raw, &mut groups)?;
        }
        let mut cli_groups: Option<Vec<Group>> = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--data" => data_path = Some(require_value(&mut args, "--data")?),
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--group" => {
                    let value = require_value(&mut args, "--group")?;
                    parse_groups(&value, cli_groups.get_or_insert_with(Vec::new))?;
                }
                "--help" | "-h" => return Err(ArgsError::HelpRequested),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            command,
            data_path: data_path.map(PathBuf::from),
            db_url,
            groups: cli_groups.unwrap_or(groups),
        })
    }
}

pub fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str], env: &Env) -> Result<Args, ArgsError> {
        Args::parse(args.iter().map(|s| (*s).to_owned()), env)
    }

    #[test]
    fn defaults_to_play_everything() {
        let args = parse(&[], &Env::default()).unwrap();
        assert_eq!(args.command, Command::Play);
        assert_eq!(args.data_path, None);
        assert_eq!(args.db_url, DEFAULT_DB_URL);
        assert!(args.groups.is_empty());
    }

    #[test]
    fn parses_subcommand_and_flags() {
        let args = parse(
            &["status", "--db", "sqlite::memory:", "--group", "1,2", "--group", "3"],
            &Env::default(),
        )
        .unwrap();
        assert_eq!(args.command, Command::Status);
        assert_eq!(args.db_url, "sqlite::memory:");
        assert_eq!(args.groups, vec![Group::from(1), Group::from(2), Group::from(3)]);
    }

    #[test]
    fn flags_override_environment() {
        let env = Env {
            data_path: Some("/srv/dex/all.json".into()),
            db_url: Some("sqlite:///tmp/dex.sqlite3".into()),
            groups: Some("4".into()),
        };
        let args = parse(&[], &env).unwrap();
        assert_eq!(args.data_path, Some(PathBuf::from("/srv/dex/all.json")));
        assert_eq!(args.db_url, "sqlite:///tmp/dex.sqlite3");
        assert_eq!(args.groups, vec![Group::from(4)]);

        let args = parse(&["--group", "1", "--data", "gen1.json"], &env).unwrap();
        assert_eq!(args.groups, vec![Group::from(1)]);
        assert_eq!(args.data_path, Some(PathBuf::from("gen1.json")));
    }

    #[test]
    fn relative_sqlite_paths_become_absolute() {
        let url = normalize_sqlite_url("sqlite:progress.sqlite3".into());
        assert!(url.starts_with("sqlite:///"), "{url}");
        assert!(url.ends_with("progress.sqlite3"));
    }

    #[test]
    fn rejects_bad_input() {
        let env = Env::default();
        assert_eq!(
            parse(&["--db"], &env).unwrap_err(),
            ArgsError::MissingValue { flag: "--db" }
        );
        assert_eq!(
            parse(&["--group", "1,,2"], &env).unwrap_err(),
            ArgsError::InvalidGroup { raw: "1,,2".into() }
        );
        assert_eq!(
            parse(&["battle"], &env).unwrap_err(),
            ArgsError::UnknownCommand("battle".into())
        );
        assert_eq!(
            parse(&["--verbose"], &env).unwrap_err(),
            ArgsError::UnknownArg("--verbose".into())
        );
        assert_eq!(parse(&["-h"], &env).unwrap_err(), ArgsError::HelpRequested);
    }
}
