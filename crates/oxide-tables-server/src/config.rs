//! Command-line configuration.

use std::net::SocketAddr;

use clap::Parser;
use oxide_tables_sqlite::RawSqlCapability;
use tracing::Level;

/// Create, fill and query SQLite tables over HTTP.
#[derive(Debug, Parser)]
#[command(name = "oxide-tables")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Database URL (SQLite path or connection string).
    #[arg(short, long, env = "DATABASE_URL", default_value = "sqlite:inline.db?mode=rwc")]
    pub database: String,

    /// Address to listen on.
    #[arg(short, long, env = "OXIDE_TABLES_BIND", default_value = "127.0.0.1:1212")]
    pub bind: SocketAddr,

    /// Maximum number of pooled database connections.
    #[arg(long, default_value_t = 5)]
    pub max_connections: u32,

    /// Reject requests to the raw SQL endpoint.
    #[arg(long)]
    pub disable_raw_sql: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Log level selected by `--verbose`.
    #[must_use]
    pub const fn log_level(&self) -> Level {
        if self.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        }
    }

    /// The raw SQL capability, unless disabled.
    #[must_use]
    pub const fn raw_sql_capability(&self) -> Option<RawSqlCapability> {
        if self.disable_raw_sql {
            None
        } else {
            Some(RawSqlCapability::grant())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["oxide-tables"]).unwrap();
        assert_eq!(cli.bind, "127.0.0.1:1212".parse().unwrap());
        assert_eq!(cli.max_connections, 5);
        assert_eq!(cli.log_level(), Level::INFO);
        assert!(cli.raw_sql_capability().is_some());
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "oxide-tables",
            "--database",
            "sqlite::memory:",
            "--bind",
            "0.0.0.0:8080",
            "--disable-raw-sql",
            "-v",
        ])
        .unwrap();
        assert_eq!(cli.database, "sqlite::memory:");
        assert_eq!(cli.bind.port(), 8080);
        assert!(cli.raw_sql_capability().is_none());
        assert_eq!(cli.log_level(), Level::DEBUG);
    }

    #[test]
    fn test_bad_bind_address() {
        assert!(Cli::try_parse_from(["oxide-tables", "--bind", "nowhere"]).is_err());
    }
}
