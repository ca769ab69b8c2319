//! quarry CLI - render JSON statement trees to SQL
//!
//! Usage:
//!   quarry render <file.json> [--dialect <dialect>] [--inline] [--config <quarry.toml>]
//!   quarry dialects
//!
//! Examples:
//!   quarry render query.json --dialect postgres
//!   quarry render query.json --dialect tsql --output json
//!   quarry render query.json --inline

use clap::{Parser, Subcommand, ValueEnum};
use quarry::config::Settings;
use quarry::sql::{Dialect, SqlDialect, Statement, ToSql};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "quarry")]
#[command(about = "quarry - render relational-algebra SQL trees for any supported dialect")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a JSON statement to SQL
    Render {
        /// Path to the statement JSON file
        file: PathBuf,

        /// SQL dialect to generate (defaults to the configured one)
        #[arg(short, long)]
        dialect: Option<Dialect>,

        /// Inline bind values instead of emitting placeholders
        #[arg(long)]
        inline: bool,

        /// Path to a quarry.toml config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "sql")]
        output: OutputFormat,
    },

    /// List supported dialects and their aliases
    Dialects,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// SQL followed by a bind listing
    Sql,
    /// `{"sql": ..., "binds": [...], "fingerprint": ...}`
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            file,
            dialect,
            inline,
            config,
            output,
        } => cmd_render(file, dialect, inline, config, output),
        Commands::Dialects => cmd_dialects(),
    }
}

fn cmd_render(
    file: PathBuf,
    dialect: Option<Dialect>,
    inline: bool,
    config: Option<PathBuf>,
    output: OutputFormat,
) -> ExitCode {
    let settings = match Settings::load(config.as_deref()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Config error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let dialect = match dialect.map_or_else(|| settings.dialect(), Ok) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Config error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut options = settings.render_options();
    if inline {
        options.prepared_statements = false;
    }

    let source = match fs::read_to_string(&file) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading file '{}': {}", file.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let statement: Statement = match serde_json::from_str(&source) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Invalid statement JSON in '{}': {}", file.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let rendered = match statement.to_sql_with(dialect, options) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Render error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match output {
        OutputFormat::Sql => {
            println!("{}", rendered.sql);
            for (i, bind) in rendered.binds.iter().enumerate() {
                println!("-- {} = {}", dialect.placeholder(i + 1), bind);
            }
        }
        OutputFormat::Json => {
            let fingerprint = match statement.fingerprint() {
                Ok(f) => f,
                Err(e) => {
                    eprintln!("Fingerprint error: {}", e);
                    return ExitCode::FAILURE;
                }
            };
            let doc = serde_json::json!({
                "dialect": dialect,
                "sql": rendered.sql,
                "binds": rendered.binds,
                "fingerprint": fingerprint,
            });
            println!("{}", doc);
        }
    }
    ExitCode::SUCCESS
}

fn cmd_dialects() -> ExitCode {
    println!("Dialects:");
    for dialect in Dialect::ALL {
        let aliases = dialect.aliases();
        if aliases.is_empty() {
            println!("  - {}", dialect);
        } else {
            println!("  - {} (aliases: {})", dialect, aliases.join(", "));
        }
    }
    ExitCode::SUCCESS
}
