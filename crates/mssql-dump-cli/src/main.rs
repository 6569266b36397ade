//! mssql-dump CLI - dump SQL Server base-table data as insert scripts.
//!
//! Dump text goes to stdout; all diagnostics go to stderr, so the output
//! can be redirected without pollution.

use clap::Parser;
use mssql_dump::{DumpConfig, DumpError, Dumper, MssqlSource};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "mssql-dump")]
#[command(about = "Dump SQL Server base-table data as replayable insert scripts")]
#[command(version)]
struct Cli {
    /// Path to a YAML configuration file (flags override file values)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Server host name or address
    #[arg(short, long)]
    server: Option<String>,

    /// Server port [default: 1433]
    #[arg(long)]
    port: Option<u16>,

    /// Database name
    #[arg(short, long)]
    database: Option<String>,

    /// Username for sql authentication
    #[arg(short, long)]
    user: Option<String>,

    /// Password for sql authentication
    #[arg(short, long)]
    password: Option<String>,

    /// Use integrated authentication instead of username/password
    #[arg(short, long)]
    integrated: bool,

    /// Schema to dump [default: dbo]
    #[arg(long)]
    schema: Option<String>,

    /// Maximum rows to dump per table
    #[arg(short, long)]
    limit: Option<u32>,

    /// Wrap the dump in begin/commit transaction statements
    #[arg(short, long)]
    transaction: bool,

    /// Emit identity columns, bracketed by identity_insert toggles
    #[arg(long)]
    identity_insert: bool,

    /// Table to select (repeatable); with --exclusive, tables to skip
    #[arg(long = "table")]
    tables: Vec<String>,

    /// Treat the table list as an exclusion list
    #[arg(short = 'x', long)]
    exclusive: bool,

    /// Disable connection encryption
    #[arg(long)]
    no_encrypt: bool,

    /// Trust the server certificate
    #[arg(long)]
    trust_server_cert: bool,

    /// Log verbosity: debug, info, warn, error
    #[arg(long, default_value = "info")]
    verbosity: String,

    /// Log format: text or json
    #[arg(long, default_value = "text")]
    log_format: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.format_detailed());
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run() -> Result<(), DumpError> {
    let cli = Cli::parse();

    setup_logging(&cli.verbosity, &cli.log_format).map_err(DumpError::Config)?;

    let config = build_config(&cli)?;

    let source = MssqlSource::connect(&config.connection).await?;
    let mut dumper = Dumper::new(source, config.dump.to_options())
        .with_transaction(config.dump.transaction);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let summary = dumper.run(&mut out).await?;
    out.flush()?;

    info!(
        "Dumped {} rows from {} tables in {:.2}s",
        summary.rows, summary.tables, summary.duration_seconds
    );

    Ok(())
}

/// Resolve the configuration from the optional file plus flag overrides.
/// Validation runs once, after overrides, so flags can complete a
/// partial file.
fn build_config(cli: &Cli) -> Result<DumpConfig, DumpError> {
    let mut config = match &cli.config {
        Some(path) => {
            let content = std::fs::read_to_string(path)?;
            serde_yaml::from_str::<DumpConfig>(&content)?
        }
        None => DumpConfig {
            connection: mssql_dump::ConnectionConfig {
                server: String::new(),
                port: 1433,
                database: String::new(),
                auth: mssql_dump::AuthMode::Sql,
                user: None,
                password: None,
                schema: "dbo".to_string(),
                encrypt: true,
                trust_server_cert: false,
            },
            dump: mssql_dump::DumpSettings::default(),
        },
    };

    if let Some(server) = &cli.server {
        config.connection.server = server.clone();
    }
    if let Some(port) = cli.port {
        config.connection.port = port;
    }
    if let Some(database) = &cli.database {
        config.connection.database = database.clone();
    }
    if let Some(user) = &cli.user {
        config.connection.user = Some(user.clone());
    }
    if let Some(password) = &cli.password {
        config.connection.password = Some(password.clone());
    }
    if cli.integrated {
        config.connection.auth = mssql_dump::AuthMode::Integrated;
    }
    if let Some(schema) = &cli.schema {
        config.connection.schema = schema.clone();
    }
    if cli.no_encrypt {
        config.connection.encrypt = false;
    }
    if cli.trust_server_cert {
        config.connection.trust_server_cert = true;
    }

    if let Some(limit) = cli.limit {
        config.dump.limit = Some(limit);
    }
    if cli.transaction {
        config.dump.transaction = true;
    }
    if cli.identity_insert {
        config.dump.identity_insert = true;
    }
    if !cli.tables.is_empty() {
        config.dump.tables = cli.tables.clone();
    }
    if cli.exclusive {
        config.dump.exclusive = true;
    }

    config.validate()?;
    Ok(config)
}

fn setup_logging(verbosity: &str, format: &str) -> Result<(), String> {
    let level = match verbosity.to_lowercase().as_str() {
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr);

    if format == "json" {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    Ok(())
}
