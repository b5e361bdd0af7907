//! phint CLI: print `pg_hint_plan` hints that reproduce a PostgreSQL query plan.

mod explain;

use std::io::{self, Read};
use std::path::PathBuf;

use clap::Parser;
use phint_core::prelude::{decode_plan, ConnectionConfig, Error, PlanFormat};
use phint_hint::derive_hint;
use tracing_subscriber::EnvFilter;

use explain::{read_plan, ExplainRunner, PsqlRunner, SqlSource};

#[derive(Parser)]
#[command(name = "phint", version)]
#[command(about = "Derive pg_hint_plan hints from a PostgreSQL query plan", long_about = None)]
struct Cli {
    /// Database server host [env: PHINT_HOST, default: localhost]
    #[arg(long)]
    host: Option<String>,

    /// Database server port [env: PHINT_PORT, default: 5432]
    #[arg(short, long)]
    port: Option<u16>,

    /// Database name to connect to [env: PHINT_DBNAME, default: postgres]
    #[arg(short, long)]
    dbname: Option<String>,

    /// SQL command to explain
    #[arg(short, long)]
    command: Option<String>,

    /// Read the SQL command from a file
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// EXPLAIN output format: json, yaml, text
    #[arg(short = 'T', long = "type", default_value = "json")]
    format: PlanFormat,

    /// Read an already captured EXPLAIN output from stdin
    #[arg(long)]
    input_plan: bool,

    /// Show only the hint block
    #[arg(long)]
    hint_only: bool,

    /// Print the decoded plan outline to stderr
    #[arg(long)]
    show_plan: bool,
}

/// Everything one invocation prints.
#[derive(Debug)]
struct Output {
    hint: String,
    sql: Option<String>,
    plan_dump: Option<String>,
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let source = SqlSource::from_args(cli.command.clone(), cli.file.clone(), cli.input_plan)?;

    if !cli.format.is_supported() {
        return Err(Error::Unsupported(format!(
            "currently only \"json\" and \"yaml\" types are supported, got \"{}\"",
            cli.format
        ))
        .into());
    }

    let mut config = ConnectionConfig::from_env();
    apply_cli_overrides(&mut config, &cli);
    let runner = PsqlRunner::new(config);

    let output = generate(&source, cli.format, &runner, io::stdin().lock(), cli.show_plan)?;

    if let Some(dump) = &output.plan_dump {
        eprint!("{}", dump);
    }
    println!("{}", output.hint);
    if cli.hint_only {
        return Ok(());
    }
    if let Some(sql) = &output.sql {
        println!("{}", sql);
    }

    Ok(())
}

fn apply_cli_overrides(cfg: &mut ConnectionConfig, cli: &Cli) {
    if let Some(host) = &cli.host {
        cfg.host = host.clone();
    }
    if let Some(port) = cli.port {
        cfg.port = port;
    }
    if let Some(dbname) = &cli.dbname {
        cfg.dbname = dbname.clone();
    }
}

/// Obtain the plan from `source`, derive its hint, and collect the output.
fn generate<R: Read>(
    source: &SqlSource,
    format: PlanFormat,
    runner: &dyn ExplainRunner,
    stdin: R,
    show_plan: bool,
) -> Result<Output, Error> {
    let sql = source.read_sql()?;
    let payload = match &sql {
        Some(sql) => runner.explain(sql, format)?,
        None => read_plan(stdin)?,
    };

    let plan = decode_plan(&payload, format)?;
    let hint = derive_hint(&plan);
    if !hint.diagnostics().is_empty() {
        tracing::info!(
            diagnostics = hint.diagnostics().len(),
            "hint covers only the recognized part of the plan"
        );
    }

    Ok(Output {
        hint: hint.render(),
        sql,
        plan_dump: show_plan.then(|| plan.dump()),
    })
}
