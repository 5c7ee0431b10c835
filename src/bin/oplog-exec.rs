use std::io::Write;
use std::process::{Command, ExitCode};

use anyhow::Context;
use clap::{Parser, ValueEnum};

use oplog_core::backend::{init_env_logger, ConsoleBackend, LogBridge};
use oplog_core::{log_cmd, push_prefix, Logger, LoggerConfig};

#[derive(Parser)]
#[command(name = "oplog-exec")]
#[command(about = "Run a command as a logged operation", long_about = None)]
struct Cli {
    /// Where log lines go
    #[arg(short, long, value_enum, default_value_t = Sink::Syslog)]
    sink: Sink,

    /// Syslog identity (overrides OPLOG_IDENT)
    #[arg(long)]
    ident: Option<String>,

    /// Operation description (defaults to the program name)
    #[arg(short, long)]
    label: Option<String>,

    /// Context prefix, outermost first; may be repeated
    #[arg(short, long)]
    prefix: Vec<String>,

    /// Program and arguments, after `--`
    #[arg(required = true, last = true)]
    command: Vec<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Sink {
    /// Syslog, falling back to stdout
    Syslog,
    /// stdout only
    Console,
    /// The `log` facade via env_logger (RUST_LOG applies)
    Log,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = LoggerConfig::from_env().context("invalid OPLOG_* environment")?;
    if let Some(ident) = cli.ident {
        config = config.with_ident(ident);
    }

    let mut logger = match cli.sink {
        Sink::Syslog => Logger::with_config(&config),
        Sink::Console => Logger::from_backend(ConsoleBackend::stdout()),
        Sink::Log => {
            init_env_logger();
            Logger::from_backend(LogBridge::new())
        }
    };

    let (program, args) = cli
        .command
        .split_first()
        .context("no command given")?;
    let label = cli.label.clone().unwrap_or_else(|| program.clone());

    for prefix in &cli.prefix {
        push_prefix!(logger, "{}", prefix);
    }

    let mut cmd = Command::new(program);
    cmd.args(args);
    let result = log_cmd!(logger, &mut cmd, "{}", label);

    for _ in &cli.prefix {
        logger.pop_prefix();
    }
    let _ = logger.close();

    match result {
        Ok(output) => {
            std::io::stdout()
                .write_all(&output.stdout)
                .context("forwarding command output")?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("oplog-exec: {}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}
