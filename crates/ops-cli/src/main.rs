//! dbops - schema migration, reset and init operations for a Postgres-backed app

use clap::Parser;

mod cli;
mod commands;
mod context;
mod dispatch;
mod runner;
#[cfg(test)]
mod test_support;

use cli::Cli;
use commands::common::ExitCode;

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if cli::is_usage_error(&err) => {
            let message = err.to_string();
            eprintln!("\n❌ {}\n\n{}\n", message.trim_end(), dispatch::COMMAND_HELP);
            return std::process::ExitCode::FAILURE;
        }
        Err(err) => err.exit(),
    };

    let default_filter = if cli.global.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();

    match dispatch::dispatch(&cli.tokens, &cli.global, &cli.options).await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => match err.downcast_ref::<ExitCode>() {
            Some(ExitCode(code)) => exit_status(*code),
            None => {
                eprintln!("❌ Error: {:#}", err);
                std::process::ExitCode::FAILURE
            }
        },
    }
}

/// Clamp an arbitrary child exit code into the range a process can report
fn exit_status(code: i32) -> std::process::ExitCode {
    match u8::try_from(code) {
        Ok(0) | Err(_) => std::process::ExitCode::FAILURE,
        Ok(code) => std::process::ExitCode::from(code),
    }
}
