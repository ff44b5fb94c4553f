// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Interactive demo of [`r3bl_input_console`]. Run it with:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │ > cargo run --bin console_demo -- --ticker-secs 2           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Type `add 1 2`, `echo hello`, `fail`, `panic`, `!ls` or `help`, and watch the first
//! word turn green once it names a command. The ticker prints a line every couple of
//! seconds, above whatever you are typing. Press `Ctrl+C` to exit.

use std::time::Duration;

use clap::Parser;
use miette::IntoDiagnostic;
use r3bl_input_console::{ConsoleWriter, DEFAULT_PROMPT, InputConsole, install_panic_hook,
                         tracing_setup::{self, DisplayPreference, TracingConfig,
                                         WriterArg}};
use tokio::task::JoinHandle;

#[derive(Debug, Parser)]
#[command(bin_name = "console_demo")]
#[command(about = "Type commands while output lines print above the prompt")]
#[command(version)]
#[command(next_line_help = true)]
/// More info:
/// - <https://docs.rs/clap/latest/clap/_derive/#overview>
pub struct CLIArg {
    #[arg(long, short = 'p', default_value = DEFAULT_PROMPT, help = "Text of the prompt")]
    pub prompt: String,

    #[arg(
        long,
        short = 'w',
        value_delimiter = ',',
        default_value = "file",
        help = "Where to send tracing output: `stdout`, `file`, or `none`. Separate \
                multiple writers with commas. `stdout` prints above the prompt"
    )]
    pub tracing_writer: Vec<WriterArg>,

    #[arg(long, short = 'l', default_value = "info", help = "Log level")]
    pub log_level: tracing::Level,

    #[arg(long, default_value = "console_demo.log", help = "Log file path")]
    pub log_file: String,

    #[arg(
        long,
        short = 't',
        help = "Print a line every N seconds, to show output and input not interfering"
    )]
    pub ticker_secs: Option<u64>,
}

#[tokio::main]
pub async fn main() -> miette::Result<()> {
    let cli_arg = CLIArg::parse();

    let Some(mut console) = InputConsole::try_new_stdio() else {
        eprintln!("console_demo needs a terminal, stdin and stdout can't be piped");
        return Ok(());
    };

    tracing_setup::init(TracingConfig {
        writers: cli_arg.tracing_writer.clone(),
        level: cli_arg.log_level,
        tracing_log_file_path_and_prefix: cli_arg.log_file.clone(),
        preferred_display: DisplayPreference::ConsoleWriter(console.clone_writer()),
    })?;

    // The `panic` command would otherwise print over the prompt line.
    install_panic_hook(&console.clone_writer());
    register_commands(&mut console);

    console
        .println("Type `help` to see the commands. Press Ctrl+C to exit.")
        .into_diagnostic()?;

    let session = console.listen(cli_arg.prompt);
    tracing::info!(message = "Session started", state = %session.state());

    let ticker = cli_arg
        .ticker_secs
        .map(|secs| spawn_ticker(session.clone_writer(), secs));

    let result = session.wait().await;

    if let Some(ticker) = ticker {
        ticker.abort();
    }

    // Raw mode is off now, and the cursor is still on the prompt line.
    println!();

    result.into_diagnostic()
}

fn register_commands(console: &mut InputConsole) {
    let writer = console.clone_writer();
    console.register_command("add", move |args: &[String]| {
        let mut sum: i64 = 0;
        for arg in args.iter().filter(|it| !it.is_empty()) {
            sum += arg
                .parse::<i64>()
                .map_err(|err| miette::miette!("'{arg}' is not a number: {err}"))?;
        }
        writer.println(sum).into_diagnostic()
    });

    let writer = console.clone_writer();
    console.register_command("echo", move |args: &[String]| {
        writer.println(args.join(" ")).into_diagnostic()
    });

    console.register_command("fail", |_: &[String]| {
        miette::bail!("this command always fails")
    });

    console.register_command("panic", |_: &[String]| -> miette::Result<()> {
        panic!("this command always panics")
    });

    let writer = console.clone_writer();
    console.set_unknown_command_handler(move |raw_line: &str| {
        let Some(shell_command) = raw_line.strip_prefix('!') else {
            return false;
        };
        if let Err(err) = writer.println(format!("Shell escapes are off: {shell_command}")) {
            tracing::warn!(message = "Failed to print", error = %err);
        }
        true
    });

    let mut names = console.command_names();
    names.push("help".to_string());
    names.sort();
    let writer = console.clone_writer();
    console.register_command("help", move |_: &[String]| {
        writer
            .println(format!("Commands: {}", names.join(", ")))
            .into_diagnostic()
    });
}

fn spawn_ticker(writer: ConsoleWriter, secs: u64) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(secs.max(1)));
        // The first tick completes immediately.
        interval.tick().await;
        let mut count = 0_u64;
        loop {
            interval.tick().await;
            count += 1;
            if let Err(err) = writer.println(format!("tick #{count}")) {
                tracing::warn!(message = "Ticker stopped", error = %err);
                break;
            }
        }
    })
}
