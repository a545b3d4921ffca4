//! Command line front end: run a script file given as an argument, or fall back to a
//! line-at-a-time REPL reading from stdin.

use borth::runtime::error;
use borth::Runtime;
use std::env::args;
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> error::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let runtime = borth::create_runtime();
    let script_args: Vec<String> = args().skip(1).collect();

    if let Some(path) = script_args.first() {
        run_file(&runtime, path).await
    } else {
        run_repl(&runtime).await
    }
}

/// Read and execute a whole script file as a single `run`.
async fn run_file(runtime: &Runtime, path: &str) -> error::Result<()> {
    let source = std::fs::read_to_string(path)?;
    runtime.run(path, &source).await
}

/// Line-at-a-time REPL. Each line is its own `run` call; a definition left open with `:` and
/// no matching `;` simply carries over, since `run` only ever replaces the token stream, not
/// the target stack a half-finished compile is sitting on.
async fn run_repl(runtime: &Runtime) -> error::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    print!("> ");
    stdout.flush()?;

    for (number, line) in stdin.lock().lines().enumerate() {
        let line = line?;

        if !line.trim().is_empty() {
            let location = format!("<stdin>:{}", number + 1);
            if let Err(error) = runtime.run(&location, &line).await {
                eprintln!("{}", error);
            }
        }

        print!("> ");
        stdout.flush()?;
    }

    println!();
    Ok(())
}
