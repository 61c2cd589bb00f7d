//! askql - generate and run SQL from natural-language questions.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use askql_cli::cli::Args;
use askql_cli::db::{self, DbHandle};
use askql_cli::llm::{CompletionClient, GeminiClient};
use askql_cli::output;
use askql_cli::server::{self, AppState, ServerConfig};
use askql_core::{build_prompt, extract_sql, STOP_SEQUENCE};
use clap::Parser;

const EXIT_FAILURE: u8 = 1;

fn main() -> ExitCode {
    let args = Args::parse();

    // Read once at startup; a missing key makes every generation attempt
    // fail the same way until the process restarts.
    let api_key = std::env::var("GOOGLE_API_KEY").ok();
    if api_key.is_none() && !args.quiet {
        eprintln!("askql: warning: GOOGLE_API_KEY is not set; SQL generation will fail");
    }

    let llm: Arc<dyn CompletionClient> = Arc::new(GeminiClient::new(args.model.clone(), api_key));

    let runtime = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");

    let outcome = match args.question.clone() {
        Some(question) => runtime.block_on(run_once(&args, llm, &question)),
        None => runtime.block_on(run_serve(&args, llm)),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("askql: error: {e:#}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

/// Serve mode: host the single-page UI until Ctrl+C.
async fn run_serve(args: &Args, llm: Arc<dyn CompletionClient>) -> Result<()> {
    let config = ServerConfig {
        model: args.model.clone(),
        port: args.port,
        open_browser: args.open,
    };
    let state = Arc::new(AppState::new(config, llm));
    server::run_server(state).await
}

/// One-shot mode: connect (if --url given), generate, print, execute.
async fn run_once(args: &Args, llm: Arc<dyn CompletionClient>, question: &str) -> Result<()> {
    if question.trim().is_empty() {
        anyhow::bail!("Please enter a question to generate an SQL query.");
    }

    let handle = match &args.url {
        Some(url) => {
            if url.contains('@') && !url.starts_with("sqlite") && !args.quiet {
                eprintln!(
                    "askql: warning: database credentials in --url may be logged in shell history"
                );
            }
            let handle = DbHandle::connect_url(url)
                .await
                .context("Failed to connect to database")?;
            if !args.quiet {
                eprintln!("askql: connected to {}", handle.database());
            }
            Some(handle)
        }
        None => None,
    };

    if handle.is_none() && !args.quiet {
        eprintln!("askql: no database connected; generating without a schema");
    }

    let schema = db::describe_or_sentinel(handle.as_ref()).await?;
    let prompt = build_prompt(&schema, question);
    let raw = llm
        .complete(&prompt, &[STOP_SEQUENCE])
        .await
        .context("Error generating SQL")?;
    let sql = extract_sql(&raw);

    output::print_sql(&sql);

    if let Some(handle) = &handle {
        let result = handle.execute(&sql).await.context("Error running query")?;
        println!("{}", output::format_result_table(&result));
    }

    Ok(())
}
