mod console;
mod repl;

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use client_core::{
    load_settings, AppContext, AppController, Dispatched, FormSubmitEvent, Renderer, UiAction,
};
use storage::{KeyValueStore, MemoryStore, Storage};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;
use tracing_subscriber::EnvFilter;

use crate::console::ConsoleRenderer;
use crate::repl::{parse_field, parse_line, ReplInput, HELP};

#[derive(Parser, Debug)]
#[command(about = "Console front end for the practice panel")]
struct Args {
    /// Overrides the configured users endpoint.
    #[arg(long)]
    users_url: Option<String>,
    /// Overrides the configured sqlite database url.
    #[arg(long)]
    database_url: Option<String>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the persisted theme.
    Theme,
    /// Flip the persisted theme.
    ToggleTheme,
    /// Fetch and print the users listing.
    LoadUsers,
    /// Submit the demo form once.
    Submit {
        #[arg(long = "field", value_parser = parse_field)]
        fields: Vec<(String, String)>,
    },
    /// Interactive session (default).
    Repl,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(users_url) = args.users_url {
        settings.users_url = users_url;
    }
    if let Some(database_url) = args.database_url {
        settings.database_url = client_core::config::normalize_database_url(&database_url);
    }

    let store = open_store(&settings.database_url).await;
    let renderer: Arc<dyn Renderer> = Arc::new(ConsoleRenderer::stdout());
    let ctx = AppContext::from_settings(&settings, renderer, store)?;
    let mut controller = AppController::start(ctx).await;

    match args.command.unwrap_or(Command::Repl) {
        Command::Theme => {
            let state = if controller.dark_mode() { "on" } else { "off" };
            println!("dark mode: {state}");
        }
        Command::ToggleTheme => {
            controller.dispatch(UiAction::ToggleTheme).await;
        }
        Command::LoadUsers => {
            if let Dispatched::Fetching(task) = controller.dispatch(UiAction::LoadUsers).await {
                if let Err(err) = task.await? {
                    anyhow::bail!("loading users failed: {err}");
                }
            }
        }
        Command::Submit { fields } => {
            let action = UiAction::SubmitForm(FormSubmitEvent::new(fields));
            if let Dispatched::Submitted(outcome) = controller.dispatch(action).await {
                if let Some(reason) = outcome.reason() {
                    anyhow::bail!("form rejected: {reason}");
                }
            }
        }
        Command::Repl => run_repl(&mut controller, BufReader::new(tokio::io::stdin())).await?,
    }

    Ok(())
}

/// Reads commands until EOF or `quit`. Loads overlap while the session runs;
/// any still in flight are awaited before returning so their result is shown.
async fn run_repl<R>(controller: &mut AppController, input: R) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    println!("{HELP}");
    let mut loads = Vec::new();
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        match parse_line(&line) {
            Ok(ReplInput::Action(action)) => {
                if let Dispatched::Fetching(task) = controller.dispatch(action).await {
                    loads.retain(|load: &JoinHandle<_>| !load.is_finished());
                    loads.push(task);
                }
            }
            Ok(ReplInput::Help) => println!("{HELP}"),
            Ok(ReplInput::Quit) => break,
            Ok(ReplInput::Empty) => {}
            Err(message) => println!("{message}"),
        }
    }

    for load in loads {
        match load.await {
            Ok(Ok(users)) => tracing::debug!(count = users.len(), "users load finished"),
            Ok(Err(err)) => tracing::debug!("users load failed: {err}"),
            Err(err) => tracing::warn!("users load did not complete: {err}"),
        }
    }
    Ok(())
}

async fn open_store(database_url: &str) -> Arc<dyn KeyValueStore> {
    match Storage::new(database_url).await {
        Ok(storage) => Arc::new(storage),
        Err(err) => {
            tracing::warn!("storage unavailable, settings will not persist: {err:#}");
            Arc::new(MemoryStore::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use client_core::{FetchError, HttpClient, HttpResponse};

    use super::*;
    use crate::console::SharedBuf;

    struct SlowUsers;

    #[async_trait]
    impl HttpClient for SlowUsers {
        async fn get(&self, _url: &str) -> Result<HttpResponse, FetchError> {
            tokio::time::sleep(Duration::from_millis(100)).await;
            Ok(HttpResponse {
                status: 200,
                body: br#"[{"name":"Ann","email":"a@x.com"}]"#.to_vec(),
            })
        }
    }

    async fn console_controller(buf: &SharedBuf) -> AppController {
        let ctx = AppContext {
            renderer: Arc::new(ConsoleRenderer::new(Box::new(buf.clone()))),
            store: Arc::new(MemoryStore::new()),
            http: Arc::new(SlowUsers),
            users_url: "http://users.test/users".to_string(),
            profile_name: "Tester".to_string(),
        };
        AppController::start(ctx).await
    }

    #[tokio::test]
    async fn load_at_end_of_input_is_rendered_before_returning() {
        let buf = SharedBuf::default();
        let mut controller = console_controller(&buf).await;

        run_repl(&mut controller, &b"load\n"[..])
            .await
            .expect("repl session");

        let text = buf.text();
        assert!(text.contains("- Ann <a@x.com>"), "output was: {text}");
        assert!(text.ends_with("[Load Users]\n"), "output was: {text}");
    }

    #[tokio::test]
    async fn quit_waits_for_overlapping_loads() {
        let buf = SharedBuf::default();
        let mut controller = console_controller(&buf).await;

        run_repl(&mut controller, &b"load\nload\nquit\ninc\n"[..])
            .await
            .expect("repl session");

        let text = buf.text();
        assert_eq!(text.matches("- Ann <a@x.com>").count(), 2, "output was: {text}");
        assert!(!text.contains("count: 1"), "input after quit was read: {text}");
        assert_eq!(controller.fetcher().in_flight(), 0);
    }
}
