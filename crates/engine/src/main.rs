//! Rolodex - terminal quiz host.

use std::sync::Arc;

use rolodex_domain::{ContactId, FilterSelection};
use rolodex_engine::api::{render_snapshot, ParseCommandError, TerminalCommand, HELP};
use rolodex_engine::infrastructure::{
    clock::{SeededRandom, SystemClock, SystemRandom},
    config::QuizConfig,
    contact_source::JsonFileContactSource,
    filter_store::JsonFileFilterStore,
    ports::RandomPort,
};
use rolodex_engine::App;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv_from_repo_root();

    // Logs go to stderr so they don't interleave with the quiz on stdout.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rolodex_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting Rolodex");

    let config = QuizConfig::from_env()?;
    tracing::info!(
        total_rounds = config.settings.total_rounds(),
        contacts = %config.contacts_path.display(),
        filter = %config.filter_path.display(),
        seeded = config.seed.is_some(),
        "Configuration loaded"
    );

    let random: Arc<dyn RandomPort> = match config.seed {
        Some(seed) => Arc::new(SeededRandom::new(seed)),
        None => Arc::new(SystemRandom::new()),
    };

    let app = App::new(
        config.settings,
        Arc::new(JsonFileContactSource::new(&config.contacts_path)),
        Arc::new(JsonFileFilterStore::new(&config.filter_path)),
        random,
        Arc::new(SystemClock::new()),
    );
    let inputs = &app.use_cases.inputs;

    // Missing inputs leave the quiz idle rather than aborting.
    if let Err(e) = inputs.refresh_contacts.execute().await {
        tracing::warn!(error = %e, "Could not load contacts");
    }
    let mut filter = match inputs.load_filter.execute().await {
        Ok(filter) => filter,
        Err(e) => {
            tracing::warn!(error = %e, "Could not load filter");
            FilterSelection::empty()
        }
    };

    let handle = app.handle();
    let mut snapshots = handle.snapshots();
    let mut summaries = handle.subscribe_summaries();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}\n", HELP);
    println!("{}", render_snapshot(&snapshots.borrow_and_update()));

    loop {
        tokio::select! {
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = snapshots.borrow_and_update().clone();
                println!("\n{}", render_snapshot(&snapshot));
            }
            summary = summaries.recv() => match summary {
                Ok(summary) => tracing::info!(
                    session_id = %summary.session_id,
                    score = summary.score,
                    total_rounds = summary.total_rounds,
                    completed_at = %summary.completed_at,
                    "Session summary"
                ),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Missed session summaries");
                }
                Err(RecvError::Closed) => break,
            },
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                let command = match TerminalCommand::parse(&line) {
                    Ok(command) => command,
                    Err(ParseCommandError::Empty) => continue,
                    Err(e) => {
                        println!("{}", e);
                        continue;
                    }
                };
                match command {
                    TerminalCommand::Quit => break,
                    TerminalCommand::Help => println!("{}", HELP),
                    TerminalCommand::Replay => handle.replay()?,
                    TerminalCommand::Answer(number) => {
                        let snapshot = handle.snapshot();
                        match snapshot.options.get(number - 1) {
                            Some(option) => handle.submit(ContactId::from_uuid(option.contact_id))?,
                            None => println!("No option {}", number),
                        }
                    }
                    TerminalCommand::ToggleCategory(category) => {
                        filter.toggle_category(category);
                        if let Err(e) = inputs.update_filter.execute(filter.clone()).await {
                            tracing::warn!(error = %e, "Could not save filter");
                        }
                    }
                    TerminalCommand::ToggleTag(tag) => {
                        filter.toggle_tag(tag);
                        if let Err(e) = inputs.update_filter.execute(filter.clone()).await {
                            tracing::warn!(error = %e, "Could not save filter");
                        }
                    }
                    TerminalCommand::Refresh => {
                        if let Err(e) = inputs.refresh_contacts.execute().await {
                            tracing::warn!(error = %e, "Could not refresh contacts");
                        }
                    }
                }
            }
        }
    }

    app.shutdown().await;
    tracing::info!("Goodbye");
    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides, then fall back to the working directory.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
    let _ = dotenvy::dotenv();
}
