//! dayswipe - terminal triage of today's pending tasks
//!
//! Loads pending tasks (task API or offline titles), runs one triage
//! session from stdin commands, waits for remote updates, then prints the
//! completion summary.

mod args;
mod view;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::oneshot;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dayswipe_core::app::{SessionBuilder, TriageSession};
use dayswipe_core::config::TriageConfig;
use dayswipe_core::domain::{
    Decision, SessionPhase, SessionSummary, Task, TaskId, TaskTitle, TriageBatch, UserId,
    pending_tasks,
};
use dayswipe_core::impls::{HttpTaskStore, InMemoryTaskStore, RemoteDecisionRecorder};
use dayswipe_core::ports::{Clock, SystemClock, TaskStore};

use crate::args::Args;
use crate::view::{Command, HELP, TerminalView, render_card, render_summary};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries the cards and the summary; logs go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dayswipe=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let config = args.apply(TriageConfig::from_env().context("invalid configuration")?);
    let user = UserId::new(args.user);

    let store: Arc<dyn TaskStore> = match &config.api {
        Some(api) => {
            info!(base_url = %api.base_url, "using task api");
            Arc::new(HttpTaskStore::new(api.base_url.clone(), api.request_timeout)?)
        }
        None => {
            info!(tasks = args.tasks.len(), "no task api configured, running offline");
            Arc::new(offline_store(user, &args.tasks)?)
        }
    };

    let tasks = store
        .list_tasks(user)
        .await
        .with_context(|| format!("failed to load tasks for {user}"))?;
    let batch = TriageBatch::new(pending_tasks(&tasks));
    info!(loaded = tasks.len(), pending = batch.len(), "tasks loaded");

    let recorder = Arc::new(RemoteDecisionRecorder::new(Arc::clone(&store)));
    let (done_tx, mut done_rx) = oneshot::channel();
    let session = SessionBuilder::new(recorder.clone())
        .config(config.session.clone())
        .start(batch.clone(), move |decisions| {
            let _ = done_tx.send(decisions);
        });

    if !batch.is_empty() {
        println!("{HELP}\n");
    }

    let decisions = match run(&session, &mut done_rx).await? {
        Some(decisions) => decisions,
        None => {
            let partial = session.decisions();
            session.dispose();
            warn!(decided = partial.len(), total = batch.len(), "session stopped early");
            partial
        }
    };

    if recorder.in_flight() > 0 {
        info!(in_flight = recorder.in_flight(), "waiting for remote updates");
    }
    recorder.drain().await;

    let summary = SessionSummary::new(&batch, &decisions);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("\n{}", render_summary(&summary));
    }

    Ok(())
}

/// Drive the session from stdin until it completes (`Some`) or the user
/// quits or closes input (`None`).
async fn run(
    session: &TriageSession,
    done_rx: &mut oneshot::Receiver<Vec<Decision>>,
) -> anyhow::Result<Option<Vec<Decision>>> {
    let mut view = TerminalView::new();
    let mut snapshots = session.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let mut shown: Option<SessionPhase> = None;
    {
        let snapshot = snapshots.borrow_and_update();
        if let Some(card) = render_card(&snapshot) {
            println!("{card}");
            shown = Some(snapshot.phase);
        }
    }

    loop {
        tokio::select! {
            decisions = &mut *done_rx => return Ok(decisions.ok()),

            changed = snapshots.changed() => {
                if changed.is_err() {
                    return Ok(None);
                }
                let snapshot = snapshots.borrow_and_update().clone();
                if shown != Some(snapshot.phase) {
                    if let Some(card) = render_card(&snapshot) {
                        println!("\n{card}");
                    }
                    shown = Some(snapshot.phase);
                }
            }

            line = lines.next_line() => {
                let Some(line) = line.context("failed to read stdin")? else {
                    return Ok(None);
                };
                match Command::parse(&line) {
                    Some(Command::Quit) => return Ok(None),
                    Some(command) => {
                        if let Some(out) = view.handle(session, command) {
                            println!("{out}");
                        }
                    }
                    None if line.trim().is_empty() => {}
                    None => println!("unknown command, ? for help"),
                }
            }
        }
    }
}

/// In-memory store seeded from `--task` titles, ids assigned in order.
fn offline_store(user: UserId, titles: &[String]) -> anyhow::Result<InMemoryTaskStore> {
    let now = SystemClock.now();
    let tasks = titles
        .iter()
        .zip(1u64..)
        .map(|(title, id)| {
            let title = TaskTitle::new(title.as_str())
                .with_context(|| format!("invalid task title {title:?}"))?;
            Ok(Task::new(TaskId::new(id), user, title, now))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(InMemoryTaskStore::with_tasks(tasks))
}
