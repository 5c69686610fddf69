//! Watch command: live annotation of a file as it is edited.
//!
//! File-system events, the background easy-word load, and watcher errors
//! all arrive on one channel. Each text change rebuilds annotations at once;
//! statistics follow after the configured quiet period.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use notify::RecursiveMode;
use notify_debouncer_mini::{DebounceEventResult, new_debouncer};
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use gradewise_core::{
    AnnotationSet, Config, Document, EasyWordSet, EasyWordsError, Event, ReadabilityReport,
    Session,
};

use super::annotate::print_annotations;
use super::{AnalysisArgs, parse_document, read_input_file};

/// Coalescing window for raw file-system events.
const FS_DEBOUNCE: Duration = Duration::from_millis(50);

/// Arguments for the `watch` subcommand.
#[derive(Args, Debug)]
pub struct WatchArgs {
    /// File to watch.
    pub file: Utf8PathBuf,

    /// Analysis settings.
    #[command(flatten)]
    pub analysis: AnalysisArgs,
}

/// Input to the watch loop.
#[derive(Debug)]
pub enum WatchMessage {
    /// The watched file may have changed.
    FileChanged,
    /// The background easy-word load finished.
    EasyWords(Result<EasyWordSet, EasyWordsError>),
    /// The file watcher reported a problem.
    WatchError(String),
}

/// Output of the watch loop.
#[derive(Debug, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Update<'a> {
    /// Annotations were rebuilt.
    Annotations(&'a AnnotationSet),
    /// Debounced statistics were recomputed.
    Stats(&'a ReadabilityReport),
}

/// The watched file and the last text read from it.
#[derive(Debug)]
pub struct LiveFile {
    path: Utf8PathBuf,
    max_input_bytes: Option<usize>,
    last: Option<String>,
    revision: u64,
}

impl LiveFile {
    /// Track `path`, nothing read yet.
    pub const fn new(path: Utf8PathBuf, max_input_bytes: Option<usize>) -> Self {
        Self {
            path,
            max_input_bytes,
            last: None,
            revision: 0,
        }
    }

    /// Read the file, bumping the revision when its text changed.
    pub fn reload(&mut self) -> anyhow::Result<Event> {
        let content = read_input_file(&self.path, self.max_input_bytes)?;
        let text_changed = self.last.as_deref() != Some(content.as_str());
        if text_changed {
            self.revision += 1;
        }
        let document = parse_document(&self.path, &content)?.with_revision(self.revision);
        self.last = Some(content);
        Ok(Event::DocumentChanged {
            document,
            text_changed,
        })
    }
}

/// Drive the session from `rx` until every sender is gone.
///
/// Statistics still pending when the channel closes are computed before
/// returning.
pub fn run_loop<F>(
    rx: &Receiver<WatchMessage>,
    session: &mut Session,
    file: &mut LiveFile,
    mut emit: F,
) -> anyhow::Result<()>
where
    F: FnMut(&Document, Update<'_>) -> anyhow::Result<()>,
{
    loop {
        let message = match session.deadline() {
            Some(deadline) => {
                match rx.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
                    Ok(message) => Some(message),
                    Err(RecvTimeoutError::Timeout) => None,
                    Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            None => match rx.recv() {
                Ok(message) => Some(message),
                Err(_) => break,
            },
        };

        if let Some(message) = message {
            let rebuilt = match message {
                WatchMessage::FileChanged => match file.reload() {
                    Ok(event) => session.handle(event, Instant::now()),
                    Err(error) => {
                        warn!(error = %format!("{error:#}"), "failed to reload watched file");
                        false
                    }
                },
                WatchMessage::EasyWords(result) => {
                    session.handle(Event::EasyWordsLoaded(result), Instant::now())
                }
                WatchMessage::WatchError(error) => {
                    warn!(%error, "file watcher error");
                    false
                }
            };
            if rebuilt {
                emit(session.document(), Update::Annotations(session.annotations()))?;
            }
        }

        emit_stats(session, Instant::now(), &mut emit)?;
    }

    if let Some(deadline) = session.deadline() {
        emit_stats(session, deadline, &mut emit)?;
    }
    Ok(())
}

fn emit_stats<F>(session: &mut Session, now: Instant, emit: &mut F) -> anyhow::Result<()>
where
    F: FnMut(&Document, Update<'_>) -> anyhow::Result<()>,
{
    if session.poll(now).is_some()
        && let Some(report) = session.stats()
    {
        emit(session.document(), Update::Stats(report))?;
    }
    Ok(())
}

fn print_update(document: &Document, update: Update<'_>, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string(&update)?);
        return Ok(());
    }
    match update {
        Update::Annotations(set) => {
            println!("{}", format!("revision {}", set.revision).bold());
            print_annotations(document, set);
        }
        Update::Stats(report) => println!(
            "{} grade {:.1}, ease {:.1}, {} sentences, {} words",
            "stats:".cyan(),
            report.grade,
            report.ease,
            report.sentences,
            report.words
        ),
    }
    Ok(())
}

/// Watch a file and re-annotate it on every change. Runs until interrupted.
#[instrument(name = "cmd_watch", skip_all, fields(file = %args.file))]
pub fn cmd_watch(
    args: WatchArgs,
    global_json: bool,
    config: &Config,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    let settings = args.analysis.settings(config);
    let debounce = Duration::from_millis(config.stats_debounce_ms);
    debug!(
        target_grade = settings.target_grade.as_u8(),
        "executing watch command"
    );

    let (tx, rx) = mpsc::channel();

    if let Some(path) = args.analysis.easy_words_path(config) {
        let path = path.to_path_buf();
        let tx = tx.clone();
        std::thread::Builder::new()
            .name("easy-words".to_string())
            .spawn(move || {
                let _ = tx.send(WatchMessage::EasyWords(EasyWordSet::load(&path)));
            })
            .context("failed to start easy-word loader")?;
    }

    let file_name = args
        .file
        .file_name()
        .with_context(|| format!("not a file: {}", args.file))?
        .to_string();
    let dir = watch_dir(&args.file);
    let fs_tx = tx.clone();
    let mut debouncer = new_debouncer(FS_DEBOUNCE, move |result: DebounceEventResult| {
        let message = match result {
            Ok(events) => {
                let touched = events.iter().any(|e| {
                    e.path.file_name().and_then(|n| n.to_str()) == Some(file_name.as_str())
                });
                if !touched {
                    return;
                }
                WatchMessage::FileChanged
            }
            Err(error) => WatchMessage::WatchError(format!("{error:?}")),
        };
        let _ = fs_tx.send(message);
    })
    .context("failed to create file watcher")?;
    debouncer
        .watcher()
        .watch(dir.as_std_path(), RecursiveMode::NonRecursive)
        .with_context(|| format!("failed to watch {dir}"))?;

    // initial read
    tx.send(WatchMessage::FileChanged)
        .context("watch channel closed")?;
    drop(tx);

    info!(file = %args.file, "watching for changes");
    let mut session = Session::new(settings, debounce);
    debug!(
        stats_debounce_ms = session.stats_debounce().as_millis(),
        "session started"
    );
    let mut file = LiveFile::new(args.file, max_input_bytes);
    run_loop(&rx, &mut session, &mut file, |document, update| {
        print_update(document, update, global_json)
    })
}

fn watch_dir(file: &Utf8Path) -> Utf8PathBuf {
    match file.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent.to_path_buf(),
        _ => Utf8PathBuf::from("."),
    }
}
