use crate::{Dashboard, Delivery, FeedSource, Result};
use notify::{Event, EventKind, PollWatcher, RecursiveMode, Watcher};
use std::collections::BTreeSet;
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, RecvTimeoutError, channel};
use std::time::{Duration, Instant};

/// Longest stretch the loop waits before re-checking the stop flag
const STOP_CHECK_INTERVAL: Duration = Duration::from_millis(200);

/// Why a refresh happened
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchSignal {
    /// Initial fetch when the loop starts
    Started,
    /// One or more feed files changed on disk
    FeedChanged(Vec<PathBuf>),
    /// The refresh interval elapsed
    Tick,
}

/// Polls feed files for modification.
///
/// Parent directories are watched non-recursively and events are filtered
/// down to the feed files, so feeds replaced by rename are still picked up.
pub struct FeedWatcher {
    _watcher: PollWatcher,
    rx: Receiver<Event>,
    targets: Vec<PathBuf>,
}

impl FeedWatcher {
    pub fn new(paths: &[PathBuf], poll_interval: Duration) -> Result<Self> {
        let (tx, rx) = channel();

        let config = notify::Config::default()
            .with_poll_interval(poll_interval)
            .with_compare_contents(true);

        let mut watcher = PollWatcher::new(
            move |res: std::result::Result<Event, notify::Error>| {
                if let Ok(event) = res {
                    let _ = tx.send(event);
                }
            },
            config,
        )?;

        let dirs: BTreeSet<PathBuf> = paths.iter().map(|path| watch_dir(path)).collect();
        for dir in &dirs {
            watcher.watch(dir, RecursiveMode::NonRecursive)?;
            tracing::debug!(dir = %dir.display(), "watching feed directory");
        }

        Ok(Self {
            _watcher: watcher,
            rx,
            targets: paths.to_vec(),
        })
    }

    fn is_target(&self, path: &Path) -> bool {
        self.targets
            .iter()
            .any(|target| target == path || target.file_name() == path.file_name())
    }

    fn relevant_paths(&self, event: &Event) -> Vec<PathBuf> {
        match event.kind {
            EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) => event
                .paths
                .iter()
                .filter(|path| self.is_target(path))
                .cloned()
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Wait up to `timeout` for a feed change.
    ///
    /// Returns the changed feed paths, with events already queued behind the
    /// first one folded in.
    pub fn poll_changes(&self, timeout: Duration) -> Option<Vec<PathBuf>> {
        let first = match self.rx.recv_timeout(timeout) {
            Ok(event) => event,
            Err(RecvTimeoutError::Timeout) => return None,
            Err(RecvTimeoutError::Disconnected) => {
                std::thread::sleep(timeout);
                return None;
            }
        };

        let mut changed: BTreeSet<PathBuf> = self.relevant_paths(&first).into_iter().collect();
        while let Ok(event) = self.rx.try_recv() {
            changed.extend(self.relevant_paths(&event));
        }

        if changed.is_empty() {
            None
        } else {
            Some(changed.into_iter().collect())
        }
    }
}

fn watch_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn next_signal(
    watcher: Option<&FeedWatcher>,
    interval: Duration,
    stop: &AtomicBool,
) -> Option<WatchSignal> {
    let deadline = Instant::now() + interval;
    loop {
        if stop.load(Ordering::SeqCst) {
            return None;
        }
        let now = Instant::now();
        if now >= deadline {
            return Some(WatchSignal::Tick);
        }
        let slice = (deadline - now).min(STOP_CHECK_INTERVAL);
        match watcher {
            Some(watcher) => {
                if let Some(paths) = watcher.poll_changes(slice) {
                    return Some(WatchSignal::FeedChanged(paths));
                }
            }
            None => std::thread::sleep(slice),
        }
    }
}

/// Refresh `dashboard` from `source` on start, on every feed change and on
/// every `interval`, until `stop` is set or `on_refresh` breaks.
///
/// `on_refresh` gets the dashboard mutably so it can apply filter changes
/// between refreshes. Refresh errors are handed to it and do not end the loop.
pub fn run_watch_loop<F>(
    dashboard: &mut Dashboard,
    source: &dyn FeedSource,
    watcher: Option<&FeedWatcher>,
    interval: Duration,
    stop: &AtomicBool,
    mut on_refresh: F,
) where
    F: FnMut(&mut Dashboard, &WatchSignal, &Result<Delivery>) -> ControlFlow<()>,
{
    let mut signal = WatchSignal::Started;
    loop {
        tracing::debug!(?signal, source = %source.describe(), "refreshing");
        let result = dashboard.refresh(source);
        if on_refresh(dashboard, &signal, &result).is_break() {
            break;
        }

        match next_signal(watcher, interval, stop) {
            Some(next) => signal = next,
            None => {
                tracing::info!("watch loop stopped");
                break;
            }
        }
    }
}
