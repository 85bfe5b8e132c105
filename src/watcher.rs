use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use anyhow::{Context, Result};
use crate::AppEvent;

/// Reports changes of the diff input so the caller can rebuild its filters
pub struct InputWatcher {
    _watcher: RecommendedWatcher,
    event_rx: Receiver<AppEvent>,
}

impl InputWatcher {
    pub fn new<P: AsRef<Path>>(path: P, debounce: Duration) -> Result<Self> {
        let target = path
            .as_ref()
            .canonicalize()
            .with_context(|| format!("Failed to resolve {}", path.as_ref().display()))?;
        // Editors often replace the file, so watch its directory
        let dir = target
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        let (tx, rx) = mpsc::channel::<notify::Result<Event>>();
        let (event_tx, event_rx) = mpsc::channel::<AppEvent>();

        let mut watcher = notify::recommended_watcher(tx)
            .context("Failed to create file system watcher")?;

        watcher
            .watch(&dir, RecursiveMode::NonRecursive)
            .context("Failed to start watching input directory")?;

        thread::spawn(move || forward_changes(rx, event_tx, target, debounce));

        Ok(Self {
            _watcher: watcher,
            event_rx,
        })
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.event_rx.recv_timeout(timeout)
    }
}

/// Emit one `ContentChanged` once `target` has been quiet for `debounce`.
///
/// A write like `git diff > file` truncates first and fills the file after,
/// so the event goes out after the last write of a burst, not the first.
fn forward_changes(
    rx: Receiver<notify::Result<Event>>,
    event_tx: Sender<AppEvent>,
    target: PathBuf,
    debounce: Duration,
) {
    let mut pending = false;

    loop {
        let next = if pending {
            match rx.recv_timeout(debounce) {
                Ok(result) => Some(result),
                Err(RecvTimeoutError::Timeout) => None,
                Err(RecvTimeoutError::Disconnected) => {
                    let _ = event_tx.send(AppEvent::ContentChanged);
                    break;
                }
            }
        } else {
            match rx.recv() {
                Ok(result) => Some(result),
                Err(_) => break,
            }
        };

        match next {
            None => {
                pending = false;
                tracing::debug!("Input changed: {}", target.display());
                if event_tx.send(AppEvent::ContentChanged).is_err() {
                    break;
                }
            }
            Some(Ok(event)) => {
                if is_content_change(&event.kind) && touches(&event, &target) {
                    pending = true;
                }
            }
            Some(Err(err)) => {
                tracing::warn!("Watch error: {}", err);
            }
        }
    }
}

fn is_content_change(kind: &EventKind) -> bool {
    matches!(kind, EventKind::Create(_) | EventKind::Modify(_))
}

fn touches(event: &Event, target: &Path) -> bool {
    event.paths.iter().any(|path| {
        path == target
            || path
                .canonicalize()
                .map(|p| p == target)
                .unwrap_or(false)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;
    use notify::event::{CreateKind, ModifyKind, RemoveKind};

    fn modify(path: &Path) -> notify::Result<Event> {
        Ok(Event::new(EventKind::Modify(ModifyKind::Any)).add_path(path.to_path_buf()))
    }

    #[test]
    fn test_content_change_kinds() {
        assert!(is_content_change(&EventKind::Create(CreateKind::File)));
        assert!(is_content_change(&EventKind::Modify(ModifyKind::Any)));
        assert!(!is_content_change(&EventKind::Remove(RemoveKind::File)));
    }

    #[test]
    fn test_touches_target_only() {
        let target = PathBuf::from("/tmp/does-not-exist/changes.diff");
        let event = Event::new(EventKind::Modify(ModifyKind::Any)).add_path(target.clone());
        assert!(touches(&event, &target));

        let other = Event::new(EventKind::Modify(ModifyKind::Any))
            .add_path(PathBuf::from("/tmp/does-not-exist/other.diff"));
        assert!(!touches(&other, &target));
    }

    #[test]
    fn test_burst_emits_once_after_last_write() {
        let target = PathBuf::from("/tmp/does-not-exist/changes.diff");
        let debounce = Duration::from_millis(100);
        let (tx, rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        let worker_target = target.clone();
        let worker = thread::spawn(move || forward_changes(rx, event_tx, worker_target, debounce));

        tx.send(modify(&target)).unwrap();
        thread::sleep(Duration::from_millis(20));
        tx.send(modify(&target)).unwrap();
        let last_write = Instant::now();

        match event_rx.recv_timeout(Duration::from_secs(5)) {
            Ok(AppEvent::ContentChanged) => assert!(last_write.elapsed() >= debounce),
            Err(e) => panic!("Expected a change event, got {:?}", e),
        }
        assert!(event_rx.recv_timeout(Duration::from_millis(300)).is_err());

        drop(tx);
        worker.join().unwrap();
    }

    #[test]
    fn test_unrelated_events_are_ignored() {
        let target = PathBuf::from("/tmp/does-not-exist/changes.diff");
        let (tx, rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        let worker_target = target.clone();
        let worker = thread::spawn(move || {
            forward_changes(rx, event_tx, worker_target, Duration::from_millis(10))
        });

        tx.send(modify(Path::new("/tmp/does-not-exist/other.diff"))).unwrap();
        tx.send(Ok(Event::new(EventKind::Remove(RemoveKind::File)).add_path(target.clone())))
            .unwrap();
        drop(tx);
        worker.join().unwrap();

        assert!(event_rx.try_recv().is_err());
    }

    #[test]
    fn test_pending_change_flushed_on_shutdown() {
        let target = PathBuf::from("/tmp/does-not-exist/changes.diff");
        let (tx, rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        tx.send(modify(&target)).unwrap();
        drop(tx);
        forward_changes(rx, event_tx, target, Duration::from_secs(5));

        assert!(matches!(event_rx.try_recv(), Ok(AppEvent::ContentChanged)));
    }

    #[test]
    fn test_missing_input_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(InputWatcher::new(dir.path().join("missing.diff"), Duration::from_millis(10)).is_err());
    }
}
