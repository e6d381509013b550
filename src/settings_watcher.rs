//! Hot reload of the settings file.
//!
//! A `notify` watcher runs on its own thread and drops the latest event into
//! a shared slot. The host calls `poll()` from its frame loop; an event is
//! only handed out once the file has been quiet for a short while, since
//! editors tend to write in several steps.
//!
//! The parent directory is watched, not the file. Atomic saves (ours and
//! most editors') rename a temp file over the settings file, which gives it
//! a new inode; a watch on the file itself would go quiet after that.

use crate::constants::SETTINGS_RELOAD_DEBOUNCE_MS;
use crate::error::CastleResult;
use crate::settings::Settings;
use notify::event::{ModifyKind, RenameMode};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use parking_lot::Mutex;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SettingsEvent {
    /// The file was written or replaced
    Modified,
    /// The file appeared where there was none
    Created,
    /// The file was removed or renamed away
    Deleted,
    Error(String),
}

impl SettingsEvent {
    /// Fold a newer event into one that has not been polled yet.
    fn followed_by(self, next: SettingsEvent) -> SettingsEvent {
        match (self, next) {
            (SettingsEvent::Created, SettingsEvent::Modified) => SettingsEvent::Created,
            (SettingsEvent::Deleted, SettingsEvent::Created) => SettingsEvent::Modified,
            (_, next) => next,
        }
    }
}

type PendingSlot = Arc<Mutex<Option<(SettingsEvent, Instant)>>>;

pub struct SettingsWatcher {
    path: PathBuf,
    pending: PendingSlot,
    debounce: Duration,
    _watcher: RecommendedWatcher,
}

/// Turns raw directory events into events about one file.
struct FileFilter {
    file_name: Option<OsString>,
    present: bool,
}

impl FileFilter {
    fn is_target(&self, path: &Path) -> bool {
        path.file_name() == self.file_name.as_deref()
    }

    fn classify(&mut self, event: &Event) -> Option<SettingsEvent> {
        let appeared = match event.kind {
            EventKind::Create(_) => self.touches(event)?,
            EventKind::Remove(_) => {
                self.touches(event)?;
                false
            }
            EventKind::Modify(ModifyKind::Name(mode)) => self.renamed_into(event, mode)?,
            EventKind::Modify(_) => {
                self.touches(event)?;
                return Some(SettingsEvent::Modified);
            }
            _ => return None,
        };

        let was_present = std::mem::replace(&mut self.present, appeared);
        Some(match (was_present, appeared) {
            (_, false) => SettingsEvent::Deleted,
            (true, true) => SettingsEvent::Modified,
            (false, true) => SettingsEvent::Created,
        })
    }

    /// `Some(true)` when the event names the settings file.
    fn touches(&self, event: &Event) -> Option<bool> {
        event.paths.iter().any(|p| self.is_target(p)).then_some(true)
    }

    /// `Some(true)` when a rename moved a file onto the settings path,
    /// `Some(false)` when it moved the settings file away.
    fn renamed_into(&self, event: &Event, mode: RenameMode) -> Option<bool> {
        match mode {
            RenameMode::To => self.touches(event),
            RenameMode::From => self.touches(event).map(|_| false),
            RenameMode::Both => {
                let to = event.paths.last().is_some_and(|p| self.is_target(p));
                let from = event.paths.first().is_some_and(|p| self.is_target(p));
                match (from, to) {
                    (_, true) => Some(true),
                    (true, false) => Some(false),
                    (false, false) => None,
                }
            }
            // Backends that do not say which side of the rename this is
            _ => {
                let path = event.paths.iter().find(|p| self.is_target(p))?;
                Some(path.exists())
            }
        }
    }
}

impl SettingsWatcher {
    /// Watch `path`. Its parent directory is created if needed.
    pub fn new(path: PathBuf) -> CastleResult<Self> {
        let pending: PendingSlot = Arc::new(Mutex::new(None));
        let slot = Arc::clone(&pending);
        let mut filter = FileFilter {
            file_name: path.file_name().map(|n| n.to_os_string()),
            present: path.exists(),
        };

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| {
                let event = match res {
                    Ok(ev) => match filter.classify(&ev) {
                        Some(event) => event,
                        None => return,
                    },
                    Err(e) => {
                        error!("settings watch error: {e:?}");
                        SettingsEvent::Error(e.to_string())
                    }
                };
                let mut pending = slot.lock();
                let event = match pending.take() {
                    Some((earlier, _)) => earlier.followed_by(event),
                    None => event,
                };
                *pending = Some((event, Instant::now()));
            },
            Config::default(),
        )?;

        let parent = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;
        watcher.watch(parent, RecursiveMode::NonRecursive)?;
        debug!(path = %path.display(), "watching settings file");

        Ok(Self {
            path,
            pending,
            debounce: Duration::from_millis(SETTINGS_RELOAD_DEBOUNCE_MS),
            _watcher: watcher,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Latest settled event, if any.
    pub fn poll(&mut self) -> Option<SettingsEvent> {
        let mut slot = self.pending.lock();
        let (_, at) = slot.as_ref()?;
        if at.elapsed() < self.debounce {
            return None;
        }
        slot.take().map(|(event, _)| event)
    }
}

/// The file the watcher should follow by default.
pub fn default_settings_path() -> Option<PathBuf> {
    Settings::path()
}
