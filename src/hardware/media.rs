use std::cell::Cell;
use std::fmt;
use std::path::PathBuf;
use std::rc::Rc;

/// Last known state of the storage card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub enum CardState {
    /// Never probed.
    #[default]
    Unknown,
    /// Probed and missing.
    Absent,
    /// Probed and usable.
    Present,
}

/// Read-only view of media presence, consumed by the engine.
pub trait MediaPresence {
    /// Whether the storage media is currently present.
    fn is_present(&self) -> bool;
}

/// Low-level presence check, typically re-initialising the card reader.
pub trait MediaProbe {
    /// `true` when the media answers.
    fn probe(&mut self) -> bool;
}

/// Probe that always reports the same answer.
#[derive(Debug, Clone, Copy)]
pub struct FixedProbe(pub bool);

impl MediaProbe for FixedProbe {
    fn probe(&mut self) -> bool {
        self.0
    }
}

/// Probe that reports presence while a directory exists.
#[derive(Debug, Clone)]
pub struct DirectoryProbe {
    dir: PathBuf,
}

impl DirectoryProbe {
    /// Watch `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl MediaProbe for DirectoryProbe {
    fn probe(&mut self) -> bool {
        self.dir.is_dir()
    }
}

/// Shared handle onto a [`MediaMonitor`]'s state.
#[derive(Debug, Clone, Default)]
pub struct MediaSignal {
    state: Rc<Cell<CardState>>,
}

impl MediaSignal {
    /// A signal pinned to [`CardState::Present`], for setups without removable media.
    pub fn always_present() -> Self {
        Self {
            state: Rc::new(Cell::new(CardState::Present)),
        }
    }

    /// Current card state.
    pub fn state(&self) -> CardState {
        self.state.get()
    }
}

impl MediaPresence for MediaSignal {
    fn is_present(&self) -> bool {
        self.state.get() == CardState::Present
    }
}

type Listener = Box<dyn FnMut(CardState)>;

/// Tracks card presence and reports changes.
///
/// Starts in [`CardState::Unknown`]. Each [`refresh`](Self::refresh) probes the card; when the
/// answer differs from the stored state the listener runs synchronously with the new state,
/// and only then is the state stored.
pub struct MediaMonitor {
    probe: Box<dyn MediaProbe>,
    state: Rc<Cell<CardState>>,
    listener: Option<Listener>,
}

impl fmt::Debug for MediaMonitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaMonitor")
            .field("state", &self.state.get())
            .field("has_listener", &self.listener.is_some())
            .finish()
    }
}

impl MediaMonitor {
    /// Monitor `probe`, state unknown until the first refresh.
    pub fn new(probe: impl MediaProbe + 'static) -> Self {
        Self {
            probe: Box::new(probe),
            state: Rc::new(Cell::new(CardState::Unknown)),
            listener: None,
        }
    }

    /// Register the change listener, replacing any previous one.
    pub fn set_listener(&mut self, listener: impl FnMut(CardState) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Probe the card and notify the listener on change.
    pub fn refresh(&mut self) {
        let next = if self.probe.probe() {
            CardState::Present
        } else {
            CardState::Absent
        };

        if next != self.state.get() {
            tracing::debug!(from = ?self.state.get(), to = ?next, "media state changed");
            if let Some(listener) = self.listener.as_mut() {
                listener(next);
            }
            self.state.set(next);
        }
    }

    /// Handle for consumers that only read presence.
    pub fn signal(&self) -> MediaSignal {
        MediaSignal {
            state: Rc::clone(&self.state),
        }
    }

    /// Current card state.
    pub fn state(&self) -> CardState {
        self.state.get()
    }

    /// Card probed and present.
    pub fn is_present(&self) -> bool {
        self.state() == CardState::Present
    }

    /// Card probed and missing.
    pub fn is_absent(&self) -> bool {
        self.state() == CardState::Absent
    }

    /// Card never probed.
    pub fn is_unknown(&self) -> bool {
        self.state() == CardState::Unknown
    }
}

#[cfg(test)]
#[path = "../../tests/unit/hardware/media.rs"]
mod tests;
