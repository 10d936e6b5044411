use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SectionKind {
    #[default]
    Dashboard,
    Users,
    Subscriptions,
    Instructions,
    Settings,
    System,
}

impl SectionKind {
    pub const ALL: [SectionKind; 6] = [
        Self::Dashboard,
        Self::Users,
        Self::Subscriptions,
        Self::Instructions,
        Self::Settings,
        Self::System,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Users => "users",
            Self::Subscriptions => "subscriptions",
            Self::Instructions => "instructions",
            Self::Settings => "settings",
            Self::System => "system",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::validation(format!("Unknown section: {}", s)))
    }
}

/// Tracks which section is on screen. Each activation gets a generation
/// number; work started under an older generation is stale.
#[derive(Debug, Clone, Default)]
pub struct SectionRouter {
    generation: Arc<AtomicU64>,
    current: Arc<Mutex<SectionKind>>,
}

impl SectionRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn activate(&self, kind: SectionKind) -> Activation {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        *current = kind;
        debug!("Activated section {} (generation {})", kind, generation);

        Activation {
            kind,
            generation,
            latest: self.generation.clone(),
        }
    }

    /// Re-activates whatever is on screen, superseding in-flight loads.
    pub fn refresh(&self) -> Activation {
        self.activate(self.current())
    }

    pub fn current(&self) -> SectionKind {
        *self.current.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[derive(Debug, Clone)]
pub struct Activation {
    kind: SectionKind,
    generation: u64,
    latest: Arc<AtomicU64>,
}

impl Activation {
    pub fn kind(&self) -> SectionKind {
        self.kind
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_current(&self) -> bool {
        self.latest.load(Ordering::SeqCst) == self.generation
    }

    pub fn ensure_current(&self) -> Result<()> {
        if self.is_current() {
            Ok(())
        } else {
            debug!(
                "Dropping response for {} (generation {} superseded)",
                self.kind, self.generation
            );
            Err(Error::superseded(self.kind.as_str()))
        }
    }

    /// Hands `value` back only while this activation is still the latest.
    pub fn guard<T>(&self, value: T) -> Result<T> {
        self.ensure_current().map(|()| value)
    }
}
