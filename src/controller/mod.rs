pub mod image;
pub mod notifier;
pub mod text;

use serde::Serialize;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

pub use image::{ImageController, ImageForm, ImageOutcome, ImageResult, ImageState};
pub use notifier::{CollectingNotifier, LogNotifier, Notification, NotificationKind, Notifier};
pub use text::{TextController, TextForm, TextOutcome, TextResult, TextState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationStatus {
    #[default]
    Idle,
    Pending,
    Success,
    Error,
}

/// Identifies one submission: a UUID for log correlation plus a
/// monotonically increasing generation number within its controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Ticket {
    pub id: Uuid,
    pub generation: u64,
}

impl Ticket {
    pub fn next(latest: &mut u64) -> Self {
        *latest += 1;
        Self {
            id: Uuid::new_v4(),
            generation: *latest,
        }
    }
}

/// Locks a state cell, recovering the guard if a writer panicked.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
