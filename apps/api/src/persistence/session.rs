//! The single editing session that owns the in-memory draft.
//!
//! Lifecycle is `Uninitialized → Hydrated`. Until the stored draft has been
//! loaded, edits are rejected so that an autosave can never overwrite a
//! draft nobody has read yet. Every accepted edit schedules a debounced save.

use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info};

use crate::models::resume::ResumeData;
use crate::persistence::adapter::DraftRepository;
use crate::persistence::debounce::DebouncedTask;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifecycle {
    Uninitialized,
    Hydrated,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("draft session has not been hydrated yet")]
    NotHydrated,
}

/// Captured when a long-running request (e.g. text generation) starts.
/// Clearing, importing or duplicating the draft invalidates older tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationTicket {
    epoch: u64,
}

struct SessionState {
    lifecycle: Lifecycle,
    draft: ResumeData,
    epoch: u64,
}

pub struct DraftSession {
    repository: DraftRepository,
    /// Pending saves carry the repository's write epoch from when they were
    /// scheduled.
    autosave: DebouncedTask<(u64, ResumeData)>,
    state: Mutex<SessionState>,
}

impl DraftSession {
    pub fn new(repository: DraftRepository, debounce: Duration) -> Self {
        let writer = repository.clone();
        Self {
            repository,
            autosave: DebouncedTask::new(debounce, move |(epoch, data): (u64, ResumeData)| {
                writer.save_from(epoch, &data);
            }),
            state: Mutex::new(SessionState {
                lifecycle: Lifecycle::Uninitialized,
                draft: ResumeData::default(),
                epoch: 0,
            }),
        }
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.state().lifecycle
    }

    /// Loads the stored draft the first time it is called and returns the
    /// current draft on every call. Later calls never reload.
    pub fn hydrate(&self) -> ResumeData {
        let mut state = self.state();
        if state.lifecycle == Lifecycle::Uninitialized {
            match self.repository.load() {
                Some(draft) => {
                    info!("Hydrated draft from '{}'", self.repository.key());
                    state.draft = draft;
                }
                None => info!("No stored draft in '{}'; starting empty", self.repository.key()),
            }
            state.lifecycle = Lifecycle::Hydrated;
        }
        state.draft.clone()
    }

    pub fn current(&self) -> Result<ResumeData, SessionError> {
        let state = self.hydrated()?;
        Ok(state.draft.clone())
    }

    /// Replaces the draft with an edited value and schedules an autosave.
    pub fn replace(&self, draft: ResumeData) -> Result<(), SessionError> {
        let mut state = self.hydrated()?;
        self.schedule_save(draft.clone());
        state.draft = draft;
        Ok(())
    }

    /// Read-modify-write under one lock. `edit` returns `None` to leave the
    /// draft untouched. Returns the new draft when one was stored.
    pub fn update(
        &self,
        edit: impl FnOnce(&ResumeData) -> Option<ResumeData>,
    ) -> Result<Option<ResumeData>, SessionError> {
        let mut state = self.hydrated()?;
        let Some(next) = edit(&state.draft) else {
            return Ok(None);
        };
        self.schedule_save(next.clone());
        state.draft = next.clone();
        Ok(Some(next))
    }

    /// Swaps in a different résumé altogether (import, duplicate). Pending
    /// generation results for the old one are abandoned.
    pub fn reset(&self, draft: ResumeData) -> Result<(), SessionError> {
        let mut state = self.hydrated()?;
        state.epoch += 1;
        self.schedule_save(draft.clone());
        state.draft = draft;
        Ok(())
    }

    /// Like [`DraftSession::reset`], but derives the replacement from the
    /// current draft without releasing the lock in between.
    pub fn reset_with(
        &self,
        derive: impl FnOnce(&ResumeData) -> ResumeData,
    ) -> Result<ResumeData, SessionError> {
        let mut state = self.hydrated()?;
        let next = derive(&state.draft);
        state.epoch += 1;
        self.schedule_save(next.clone());
        state.draft = next.clone();
        Ok(next)
    }

    /// Drops the pending autosave, removes the stored draft and resets the
    /// in-memory draft to empty. A storage failure is logged and the
    /// in-memory reset still happens.
    pub fn clear(&self) -> Result<(), SessionError> {
        let mut state = self.hydrated()?;
        self.autosave.cancel();
        if let Err(e) = self.repository.clear() {
            error!("Error clearing stored draft: {e}");
        }
        state.epoch += 1;
        state.draft = ResumeData::default();
        Ok(())
    }

    pub fn ticket(&self) -> Result<GenerationTicket, SessionError> {
        let state = self.hydrated()?;
        Ok(GenerationTicket { epoch: state.epoch })
    }

    /// Like [`DraftSession::update`], but only if `ticket` is still current.
    /// Stale tickets yield `Ok(None)` without calling `edit`.
    pub fn update_if_current(
        &self,
        ticket: GenerationTicket,
        edit: impl FnOnce(&ResumeData) -> Option<ResumeData>,
    ) -> Result<Option<ResumeData>, SessionError> {
        let mut state = self.hydrated()?;
        if state.epoch != ticket.epoch {
            info!("Abandoning result for a draft that has since been replaced");
            return Ok(None);
        }
        let Some(next) = edit(&state.draft) else {
            return Ok(None);
        };
        self.schedule_save(next.clone());
        state.draft = next.clone();
        Ok(Some(next))
    }

    /// Writes any pending autosave immediately (shutdown path).
    pub fn flush(&self) -> bool {
        self.autosave.flush()
    }

    pub fn has_pending_save(&self) -> bool {
        self.autosave.is_pending()
    }

    fn schedule_save(&self, draft: ResumeData) {
        self.autosave.schedule((self.repository.write_epoch(), draft));
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn hydrated(&self) -> Result<MutexGuard<'_, SessionState>, SessionError> {
        let state = self.state();
        match state.lifecycle {
            Lifecycle::Hydrated => Ok(state),
            Lifecycle::Uninitialized => Err(SessionError::NotHydrated),
        }
    }
}
