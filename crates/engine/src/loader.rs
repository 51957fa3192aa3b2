//! Catalog loading state machine.
//!
//! ```text
//! Loading ──ok──▶ Ready
//!    │
//!    └──err──▶ Error ──retry──▶ Loading
//! ```
//!
//! The loader owns no I/O: the caller fetches the data and reports the
//! outcome with [`CatalogLoader::finish`].

use std::fmt;

use crate::{Catalog, EngineError, ResultEngine};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CatalogState {
    Loading,
    Ready(Catalog),
    Error(String),
}

#[derive(Debug)]
pub struct CatalogLoader {
    state: CatalogState,
    attempts: u32,
}

impl Default for CatalogLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogLoader {
    /// A loader starts in [`CatalogState::Loading`] with its first attempt in
    /// flight.
    pub fn new() -> Self {
        Self {
            state: CatalogState::Loading,
            attempts: 1,
        }
    }

    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    /// Number of load attempts started so far.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, CatalogState::Loading)
    }

    pub fn catalog(&self) -> Option<&Catalog> {
        match &self.state {
            CatalogState::Ready(catalog) => Some(catalog),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            CatalogState::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Records the outcome of the attempt in flight.
    pub fn finish(&mut self, outcome: ResultEngine<Catalog>) -> ResultEngine<&CatalogState> {
        match outcome {
            Ok(catalog) => {
                self.ensure_loading("finish")?;
                tracing::info!(
                    categories = catalog.categories().len(),
                    items = catalog.items().len(),
                    "catalog ready"
                );
                self.state = CatalogState::Ready(catalog);
                Ok(&self.state)
            }
            Err(err) => self.fail(err),
        }
    }

    /// Records a failed attempt, whatever stopped it (unreadable file,
    /// invalid data).
    pub fn fail(&mut self, reason: impl fmt::Display) -> ResultEngine<&CatalogState> {
        self.ensure_loading("fail")?;
        tracing::error!(attempt = self.attempts, "catalog failed to load: {reason}");
        self.state = CatalogState::Error(reason.to_string());
        Ok(&self.state)
    }

    fn ensure_loading(&self, operation: &str) -> ResultEngine<()> {
        if self.is_loading() {
            Ok(())
        } else {
            Err(EngineError::InvalidTransition(format!(
                "{operation} called while no load is in flight"
            )))
        }
    }

    /// Starts a new attempt after a failure.
    pub fn retry(&mut self) -> ResultEngine<()> {
        match self.state {
            CatalogState::Error(_) => {
                self.attempts += 1;
                self.state = CatalogState::Loading;
                Ok(())
            }
            CatalogState::Loading => Err(EngineError::InvalidTransition(
                "retry called while loading".to_string(),
            )),
            CatalogState::Ready(_) => Err(EngineError::InvalidTransition(
                "retry called on a ready catalog".to_string(),
            )),
        }
    }

    /// Consumes the loader, returning the catalog when ready.
    pub fn into_catalog(self) -> ResultEngine<Catalog> {
        match self.state {
            CatalogState::Ready(catalog) => Ok(catalog),
            CatalogState::Error(message) => Err(EngineError::LoadFailed(message)),
            CatalogState::Loading => Err(EngineError::InvalidTransition(
                "catalog still loading".to_string(),
            )),
        }
    }
}
