// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use futures::FutureExt;
use raplamobile_core::{Allocatable, ClientFacade, FacadeError, allocatables_of_type};
use tokio::task::JoinHandle;

/// Loads the allocatables of one category on a background task.
///
/// At most one load runs at a time. Starting a new load aborts the previous
/// one, and so does dropping the loader.
#[derive(Debug, Default)]
pub struct AllocatableLoader {
    handle: Option<JoinHandle<Result<Vec<Allocatable>, FacadeError>>>,
}

impl AllocatableLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, facade: Arc<dyn ClientFacade>, category: String) {
        self.cancel();
        tracing::debug!(category, "loading allocatables");
        self.handle = Some(tokio::spawn(async move {
            allocatables_of_type(facade.as_ref(), &category).await
        }));
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Takes the result of a finished load.
    ///
    /// Returns `None` while the load is running, and when it failed: the
    /// failure is logged and the list is left as is.
    pub fn poll(&mut self) -> Option<Vec<Allocatable>> {
        let handle = self.handle.as_mut()?;
        if !handle.is_finished() {
            return None;
        }

        let result = handle.now_or_never();
        self.handle = None;
        match result? {
            Ok(Ok(allocatables)) => Some(allocatables),
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "failed to load allocatables");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "allocatable loader did not finish");
                None
            }
        }
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            tracing::debug!("canceling allocatable loader");
            handle.abort();
        }
    }
}

impl Drop for AllocatableLoader {
    fn drop(&mut self) {
        self.cancel();
    }
}
