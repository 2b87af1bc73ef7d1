// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::sync::Arc;

use crate::config::Config;
use crate::facade::ClientFacade;
use crate::memory::InMemoryFacade;

/// Services shared by every part of the client, built once at startup and
/// handed to whoever needs them. Clones share the same facade.
#[derive(Clone)]
pub struct RaplaContext {
    config: Arc<Config>,
    facade: Arc<dyn ClientFacade>,
}

impl RaplaContext {
    pub fn new(config: Config, facade: Arc<dyn ClientFacade>) -> Self {
        Self {
            config: Arc::new(config),
            facade,
        }
    }

    /// Opens the in-memory facade described by the configuration and logs in
    /// the configured user.
    pub async fn open(mut config: Config) -> Result<Self, Box<dyn Error>> {
        config.normalize()?;

        let mut facade = InMemoryFacade::open(&config.data_path)
            .await
            .map_err(|e| format!("Failed to open {}: {e}", config.data_path.display()))?;
        if let Some(today) = config.today {
            facade = facade.with_today(today);
        }
        if let Some(username) = &config.username {
            facade.login(username)?;
        }

        Ok(Self::new(config, Arc::new(facade)))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn facade(&self) -> &dyn ClientFacade {
        self.facade.as_ref()
    }

    pub fn shared_facade(&self) -> Arc<dyn ClientFacade> {
        self.facade.clone()
    }
}

impl std::fmt::Debug for RaplaContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RaplaContext")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
