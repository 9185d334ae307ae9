//! Shared application state for the helpdesk gateway.
//!
//! Seeds the user directory from config, compiles the bearer-token table, and
//! owns the workflow coordinator every handler goes through.

use std::collections::HashMap;
use std::sync::Arc;

use helpdesk_core::error::{HelpdeskError, Result};
use helpdesk_core::IdentityContext;

use crate::config::HelpdeskConfig;
use crate::obs::metrics::WorkflowMetrics;
use crate::store::{InMemoryStore, NewUser, TicketStore};
use crate::workflow::TicketWorkflowCoordinator;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    identities: HashMap<String, IdentityContext>,
    workflow: TicketWorkflowCoordinator,
    metrics: Arc<WorkflowMetrics>,
}

impl AppState {
    /// Build state over a fresh in-memory store.
    pub async fn new(cfg: HelpdeskConfig) -> Result<Self> {
        Self::with_store(cfg, Arc::new(InMemoryStore::new())).await
    }

    /// Build state over any store; configured users are inserted into it.
    pub async fn with_store(cfg: HelpdeskConfig, store: Arc<dyn TicketStore>) -> Result<Self> {
        let mut identities = HashMap::with_capacity(cfg.users.len());
        for u in &cfg.users {
            store
                .insert_user(NewUser {
                    id: u.id,
                    name: u.name.clone(),
                    email: u.email.clone(),
                    role: u.role,
                })
                .await
                .map_err(|e| {
                    HelpdeskError::BadRequest(format!("user seed failed (user={}): {e}", u.id))
                })?;
            identities.insert(u.token.clone(), IdentityContext::new(u.id, u.role));
        }
        tracing::info!(users = identities.len(), "user directory seeded");

        let metrics = Arc::new(WorkflowMetrics::default());
        let workflow = TicketWorkflowCoordinator::new(store, cfg.server.input_limits())
            .with_metrics(Arc::clone(&metrics));

        Ok(Self {
            inner: Arc::new(AppStateInner {
                identities,
                workflow,
                metrics,
            }),
        })
    }

    pub fn workflow(&self) -> &TicketWorkflowCoordinator {
        &self.inner.workflow
    }

    pub fn metrics(&self) -> &WorkflowMetrics {
        &self.inner.metrics
    }

    pub fn is_draining(&self) -> bool {
        self.inner.metrics.is_draining()
    }

    /// Map a bearer token to the caller it authenticates.
    pub fn resolve_identity(&self, token: &str) -> Result<IdentityContext> {
        self.inner
            .identities
            .get(token)
            .copied()
            .ok_or(HelpdeskError::AuthFailed)
    }
}
