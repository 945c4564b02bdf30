//! Application state shared across handlers.

use std::sync::Arc;

use triage_model::{FittedModel, FittedVectorizer};
use triage_store::{ComplaintLedger, UserStore};

use crate::config::ServerConfig;

/// Application state shared across all handlers.
///
/// The fitted vectorizer and classifier are loaded once at startup and
/// never mutated or reloaded; handlers read them concurrently without
/// locking. This is cloneable and can be extracted in handlers using
/// `State<AppState>`.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ServerConfig>,
    vectorizer: Arc<FittedVectorizer>,
    model: Arc<FittedModel>,
    ledger: Arc<ComplaintLedger>,
    users: Arc<UserStore>,
}

impl AppState {
    /// Create new application state from the loaded artifact pair and
    /// configuration. Stores open on the configured file paths.
    pub fn new(config: ServerConfig, vectorizer: FittedVectorizer, model: FittedModel) -> Self {
        let ledger = ComplaintLedger::new(config.data_file.clone());
        let users = UserStore::new(config.users_file.clone());
        Self {
            config: Arc::new(config),
            vectorizer: Arc::new(vectorizer),
            model: Arc::new(model),
            ledger: Arc::new(ledger),
            users: Arc::new(users),
        }
    }

    /// Get a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get a reference to the fitted vectorizer.
    pub fn vectorizer(&self) -> &FittedVectorizer {
        &self.vectorizer
    }

    /// Get a reference to the fitted classifier.
    pub fn model(&self) -> &FittedModel {
        &self.model
    }

    /// Get a reference to the complaint ledger.
    pub fn ledger(&self) -> &ComplaintLedger {
        &self.ledger
    }

    /// Get a reference to the staff credential store.
    pub fn users(&self) -> &UserStore {
        &self.users
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
