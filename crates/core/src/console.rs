//! Wiring for a complete admin console.

use std::sync::Arc;

use tracing::{debug, info};

use crate::api::MangaApi;
use crate::auth::{AuthError, LoginFlow};
use crate::batch::BatchCoordinator;
use crate::catalog::CatalogCoordinator;
use crate::config::Config;
use crate::gate::AuthorizationGate;
use crate::session::{FileSessionStore, SessionStore, UserIdentity};
use crate::transport::{ApiError, AuthenticatedTransport, HttpExchange, ReqwestExchange};
use crate::ui::{ConsoleUi, Route};

/// Every component of the console, sharing one session store, one
/// transport and one UI sink.
pub struct AdminConsole {
    config: Config,
    session: Arc<dyn SessionStore>,
    ui: Arc<dyn ConsoleUi>,
    gate: AuthorizationGate,
    auth: LoginFlow,
    catalog: Arc<CatalogCoordinator>,
    batch: BatchCoordinator,
}

impl AdminConsole {
    pub fn new(
        config: Config,
        exchange: Arc<dyn HttpExchange>,
        session: Arc<dyn SessionStore>,
        ui: Arc<dyn ConsoleUi>,
    ) -> Self {
        let transport = AuthenticatedTransport::new(exchange, Arc::clone(&session), Arc::clone(&ui));
        let api = Arc::new(MangaApi::new(transport));

        let gate = AuthorizationGate::new(Arc::clone(&session));
        let auth = LoginFlow::new(Arc::clone(&api), Arc::clone(&session), Arc::clone(&ui));
        let catalog = Arc::new(CatalogCoordinator::new(
            Arc::clone(&api),
            Arc::clone(&ui),
            config.catalog.page_size,
        ));
        let batch = BatchCoordinator::new(api, Arc::clone(&catalog), Arc::clone(&ui));

        Self {
            config,
            session,
            ui,
            gate,
            auth,
            catalog,
            batch,
        }
    }

    /// Console talking to the configured backend over HTTP, with the
    /// session kept in the configured file.
    pub fn from_config(config: Config, ui: Arc<dyn ConsoleUi>) -> Result<Self, ApiError> {
        let exchange = Arc::new(ReqwestExchange::new(&config.api)?);
        let session = Arc::new(FileSessionStore::new(config.session.path.clone()));
        info!(
            "Console for {} (session at {:?})",
            config.api.base_url, config.session.path
        );
        Ok(Self::new(config, exchange, session, ui))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session(&self) -> &dyn SessionStore {
        self.session.as_ref()
    }

    pub fn gate(&self) -> &AuthorizationGate {
        &self.gate
    }

    pub fn auth(&self) -> &LoginFlow {
        &self.auth
    }

    pub fn catalog(&self) -> &CatalogCoordinator {
        &self.catalog
    }

    pub fn batch(&self) -> &BatchCoordinator {
        &self.batch
    }

    /// Log in and, on success, open the catalog.
    pub async fn login(&self, username: &str, password: &str) -> Result<UserIdentity, AuthError> {
        let user = self.auth.login(username, password).await?;
        // A failed first load has already been reported
        if let Err(e) = self.open_catalog().await {
            debug!("Initial catalog load failed: {}", e);
        }
        Ok(user)
    }

    /// Pass the gate for the catalog view.
    ///
    /// On denial the UI is sent to the view the gate resolved to.
    pub fn enter_catalog(&self) -> bool {
        let route = self.gate.enter(Route::Catalog.path());
        if route != Route::Catalog {
            self.ui.navigate(route);
            return false;
        }
        true
    }

    /// Enter the catalog view and load what it shows first.
    ///
    /// When the gate allows, the tag vocabulary and the first unfiltered
    /// page are loaded. When it denies, nothing is requested.
    pub async fn open_catalog(&self) -> Result<Route, ApiError> {
        if !self.enter_catalog() {
            return Ok(Route::Login);
        }

        self.catalog.load_tag_vocabulary().await;
        self.catalog.load(0).await?;
        Ok(Route::Catalog)
    }
}
