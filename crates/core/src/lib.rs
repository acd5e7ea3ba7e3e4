pub mod api;
pub mod auth;
pub mod batch;
pub mod catalog;
pub mod config;
pub mod console;
pub mod credential;
pub mod gate;
pub mod messages;
pub mod session;
pub mod testing;
pub mod transport;
pub mod ui;

pub use api::{LoginRequest, MangaApi, MangaEntry, PageEnvelope};
pub use auth::{normalize_login_response, AuthError, LoginFlow, LoginGrant};
pub use batch::{normalize_import_payload, BatchCoordinator, BatchError, BatchOutcome};
pub use catalog::{CatalogCoordinator, CatalogPage, LoadOutcome, SelectionSet};
pub use config::{
    load_config, load_config_from_str, load_config_or_default, validate_config, ApiConfig,
    CatalogConfig, Config, ConfigError, SessionConfig,
};
pub use console::AdminConsole;
pub use gate::{AuthorizationGate, GateDecision, RouteOutcome};
pub use session::{
    FileSessionStore, MemorySessionStore, Session, SessionError, SessionStore, StoredSession,
    UserIdentity,
};
pub use transport::{
    ApiError, AuthenticatedTransport, HttpExchange, HttpRequest, HttpResponse, Method,
    ReqwestExchange,
};
pub use ui::{ConsoleUi, Notice, NoticeLevel, Route};
