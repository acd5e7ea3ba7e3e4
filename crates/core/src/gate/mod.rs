//! Authorization gate and entry routing.
//!
//! The gate decides, locally and synchronously, whether the protected
//! catalog view may render. It is re-evaluated on every entry; nothing about
//! a previous decision is remembered.

mod route;

pub use route::*;

use std::sync::Arc;

use tracing::{debug, error, info};

use crate::credential;
use crate::session::{Session, SessionStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Allow(Session),
    Deny,
}

impl GateDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GateDecision::Allow(_))
    }
}

pub struct AuthorizationGate {
    session: Arc<dyn SessionStore>,
}

impl AuthorizationGate {
    pub fn new(session: Arc<dyn SessionStore>) -> Self {
        Self { session }
    }

    /// Evaluate the gate against the wall clock.
    pub fn check(&self) -> GateDecision {
        self.check_at(credential::now_millis())
    }

    /// Evaluate the gate at `now_ms` (epoch millis).
    ///
    /// A missing, malformed or expired credential denies entry and purges
    /// whatever was stored.
    pub fn check_at(&self, now_ms: i64) -> GateDecision {
        let stored = match self.session.get() {
            Ok(stored) => stored,
            Err(e) => {
                error!("Could not read session: {}", e);
                self.purge();
                return GateDecision::Deny;
            }
        };

        let Some(token) = stored.token.clone() else {
            debug!("No credential stored");
            self.purge();
            return GateDecision::Deny;
        };

        if credential::is_expired_at(&token, now_ms) {
            info!("Stored credential is expired or malformed");
            self.purge();
            return GateDecision::Deny;
        }

        GateDecision::Allow(Session {
            token,
            user: stored.user(),
        })
    }

    fn purge(&self) {
        if let Err(e) = self.session.clear() {
            error!("Failed to clear session: {}", e);
        }
    }
}
