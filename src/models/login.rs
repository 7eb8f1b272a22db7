//! Login Transaction Types
//!
//! The host identity pipeline hands the gate a user record and a mutable
//! per-login context; these are the shapes of both, plus the explicit
//! outcome the gate reports back.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// External identity record for the authenticating user. Never mutated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthUser {
    pub user_name: Option<String>,
    pub email: Option<String>,
}

impl AuthUser {
    /// Search key for the profile lookup: username first, email as fallback.
    pub fn lookup_value(&self) -> Option<&str> {
        self.user_name.as_deref().or(self.email.as_deref())
    }
}

/// Additional-factor directive the gate may write into the context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultifactorPrompt {
    pub provider: String,
    pub allow_remember_browser: bool,
}

impl MultifactorPrompt {
    /// Any enrolled provider, and the browser may not be remembered.
    pub fn any_provider() -> Self {
        Self {
            provider: "any".to_string(),
            allow_remember_browser: false,
        }
    }
}

/// Mutable per-login transaction state owned by the host pipeline.
///
/// The gate touches exactly three things: the MFA directive and one risk
/// claim in each of the two token claim maps. Everything else in the real
/// context is host-owned and not modeled here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoginContext {
    pub multifactor: Option<MultifactorPrompt>,
    pub id_token_claims: HashMap<String, Value>,
    pub access_token_claims: HashMap<String, Value>,
}

/// How a login transaction came through the gate. Denial is reported as an
/// `AppError::AuthorizationError`, not an outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum GateOutcome {
    /// Required settings are missing; the login proceeded without a risk check.
    Skipped,
    /// Score cleared both thresholds.
    Allowed { score: f64 },
    /// Score landed in the step-up band; an additional factor is required.
    MfaRequired { score: f64 },
    /// Score retrieval failed and the fail-open policy let the login through.
    FailedOpen,
}
