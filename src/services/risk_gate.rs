use tracing::{info, warn};

use crate::config::Settings;
use crate::error::AppError;
use crate::models::{AuthUser, GateOutcome, LoginContext, MultifactorPrompt};
use crate::services::SecZettaClient;

/// Where a score falls relative to the configured thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
enum ScoreBand {
    Acceptable,
    Elevated,
    Excessive { maximum: i64 },
}

/// Decides whether a login proceeds, needs a second factor, or is denied,
/// based on the SecZetta risk score for the authenticating identity.
///
/// The evaluation is strictly sequential: profile search, then risk score
/// fetch keyed by the first matching profile, then the threshold policy.
/// Context mutations happen only after both calls have succeeded.
pub struct RiskGate {
    settings: Settings,
    client: Option<SecZettaClient>,
}

impl RiskGate {
    /// The client exists only when both the API key and the base URL are
    /// configured; otherwise every login bypasses the gate.
    pub fn new(settings: Settings) -> Self {
        let client = match (&settings.seczetta.base_url, &settings.seczetta.api_key) {
            (Some(base_url), Some(api_key)) => {
                Some(SecZettaClient::new(base_url.clone(), api_key.clone()))
            }
            _ => None,
        };
        Self { settings, client }
    }

    /// Run the gate for one login transaction.
    ///
    /// `Ok` resumes the pipeline (the context may now carry an MFA directive
    /// and risk claims); `Err(AppError::AuthorizationError)` denies the login.
    pub async fn authorize(
        &self,
        user: &AuthUser,
        context: &mut LoginContext,
    ) -> Result<GateOutcome, AppError> {
        let Some(client) = &self.client else {
            warn!("Missing SecZetta API key or base URL, skipping risk evaluation");
            return Ok(GateOutcome::Skipped);
        };

        let Some(lookup_value) = user.lookup_value() else {
            warn!("User has neither a username nor an email to search on");
            return self.resolve_retrieval_failure();
        };

        let profiles = match client
            .search_profiles(
                self.settings.seczetta.profile_type_id.as_deref(),
                self.settings.seczetta.attribute_id.as_deref(),
                lookup_value,
            )
            .await
        {
            Ok(profiles) => profiles,
            Err(e) => {
                warn!("Profile search failed: {}", e);
                return self.resolve_retrieval_failure();
            }
        };

        // First match wins; the search may return several profiles for one key.
        let Some(profile) = profiles.first() else {
            warn!("No profile matched lookup value {:?}", lookup_value);
            return self.resolve_retrieval_failure();
        };
        info!("Resolved profile {} for login", profile.id);

        let scores = match client.fetch_risk_scores(profile.id).await {
            Ok(scores) => scores,
            Err(e) => {
                warn!("Risk score fetch failed: {}", e);
                return self.resolve_retrieval_failure();
            }
        };

        // The API reports scores as an array of one. An empty array means no
        // assessment exists, which is handled like a failed lookup.
        let Some(score) = scores.first() else {
            warn!("No risk score recorded for profile {}", profile.id);
            return self.resolve_retrieval_failure();
        };

        self.apply_policy(score.overall_score, context)
    }

    fn apply_policy(
        &self,
        overall_score: f64,
        context: &mut LoginContext,
    ) -> Result<GateOutcome, AppError> {
        let band = score_band(
            overall_score,
            self.settings.policy.allowable_risk,
            self.settings.policy.maximum_allowed_risk,
        );

        let outcome = match band {
            ScoreBand::Elevated => {
                info!(
                    "Risk score {} is above the allowable threshold, prompting for MFA",
                    overall_score
                );
                context.multifactor = Some(MultifactorPrompt::any_provider());
                GateOutcome::MfaRequired {
                    score: overall_score,
                }
            }
            ScoreBand::Excessive { maximum } => {
                warn!(
                    "Risk score {} is greater than maximum of {}",
                    overall_score, maximum
                );
                return Err(AppError::AuthorizationError(format!(
                    "A {} risk score is too high. Maximum acceptable risk is {}",
                    overall_score, maximum
                )));
            }
            ScoreBand::Acceptable => GateOutcome::Allowed {
                score: overall_score,
            },
        };

        if let Some(risk_key) = &self.settings.policy.risk_key {
            let value = serde_json::Value::from(overall_score);
            context.id_token_claims.insert(risk_key.clone(), value.clone());
            context.access_token_claims.insert(risk_key.clone(), value);
        }

        Ok(outcome)
    }

    /// Resolve a failed or empty score retrieval per the
    /// authenticate-on-error policy: proceed untouched, or deny.
    fn resolve_retrieval_failure(&self) -> Result<GateOutcome, AppError> {
        if self.settings.policy.authenticate_on_error {
            info!("Authenticate-on-error is set, continuing without a risk score");
            return Ok(GateOutcome::FailedOpen);
        }
        Err(AppError::AuthorizationError(
            "Error retrieving risk score.".to_string(),
        ))
    }
}

/// Threshold comparisons are strict; a score equal to a threshold passes.
/// An unset maximum leaves the step-up band unbounded above.
fn score_band(score: f64, allowable: Option<i64>, maximum: Option<i64>) -> ScoreBand {
    if let Some(allowable) = allowable {
        if score > allowable as f64 && maximum.map_or(true, |m| score < m as f64) {
            return ScoreBand::Elevated;
        }
    }
    if let Some(maximum) = maximum {
        if score > maximum as f64 {
            return ScoreBand::Excessive { maximum };
        }
    }
    ScoreBand::Acceptable
}
