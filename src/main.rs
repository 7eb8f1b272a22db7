use seczetta_risk_gate::{
    config::Settings,
    models::{AuthUser, LoginContext},
    services::RiskGate,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(settings.logging.level.clone()))
        .init();

    info!("Starting SecZetta risk gate");

    let mut args = std::env::args().skip(1);
    let user = AuthUser {
        user_name: args.next(),
        email: args.next(),
    };
    if user.lookup_value().is_none() {
        error!("Usage: seczetta-risk-gate <username> [email]");
        std::process::exit(2);
    }

    let gate = RiskGate::new(settings);
    let mut context = LoginContext::default();

    match gate.authorize(&user, &mut context).await {
        Ok(outcome) => {
            info!("Login allowed: {:?}", outcome);
            if let Some(prompt) = &context.multifactor {
                info!("Additional factor required, provider {:?}", prompt.provider);
            }
            if !context.id_token_claims.is_empty() {
                info!("Risk claims written: {:?}", context.id_token_claims);
            }
            Ok(())
        }
        Err(e) => {
            error!("Login denied: {}", e);
            std::process::exit(1);
        }
    }
}
