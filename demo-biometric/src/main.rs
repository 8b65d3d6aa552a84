use std::sync::Arc;

use biometric_credential::{CeremonyResult, SoftwareAuthenticator, UserGesture};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing(app_name: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        #[cfg(debug_assertions)]
        {
            format!("biometric_credential=debug,{app_name}=debug,info").into()
        }

        #[cfg(not(debug_assertions))]
        {
            "info".into()
        }
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("You can increase verbosity by setting the RUST_LOG environment variable.");
}

fn print_result(step: &str, result: &CeremonyResult) -> Result<(), serde_json::Error> {
    println!("{step:<28} {}", serde_json::to_string(result)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    init_tracing("demo_biometric");

    let origin =
        std::env::var("BIOMETRIC_ORIGIN").unwrap_or_else(|_| "https://localhost".to_string());
    let authenticator = Arc::new(SoftwareAuthenticator::new(&origin)?);
    let helper = biometric_credential::init(Box::new(authenticator.clone())).await?;

    tracing::info!(
        "Biometric sign-in supported on {}: {}",
        origin,
        helper.is_supported()
    );
    tracing::info!(
        "Platform authenticator available: {}",
        helper.is_platform_authenticator_available().await
    );

    print_result(
        "register(alice)",
        &helper.register("alice").await.into(),
    )?;
    println!(
        "{:<28} {}",
        "hasRegistered(alice)",
        helper.has_registered("alice").await
    );
    print_result(
        "authenticate(alice)",
        &helper.authenticate("alice").await.into(),
    )?;
    print_result("authenticate(bob)", &helper.authenticate("bob").await.into())?;

    authenticator.set_gesture(UserGesture::Deny)?;
    print_result(
        "authenticate(alice) denied",
        &helper.authenticate("alice").await.into(),
    )?;
    authenticator.set_gesture(UserGesture::Approve)?;

    println!(
        "{:<28} {:?}",
        "registered users",
        helper.registered_usernames().await?
    );

    Ok(())
}
