//! Login and profile example.
//!
//! Logs in with email and password, prints the profile and MFA methods,
//! checks one permission and logs out again.
//!
//! Run with: cargo run --example login_profile
//!
//! Environment variables:
//! - COREAUTH_URL: base address (default http://localhost:3000)
//! - COREAUTH_TENANT, COREAUTH_EMAIL, COREAUTH_PASSWORD: credentials

use coreauth_rs::models::CheckRequest;
use coreauth_rs::{CoreAuthClient, Error};

#[tokio::main]
async fn main() -> coreauth_rs::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let base_url =
        std::env::var("COREAUTH_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
    let tenant = std::env::var("COREAUTH_TENANT")
        .expect("COREAUTH_TENANT environment variable required");
    let email = std::env::var("COREAUTH_EMAIL")
        .expect("COREAUTH_EMAIL environment variable required");
    let password = std::env::var("COREAUTH_PASSWORD")
        .expect("COREAUTH_PASSWORD environment variable required");

    let client = CoreAuthClient::new(&base_url)?;

    let health = client.admin().health().await?;
    println!("Server status: {}", health.status);

    let tokens = match client.login(&tenant, &email, &password).await {
        Ok(tokens) => tokens,
        Err(Error::Authentication(api)) => {
            println!("Login rejected: {}", api.message);
            return Ok(());
        }
        Err(err) => return Err(err),
    };

    if tokens.requires_mfa() {
        println!(
            "A second factor is required (methods: {}); finish the login in the web app.",
            tokens.methods.join(", ")
        );
        return Ok(());
    }
    if tokens.requires_mfa_enrollment() {
        println!("Enroll a second factor before logging in.");
        return Ok(());
    }
    println!("Logged in, token expires in {}s", tokens.expires_in);

    let profile = client.auth().get_profile().await?;
    println!("\nProfile:");
    println!("  Email: {} (verified: {})", profile.email, profile.email_verified);
    println!(
        "  Name: {}",
        profile.metadata.full_name.as_deref().unwrap_or("-")
    );
    println!("  MFA enabled: {}", profile.mfa_enabled);

    let methods = client.mfa().list_methods().await?;
    println!("  MFA methods: {}", methods);

    let check = client
        .fga()
        .check(&CheckRequest::new(
            &tenant, "user", &profile.id, "viewer", "document", "handbook",
        ))
        .await?;
    println!("\nMay view document:handbook: {}", check.allowed);

    client.logout().await?;
    println!("\nLogged out.");
    Ok(())
}
