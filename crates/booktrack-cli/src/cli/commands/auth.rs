//! Account command handlers.

use anyhow::{Result, bail};
use booktrack_core::config::Config;
use booktrack_core::forms::{CredentialErrors, validate_credentials};
use booktrack_core::session::SessionStore;
use booktrack_core::store::{AppState, Request};

use super::CommandContext;

pub async fn register(config: &Config, email: &str, password: &str) -> Result<()> {
    let credentials = validate_credentials(email.trim(), password).map_err(invalid)?;
    let mut ctx = CommandContext::new(config);
    ctx.run(Request::Register(credentials)).await?;
    println!("Registration successful. Run `booktrack login --email {}` to log in.", email.trim());
    Ok(())
}

pub async fn login(config: &Config, email: &str, password: &str) -> Result<()> {
    let credentials = validate_credentials(email.trim(), password).map_err(invalid)?;
    let mut ctx = CommandContext::new(config);
    ctx.run(Request::Login(credentials)).await?;
    let shown = ctx
        .store
        .auth
        .user
        .as_ref()
        .map_or(email.trim(), |user| user.email.as_str());
    println!("Logged in as {shown}");
    Ok(())
}

pub fn logout() -> Result<()> {
    let session = SessionStore::open_default();
    let mut store = AppState::from_session(&session);
    let was_authenticated = store.auth.is_authenticated;
    store.logout(&session);
    if was_authenticated {
        println!("Logged out");
    } else {
        println!("Not logged in");
    }
    Ok(())
}

pub async fn whoami(config: &Config) -> Result<()> {
    let mut ctx = CommandContext::new(config);
    if !ctx.store.auth.is_authenticated {
        bail!("Not logged in");
    }
    ctx.run(Request::FetchCurrentUser).await?;
    match &ctx.store.auth.user {
        Some(user) => println!("{} ({})", user.email, user.id),
        None => bail!("Server returned no user"),
    }
    Ok(())
}

fn invalid(errors: CredentialErrors) -> anyhow::Error {
    let messages: Vec<&str> = [errors.email, errors.password].into_iter().flatten().collect();
    anyhow::anyhow!(messages.join("; "))
}
