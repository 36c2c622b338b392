//! Headless account creation.

use anyhow::Result;
use roster_core::backend::Backend;
use roster_core::session;

pub async fn run(backend: &Backend, email: &str, password: &str) -> Result<()> {
    session::register(backend.auth.as_ref(), email, password).await?;
    println!("Created account for {email}");
    Ok(())
}
