//! Administrator bootstrap.
//!
//! Registration only creates accounts for whoever fills the form in, so the first
//! administrative account of a fresh database is created from the command line.

use anyhow::{Context, anyhow, bail};

use campus_core::hash_password;
use campus_db::AccountStore;
use campus_models::{Account, NewAccount, SubRole};

/// Validated input for [`create_admin`].
#[derive(Debug, Clone)]
pub struct AdminInput {
    pub email: String,
    pub name: String,
    pub password: String,
}

impl AdminInput {
    pub fn new(email: &str, name: &str, password: &str) -> anyhow::Result<Self> {
        let email = email.trim().to_lowercase();
        let name = name.trim().to_string();

        if !email.contains('@') || email.starts_with('@') || email.ends_with('@') {
            bail!("Valid email is required");
        }
        if name.is_empty() {
            bail!("Name is required");
        }
        if password.len() < 6 {
            bail!("Password must be at least 6 characters");
        }

        Ok(Self {
            email,
            name,
            password: password.to_string(),
        })
    }
}

/// Inserts an active academic account with the administrative sub-role.
pub async fn create_admin(store: &dyn AccountStore, input: AdminInput) -> anyhow::Result<Account> {
    if store
        .find_account_by_email(&input.email)
        .await
        .map_err(|e| e.error)?
        .is_some()
    {
        bail!("An account with email {} already exists", input.email);
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| anyhow!("Failed to hash password: {}", e.error))?;

    store
        .create_account(NewAccount::academic(
            input.email,
            password_hash,
            SubRole::Administrative,
            input.name,
        ))
        .await
        .map_err(|e| e.error)
        .context("Failed to create administrator")
}
