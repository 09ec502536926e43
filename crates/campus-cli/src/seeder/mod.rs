//! Development data seeding.
//!
//! Every seeded account uses an address under [`SEED_EMAIL_DOMAIN`] so that
//! [`clear_seed`] can remove them without touching real accounts.

mod accounts;
mod models;

pub use accounts::{generate_faculty, generate_students, seed_faculty, seed_students};
pub use models::{FacultySeed, SeedConfig, SeedSummary, StudentSeed};

use std::time::Instant;

use anyhow::anyhow;
use campus_core::hash_password;
use campus_db::{AccountStore, PgAccountStore};
use campus_models::SubRole;

pub const SEED_EMAIL_DOMAIN: &str = "seed.campus.test";
pub const DEFAULT_SEED_PASSWORD: &str = "password123";

/// Seeds administrators, faculty and students with one shared password.
pub async fn seed_all(store: &dyn AccountStore, config: &SeedConfig) -> anyhow::Result<SeedSummary> {
    let start_time = Instant::now();
    println!(
        "🌱 Seeding {} accounts ({} administrators, {} faculty, {} students)...",
        config.total_accounts(),
        config.administrators,
        config.faculty,
        config.students
    );

    // One hash for the whole run; bcrypt dominates the cost otherwise.
    let password_hash =
        hash_password(&config.password).map_err(|e| anyhow!("Failed to hash password: {}", e.error))?;

    let mut academics = generate_faculty(config.administrators, SubRole::Administrative, 0);
    academics.extend(generate_faculty(
        config.faculty,
        SubRole::Faculty,
        config.administrators,
    ));
    let students = generate_students(config.students);

    let summary = SeedSummary {
        academics: seed_faculty(store, &academics, &password_hash).await?,
        students: seed_students(store, &students, &password_hash).await?,
    };

    println!(
        "✅ Seeded {} academic and {} student accounts in {:?}",
        summary.academics,
        summary.students,
        start_time.elapsed()
    );
    println!("   Shared password: {}", config.password);

    Ok(summary)
}

/// Deletes every account under the seed domain. Profiles go with them.
pub async fn clear_seed(store: &PgAccountStore) -> anyhow::Result<u64> {
    let suffix = format!("@{SEED_EMAIL_DOMAIN}");
    let deleted = store
        .delete_accounts_by_email_suffix(&suffix)
        .await
        .map_err(|e| e.error)?;
    println!("🧹 Deleted {deleted} seeded accounts");
    Ok(deleted)
}
