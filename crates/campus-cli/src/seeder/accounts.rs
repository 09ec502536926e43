//! Account seeding.
//!
//! Generation runs in parallel with rayon; inserts go through the account store
//! one by one so each student account and profile pair stays transactional.

use chrono::NaiveDate;
use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};
use rayon::prelude::*;
use std::time::Instant;

use campus_db::AccountStore;
use campus_models::{NewAccount, NewStudentProfile, StudentContact, SubRole};

use super::SEED_EMAIL_DOMAIN;
use super::models::{FacultySeed, StudentSeed};

const DEPARTMENTS: [&str; 8] = [
    "Computer Science",
    "Mathematics",
    "Physics",
    "Chemistry",
    "Biology",
    "Economics",
    "History",
    "Literature",
];

/// Lowercase ASCII letters and digits of `value`, for use in an email local part.
fn slug(value: &str) -> String {
    value
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn seed_email(first: &str, last: &str, role_prefix: &str, index: usize) -> String {
    format!(
        "{}.{}+{}{}@{}",
        slug(first),
        slug(last),
        role_prefix,
        index,
        SEED_EMAIL_DOMAIN
    )
}

fn random_department() -> String {
    DEPARTMENTS[(0..DEPARTMENTS.len()).fake::<usize>()].to_string()
}

/// Generates academic seeds. `offset` keeps indexes unique across calls.
pub fn generate_faculty(count: usize, sub_role: SubRole, offset: usize) -> Vec<FacultySeed> {
    let prefix = match sub_role {
        SubRole::Administrative => "admin",
        SubRole::Faculty => "faculty",
    };

    (0..count)
        .into_par_iter()
        .map(|idx| {
            let first: String = FirstName().fake();
            let last: String = LastName().fake();
            FacultySeed {
                email: seed_email(&first, &last, prefix, offset + idx),
                name: format!("{first} {last}"),
                sub_role,
                department: random_department(),
            }
        })
        .collect()
}

pub fn generate_students(count: usize) -> Vec<StudentSeed> {
    (0..count)
        .into_par_iter()
        .map(|idx| {
            let first_name: String = FirstName().fake();
            let last_name: String = LastName().fake();
            StudentSeed {
                email: seed_email(&first_name, &last_name, "student", idx),
                dob: NaiveDate::from_ymd_opt(
                    (1998..2007).fake::<i32>(),
                    (1..13).fake::<u32>(),
                    (1..29).fake::<u32>(),
                ),
                first_name,
                last_name,
                department: random_department(),
                year: (1..5).fake::<i16>(),
            }
        })
        .collect()
}

/// Inserts academic seeds, skipping emails that already exist. Returns the number inserted.
pub async fn seed_faculty(
    store: &dyn AccountStore,
    seeds: &[FacultySeed],
    password_hash: &str,
) -> anyhow::Result<usize> {
    let start_time = Instant::now();
    println!("👩‍🏫 Seeding {} academic accounts...", seeds.len());

    let mut inserted = 0;
    for seed in seeds {
        let account = NewAccount::academic(
            seed.email.clone(),
            password_hash.to_string(),
            seed.sub_role,
            seed.name.clone(),
        )
        .with_department(Some(seed.department.clone()));

        match store.create_account(account).await {
            Ok(_) => inserted += 1,
            Err(e) if e.status.as_u16() == 409 => {}
            Err(e) => return Err(e.error),
        }
    }

    println!(
        "   ✓ Inserted {} academic accounts in {:?}",
        inserted,
        start_time.elapsed()
    );
    Ok(inserted)
}

/// Inserts student seeds with their profiles. Returns the number inserted.
pub async fn seed_students(
    store: &dyn AccountStore,
    seeds: &[StudentSeed],
    password_hash: &str,
) -> anyhow::Result<usize> {
    let start_time = Instant::now();
    println!("🎓 Seeding {} students...", seeds.len());

    let mut inserted = 0;
    for seed in seeds {
        let profile = NewStudentProfile {
            first_name: seed.first_name.clone(),
            last_name: seed.last_name.clone(),
            dob: seed.dob,
            contact: StudentContact::default(),
            department: Some(seed.department.clone()),
            year: Some(seed.year),
            avatar_url: None,
        };

        match store
            .create_student_account(
                NewAccount::student(seed.email.clone(), password_hash.to_string()),
                profile,
            )
            .await
        {
            Ok(_) => inserted += 1,
            Err(e) if e.status.as_u16() == 409 => {}
            Err(e) => return Err(e.error),
        }
    }

    println!(
        "   ✓ Inserted {} students in {:?}",
        inserted,
        start_time.elapsed()
    );
    Ok(inserted)
}
