use std::env;

use async_trait::async_trait;
use sqlx::SqlitePool;
use time::OffsetDateTime;
use ulid::Ulid;

use crate::app::db::{self, folders::Folder, scripts::Script, store::StoreError};
use crate::app::domain::{TestEnvironment, TestType};
use crate::app::seeds::{Seed, SeedOutcome};

/// Seeds a small demo script library (folders plus sample scripts) so a
/// fresh install has something to import. Opt-in via SEED_DEMO_DATA=1.
pub struct DemoLibrary;

fn sample_script(
    label: &str,
    description: &str,
    folder_id: &str,
    environment: TestEnvironment,
    test_type: TestType,
    details: &str,
) -> Script {
    let now = OffsetDateTime::now_utc();
    Script {
        id: Ulid::new().to_string(),
        script_id: label.to_string(),
        short_description: description.to_string(),
        folder_id: folder_id.to_string(),
        test_environment: environment,
        test_type,
        purpose: String::new(),
        assumptions: vec!["Test user account exists".to_string()],
        expected_results: String::new(),
        script_details: details.to_string(),
        screenshots: Vec::new(),
        created_at: now,
        updated_at: now,
    }
}

#[async_trait]
impl Seed for DemoLibrary {
    fn version(&self) -> i64 {
        20260301120000
    }

    fn description(&self) -> &str {
        "demo_library"
    }

    async fn run(&self, pool: &SqlitePool) -> Result<SeedOutcome, StoreError> {
        match env::var("SEED_DEMO_DATA") {
            Ok(v) if v == "1" => {}
            _ => return Ok(SeedOutcome::Skipped),
        }

        // Never layer demo data over an existing library.
        if !db::scripts::get_all(pool).await?.is_empty() {
            return Ok(SeedOutcome::Skipped);
        }

        let mut conn = pool.acquire().await?;

        let login = Folder {
            id: Ulid::new().to_string(),
            name: "Login".to_string(),
            parent_id: None,
            icon: Some("folder".to_string()),
        };
        let payments = Folder {
            id: Ulid::new().to_string(),
            name: "Payments".to_string(),
            parent_id: None,
            icon: Some("folder".to_string()),
        };
        let batch = Folder {
            id: Ulid::new().to_string(),
            name: "Batch Settlement".to_string(),
            parent_id: Some(payments.id.clone()),
            icon: Some("folder".to_string()),
        };
        db::folders::insert(&mut conn, &login).await?;
        db::folders::insert(&mut conn, &payments).await?;
        db::folders::insert(&mut conn, &batch).await?;

        let scripts = [
            sample_script(
                "S-100",
                "Successful login with valid credentials",
                &login.id,
                TestEnvironment::Online,
                TestType::Positive,
                "1. Open the login page\n2. Enter valid credentials\n3. Submit",
            ),
            sample_script(
                "S-101",
                "Login rejected with wrong password",
                &login.id,
                TestEnvironment::Online,
                TestType::Negative,
                "1. Open the login page\n2. Enter a wrong password\n3. Submit",
            ),
            sample_script(
                "S-200",
                "Overnight settlement batch posts all captured payments",
                &batch.id,
                TestEnvironment::OnlineAndBatch,
                TestType::Positive,
                "1. Capture a payment online\n2. Run the settlement batch\n3. Verify posting",
            ),
        ];
        for script in &scripts {
            db::scripts::insert(&mut conn, script).await?;
        }

        Ok(SeedOutcome::Applied)
    }
}
