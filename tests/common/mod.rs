use camp_rs::camps::Camp;
use camp_rs::entities::user;
use camp_rs::profile::{NewProfile, ProfileService};
use camp_rs::registration::Submission;
use camp_rs::storage::StorageClient;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, ConnectOptions, Database, DatabaseConnection};

pub async fn setup() -> DatabaseConnection {
    // A single connection keeps every query on the same in-memory database.
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1);
    let db = Database::connect(options).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

pub fn storage() -> StorageClient {
    StorageClient::new("http://localhost:54321/storage/v1", "test-key")
}

pub async fn seed_user(db: &DatabaseConnection, sub: &str) -> i32 {
    let now = chrono::Utc::now().naive_utc();
    let row = user::ActiveModel {
        google_sub: Set(sub.to_string()),
        email: Set(Some(format!("{sub}@example.com"))),
        display_name: Set(None),
        avatar_url: Set(None),
        access_token: Set("token".to_string()),
        refresh_token: Set(None),
        token_expires_at: Set(now),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    row.insert(db).await.unwrap().id
}

pub fn sample_profile() -> NewProfile {
    NewProfile {
        first_name: "Ariya".to_string(),
        last_name: "Srisuk".to_string(),
        nickname: "Moss".to_string(),
        birth_date: "2008-03-14".to_string(),
        gender: "female".to_string(),
        strengths: "public speaking".to_string(),
        past_activities: "school radio club".to_string(),
        email: "moss@example.com".to_string(),
    }
}

/// A user with a completed profile, ready to register for camps.
pub async fn seed_camper(db: &DatabaseConnection, sub: &str) -> i32 {
    let id = seed_user(db, sub).await;
    let profiles = ProfileService::new(db.clone(), storage());
    profiles.create(id, sample_profile(), None).await.unwrap();
    id
}

pub fn sample_submission(camp: &Camp) -> Submission {
    Submission {
        first_name: "Ariya".to_string(),
        last_name: "Srisuk".to_string(),
        nickname: "Moss".to_string(),
        gender: "female".to_string(),
        birth_date: "2008-03-14".to_string(),
        email: Some("moss@example.com".to_string()),
        answers: camp
            .questions
            .iter()
            .enumerate()
            .map(|(index, _)| format!("answer {}", index + 1))
            .collect(),
    }
}
