use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait, SqlErr};
use uuid::Uuid;

use crate::entities::camper::{self, Entity as Camper};
use crate::error::AppError;
use crate::storage::StorageClient;
use crate::validate;

const PHOTO_BUCKET: &str = "camper";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileState {
    Missing,
    Present,
}

/// Raw profile-form fields, validated on create.
#[derive(Debug, Clone)]
pub struct NewProfile {
    pub first_name: String,
    pub last_name: String,
    pub nickname: String,
    pub birth_date: String,
    pub gender: String,
    pub strengths: String,
    pub past_activities: String,
    pub email: String,
}

#[derive(Debug, Clone)]
pub struct Photo {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Gate in front of the camper-facing pages: every authenticated identity
/// must hold exactly one profile before registering for anything.
#[derive(Debug, Clone)]
pub struct ProfileService {
    db: DatabaseConnection,
    storage: StorageClient,
}

impl ProfileService {
    pub fn new(db: DatabaseConnection, storage: StorageClient) -> Self {
        Self { db, storage }
    }

    /// Pure read, evaluated on each protected-page entry.
    pub async fn ensure(&self, camper_id: i32) -> Result<ProfileState, AppError> {
        Ok(match self.get(camper_id).await? {
            Some(_) => ProfileState::Present,
            None => ProfileState::Missing,
        })
    }

    pub async fn get(&self, camper_id: i32) -> Result<Option<camper::Model>, AppError> {
        Ok(Camper::find_by_id(camper_id).one(&self.db).await?)
    }

    /// Uploads the photo first when one is given, then inserts the profile
    /// row referencing its public URL. A failed insert after a successful
    /// upload orphans the object; cleanup is out of scope.
    pub async fn create(
        &self,
        camper_id: i32,
        profile: NewProfile,
        photo: Option<Photo>,
    ) -> Result<(), AppError> {
        if self.get(camper_id).await?.is_some() {
            return Err(AppError::ProfileAlreadyExists);
        }

        validate::required("first_name", &profile.first_name)?;
        validate::required("last_name", &profile.last_name)?;
        validate::required("nickname", &profile.nickname)?;
        let gender = validate::gender("gender", &profile.gender)?;
        let birth_date = validate::date("birth_date", &profile.birth_date)?;
        let email = validate::email("email", &profile.email)?;

        let profile_url = match photo {
            Some(photo) => {
                let extension = photo
                    .file_name
                    .rsplit_once('.')
                    .map(|(_, ext)| ext)
                    .unwrap_or("bin");
                let key = format!("{camper_id}-{}.{extension}", Uuid::new_v4());
                self.storage
                    .upload(PHOTO_BUCKET, &key, photo.bytes, &photo.content_type)
                    .await?;
                Some(self.storage.public_url(PHOTO_BUCKET, &key))
            }
            None => None,
        };

        let now = Utc::now().naive_utc();
        let row = camper::ActiveModel {
            id: Set(camper_id),
            first_name: Set(profile.first_name),
            last_name: Set(profile.last_name),
            nickname: Set(profile.nickname),
            birth_date: Set(birth_date),
            gender: Set(gender),
            strengths: Set(profile.strengths),
            past_activities: Set(profile.past_activities),
            profile_url: Set(profile_url),
            email: Set(email),
            created_at: Set(now),
            updated_at: Set(now),
        };

        match row.insert(&self.db).await {
            Ok(_) => Ok(()),
            // A racing creation loses to the primary key, not to the probe.
            Err(err) => match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => Err(AppError::ProfileAlreadyExists),
                _ => Err(err.into()),
            },
        }
    }
}
