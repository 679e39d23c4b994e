use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QueryTrait, SqlErr,
};
use serde::Serialize;
use uuid::Uuid;

use crate::camps::Camp;
use crate::entities::camp_registration::{self, Entity as CampRegistration};
use crate::entities::sea_orm_active_enums::RegistrationStatus;
use crate::error::AppError;
use crate::validate;

/// Raw form fields for a registration, validated on submit.
#[derive(Debug, Clone)]
pub struct Submission {
    pub first_name: String,
    pub last_name: String,
    pub nickname: String,
    pub gender: String,
    pub birth_date: String,
    pub email: Option<String>,
    pub answers: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ApplicationFilter {
    pub camp_slug: Option<String>,
    pub status: Option<RegistrationStatus>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApplicationStats {
    pub total: u64,
    pub pending: u64,
    pub approved: u64,
    pub declined: u64,
}

/// Owns the registration lifecycle: creation under the one-registration-per-
/// camper-per-camp invariant, the camper and staff read views, and the review
/// mutations. Status moves freely between pending, approve, and decline so
/// staff can correct mistakes; nothing is ever deleted.
#[derive(Debug, Clone)]
pub struct RegistrationService {
    db: DatabaseConnection,
}

impl RegistrationService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Validates the submission against the camp's catalog entry and inserts
    /// a pending registration. The unique index on (camper_id, camp_slug) is
    /// the duplicate guard: a violation on insert means the camper already
    /// holds a registration for this camp, racing writers included.
    pub async fn submit(
        &self,
        camper_id: i32,
        camp: &Camp,
        submission: Submission,
    ) -> Result<Uuid, AppError> {
        validate::required("first_name", &submission.first_name)?;
        validate::required("last_name", &submission.last_name)?;
        validate::required("nickname", &submission.nickname)?;
        let gender = validate::gender("gender", &submission.gender)?;
        let birth_date = validate::date("birth_date", &submission.birth_date)?;

        let email = if camp.requires_email {
            Some(validate::email(
                "email",
                submission.email.as_deref().unwrap_or_default(),
            )?)
        } else {
            match submission.email.filter(|value| !value.trim().is_empty()) {
                Some(value) => Some(validate::email("email", &value)?),
                None => None,
            }
        };

        if submission.answers.len() != camp.questions.len() {
            return Err(AppError::Validation("answers".to_string()));
        }
        for (index, answer) in submission.answers.iter().enumerate() {
            validate::required(&format!("question{}", index + 1), answer)?;
        }

        let now = Utc::now().naive_utc();
        let row = camp_registration::ActiveModel {
            id: Set(Uuid::new_v4()),
            camper_id: Set(camper_id),
            camp_slug: Set(camp.slug.to_string()),
            first_name: Set(submission.first_name),
            last_name: Set(submission.last_name),
            nickname: Set(submission.nickname),
            gender: Set(gender),
            birth_date: Set(birth_date),
            email: Set(email),
            answers: Set(serde_json::Value::from(submission.answers)),
            status: Set(RegistrationStatus::Pending),
            comment: Set(None),
            certificate: Set(false),
            certificate_url: Set(None),
            submitted_at: Set(now),
            created_at: Set(now),
            updated_at: Set(now),
        };

        match row.insert(&self.db).await {
            Ok(model) => Ok(model.id),
            Err(err) => match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => Err(AppError::AlreadyRegistered),
                _ => Err(err.into()),
            },
        }
    }

    /// The camper's most recent registration across all camps. No rows is a
    /// normal outcome, not an error.
    pub async fn my_registration(
        &self,
        camper_id: i32,
    ) -> Result<Option<camp_registration::Model>, AppError> {
        Ok(CampRegistration::find()
            .filter(camp_registration::Column::CamperId.eq(camper_id))
            .order_by_desc(camp_registration::Column::CreatedAt)
            .one(&self.db)
            .await?)
    }

    /// Whether the camper already holds a registration for one camp. Used to
    /// render the form disabled; the unique index remains the enforcement.
    pub async fn for_camp(
        &self,
        camper_id: i32,
        camp_slug: &str,
    ) -> Result<Option<camp_registration::Model>, AppError> {
        Ok(CampRegistration::find()
            .filter(camp_registration::Column::CamperId.eq(camper_id))
            .filter(camp_registration::Column::CampSlug.eq(camp_slug))
            .order_by_desc(camp_registration::Column::CreatedAt)
            .one(&self.db)
            .await?)
    }

    /// Staff view: all applications, newest submission first.
    pub async fn list(
        &self,
        filter: ApplicationFilter,
    ) -> Result<Vec<camp_registration::Model>, AppError> {
        Ok(CampRegistration::find()
            .apply_if(filter.camp_slug, |query, slug| {
                query.filter(camp_registration::Column::CampSlug.eq(slug))
            })
            .apply_if(filter.status, |query, status| {
                query.filter(camp_registration::Column::Status.eq(status))
            })
            .order_by_desc(camp_registration::Column::SubmittedAt)
            .all(&self.db)
            .await?)
    }

    pub async fn stats(&self) -> Result<ApplicationStats, AppError> {
        let total = CampRegistration::find().count(&self.db).await?;
        let pending = self.count_with_status(RegistrationStatus::Pending).await?;
        let approved = self.count_with_status(RegistrationStatus::Approve).await?;
        let declined = self.count_with_status(RegistrationStatus::Decline).await?;
        Ok(ApplicationStats {
            total,
            pending,
            approved,
            declined,
        })
    }

    async fn count_with_status(&self, status: RegistrationStatus) -> Result<u64, AppError> {
        Ok(CampRegistration::find()
            .filter(camp_registration::Column::Status.eq(status))
            .count(&self.db)
            .await?)
    }

    /// Any status may move to any other status, including back to pending.
    pub async fn set_status(&self, id: Uuid, status: RegistrationStatus) -> Result<(), AppError> {
        let mut row = self.load(id).await?.into_active_model();
        row.status = Set(status);
        row.updated_at = Set(Utc::now().naive_utc());
        row.update(&self.db).await?;
        Ok(())
    }

    /// Overwrites the staff comment; an empty string clears it.
    pub async fn set_comment(&self, id: Uuid, comment: String) -> Result<(), AppError> {
        let mut row = self.load(id).await?.into_active_model();
        row.comment = Set(Some(comment).filter(|text| !text.is_empty()));
        row.updated_at = Set(Utc::now().naive_utc());
        row.update(&self.db).await?;
        Ok(())
    }

    /// Per-applicant certificate eligibility, independent of status.
    pub async fn set_certificate(&self, id: Uuid, enabled: bool) -> Result<(), AppError> {
        let mut row = self.load(id).await?.into_active_model();
        row.certificate = Set(enabled);
        row.updated_at = Set(Utc::now().naive_utc());
        row.update(&self.db).await?;
        Ok(())
    }

    /// Flips certificate eligibility for every application at once, stamping
    /// submitted_at the way single-row review actions do not.
    pub async fn set_certificate_for_all(&self, enabled: bool) -> Result<u64, AppError> {
        let now = Utc::now().naive_utc();
        let result = CampRegistration::update_many()
            .col_expr(camp_registration::Column::Certificate, Expr::value(enabled))
            .col_expr(camp_registration::Column::SubmittedAt, Expr::value(now))
            .col_expr(camp_registration::Column::UpdatedAt, Expr::value(now))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }

    /// Overwrites certificate_url on every registration row, across every
    /// camp, clobbering any per-applicant URL, and stamps submitted_at.
    /// The unscoped blast radius is the operation's contract; a per-camp
    /// variant would be a different, deliberate API.
    pub async fn broadcast_certificate_template_globally(
        &self,
        template_url: &str,
    ) -> Result<u64, AppError> {
        let now = Utc::now().naive_utc();
        let result = CampRegistration::update_many()
            .col_expr(
                camp_registration::Column::CertificateUrl,
                Expr::value(template_url),
            )
            .col_expr(camp_registration::Column::SubmittedAt, Expr::value(now))
            .col_expr(camp_registration::Column::UpdatedAt, Expr::value(now))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }

    async fn load(&self, id: Uuid) -> Result<camp_registration::Model, AppError> {
        CampRegistration::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)
    }
}
