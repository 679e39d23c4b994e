mod common;

use camp_rs::camps;
use camp_rs::entities::prelude::CampRegistration;
use camp_rs::entities::sea_orm_active_enums::RegistrationStatus;
use camp_rs::error::AppError;
use camp_rs::registration::{ApplicationFilter, RegistrationService, Submission};
use sea_orm::{EntityTrait, PaginatorTrait};
use uuid::Uuid;

use common::{sample_submission, seed_camper, setup};

#[tokio::test]
async fn submit_then_read_back_round_trip() {
    let db = setup().await;
    let camper_id = seed_camper(&db, "sub-round-trip").await;
    let service = RegistrationService::new(db.clone());
    let camp = camps::find("creative-camp-2025").unwrap();

    let id = service
        .submit(camper_id, camp, sample_submission(camp))
        .await
        .unwrap();

    let registration = service.my_registration(camper_id).await.unwrap().unwrap();
    assert_eq!(registration.id, id);
    assert_eq!(registration.camp_slug, "creative-camp-2025");
    assert_eq!(registration.first_name, "Ariya");
    assert_eq!(registration.last_name, "Srisuk");
    assert_eq!(registration.nickname, "Moss");
    assert_eq!(registration.email.as_deref(), Some("moss@example.com"));
    assert_eq!(
        registration.answers,
        serde_json::json!(["answer 1", "answer 2", "answer 3"])
    );
    assert_eq!(registration.status, RegistrationStatus::Pending);
    assert_eq!(registration.comment, None);
    assert!(!registration.certificate);
    assert_eq!(registration.certificate_url, None);
}

#[tokio::test]
async fn my_registration_is_none_without_rows() {
    let db = setup().await;
    let camper_id = seed_camper(&db, "sub-empty").await;
    let service = RegistrationService::new(db);

    assert!(service.my_registration(camper_id).await.unwrap().is_none());
}

#[tokio::test]
async fn second_submission_for_same_camp_is_rejected() {
    let db = setup().await;
    let camper_id = seed_camper(&db, "sub-duplicate").await;
    let service = RegistrationService::new(db.clone());
    let camp = camps::find("creative-camp-2025").unwrap();

    service
        .submit(camper_id, camp, sample_submission(camp))
        .await
        .unwrap();

    let err = service
        .submit(camper_id, camp, sample_submission(camp))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::AlreadyRegistered));

    // The losing writer left the store unchanged.
    let rows = CampRegistration::find().count(&db).await.unwrap();
    assert_eq!(rows, 1);
}

#[tokio::test]
async fn same_camper_may_register_for_different_camps() {
    let db = setup().await;
    let camper_id = seed_camper(&db, "sub-two-camps").await;
    let service = RegistrationService::new(db.clone());
    let creative = camps::find("creative-camp-2025").unwrap();
    let web = camps::find("web-camp-2025").unwrap();

    service
        .submit(camper_id, creative, sample_submission(creative))
        .await
        .unwrap();
    service
        .submit(camper_id, web, sample_submission(web))
        .await
        .unwrap();

    let rows = CampRegistration::find().count(&db).await.unwrap();
    assert_eq!(rows, 2);
}

#[tokio::test]
async fn malformed_email_is_rejected_without_a_write() {
    let db = setup().await;
    let camper_id = seed_camper(&db, "sub-bad-email").await;
    let service = RegistrationService::new(db.clone());
    let camp = camps::find("creative-camp-2025").unwrap();

    for bad in ["moss-example.com", "moss@example", ""] {
        let mut submission = sample_submission(camp);
        submission.email = Some(bad.to_string());
        let err = service.submit(camper_id, camp, submission).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(ref field) if field == "email"));
    }

    assert_eq!(CampRegistration::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn empty_answer_is_rejected_without_a_write() {
    let db = setup().await;
    let camper_id = seed_camper(&db, "sub-empty-answer").await;
    let service = RegistrationService::new(db.clone());
    let camp = camps::find("creative-camp-2025").unwrap();

    let mut submission = sample_submission(camp);
    submission.answers[1] = "   ".to_string();
    let err = service.submit(camper_id, camp, submission).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(ref field) if field == "question2"));

    // An answer for every catalog question, no more, no less.
    let mut submission = sample_submission(camp);
    submission.answers.pop();
    let err = service.submit(camper_id, camp, submission).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(ref field) if field == "answers"));

    assert_eq!(CampRegistration::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn email_is_optional_when_the_camp_does_not_require_it() {
    let db = setup().await;
    let camper_id = seed_camper(&db, "sub-optional-email").await;
    let service = RegistrationService::new(db.clone());
    let camp = camps::find("web-camp-2025").unwrap();

    let mut submission = sample_submission(camp);
    submission.email = None;
    service.submit(camper_id, camp, submission).await.unwrap();

    let registration = service.my_registration(camper_id).await.unwrap().unwrap();
    assert_eq!(registration.email, None);
}

#[tokio::test]
async fn status_moves_freely_between_all_states() {
    let db = setup().await;
    let camper_id = seed_camper(&db, "sub-lifecycle").await;
    let service = RegistrationService::new(db.clone());
    let camp = camps::find("creative-camp-2025").unwrap();

    let id = service
        .submit(camper_id, camp, sample_submission(camp))
        .await
        .unwrap();

    let listed = service.list(ApplicationFilter::default()).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].status, RegistrationStatus::Pending);

    service
        .set_status(id, RegistrationStatus::Approve)
        .await
        .unwrap();
    // Idempotent: approving twice observes the same state as once.
    service
        .set_status(id, RegistrationStatus::Approve)
        .await
        .unwrap();
    let listed = service.list(ApplicationFilter::default()).await.unwrap();
    assert_eq!(listed[0].status, RegistrationStatus::Approve);

    // No terminal state: an approved application can be reopened.
    service
        .set_status(id, RegistrationStatus::Pending)
        .await
        .unwrap();
    let listed = service.list(ApplicationFilter::default()).await.unwrap();
    assert_eq!(listed[0].status, RegistrationStatus::Pending);
}

#[tokio::test]
async fn mutating_an_unknown_registration_is_not_found() {
    let db = setup().await;
    let service = RegistrationService::new(db);

    let err = service
        .set_status(Uuid::new_v4(), RegistrationStatus::Approve)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound));
}

#[tokio::test]
async fn comment_is_overwritten_and_cleared() {
    let db = setup().await;
    let camper_id = seed_camper(&db, "sub-comment").await;
    let service = RegistrationService::new(db.clone());
    let camp = camps::find("creative-camp-2025").unwrap();

    let id = service
        .submit(camper_id, camp, sample_submission(camp))
        .await
        .unwrap();

    service
        .set_comment(id, "strong application".to_string())
        .await
        .unwrap();
    let registration = service.my_registration(camper_id).await.unwrap().unwrap();
    assert_eq!(registration.comment.as_deref(), Some("strong application"));

    service.set_comment(id, String::new()).await.unwrap();
    let registration = service.my_registration(camper_id).await.unwrap().unwrap();
    assert_eq!(registration.comment, None);
}

#[tokio::test]
async fn certificate_flag_toggles_independently_of_status() {
    let db = setup().await;
    let camper_id = seed_camper(&db, "sub-certificate").await;
    let service = RegistrationService::new(db.clone());
    let camp = camps::find("creative-camp-2025").unwrap();

    let id = service
        .submit(camper_id, camp, sample_submission(camp))
        .await
        .unwrap();

    service.set_certificate(id, true).await.unwrap();
    let registration = service.my_registration(camper_id).await.unwrap().unwrap();
    assert!(registration.certificate);
    assert_eq!(registration.status, RegistrationStatus::Pending);

    service.set_certificate(id, false).await.unwrap();
    let registration = service.my_registration(camper_id).await.unwrap().unwrap();
    assert!(!registration.certificate);
}

#[tokio::test]
async fn certificate_broadcast_touches_every_camp() {
    let db = setup().await;
    let camper_id = seed_camper(&db, "sub-broadcast").await;
    let service = RegistrationService::new(db.clone());
    let creative = camps::find("creative-camp-2025").unwrap();
    let web = camps::find("web-camp-2025").unwrap();

    service
        .submit(camper_id, creative, sample_submission(creative))
        .await
        .unwrap();
    service
        .submit(camper_id, web, sample_submission(web))
        .await
        .unwrap();

    let url = "https://cdn.example.com/certificates/templates/2025.png";
    let affected = service
        .broadcast_certificate_template_globally(url)
        .await
        .unwrap();
    assert_eq!(affected, 2);

    // The overwrite is unscoped: rows from both camps carry the new URL.
    let rows = CampRegistration::find().all(&db).await.unwrap();
    assert!(rows.iter().all(|row| row.certificate_url.as_deref() == Some(url)));
}

#[tokio::test]
async fn bulk_certificate_toggle_covers_all_rows() {
    let db = setup().await;
    let first = seed_camper(&db, "sub-bulk-a").await;
    let second = seed_camper(&db, "sub-bulk-b").await;
    let service = RegistrationService::new(db.clone());
    let camp = camps::find("creative-camp-2025").unwrap();

    service
        .submit(first, camp, sample_submission(camp))
        .await
        .unwrap();
    service
        .submit(second, camp, sample_submission(camp))
        .await
        .unwrap();

    let affected = service.set_certificate_for_all(true).await.unwrap();
    assert_eq!(affected, 2);
    let rows = CampRegistration::find().all(&db).await.unwrap();
    assert!(rows.iter().all(|row| row.certificate));
}

#[tokio::test]
async fn list_filters_by_camp_and_status() {
    let db = setup().await;
    let first = seed_camper(&db, "sub-filter-a").await;
    let second = seed_camper(&db, "sub-filter-b").await;
    let service = RegistrationService::new(db.clone());
    let creative = camps::find("creative-camp-2025").unwrap();
    let web = camps::find("web-camp-2025").unwrap();

    let approved = service
        .submit(first, creative, sample_submission(creative))
        .await
        .unwrap();
    service
        .submit(second, web, sample_submission(web))
        .await
        .unwrap();
    service
        .set_status(approved, RegistrationStatus::Approve)
        .await
        .unwrap();

    let creative_only = service
        .list(ApplicationFilter {
            camp_slug: Some("creative-camp-2025".to_string()),
            status: None,
        })
        .await
        .unwrap();
    assert_eq!(creative_only.len(), 1);
    assert_eq!(creative_only[0].camp_slug, "creative-camp-2025");

    let pending_only = service
        .list(ApplicationFilter {
            camp_slug: None,
            status: Some(RegistrationStatus::Pending),
        })
        .await
        .unwrap();
    assert_eq!(pending_only.len(), 1);
    assert_eq!(pending_only[0].camp_slug, "web-camp-2025");
}

#[tokio::test]
async fn stats_aggregate_by_status() {
    let db = setup().await;
    let first = seed_camper(&db, "sub-stats-a").await;
    let second = seed_camper(&db, "sub-stats-b").await;
    let third = seed_camper(&db, "sub-stats-c").await;
    let service = RegistrationService::new(db.clone());
    let camp = camps::find("creative-camp-2025").unwrap();

    let a = service
        .submit(first, camp, sample_submission(camp))
        .await
        .unwrap();
    let b = service
        .submit(second, camp, sample_submission(camp))
        .await
        .unwrap();
    service
        .submit(third, camp, sample_submission(camp))
        .await
        .unwrap();

    service.set_status(a, RegistrationStatus::Approve).await.unwrap();
    service.set_status(b, RegistrationStatus::Decline).await.unwrap();

    let stats = service.stats().await.unwrap();
    assert_eq!(stats.total, 3);
    assert_eq!(stats.pending, 1);
    assert_eq!(stats.approved, 1);
    assert_eq!(stats.declined, 1);
}

#[tokio::test]
async fn submission_answers_generalize_to_the_camp_question_count() {
    let db = setup().await;
    let camper_id = seed_camper(&db, "sub-two-answers").await;
    let service = RegistrationService::new(db.clone());
    let camp = camps::find("web-camp-2025").unwrap();
    assert_eq!(camp.questions.len(), 2);

    let submission = Submission {
        answers: vec!["a personal site".to_string(), "a blog engine".to_string()],
        ..sample_submission(camp)
    };
    service.submit(camper_id, camp, submission).await.unwrap();

    let registration = service.my_registration(camper_id).await.unwrap().unwrap();
    assert_eq!(
        registration.answers,
        serde_json::json!(["a personal site", "a blog engine"])
    );
}
