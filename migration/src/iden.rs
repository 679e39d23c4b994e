use sea_orm_migration::prelude::*;

// Define table names
#[derive(DeriveIden)]
pub enum User {
    Table,
    Id,
    GoogleSub,
    Email,
    DisplayName,
    AvatarUrl,
    AccessToken,
    RefreshToken,
    TokenExpiresAt,
}

#[derive(DeriveIden)]
pub enum Camper {
    Table,
    Id,
    FirstName,
    LastName,
    Nickname,
    BirthDate,
    Gender,
    Strengths,
    PastActivities,
    ProfileUrl,
    Email,
}

#[derive(DeriveIden)]
pub enum CampRegistration {
    Table,
    Id,
    CamperId,
    CampSlug,
    FirstName,
    LastName,
    Nickname,
    Gender,
    BirthDate,
    Email,
    Answers,
    Status,
    Comment,
    Certificate,
    CertificateUrl,
    SubmittedAt,
}
