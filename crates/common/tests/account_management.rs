//! Account administration as the portal drives it: bootstrap an
//! admin, enroll students, authenticate, revoke.

use common::identity::memory::MemoryUserProvider;
use common::prelude::*;

fn service() -> IdentityService<MemoryUserProvider> {
    IdentityService::new(MemoryUserProvider::new())
}

#[tokio::test]
async fn test_enrollment_and_login() {
    let identity = service();

    identity
        .create_user("dean@campus.edu", "s3cret", "Dean", Role::Admin)
        .await
        .unwrap();
    identity
        .create_user("sam@campus.edu", "passw0rd", "Sam", Role::Student)
        .await
        .unwrap();

    let session = identity
        .authenticate("sam@campus.edu", "passw0rd")
        .await
        .unwrap();
    assert_eq!(session.email, "sam@campus.edu");
    assert_eq!(session.role, Role::Student);

    // Role listings keep admins and students apart.
    let students = identity.students().await.unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0].email, "sam@campus.edu");
    let faculty = identity.faculty().await.unwrap();
    assert_eq!(faculty.len(), 1);
    assert_eq!(faculty[0].email, "dean@campus.edu");
}

#[tokio::test]
async fn test_bad_credentials_are_indistinguishable() {
    let identity = service();

    identity
        .create_user("sam@campus.edu", "passw0rd", "Sam", Role::Student)
        .await
        .unwrap();

    let wrong_password = identity
        .authenticate("sam@campus.edu", "nope")
        .await
        .unwrap_err();
    let unknown_email = identity
        .authenticate("ghost@campus.edu", "passw0rd")
        .await
        .unwrap_err();

    assert!(matches!(wrong_password, IdentityError::InvalidCredentials));
    assert!(matches!(unknown_email, IdentityError::InvalidCredentials));
    assert_eq!(wrong_password.to_string(), unknown_email.to_string());
}

#[tokio::test]
async fn test_revoked_account_cannot_log_in() {
    let identity = service();

    identity
        .create_user("sam@campus.edu", "passw0rd", "Sam", Role::Student)
        .await
        .unwrap();
    identity.delete_user("sam@campus.edu").await.unwrap();

    let err = identity
        .authenticate("sam@campus.edu", "passw0rd")
        .await
        .unwrap_err();
    assert!(matches!(err, IdentityError::InvalidCredentials));

    let err = identity.delete_user("sam@campus.edu").await.unwrap_err();
    assert!(matches!(err, IdentityError::NotFound));
}

#[tokio::test]
async fn test_duplicate_email_rejected() {
    let identity = service();

    identity
        .create_user("sam@campus.edu", "passw0rd", "Sam", Role::Student)
        .await
        .unwrap();
    let err = identity
        .create_user("sam@campus.edu", "other", "Impostor", Role::Admin)
        .await
        .unwrap_err();
    assert!(matches!(err, IdentityError::DuplicateEmail));
}
