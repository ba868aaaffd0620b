//! Tests for the student service.

use std::sync::Arc;

use rstest::{fixture, rstest};

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::MockStudentRepository;

#[fixture]
fn john() -> Student {
    Student::new(StudentId::new(1), "John", "Doe", 22)
}

fn make_service(repo: MockStudentRepository) -> StudentService<MockStudentRepository> {
    StudentService::new(Arc::new(repo))
}

fn detail_code(error: &Error) -> Option<&str> {
    error
        .details()
        .and_then(|details| details.get("code"))
        .and_then(|code| code.as_str())
}

#[rstest]
#[tokio::test]
async fn list_delegates_to_repository(john: Student) {
    let mut repo = MockStudentRepository::new();
    let stored = vec![john.clone()];
    repo.expect_list_all()
        .times(1)
        .return_once(move || Ok(stored));

    let students = make_service(repo).list_students().await.expect("list");
    assert_eq!(students, vec![john]);
}

#[rstest]
#[tokio::test]
async fn fetch_maps_absence_to_not_found() {
    let mut repo = MockStudentRepository::new();
    repo.expect_find_by_id()
        .withf(|id| *id == StudentId::new(7))
        .times(1)
        .return_once(|_| Ok(None));

    let error = make_service(repo)
        .fetch_student(StudentId::new(7))
        .await
        .expect_err("missing");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn create_persists_valid_student(john: Student) {
    let mut repo = MockStudentRepository::new();
    let expected = john.clone();
    repo.expect_add()
        .withf(move |student| *student == expected)
        .times(1)
        .return_once(|_| Ok(()));

    let created = make_service(repo)
        .create_student(john.clone())
        .await
        .expect("create succeeds");
    assert_eq!(created, john);
}

#[rstest]
#[case::empty_first_name("", "Doe", 22, "firstName")]
#[case::empty_last_name("John", "", 22, "lastName")]
#[case::negative_age("John", "Doe", -1, "age")]
#[tokio::test]
async fn create_rejects_invalid_fields_without_touching_store(
    #[case] first_name: &str,
    #[case] last_name: &str,
    #[case] age: i32,
    #[case] field: &str,
) {
    let mut repo = MockStudentRepository::new();
    repo.expect_add().times(0);

    let student = Student::new(StudentId::new(3), first_name, last_name, age);
    let error = make_service(repo)
        .create_student(student)
        .await
        .expect_err("validation fails");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    let reported = error
        .details()
        .and_then(|details| details.get("field"))
        .and_then(|value| value.as_str());
    assert_eq!(reported, Some(field));
}

#[rstest]
#[tokio::test]
async fn create_surfaces_duplicate_id_as_conflict(john: Student) {
    let mut repo = MockStudentRepository::new();
    repo.expect_add()
        .times(1)
        .return_once(|student| Err(StudentRepositoryError::duplicate_id(student.id)));

    let error = make_service(repo)
        .create_student(john)
        .await
        .expect_err("duplicate");
    assert_eq!(error.code(), ErrorCode::Conflict);
    assert_eq!(detail_code(&error), Some("duplicate_id"));
}

#[rstest]
#[tokio::test]
async fn connection_failures_map_to_service_unavailable(john: Student) {
    let mut repo = MockStudentRepository::new();
    repo.expect_add()
        .times(1)
        .return_once(|_| Err(StudentRepositoryError::connection("refused")));

    let error = make_service(repo)
        .create_student(john)
        .await
        .expect_err("unavailable");
    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}

#[rstest]
#[tokio::test]
async fn query_failures_map_to_internal_error() {
    let mut repo = MockStudentRepository::new();
    repo.expect_list_all()
        .times(1)
        .return_once(|| Err(StudentRepositoryError::query("syntax")));

    let error = make_service(repo)
        .list_students()
        .await
        .expect_err("query failure");
    assert_eq!(error.code(), ErrorCode::InternalError);
}

#[rstest]
#[case::other_id(2)]
#[case::negative_id(-1)]
#[tokio::test]
async fn update_rejects_id_mismatch_before_store_access(#[case] path_id: i32, john: Student) {
    let mut repo = MockStudentRepository::new();
    repo.expect_update().times(0);
    repo.expect_exists().times(0);

    let error = make_service(repo)
        .update_student(StudentId::new(path_id), john)
        .await
        .expect_err("mismatch");
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.message(), "path id does not match body id");
    assert_eq!(detail_code(&error), Some("id_mismatch"));
}

#[rstest]
#[tokio::test]
async fn update_replaces_record(john: Student) {
    let replacement = Student::new(john.id, "Gob", "Smacker", 12);
    let expected = replacement.clone();
    let mut repo = MockStudentRepository::new();
    repo.expect_update()
        .withf(move |student| *student == expected)
        .times(1)
        .return_once(|_| Ok(UpdateOutcome::Updated));
    repo.expect_exists().times(0);

    make_service(repo)
        .update_student(john.id, replacement)
        .await
        .expect("update succeeds");
}

#[rstest]
#[tokio::test]
async fn update_is_permissive_about_fields_by_default(john: Student) {
    let replacement = Student::new(john.id, "", "", -5);
    let mut repo = MockStudentRepository::new();
    repo.expect_update()
        .times(1)
        .return_once(|_| Ok(UpdateOutcome::Updated));

    make_service(repo)
        .update_student(john.id, replacement)
        .await
        .expect("permissive update accepts invalid fields");
}

#[rstest]
#[tokio::test]
async fn strict_update_validates_fields(john: Student) {
    let replacement = Student::new(john.id, "Gob", "Smacker", -5);
    let mut repo = MockStudentRepository::new();
    repo.expect_update().times(0);

    let error = make_service(repo)
        .with_update_validation(UpdateValidation::Strict)
        .update_student(john.id, replacement)
        .await
        .expect_err("strict update rejects negative age");
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn update_of_missing_record_rechecks_once_and_reports_not_found(john: Student) {
    let mut repo = MockStudentRepository::new();
    repo.expect_update()
        .times(1)
        .return_once(|_| Ok(UpdateOutcome::NotFound));
    repo.expect_exists()
        .withf(|id| *id == StudentId::new(1))
        .times(1)
        .return_once(|_| Ok(false));

    let error = make_service(repo)
        .update_student(john.id, john)
        .await
        .expect_err("missing");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn update_reports_conflict_when_record_reappears(john: Student) {
    let mut repo = MockStudentRepository::new();
    repo.expect_update()
        .times(1)
        .return_once(|_| Ok(UpdateOutcome::NotFound));
    repo.expect_exists().times(1).return_once(|_| Ok(true));

    let error = make_service(repo)
        .update_student(john.id, john)
        .await
        .expect_err("resurrected record");
    assert_eq!(error.code(), ErrorCode::Conflict);
    assert_eq!(detail_code(&error), Some("concurrent_update"));
}

#[rstest]
#[tokio::test]
async fn update_conflict_outcome_is_not_retried(john: Student) {
    let mut repo = MockStudentRepository::new();
    repo.expect_update()
        .times(1)
        .return_once(|_| Ok(UpdateOutcome::Conflict));
    repo.expect_exists().times(0);

    let error = make_service(repo)
        .update_student(john.id, john)
        .await
        .expect_err("conflict");
    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[rstest]
#[tokio::test]
async fn update_recheck_failure_propagates(john: Student) {
    let mut repo = MockStudentRepository::new();
    repo.expect_update()
        .times(1)
        .return_once(|_| Ok(UpdateOutcome::NotFound));
    repo.expect_exists()
        .times(1)
        .return_once(|_| Err(StudentRepositoryError::connection("gone")));

    let error = make_service(repo)
        .update_student(john.id, john)
        .await
        .expect_err("existence check failed");
    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}

#[rstest]
#[tokio::test]
async fn delete_removes_existing_record() {
    let mut repo = MockStudentRepository::new();
    repo.expect_exists().times(1).return_once(|_| Ok(true));
    repo.expect_remove()
        .withf(|id| *id == StudentId::new(1))
        .times(1)
        .return_once(|_| Ok(RemoveOutcome::Removed));

    make_service(repo)
        .delete_student(StudentId::new(1))
        .await
        .expect("delete succeeds");
}

#[rstest]
#[tokio::test]
async fn delete_of_missing_record_skips_remove() {
    let mut repo = MockStudentRepository::new();
    repo.expect_exists().times(1).return_once(|_| Ok(false));
    repo.expect_remove().times(0);

    let error = make_service(repo)
        .delete_student(StudentId::new(4))
        .await
        .expect_err("missing");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn delete_reports_not_found_when_record_vanishes_before_remove() {
    let mut repo = MockStudentRepository::new();
    repo.expect_exists().times(1).return_once(|_| Ok(true));
    repo.expect_remove()
        .times(1)
        .return_once(|_| Ok(RemoveOutcome::NotFound));

    let error = make_service(repo)
        .delete_student(StudentId::new(4))
        .await
        .expect_err("lost race");
    assert_eq!(error.code(), ErrorCode::NotFound);
}
