//! Student record API handlers.
//!
//! ```text
//! GET    /students
//! GET    /students/{id}
//! POST   /students        {"id":1,"firstName":"John","lastName":"Doe","age":22}
//! PUT    /students/{id}   {"id":1,"firstName":"John","lastName":"Doe","age":23}
//! DELETE /students/{id}
//! ```
//!
//! Handlers only translate between HTTP and the student ports; status codes
//! for failures come from the domain error code.

use actix_web::http::header;
use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::domain::{Student, StudentId};
use crate::inbound::http::schemas::{ErrorSchema, StudentSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{ApiResult, json_error_handler, path_error_handler};

/// Register the student handlers and their extractor error handlers.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use students_backend::inbound::http::students::configure;
///
/// let app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .service(list_students)
        .service(get_student)
        .service(create_student)
        .service(update_student)
        .service(delete_student);
}

fn location_of(id: StudentId) -> String {
    format!("/students/{id}")
}

/// List every stored student ordered by id.
#[utoipa::path(
    get,
    path = "/students",
    responses(
        (status = 200, description = "Stored students", body = [StudentSchema]),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "listStudents"
)]
#[get("/students")]
pub async fn list_students(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Student>>> {
    let students = state.students.list_students().await?;
    Ok(web::Json(students))
}

/// Fetch one student.
#[utoipa::path(
    get,
    path = "/students/{id}",
    params(("id" = i32, Path, description = "Student identifier")),
    responses(
        (status = 200, description = "Student", body = StudentSchema),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 404, description = "Unknown id", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "getStudent"
)]
#[get("/students/{id}")]
pub async fn get_student(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<Student>> {
    let id = StudentId::new(path.into_inner());
    let student = state.students.fetch_student(id).await?;
    Ok(web::Json(student))
}

/// Create a student with a caller-supplied id.
///
/// Responds `201 Created` with the stored record and a `Location` header.
#[utoipa::path(
    post,
    path = "/students",
    request_body = StudentSchema,
    responses(
        (status = 201, description = "Student created", body = StudentSchema,
            headers(("Location" = String, description = "Path of the new record"))),
        (status = 400, description = "Invalid fields or malformed body", body = ErrorSchema),
        (status = 409, description = "Id already taken", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "createStudent"
)]
#[post("/students")]
pub async fn create_student(
    state: web::Data<HttpState>,
    payload: web::Json<Student>,
) -> ApiResult<HttpResponse> {
    let created = state
        .students_command
        .create_student(payload.into_inner())
        .await?;
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, location_of(created.id)))
        .json(created))
}

/// Replace a student.
///
/// The body id must equal the path id.
#[utoipa::path(
    put,
    path = "/students/{id}",
    params(("id" = i32, Path, description = "Student identifier")),
    request_body = StudentSchema,
    responses(
        (status = 204, description = "Student replaced"),
        (status = 400, description = "Id mismatch or malformed body", body = ErrorSchema),
        (status = 404, description = "Unknown id", body = ErrorSchema),
        (status = 409, description = "Concurrent modification", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "updateStudent"
)]
#[put("/students/{id}")]
pub async fn update_student(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<Student>,
) -> ApiResult<HttpResponse> {
    let id = StudentId::new(path.into_inner());
    state
        .students_command
        .update_student(id, payload.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Delete a student.
#[utoipa::path(
    delete,
    path = "/students/{id}",
    params(("id" = i32, Path, description = "Student identifier")),
    responses(
        (status = 204, description = "Student deleted"),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 404, description = "Unknown id", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "deleteStudent"
)]
#[delete("/students/{id}")]
pub async fn delete_student(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let id = StudentId::new(path.into_inner());
    state.students_command.delete_student(id).await?;
    Ok(HttpResponse::NoContent().finish())
}
