use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct AddressDoc { pub city: String, pub country: String }

/// Full student record. All fields are required on create.
#[derive(ToSchema)]
pub struct StudentDoc { pub name: String, pub age: i64, pub address: AddressDoc }

/// Partial update; only the fields sent are written.
#[derive(ToSchema)]
pub struct StudentPatchDoc {
    pub name: Option<String>,
    pub age: Option<i64>,
    pub address: Option<AddressDoc>,
}

#[derive(ToSchema)]
pub struct SimplifiedStudentDoc { pub name: String, pub age: i64 }

#[derive(ToSchema)]
pub struct StudentListDoc { pub data: Vec<SimplifiedStudentDoc> }

#[derive(ToSchema)]
pub struct CreatedIdDoc { pub id: String }

#[derive(ToSchema)]
pub struct ErrorDoc { pub error: String, pub detail: Option<String> }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::students::create,
        crate::routes::students::list,
        crate::routes::students::get,
        crate::routes::students::update,
        crate::routes::students::delete,
    ),
    components(
        schemas(
            HealthResponse,
            AddressDoc,
            StudentDoc,
            StudentPatchDoc,
            SimplifiedStudentDoc,
            StudentListDoc,
            CreatedIdDoc,
            ErrorDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "students")
    )
)]
pub struct ApiDoc;
