use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct CredentialsDoc { pub email: String, pub password: String }

#[derive(ToSchema)]
pub struct RefreshRequestDoc { pub refresh_token: String }

#[derive(ToSchema)]
pub struct CropBodyDoc {
    pub name: String,
    pub description: Option<String>,
    pub img: Option<String>,
    pub status: Option<String>,
    pub author: Option<i64>,
}

#[derive(ToSchema)]
pub struct CropUpdateDoc {
    pub name: Option<String>,
    pub description: Option<String>,
    pub img: Option<String>,
    pub status: Option<String>,
}

#[derive(ToSchema)]
pub struct CategoryBodyDoc {
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub status: Option<String>,
    pub author: Option<i64>,
    pub crop_id: Option<i32>,
}

#[derive(ToSchema)]
pub struct CategoryUpdateDoc {
    pub name: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub status: Option<String>,
}

#[derive(ToSchema)]
pub struct CreateArticleInputDoc {
    pub crop_id: i32,
    pub category_id: i32,
    pub title: String,
    pub latin_name: Option<String>,
    pub text: Option<String>,
    pub images: Vec<String>,
    pub status: Option<String>,
    pub author: Option<i64>,
}

#[derive(ToSchema)]
pub struct ArticleUpdateDoc {
    pub title: Option<String>,
    pub latin_name: Option<String>,
    pub text: Option<String>,
    pub status: Option<String>,
    /// Replaces the whole image set when present.
    pub images: Option<Vec<String>>,
}

#[derive(ToSchema)]
pub struct UserPatchDoc {
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
    pub role: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::auth::refresh,
        crate::routes::crops::create,
        crate::routes::crops::list,
        crate::routes::crops::get,
        crate::routes::crops::update,
        crate::routes::crops::delete,
        crate::routes::crops::link_category,
        crate::routes::crops::unlink_category,
        crate::routes::categories::create,
        crate::routes::categories::list,
        crate::routes::categories::get,
        crate::routes::categories::update,
        crate::routes::categories::delete,
        crate::routes::articles::create,
        crate::routes::articles::list,
        crate::routes::articles::get,
        crate::routes::articles::update,
        crate::routes::articles::delete,
        crate::routes::users::get,
        crate::routes::users::update,
    ),
    components(
        schemas(
            HealthResponse,
            CredentialsDoc,
            RefreshRequestDoc,
            CropBodyDoc,
            CropUpdateDoc,
            CategoryBodyDoc,
            CategoryUpdateDoc,
            CreateArticleInputDoc,
            ArticleUpdateDoc,
            UserPatchDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "crops"),
        (name = "categories"),
        (name = "articles"),
        (name = "users")
    )
)]
pub struct ApiDoc;
