use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

/// Failure that aborts a request before the listing can be rendered.
#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for AppError {}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self(err)
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self(anyhow::Error::new(err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request aborted");
        let body = crate::templates::error_page(&self.to_string());
        (StatusCode::SERVICE_UNAVAILABLE, Html(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// Store failure of a single catalog operation. Handlers downgrade these to
/// an error banner instead of failing the request.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to count movies: {0}")]
    Count(#[source] sea_orm::DbErr),
    #[error("failed to list movies: {0}")]
    List(#[source] sea_orm::DbErr),
    #[error("failed to load movie details: {0}")]
    Fetch(#[source] sea_orm::DbErr),
    #[error("failed to delete movies: {0}")]
    Delete(#[source] sea_orm::DbErr),
    #[error("failed to delete all movies: {0}")]
    DeleteAll(#[source] sea_orm::DbErr),
    #[error("failed to randomize movie stats: {0}")]
    Randomize(#[source] sea_orm::DbErr),
}
