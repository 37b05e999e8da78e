use std::sync::Arc;

use crate::{
    domain::{
        repositories::user_repository::UserRepository,
        services::{id_service::IdGenerator, mail_service::MailProvider},
    },
    usecase::create_user_usecase::{CreateUserRequest, CreateUserUsecase},
};
use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post};
use serde::{Deserialize, Serialize};

// Response

/// json returned when account creation fails
#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

/* Router Function and Handler Function */

/// function return Router object
/// Suppose to be nested by main router
pub fn create_user_router<
    R: UserRepository + Send + Sync + 'static,
    M: MailProvider + Send + Sync + 'static,
    G: IdGenerator + 'static,
>(
    create_user_service: CreateUserUsecase<R, M, G>,
) -> Router {
    let state = AppState {
        create_user_service: Arc::new(create_user_service),
    };

    Router::new()
        .route("/users", post(create_user::<R, M, G>))
        .with_state(state)
}

pub struct AppState<R: UserRepository, M: MailProvider, G: IdGenerator> {
    pub create_user_service: Arc<CreateUserUsecase<R, M, G>>,
}

// derive(Clone) would require the collaborators themselves to be Clone
impl<R: UserRepository, M: MailProvider, G: IdGenerator> Clone for AppState<R, M, G> {
    fn clone(&self) -> Self {
        Self {
            create_user_service: Arc::clone(&self.create_user_service),
        }
    }
}

/// handler function for account creation
async fn create_user<
    R: UserRepository + Send + Sync,
    M: MailProvider + Send + Sync,
    G: IdGenerator,
>(
    State(state): State<AppState<R, M, G>>,
    Json(payload): Json<CreateUserRequest>,
) -> impl IntoResponse {
    match state.create_user_service.execute(payload).await {
        Ok(()) => StatusCode::CREATED.into_response(),
        Err(e) => {
            tracing::debug!(error = %e, "account creation rejected");
            let response = ErrorResponse {
                message: e.to_string(),
            };
            (StatusCode::BAD_REQUEST, Json(response)).into_response()
        }
    }
}
