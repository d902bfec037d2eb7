//! Status type API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::status_type::{
        ActionStatusType, ClientStatusType, CreateActionStatusType, CreateClientStatusType,
    },
};

/// List all client status types
#[utoipa::path(
    get,
    path = "/client-status-types",
    tag = "status-types",
    responses(
        (status = 200, description = "Client status types list", body = Vec<ClientStatusType>)
    )
)]
pub async fn list_client_status_types(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<ClientStatusType>>> {
    let status_types = state.repository.client_status_types.list().await?;
    Ok(Json(status_types))
}

/// Get a client status type by ID
#[utoipa::path(
    get,
    path = "/client-status-types/{id}",
    tag = "status-types",
    params(("id" = Uuid, Path, description = "Status type ID")),
    responses(
        (status = 200, description = "Status type details", body = ClientStatusType),
        (status = 404, description = "Status type not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_client_status_type(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ClientStatusType>> {
    let status_type = state.repository.client_status_types.get(id).await?;
    Ok(Json(status_type))
}

/// Create a client status type
#[utoipa::path(
    post,
    path = "/client-status-types",
    tag = "status-types",
    request_body = CreateClientStatusType,
    responses(
        (status = 201, description = "Status type created", body = ClientStatusType)
    )
)]
pub async fn create_client_status_type(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateClientStatusType>,
) -> AppResult<(StatusCode, Json<ClientStatusType>)> {
    let status_type = state.repository.client_status_types.create(data).await?;
    Ok((StatusCode::CREATED, Json(status_type)))
}

/// Replace the name and color of a client status type
#[utoipa::path(
    put,
    path = "/client-status-types/{id}",
    tag = "status-types",
    params(("id" = Uuid, Path, description = "Status type ID")),
    request_body = CreateClientStatusType,
    responses(
        (status = 200, description = "Status type updated", body = ClientStatusType),
        (status = 404, description = "Status type not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_client_status_type(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Json(data): Json<CreateClientStatusType>,
) -> AppResult<Json<ClientStatusType>> {
    let status_type = state
        .repository
        .client_status_types
        .update(id, &data)
        .await?;
    Ok(Json(status_type))
}

/// Delete a client status type
#[utoipa::path(
    delete,
    path = "/client-status-types/{id}",
    tag = "status-types",
    params(("id" = Uuid, Path, description = "Status type ID")),
    responses(
        (status = 204, description = "Status type deleted"),
        (status = 404, description = "Status type not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_client_status_type(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.repository.client_status_types.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List all action status types
#[utoipa::path(
    get,
    path = "/action-status-types",
    tag = "status-types",
    responses(
        (status = 200, description = "Action status types list", body = Vec<ActionStatusType>)
    )
)]
pub async fn list_action_status_types(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<ActionStatusType>>> {
    let status_types = state.repository.action_status_types.list().await?;
    Ok(Json(status_types))
}

/// Get an action status type by ID
#[utoipa::path(
    get,
    path = "/action-status-types/{id}",
    tag = "status-types",
    params(("id" = Uuid, Path, description = "Action status type ID")),
    responses(
        (status = 200, description = "Action status type details", body = ActionStatusType),
        (status = 404, description = "Action status type not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_action_status_type(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ActionStatusType>> {
    let status_type = state.repository.action_status_types.get(id).await?;
    Ok(Json(status_type))
}

/// Create an action status type
#[utoipa::path(
    post,
    path = "/action-status-types",
    tag = "status-types",
    request_body = CreateActionStatusType,
    responses(
        (status = 201, description = "Action status type created", body = ActionStatusType)
    )
)]
pub async fn create_action_status_type(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateActionStatusType>,
) -> AppResult<(StatusCode, Json<ActionStatusType>)> {
    let status_type = state.repository.action_status_types.create(data).await?;
    Ok((StatusCode::CREATED, Json(status_type)))
}

/// Replace the name, key and color of an action status type
#[utoipa::path(
    put,
    path = "/action-status-types/{id}",
    tag = "status-types",
    params(("id" = Uuid, Path, description = "Action status type ID")),
    request_body = CreateActionStatusType,
    responses(
        (status = 200, description = "Action status type updated", body = ActionStatusType),
        (status = 404, description = "Action status type not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_action_status_type(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Json(data): Json<CreateActionStatusType>,
) -> AppResult<Json<ActionStatusType>> {
    let status_type = state
        .repository
        .action_status_types
        .update(id, &data)
        .await?;
    Ok(Json(status_type))
}

/// Delete an action status type
#[utoipa::path(
    delete,
    path = "/action-status-types/{id}",
    tag = "status-types",
    params(("id" = Uuid, Path, description = "Action status type ID")),
    responses(
        (status = 204, description = "Action status type deleted"),
        (status = 404, description = "Action status type not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_action_status_type(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.repository.action_status_types.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
