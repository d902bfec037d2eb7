//! Client API endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::client::{
        Client, ClientQuery, ClientStatistics, ClientSummary, CreateClient, UpdateClient,
    },
};

/// Comment-only patch body
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateComment {
    #[serde(default)]
    pub comment: String,
}

/// List clients, optionally restricted by a named status filter
#[utoipa::path(
    get,
    path = "/clients",
    tag = "clients",
    params(ClientQuery),
    responses(
        (status = 200, description = "Clients list", body = Vec<Client>)
    )
)]
pub async fn list_clients(
    State(state): State<crate::AppState>,
    Query(query): Query<ClientQuery>,
) -> AppResult<Json<Vec<Client>>> {
    let clients = state
        .repository
        .clients
        .list(query.status_filter.as_deref())
        .await?;
    Ok(Json(clients))
}

/// Per-flag counts over the full client collection
#[utoipa::path(
    get,
    path = "/clients/statistics",
    tag = "clients",
    responses(
        (status = 200, description = "Client statistics", body = ClientStatistics)
    )
)]
pub async fn get_client_statistics(
    State(state): State<crate::AppState>,
) -> AppResult<Json<ClientStatistics>> {
    let stats = state.repository.clients.statistics().await?;
    Ok(Json(stats))
}

/// Collection-wide sums of the commercial metrics
#[utoipa::path(
    get,
    path = "/clients/summary",
    tag = "clients",
    responses(
        (status = 200, description = "Client summary", body = ClientSummary)
    )
)]
pub async fn get_client_summary(
    State(state): State<crate::AppState>,
) -> AppResult<Json<ClientSummary>> {
    let summary = state.repository.clients.summary().await?;
    Ok(Json(summary))
}

/// Get a client by ID
#[utoipa::path(
    get,
    path = "/clients/{id}",
    tag = "clients",
    params(("id" = Uuid, Path, description = "Client ID")),
    responses(
        (status = 200, description = "Client details", body = Client),
        (status = 404, description = "Client not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_client(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Client>> {
    let client = state.repository.clients.get(id).await?;
    Ok(Json(client))
}

/// Create a client
#[utoipa::path(
    post,
    path = "/clients",
    tag = "clients",
    request_body = CreateClient,
    responses(
        (status = 201, description = "Client created", body = Client)
    )
)]
pub async fn create_client(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateClient>,
) -> AppResult<(StatusCode, Json<Client>)> {
    let client = state.repository.clients.create(data).await?;
    Ok((StatusCode::CREATED, Json(client)))
}

/// Apply a partial update to a client
#[utoipa::path(
    put,
    path = "/clients/{id}",
    tag = "clients",
    params(("id" = Uuid, Path, description = "Client ID")),
    request_body = UpdateClient,
    responses(
        (status = 200, description = "Client updated", body = Client),
        (status = 400, description = "No fields to update", body = crate::error::ErrorResponse),
        (status = 404, description = "Client not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_client(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Json(data): Json<UpdateClient>,
) -> AppResult<Json<Client>> {
    let client = state.repository.clients.update(id, &data).await?;
    Ok(Json(client))
}

/// Replace only the free-text comment of a client
#[utoipa::path(
    patch,
    path = "/clients/{id}/comment",
    tag = "clients",
    params(("id" = Uuid, Path, description = "Client ID")),
    request_body = UpdateComment,
    responses(
        (status = 204, description = "Comment updated"),
        (status = 404, description = "Client not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_client_comment(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Json(data): Json<UpdateComment>,
) -> AppResult<StatusCode> {
    state
        .repository
        .clients
        .update_comment(id, &data.comment)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a client
#[utoipa::path(
    delete,
    path = "/clients/{id}",
    tag = "clients",
    params(("id" = Uuid, Path, description = "Client ID")),
    responses(
        (status = 204, description = "Client deleted"),
        (status = 404, description = "Client not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_client(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.repository.clients.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
