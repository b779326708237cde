use std::sync::Arc;

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use mongodb::bson::oid::ObjectId;
use serde_json::json;
use tracing::info;

use crate::{
    error::AppError,
    intake::{ProductIntake, read_intake},
    state::AppState,
};

pub async fn hello_handler() -> impl IntoResponse {
    "Server Expresso ☕"
}

pub async fn add_product_handler(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let intake = read_intake(&state.uploads, &mut multipart).await?;
    reject_duplicate_name(&state, &intake).await?;

    let product = intake.validate()?;
    let stored = state.products.insert(product).await?;
    info!("Product added successfully: {}", stored.name);

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Product created successfully" })),
    ))
}

pub async fn products_handler(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let products = state.products.list().await?;
    Ok(Json(products))
}

pub async fn update_product_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let intake = read_intake(&state.uploads, &mut multipart).await?;
    // The record being updated is not excluded here, so resubmitting an
    // unchanged name collides with the record itself.
    reject_duplicate_name(&state, &intake).await?;

    let product = intake.validate()?;
    let id = ObjectId::parse_str(&id)?;
    let previous = state.products.replace(id, &product).await?;
    info!("Product updated successfully: {}", product.name);

    Ok((
        StatusCode::CREATED,
        Json(json!({ "product": previous, "message": "Product updated successfully" })),
    ))
}

pub async fn delete_product_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = ObjectId::parse_str(&id).map_err(|e| AppError::NoSuchProduct(e.to_string()))?;

    // A well-formed id that matches nothing still succeeds; the prior state
    // is simply `None`.
    let deleted = state
        .products
        .remove(id)
        .await
        .map_err(|e| AppError::NoSuchProduct(e.to_string()))?;
    info!("Product deleted: {:?}", deleted.map(|p| p.name));

    Ok(StatusCode::NO_CONTENT)
}

async fn reject_duplicate_name(state: &AppState, intake: &ProductIntake) -> Result<(), AppError> {
    let Some(name) = intake.name.as_deref() else {
        return Ok(());
    };

    if let Some(found) = state.products.find_conflict(name).await? {
        info!("Rejecting duplicate name: {}", found.name);
        return Err(AppError::DuplicateName(found.name));
    }

    Ok(())
}
