use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use serde_json::json;

use retailgate_catalog::permissions as p;
use retailgate_core::{DomainError, ItemId};

use crate::app::{dto, errors, services::AppServices};
use crate::gate::gated;
use crate::inventory::InventoryItem;

pub fn router() -> Router {
    Router::new()
        .route(
            "/",
            gated(get(list_items), p::INVENTORY_VIEW)
                .merge(gated(post(create_item), p::INVENTORY_CREATE)),
        )
        .route(
            "/:id",
            gated(get(get_item), p::INVENTORY_VIEW)
                .merge(gated(put(update_item), p::INVENTORY_UPDATE))
                .merge(gated(delete(delete_item), p::INVENTORY_DELETE)),
        )
}

pub async fn list_items(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let items = services.inventory.list();
    (StatusCode::OK, Json(json!({ "items": items }))).into_response()
}

pub async fn get_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match id.parse::<ItemId>() {
        Ok(id) => id,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.inventory.get(&id) {
        Some(item) => (StatusCode::OK, Json(json!({ "item": item }))).into_response(),
        None => errors::domain_error_to_response(DomainError::not_found()),
    }
}

pub async fn create_item(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateItemRequest>,
) -> axum::response::Response {
    let item = InventoryItem {
        id: ItemId::new(),
        sku: body.sku,
        name: body.name,
        quantity: body.quantity,
        price_cents: body.price_cents,
    };

    if let Err(e) = services.add_item(item.clone()) {
        return errors::domain_error_to_response(e);
    }

    (StatusCode::CREATED, Json(json!({ "item": item }))).into_response()
}

pub async fn update_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateItemRequest>,
) -> axum::response::Response {
    let id = match id.parse::<ItemId>() {
        Ok(id) => id,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let Some(mut item) = services.inventory.get(&id) else {
        return errors::domain_error_to_response(DomainError::not_found());
    };

    if let Some(name) = body.name {
        item.name = name;
    }
    if let Some(quantity) = body.quantity {
        item.quantity = quantity;
    }
    if let Some(price_cents) = body.price_cents {
        item.price_cents = price_cents;
    }

    if let Err(e) = item.validate() {
        return errors::domain_error_to_response(e);
    }
    services.inventory.upsert(item.clone());

    (StatusCode::OK, Json(json!({ "item": item }))).into_response()
}

pub async fn delete_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match id.parse::<ItemId>() {
        Ok(id) => id,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.inventory.remove(&id) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => errors::domain_error_to_response(DomainError::not_found()),
    }
}
