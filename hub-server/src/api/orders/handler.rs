//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use crate::common::{AppError, AppResult};
use crate::core::AppState;
use crate::db::models::Order;
use crate::identity::{AdminUser, CurrentUser};
use shared::models::{OrderRef, OrderStatus, PaymentMode};

/// Checkout payload: which saved address, how to pay
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub address_id: String,
    pub payment_mode: PaymentMode,
}

/// Status update payload
#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: OrderStatus,
}

/// Payment confirmation payload
#[derive(Debug, Deserialize)]
pub struct PaymentConfirmation {
    pub txn_last4: String,
}

/// POST /api/orders - place an order from the current cart
///
/// Cash-on-delivery clears the cart immediately; UPI keeps it until the
/// customer confirms the transaction.
pub async fn checkout(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<CheckoutRequest>,
) -> AppResult<Json<Order>> {
    let profile = state.identity.profile(&user.id).await?;
    let address = profile
        .addresses
        .get(&req.address_id)
        .cloned()
        .ok_or_else(|| AppError::not_found(format!("Address {}", req.address_id)))?;

    let lines = state.cart.get_all()?;
    let order = state
        .orders
        .create_order(&profile, lines, address, req.payment_mode)
        .await?;

    if req.payment_mode == PaymentMode::Cod {
        state.cart.clear()?;
    }

    Ok(Json(order))
}

/// POST /api/orders/:id/payment - confirm a UPI transaction
pub async fn confirm_payment(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(req): Json<PaymentConfirmation>,
) -> AppResult<Json<Order>> {
    let order_ref = OrderRef::parse(&id);
    let order = state.orders.get(&order_ref).await?;
    if order.customer_id != user.id && !user.admin {
        return Err(AppError::forbidden("not your order"));
    }

    let order = state.orders.confirm_payment(&order_ref, &req.txn_last4).await?;
    state.cart.clear()?;
    Ok(Json(order))
}

/// GET /api/orders/:id - customers see their own orders, admins any
pub async fn get_by_id(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let order = state.orders.get(&OrderRef::parse(&id)).await?;
    if order.customer_id != user.id && !user.admin {
        return Err(AppError::forbidden("not your order"));
    }
    Ok(Json(order))
}

/// GET /api/orders/mine - newest first
pub async fn my_orders(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Order>>> {
    let orders = state.orders.customer_orders(&user.id).await?;
    Ok(Json(orders))
}

/// GET /api/orders - admin, newest first
pub async fn list_all(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> AppResult<Json<Vec<Order>>> {
    let orders = state.orders.all_orders().await?;
    Ok(Json(orders))
}

/// PUT /api/orders/:id/status - admin; any status may overwrite any other
pub async fn update_status(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
    Json(req): Json<StatusUpdate>,
) -> AppResult<Json<Order>> {
    let order = state
        .orders
        .update_status(&OrderRef::parse(&id), req.status)
        .await?;
    Ok(Json(order))
}

/// DELETE /api/orders/:id - admin
pub async fn delete(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    state.orders.delete_order(&OrderRef::parse(&id)).await?;
    Ok(Json(true))
}
