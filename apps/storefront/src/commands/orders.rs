//! # Order Commands
//!
//! Order history, order detail and the track-order page. Orders live on
//! the signed-in user, so a guest has no history to look up.

use serde::{Deserialize, Serialize};
use tracing::debug;
use voltmart_core::{CoreError, Order, OrderStatus, ValidationError};
use voltmart_store::session::RECENT_ORDERS_LEN;

use crate::error::ApiResult;
use crate::state::SessionState;

/// The tracking timeline, in order.
pub const TRACKING_STEPS: [OrderStatus; 4] = [
    OrderStatus::Pending,
    OrderStatus::Processing,
    OrderStatus::Shipped,
    OrderStatus::Delivered,
];

/// Track-order page payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingInfo {
    pub order: Order,
    /// Index into `steps`; `None` for cancelled orders.
    pub progress_step: Option<usize>,
    pub steps: Vec<OrderStatus>,
}

impl From<Order> for TrackingInfo {
    fn from(order: Order) -> Self {
        TrackingInfo {
            progress_step: order.status.progress_step(),
            steps: TRACKING_STEPS.to_vec(),
            order,
        }
    }
}

pub fn list_orders(session: &SessionState) -> ApiResult<Vec<Order>> {
    debug!("list_orders command");
    session.with(|s| -> ApiResult<Vec<Order>> {
        let user = s.user().ok_or(CoreError::NotAuthenticated)?;
        Ok(user.orders.clone())
    })
}

/// The first few orders for the profile page. Empty for guests.
pub fn recent_orders(session: &SessionState) -> Vec<Order> {
    session.with(|s| s.recent_orders(RECENT_ORDERS_LEN).to_vec())
}

pub fn get_order(session: &SessionState, order_id: &str) -> ApiResult<Order> {
    debug!(order_id = %order_id, "get_order command");
    session.with(|s| -> ApiResult<Order> {
        if !s.is_authenticated() {
            return Err(CoreError::NotAuthenticated.into());
        }
        s.find_order(order_id)
            .cloned()
            .ok_or_else(|| CoreError::OrderNotFound(order_id.to_string()).into())
    })
}

/// Looks an order up by tracking id or order id.
pub fn track_order(session: &SessionState, query: &str) -> ApiResult<TrackingInfo> {
    let query = query.trim();
    debug!(query = %query, "track_order command");

    if query.is_empty() {
        return Err(ValidationError::Required {
            field: "trackingId".to_string(),
        }
        .into());
    }

    session
        .with(|s| s.track(query).cloned())
        .map(TrackingInfo::from)
        .ok_or_else(|| CoreError::OrderNotFound(query.to_string()).into())
}
