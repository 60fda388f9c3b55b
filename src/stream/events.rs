//! Typed event distribution for stream messages
//!
//! Each event name maps to one payload shape, and every subscriber gets its
//! own channel: a subscriber that falls over (drops its receiver) is pruned
//! and logged without affecting the others.

use serde::Deserialize;
use std::sync::Mutex;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, warn};

use crate::types::{Opportunity, Order, SystemStatus};

#[derive(Default)]
pub struct EventBus {
    opportunities: Mutex<Vec<UnboundedSender<Vec<Opportunity>>>>,
    system_status: Mutex<Vec<UnboundedSender<SystemStatus>>>,
    order_updates: Mutex<Vec<UnboundedSender<Order>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe_opportunities(&self) -> UnboundedReceiver<Vec<Opportunity>> {
        subscribe(&self.opportunities)
    }

    pub fn subscribe_system_status(&self) -> UnboundedReceiver<SystemStatus> {
        subscribe(&self.system_status)
    }

    pub fn subscribe_order_updates(&self) -> UnboundedReceiver<Order> {
        subscribe(&self.order_updates)
    }

    pub fn publish_opportunities(&self, payload: Vec<Opportunity>) {
        publish(&self.opportunities, payload, "opportunities");
    }

    pub fn publish_system_status(&self, payload: SystemStatus) {
        publish(&self.system_status, payload, "system_status");
    }

    pub fn publish_order_update(&self, payload: Order) {
        publish(&self.order_updates, payload, "order_update");
    }
}

fn subscribe<T>(subscribers: &Mutex<Vec<UnboundedSender<T>>>) -> UnboundedReceiver<T> {
    let (tx, rx) = mpsc::unbounded_channel();
    let mut subscribers = subscribers.lock().unwrap_or_else(|e| e.into_inner());
    subscribers.push(tx);
    rx
}

fn publish<T: Clone>(subscribers: &Mutex<Vec<UnboundedSender<T>>>, payload: T, event: &str) {
    let mut subscribers = subscribers.lock().unwrap_or_else(|e| e.into_inner());
    let before = subscribers.len();
    subscribers.retain(|tx| tx.send(payload.clone()).is_ok());
    if subscribers.len() < before {
        warn!(event, dropped = before - subscribers.len(), "Pruned dead subscribers");
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: String,
    data: serde_json::Value,
}

/// Decode a raw stream frame and publish it as a typed event. Unknown
/// message types and malformed payloads are logged and dropped, never
/// surfaced as errors.
pub(crate) fn dispatch(bus: &EventBus, raw: &str) {
    let envelope: Envelope = match serde_json::from_str(raw) {
        Ok(envelope) => envelope,
        Err(e) => {
            warn!(error = %e, "Dropping unparseable stream frame");
            return;
        }
    };

    match envelope.kind.as_str() {
        "opportunities" => match serde_json::from_value(envelope.data) {
            Ok(payload) => bus.publish_opportunities(payload),
            Err(e) => warn!(error = %e, "Dropping malformed opportunities payload"),
        },
        "system_status" => match serde_json::from_value(envelope.data) {
            Ok(payload) => bus.publish_system_status(payload),
            Err(e) => warn!(error = %e, "Dropping malformed system_status payload"),
        },
        "order_update" => match serde_json::from_value(envelope.data) {
            Ok(payload) => bus.publish_order_update(payload),
            Err(e) => warn!(error = %e, "Dropping malformed order_update payload"),
        },
        other => debug!(kind = other, "Ignoring unknown stream message type"),
    }
}
