use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::realtime::{RealtimeHub, RealtimeMessage};

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    /// Creates a new EventSender
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Sends an event asynchronously
    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }

    /// Sends an event, logging instead of failing when the channel is closed.
    ///
    /// Writes have already been committed when events go out, so a dead
    /// consumer must never turn a successful request into an error.
    pub async fn send_or_log(&self, event: Event) {
        let name = event.name();
        if let Err(e) = self.send(event).await {
            warn!(event = name, error = %e, "dropping domain event");
        }
    }
}

/// Changes that happened in the store, fanned out to realtime clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    AlmacenCreated(Uuid),
    AlmacenUpdated(Uuid),
    AlmacenDeleted(Uuid),

    FormaPagoCreated(Uuid),
    FormaPagoUpdated(Uuid),
    FormaPagoDeleted(Uuid),

    ProductoSageCreated(Uuid),
    ProductoSageUpdated(Uuid),
    ProductoSageDeleted(Uuid),

    VendedorCreated(Uuid),
    VendedorUpdated(Uuid),
    VendedorDeleted(Uuid),

    RecetaCreated(Uuid),
    RecetaUpdated(Uuid),
    RecetaDeleted(Uuid),

    StockCreated {
        stock_id: Uuid,
        producto: Uuid,
        tienda_id: String,
        cantidad: Decimal,
    },
    StockUpdated {
        stock_id: Uuid,
        producto: Uuid,
        tienda_id: String,
        cantidad: Decimal,
    },
    StockDeleted(Uuid),

    HistorialRecorded {
        historial_id: Uuid,
        tienda_id: String,
        proveedor: String,
        fecha_pedido: DateTime<Utc>,
    },
    HistorialDeleted(Uuid),
}

impl Event {
    /// Realtime event name, `<coleccion>:<accion>`.
    pub fn name(&self) -> &'static str {
        match self {
            Event::AlmacenCreated(_) => "almacenes:created",
            Event::AlmacenUpdated(_) => "almacenes:updated",
            Event::AlmacenDeleted(_) => "almacenes:deleted",
            Event::FormaPagoCreated(_) => "formas-pago:created",
            Event::FormaPagoUpdated(_) => "formas-pago:updated",
            Event::FormaPagoDeleted(_) => "formas-pago:deleted",
            Event::ProductoSageCreated(_) => "productos-sage:created",
            Event::ProductoSageUpdated(_) => "productos-sage:updated",
            Event::ProductoSageDeleted(_) => "productos-sage:deleted",
            Event::VendedorCreated(_) => "vendedores:created",
            Event::VendedorUpdated(_) => "vendedores:updated",
            Event::VendedorDeleted(_) => "vendedores:deleted",
            Event::RecetaCreated(_) => "recetas:created",
            Event::RecetaUpdated(_) => "recetas:updated",
            Event::RecetaDeleted(_) => "recetas:deleted",
            Event::StockCreated { .. } => "stock:created",
            Event::StockUpdated { .. } => "stock:updated",
            Event::StockDeleted(_) => "stock:deleted",
            Event::HistorialRecorded { .. } => "historial:created",
            Event::HistorialDeleted(_) => "historial:deleted",
        }
    }

    /// Body sent to socket clients along with the event name.
    pub fn payload(&self) -> serde_json::Value {
        match self {
            Event::AlmacenCreated(id)
            | Event::AlmacenUpdated(id)
            | Event::AlmacenDeleted(id)
            | Event::FormaPagoCreated(id)
            | Event::FormaPagoUpdated(id)
            | Event::FormaPagoDeleted(id)
            | Event::ProductoSageCreated(id)
            | Event::ProductoSageUpdated(id)
            | Event::ProductoSageDeleted(id)
            | Event::VendedorCreated(id)
            | Event::VendedorUpdated(id)
            | Event::VendedorDeleted(id)
            | Event::RecetaCreated(id)
            | Event::RecetaUpdated(id)
            | Event::RecetaDeleted(id)
            | Event::StockDeleted(id)
            | Event::HistorialDeleted(id) => json!({ "id": id }),
            Event::StockCreated {
                stock_id,
                producto,
                tienda_id,
                cantidad,
            }
            | Event::StockUpdated {
                stock_id,
                producto,
                tienda_id,
                cantidad,
            } => json!({
                "id": stock_id,
                "producto": producto,
                "tiendaId": tienda_id,
                "cantidad": cantidad,
            }),
            Event::HistorialRecorded {
                historial_id,
                tienda_id,
                proveedor,
                fecha_pedido,
            } => json!({
                "id": historial_id,
                "tiendaId": tienda_id,
                "proveedor": proveedor,
                "fechaPedido": fecha_pedido,
            }),
        }
    }
}

impl From<&Event> for RealtimeMessage {
    fn from(event: &Event) -> Self {
        RealtimeMessage::new(event.name(), event.payload())
    }
}

/// Drains the domain event channel and republishes every event to socket clients.
pub async fn process_events(mut rx: mpsc::Receiver<Event>, hub: RealtimeHub) {
    info!("Starting event processing loop");

    while let Some(event) = rx.recv().await {
        match &event {
            Event::StockCreated {
                producto,
                tienda_id,
                cantidad,
                ..
            }
            | Event::StockUpdated {
                producto,
                tienda_id,
                cantidad,
                ..
            } if *cantidad <= Decimal::ZERO => {
                warn!(
                    %producto,
                    tienda_id = %tienda_id,
                    %cantidad,
                    "stock agotado en tienda"
                );
            }
            Event::HistorialRecorded {
                tienda_id,
                proveedor,
                ..
            } => {
                info!(tienda_id = %tienda_id, proveedor = %proveedor, "pedido a proveedor registrado");
            }
            other => debug!(event = other.name(), "domain event"),
        }

        let delivered = hub.publish(RealtimeMessage::from(&event));
        debug!(event = event.name(), delivered, "event broadcast");
    }

    info!("Event channel closed, processing loop finished");
}
