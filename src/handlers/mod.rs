pub mod almacenes;
pub mod common;
pub mod formas_pago;
pub mod historial_proveedor;
pub mod productos_sage;
pub mod recetas;
pub mod stock;
pub mod vendedores;

use crate::db::DbPool;
use crate::events::EventSender;
use crate::services::{
    almacenes::AlmacenService, formas_pago::FormaPagoService,
    historial_proveedor::HistorialProveedorService, productos_sage::ProductoSageService,
    recetas::RecetaService, stock::StockService, vendedores::VendedorService,
};
use std::sync::Arc;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub almacenes: Arc<AlmacenService>,
    pub formas_pago: Arc<FormaPagoService>,
    pub productos_sage: Arc<ProductoSageService>,
    pub vendedores: Arc<VendedorService>,
    pub recetas: Arc<RecetaService>,
    pub stock: Arc<StockService>,
    pub historial: Arc<HistorialProveedorService>,
}

impl AppServices {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            almacenes: Arc::new(AlmacenService::new(db_pool.clone(), event_sender.clone())),
            formas_pago: Arc::new(FormaPagoService::new(
                db_pool.clone(),
                event_sender.clone(),
            )),
            productos_sage: Arc::new(ProductoSageService::new(
                db_pool.clone(),
                event_sender.clone(),
            )),
            vendedores: Arc::new(VendedorService::new(db_pool.clone(), event_sender.clone())),
            recetas: Arc::new(RecetaService::new(db_pool.clone(), event_sender.clone())),
            stock: Arc::new(StockService::new(db_pool.clone(), event_sender.clone())),
            historial: Arc::new(HistorialProveedorService::new(db_pool, event_sender)),
        }
    }
}
