//! Storage schemas for the order-management collections.
//!
//! Each entity maps one collection of the original document store to a table.
//! Defaults (`activo`, timestamps) are applied in the `before_save` hooks so every
//! write path gets them, whether it comes from a service or from the seed binary.

pub mod almacen;
pub mod forma_pago;
pub mod historial_proveedor_individual;
pub mod producto_sage;
pub mod receta;
pub mod stock;
pub mod vendedor;

pub use almacen::Entity as Almacen;
pub use forma_pago::Entity as FormaPago;
pub use historial_proveedor_individual::Entity as HistorialProveedorIndividual;
pub use producto_sage::Entity as ProductoSage;
pub use receta::Entity as Receta;
pub use stock::Entity as Stock;
pub use vendedor::Entity as Vendedor;
