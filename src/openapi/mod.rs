use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{entities, handlers, services};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pedidos API",
        version = "0.3.0",
        description = r#"
Order-management backend for the butcher-shop chain and its Christmas-basket sales.

Catalog collections (warehouses, payment methods, Sage products, sellers) share the
same shape: paginated listing ordered by `codigo`, CRUD by id and lookup by `codigo`.
Recipes, per-store stock and the supplier order history complete the surface.

Every committed change is also pushed to WebSocket clients connected to `/socket`.
"#
    ),
    paths(
        crate::health::health_check,
        crate::health::readiness_check,
        crate::realtime::realtime_status,
        handlers::almacenes::list_almacenes,
        handlers::almacenes::create_almacen,
        handlers::almacenes::get_almacen,
        handlers::almacenes::get_almacen_by_codigo,
        handlers::almacenes::update_almacen,
        handlers::almacenes::delete_almacen,
        handlers::formas_pago::list_formas_pago,
        handlers::formas_pago::create_forma_pago,
        handlers::formas_pago::get_forma_pago,
        handlers::formas_pago::get_forma_pago_by_codigo,
        handlers::formas_pago::update_forma_pago,
        handlers::formas_pago::delete_forma_pago,
        handlers::productos_sage::list_productos_sage,
        handlers::productos_sage::create_producto_sage,
        handlers::productos_sage::get_producto_sage,
        handlers::productos_sage::get_producto_sage_by_codigo,
        handlers::productos_sage::update_producto_sage,
        handlers::productos_sage::delete_producto_sage,
        handlers::vendedores::list_vendedores,
        handlers::vendedores::create_vendedor,
        handlers::vendedores::get_vendedor,
        handlers::vendedores::get_vendedor_by_codigo,
        handlers::vendedores::update_vendedor,
        handlers::vendedores::delete_vendedor,
        handlers::recetas::list_recetas,
        handlers::recetas::create_receta,
        handlers::recetas::get_receta,
        handlers::recetas::get_receta_by_nombre,
        handlers::recetas::update_receta,
        handlers::recetas::delete_receta,
        handlers::stock::list_stock,
        handlers::stock::create_stock,
        handlers::stock::get_stock,
        handlers::stock::update_stock,
        handlers::stock::upsert_stock,
        handlers::stock::delete_stock,
        handlers::historial_proveedor::list_historial,
        handlers::historial_proveedor::create_historial,
        handlers::historial_proveedor::get_historial,
        handlers::historial_proveedor::delete_historial,
    ),
    components(
        schemas(
            entities::almacen::Model,
            entities::forma_pago::Model,
            entities::producto_sage::Model,
            entities::vendedor::Model,
            entities::receta::Model,
            entities::receta::Ingrediente,
            entities::stock::Model,
            entities::historial_proveedor_individual::Model,
            entities::historial_proveedor_individual::LineaHistorial,
            services::almacenes::CreateAlmacenInput,
            services::almacenes::UpdateAlmacenInput,
            services::formas_pago::CreateFormaPagoInput,
            services::formas_pago::UpdateFormaPagoInput,
            services::productos_sage::CreateProductoSageInput,
            services::productos_sage::UpdateProductoSageInput,
            services::vendedores::CreateVendedorInput,
            services::vendedores::UpdateVendedorInput,
            services::recetas::CreateRecetaInput,
            services::recetas::UpdateRecetaInput,
            services::recetas::IngredienteInput,
            services::stock::CreateStockInput,
            services::stock::UpdateStockInput,
            services::stock::UpsertStockInput,
            services::historial_proveedor::CreateHistorialInput,
            services::historial_proveedor::LineaHistorialInput,
            handlers::common::PaginationMeta,
            crate::realtime::RealtimeMessage,
            crate::realtime::RealtimeStatus,
            crate::errors::ErrorResponse
        )
    ),
    tags(
        (name = "almacenes", description = "Warehouses and factories"),
        (name = "formas-pago", description = "Payment methods"),
        (name = "productos-sage", description = "Product catalog mirrored from Sage"),
        (name = "vendedores", description = "Sellers"),
        (name = "recetas", description = "Recipes"),
        (name = "stock", description = "Stock per product and store"),
        (name = "historial-proveedor", description = "Supplier order history per store"),
        (name = "realtime", description = "Socket fan-out"),
        (name = "health", description = "Liveness and readiness")
    )
)]
pub struct ApiDoc;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json").try_it_out_enabled(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_document_lists_collection_routes() {
        let json = serde_json::to_string(&ApiDoc::openapi()).unwrap();
        assert!(json.contains("Pedidos API"));
        assert!(json.contains("/api/almacenes/codigo/{codigo}"));
        assert!(json.contains("/api/stock/tienda/{tienda_id}/producto/{producto_id}"));
        assert!(json.contains("/api/historial-proveedor"));
    }
}
