//! Route definitions for the Resto Back-Office Platform

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Auth routes (public + /me)
        .nest("/auth", auth_routes())
        // Protected routes - employee management
        .nest("/empleados", employee_routes())
        // Protected routes - task management
        .nest("/tareas", task_routes())
        // Protected routes - supply inventory
        .nest("/insumos", supply_routes())
        // Protected routes - product catalog
        .nest("/productos", product_routes())
        // Protected routes - order management
        .nest("/pedidos", order_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        .route(
            "/me",
            get(handlers::me).route_layer(middleware::from_fn(auth_middleware)),
        )
}

/// Employee management routes (protected)
fn employee_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_employees).post(handlers::create_employee),
        )
        .route(
            "/:id",
            get(handlers::get_employee)
                .put(handlers::update_employee)
                .delete(handlers::delete_employee),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Task management routes (protected)
fn task_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_tasks).post(handlers::create_task))
        .route("/area/:area", get(handlers::list_tasks_by_area))
        .route(
            "/:id",
            get(handlers::get_task)
                .put(handlers::update_task)
                .delete(handlers::delete_task),
        )
        .route("/:id/iniciar", put(handlers::start_task))
        .route("/:id/finalizar", put(handlers::finish_task))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Supply inventory routes (protected)
fn supply_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_supplies).post(handlers::create_supply),
        )
        .route("/buscar", get(handlers::search_supplies))
        .route("/proveedores", get(handlers::list_suppliers))
        .route("/bajo-stock", get(handlers::list_low_stock))
        .route("/alertas", get(handlers::list_stock_alerts))
        .route(
            "/:id",
            get(handlers::get_supply)
                .put(handlers::update_supply)
                .delete(handlers::delete_supply),
        )
        .route("/:id/stock", put(handlers::adjust_supply_stock))
        .route("/:id/unidades-compatibles", get(handlers::list_compatible_units))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Product catalog routes (protected)
fn product_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_products).post(handlers::create_product),
        )
        .route(
            "/insumos-disponibles",
            get(handlers::search_available_supplies),
        )
        .route(
            "/:id",
            get(handlers::get_product)
                .put(handlers::update_product)
                .delete(handlers::delete_product),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Order management routes (protected)
fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_orders).post(handlers::create_order))
        .route(
            "/:id",
            get(handlers::get_order)
                .put(handlers::update_order)
                .delete(handlers::delete_order),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}
