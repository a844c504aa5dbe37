use axum::{Router, routing::{get, patch}, middleware};
use crate::handler::project_handler::{
    list_published_projects_handler,
    get_project_by_slug_handler,
    list_projects_handler,
    create_project_handler,
    update_project_handler,
    delete_project_handler,
};
use std::sync::Arc;
use crate::service::project_service::ProjectServiceImpl;
use crate::middlewares::admin_middleware::{admin_auth, AdminAuthState};

pub fn project_router(service: Arc<ProjectServiceImpl>, admin_auth_state: Arc<AdminAuthState>) -> Router {
    let public = Router::new()
        .route("/projects", get(list_published_projects_handler))
        .route("/projects/{slug}", get(get_project_by_slug_handler));

    let admin = Router::new()
        .route("/admin/projects", get(list_projects_handler).post(create_project_handler))
        .route("/admin/projects/{id}", patch(update_project_handler).delete(delete_project_handler))
        .route_layer(middleware::from_fn_with_state(admin_auth_state, admin_auth));

    public
        .merge(admin)
        .with_state(service)
}
