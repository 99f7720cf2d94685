//! Route binder: permission-filtered CRUD routes per resource, plus common
//! health/version routes.

use crate::handlers;
use crate::store::Resource;
use axum::{
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Serialize;

/// Which CRUD verbs get a route. A registration-time decision, not a
/// per-request check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Permissions {
    pub create: bool,
    pub read: bool,
    pub update: bool,
    pub delete: bool,
}

impl Default for Permissions {
    fn default() -> Self {
        Permissions::all()
    }
}

impl Permissions {
    pub fn all() -> Self {
        Permissions {
            create: true,
            read: true,
            update: true,
            delete: true,
        }
    }

    pub fn none() -> Self {
        Permissions {
            create: false,
            read: false,
            update: false,
            delete: false,
        }
    }

    pub fn read_only() -> Self {
        Permissions {
            read: true,
            ..Permissions::none()
        }
    }

    /// Build from verb strings, e.g. `["create", "read"]`. Unknown verbs are
    /// ignored.
    pub fn from_verbs<'a, I>(verbs: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut p = Permissions::none();
        for verb in verbs {
            match verb {
                "create" => p.create = true,
                "read" => p.read = true,
                "update" => p.update = true,
                "delete" => p.delete = true,
                _ => {}
            }
        }
        p
    }
}

/// Install up to four routes for `resource`, each delegating to `store`:
/// POST `/{resource}`, GET `/{resource}`, PUT `/{resource}/:id`,
/// DELETE `/{resource}/:id`. The id segment is an opaque string; the store
/// parses its own identifier form.
pub fn crud_routes(resource: &str, store: Resource, permissions: Permissions) -> Router {
    let base = format!("/{}", resource.trim_matches('/'));
    let with_id = format!("{}/:id", base);
    let mut router = Router::new();
    if permissions.create {
        router = router.route(&base, post(handlers::create));
    }
    if permissions.read {
        router = router.route(&base, get(handlers::list));
    }
    if permissions.update {
        router = router.route(&with_id, put(handlers::update));
    }
    if permissions.delete {
        router = router.route(&with_id, delete(handlers::remove));
    }
    tracing::info!(resource, ?permissions, "routes bound");
    router.with_state(store)
}

#[derive(Serialize)]
struct HealthBody {
    status: &'static str,
}

async fn health() -> Json<HealthBody> {
    Json(HealthBody { status: "ok" })
}

async fn version() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Common routes (no state): GET /health, GET /version.
pub fn common_routes() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/version", get(version))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_permissions_allow_everything() {
        assert_eq!(Permissions::default(), Permissions::all());
    }

    #[test]
    fn from_verbs_ignores_unknown() {
        let p = Permissions::from_verbs(["create", "read", "admin"]);
        assert!(p.create && p.read);
        assert!(!p.update && !p.delete);
    }

    #[test]
    fn read_only_is_just_read() {
        let p = Permissions::read_only();
        assert!(p.read);
        assert!(!p.create && !p.update && !p.delete);
    }
}
