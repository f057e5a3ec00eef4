use axum::{extract::Extension, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::server::app::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub store: StoreHealth,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_pool: Option<ConnectionPoolHealth>,
    pub boundary_policy: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StoreHealth {
    pub backend: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ConnectionPoolHealth {
    pub size: u32,
    pub idle_connections: usize,
    pub max_connections: u32,
}

/// Health check endpoint
///
/// Checks database connectivity and pool utilization when running on Postgres.
/// The in-memory backend is always healthy.
///
/// Returns 200 OK if the store is healthy, 503 Service Unavailable otherwise.
pub async fn health_handler(
    Extension(state): Extension<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let (store_health, pool_health) = match &state.deps.db_pool {
        Some(pool) => {
            // Check database connection with a bounded wait
            let status = match tokio::time::timeout(
                std::time::Duration::from_secs(5),
                sqlx::query("SELECT 1").execute(pool),
            )
            .await
            {
                Ok(Ok(_)) => StoreHealth {
                    backend: "postgres".to_string(),
                    status: "ok".to_string(),
                    error: None,
                },
                Ok(Err(e)) => StoreHealth {
                    backend: "postgres".to_string(),
                    status: "error".to_string(),
                    error: Some(format!("Query failed: {}", e)),
                },
                Err(_) => StoreHealth {
                    backend: "postgres".to_string(),
                    status: "error".to_string(),
                    error: Some("Query timeout (>5s)".to_string()),
                },
            };

            let pool_health = ConnectionPoolHealth {
                size: pool.size(),
                idle_connections: pool.num_idle(),
                max_connections: pool.options().get_max_connections(),
            };
            (status, Some(pool_health))
        }
        None => (
            StoreHealth {
                backend: "memory".to_string(),
                status: "ok".to_string(),
                error: None,
            },
            None,
        ),
    };

    let is_healthy = store_health.status == "ok";

    let overall_status = if is_healthy {
        "healthy"
    } else {
        "unhealthy"
    };

    let status_code = if is_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(HealthResponse {
            status: overall_status.to_string(),
            store: store_health,
            connection_pool: pool_health,
            boundary_policy: state.deps.membership.boundary_policy().to_string(),
        }),
    )
}
