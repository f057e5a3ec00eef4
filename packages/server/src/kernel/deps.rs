//! Server dependencies for actions and routes (using traits for testability)
//!
//! This module provides the central dependency container. Every store is a
//! trait object so the runner can pick the Postgres or in-memory variant.

use std::sync::Arc;

use sqlx::PgPool;
use tracing::info_span;

use crate::domains::assignments::{BoundaryPolicy, MembershipQueryEngine};
use crate::kernel::{
    BaseAssignmentStore, BaseDepartmentStore, BaseEmployeeStore, BaseSalaryStore, InMemoryStore,
    PostgresStore,
};

// =============================================================================
// ServerDeps
// =============================================================================

/// Server dependencies accessible to actions and routes
#[derive(Clone)]
pub struct ServerDeps {
    pub employees: Arc<dyn BaseEmployeeStore>,
    pub departments: Arc<dyn BaseDepartmentStore>,
    pub assignments: Arc<dyn BaseAssignmentStore>,
    pub salaries: Arc<dyn BaseSalaryStore>,
    /// Membership query over the same three stores
    pub membership: MembershipQueryEngine,
    /// Present only for the Postgres backend (health checks, seeding)
    pub db_pool: Option<PgPool>,
}

impl ServerDeps {
    /// Create new ServerDeps with the given stores
    pub fn new(
        employees: Arc<dyn BaseEmployeeStore>,
        departments: Arc<dyn BaseDepartmentStore>,
        assignments: Arc<dyn BaseAssignmentStore>,
        salaries: Arc<dyn BaseSalaryStore>,
        db_pool: Option<PgPool>,
    ) -> Self {
        let membership = MembershipQueryEngine::new(
            employees.clone(),
            departments.clone(),
            assignments.clone(),
            info_span!("membership_query"),
        );

        Self {
            employees,
            departments,
            assignments,
            salaries,
            membership,
            db_pool,
        }
    }

    /// Every store backed by one Postgres pool
    pub fn postgres(pool: PgPool) -> Self {
        let store = Arc::new(PostgresStore::new(pool.clone(), info_span!("postgres_store")));
        Self::new(store.clone(), store.clone(), store.clone(), store, Some(pool))
    }

    /// Every store backed by one shared in-memory store
    pub fn in_memory(store: Arc<InMemoryStore>) -> Self {
        Self::new(store.clone(), store.clone(), store.clone(), store, None)
    }

    pub fn with_boundary_policy(mut self, policy: BoundaryPolicy) -> Self {
        self.membership = self.membership.with_boundary_policy(policy);
        self
    }
}
