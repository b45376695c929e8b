//! Admin dashboard aggregation.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::{
    ACTION_CREATION, ACTION_DELETION, ACTION_EDIT, ACTION_LABELS, ROLE_ENTREPRENEUR, ROLE_EXPLORER,
};
use crate::domain::report::{plan_histogram, preference_histogram};
use crate::domain::{AdminDashboard, Histogram, RoleBreakdown};
use crate::errors::AppResult;
use crate::infra::UnitOfWork;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ReportService: Send + Sync {
    async fn admin_dashboard(&self) -> AppResult<AdminDashboard>;
}

pub struct Reporter<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> Reporter<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> ReportService for Reporter<U> {
    async fn admin_dashboard(&self) -> AppResult<AdminDashboard> {
        let users = self.uow.users();
        let explorers = self.uow.explorers();
        let entrepreneurs = self.uow.entrepreneurs();
        let audit = self.uow.audit();

        let (
            total_users,
            explorer_role_count,
            entrepreneur_role_count,
            explorer_list,
            entrepreneur_list,
            creations,
            edits,
            deletions,
            logs,
        ) = tokio::try_join!(
            users.count(),
            users.count_by_role(ROLE_EXPLORER),
            users.count_by_role(ROLE_ENTREPRENEUR),
            explorers.list(),
            entrepreneurs.list(),
            audit.count_action_containing(ACTION_CREATION),
            audit.count_action_containing(ACTION_EDIT),
            audit.count_action_containing(ACTION_DELETION),
            audit.list_recent(),
        )?;

        tracing::debug!(
            total_users,
            explorers = explorer_list.len(),
            entrepreneurs = entrepreneur_list.len(),
            "Admin dashboard aggregated"
        );

        Ok(AdminDashboard {
            total_users,
            total_explorers: explorer_role_count,
            total_entrepreneurs: entrepreneur_role_count,
            roles: RoleBreakdown {
                explorers: explorer_role_count,
                entrepreneurs: entrepreneur_role_count,
            },
            plans: plan_histogram(&entrepreneur_list),
            preferences: preference_histogram(&explorer_list),
            actions: Histogram::from_counts(&ACTION_LABELS, vec![creations, edits, deletions]),
            entrepreneurs: entrepreneur_list,
            explorers: explorer_list,
            logs,
        })
    }
}
