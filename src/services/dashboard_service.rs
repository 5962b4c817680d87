// src/services/dashboard_service.rs

use crate::{
    common::error::AppError,
    db::DashboardRepository,
    models::{
        auth::{User, UserRole},
        dashboard::Dashboard,
    },
};

#[derive(Clone)]
pub struct DashboardService {
    repo: DashboardRepository,
}

impl DashboardService {
    pub fn new(repo: DashboardRepository) -> Self {
        Self { repo }
    }

    // Cada papel enxerga o próprio resumo
    pub async fn summary_for(&self, user: &User) -> Result<Dashboard, AppError> {
        match user.role {
            UserRole::Administrator => Ok(Dashboard::Admin(self.repo.admin_summary().await?)),
            UserRole::Supplier | UserRole::Representative => {
                Ok(Dashboard::Publisher(self.repo.publisher_summary(user.id).await?))
            }
            UserRole::Retailer => Ok(Dashboard::Retailer(self.repo.retailer_summary(user.id).await?)),
        }
    }
}
