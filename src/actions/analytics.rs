//! Revenue breakdown for the analytics dashboard.

use std::sync::Arc;

use crate::api::{call, ActionResult, ApiClient, ApiRequest};
use crate::models::{RevenueBreakdown, TimeRange};

pub struct AnalyticsActions<C> {
    client: Arc<C>,
    revenue: Option<RevenueBreakdown>,
}

impl<C: ApiClient> AnalyticsActions<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            revenue: None,
        }
    }

    pub fn revenue(&self) -> Option<&RevenueBreakdown> {
        self.revenue.as_ref()
    }

    pub async fn load_revenue(&mut self, range: TimeRange) -> ActionResult<RevenueBreakdown> {
        let request = ApiRequest::get("/api/v1/analytics/revenue")
            .query("range", range.as_str())
            .authenticated();
        let result: ActionResult<RevenueBreakdown> =
            call(&*self.client, request).await.require_data();

        if result.success {
            self.revenue = result.data.clone();
        }
        result
    }
}
