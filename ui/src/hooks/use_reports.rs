//! Report queries. Reports are read-only aggregates, so they use
//! `use_query` directly rather than the CRUD traits.

use futures::FutureExt;
use payloads::responses;
use yew::prelude::*;

use super::use_query::{QueryHookReturn, use_query};
use crate::query::QueryKey;

const REPORTS: &str = "reports";

#[hook]
pub fn use_summary_report() -> QueryHookReturn<responses::SummaryReport> {
    use_query(QueryKey::stats(REPORTS, &"summary"), true, |backend| {
        async move { backend.summary_report().await }.boxed_local()
    })
}

#[hook]
pub fn use_top_customers() -> QueryHookReturn<Vec<responses::TopCustomer>> {
    use_query(QueryKey::stats(REPORTS, &"top_customers"), true, |backend| {
        async move { backend.top_customers_report().await }.boxed_local()
    })
}

#[hook]
pub fn use_revenue_report() -> QueryHookReturn<Vec<responses::RevenuePoint>> {
    use_query(QueryKey::stats(REPORTS, &"revenue"), true, |backend| {
        async move { backend.revenue_report().await }.boxed_local()
    })
}

#[hook]
pub fn use_zalo_stats() -> QueryHookReturn<responses::ZaloStats> {
    use_query(QueryKey::stats(REPORTS, &"zalo_stats"), true, |backend| {
        async move { backend.zalo_stats_report().await }.boxed_local()
    })
}
