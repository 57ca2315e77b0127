//! Resource modules the generic CRUD hooks are instantiated over.
//!
//! Users and projects are reachable through `payloads::APIClient` but
//! have no console page; no resource module exists for them here.

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use payloads::{ClientError, CustomerId, OrderId, requests, responses};

use super::{
    Backend, CreateOp, DeleteOp, DetailOp, ListOp, Resource, StatsOp,
    UpdateOp,
};

pub struct Customers;

impl Resource for Customers {
    const NAME: &'static str = "customers";
    type Record = responses::Customer;
}

impl ListOp for Customers {
    fn list(
        backend: Backend,
        params: requests::ListParams,
    ) -> LocalBoxFuture<
        'static,
        Result<responses::Paginated<Self::Record>, ClientError>,
    > {
        async move { backend.list_customers(&params).await }.boxed_local()
    }
}

impl DetailOp for Customers {
    type Id = CustomerId;

    fn get(
        backend: Backend,
        id: Self::Id,
    ) -> LocalBoxFuture<'static, Result<Self::Record, ClientError>> {
        async move { backend.get_customer(&id).await }.boxed_local()
    }
}

impl CreateOp for Customers {
    type CreatePayload = requests::CreateCustomer;

    fn create(
        backend: Backend,
        payload: Self::CreatePayload,
    ) -> LocalBoxFuture<'static, Result<Self::Record, ClientError>> {
        async move { backend.create_customer(&payload).await }.boxed_local()
    }
}

impl UpdateOp for Customers {
    type UpdatePayload = requests::UpdateCustomer;

    fn update(
        backend: Backend,
        id: Self::Id,
        payload: Self::UpdatePayload,
    ) -> LocalBoxFuture<'static, Result<Self::Record, ClientError>> {
        async move { backend.update_customer(&id, &payload).await }
            .boxed_local()
    }
}

impl StatsOp for Customers {
    type Stats = responses::CustomerStats;

    fn stats(
        backend: Backend,
        id: Self::Id,
    ) -> LocalBoxFuture<'static, Result<Self::Stats, ClientError>> {
        async move { backend.customer_stats(&id).await }.boxed_local()
    }
}

pub struct Vouchers;

impl Resource for Vouchers {
    const NAME: &'static str = "vouchers";
    type Record = responses::Voucher;
}

impl ListOp for Vouchers {
    fn list(
        backend: Backend,
        params: requests::ListParams,
    ) -> LocalBoxFuture<
        'static,
        Result<responses::Paginated<Self::Record>, ClientError>,
    > {
        async move { backend.list_vouchers(&params).await }.boxed_local()
    }
}

impl DetailOp for Vouchers {
    /// Vouchers are addressed by code, not id.
    type Id = String;

    fn get(
        backend: Backend,
        id: Self::Id,
    ) -> LocalBoxFuture<'static, Result<Self::Record, ClientError>> {
        async move { backend.get_voucher(&id).await }.boxed_local()
    }
}

impl CreateOp for Vouchers {
    type CreatePayload = requests::CreateVoucher;

    fn create(
        backend: Backend,
        payload: Self::CreatePayload,
    ) -> LocalBoxFuture<'static, Result<Self::Record, ClientError>> {
        async move { backend.create_voucher(&payload).await }.boxed_local()
    }
}

pub struct UsageLogs;

impl Resource for UsageLogs {
    const NAME: &'static str = "logs";
    type Record = responses::UsageLog;
}

impl ListOp for UsageLogs {
    fn list(
        backend: Backend,
        params: requests::ListParams,
    ) -> LocalBoxFuture<
        'static,
        Result<responses::Paginated<Self::Record>, ClientError>,
    > {
        async move { backend.list_logs(&params).await }.boxed_local()
    }
}

pub struct Orders;

impl Resource for Orders {
    const NAME: &'static str = "orders";
    type Record = responses::Order;
}

impl ListOp for Orders {
    fn list(
        backend: Backend,
        params: requests::ListParams,
    ) -> LocalBoxFuture<
        'static,
        Result<responses::Paginated<Self::Record>, ClientError>,
    > {
        async move { backend.list_orders(&params).await }.boxed_local()
    }
}

impl DetailOp for Orders {
    type Id = OrderId;

    fn get(
        backend: Backend,
        id: Self::Id,
    ) -> LocalBoxFuture<'static, Result<Self::Record, ClientError>> {
        async move { backend.get_order(&id).await }.boxed_local()
    }
}

impl CreateOp for Orders {
    type CreatePayload = requests::CreateOrder;

    fn create(
        backend: Backend,
        payload: Self::CreatePayload,
    ) -> LocalBoxFuture<'static, Result<Self::Record, ClientError>> {
        async move { backend.create_order(&payload).await }.boxed_local()
    }
}

impl UpdateOp for Orders {
    type UpdatePayload = requests::UpdateOrder;

    fn update(
        backend: Backend,
        id: Self::Id,
        payload: Self::UpdatePayload,
    ) -> LocalBoxFuture<'static, Result<Self::Record, ClientError>> {
        async move { backend.update_order(&id, &payload).await }.boxed_local()
    }
}

impl DeleteOp for Orders {
    fn delete(
        backend: Backend,
        id: Self::Id,
    ) -> LocalBoxFuture<'static, Result<(), ClientError>> {
        async move { backend.delete_order(&id).await }.boxed_local()
    }
}
