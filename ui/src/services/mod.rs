//! Service layer between the hooks and the backend.
//!
//! Both strategies expose identical signatures: [`Backend::Http`] passes
//! through to the reqwest client in `payloads`, [`Backend::Mock`] serves
//! the in-memory development dataset. The strategy is selected once at
//! startup (`crate::get_backend`), never at call sites.

pub mod mock;
pub mod resources;

use futures::future::LocalBoxFuture;
use payloads::api_client::{FileDownload, PrintQrOutcome};
use payloads::{
    APIClient, ClientError, CustomerId, OrderId, VoucherStatus, requests,
    responses,
};
use serde::Serialize;
use serde::de::DeserializeOwned;

#[derive(Clone)]
pub enum Backend {
    Http(APIClient),
    Mock(mock::MockApi),
}

impl Backend {
    // Customers

    pub async fn list_customers(
        &self,
        params: &requests::ListParams,
    ) -> Result<responses::Paginated<responses::Customer>, ClientError> {
        match self {
            Self::Http(client) => client.list_customers(params).await,
            Self::Mock(mock) => mock.list_customers(params).await,
        }
    }

    pub async fn get_customer(
        &self,
        customer_id: &CustomerId,
    ) -> Result<responses::Customer, ClientError> {
        match self {
            Self::Http(client) => client.get_customer(customer_id).await,
            Self::Mock(mock) => mock.get_customer(customer_id).await,
        }
    }

    pub async fn create_customer(
        &self,
        details: &requests::CreateCustomer,
    ) -> Result<responses::Customer, ClientError> {
        match self {
            Self::Http(client) => client.create_customer(details).await,
            Self::Mock(mock) => mock.create_customer(details).await,
        }
    }

    pub async fn update_customer(
        &self,
        customer_id: &CustomerId,
        details: &requests::UpdateCustomer,
    ) -> Result<responses::Customer, ClientError> {
        match self {
            Self::Http(client) => {
                client.update_customer(customer_id, details).await
            }
            Self::Mock(mock) => {
                mock.update_customer(customer_id, details).await
            }
        }
    }

    pub async fn customer_vouchers(
        &self,
        customer_id: &CustomerId,
    ) -> Result<responses::Paginated<responses::Voucher>, ClientError> {
        match self {
            Self::Http(client) => client.customer_vouchers(customer_id).await,
            Self::Mock(mock) => mock.customer_vouchers(customer_id).await,
        }
    }

    pub async fn customer_stats(
        &self,
        customer_id: &CustomerId,
    ) -> Result<responses::CustomerStats, ClientError> {
        match self {
            Self::Http(client) => client.customer_stats(customer_id).await,
            Self::Mock(mock) => mock.customer_stats(customer_id).await,
        }
    }

    // Vouchers

    pub async fn list_vouchers(
        &self,
        params: &requests::ListParams,
    ) -> Result<responses::Paginated<responses::Voucher>, ClientError> {
        match self {
            Self::Http(client) => client.list_vouchers(params).await,
            Self::Mock(mock) => mock.list_vouchers(params).await,
        }
    }

    pub async fn create_voucher(
        &self,
        details: &requests::CreateVoucher,
    ) -> Result<responses::Voucher, ClientError> {
        match self {
            Self::Http(client) => client.create_voucher(details).await,
            Self::Mock(mock) => mock.create_voucher(details).await,
        }
    }

    pub async fn bulk_create_vouchers(
        &self,
        details: &requests::BulkCreateVouchers,
    ) -> Result<Vec<responses::Voucher>, ClientError> {
        match self {
            Self::Http(client) => client.bulk_create_vouchers(details).await,
            Self::Mock(mock) => mock.bulk_create_vouchers(details).await,
        }
    }

    pub async fn export_vouchers(
        &self,
        params: &requests::ListParams,
    ) -> Result<FileDownload, ClientError> {
        match self {
            Self::Http(client) => client.export_vouchers(params).await,
            Self::Mock(mock) => mock.export_vouchers(params).await,
        }
    }

    pub async fn print_voucher_qr(
        &self,
        details: &requests::PrintQr,
    ) -> Result<PrintQrOutcome, ClientError> {
        match self {
            Self::Http(client) => client.print_voucher_qr(details).await,
            Self::Mock(mock) => mock.print_voucher_qr(details).await,
        }
    }

    pub async fn get_voucher(
        &self,
        code: &str,
    ) -> Result<responses::Voucher, ClientError> {
        match self {
            Self::Http(client) => client.get_voucher(code).await,
            Self::Mock(mock) => mock.get_voucher(code).await,
        }
    }

    pub async fn use_voucher(
        &self,
        code: &str,
        order_id: &str,
    ) -> Result<responses::Voucher, ClientError> {
        match self {
            Self::Http(client) => client.use_voucher(code, order_id).await,
            Self::Mock(mock) => mock.use_voucher(code, order_id).await,
        }
    }

    pub async fn update_voucher_status(
        &self,
        code: &str,
        new_status: VoucherStatus,
    ) -> Result<responses::Voucher, ClientError> {
        match self {
            Self::Http(client) => {
                client.update_voucher_status(code, new_status).await
            }
            Self::Mock(mock) => {
                mock.update_voucher_status(code, new_status).await
            }
        }
    }

    // Usage logs

    pub async fn list_logs(
        &self,
        params: &requests::ListParams,
    ) -> Result<responses::Paginated<responses::UsageLog>, ClientError> {
        match self {
            Self::Http(client) => client.list_logs(params).await,
            Self::Mock(mock) => mock.list_logs(params).await,
        }
    }

    // Reports

    pub async fn summary_report(
        &self,
    ) -> Result<responses::SummaryReport, ClientError> {
        match self {
            Self::Http(client) => client.summary_report().await,
            Self::Mock(mock) => mock.summary_report().await,
        }
    }

    pub async fn top_customers_report(
        &self,
    ) -> Result<Vec<responses::TopCustomer>, ClientError> {
        match self {
            Self::Http(client) => client.top_customers_report().await,
            Self::Mock(mock) => mock.top_customers_report().await,
        }
    }

    pub async fn revenue_report(
        &self,
    ) -> Result<Vec<responses::RevenuePoint>, ClientError> {
        match self {
            Self::Http(client) => client.revenue_report().await,
            Self::Mock(mock) => mock.revenue_report().await,
        }
    }

    pub async fn zalo_stats_report(
        &self,
    ) -> Result<responses::ZaloStats, ClientError> {
        match self {
            Self::Http(client) => client.zalo_stats_report().await,
            Self::Mock(mock) => mock.zalo_stats_report().await,
        }
    }

    // Orders

    pub async fn list_orders(
        &self,
        params: &requests::ListParams,
    ) -> Result<responses::Paginated<responses::Order>, ClientError> {
        match self {
            Self::Http(client) => client.list_orders(params).await,
            Self::Mock(mock) => mock.list_orders(params).await,
        }
    }

    pub async fn get_order(
        &self,
        order_id: &OrderId,
    ) -> Result<responses::Order, ClientError> {
        match self {
            Self::Http(client) => client.get_order(order_id).await,
            Self::Mock(mock) => mock.get_order(order_id).await,
        }
    }

    pub async fn create_order(
        &self,
        details: &requests::CreateOrder,
    ) -> Result<responses::Order, ClientError> {
        match self {
            Self::Http(client) => client.create_order(details).await,
            Self::Mock(mock) => mock.create_order(details).await,
        }
    }

    pub async fn update_order(
        &self,
        order_id: &OrderId,
        details: &requests::UpdateOrder,
    ) -> Result<responses::Order, ClientError> {
        match self {
            Self::Http(client) => client.update_order(order_id, details).await,
            Self::Mock(mock) => mock.update_order(order_id, details).await,
        }
    }

    pub async fn delete_order(
        &self,
        order_id: &OrderId,
    ) -> Result<(), ClientError> {
        match self {
            Self::Http(client) => client.delete_order(order_id).await,
            Self::Mock(mock) => mock.delete_order(order_id).await,
        }
    }
}

/// A backend resource the generic hooks can be instantiated over.
pub trait Resource: 'static {
    const NAME: &'static str;
    type Record: Clone + PartialEq + Serialize + DeserializeOwned + 'static;
}

/// Capability traits. Each resource module implements exactly the verbs
/// its backend endpoints support, and the hook bounds check the set at
/// compile time.
pub trait ListOp: Resource {
    fn list(
        backend: Backend,
        params: requests::ListParams,
    ) -> LocalBoxFuture<
        'static,
        Result<responses::Paginated<Self::Record>, ClientError>,
    >;
}

pub trait DetailOp: Resource {
    type Id: Clone + PartialEq + Serialize + 'static;

    fn get(
        backend: Backend,
        id: Self::Id,
    ) -> LocalBoxFuture<'static, Result<Self::Record, ClientError>>;
}

pub trait CreateOp: Resource {
    type CreatePayload: Clone + 'static;

    fn create(
        backend: Backend,
        payload: Self::CreatePayload,
    ) -> LocalBoxFuture<'static, Result<Self::Record, ClientError>>;
}

pub trait UpdateOp: DetailOp {
    type UpdatePayload: Clone + 'static;

    fn update(
        backend: Backend,
        id: Self::Id,
        payload: Self::UpdatePayload,
    ) -> LocalBoxFuture<'static, Result<Self::Record, ClientError>>;
}

pub trait DeleteOp: DetailOp {
    fn delete(
        backend: Backend,
        id: Self::Id,
    ) -> LocalBoxFuture<'static, Result<(), ClientError>>;
}

pub trait StatsOp: DetailOp {
    type Stats: Clone + PartialEq + Serialize + DeserializeOwned + 'static;

    fn stats(
        backend: Backend,
        id: Self::Id,
    ) -> LocalBoxFuture<'static, Result<Self::Stats, ClientError>>;
}
