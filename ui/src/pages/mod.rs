mod customer_detail;
mod customers;
mod login;
mod logs;
mod not_found;
mod orders;
mod reports;
mod vouchers;

pub use customer_detail::CustomerDetailPage;
pub use customers::CustomersPage;
pub use login::LoginPage;
pub use logs::LogsPage;
pub use not_found::NotFoundPage;
pub use orders::OrdersPage;
pub use reports::ReportsPage;
pub use vouchers::VouchersPage;
