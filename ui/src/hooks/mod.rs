mod crud;
mod use_authentication;
mod use_list_view;
mod use_logout;
mod use_mutation;
mod use_query;
mod use_reports;
mod use_require_auth;

pub use crud::{
    use_create, use_customer_vouchers, use_delete, use_detail, use_list,
    use_stats, use_update,
};
pub use use_authentication::use_authentication;
pub use use_list_view::{
    ALL_FILTER, LIST_PAGE_SIZE, ListViewHandle, ListViewSource, use_list_view,
};
pub use use_logout::use_logout;
pub use use_mutation::{MutationHookReturn, MutationState, use_mutation};
pub use use_query::{QueryHookReturn, use_query};
pub use use_reports::{
    use_revenue_report, use_summary_report, use_top_customers,
    use_zalo_stats,
};
pub use use_require_auth::use_require_auth;
