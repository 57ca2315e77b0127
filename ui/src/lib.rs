pub mod auth;
pub mod components;
pub mod contexts;
pub mod export;
pub mod hooks;
mod logs;
pub mod pages;
pub mod query;
pub mod services;
pub mod state;

use payloads::{APIClient, CustomerId};
use uuid::Uuid;
use yew::prelude::*;
use yew_router::prelude::*;

use contexts::toast::ToastProvider;
use services::Backend;

// Global API client - configurable via environment or same-origin fallback
pub fn get_api_client() -> APIClient {
    // Try environment variable first (set at build time)
    let address = option_env!("BACKEND_URL")
        .map(|url| url.to_string())
        .unwrap_or_else(|| {
            // Fallback to same origin (current setup)
            let window = web_sys::window().unwrap();
            let location = window.location();
            location.origin().unwrap()
        });

    let client = APIClient::new(address);
    match auth::load_token() {
        Some(token) => client.with_token(token),
        None => client,
    }
}

/// Build-time switch for running against the in-memory dataset instead of
/// a live backend.
pub fn mock_mode() -> bool {
    matches!(option_env!("USE_MOCK_DATA"), Some("1") | Some("true"))
}

/// The service strategy every hook goes through. Selected once per call
/// from the build configuration; call sites never branch on it.
pub fn get_backend() -> Backend {
    if mock_mode() {
        Backend::Mock(services::mock::MockApi)
    } else {
        Backend::Http(get_api_client())
    }
}

#[function_component]
pub fn App() -> Html {
    logs::init_logging();
    html! {
        <BrowserRouter>
            <ToastProvider>
                <AppShell />
            </ToastProvider>
        </BrowserRouter>
    }
}

#[function_component]
fn AppShell() -> Html {
    hooks::use_authentication();
    html! {
        <div class="min-h-screen bg-white text-gray-900">
            <Switch<Route> render={switch} />
        </div>
    }
}

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/customers")]
    Customers,
    #[at("/customers/:id")]
    CustomerDetail { id: Uuid },
    #[at("/vouchers")]
    Vouchers,
    #[at("/logs")]
    Logs,
    #[at("/orders")]
    Orders,
    #[at("/reports")]
    Reports,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => html! { <Redirect<Route> to={Route::Customers} /> },
        Route::Login => html! { <pages::LoginPage /> },
        Route::Customers => html! { <pages::CustomersPage /> },
        Route::CustomerDetail { id } => html! {
            <pages::CustomerDetailPage customer_id={CustomerId(id)} />
        },
        Route::Vouchers => html! { <pages::VouchersPage /> },
        Route::Logs => html! { <pages::LogsPage /> },
        Route::Orders => html! { <pages::OrdersPage /> },
        Route::Reports => html! { <pages::ReportsPage /> },
        Route::NotFound => html! { <pages::NotFoundPage /> },
    }
}
