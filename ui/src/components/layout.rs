use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::*;

use crate::Route;
use crate::hooks::use_logout;
use crate::state::State;

#[derive(Properties, PartialEq)]
pub struct LayoutProps {
    pub children: Children,
}

/// Shared page chrome: top navigation plus the content column.
#[function_component]
pub fn Layout(props: &LayoutProps) -> Html {
    let (state, _) = use_store::<State>();
    let logout = use_logout();

    let link_classes = "px-3 py-2 text-sm font-medium text-gray-600 \
                        hover:text-gray-900";

    html! {
        <div class="min-h-screen bg-gray-50">
            <header class="bg-white border-b border-gray-200">
                <div class="max-w-7xl mx-auto px-4 flex items-center justify-between h-14">
                    <nav class="flex items-center space-x-1">
                        <span class="pr-4 font-semibold text-gray-900">
                            {"Voucher Console"}
                        </span>
                        <Link<Route> to={Route::Customers} classes={link_classes}>
                            {"Customers"}
                        </Link<Route>>
                        <Link<Route> to={Route::Vouchers} classes={link_classes}>
                            {"Vouchers"}
                        </Link<Route>>
                        <Link<Route> to={Route::Logs} classes={link_classes}>
                            {"Logs"}
                        </Link<Route>>
                        <Link<Route> to={Route::Orders} classes={link_classes}>
                            {"Orders"}
                        </Link<Route>>
                        <Link<Route> to={Route::Reports} classes={link_classes}>
                            {"Reports"}
                        </Link<Route>>
                    </nav>
                    <div class="flex items-center space-x-3 text-sm text-gray-600">
                        if let Some(user) = state.current_user() {
                            <span>{&user.username}</span>
                        }
                        <button
                            class="px-3 py-1.5 rounded-md border border-gray-300 hover:bg-gray-100"
                            onclick={logout}
                        >
                            {"Sign out"}
                        </button>
                    </div>
                </div>
            </header>
            <main class="max-w-7xl mx-auto px-4 py-8">
                {props.children.clone()}
            </main>
        </div>
    }
}
