use payloads::requests::LoginCredentials;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::*;

use crate::state::{AuthState, State};
use crate::{Route, auth, get_api_client, mock_mode};

#[derive(Default, Clone, PartialEq)]
struct LoginForm {
    username: String,
    password: String,
    is_loading: bool,
    error: Option<String>,
}

#[function_component]
pub fn LoginPage() -> Html {
    let navigator = use_navigator().unwrap();
    let form = use_state(LoginForm::default);
    let (_, dispatch) = use_store::<State>();

    let on_username_change = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut form_data = (*form).clone();
            form_data.username = input.value();
            form.set(form_data);
        })
    };

    let on_password_change = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut form_data = (*form).clone();
            form_data.password = input.value();
            form.set(form_data);
        })
    };

    let on_submit = {
        let form = form.clone();
        let navigator = navigator.clone();
        let dispatch = dispatch.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let form_data = (*form).clone();
            if form_data.username.is_empty() || form_data.password.is_empty() {
                let mut new_form = form_data;
                new_form.error = Some("Please fill in all fields".to_string());
                form.set(new_form);
                return;
            }

            // Mock mode has no auth backend; establish the demo session.
            if mock_mode() {
                dispatch.reduce_mut(|state| {
                    state.auth_state = AuthState::LoggedIn(
                        crate::services::mock::demo_user(),
                    );
                });
                navigator.push(&Route::Customers);
                return;
            }

            let form = form.clone();
            let navigator = navigator.clone();
            let dispatch = dispatch.clone();

            yew::platform::spawn_local(async move {
                {
                    let mut new_form = (*form).clone();
                    new_form.is_loading = true;
                    new_form.error = None;
                    form.set(new_form);
                }

                let credentials = LoginCredentials {
                    username: (*form).username.clone(),
                    password: (*form).password.clone(),
                };

                let client = get_api_client();
                match client.login(&credentials).await {
                    Ok(token) => {
                        auth::persist_token(&token.access_token);

                        // Re-read the client so the new token is attached.
                        let client = get_api_client();
                        match client.current_user().await {
                            Ok(user) => dispatch.reduce_mut(|state| {
                                state.auth_state = AuthState::LoggedIn(user);
                            }),
                            Err(_) => dispatch.reduce_mut(|state| {
                                state.auth_state = AuthState::LoggedOut;
                            }),
                        }
                        navigator.push(&Route::Customers);
                    }
                    Err(e) => {
                        let mut new_form = (*form).clone();
                        new_form.is_loading = false;
                        new_form.error = Some(format!("Login failed: {}", e));
                        form.set(new_form);
                    }
                }
            });
        })
    };

    html! {
        <main class="min-h-screen flex items-center justify-center bg-gray-50 py-12 px-4">
            <div class="max-w-md w-full space-y-8">
                <h2 class="text-center text-3xl font-extrabold text-gray-900">
                    {"Sign in to Voucher Console"}
                </h2>
                <form class="mt-8 space-y-4" onsubmit={on_submit}>
                    <div>
                        <label for="username" class="sr-only">{"Username"}</label>
                        <input
                            id="username"
                            name="username"
                            type="text"
                            required=true
                            class="block w-full px-3 py-2 border border-gray-300 rounded-md"
                            placeholder="Username"
                            value={form.username.clone()}
                            onchange={on_username_change}
                            disabled={form.is_loading}
                        />
                    </div>
                    <div>
                        <label for="password" class="sr-only">{"Password"}</label>
                        <input
                            id="password"
                            name="password"
                            type="password"
                            required=true
                            class="block w-full px-3 py-2 border border-gray-300 rounded-md"
                            placeholder="Password"
                            value={form.password.clone()}
                            onchange={on_password_change}
                            disabled={form.is_loading}
                        />
                    </div>

                    if let Some(error) = &form.error {
                        <div class="bg-red-50 border border-red-200 text-red-600 px-4 py-3 rounded">
                            {error}
                        </div>
                    }

                    <button
                        type="submit"
                        class="w-full flex justify-center py-2 px-4 rounded-md text-white bg-blue-600 hover:bg-blue-700 disabled:opacity-50"
                        disabled={form.is_loading}
                    >
                        if form.is_loading {
                            {"Signing in..."}
                        } else {
                            {"Sign in"}
                        }
                    </button>
                </form>
            </div>
        </main>
    }
}
