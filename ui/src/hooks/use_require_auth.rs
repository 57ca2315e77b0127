use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::*;

use crate::Route;
use crate::state::{AuthState, State};

/// Redirect to the login page once the session is known to be absent.
/// While the auth state is still `Unknown` the page renders its loading
/// state rather than bouncing.
#[hook]
pub fn use_require_auth() {
    let (state, _) = use_store::<State>();
    let navigator = use_navigator().unwrap();

    use_effect_with(state.auth_state.clone(), move |auth_state| {
        if matches!(auth_state, AuthState::LoggedOut) {
            navigator.push(&Route::Login);
        }
    });
}
