use yew::prelude::*;
use yewdux::prelude::*;

use crate::state::{AuthState, State};
use crate::{auth, mock_mode};

/// Restore the persisted session on app mount.
///
/// With a stored token, the profile endpoint decides whether the session
/// is still valid; a 401 there flows through the normal forced-logout
/// path. In mock mode there is no backend to ask, so a demo session is
/// established directly.
#[hook]
pub fn use_authentication() {
    let (state, dispatch) = use_store::<State>();

    use_effect_with((), move |_| {
        if !matches!(state.auth_state, AuthState::Unknown) {
            return;
        }

        if mock_mode() {
            dispatch.reduce_mut(|state| {
                state.auth_state =
                    AuthState::LoggedIn(crate::services::mock::demo_user());
            });
            return;
        }

        match auth::load_token() {
            None => dispatch.reduce_mut(|state| {
                state.auth_state = AuthState::LoggedOut;
            }),
            Some(_) => {
                yew::platform::spawn_local(async move {
                    let client = crate::get_api_client();
                    match client.current_user().await {
                        Ok(user) => dispatch.reduce_mut(|state| {
                            state.auth_state = AuthState::LoggedIn(user);
                        }),
                        Err(error) => {
                            auth::handle_auth_error(&error);
                            dispatch.reduce_mut(|state| state.logout());
                        }
                    }
                });
            }
        }
    });
}
