use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::*;

use crate::Route;
use crate::auth;
use crate::state::State;

/// The token is client-held; logging out is clearing it and navigating to
/// the login entry point.
#[hook]
pub fn use_logout() -> Callback<MouseEvent> {
    let (_, dispatch) = use_store::<State>();
    let navigator = use_navigator().unwrap();

    Callback::from(move |_| {
        auth::clear_persisted_auth();
        dispatch.reduce_mut(|state| state.logout());
        navigator.push(&Route::Login);
    })
}
