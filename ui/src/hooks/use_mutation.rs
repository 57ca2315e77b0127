use futures::future::LocalBoxFuture;
use payloads::ClientError;
use std::rc::Rc;
use yew::prelude::*;
use yewdux::prelude::*;

use crate::services::Backend;
use crate::state::State;
use crate::{auth, get_backend};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum MutationState<T> {
    #[default]
    Idle,
    Pending,
    Success(T),
    Error(String),
}

impl<T> MutationState<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success(data) => Some(data),
            _ => None,
        }
    }
}

pub struct MutationHookReturn<P, T> {
    pub submit: Callback<P>,
    pub state: MutationState<T>,
}

/// Generic mutation wrapper.
///
/// Runs the operation against the configured backend, retrying once on a
/// transport-class failure (nothing certainly reached the backend) and
/// never on 4xx/5xx. On success, every cached List/Stats entry of the
/// resource is invalidated, plus the Detail entry named by
/// `detail_params` when given, before the success state is exposed.
/// Concurrent mutations are allowed; last invalidation wins.
#[hook]
pub fn use_mutation<P, T, F>(
    resource: &'static str,
    detail_params: Option<Rc<dyn Fn(&P) -> String>>,
    run: F,
) -> MutationHookReturn<P, T>
where
    P: Clone + 'static,
    T: Clone + PartialEq + 'static,
    F: Fn(Backend, P) -> LocalBoxFuture<'static, Result<T, ClientError>>
        + 'static,
{
    let (_, dispatch) = use_store::<State>();
    let state = use_state(MutationState::<T>::default);

    let submit = {
        let state = state.clone();
        let run = Rc::new(run);

        use_callback((), move |payload: P, _| {
            let dispatch = dispatch.clone();
            let state = state.clone();
            let run = run.clone();
            let detail_params = detail_params.clone();

            yew::platform::spawn_local(async move {
                state.set(MutationState::Pending);

                let backend = get_backend();
                let outcome = match run(backend.clone(), payload.clone()).await
                {
                    Err(error) if error.is_transport() => {
                        tracing::debug!(
                            "mutation on {resource} hit a transport error \
                             ({error}), retrying once"
                        );
                        run(backend, payload.clone()).await
                    }
                    other => other,
                };

                match outcome {
                    Ok(data) => {
                        let detail =
                            detail_params.as_ref().map(|params| params(&payload));
                        dispatch.reduce_mut(|state| {
                            state
                                .queries
                                .invalidate_resource(resource, detail.as_deref());
                        });
                        state.set(MutationState::Success(data));
                    }
                    Err(error) => {
                        auth::handle_auth_error(&error);
                        state.set(MutationState::Error(error.to_string()));
                    }
                }
            });
        })
    };

    MutationHookReturn {
        submit,
        state: (*state).clone(),
    }
}
