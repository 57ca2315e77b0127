use futures::future::LocalBoxFuture;
use jiff::Timestamp;
use payloads::ClientError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;
use yew::prelude::*;
use yewdux::prelude::*;

use crate::query::{QueryKey, READ_RETRY_LIMIT, retry_delay_ms};
use crate::services::Backend;
use crate::state::State;
use crate::{auth, get_backend};

/// Generic cached-fetch hook return type
pub struct QueryHookReturn<T> {
    pub data: Option<T>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub refetch: Callback<()>,
}

impl<T> QueryHookReturn<T> {
    /// Returns true if this is the initial load (no data yet, currently
    /// loading, and no error).
    pub fn is_initial_loading(&self) -> bool {
        self.is_loading && self.data.is_none() && self.error.is_none()
    }

    /// Render based on query state with contextual loading/error messages.
    ///
    /// - No data + loading: "Loading {context}..."
    /// - No data + error: "Error loading {context}: ..."
    /// - Has data: call the render function with (data, is_loading, error);
    ///   a failed refetch keeps showing the previous data with the error
    ///   alongside.
    pub fn render<F>(&self, context: &str, render_fn: F) -> Html
    where
        F: Fn(&T, bool, Option<&String>) -> Html,
    {
        match &self.data {
            None => {
                if self.is_loading {
                    html! {
                        <div class="text-center py-12">
                            <p class="text-neutral-600 dark:text-neutral-400">
                                {format!("Loading {}...", context)}
                            </p>
                        </div>
                    }
                } else if let Some(error) = &self.error {
                    html! {
                        <div class="p-4 rounded-md bg-red-50 \
                                   dark:bg-red-900/20 border \
                                   border-red-200 dark:border-red-800">
                            <p class="text-sm text-red-700 \
                                      dark:text-red-400">
                                {format!("Error loading {}: {}", context, error)}
                            </p>
                        </div>
                    }
                } else {
                    html! {
                        <div class="text-center py-12">
                            <p class="text-neutral-600 dark:text-neutral-400">
                                {format!("No {} found", context)}
                            </p>
                        </div>
                    }
                }
            }
            Some(data) => render_fn(data, self.is_loading, self.error.as_ref()),
        }
    }
}

async fn sleep_ms(ms: u64) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::TimeoutFuture::new(ms as u32).await;
    #[cfg(not(target_arch = "wasm32"))]
    let _ = ms;
}

/// Generic cached-fetch hook.
///
/// Subscribes to the [`QueryKey`]'s cache slot: data younger than the
/// freshness window is served without a network round-trip, anything else
/// triggers a fetch on mount, key change, window refocus, or network
/// reconnect. Responses are applied through the per-key sequence guard,
/// so a slow response can never clobber a newer one. Retryable failures
/// (transport, 5xx) are retried with capped exponential backoff.
///
/// # Example
///
/// ```ignore
/// #[hook]
/// pub fn use_summary_report() -> QueryHookReturn<responses::SummaryReport> {
///     use_query(
///         QueryKey::stats("reports", &"summary"),
///         true,
///         |backend| async move { backend.summary_report().await }
///             .boxed_local(),
///     )
/// }
/// ```
#[hook]
pub fn use_query<T, F>(
    key: QueryKey,
    enabled: bool,
    fetch: F,
) -> QueryHookReturn<T>
where
    T: Serialize + DeserializeOwned + 'static,
    F: Fn(Backend) -> LocalBoxFuture<'static, Result<T, ClientError>>
        + 'static,
{
    let (state, dispatch) = use_store::<State>();

    let refetch = {
        let dispatch = dispatch.clone();
        let fetch_key = key.clone();
        let fetch = Rc::new(fetch);

        use_callback(key.clone(), move |_, _| {
            let dispatch = dispatch.clone();
            let key = fetch_key.clone();
            let fetch = fetch.clone();

            yew::platform::spawn_local(async move {
                dispatch.reduce_mut(|state| {
                    state.queries.begin_fetch(&key, Timestamp::now());
                });
                // No await between begin_fetch and this read, so the
                // sequence belongs to this request.
                let seq = dispatch.get().queries.issued_seq(&key);

                let backend = get_backend();
                let mut attempt = 0;
                let outcome = loop {
                    match fetch(backend.clone()).await {
                        Ok(data) => break Ok(data),
                        Err(error)
                            if attempt < READ_RETRY_LIMIT
                                && error.is_retryable_read() =>
                        {
                            tracing::debug!(
                                "fetch for {} failed ({error}), retrying",
                                key.resource
                            );
                            sleep_ms(retry_delay_ms(attempt)).await;
                            attempt += 1;
                        }
                        Err(error) => break Err(error),
                    }
                };

                let result = match outcome {
                    Ok(data) => serde_json::to_value(&data)
                        .map_err(|e| e.to_string()),
                    Err(error) => {
                        auth::handle_auth_error(&error);
                        Err(error.to_string())
                    }
                };

                dispatch.reduce_mut(|state| {
                    state.queries.complete_fetch(
                        &key,
                        seq,
                        result,
                        Timestamp::now(),
                    );
                });
            });
        })
    };

    // Subscribe on mount and whenever the key changes or the slot goes
    // stale: refresh activity, collect expired entries, and fetch unless
    // the cached data is still fresh.
    {
        let dispatch = dispatch.clone();
        let refetch = refetch.clone();
        let stale = state.queries.is_stale(&key);
        // Re-subscribe when the slot was evicted out from under a
        // still-mounted consumer.
        let missing = state.queries.entry(&key).is_none();

        use_effect_with(
            (key.clone(), enabled, stale, missing),
            move |(key, enabled, _, _)| {
                let now = Timestamp::now();
                dispatch.reduce_mut(|state| {
                    state.queries.gc(now);
                    state.queries.touch(key, now);
                });
                if *enabled && dispatch.get().queries.needs_fetch(key, now) {
                    refetch.emit(());
                }
            },
        );
    }

    // Refetch on window refocus and network reconnect, freshness
    // permitting.
    {
        let dispatch = dispatch.clone();
        let refetch = refetch.clone();

        use_effect_with((key.clone(), enabled), move |(key, enabled)| {
            let key = key.clone();
            let enabled = *enabled;
            let closure = Closure::wrap(Box::new(move |_: web_sys::Event| {
                if enabled
                    && dispatch
                        .get()
                        .queries
                        .needs_fetch(&key, Timestamp::now())
                {
                    refetch.emit(());
                }
            })
                as Box<dyn FnMut(web_sys::Event)>);

            let window = web_sys::window().expect("window");
            for event in ["focus", "online"] {
                window
                    .add_event_listener_with_callback(
                        event,
                        closure.as_ref().unchecked_ref(),
                    )
                    .expect("event listener");
            }

            // Rust retains ownership of the closure; JS only holds a
            // pointer into it.
            move || {
                for event in ["focus", "online"] {
                    let _ = window.remove_event_listener_with_callback(
                        event,
                        closure.as_ref().unchecked_ref(),
                    );
                }
                drop(closure);
            }
        });
    }

    let data: Option<T> = state
        .queries
        .data(&key)
        .cloned()
        .and_then(|value| serde_json::from_value(value).ok());
    let error = state.queries.error(&key).map(str::to_string);
    let is_loading = state.queries.is_loading(&key);

    // Consider it "loading" if actively fetching OR in the initial state
    // with nothing to show yet.
    let effective_is_loading =
        is_loading || (enabled && data.is_none() && error.is_none());

    QueryHookReturn {
        data,
        is_loading: effective_is_loading,
        error,
        refetch: Callback::from(move |_| refetch.emit(())),
    }
}
