//! Transient notifications. All user-visible failures surface here; none
//! of them are fatal to the app.

use gloo_timers::callback::Timeout;
use std::collections::HashMap;
use uuid::Uuid;
use yew::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub enum ToastKind {
    Error,
    Success,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: Uuid,
    pub message: String,
    pub kind: ToastKind,
    /// Milliseconds until auto-dismiss.
    pub duration: u32,
}

impl Toast {
    fn new(message: String, kind: ToastKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            message,
            kind,
            duration: 5000,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message.into(), ToastKind::Error)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message.into(), ToastKind::Success)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToastState {
    pub toasts: HashMap<Uuid, Toast>,
}

pub enum ToastAction {
    Add(Toast),
    Remove(Uuid),
}

impl Reducible for ToastState {
    type Action = ToastAction;

    fn reduce(
        self: std::rc::Rc<Self>,
        action: Self::Action,
    ) -> std::rc::Rc<Self> {
        let mut toasts = self.toasts.clone();
        match action {
            ToastAction::Add(toast) => {
                toasts.insert(toast.id, toast);
            }
            ToastAction::Remove(id) => {
                toasts.remove(&id);
            }
        }
        std::rc::Rc::new(ToastState { toasts })
    }
}

pub type ToastContext = UseReducerHandle<ToastState>;

/// Shorthand for pushing a toast from a page.
#[hook]
pub fn use_toast() -> Callback<Toast> {
    let context = use_context::<ToastContext>()
        .expect("use_toast outside ToastProvider");
    Callback::from(move |toast: Toast| {
        let id = toast.id;
        let duration = toast.duration;
        context.dispatch(ToastAction::Add(toast));

        let context = context.clone();
        Timeout::new(duration, move || {
            context.dispatch(ToastAction::Remove(id));
        })
        .forget();
    })
}

#[derive(Properties, PartialEq)]
pub struct ToastProviderProps {
    pub children: Children,
}

#[function_component]
pub fn ToastProvider(props: &ToastProviderProps) -> Html {
    let toast_state = use_reducer(ToastState::default);

    html! {
        <ContextProvider<ToastContext> context={toast_state.clone()}>
            {props.children.clone()}
            <div class="fixed bottom-4 right-4 z-50 space-y-2">
                {toast_state.toasts.values().map(|toast| {
                    let class = match toast.kind {
                        ToastKind::Error => {
                            "px-4 py-3 rounded-md shadow bg-red-50 \
                             border border-red-200 text-sm text-red-700"
                        }
                        ToastKind::Success => {
                            "px-4 py-3 rounded-md shadow bg-green-50 \
                             border border-green-200 text-sm text-green-700"
                        }
                    };
                    let dismiss = {
                        let toast_state = toast_state.clone();
                        let id = toast.id;
                        Callback::from(move |_| {
                            toast_state.dispatch(ToastAction::Remove(id));
                        })
                    };
                    html! {
                        <div key={toast.id.to_string()} class={class} onclick={dismiss}>
                            {&toast.message}
                        </div>
                    }
                }).collect::<Html>()}
            </div>
        </ContextProvider<ToastContext>>
    }
}
