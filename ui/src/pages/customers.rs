use payloads::requests::{CreateCustomer, ListParams};
use payloads::responses;
use std::collections::BTreeSet;
use std::rc::Rc;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;
use crate::components::layout::Layout;
use crate::components::pagination::Pagination;
use crate::contexts::toast::{Toast, use_toast};
use crate::hooks::{
    ALL_FILTER, ListViewSource, MutationState, use_create, use_list,
    use_list_view, use_require_auth,
};
use crate::services::resources::Customers;

#[derive(Default, Clone, PartialEq)]
struct NewCustomerForm {
    name: String,
    phone: String,
    email: String,
    tags: String,
    error: Option<String>,
}

/// The customer list is small enough to keep entirely in memory, so the
/// page fetches it once and filters/paginates client-side.
#[function_component]
pub fn CustomersPage() -> Html {
    use_require_auth();

    let customers = use_list::<Customers>(ListParams::default());
    let create = use_create::<Customers>();
    let toast = use_toast();

    let items: Rc<Vec<responses::Customer>> = Rc::new(
        customers
            .data
            .as_ref()
            .map(|page| page.data.clone())
            .unwrap_or_default(),
    );

    let view = use_list_view(
        items.clone(),
        ListViewSource {
            search_text: Rc::new(|c: &responses::Customer| {
                format!(
                    "{}\n{}\n{}",
                    c.name,
                    c.phone,
                    c.email.as_deref().unwrap_or_default()
                )
            }),
            status_of: Rc::new(|c: &responses::Customer| {
                c.status.to_string()
            }),
            tags_of: Rc::new(|c: &responses::Customer| c.tags.clone()),
        },
    );

    let form = use_state(NewCustomerForm::default);
    let show_form = use_state(|| false);

    // Mutation outcome -> toast, and a clean form on success.
    {
        let toast = toast.clone();
        let form = form.clone();
        let show_form = show_form.clone();
        use_effect_with(create.state.clone(), move |state| match state {
            MutationState::Success(customer) => {
                toast.emit(Toast::success(format!(
                    "Customer {} created",
                    customer.name
                )));
                form.set(NewCustomerForm::default());
                show_form.set(false);
            }
            MutationState::Error(message) => {
                toast.emit(Toast::error(message.clone()));
            }
            _ => {}
        });
    }

    let all_tags: BTreeSet<String> = items
        .iter()
        .flat_map(|customer| customer.tags.iter().cloned())
        .collect();

    let on_query = {
        let set_query = view.set_query.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            set_query.emit(input.value());
        })
    };
    let on_status = {
        let set_status = view.set_status_filter.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            set_status.emit(select.value());
        })
    };
    let on_tag = {
        let set_tag = view.set_tag_filter.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            set_tag.emit(select.value());
        })
    };

    let on_submit = {
        let form = form.clone();
        let submit = create.submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let form_data = (*form).clone();
            if form_data.name.trim().is_empty()
                || form_data.phone.trim().is_empty()
            {
                let mut new_form = form_data;
                new_form.error =
                    Some("Name and phone are required".to_string());
                form.set(new_form);
                return;
            }
            submit.emit(CreateCustomer {
                name: form_data.name.trim().to_string(),
                phone: form_data.phone.trim().to_string(),
                email: (!form_data.email.trim().is_empty())
                    .then(|| form_data.email.trim().to_string()),
                address: None,
                tags: form_data
                    .tags
                    .split(',')
                    .map(str::trim)
                    .filter(|tag| !tag.is_empty())
                    .map(str::to_string)
                    .collect(),
                zalo_id: None,
            });
        })
    };

    let field = |form: &UseStateHandle<NewCustomerForm>,
                 setter: fn(&mut NewCustomerForm, String)| {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut form_data = (*form).clone();
            setter(&mut form_data, input.value());
            form.set(form_data);
        })
    };

    html! {
        <Layout>
            <div class="flex items-center justify-between mb-6">
                <h1 class="text-2xl font-bold text-gray-900">{"Customers"}</h1>
                <button
                    class="px-4 py-2 rounded-md bg-blue-600 text-white hover:bg-blue-700"
                    onclick={
                        let show_form = show_form.clone();
                        Callback::from(move |_| show_form.set(!*show_form))
                    }
                >
                    {if *show_form { "Cancel" } else { "New customer" }}
                </button>
            </div>

            if *show_form {
                <form class="mb-6 p-4 bg-white rounded-md border border-gray-200 grid grid-cols-2 gap-3" onsubmit={on_submit}>
                    <input class="px-3 py-2 border border-gray-300 rounded-md"
                        placeholder="Name"
                        value={form.name.clone()}
                        onchange={field(&form, |f, v| f.name = v)} />
                    <input class="px-3 py-2 border border-gray-300 rounded-md"
                        placeholder="Phone"
                        value={form.phone.clone()}
                        onchange={field(&form, |f, v| f.phone = v)} />
                    <input class="px-3 py-2 border border-gray-300 rounded-md"
                        placeholder="Email (optional)"
                        value={form.email.clone()}
                        onchange={field(&form, |f, v| f.email = v)} />
                    <input class="px-3 py-2 border border-gray-300 rounded-md"
                        placeholder="Tags, comma separated"
                        value={form.tags.clone()}
                        onchange={field(&form, |f, v| f.tags = v)} />
                    if let Some(error) = &form.error {
                        <p class="col-span-2 text-sm text-red-600">{error}</p>
                    }
                    <button
                        type="submit"
                        class="col-span-2 px-4 py-2 rounded-md bg-blue-600 text-white disabled:opacity-50"
                        disabled={create.state.is_pending()}
                    >
                        {if create.state.is_pending() { "Saving..." } else { "Save customer" }}
                    </button>
                </form>
            }

            <div class="flex items-center space-x-3 mb-4">
                <input
                    class="flex-1 px-3 py-2 border border-gray-300 rounded-md"
                    placeholder="Search by name, phone, or email"
                    value={view.query.clone()}
                    oninput={on_query}
                />
                <select class="px-3 py-2 border border-gray-300 rounded-md"
                    onchange={on_status} value={view.status_filter.clone()}>
                    <option value={ALL_FILTER}>{"All statuses"}</option>
                    <option value="active">{"Active"}</option>
                    <option value="inactive">{"Inactive"}</option>
                </select>
                <select class="px-3 py-2 border border-gray-300 rounded-md"
                    onchange={on_tag} value={view.tag_filter.clone()}>
                    <option value={ALL_FILTER}>{"All tags"}</option>
                    {all_tags.iter().map(|tag| html! {
                        <option value={tag.clone()}>{tag.clone()}</option>
                    }).collect::<Html>()}
                </select>
                if view.has_active_filters {
                    <button
                        class="px-3 py-2 text-sm text-gray-600 hover:text-gray-900"
                        onclick={view.reset_filters.reform(|_| ())}
                    >
                        {"Reset"}
                    </button>
                }
            </div>

            if customers.is_initial_loading() {
                <p class="text-gray-500 py-12 text-center">{"Loading customers..."}</p>
            } else if let Some(error) = &customers.error {
                <div class="p-4 rounded-md bg-red-50 border border-red-200 text-sm text-red-700">
                    {format!("Error loading customers: {error}")}
                </div>
            } else {
                <div class="bg-white rounded-md border border-gray-200 overflow-hidden">
                    <table class="w-full text-sm">
                        <thead class="bg-gray-50 text-left text-gray-500">
                            <tr>
                                <th class="px-4 py-2">{"Name"}</th>
                                <th class="px-4 py-2">{"Phone"}</th>
                                <th class="px-4 py-2">{"Email"}</th>
                                <th class="px-4 py-2">{"Tags"}</th>
                                <th class="px-4 py-2">{"Status"}</th>
                            </tr>
                        </thead>
                        <tbody>
                            {view.paginated_items.iter().map(|customer| html! {
                                <tr key={customer.id.to_string()} class="border-t border-gray-100 hover:bg-gray-50">
                                    <td class="px-4 py-2">
                                        <Link<Route>
                                            to={Route::CustomerDetail { id: customer.id.0 }}
                                            classes="text-blue-600 hover:underline"
                                        >
                                            {customer.name.clone()}
                                        </Link<Route>>
                                    </td>
                                    <td class="px-4 py-2">{customer.phone.clone()}</td>
                                    <td class="px-4 py-2">{customer.email.clone().unwrap_or_default()}</td>
                                    <td class="px-4 py-2">{customer.tags.join(", ")}</td>
                                    <td class="px-4 py-2">{customer.status.to_string()}</td>
                                </tr>
                            }).collect::<Html>()}
                        </tbody>
                    </table>
                    if view.filtered_items.is_empty() {
                        <p class="text-center text-gray-500 py-8">{"No customers match the current filters"}</p>
                    }
                </div>
                <Pagination
                    current_page={view.current_page}
                    total_pages={view.total_pages}
                    on_change={view.set_current_page.clone()}
                />
            }
        </Layout>
    }
}
