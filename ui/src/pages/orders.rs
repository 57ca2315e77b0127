use payloads::requests::{CreateOrder, ListParams, UpdateOrder};
use payloads::{CustomerId, OrderId};
use rust_decimal::Decimal;
use std::str::FromStr;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::components::layout::Layout;
use crate::contexts::toast::{Toast, use_toast};
use crate::hooks::{
    MutationState, use_create, use_delete, use_list, use_require_auth,
    use_update,
};
use crate::services::resources::{Customers, Orders};

const ORDER_STATUSES: [&str; 3] = ["pending", "delivered", "cancelled"];

#[derive(Default, Clone, PartialEq)]
struct NewOrderForm {
    code: String,
    customer: String,
    amount: String,
    error: Option<String>,
}

#[function_component]
pub fn OrdersPage() -> Html {
    use_require_auth();

    let orders = use_list::<Orders>(ListParams::default());
    // Customer names for the picker and the table.
    let customers = use_list::<Customers>(ListParams::default());
    let create = use_create::<Orders>();
    let update = use_update::<Orders>();
    let delete = use_delete::<Orders>();
    let toast = use_toast();
    let form = use_state(NewOrderForm::default);

    {
        let toast = toast.clone();
        let form = form.clone();
        use_effect_with(create.state.clone(), move |state| match state {
            MutationState::Success(order) => {
                toast.emit(Toast::success(format!(
                    "Order {} created",
                    order.code
                )));
                form.set(NewOrderForm::default());
            }
            MutationState::Error(message) => {
                toast.emit(Toast::error(message.clone()));
            }
            _ => {}
        });
    }
    {
        let toast = toast.clone();
        use_effect_with(update.state.clone(), move |state| match state {
            MutationState::Success(order) => {
                toast.emit(Toast::success(format!(
                    "Order {} updated",
                    order.code
                )));
            }
            MutationState::Error(message) => {
                toast.emit(Toast::error(message.clone()));
            }
            _ => {}
        });
    }
    {
        let toast = toast.clone();
        use_effect_with(delete.state.clone(), move |state| match state {
            MutationState::Success(_) => {
                toast.emit(Toast::success("Order deleted"));
            }
            MutationState::Error(message) => {
                toast.emit(Toast::error(message.clone()));
            }
            _ => {}
        });
    }

    let customer_name = |id: &CustomerId| -> String {
        customers
            .data
            .as_ref()
            .and_then(|page| {
                page.data
                    .iter()
                    .find(|c| c.id == *id)
                    .map(|c| c.name.clone())
            })
            .unwrap_or_else(|| id.to_string())
    };

    let field = |form: &UseStateHandle<NewOrderForm>,
                 setter: fn(&mut NewOrderForm, String)| {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut form_data = (*form).clone();
            setter(&mut form_data, input.value());
            form.set(form_data);
        })
    };

    let on_customer_pick = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let mut form_data = (*form).clone();
            form_data.customer = select.value();
            form.set(form_data);
        })
    };

    let on_submit = {
        let form = form.clone();
        let submit = create.submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let form_data = (*form).clone();

            if form_data.code.trim().is_empty() {
                let mut new_form = form_data;
                new_form.error = Some("Order code is required".to_string());
                form.set(new_form);
                return;
            }
            let Ok(customer_id) =
                form_data.customer.parse().map(CustomerId)
            else {
                let mut new_form = form_data;
                new_form.error = Some("Pick a customer".to_string());
                form.set(new_form);
                return;
            };
            let Ok(amount) = Decimal::from_str(form_data.amount.trim())
            else {
                let mut new_form = form_data;
                new_form.error = Some("Amount must be a number".to_string());
                form.set(new_form);
                return;
            };

            submit.emit(CreateOrder {
                code: form_data.code.trim().to_string(),
                customer_id,
                amount,
            });
        })
    };

    html! {
        <Layout>
            <h1 class="text-2xl font-bold text-gray-900 mb-6">{"Orders"}</h1>

            <form class="mb-6 p-4 bg-white rounded-md border border-gray-200 grid grid-cols-3 gap-3" onsubmit={on_submit}>
                <input class="px-3 py-2 border border-gray-300 rounded-md"
                    placeholder="Order code"
                    value={form.code.clone()}
                    onchange={field(&form, |f, v| f.code = v)} />
                <select class="px-3 py-2 border border-gray-300 rounded-md"
                    onchange={on_customer_pick} value={form.customer.clone()}>
                    <option value="">{"Select customer"}</option>
                    {customers.data.as_ref().map(|page| page.data.iter().map(|customer| html! {
                        <option value={customer.id.to_string()}>{customer.name.clone()}</option>
                    }).collect::<Html>()).unwrap_or_default()}
                </select>
                <input class="px-3 py-2 border border-gray-300 rounded-md"
                    placeholder="Amount"
                    value={form.amount.clone()}
                    onchange={field(&form, |f, v| f.amount = v)} />
                if let Some(error) = &form.error {
                    <p class="col-span-3 text-sm text-red-600">{error}</p>
                }
                <button
                    type="submit"
                    class="col-span-3 px-4 py-2 rounded-md bg-blue-600 text-white disabled:opacity-50"
                    disabled={create.state.is_pending()}
                >
                    {if create.state.is_pending() { "Saving..." } else { "Create order" }}
                </button>
            </form>

            {orders.render("orders", |page_data, is_loading, error| {
                let update_submit = update.submit.clone();
                let delete_submit = delete.submit.clone();
                html! {
                    <>
                        if is_loading {
                            <p class="text-sm text-gray-400 mb-2">{"Refreshing..."}</p>
                        }
                        if let Some(error) = error {
                            <div class="mb-4 p-3 rounded-md bg-red-50 border border-red-200 text-sm text-red-700">
                                {error}
                            </div>
                        }
                        <div class="bg-white rounded-md border border-gray-200 overflow-hidden">
                            <table class="w-full text-sm">
                                <thead class="bg-gray-50 text-left text-gray-500">
                                    <tr>
                                        <th class="px-4 py-2">{"Code"}</th>
                                        <th class="px-4 py-2">{"Customer"}</th>
                                        <th class="px-4 py-2">{"Amount"}</th>
                                        <th class="px-4 py-2">{"Status"}</th>
                                        <th class="px-4 py-2">{"Actions"}</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {page_data.data.iter().map(|order| {
                                        let on_status = {
                                            let update_submit = update_submit.clone();
                                            let order_id: OrderId = order.id;
                                            Callback::from(move |e: Event| {
                                                let select: HtmlSelectElement = e.target_unchecked_into();
                                                update_submit.emit((
                                                    order_id,
                                                    UpdateOrder {
                                                        status: Some(select.value()),
                                                        ..Default::default()
                                                    },
                                                ));
                                            })
                                        };
                                        let on_delete = {
                                            let delete_submit = delete_submit.clone();
                                            let order_id: OrderId = order.id;
                                            Callback::from(move |_| {
                                                delete_submit.emit(order_id);
                                            })
                                        };
                                        html! {
                                            <tr key={order.id.to_string()} class="border-t border-gray-100">
                                                <td class="px-4 py-2 font-mono">{order.code.clone()}</td>
                                                <td class="px-4 py-2">{customer_name(&order.customer_id)}</td>
                                                <td class="px-4 py-2">{order.amount.to_string()}</td>
                                                <td class="px-4 py-2">
                                                    <select class="px-2 py-1 border border-gray-300 rounded-md"
                                                        onchange={on_status} value={order.status.clone()}>
                                                        {ORDER_STATUSES.iter().map(|status| html! {
                                                            <option value={*status} selected={order.status == *status}>
                                                                {*status}
                                                            </option>
                                                        }).collect::<Html>()}
                                                    </select>
                                                </td>
                                                <td class="px-4 py-2">
                                                    <button class="text-red-600 hover:underline" onclick={on_delete}>
                                                        {"Delete"}
                                                    </button>
                                                </td>
                                            </tr>
                                        }
                                    }).collect::<Html>()}
                                </tbody>
                            </table>
                            if page_data.data.is_empty() {
                                <p class="text-center text-gray-500 py-8">{"No orders"}</p>
                            }
                        </div>
                    </>
                }
            })}
        </Layout>
    }
}
