use payloads::requests::UpdateCustomer;
use payloads::{CustomerId, CustomerStatus};
use yew::prelude::*;

use crate::components::layout::Layout;
use crate::contexts::toast::{Toast, use_toast};
use crate::hooks::{
    MutationState, use_customer_vouchers, use_detail, use_require_auth,
    use_stats, use_update,
};
use crate::services::resources::Customers;

#[derive(Properties, PartialEq)]
pub struct CustomerDetailProps {
    pub customer_id: CustomerId,
}

#[function_component]
pub fn CustomerDetailPage(props: &CustomerDetailProps) -> Html {
    use_require_auth();

    let customer = use_detail::<Customers>(Some(props.customer_id));
    let stats = use_stats::<Customers>(Some(props.customer_id));
    let vouchers = use_customer_vouchers(props.customer_id);
    let update = use_update::<Customers>();
    let toast = use_toast();

    {
        let toast = toast.clone();
        use_effect_with(update.state.clone(), move |state| match state {
            MutationState::Success(customer) => {
                toast.emit(Toast::success(format!(
                    "Customer {} updated",
                    customer.name
                )));
            }
            MutationState::Error(message) => {
                toast.emit(Toast::error(message.clone()));
            }
            _ => {}
        });
    }

    let toggle_status = {
        let submit = update.submit.clone();
        let customer_id = props.customer_id;
        let current = customer.data.as_ref().map(|c| c.status);
        Callback::from(move |_| {
            let Some(current) = current else { return };
            let next = match current {
                CustomerStatus::Active => CustomerStatus::Inactive,
                CustomerStatus::Inactive => CustomerStatus::Active,
            };
            submit.emit((
                customer_id,
                UpdateCustomer {
                    status: Some(next),
                    ..Default::default()
                },
            ));
        })
    };

    html! {
        <Layout>
            {customer.render("customer", |customer, is_loading, error| html! {
                <>
                    if is_loading {
                        <p class="text-sm text-gray-400 mb-2">{"Refreshing..."}</p>
                    }
                    if let Some(error) = error {
                        <div class="mb-4 p-3 rounded-md bg-red-50 border border-red-200 text-sm text-red-700">
                            {error}
                        </div>
                    }
                    <div class="flex items-center justify-between mb-6">
                        <div>
                            <h1 class="text-2xl font-bold text-gray-900">{customer.name.clone()}</h1>
                            <p class="text-sm text-gray-500">
                                {customer.phone.clone()}
                                {customer.email.as_ref().map(|e| format!(" · {e}")).unwrap_or_default()}
                            </p>
                            if !customer.tags.is_empty() {
                                <p class="text-sm text-gray-500">{format!("Tags: {}", customer.tags.join(", "))}</p>
                            }
                        </div>
                        <button
                            class="px-4 py-2 rounded-md border border-gray-300 hover:bg-gray-100 disabled:opacity-50"
                            disabled={update.state.is_pending()}
                            onclick={toggle_status.clone()}
                        >
                            {match customer.status {
                                CustomerStatus::Active => "Deactivate",
                                CustomerStatus::Inactive => "Activate",
                            }}
                        </button>
                    </div>
                </>
            })}

            if let Some(stats) = &stats.data {
                <div class="grid grid-cols-4 gap-4 mb-6">
                    <StatCard label="Total vouchers" value={stats.total_vouchers.to_string()} />
                    <StatCard label="Active" value={stats.active_vouchers.to_string()} />
                    <StatCard label="Used" value={stats.used_vouchers.to_string()} />
                    <StatCard label="Total discount" value={stats.total_discount.to_string()} />
                </div>
            }

            <h2 class="text-lg font-semibold text-gray-900 mb-3">{"Vouchers"}</h2>
            {vouchers.render("vouchers", |page, _, _| html! {
                <div class="bg-white rounded-md border border-gray-200 overflow-hidden">
                    <table class="w-full text-sm">
                        <thead class="bg-gray-50 text-left text-gray-500">
                            <tr>
                                <th class="px-4 py-2">{"Code"}</th>
                                <th class="px-4 py-2">{"Campaign"}</th>
                                <th class="px-4 py-2">{"Discount"}</th>
                                <th class="px-4 py-2">{"Status"}</th>
                                <th class="px-4 py-2">{"Used at"}</th>
                            </tr>
                        </thead>
                        <tbody>
                            {page.data.iter().map(|voucher| html! {
                                <tr key={voucher.code.clone()} class="border-t border-gray-100">
                                    <td class="px-4 py-2 font-mono">{voucher.code.clone()}</td>
                                    <td class="px-4 py-2">{voucher.campaign.clone().unwrap_or_default()}</td>
                                    <td class="px-4 py-2">{voucher.discount_amount.to_string()}</td>
                                    <td class="px-4 py-2">{voucher.status.to_string()}</td>
                                    <td class="px-4 py-2">
                                        {voucher.used_at.map(|t| t.to_string()).unwrap_or_default()}
                                    </td>
                                </tr>
                            }).collect::<Html>()}
                        </tbody>
                    </table>
                    if page.data.is_empty() {
                        <p class="text-center text-gray-500 py-8">{"No vouchers issued yet"}</p>
                    }
                </div>
            })}
        </Layout>
    }
}

#[derive(Properties, PartialEq)]
struct StatCardProps {
    label: &'static str,
    value: String,
}

#[function_component]
fn StatCard(props: &StatCardProps) -> Html {
    html! {
        <div class="p-4 bg-white rounded-md border border-gray-200">
            <p class="text-sm text-gray-500">{props.label}</p>
            <p class="text-xl font-semibold text-gray-900">{props.value.clone()}</p>
        </div>
    }
}
