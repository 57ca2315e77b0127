use futures::FutureExt;
use payloads::VoucherStatus;
use payloads::api_client::PrintQrOutcome;
use payloads::requests::{
    BulkCreateVouchers, CreateVoucher, ListParams, PrintQr,
};
use rust_decimal::Decimal;
use std::rc::Rc;
use std::str::FromStr;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::components::layout::Layout;
use crate::components::pagination::Pagination;
use crate::contexts::toast::{Toast, use_toast};
use crate::export::{download::trigger_download, qr_pdf};
use crate::hooks::{
    MutationState, use_create, use_detail, use_list, use_mutation,
    use_require_auth,
};
use crate::query::stable_json;
use crate::services::resources::Vouchers;
use crate::get_backend;

const PAGE_SIZE: u32 = 10;

#[derive(Default, Clone, PartialEq)]
struct BulkForm {
    quantity: String,
    prefix: String,
    campaign: String,
    discount: String,
    error: Option<String>,
}

/// Vouchers are paginated server-side; the page index and search text
/// feed straight into the query key.
#[function_component]
pub fn VouchersPage() -> Html {
    use_require_auth();

    let page = use_state(|| 1u32);
    let search = use_state(String::new);
    let order_id = use_state(String::new);
    let show_bulk = use_state(|| false);
    let lookup_input = use_state(String::new);
    // No fetch runs until a code is submitted.
    let lookup_code = use_state(|| None::<String>);
    let toast = use_toast();

    let params = ListParams {
        q: (!search.trim().is_empty()).then(|| search.trim().to_string()),
        page: Some(*page),
        page_size: Some(PAGE_SIZE),
        ..Default::default()
    };
    let vouchers = use_list::<Vouchers>(params.clone());
    let lookup = use_detail::<Vouchers>((*lookup_code).clone());
    let create = use_create::<Vouchers>();

    let bulk = use_mutation(
        "vouchers",
        None,
        |backend, payload: BulkCreateVouchers| {
            async move { backend.bulk_create_vouchers(&payload).await }
                .boxed_local()
        },
    );

    let redeem = use_mutation(
        "vouchers",
        Some(Rc::new(|(code, _): &(String, String)| stable_json(code))),
        |backend, (code, order_id): (String, String)| {
            async move { backend.use_voucher(&code, &order_id).await }
                .boxed_local()
        },
    );

    let toggle_status = use_mutation(
        "vouchers",
        Some(Rc::new(|(code, _): &(String, VoucherStatus)| {
            stable_json(code)
        })),
        |backend, (code, status): (String, VoucherStatus)| {
            async move { backend.update_voucher_status(&code, status).await }
                .boxed_local()
        },
    );

    {
        let toast = toast.clone();
        let show_bulk = show_bulk.clone();
        use_effect_with(bulk.state.clone(), move |state| match state {
            MutationState::Success(vouchers) => {
                toast.emit(Toast::success(format!(
                    "{} vouchers created",
                    vouchers.len()
                )));
                show_bulk.set(false);
            }
            MutationState::Error(message) => {
                toast.emit(Toast::error(message.clone()));
            }
            _ => {}
        });
    }
    {
        let toast = toast.clone();
        use_effect_with(create.state.clone(), move |state| match state {
            MutationState::Success(voucher) => {
                toast.emit(Toast::success(format!(
                    "Voucher {} created",
                    voucher.code
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
        use_effect_with(redeem.state.clone(), move |state| match state {
            MutationState::Success(voucher) => {
                toast.emit(Toast::success(format!(
                    "Voucher {} redeemed",
                    voucher.code
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
        use_effect_with(toggle_status.state.clone(), move |state| match state {
            MutationState::Success(voucher) => {
                toast.emit(Toast::success(format!(
                    "Voucher {} is now {}",
                    voucher.code, voucher.status
                )));
            }
            MutationState::Error(message) => {
                toast.emit(Toast::error(message.clone()));
            }
            _ => {}
        });
    }

    let on_search = {
        let search = search.clone();
        let page = page.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            search.set(input.value());
            page.set(1);
        })
    };

    let on_export = {
        let params = params.clone();
        let toast = toast.clone();
        Callback::from(move |_| {
            let params = params.clone();
            let toast = toast.clone();
            yew::platform::spawn_local(async move {
                match get_backend().export_vouchers(&params).await {
                    Ok(file) => trigger_download(
                        &file.filename,
                        &file.content_type,
                        &file.bytes,
                    ),
                    Err(error) => {
                        toast.emit(Toast::error(error.to_string()));
                    }
                }
            });
        })
    };

    let on_print = {
        let codes: Vec<String> = vouchers
            .data
            .as_ref()
            .map(|page| page.data.iter().map(|v| v.code.clone()).collect())
            .unwrap_or_default();
        let toast = toast.clone();
        Callback::from(move |_| {
            let codes = codes.clone();
            let toast = toast.clone();
            if codes.is_empty() {
                toast.emit(Toast::error("No vouchers to print"));
                return;
            }
            yew::platform::spawn_local(async move {
                let outcome =
                    get_backend().print_voucher_qr(&PrintQr { codes }).await;
                match outcome {
                    // Backend produced a finished PDF.
                    Ok(PrintQrOutcome::Pdf(file)) => trigger_download(
                        &file.filename,
                        &file.content_type,
                        &file.bytes,
                    ),
                    // JSON payload under a binary content type: render the
                    // sheet locally instead of failing to decode.
                    Ok(PrintQrOutcome::Payload(entries)) => {
                        match qr_pdf::qr_sheet_pdf(&entries) {
                            Ok(bytes) => trigger_download(
                                "voucher_qr_codes.pdf",
                                "application/pdf",
                                &bytes,
                            ),
                            Err(error) => {
                                toast.emit(Toast::error(error.to_string()));
                            }
                        }
                    }
                    Err(error) => {
                        toast.emit(Toast::error(error.to_string()));
                    }
                }
            });
        })
    };

    let total_pages = vouchers
        .data
        .as_ref()
        .map(|p| (p.total as u32).div_ceil(PAGE_SIZE) as usize)
        .unwrap_or(0);

    html! {
        <Layout>
            <div class="flex items-center justify-between mb-6">
                <h1 class="text-2xl font-bold text-gray-900">{"Vouchers"}</h1>
                <div class="space-x-2">
                    <button class="px-4 py-2 rounded-md border border-gray-300 hover:bg-gray-100"
                        onclick={on_export}>
                        {"Export CSV"}
                    </button>
                    <button class="px-4 py-2 rounded-md border border-gray-300 hover:bg-gray-100"
                        onclick={on_print}>
                        {"Print QR"}
                    </button>
                    <button class="px-4 py-2 rounded-md bg-blue-600 text-white hover:bg-blue-700"
                        onclick={
                            let show_bulk = show_bulk.clone();
                            Callback::from(move |_| show_bulk.set(!*show_bulk))
                        }>
                        {if *show_bulk { "Cancel" } else { "Bulk create" }}
                    </button>
                </div>
            </div>

            if *show_bulk {
                <VoucherCreateForms
                    create={create.submit.clone()}
                    create_pending={create.state.is_pending()}
                    bulk={bulk.submit.clone()}
                    bulk_pending={bulk.state.is_pending()}
                />
            }

            <div class="flex items-center space-x-3 mb-4">
                <input
                    class="flex-1 px-3 py-2 border border-gray-300 rounded-md"
                    placeholder="Search by code or campaign"
                    value={(*search).clone()}
                    oninput={on_search}
                />
                <input
                    class="w-56 px-3 py-2 border border-gray-300 rounded-md"
                    placeholder="Order ID for redemption"
                    value={(*order_id).clone()}
                    oninput={
                        let order_id = order_id.clone();
                        Callback::from(move |e: InputEvent| {
                            let input: HtmlInputElement = e.target_unchecked_into();
                            order_id.set(input.value());
                        })
                    }
                />
                <input
                    class="w-48 px-3 py-2 border border-gray-300 rounded-md"
                    placeholder="Look up a code"
                    value={(*lookup_input).clone()}
                    oninput={
                        let lookup_input = lookup_input.clone();
                        Callback::from(move |e: InputEvent| {
                            let input: HtmlInputElement = e.target_unchecked_into();
                            lookup_input.set(input.value());
                        })
                    }
                />
                <button
                    class="px-3 py-2 rounded-md border border-gray-300 hover:bg-gray-100"
                    onclick={
                        let lookup_input = lookup_input.clone();
                        let lookup_code = lookup_code.clone();
                        Callback::from(move |_| {
                            let code = lookup_input.trim().to_string();
                            lookup_code.set((!code.is_empty()).then_some(code));
                        })
                    }
                >
                    {"Look up"}
                </button>
            </div>

            if lookup_code.is_some() {
                if let Some(voucher) = &lookup.data {
                    <div class="mb-4 p-3 rounded-md bg-blue-50 border border-blue-200 text-sm text-blue-900">
                        {format!(
                            "{}: {} · discount {} · campaign {}",
                            voucher.code,
                            voucher.status,
                            voucher.discount_amount,
                            voucher.campaign.as_deref().unwrap_or("-"),
                        )}
                    </div>
                } else if let Some(error) = &lookup.error {
                    <div class="mb-4 p-3 rounded-md bg-red-50 border border-red-200 text-sm text-red-700">
                        {error.clone()}
                    </div>
                } else if lookup.is_loading {
                    <p class="mb-4 text-sm text-gray-400">{"Looking up voucher..."}</p>
                }
            }

            {vouchers.render("vouchers", |page_data, is_loading, error| {
                let redeem_submit = redeem.submit.clone();
                let toggle_submit = toggle_status.submit.clone();
                let order_id = (*order_id).clone();
                let toast = toast.clone();
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
                                        <th class="px-4 py-2">{"Campaign"}</th>
                                        <th class="px-4 py-2">{"Discount"}</th>
                                        <th class="px-4 py-2">{"Status"}</th>
                                        <th class="px-4 py-2">{"Order"}</th>
                                        <th class="px-4 py-2">{"Actions"}</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {page_data.data.iter().map(|voucher| {
                                        let code = voucher.code.clone();
                                        let on_redeem = {
                                            let redeem_submit = redeem_submit.clone();
                                            let toast = toast.clone();
                                            let order_id = order_id.clone();
                                            let code = code.clone();
                                            Callback::from(move |_| {
                                                if order_id.trim().is_empty() {
                                                    toast.emit(Toast::error(
                                                        "Enter an order ID before redeeming",
                                                    ));
                                                    return;
                                                }
                                                redeem_submit.emit((
                                                    code.clone(),
                                                    order_id.trim().to_string(),
                                                ));
                                            })
                                        };
                                        let on_toggle = {
                                            let toggle_submit = toggle_submit.clone();
                                            let code = code.clone();
                                            let next = match voucher.status {
                                                VoucherStatus::Disabled => VoucherStatus::Active,
                                                _ => VoucherStatus::Disabled,
                                            };
                                            Callback::from(move |_| {
                                                toggle_submit.emit((code.clone(), next));
                                            })
                                        };
                                        html! {
                                            <tr key={voucher.code.clone()} class="border-t border-gray-100">
                                                <td class="px-4 py-2 font-mono">{voucher.code.clone()}</td>
                                                <td class="px-4 py-2">{voucher.campaign.clone().unwrap_or_default()}</td>
                                                <td class="px-4 py-2">{voucher.discount_amount.to_string()}</td>
                                                <td class="px-4 py-2">{voucher.status.to_string()}</td>
                                                <td class="px-4 py-2">{voucher.order_id.clone().unwrap_or_default()}</td>
                                                <td class="px-4 py-2 space-x-2">
                                                    if voucher.status == VoucherStatus::Active {
                                                        <button class="text-blue-600 hover:underline" onclick={on_redeem}>
                                                            {"Redeem"}
                                                        </button>
                                                    }
                                                    if voucher.status != VoucherStatus::Used {
                                                        <button class="text-gray-600 hover:underline" onclick={on_toggle}>
                                                            {match voucher.status {
                                                                VoucherStatus::Disabled => "Enable",
                                                                _ => "Disable",
                                                            }}
                                                        </button>
                                                    }
                                                </td>
                                            </tr>
                                        }
                                    }).collect::<Html>()}
                                </tbody>
                            </table>
                            if page_data.data.is_empty() {
                                <p class="text-center text-gray-500 py-8">{"No vouchers found"}</p>
                            }
                        </div>
                    </>
                }
            })}

            <Pagination
                current_page={*page as usize}
                total_pages={total_pages}
                on_change={
                    let page = page.clone();
                    Callback::from(move |next: usize| page.set(next as u32))
                }
            />
        </Layout>
    }
}

#[derive(Properties, PartialEq)]
struct VoucherCreateFormsProps {
    create: Callback<CreateVoucher>,
    create_pending: bool,
    bulk: Callback<BulkCreateVouchers>,
    bulk_pending: bool,
}

#[derive(Default, Clone, PartialEq)]
struct SingleForm {
    code: String,
    campaign: String,
    discount: String,
    error: Option<String>,
}

#[function_component]
fn VoucherCreateForms(props: &VoucherCreateFormsProps) -> Html {
    let single = use_state(SingleForm::default);
    let form = use_state(BulkForm::default);

    let single_field = |form: &UseStateHandle<SingleForm>,
                        setter: fn(&mut SingleForm, String)| {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut form_data = (*form).clone();
            setter(&mut form_data, input.value());
            form.set(form_data);
        })
    };

    let on_single_submit = {
        let single = single.clone();
        let submit = props.create.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let form_data = (*single).clone();
            let Ok(discount) = Decimal::from_str(form_data.discount.trim())
            else {
                let mut new_form = form_data;
                new_form.error =
                    Some("Discount must be an amount".to_string());
                single.set(new_form);
                return;
            };
            submit.emit(CreateVoucher {
                code: (!form_data.code.trim().is_empty())
                    .then(|| form_data.code.trim().to_string()),
                customer_id: None,
                campaign: (!form_data.campaign.trim().is_empty())
                    .then(|| form_data.campaign.trim().to_string()),
                discount_amount: discount,
                expires_at: None,
            });
        })
    };

    let field = |form: &UseStateHandle<BulkForm>,
                 setter: fn(&mut BulkForm, String)| {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut form_data = (*form).clone();
            setter(&mut form_data, input.value());
            form.set(form_data);
        })
    };

    let on_submit = {
        let form = form.clone();
        let submit = props.bulk.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let form_data = (*form).clone();

            let Ok(quantity) = form_data.quantity.trim().parse::<u32>()
            else {
                let mut new_form = form_data;
                new_form.error = Some("Quantity must be a number".to_string());
                form.set(new_form);
                return;
            };
            let Ok(discount) = Decimal::from_str(form_data.discount.trim())
            else {
                let mut new_form = form_data;
                new_form.error =
                    Some("Discount must be an amount".to_string());
                form.set(new_form);
                return;
            };
            if quantity == 0 {
                let mut new_form = form_data;
                new_form.error =
                    Some("Quantity must be positive".to_string());
                form.set(new_form);
                return;
            }

            submit.emit(BulkCreateVouchers {
                quantity,
                prefix: (!form_data.prefix.trim().is_empty())
                    .then(|| form_data.prefix.trim().to_string()),
                campaign: (!form_data.campaign.trim().is_empty())
                    .then(|| form_data.campaign.trim().to_string()),
                discount_amount: discount,
                customer_ids: Vec::new(),
                expires_at: None,
            });
        })
    };

    html! {
        <div class="mb-6 space-y-4">
            <form class="p-4 bg-white rounded-md border border-gray-200 grid grid-cols-3 gap-3" onsubmit={on_single_submit}>
                <input class="px-3 py-2 border border-gray-300 rounded-md"
                    placeholder="Code (blank = generated)"
                    value={single.code.clone()}
                    onchange={single_field(&single, |f, v| f.code = v)} />
                <input class="px-3 py-2 border border-gray-300 rounded-md"
                    placeholder="Campaign (optional)"
                    value={single.campaign.clone()}
                    onchange={single_field(&single, |f, v| f.campaign = v)} />
                <input class="px-3 py-2 border border-gray-300 rounded-md"
                    placeholder="Discount amount"
                    value={single.discount.clone()}
                    onchange={single_field(&single, |f, v| f.discount = v)} />
                if let Some(error) = &single.error {
                    <p class="col-span-3 text-sm text-red-600">{error}</p>
                }
                <button
                    type="submit"
                    class="col-span-3 px-4 py-2 rounded-md bg-blue-600 text-white disabled:opacity-50"
                    disabled={props.create_pending}
                >
                    {if props.create_pending { "Creating..." } else { "Create one voucher" }}
                </button>
            </form>

            <form class="p-4 bg-white rounded-md border border-gray-200 grid grid-cols-4 gap-3" onsubmit={on_submit}>
                <input class="px-3 py-2 border border-gray-300 rounded-md"
                    placeholder="Quantity"
                    value={form.quantity.clone()}
                    onchange={field(&form, |f, v| f.quantity = v)} />
                <input class="px-3 py-2 border border-gray-300 rounded-md"
                    placeholder="Code prefix (optional)"
                    value={form.prefix.clone()}
                    onchange={field(&form, |f, v| f.prefix = v)} />
                <input class="px-3 py-2 border border-gray-300 rounded-md"
                    placeholder="Campaign (optional)"
                    value={form.campaign.clone()}
                    onchange={field(&form, |f, v| f.campaign = v)} />
                <input class="px-3 py-2 border border-gray-300 rounded-md"
                    placeholder="Discount amount"
                    value={form.discount.clone()}
                    onchange={field(&form, |f, v| f.discount = v)} />
                if let Some(error) = &form.error {
                    <p class="col-span-4 text-sm text-red-600">{error}</p>
                }
                <button
                    type="submit"
                    class="col-span-4 px-4 py-2 rounded-md bg-blue-600 text-white disabled:opacity-50"
                    disabled={props.bulk_pending}
                >
                    {if props.bulk_pending { "Creating..." } else { "Create vouchers" }}
                </button>
            </form>
        </div>
    }
}
