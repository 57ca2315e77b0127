use payloads::requests::ListParams;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::components::layout::Layout;
use crate::components::pagination::Pagination;
use crate::hooks::{use_list, use_require_auth};
use crate::services::resources::UsageLogs;

const PAGE_SIZE: u32 = 15;

#[function_component]
pub fn LogsPage() -> Html {
    use_require_auth();

    let page = use_state(|| 1u32);
    let search = use_state(String::new);

    let params = ListParams {
        q: (!search.trim().is_empty()).then(|| search.trim().to_string()),
        page: Some(*page),
        page_size: Some(PAGE_SIZE),
        ..Default::default()
    };
    let logs = use_list::<UsageLogs>(params);

    let total_pages = logs
        .data
        .as_ref()
        .map(|p| (p.total as u32).div_ceil(PAGE_SIZE) as usize)
        .unwrap_or(0);

    let on_search = {
        let search = search.clone();
        let page = page.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            search.set(input.value());
            page.set(1);
        })
    };

    html! {
        <Layout>
            <h1 class="text-2xl font-bold text-gray-900 mb-6">{"Usage logs"}</h1>

            <input
                class="w-full px-3 py-2 border border-gray-300 rounded-md mb-4"
                placeholder="Search by voucher code, customer, or order"
                value={(*search).clone()}
                oninput={on_search}
            />

            {logs.render("logs", |page_data, is_loading, error| html! {
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
                                    <th class="px-4 py-2">{"Time"}</th>
                                    <th class="px-4 py-2">{"Voucher"}</th>
                                    <th class="px-4 py-2">{"Customer"}</th>
                                    <th class="px-4 py-2">{"Order"}</th>
                                    <th class="px-4 py-2">{"Action"}</th>
                                    <th class="px-4 py-2">{"Note"}</th>
                                </tr>
                            </thead>
                            <tbody>
                                {page_data.data.iter().map(|log| html! {
                                    <tr key={log.id.to_string()} class="border-t border-gray-100">
                                        <td class="px-4 py-2 text-gray-500">{log.created_at.to_string()}</td>
                                        <td class="px-4 py-2 font-mono">{log.voucher_code.clone()}</td>
                                        <td class="px-4 py-2">{log.customer_name.clone().unwrap_or_default()}</td>
                                        <td class="px-4 py-2">{log.order_id.clone().unwrap_or_default()}</td>
                                        <td class="px-4 py-2">{format!("{:?}", log.action)}</td>
                                        <td class="px-4 py-2">{log.note.clone().unwrap_or_default()}</td>
                                    </tr>
                                }).collect::<Html>()}
                            </tbody>
                        </table>
                        if page_data.data.is_empty() {
                            <p class="text-center text-gray-500 py-8">{"No log entries"}</p>
                        }
                    </div>
                </>
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
