use yew::prelude::*;

use crate::components::layout::Layout;
use crate::hooks::{
    use_require_auth, use_revenue_report, use_summary_report,
    use_top_customers, use_zalo_stats,
};

#[function_component]
pub fn ReportsPage() -> Html {
    use_require_auth();

    let summary = use_summary_report();
    let top_customers = use_top_customers();
    let revenue = use_revenue_report();
    let zalo = use_zalo_stats();

    html! {
        <Layout>
            <h1 class="text-2xl font-bold text-gray-900 mb-6">{"Reports"}</h1>

            {summary.render("summary", |summary, _, _| html! {
                <div class="grid grid-cols-5 gap-4 mb-8">
                    <ReportCard label="Customers" value={summary.total_customers.to_string()} />
                    <ReportCard label="Vouchers issued" value={summary.total_vouchers.to_string()} />
                    <ReportCard label="Vouchers used" value={summary.used_vouchers.to_string()} />
                    <ReportCard label="Total discount" value={summary.total_discount.to_string()} />
                    <ReportCard
                        label="Usage rate"
                        value={format!("{:.0}%", summary.usage_rate * 100.0)}
                    />
                </div>
            })}

            <div class="grid grid-cols-2 gap-8">
                <section>
                    <h2 class="text-lg font-semibold text-gray-900 mb-3">{"Top customers"}</h2>
                    {top_customers.render("top customers", |top, _, _| html! {
                        <div class="bg-white rounded-md border border-gray-200 overflow-hidden">
                            <table class="w-full text-sm">
                                <thead class="bg-gray-50 text-left text-gray-500">
                                    <tr>
                                        <th class="px-4 py-2">{"Customer"}</th>
                                        <th class="px-4 py-2">{"Vouchers"}</th>
                                        <th class="px-4 py-2">{"Used"}</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {top.iter().map(|entry| html! {
                                        <tr key={entry.customer_id.to_string()} class="border-t border-gray-100">
                                            <td class="px-4 py-2">{entry.name.clone()}</td>
                                            <td class="px-4 py-2">{entry.voucher_count}</td>
                                            <td class="px-4 py-2">{entry.used_count}</td>
                                        </tr>
                                    }).collect::<Html>()}
                                </tbody>
                            </table>
                        </div>
                    })}
                </section>

                <section>
                    <h2 class="text-lg font-semibold text-gray-900 mb-3">{"Monthly discount volume"}</h2>
                    {revenue.render("revenue", |points, _, _| html! {
                        <div class="bg-white rounded-md border border-gray-200 overflow-hidden">
                            <table class="w-full text-sm">
                                <thead class="bg-gray-50 text-left text-gray-500">
                                    <tr>
                                        <th class="px-4 py-2">{"Month"}</th>
                                        <th class="px-4 py-2">{"Discount granted"}</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {points.iter().map(|point| html! {
                                        <tr key={point.month.clone()} class="border-t border-gray-100">
                                            <td class="px-4 py-2">{point.month.clone()}</td>
                                            <td class="px-4 py-2">{point.total.to_string()}</td>
                                        </tr>
                                    }).collect::<Html>()}
                                </tbody>
                            </table>
                        </div>
                    })}

                    <h2 class="text-lg font-semibold text-gray-900 mt-6 mb-3">{"Zalo delivery"}</h2>
                    {zalo.render("Zalo stats", |stats, _, _| html! {
                        <div class="grid grid-cols-3 gap-4">
                            <ReportCard label="Sent" value={stats.sent.to_string()} />
                            <ReportCard label="Delivered" value={stats.delivered.to_string()} />
                            <ReportCard label="Read" value={stats.read.to_string()} />
                        </div>
                    })}
                </section>
            </div>
        </Layout>
    }
}

#[derive(Properties, PartialEq)]
struct ReportCardProps {
    label: &'static str,
    value: String,
}

#[function_component]
fn ReportCard(props: &ReportCardProps) -> Html {
    html! {
        <div class="p-4 bg-white rounded-md border border-gray-200">
            <p class="text-sm text-gray-500">{props.label}</p>
            <p class="text-xl font-semibold text-gray-900">{props.value.clone()}</p>
        </div>
    }
}
