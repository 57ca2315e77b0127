use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PaginationProps {
    pub current_page: usize,
    pub total_pages: usize,
    pub on_change: Callback<usize>,
}

#[function_component]
pub fn Pagination(props: &PaginationProps) -> Html {
    if props.total_pages <= 1 {
        return html! {};
    }

    let prev = {
        let on_change = props.on_change.clone();
        let page = props.current_page;
        Callback::from(move |_| on_change.emit(page.saturating_sub(1).max(1)))
    };
    let next = {
        let on_change = props.on_change.clone();
        let page = props.current_page;
        Callback::from(move |_| on_change.emit(page + 1))
    };

    html! {
        <div class="flex items-center justify-between mt-4 text-sm">
            <button
                class="px-3 py-1.5 rounded-md border border-gray-300 \
                       disabled:opacity-50"
                disabled={props.current_page <= 1}
                onclick={prev}
            >
                {"Previous"}
            </button>
            <span class="text-gray-600">
                {format!("Page {} of {}", props.current_page, props.total_pages)}
            </span>
            <button
                class="px-3 py-1.5 rounded-md border border-gray-300 \
                       disabled:opacity-50"
                disabled={props.current_page >= props.total_pages}
                onclick={next}
            >
                {"Next"}
            </button>
        </div>
    }
}
