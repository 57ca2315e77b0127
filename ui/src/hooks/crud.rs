//! Generic CRUD hooks over the service capability traits.
//!
//! A resource that implements `ListOp` gets `use_list::<R>`, one that
//! implements `DeleteOp` gets `use_delete::<R>`, and so on; asking for a
//! hook the resource's backend endpoints don't support is a compile
//! error, not a runtime surprise.

use futures::FutureExt;
use payloads::{CustomerId, responses};
use std::rc::Rc;
use yew::prelude::*;

use super::use_mutation::{MutationHookReturn, use_mutation};
use super::use_query::{QueryHookReturn, use_query};
use crate::query::{QueryKey, stable_json};
use crate::services::{
    CreateOp, DeleteOp, DetailOp, ListOp, StatsOp, UpdateOp,
};

#[hook]
pub fn use_list<R: ListOp>(
    params: payloads::requests::ListParams,
) -> QueryHookReturn<responses::Paginated<R::Record>> {
    let key = QueryKey::list(R::NAME, &params);
    use_query(key, true, move |backend| R::list(backend, params.clone()))
}

/// Disabled (no fetch) while the id is absent.
#[hook]
pub fn use_detail<R: DetailOp>(
    id: Option<R::Id>,
) -> QueryHookReturn<R::Record> {
    let key = QueryKey::detail(R::NAME, &id);
    let enabled = id.is_some();
    use_query(key, enabled, move |backend| match id.clone() {
        Some(id) => R::get(backend, id),
        None => futures::future::ready(Err(payloads::ClientError::Decode(
            "detail query without an id".to_string(),
        )))
        .boxed_local(),
    })
}

#[hook]
pub fn use_stats<R: StatsOp>(id: Option<R::Id>) -> QueryHookReturn<R::Stats> {
    let key = QueryKey::stats(R::NAME, &id);
    let enabled = id.is_some();
    use_query(key, enabled, move |backend| match id.clone() {
        Some(id) => R::stats(backend, id),
        None => futures::future::ready(Err(payloads::ClientError::Decode(
            "stats query without an id".to_string(),
        )))
        .boxed_local(),
    })
}

#[hook]
pub fn use_create<R: CreateOp>()
-> MutationHookReturn<R::CreatePayload, R::Record> {
    use_mutation(R::NAME, None, |backend, payload| {
        R::create(backend, payload)
    })
}

#[hook]
pub fn use_update<R: UpdateOp>()
-> MutationHookReturn<(R::Id, R::UpdatePayload), R::Record> {
    use_mutation(
        R::NAME,
        Some(Rc::new(|(id, _): &(R::Id, R::UpdatePayload)| {
            stable_json(id)
        })),
        |backend, (id, payload)| R::update(backend, id, payload),
    )
}

/// Resolves to the deleted id so callers can react to which row went away.
#[hook]
pub fn use_delete<R: DeleteOp>() -> MutationHookReturn<R::Id, R::Id> {
    use_mutation(
        R::NAME,
        Some(Rc::new(|id: &R::Id| stable_json(id))),
        |backend, id: R::Id| {
            async move {
                R::delete(backend, id.clone()).await?;
                Ok(id)
            }
            .boxed_local()
        },
    )
}

/// Vouchers belonging to one customer. Lives under the `vouchers`
/// resource so voucher mutations invalidate it along with the main list.
#[hook]
pub fn use_customer_vouchers(
    customer_id: CustomerId,
) -> QueryHookReturn<responses::Paginated<responses::Voucher>> {
    let key = QueryKey::list("vouchers", &("customer", customer_id));
    use_query(key, true, move |backend| {
        async move { backend.customer_vouchers(&customer_id).await }
            .boxed_local()
    })
}
