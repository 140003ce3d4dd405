use axum::{Router, routing::{get, post}};

use super::controller::{
    SharedRecords, create_record, create_records, delete_record, get_record, list_records,
    replace_record,
};

/// Routes for one review collection. Mounted once per collection with its own store.
pub fn init_reviews_router<S>(store: SharedRecords) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(list_records).post(create_record))
        .route("/batch", post(create_records))
        .route("/{id}", get(get_record).put(replace_record).delete(delete_record))
        .with_state(store)
}
