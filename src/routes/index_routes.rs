use axum::{extract::State, response::Html, routing::get, Router};

use crate::errors::StampdError;
use crate::services::timestamp_service;
use crate::store::SharedStore;

pub fn routes(store: SharedStore) -> Router {
    Router::new().route("/", get(index)).with_state(store)
}

/// GET /
/// Render the current counter value for human viewing. Read-only.
async fn index(State(store): State<SharedStore>) -> Result<Html<String>, StampdError> {
    let count = timestamp_service::counter(store.as_ref()).await?;
    Ok(Html(render(count)))
}

fn render(count: i64) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head><title>Timestamps served</title></head>\n\
         <body>\n\
         <h1>Timestamps served: {count}</h1>\n\
         </body>\n\
         </html>\n"
    )
}
