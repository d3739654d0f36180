use crate::protocol::Schema;
use crate::remote_state::data_source_schema;
use axum::Json;

#[utoipa::path(
    get,
    path = "/v1/data-sources/remote-state/schema",
    tag = "remote-state",
    summary = "Data source schema",
    description = "Returns the attributes of the remote state data source and their types.",
    responses(
        (status = 200, description = "Data source schema", body = Object)
    )
)]
pub async fn get_schema() -> Json<Schema> {
    Json(data_source_schema())
}
