use axum::response::Html;

static INDEX_HTML: &str = include_str!("../../assets/index.html");

/// Admin single-page client
#[utoipa::path(
    get,
    path = "/",
    tag = "shell",
    responses((status = 200, description = "HTML client", body = String, content_type = "text/html"))
)]
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
