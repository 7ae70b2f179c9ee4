use crate::application::http::menu_analysis::router::MenuAnalysisApiDoc;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "MenuLens API"
    ),
    nest(
        (path = "/menu-analysis", api = MenuAnalysisApiDoc),
    )
)]
pub struct ApiDoc;
