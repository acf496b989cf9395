use utoipa::{
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
    Modify, OpenApi,
};

use super::api::error::ErrorResponse;
use super::api::metrics::{
    DurationQuery, DurationResponse, PaceQuery, PaceResponse, SummaryRequest,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::metrics::summary,
        super::api::metrics::duration,
        super::api::metrics::pace,
        super::api::session::start,
        super::api::session::record_sample,
        super::api::session::stop,
        super::api::session::status,
    ),
    components(
        schemas(
            SummaryRequest,
            DurationQuery,
            DurationResponse,
            PaceQuery,
            PaceResponse,
            ErrorResponse,
            crate::metrics::GeoSample,
            crate::metrics::RunSummary,
            crate::session::RunMode,
            crate::session::RunStatus,
        )
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Campus Run API",
        description = "Run metrics and live run recording",
        version = "0.1.0"
    ),
    tags(
        (name = "metrics", description = "Distance, duration and pace"),
        (name = "session", description = "Run recording")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "api_key",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}
