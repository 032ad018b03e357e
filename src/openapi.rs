use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "ApiKey",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("x-api-key"))),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Directory API",
        version = "0.1.0",
        description = r#"
# Organization Directory API

A read-only REST API over a directory of organizations, the buildings they
occupy, and a hierarchical classification of business activities.

## Authentication

All directory endpoints require the shared API key in the `X-API-Key` header.

## Pagination

List endpoints accept `offset` (>= 0) and `limit` (1..=1000) query parameters.
        "#,
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080/api/v1", description = "Local development")
    ),
    tags(
        (name = "Organizations", description = "Organization lookup endpoints"),
        (name = "Buildings", description = "Building lookup endpoints"),
        (name = "Activities", description = "Activity classification endpoints")
    ),
    paths(
        crate::handlers::organizations::list_organizations,
        crate::handlers::organizations::get_organization,
        crate::handlers::organizations::get_organizations_by_building,
        crate::handlers::organizations::get_organizations_by_activity,
        crate::handlers::organizations::get_organizations_by_activity_tree,
        crate::handlers::organizations::get_organizations_in_rectangle,
        crate::handlers::organizations::search_organizations_by_name,
        crate::handlers::buildings::list_buildings,
        crate::handlers::buildings::get_building,
        crate::handlers::buildings::search_buildings_by_address,
        crate::handlers::activities::list_activities,
        crate::handlers::activities::get_root_activities,
        crate::handlers::activities::get_activity_tree,
    ),
    components(
        schemas(
            crate::services::organizations::OrganizationSummary,
            crate::services::organizations::OrganizationDetail,
            crate::services::organizations::ActivityRef,
            crate::services::organizations::PhoneNumberRef,
            crate::services::buildings::BuildingResponse,
            crate::services::activities::ActivitySummary,
            crate::services::activities::ActivityTree,
            crate::errors::ErrorResponse
        )
    )
)]
pub struct ApiDocV1;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDocV1::openapi())
        .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json").try_it_out_enabled(true))
}
