use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Strive API",
        version = "0.1.0",
        description = "Personal goals, to-dos and habits behind JWT authentication."
    ),
    paths(
        crate::routes::auth::obtain_token,
        crate::routes::auth::refresh_token,
        crate::routes::auth::register,
        crate::routes::dashboard::dashboard,
        crate::routes::goals::list_goals,
        crate::routes::goals::create_goal,
        crate::routes::goals::get_goal,
        crate::routes::goals::update_goal,
        crate::routes::goals::patch_goal,
        crate::routes::goals::delete_goal,
        crate::routes::goals::join_goal,
        crate::routes::goals::remove_goal,
        crate::routes::todos::list_todos,
        crate::routes::todos::create_todo,
        crate::routes::todos::get_todo,
        crate::routes::todos::update_todo,
        crate::routes::todos::patch_todo,
        crate::routes::todos::delete_todo,
        crate::routes::habits::list_habits,
        crate::routes::habits::create_habit,
        crate::routes::habits::get_habit,
        crate::routes::habits::update_habit,
        crate::routes::habits::patch_habit,
        crate::routes::habits::delete_habit,
        crate::routes::health,
    ),
    components(schemas(
        crate::dto::TokenRequest,
        crate::dto::TokenPairResponse,
        crate::dto::RefreshRequest,
        crate::dto::AccessTokenResponse,
        crate::dto::RegisterRequest,
        crate::dto::UserResponse,
        crate::dto::GoalRequest,
        crate::dto::GoalPatchRequest,
        crate::dto::GoalResponse,
        crate::dto::GoalMembershipRequest,
        crate::dto::DetailResponse,
        crate::dto::TodoRequest,
        crate::dto::TodoPatchRequest,
        crate::dto::TodoResponse,
        crate::dto::HabitRequest,
        crate::dto::HabitPatchRequest,
        crate::dto::HabitResponse,
        crate::dto::DashboardResponse,
        crate::dto::DashboardStatsResponse,
        crate::dto::HealthResponse,
        crate::dto::ErrorResponse,
    )),
    tags(
        (name = "auth", description = "Token issuance and registration"),
        (name = "dashboard", description = "Per-user overview"),
        (name = "goals", description = "Goals and goal membership"),
        (name = "todos", description = "To-do items"),
        (name = "habits", description = "Habits"),
        (name = "system", description = "Health and system status"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Adds the Bearer JWT security scheme to the OpenAPI spec.
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Access token from POST /api/token/."))
                        .build(),
                ),
            );
        }
    }
}
