//! App Router

use salvo::{
    Router,
    oapi::{
        OpenApi,
        security::{Http, HttpAuthScheme, SecurityScheme},
        swagger_ui::SwaggerUi,
    },
};

use crate::{
    accounts, auth, healthcheck, observability::metrics_handler, password_resets, profiles,
    rate_limit, sessions,
};

/// Every API route. State injection and request logging are layered on by
/// the caller.
pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(metrics_handler))
        .push(
            Router::with_path("accounts")
                .push(Router::new().hoop(rate_limit::handler).post(accounts::create::handler))
                .push(
                    Router::with_path("verification")
                        .hoop(rate_limit::handler)
                        .post(accounts::resend::handler),
                )
                .push(Router::with_path("verify").post(accounts::verify::handler))
                .push(Router::with_path("password").post(accounts::set_password::handler)),
        )
        .push(
            Router::with_path("sessions")
                .push(Router::new().hoop(rate_limit::handler).post(sessions::create::handler))
                .push(
                    Router::new()
                        .hoop(auth::middleware::handler)
                        .delete(sessions::delete::handler),
                ),
        )
        .push(
            Router::with_path("password-resets")
                .push(
                    Router::new()
                        .hoop(rate_limit::handler)
                        .post(password_resets::create::handler),
                )
                .push(Router::with_path("confirm").post(password_resets::confirm::handler)),
        )
        .push(
            Router::with_path("profile")
                .hoop(auth::middleware::handler)
                .get(profiles::get::handler)
                .put(profiles::update::handler)
                .push(Router::with_path("photo").put(profiles::photo::handler)),
        )
        .push(Router::with_path("profiles/{slug}").get(profiles::public::handler))
}

/// Attach the OpenAPI document and Swagger UI for `router`.
pub(crate) fn with_docs(router: Router) -> Router {
    let doc = OpenApi::new("ScoutLine API", env!("CARGO_PKG_VERSION"))
        .add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
        .merge_router(&router);

    router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"))
}
