use utoipa_axum::{router::OpenApiRouter, routes};

use crate::handlers;
use crate::resources;
use crate::state::AppState;

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::root::api_root))
        .nest("/auth", auth_routes())
        .nest(resources::USERS.path, user_routes())
        .nest(resources::COMPETITIONS.path, competition_routes())
        .nest(
            resources::COMPETITION_REGISTRATIONS.path,
            competition_registration_routes(),
        )
        .nest(resources::WORKSHOPS.path, workshop_routes())
        .nest(
            resources::WORKSHOP_REGISTRATIONS.path,
            workshop_registration_routes(),
        )
        .nest(resources::SERVICE_LEADS.path, service_lead_routes())
        .nest(resources::PORTFOLIO_ITEMS.path, portfolio_routes())
}

fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::auth::register))
        .routes(routes!(handlers::auth::obtain_token))
        .routes(routes!(handlers::auth::me))
}

fn user_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::user::list_users,
            handlers::user::create_user
        ))
        .routes(routes!(
            handlers::user::get_user,
            handlers::user::update_user,
            handlers::user::delete_user
        ))
}

fn competition_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::competition::list_competitions,
            handlers::competition::create_competition
        ))
        .routes(routes!(
            handlers::competition::get_competition,
            handlers::competition::update_competition,
            handlers::competition::delete_competition
        ))
}

fn competition_registration_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::competition_registration::list_competition_registrations,
            handlers::competition_registration::create_competition_registration
        ))
        .routes(routes!(
            handlers::competition_registration::get_competition_registration,
            handlers::competition_registration::update_competition_registration,
            handlers::competition_registration::delete_competition_registration
        ))
}

fn workshop_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::workshop::list_workshops,
            handlers::workshop::create_workshop
        ))
        .routes(routes!(
            handlers::workshop::get_workshop,
            handlers::workshop::update_workshop,
            handlers::workshop::delete_workshop
        ))
}

fn workshop_registration_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::workshop_registration::list_workshop_registrations,
            handlers::workshop_registration::create_workshop_registration
        ))
        .routes(routes!(
            handlers::workshop_registration::get_workshop_registration,
            handlers::workshop_registration::update_workshop_registration,
            handlers::workshop_registration::delete_workshop_registration
        ))
}

fn service_lead_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::service_lead::list_service_leads,
            handlers::service_lead::create_service_lead
        ))
        .routes(routes!(
            handlers::service_lead::get_service_lead,
            handlers::service_lead::update_service_lead,
            handlers::service_lead::delete_service_lead
        ))
}

fn portfolio_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::portfolio::list_portfolio_items,
            handlers::portfolio::create_portfolio_item
        ))
        .routes(routes!(handlers::portfolio::fetch_video_data))
        .routes(routes!(
            handlers::portfolio::get_portfolio_item,
            handlers::portfolio::update_portfolio_item,
            handlers::portfolio::delete_portfolio_item
        ))
}
