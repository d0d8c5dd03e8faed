use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use domain::services::{
    AccessControlGate, AccessTokenIssuer, CertificateService, InvitationService, MatchService,
    PlayerService, RatingService, RegistrationService, SocialGraph,
};
use domain::store::Stores;
use shared::jwt::{JwtConfig, JwtError};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, rate_limit_middleware, require_user_auth,
    security_headers_middleware, trace_id, RateLimiterState,
};
use crate::routes::{
    auth, check_ins, friends, health, invitations, matches, messages, players, ratings,
    registrations,
};
use crate::services::AuthService;

/// Domain services shared by all handlers.
pub struct Services {
    pub auth: AuthService,
    pub players: Arc<PlayerService>,
    pub matches: MatchService,
    pub registrations: Arc<RegistrationService>,
    pub invitations: InvitationService,
    pub gate: AccessControlGate,
    pub certificates: CertificateService,
    pub social: SocialGraph,
    pub ratings: RatingService,
}

/// Wires every service against the given store handles.
pub fn build_services(stores: &Stores, jwt: Arc<JwtConfig>) -> Services {
    let players = Arc::new(PlayerService::new(stores.players.clone()));
    let registrations = Arc::new(RegistrationService::new(
        stores.registrations.clone(),
        stores.matches.clone(),
        stores.players.clone(),
        AccessTokenIssuer::new(stores.registrations.clone()),
    ));

    Services {
        auth: AuthService::new(players.clone(), jwt),
        matches: MatchService::new(stores.matches.clone(), stores.players.clone()),
        invitations: InvitationService::new(
            stores.invitations.clone(),
            stores.matches.clone(),
            stores.players.clone(),
            registrations.clone(),
        ),
        gate: AccessControlGate::new(
            stores.registrations.clone(),
            stores.matches.clone(),
            stores.players.clone(),
        ),
        certificates: CertificateService::new(
            stores.registrations.clone(),
            stores.matches.clone(),
            stores.players.clone(),
        ),
        social: SocialGraph::new(
            stores.friend_requests.clone(),
            stores.players.clone(),
            stores.messages.clone(),
        ),
        ratings: RatingService::new(
            stores.ratings.clone(),
            stores.matches.clone(),
            stores.registrations.clone(),
        ),
        players,
        registrations,
    }
}

#[derive(Clone)]
pub struct AppState {
    pub services: Arc<Services>,
    pub config: Arc<Config>,
    pub jwt: Arc<JwtConfig>,
    /// Present when backed by PostgreSQL; used by readiness and pool metrics.
    pub pool: Option<PgPool>,
    pub rate_limiter: Option<Arc<RateLimiterState>>,
}

/// Builds the router. Fails only when the JWT keys cannot be loaded.
pub fn create_app(config: Config, stores: Stores, pool: Option<PgPool>) -> Result<Router, JwtError> {
    let config = Arc::new(config);
    let jwt = Arc::new(config.jwt.build()?);

    let state = AppState {
        services: Arc::new(build_services(&stores, jwt.clone())),
        config: config.clone(),
        jwt,
        pool,
        rate_limiter: RateLimiterState::new(config.security.rate_limit_per_minute).map(Arc::new),
    };

    let cors = if config.security.cors_origins.is_empty() {
        // Development default
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Player routes. Auth runs first, then rate limiting keyed by player.
    let protected_routes = Router::new()
        .route(
            "/api/v1/players/me",
            get(players::get_me).patch(players::update_me),
        )
        .route(
            "/api/v1/matches",
            post(matches::open_match).get(matches::list_matches),
        )
        .route(
            "/api/v1/matches/:match_id",
            get(matches::get_match).patch(matches::update_match),
        )
        .route(
            "/api/v1/matches/:match_id/status",
            put(matches::set_match_status),
        )
        .route(
            "/api/v1/matches/:match_id/registrations",
            post(registrations::register).get(registrations::roster),
        )
        .route(
            "/api/v1/matches/:match_id/registrations/export",
            get(registrations::export_roster),
        )
        .route(
            "/api/v1/matches/:match_id/ratings",
            post(ratings::rate_match).get(ratings::list_ratings),
        )
        .route("/api/v1/registrations/me", get(registrations::list_mine))
        .route(
            "/api/v1/registrations/:registration_id",
            get(registrations::get_registration),
        )
        .route(
            "/api/v1/registrations/:registration_id/accept",
            post(registrations::accept),
        )
        .route(
            "/api/v1/registrations/:registration_id/decline",
            post(registrations::decline),
        )
        .route(
            "/api/v1/registrations/:registration_id/confirm-payment",
            post(registrations::confirm_payment),
        )
        .route(
            "/api/v1/registrations/:registration_id/certificate",
            get(registrations::certificate),
        )
        .route(
            "/api/v1/registrations/:registration_id/eligibility",
            get(registrations::eligibility),
        )
        .route("/api/v1/check-ins", post(check_ins::check_in))
        .route(
            "/api/v1/invitations",
            post(invitations::invite).get(invitations::list_invitations),
        )
        .route(
            "/api/v1/invitations/:invitation_id/accept",
            post(invitations::accept),
        )
        .route(
            "/api/v1/invitations/:invitation_id/reject",
            post(invitations::reject),
        )
        .route(
            "/api/v1/friends",
            post(friends::send_request).get(friends::list_relations),
        )
        .route(
            "/api/v1/friends/:relation_id/accept",
            post(friends::accept_request),
        )
        .route("/api/v1/messages", post(messages::send_message))
        .route(
            "/api/v1/messages/:player_id",
            get(messages::get_conversation),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_user_auth,
        ));

    // Sign-up and login share the anonymous rate limit bucket.
    let auth_routes = Router::new()
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/login", post(auth::login))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ));

    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    let router = Router::new()
        .merge(public_routes)
        .merge(auth_routes)
        .merge(protected_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state);

    Ok(router)
}
