use crate::{
    api::{attendance, dashboard, employee},
    config::Config,
    error::PortalError,
};
use actix_governor::{
    Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware,
};
use actix_web::web;
use anyhow::{Context, Result};

pub type LimiterConfig = GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware>;

/// Per-IP limiter allowing `requests_per_min` with a burst of the same size.
pub fn build_limiter(requests_per_min: u32) -> Result<LimiterConfig> {
    let requests_per_min = requests_per_min.max(1);
    GovernorConfigBuilder::default()
        .per_millisecond((60_000 / requests_per_min as u64).max(1))
        .burst_size(requests_per_min)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .context("invalid rate limiter configuration")
}

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config, limiter: &LimiterConfig) {
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(Governor::new(limiter))
            .configure(views),
    );
}

/// Malformed bodies answer with the same `{"message"}` shape as handler errors.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| PortalError::BadRequest(err.to_string()).into())
}

/// View endpoints, relative to the API prefix.
pub fn views(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config());
    cfg.service(
        web::scope("/employees")
            // /employees
            .service(
                web::resource("")
                    .route(web::get().to(employee::list_employees))
                    .route(web::post().to(employee::create_employee)),
            )
            // /employees/{employee_id}
            .service(
                web::resource("/{employee_id}")
                    .route(web::delete().to(employee::delete_employee)),
            ),
    )
    .service(
        web::scope("/attendance")
            // /attendance
            .service(web::resource("").route(web::post().to(attendance::mark_attendance)))
            // /attendance/roster
            .service(web::resource("/roster").route(web::get().to(attendance::get_roster)))
            // /attendance/records
            .service(web::resource("/records").route(web::get().to(attendance::get_records))),
    )
    .service(web::resource("/dashboard").route(web::get().to(dashboard::get_dashboard)));
}
