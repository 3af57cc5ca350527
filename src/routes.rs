use crate::{
    api::{attendance, console, employee, events, shift},
    auth::console_auth,
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::from_fn, web};

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-scope limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    let console_limiter = build_limiter(config.rate_console_per_min);

    cfg.service(
        web::scope(&config.api_prefix)
            .service(web::resource("/health").route(web::get().to(attendance::get_health)))
            .service(
                web::resource("/events")
                    .route(web::post().to(events::create_events))
                    .route(web::get().to(events::get_events)),
            )
            .service(web::resource("/attendance").route(web::get().to(attendance::get_attendance)))
            .service(
                web::resource("/present-employees")
                    .route(web::get().to(attendance::get_present_employees)),
            )
            .service(
                web::resource("/monthly-attendance")
                    .route(web::get().to(attendance::get_monthly_attendance)),
            )
            .service(
                web::scope("/employees")
                    // /employees
                    .service(
                        web::resource("")
                            .route(web::get().to(employee::list_employees))
                            .route(web::post().to(employee::save_employee)),
                    )
                    // /employees/{employee_no}
                    .service(
                        web::resource("/{employee_no}")
                            .route(web::get().to(employee::get_employee))
                            .route(web::delete().to(employee::delete_employee)),
                    ),
            )
            .service(
                web::scope("/shifts")
                    .service(
                        web::resource("")
                            .route(web::get().to(shift::list_shifts))
                            .route(web::post().to(shift::create_shift)),
                    )
                    .service(web::resource("/{id}").route(web::delete().to(shift::delete_shift))),
            )
            .service(
                web::scope("/console")
                    .wrap(from_fn(console_auth)) // authentication
                    .wrap(console_limiter) // rate limiting
                    .service(
                        web::resource("/system-info").route(web::get().to(console::get_system_info)),
                    )
                    .service(web::resource("/logs").route(web::get().to(console::get_logs)))
                    .service(
                        web::resource("/connections").route(web::get().to(console::get_connections)),
                    ),
            ),
    );
}
