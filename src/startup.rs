use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use std::net::TcpListener;
use std::time;
use tracing_actix_web::TracingLogger;

use crate::config::{Settings, SocialLink};
use crate::routes::{
    get_countdown, handle_create_subscription, handle_register, health_check, landing_page,
    submit_landing_form,
};
use crate::store::Store;
use crate::views::{CountdownView, SystemClock};

pub struct RegistrationUrl(pub String);

pub struct SocialLinks(pub Vec<SocialLink>);

/// How long the "you're on the list" confirmation stays up.
pub struct ConfirmationVisibleFor(pub time::Duration);

pub struct Application {
    pub port: u16,
    pub server: Server,
}

impl Application {
    pub async fn build(config: Settings) -> Result<Self, std::io::Error> {
        let store = Store::from_settings(&config)
            .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err))?;
        let countdown = CountdownView::start(
            config.launch.target,
            config.launch.after_launch,
            SystemClock,
        );

        let listener = TcpListener::bind(config.get_address())?;
        let port = listener.local_addr()?.port();

        tracing::info!("Server listening on {}", config.get_address());

        let server = run(
            listener,
            store,
            countdown,
            RegistrationUrl(config.launch.registration_url.clone()),
            SocialLinks(config.landing.social_links.clone()),
            ConfirmationVisibleFor(config.get_confirmation_visible_for()),
        )?;

        Ok(Self { port, server })
    }

    pub fn get_port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stop(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn run(
    listener: TcpListener,
    store: Store,
    countdown: CountdownView,
    registration_url: RegistrationUrl,
    social_links: SocialLinks,
    visible_for: ConfirmationVisibleFor,
) -> Result<Server, std::io::Error> {
    let store = web::Data::new(store);
    // Shared by every worker, the ticker stops once the server drops the last handle.
    let countdown = web::Data::new(countdown);
    let registration_url = web::Data::new(registration_url);
    let social_links = web::Data::new(social_links);
    let visible_for = web::Data::new(visible_for);

    let server = HttpServer::new(move || {
        // App is where your application logic lives: routing, middlewares, request handler, etc
        App::new()
            // 'wrap' method adds a middleware to the App. This specific middleware provide incoming
            // request logger
            .wrap(TracingLogger::default())
            .route("/", web::get().to(landing_page))
            .route("/", web::post().to(submit_landing_form))
            .route("/health_check", web::get().to(health_check))
            .route("/countdown", web::get().to(get_countdown))
            .route("/subscriptions", web::post().to(handle_create_subscription))
            .route("/register", web::get().to(handle_register))
            .app_data(store.clone())
            .app_data(countdown.clone())
            .app_data(registration_url.clone())
            .app_data(social_links.clone())
            .app_data(visible_for.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
