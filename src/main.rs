use coming_soon::config::get_configuration;
use coming_soon::startup::Application;
use coming_soon::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let subscriber = get_subscriber(
        String::from("coming_soon"),
        String::from("info"),
        std::io::stdout,
    );

    init_subscriber(subscriber);

    let config = get_configuration().expect("Missing configuration file.");
    let application = Application::build(config).await?;

    application.run_until_stop().await
}
