use actix_web::{web, App, HttpServer};

use plantnet_relay::config::AppConfig;
use plantnet_relay::plantnet::client::PlantNetClient;
use plantnet_relay::routes::{configure_routes, cors};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    dotenv::dotenv().ok();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Configuration error: {}", e);
            return Err(std::io::Error::other(e.to_string()));
        }
    };

    let client = PlantNetClient::new(config.api_key.clone(), config.upstream_url.clone());

    let bind_address = format!("0.0.0.0:{}", config.port);
    log::info!("Starting server on {}", bind_address);
    log::info!("Serving static page from {}", config.static_dir);

    let static_dir = config.static_dir.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(cors())
            .app_data(web::Data::new(client.clone()))
            .configure(|cfg| configure_routes(cfg, static_dir.clone()))
    })
    .bind(&bind_address)?
    .run()
    .await
}
