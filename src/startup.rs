use crate::configuration::{DatabaseSettings, PaymentSetting, SecretSetting, Settings};
use crate::payment_client::PaymentClient;
use crate::routes::main_route;
use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use sqlx::postgres;
use sqlx::postgres::PgPool;
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(configuration: Settings) -> Result<Self, anyhow::Error> {
        let connection_pool = get_connection_pool(&configuration.database);
        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        tracing::info!("Listening on {}", address);
        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr()?.port();
        let server = run(
            listener,
            connection_pool,
            configuration.secret,
            configuration.payment,
            configuration.application.workers,
        )
        .await?;
        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn get_connection_pool(configuration: &DatabaseSettings) -> PgPool {
    postgres::PgPoolOptions::new()
        .acquire_timeout(std::time::Duration::from_secs(2))
        .connect_lazy_with(configuration.with_db())
}

async fn run(
    listener: TcpListener,
    db_pool: PgPool,
    secret: SecretSetting,
    payment: PaymentSetting,
    workers: usize,
) -> Result<Server, anyhow::Error> {
    let timeout = payment.timeout();
    let payment_client = PaymentClient::new(
        payment.base_url,
        payment.key_id,
        payment.key_secret,
        payment.currency,
        timeout,
    )?;
    let db_pool = web::Data::new(db_pool);
    let secret_obj = web::Data::new(secret);
    let payment_client_obj = web::Data::new(payment_client);
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(db_pool.clone())
            .app_data(secret_obj.clone())
            .app_data(payment_client_obj.clone())
            .configure(main_route)
    })
    .workers(workers)
    .listen(listener)?
    .run();

    Ok(server)
}
