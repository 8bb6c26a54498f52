use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use rocket::error::ErrorKind;
use rocket::fairing::{AdHoc, Fairing, Info, Kind};
use rocket::figment::Figment;
use rocket::{catchers, routes, Build, Data, Request, Response, Rocket};
use tracing::{debug, error, info};

use crate::cli::ServeArgs;
use crate::common::logging::{events, short_uuid};
use crate::structures::{Metrics, ServerError};
use crate::web::routes::Endpoint;

pub mod routes;

// Instant de début de traitement, partagé par les fairings via le cache de la requête
struct RequestStart(Instant);

struct RequestId(String);

fn request_start(req: &Request<'_>) -> Instant {
    req.local_cache(|| RequestStart(Instant::now())).0
}

// Fairing Rocket: intercepte chaque requête pour mesurer la durée et incrémenter les compteurs
pub struct HttpMetricsFairing;

#[async_trait]
impl Fairing for HttpMetricsFairing {
    fn info(&self) -> Info {
        Info { name: "HTTP metrics (counter + histogram)", kind: Kind::Request | Kind::Response }
    }

    async fn on_request(&self, req: &mut Request<'_>, _data: &mut Data<'_>) {
        request_start(req);
    }

    async fn on_response<'r>(&self, req: &'r Request<'_>, res: &mut Response<'r>) {
        let elapsed = request_start(req).elapsed();
        if let Some(metrics) = req.rocket().state::<Arc<Metrics>>() {
            metrics.observe(req.method().as_str(), res.status().code, elapsed.as_secs_f64());
        }
    }
}

// Fairing de journalisation: un événement à l'entrée, un à la sortie, corrélés par request_id
pub struct RequestLogFairing;

#[async_trait]
impl Fairing for RequestLogFairing {
    fn info(&self) -> Info {
        Info { name: "HTTP request log", kind: Kind::Request | Kind::Response }
    }

    async fn on_request(&self, req: &mut Request<'_>, _data: &mut Data<'_>) {
        request_start(req);
        let id = req.local_cache(|| RequestId(short_uuid()));
        debug!(event = events::HTTP_REQUEST, request_id = %id.0, method = %req.method(), path = %req.uri().path(), msg = "Request received");
    }

    async fn on_response<'r>(&self, req: &'r Request<'_>, res: &mut Response<'r>) {
        let latency_ms = request_start(req).elapsed().as_secs_f64() * 1000.0;
        let id = req.local_cache(|| RequestId(short_uuid()));
        info!(
            event = events::HTTP_RESPONSE,
            request_id = %id.0,
            method = %req.method(),
            path = %req.uri().path(),
            status = res.status().code,
            latency_ms,
            msg = "Request served"
        );
    }
}

/// Construit l'application Rocket: routes, fairings et configuration réseau.
///
/// La configuration part des valeurs par défaut de Rocket et n'est surchargée
/// que par `args`; ni `Rocket.toml` ni les variables `ROCKET_*` ne sont lus.
/// Le logger de Rocket est coupé: les fairings et hooks ci-dessous émettent
/// les événements `app_*` / `http_*` à sa place.
pub fn build(args: &ServeArgs) -> Result<Rocket<Build>, ServerError> {
    let metrics = Arc::new(Metrics::new()?);

    let figment = Figment::from(rocket::Config::default())
        .merge(("address", args.address))
        .merge(("port", args.port))
        .merge(("cli_colors", false))
        .merge(("log_level", "off"))
        .merge(("ident", concat!("project-template/", env!("CARGO_PKG_VERSION"))));

    Ok(rocket::custom(figment)
        .manage(metrics)
        .attach(HttpMetricsFairing)
        .attach(RequestLogFairing)
        .attach(AdHoc::on_liftoff("Ready log", |rocket| Box::pin(async move {
            let config = rocket.config();
            info!(event = events::APP_READY, address = %config.address, port = config.port, msg = "Listening");
        })))
        .attach(AdHoc::on_shutdown("Shutdown log", |_| Box::pin(async move {
            info!(event = events::APP_SHUTDOWN, msg = "Shutting down");
        })))
        .mount("/", Endpoint::Root.routes())
        .mount("/", Endpoint::Health.routes())
        .mount("/", routes![routes::metrics_export])
        .register("/", catchers![routes::json_catcher]))
}

/// Lance le serveur jusqu'à son arrêt. Un échec de bind est fatal, sans nouvelle tentative.
pub async fn serve(args: &ServeArgs) -> Result<(), ServerError> {
    info!(event = events::APP_START, address = %args.address, port = args.port, msg = "Starting server");

    let rocket = build(args)?;
    if let Err(e) = rocket.launch().await {
        let err = classify_launch_error(e, args);
        error!(event = events::APP_ERROR, error = %err, msg = "Server stopped");
        return Err(err);
    }
    Ok(())
}

// Inspecter `kind()` marque l'erreur Rocket comme traitée (sinon panic au drop)
fn classify_launch_error(err: rocket::Error, args: &ServeArgs) -> ServerError {
    match err.kind() {
        ErrorKind::Bind(source) => ServerError::Bind {
            address: args.address,
            port: args.port,
            source: std::io::Error::new(source.kind(), source.to_string()),
        },
        kind => ServerError::Launch(kind.to_string()),
    }
}
