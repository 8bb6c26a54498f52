use std::sync::Arc;

use async_trait::async_trait;
use rocket::http::{Method, Status};
use rocket::response::content::RawText;
use rocket::response::status;
use rocket::route::{self, Handler, Route};
use rocket::serde::json::Json;
use rocket::{catch, get, Data, Request, State};
use serde::Serialize;

use crate::structures::{HealthResponse, Metrics, ProjectInfo};

// CONNECT est exclu: ses requêtes visent une autorité, jamais un chemin
const ANY_METHOD: [Method; 8] = [
    Method::Get,
    Method::Head,
    Method::Post,
    Method::Put,
    Method::Delete,
    Method::Patch,
    Method::Options,
    Method::Trace,
];

// Rang le plus faible: `/health`, `/metrics` et `/` exact passent avant
const FALLBACK_RANK: isize = 100;

/// Endpoints à réponse fixe: méthode, en-têtes et corps de la requête sont ignorés.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Root,
    Health,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Root => "/",
            Endpoint::Health => "/health",
        }
    }

    // Une route par méthode, toutes servies par le même handler.
    // `/` sert aussi tout chemin qu'aucune autre route ne revendique.
    pub fn routes(self) -> Vec<Route> {
        ANY_METHOD
            .into_iter()
            .flat_map(|method| {
                let exact = Route::new(method, self.path(), self);
                let fallback = (self == Endpoint::Root)
                    .then(|| Route::ranked(FALLBACK_RANK, method, "/<_..>", self));
                std::iter::once(exact).chain(fallback)
            })
            .collect()
    }
}

#[async_trait]
impl Handler for Endpoint {
    async fn handle<'r>(&self, req: &'r Request<'_>, _data: Data<'r>) -> route::Outcome<'r> {
        match self {
            Endpoint::Root => route::Outcome::from(req, Json(ProjectInfo::current())),
            Endpoint::Health => route::Outcome::from(req, Json(HealthResponse::healthy())),
        }
    }
}

// Endpoint Prometheus /metrics
#[get("/metrics")]
pub fn metrics_export(metrics: &State<Arc<Metrics>>) -> Result<RawText<String>, Status> {
    metrics.gather_text().map(RawText).map_err(|e| {
        tracing::error!(error = %e, msg = "Metrics encoding failed");
        Status::InternalServerError
    })
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    pub code: u16,
    pub path: String,
}

// Toute erreur restante (CONNECT non routé, 500...) repart en JSON avec son propre statut
#[catch(default)]
pub fn json_catcher(status: Status, req: &Request<'_>) -> status::Custom<Json<ErrorResponse>> {
    status::Custom(
        status,
        Json(ErrorResponse {
            status: status.reason().unwrap_or("error"),
            code: status.code,
            path: req.uri().path().to_string(),
        }),
    )
}
