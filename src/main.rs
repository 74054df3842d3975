use crate::config::AppConfig;
use crate::db::connection::{init_db, Database};
use crate::photos::PhotoStore;
use crate::reports::ReportGenerator;
use crate::responses::error_to_response;
use crate::router::{handle, AppState};
use astra::Server;
use std::net::SocketAddr;

mod config;
mod db;
mod domain;
mod errors;
mod photos;
mod reports;
mod responses;
mod router;
mod spreadsheets;
mod telemetry;
mod templates;

#[cfg(test)]
mod tests;

fn main() {
    let cfg = match AppConfig::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(1);
        }
    };
    telemetry::init_telemetry(&cfg.logging);

    let db = Database::new(&cfg.storage.database_path);
    if let Err(e) = init_db(&db) {
        tracing::error!(error = %e, "Database initialization failed");
        std::process::exit(1);
    }

    let photos = match PhotoStore::new(&cfg.storage.photos_dir) {
        Ok(p) => p,
        Err(e) => {
            tracing::error!(error = %e, "Photo store unavailable");
            std::process::exit(1);
        }
    };
    let reports = match ReportGenerator::new(&cfg.storage.reports_dir, cfg.inspection.validity_months)
    {
        Ok(r) => r,
        Err(e) => {
            tracing::error!(error = %e, "Report directory unavailable");
            std::process::exit(1);
        }
    };

    let state = AppState {
        db,
        photos,
        reports,
        ui: cfg.ui.clone(),
    };

    let addr: SocketAddr = match cfg.server.addr.parse() {
        Ok(addr) => addr,
        Err(e) => {
            tracing::error!(addr = %cfg.server.addr, error = %e, "Invalid server address");
            std::process::exit(1);
        }
    };
    tracing::info!("Starting server at http://{addr}");

    let server = Server::bind(&addr).max_workers(8);

    let result = server.serve(move |req, _info| match handle(req, &state) {
        Ok(resp) => resp,
        Err(err) => error_to_response(err),
    });

    if let Err(e) = result {
        tracing::error!(error = %e, "Server ended with error");
    }

    tracing::info!("Server shut down cleanly.");
}
