use std::time::Duration;

use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer, Responder};
use clap::Parser;
use log::error;
use serde::Serialize;
use transfermarkt_scraping::api::{SquadClient, SquadClientOptions};

#[derive(Parser)]
struct Opts {
    #[arg(long, env = "PORT", default_value_t = 3000)]
    port: u16,
    /// Timeout for the outbound roster page fetch.
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    request_timeout_secs: u64,
}

struct State {
    client: SquadClient,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let opts = Opts::parse();
    let state = web::Data::new(State {
        client: SquadClient::new(SquadClientOptions {
            timeout: Duration::from_secs(opts.request_timeout_secs),
            ..Default::default()
        })?,
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .route("/", web::get().to(index))
            .route("/api/club/{id}/players", web::get().to(players))
            .wrap(Logger::default())
    })
    .bind(("0.0.0.0", opts.port))?
    .run()
    .await?;

    Ok(())
}

async fn index() -> impl Responder {
    "Welcome to API."
}

#[derive(Serialize)]
struct ErrorMessage {
    message: &'static str,
}

async fn players(state: web::Data<State>, path: web::Path<String>) -> HttpResponse {
    match players_impl(&state, &path).await {
        Ok(response) => response,
        Err(e) => {
            error!("Unexpected failure while serving players: {e:#}");
            HttpResponse::InternalServerError().json(ErrorMessage {
                message: "Erro ao buscar dados dos jogadores",
            })
        }
    }
}

/// Scrape failures degrade to an empty array so that callers always receive
/// a sequence; the 500 branch above only covers failures past that point.
async fn players_impl(state: &State, club_id: &str) -> anyhow::Result<HttpResponse> {
    let players = match state.client.fetch_squad(club_id).await {
        Ok(players) => players,
        Err(e) => {
            error!("Failed to fetch squad of club {club_id}: {e:#}");
            vec![]
        }
    };
    Ok(HttpResponse::Ok().json(players))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use actix_web::{http::StatusCode, test, web, App};
    use transfermarkt_scraping::api::{SquadClient, SquadClientOptions};

    use super::{index, players, State};

    fn unreachable_upstream_state() -> web::Data<State> {
        // Nothing listens on the discard port, so every fetch fails fast.
        web::Data::new(State {
            client: SquadClient::new(SquadClientOptions {
                base_url: "http://127.0.0.1:9".to_owned(),
                timeout: Duration::from_secs(1),
            })
            .unwrap(),
        })
    }

    #[actix_web::test]
    async fn test_index() {
        let app = test::init_service(App::new().route("/", web::get().to(index))).await;
        let request = test::TestRequest::get().uri("/").to_request();
        let body = test::call_and_read_body(&app, request).await;
        assert_eq!(body, "Welcome to API.");
    }

    #[actix_web::test]
    async fn test_players_degrades_to_empty_array_on_fetch_failure() {
        let app = test::init_service(
            App::new()
                .app_data(unreachable_upstream_state())
                .route("/api/club/{id}/players", web::get().to(players)),
        )
        .await;
        let request = test::TestRequest::get()
            .uri("/api/club/614/players")
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(test::read_body(response).await, "[]");
    }
}
