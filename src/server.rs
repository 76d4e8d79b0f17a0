use crate::config::Config;
use crate::providers::Bank;
use crate::providers::Briq;
use crate::providers::Chat;
use crate::providers::Slack;
use crate::service::*;
use actix_web::App;
use actix_web::HttpResponse;
use actix_web::HttpServer;
use actix_web::Responder;
use actix_web::middleware::Logger;
use actix_web::web;
use std::sync::Arc;

/// Slash-command body as Slack posts it, urlencoded.
#[derive(Debug, serde::Deserialize)]
struct Command {
    user_id: String,
    text: String,
    token: String,
}

/// Interactive-message callback: a single urlencoded `payload` field
/// holding the JSON document below.
#[derive(Debug, serde::Deserialize)]
struct Interaction {
    payload: String,
}

#[derive(Debug, serde::Deserialize)]
struct Payload {
    token: String,
    callback_id: String,
    user: Sender,
    actions: Vec<Action>,
}

#[derive(Debug, serde::Deserialize)]
struct Sender {
    id: String,
}

pub struct Server;

impl Server {
    pub async fn run() -> Result<(), std::io::Error> {
        let config = Config::from_env();
        let port = config.port;
        let chat: Arc<dyn Chat> = Arc::new(Slack::from(&config));
        let bank: Arc<dyn Bank> = Arc::new(Briq::from(&config));
        let state = web::Data::new(Shifubriq::new(chat, bank, config));
        log::info!("starting shifubriq server on port {}", port);
        HttpServer::new(move || {
            App::new()
                .wrap(Logger::new("%r %s %Ts"))
                .app_data(state.clone())
                .service(
                    web::scope("/api")
                        .route("/shifubriq", web::post().to(initiate))
                        .route("/action", web::post().to(play)),
                )
        })
        .workers(4)
        .bind(("0.0.0.0", port))?
        .run()
        .await
    }
}

async fn initiate(shifubriq: web::Data<Shifubriq>, form: web::Form<Command>) -> impl Responder {
    if !shifubriq.verify(&form.token) {
        return HttpResponse::Unauthorized().body("Wrong verification token");
    }
    match shifubriq.initiate(&form.user_id, &form.text).await {
        Ok(Initiation::Initiated) => HttpResponse::Ok().finish(),
        Ok(Initiation::StillWaiting) => HttpResponse::Ok().body("Still waiting"),
        Ok(Initiation::Rejected(reason)) => HttpResponse::Ok().body(rejection(reason, &form.text)),
        Err(e) => {
            log::error!("failed to initiate game: {}", e);
            HttpResponse::InternalServerError().body("An error occured")
        }
    }
}

fn rejection(reason: MentionError, text: &str) -> String {
    match reason {
        MentionError::NoArgument => {
            "You need to add the username, try `/shifubriq @username`".to_string()
        }
        MentionError::TooManyArguments => {
            "Shifubriq cannot understand the username, too many arguments; try `/shifubriq @username`"
                .to_string()
        }
        MentionError::NoUserName => {
            format!("`{}` is not a valid username, try `/shifubriq @username`", text)
        }
    }
}

async fn play(shifubriq: web::Data<Shifubriq>, form: web::Form<Interaction>) -> impl Responder {
    let payload = match serde_json::from_str::<Payload>(&form.payload) {
        Ok(payload) => payload,
        Err(e) => {
            log::warn!("unreadable action payload: {}", e);
            return HttpResponse::BadRequest().body("An error occured");
        }
    };
    if !shifubriq.verify(&payload.token) {
        return HttpResponse::Unauthorized().body("Wrong verification token");
    }
    let Some(action) = payload.actions.first() else {
        return HttpResponse::Ok().body("Unknown action ¯\\_(ツ)_/¯");
    };
    match shifubriq.play(&payload.callback_id, &payload.user.id, action).await {
        Ok(Played::Unknown) => HttpResponse::Ok().body("Unknown action ¯\\_(ツ)_/¯"),
        Ok(Played::Pending) => HttpResponse::Ok().body("Thanks. I'm waiting for the other player"),
        Ok(Played::Tie) | Ok(Played::Win { .. }) => {
            HttpResponse::Ok().body("Thanks. And the result is…")
        }
        Err(e) => {
            log::error!("failed to play move: {}", e);
            HttpResponse::InternalServerError().body("An error occured")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::testing::*;
    use actix_web::test;

    const TOKEN: &str = "token-example";

    fn state() -> web::Data<Shifubriq> {
        let chat: Arc<dyn Chat> = Arc::new(FakeChat::with_users(&[("U1", "alice"), ("U2", "bob")]));
        let bank: Arc<dyn Bank> = Arc::new(FakeBank::default());
        web::Data::new(Shifubriq::new(chat, bank, Config::default()))
    }

    macro_rules! app {
        () => {
            test::init_service(
                App::new().app_data(state()).service(
                    web::scope("/api")
                        .route("/shifubriq", web::post().to(initiate))
                        .route("/action", web::post().to(play)),
                ),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn wrong_token_is_rejected_before_the_core() {
        let app = app!();
        let request = test::TestRequest::post()
            .uri("/api/shifubriq")
            .set_form([("user_id", "U1"), ("text", "<@U2|bob>"), ("token", "wrong")])
            .to_request();
        let response = test::call_service(&app, request).await;
        assert!(response.status() == actix_web::http::StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn missing_username_gets_a_hint() {
        let app = app!();
        let request = test::TestRequest::post()
            .uri("/api/shifubriq")
            .set_form([("user_id", "U1"), ("text", ""), ("token", TOKEN)])
            .to_request();
        let response = test::call_service(&app, request).await;
        let body = test::read_body(response).await;
        assert!(body == "You need to add the username, try `/shifubriq @username`");
    }

    #[actix_web::test]
    async fn chatty_free_text_gets_a_hint() {
        let app = app!();
        let request = test::TestRequest::post()
            .uri("/api/shifubriq")
            .set_form([("user_id", "U1"), ("text", "play with me"), ("token", TOKEN)])
            .to_request();
        let response = test::call_service(&app, request).await;
        let body = test::read_body(response).await;
        assert!(
            body == "Shifubriq cannot understand the username, too many arguments; try `/shifubriq @username`"
        );
    }

    #[actix_web::test]
    async fn garbled_username_echoes_the_text() {
        let app = app!();
        let request = test::TestRequest::post()
            .uri("/api/shifubriq")
            .set_form([("user_id", "U1"), ("text", "@bob"), ("token", TOKEN)])
            .to_request();
        let response = test::call_service(&app, request).await;
        let body = test::read_body(response).await;
        assert!(body == "`@bob` is not a valid username, try `/shifubriq @username`");
    }

    #[actix_web::test]
    async fn launching_a_game_answers_silently() {
        let app = app!();
        let request = test::TestRequest::post()
            .uri("/api/shifubriq")
            .set_form([("user_id", "U1"), ("text", "<@U2|bob>"), ("token", TOKEN)])
            .to_request();
        let response = test::call_service(&app, request).await;
        assert!(response.status() == actix_web::http::StatusCode::OK);
        let body = test::read_body(response).await;
        assert!(body.is_empty());
    }

    #[actix_web::test]
    async fn unknown_action_shrugs() {
        let app = app!();
        let payload = serde_json::json!({
            "token": TOKEN,
            "callback_id": "U1-U2",
            "user": { "id": "U1" },
            "actions": [{ "name": "other", "value": "rock" }],
        });
        let request = test::TestRequest::post()
            .uri("/api/action")
            .set_form([("payload", payload.to_string())])
            .to_request();
        let response = test::call_service(&app, request).await;
        let body = test::read_body(response).await;
        assert!(body == "Unknown action ¯\\_(ツ)_/¯".as_bytes());
    }
}
