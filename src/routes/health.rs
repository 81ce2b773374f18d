use crate::models::responses::{ERROR, ReadinessResponse, SUCCESS};
use crate::state::{Readiness, SchedulerState};
use actix_web::{HttpResponse, Responder, get, web};

#[get("/ping")]
async fn ping() -> impl Responder {
    HttpResponse::Ok().body("pong")
}

// Distinguishes "still loading" and "fetch failed" from "no slots left".
#[get("/ready")]
async fn ready(state: web::Data<SchedulerState>) -> impl Responder {
    let snapshot = state.snapshot();
    let body = ReadinessResponse {
        status: if snapshot.readiness == Readiness::Ready {
            SUCCESS
        } else {
            ERROR
        },
        readiness: snapshot.readiness,
        morning: snapshot.morning,
        midday: snapshot.midday,
        afternoon: snapshot.afternoon,
        cursor: snapshot.cursor,
    };

    match snapshot.readiness {
        Readiness::Ready => HttpResponse::Ok().json(body),
        _ => HttpResponse::ServiceUnavailable().json(body),
    }
}

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(ping).service(ready);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_support::*;
    use actix_web::{App, http::StatusCode, test};

    #[actix_web::test]
    async fn ping_pongs() {
        let app = test::init_service(App::new().service(web::scope("/health").configure(init))).await;
        let req = test::TestRequest::get().uri("/health/ping").to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, web::Bytes::from_static(b"pong"));
    }

    #[actix_web::test]
    async fn ready_reflects_initialization() {
        let state = web::Data::new(state());
        let app = test::init_service(
            App::new()
                .app_data(state.clone())
                .service(web::scope("/health").configure(init)),
        )
        .await;

        let req = test::TestRequest::get().uri("/health/ready").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["readiness"], "pending");

        state.load(vec![slot("2024-12-26", "26/12/2024, 8:30 am")]);

        let req = test::TestRequest::get().uri("/health/ready").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "success");
        assert_eq!(body["readiness"], "ready");
        assert_eq!(body["morning"], 1);
        assert_eq!(body["cursor"], 0);
    }
}
