use crate::error::ConvertError;
use crate::handlers::dates::convert;
use crate::models::responses::{ConvertDateRequest, ConvertDateResponse, MessageResponse, SUCCESS};
use crate::scheduling::constants::{DATE_INVALID, DATE_REQUIRED};
use crate::scheduling::date_parser::ConversationalDateParser;
use actix_web::{HttpResponse, Responder, error, post, web};

#[post("/convert-date")]
async fn convert_date(
    parser: web::Data<ConversationalDateParser>,
    body: web::Json<ConvertDateRequest>,
) -> impl Responder {
    match convert(&parser, body.conversational_date.as_ref()) {
        Ok(iso_date) => HttpResponse::Ok().json(ConvertDateResponse {
            status: SUCCESS,
            iso_date,
        }),
        Err(ConvertError::Missing) => HttpResponse::BadRequest().json(MessageResponse::error(DATE_REQUIRED)),
        Err(ConvertError::Invalid(_)) => HttpResponse::BadRequest().json(MessageResponse::error(DATE_INVALID)),
    }
}

// A body that is not JSON at all is treated as a missing field.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        tracing::warn!("Rejected convert-date body: {}", err);
        error::InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(MessageResponse::error(DATE_REQUIRED)),
        )
        .into()
    })
}

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config()).service(convert_date);
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, http::StatusCode, test};
    use chrono::{DateTime, Datelike, Duration, Timelike, Utc, Weekday};
    use serde_json::{Value, json};

    fn app_parser() -> web::Data<ConversationalDateParser> {
        web::Data::new(ConversationalDateParser::new(chrono_tz::Australia::Sydney))
    }

    macro_rules! post_json {
        ($body:expr) => {{
            let app = test::init_service(App::new().app_data(app_parser()).configure(init)).await;
            let req = test::TestRequest::post()
                .uri("/convert-date")
                .set_json($body)
                .to_request();
            let resp = test::call_service(&app, req).await;
            let status = resp.status();
            let body: Value = test::read_body_json(resp).await;
            (status, body)
        }};
    }

    fn iso(body: &Value) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(body["isoDate"].as_str().unwrap())
            .unwrap()
            .with_timezone(&Utc)
    }

    #[actix_web::test]
    async fn converts_tomorrow() {
        let before = Utc::now().with_timezone(&chrono_tz::Australia::Sydney);
        let (status, body) = post_json!(json!({ "conversationalDate": "tomorrow at 9am" }));
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "success");

        let local = iso(&body).with_timezone(&chrono_tz::Australia::Sydney);
        assert_eq!((local.hour(), local.minute(), local.second()), (9, 0, 0));
        // Tolerate the request straddling midnight.
        let days = (local.date_naive() - before.date_naive()).num_days();
        assert!(days == 1 || days == 2, "got {days} days ahead");
    }

    #[actix_web::test]
    async fn converts_next_weekday() {
        let (status, body) = post_json!(json!({ "conversationalDate": "Next Friday at 3:30pm" }));
        assert_eq!(status, StatusCode::OK);

        let local = iso(&body).with_timezone(&chrono_tz::Australia::Sydney);
        assert_eq!(local.weekday(), Weekday::Fri);
        assert_eq!((local.hour(), local.minute()), (15, 30));
        assert!(iso(&body) - Utc::now() > Duration::days(7));
    }

    #[actix_web::test]
    async fn missing_field_is_400() {
        let (status, body) = post_json!(json!({}));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "error");
        assert_eq!(body["message"], DATE_REQUIRED);

        let (status, _) = post_json!(json!({ "conversationalDate": "" }));
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn unparsable_time_is_400() {
        let (status, body) = post_json!(json!({ "conversationalDate": "friday at banana" }));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "error");
        assert_eq!(body["message"], DATE_INVALID);
    }

    #[actix_web::test]
    async fn huge_hour_is_400() {
        let (status, body) = post_json!(json!({ "conversationalDate": "friday at 4294967295pm" }));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], DATE_INVALID);
    }

    #[actix_web::test]
    async fn non_string_field() {
        let (status, body) = post_json!(json!({ "conversationalDate": 5 }));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], DATE_INVALID);

        let (status, body) = post_json!(json!({ "conversationalDate": null }));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], DATE_REQUIRED);
    }

    #[actix_web::test]
    async fn malformed_body_is_400() {
        let app = test::init_service(App::new().app_data(app_parser()).configure(init)).await;
        let req = test::TestRequest::post()
            .uri("/convert-date")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], DATE_REQUIRED);
    }
}
