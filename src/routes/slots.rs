use crate::handlers::slots::{live_slots, reset, suggest};
use crate::models::responses::{FetchErrorResponse, MessageResponse, SUCCESS, SuggestionsResponse};
use crate::scheduling::constants::{FETCH_FAILED, NO_MORE_SLOTS, SLOTS_RESET};
use crate::scheduling::fetcher::CalComClient;
use crate::state::SchedulerState;
use actix_web::{HttpResponse, Responder, get, web};

#[get("/get-available-slots")]
async fn get_available_slots(state: web::Data<SchedulerState>) -> impl Responder {
    match suggest(&state) {
        Some(slots) => HttpResponse::Ok().json(SuggestionsResponse {
            status: SUCCESS,
            slots,
        }),
        None => HttpResponse::Ok().json(MessageResponse::error(NO_MORE_SLOTS)),
    }
}

#[get("/reset-slots")]
async fn reset_slots(state: web::Data<SchedulerState>) -> impl Responder {
    reset(&state);
    HttpResponse::Ok().json(MessageResponse::success(SLOTS_RESET))
}

/// Live fetch, bypassing the buckets.
#[get("/available-slots")]
async fn available_slots(client: web::Data<CalComClient>) -> impl Responder {
    match live_slots(client.get_ref()).await {
        Ok(slots) => HttpResponse::Ok().json(slots),
        Err(_) => HttpResponse::InternalServerError().json(FetchErrorResponse {
            error: FETCH_FAILED,
        }),
    }
}

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(get_available_slots)
        .service(reset_slots)
        .service(available_slots);
}
