pub mod dates;
pub mod health;
pub mod slots;

use actix_web::web;

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/health").configure(health::init))
        .configure(slots::init)
        .configure(dates::init);
}
