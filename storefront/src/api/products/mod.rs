mod endpoints;
use actix_web::web;
pub use endpoints::*;

mod model_impls;


#[rustfmt::skip]
pub fn products_router() -> actix_web::Scope {
    web::scope("/products")
        .service(create_product)
}
