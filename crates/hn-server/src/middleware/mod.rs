//! Middleware stack para el servidor HTTP.
//!
//! Built from tower-http layers, applied outermost first:
//! - `SetRequestIdLayer`: genera X-Request-Id (UUID v7) si falta
//! - `HttpTraceLayer`: span `http_request` y log por request
//! - `PropagateRequestIdLayer`: copia X-Request-Id a la respuesta
//! - `CorsLayer`: origins permitidos

mod cors;
mod logging;
mod request_id;

pub use cors::cors_layer;
pub use logging::{HttpTraceLayer, LogResponse, RequestSpan, trace_layer};
pub use request_id::{
    MakeRequestUuidV7, REQUEST_ID_HEADER, propagate_request_id_layer, set_request_id_layer,
};
