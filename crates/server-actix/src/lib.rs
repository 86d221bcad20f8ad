// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod request;
mod server;

use actix_web::{
    HttpRequest, HttpResponse, Responder,
    web::{self, ServiceConfig},
};
use http::StatusCode;
use serde_json::Value;
use system_router::SystemRouter;

use common::{
    http::{RequestHead, RequestPayload, ResponseBody, ResponsePayload},
    router::Router,
};
use request::ActixRequestHead;

pub use server::{ServerError, run};

macro_rules! error_msg {
    ($msg:literal) => {
        concat!("{\"errors\": [{\"message\":\"", $msg, "\"}]}").as_bytes()
    };
}

pub fn configure_router(system_router: web::Data<SystemRouter>) -> impl FnOnce(&mut ServiceConfig) {
    move |app| {
        app.app_data(system_router)
            .default_service(web::to(resolve));
    }
}

/// Resolve any request (GraphQL, REST or playground) through the system router
async fn resolve(
    http_request: HttpRequest,
    body: Option<web::Json<Value>>,
    query: web::Query<Value>,
    system_router: web::Data<SystemRouter>,
) -> impl Responder {
    let mut request = ActixRequestPayload {
        head: ActixRequestHead::from_request(&http_request, query.into_inner()),
        body: body.map(|b| b.into_inner()).unwrap_or(Value::Null),
    };

    let response = system_router.route(&mut request).await;

    match response {
        Some(ResponsePayload {
            body,
            headers,
            status_code,
        }) => {
            let actix_status_code = match to_actix_status_code(status_code) {
                Ok(status_code) => status_code,
                Err(err) => {
                    tracing::error!("Invalid status code: {}", err);
                    return HttpResponse::build(actix_web::http::StatusCode::INTERNAL_SERVER_ERROR)
                        .body(error_msg!("Invalid status code"));
                }
            };

            let mut builder = HttpResponse::build(actix_status_code);

            for header in headers.into_iter() {
                builder.append_header(header);
            }

            match body {
                ResponseBody::Stream(stream) => builder.streaming(stream),
                ResponseBody::Bytes(bytes) => builder.body(bytes),
                ResponseBody::Redirect(url) => builder.append_header(("Location", url)).body(""),
                ResponseBody::None => builder.body(""),
            }
        }
        None => HttpResponse::build(actix_web::http::StatusCode::INTERNAL_SERVER_ERROR)
            .body(error_msg!("Error resolving request")),
    }
}

struct ActixRequestPayload {
    head: ActixRequestHead,
    body: Value,
}

impl RequestPayload for ActixRequestPayload {
    fn get_head(&self) -> &(dyn RequestHead + Send + Sync) {
        &self.head
    }

    fn take_body(&mut self) -> Value {
        self.body.take()
    }
}

// Actix uses http-0.2, so the status code has to cross over by its numeric value.
fn to_actix_status_code(status_code: StatusCode) -> Result<actix_web::http::StatusCode, String> {
    actix_web::http::StatusCode::from_u16(status_code.as_u16())
        .map_err(|_| "Invalid status code".to_string())
}
