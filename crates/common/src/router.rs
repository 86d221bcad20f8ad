// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use crate::http::{Headers, RequestPayload, ResponseBody, ResponsePayload};
use async_trait::async_trait;
use http::StatusCode;

/// A component that may handle a request.
///
/// Returning `None` means the request is not meant for this router and the next one should be
/// tried.
#[async_trait]
pub trait Router: Sync {
    async fn route(&self, request: &mut (dyn RequestPayload + Send)) -> Option<ResponsePayload>;
}

/// Tries each router in order and answers with a 404 if none of them handles the request.
pub struct CompositeRouter {
    routers: Vec<Box<dyn Router + Send + Sync>>,
}

impl CompositeRouter {
    pub fn new(routers: Vec<Box<dyn Router + Send + Sync>>) -> Self {
        Self { routers }
    }
}

#[async_trait]
impl Router for CompositeRouter {
    async fn route(&self, request: &mut (dyn RequestPayload + Send)) -> Option<ResponsePayload> {
        for router in self.routers.iter() {
            if let Some(response) = router.route(request).await {
                return Some(response);
            }
        }

        Some(ResponsePayload {
            body: ResponseBody::None,
            headers: Headers::new(),
            status_code: StatusCode::NOT_FOUND,
        })
    }
}

#[cfg(test)]
mod tests {
    use http::Method;

    use super::*;
    use crate::test_support::TestRequest;

    struct PathRouter(&'static str, StatusCode);

    #[async_trait]
    impl Router for PathRouter {
        async fn route(
            &self,
            request: &mut (dyn RequestPayload + Send),
        ) -> Option<ResponsePayload> {
            (request.get_head().get_path() == self.0).then(|| ResponsePayload {
                body: ResponseBody::None,
                headers: Headers::new(),
                status_code: self.1,
            })
        }
    }

    fn composite() -> CompositeRouter {
        CompositeRouter::new(vec![
            Box::new(PathRouter("/a", StatusCode::OK)),
            Box::new(PathRouter("/a", StatusCode::ACCEPTED)),
            Box::new(PathRouter("/b", StatusCode::CREATED)),
        ])
    }

    #[tokio::test]
    async fn first_matching_router_wins() {
        let router = composite();

        let a = router.route(&mut TestRequest::new(Method::GET, "/a")).await;
        assert_eq!(a.unwrap().status_code, StatusCode::OK);

        let b = router.route(&mut TestRequest::new(Method::GET, "/b")).await;
        assert_eq!(b.unwrap().status_code, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn unmatched_request_is_not_found() {
        let router = composite();

        let response = router.route(&mut TestRequest::new(Method::GET, "/c")).await;
        assert_eq!(response.unwrap().status_code, StatusCode::NOT_FOUND);
    }
}
