// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_trait::async_trait;

use http::StatusCode;

use common::{
    http::{Headers, RequestPayload, ResponseBody, ResponsePayload},
    router::Router,
};
use core_resolver::system_rest_resolver::SystemRestResolver;

/// Routes plain HTTP requests to the subsystems' REST resolvers. Each resolver decides which
/// paths it serves.
pub struct RestRouter {
    system_resolver: SystemRestResolver,
}

impl RestRouter {
    pub fn new(system_resolver: SystemRestResolver) -> Self {
        Self { system_resolver }
    }
}

#[async_trait]
impl Router for RestRouter {
    async fn route(&self, request: &mut (dyn RequestPayload + Send)) -> Option<ResponsePayload> {
        if self.system_resolver.is_empty() {
            return None;
        }

        let request_head = request.get_head();

        match self.system_resolver.resolve(request_head).await {
            Ok(Some(response)) => Some(response),
            Err(e) => {
                tracing::error!("Error resolving subsystem: {}", e);
                Some(ResponsePayload {
                    body: ResponseBody::None,
                    headers: Headers::new(),
                    status_code: StatusCode::INTERNAL_SERVER_ERROR,
                })
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use common::http::RequestHead;
    use common::test_support::{TestRequest, body_json};
    use core_resolver::plugin::{SubsystemResolutionError, SubsystemRestResolver};
    use http::Method;
    use serde_json::json;

    use super::*;

    struct StatusResolver;

    #[async_trait]
    impl SubsystemRestResolver for StatusResolver {
        fn id(&self) -> &'static str {
            "status"
        }

        async fn resolve<'a>(
            &self,
            request_head: &'a (dyn RequestHead + Send + Sync),
        ) -> Result<Option<ResponsePayload>, SubsystemResolutionError> {
            match request_head.get_path().as_str() {
                "/status" => Ok(Some(ResponsePayload::json(
                    &json!({ "up": true }),
                    StatusCode::OK,
                ))),
                "/fail" => Err(SubsystemResolutionError::UserDisplayError(
                    "unavailable".to_string(),
                )),
                _ => Ok(None),
            }
        }
    }

    fn router() -> RestRouter {
        RestRouter::new(SystemRestResolver::new(vec![Box::new(StatusResolver)]))
    }

    #[tokio::test]
    async fn delegates_to_subsystem() {
        let response = router()
            .route(&mut TestRequest::new(Method::GET, "/status"))
            .await
            .unwrap();

        assert_eq!(response.status_code, StatusCode::OK);
        assert_eq!(body_json(response.body).await, json!({ "up": true }));
    }

    #[tokio::test]
    async fn declines_unknown_paths() {
        assert!(
            router()
                .route(&mut TestRequest::new(Method::GET, "/other"))
                .await
                .is_none()
        );
        assert!(
            RestRouter::new(SystemRestResolver::new(vec![]))
                .route(&mut TestRequest::new(Method::GET, "/status"))
                .await
                .is_none()
        );
    }

    #[tokio::test]
    async fn subsystem_failure_is_a_server_error() {
        let response = router()
            .route(&mut TestRequest::new(Method::GET, "/fail"))
            .await
            .unwrap();

        assert_eq!(response.status_code, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
