// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_trait::async_trait;
use common::http::{Headers, RequestHead, RequestPayload, ResponsePayload};
use common::router::Router;
use common::{
    env_const::get_playground_http_path,
    http::{ResponseBody, strip_leading_slash},
    introspection::{IntrospectionMode, introspection_mode},
};
use almanac_env::{EnvError, Environment};
use http::StatusCode;
use thiserror::Error;

use crate::graphiql::{GraphiQLConfig, index_html};

#[derive(Error, Debug)]
pub enum PlaygroundError {
    #[error("{0}")]
    Env(#[from] EnvError),

    #[error("Failed to render the playground page: {0}")]
    Render(#[from] serde_json::Error),
}

pub struct PlaygroundRouterConfig {
    playground_path: String,
    introspection_mode: IntrospectionMode,
    index_html: String,
}

impl PlaygroundRouterConfig {
    /// `title` names the page; `default_query` is the query shown when GraphiQL opens.
    pub fn new(
        env: &dyn Environment,
        title: &str,
        default_query: &str,
    ) -> Result<Self, PlaygroundError> {
        Ok(Self {
            playground_path: strip_leading_slash(&get_playground_http_path(env)),
            introspection_mode: introspection_mode(env)?,
            index_html: index_html(&GraphiQLConfig::from_env(env, default_query), title)?,
        })
    }

    pub fn suitable(&self, request_path: &str, request_method: http::Method) -> bool {
        let request_path = strip_leading_slash(request_path);

        (request_path == self.playground_path || request_path.is_empty())
            && request_method == http::Method::GET
    }
}

pub struct PlaygroundRouter {
    config: PlaygroundRouterConfig,
}

impl PlaygroundRouter {
    pub fn new(config: PlaygroundRouterConfig) -> Self {
        Self { config }
    }

    fn suitable(&self, request_head: &(dyn RequestHead + Sync)) -> bool {
        self.config
            .suitable(&request_head.get_path(), request_head.get_method())
    }
}

#[async_trait]
impl Router for PlaygroundRouter {
    async fn route(&self, request: &mut (dyn RequestPayload + Send)) -> Option<ResponsePayload> {
        if !self.suitable(request.get_head()) {
            return None;
        }

        if self.config.introspection_mode == IntrospectionMode::Disabled {
            return Some(ResponsePayload {
                body: ResponseBody::Bytes("Introspection is disabled".as_bytes().to_vec()),
                headers: Headers::new(),
                status_code: StatusCode::OK,
            });
        }

        let path = strip_leading_slash(&request.get_head().get_path());

        if path.is_empty() {
            return Some(ResponsePayload {
                body: ResponseBody::Redirect(format!("/{}", self.config.playground_path)),
                headers: Headers::new(),
                status_code: StatusCode::PERMANENT_REDIRECT,
            });
        }

        // The page embeds the endpoint path, so it must not be cached
        let headers = vec![
            (
                http::header::CACHE_CONTROL.to_string(),
                "no-cache".to_string(),
            ),
            (
                http::header::CONTENT_TYPE.to_string(),
                "text/html; charset=utf-8".to_string(),
            ),
        ];

        Some(ResponsePayload {
            body: ResponseBody::Bytes(self.config.index_html.as_bytes().to_vec()),
            headers: Headers::from_vec(headers),
            status_code: StatusCode::OK,
        })
    }
}
