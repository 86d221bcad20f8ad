// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! In-memory requests for exercising routers without an HTTP server.

use futures::StreamExt;
use serde_json::Value;

use crate::http::{RequestHead, RequestPayload, ResponseBody};

pub struct TestRequestHead {
    method: http::Method,
    path: String,
    query: Value,
    headers: Vec<(String, String)>,
}

impl RequestHead for TestRequestHead {
    fn get_headers(&self, key: &str) -> Vec<String> {
        let key = key.to_lowercase();
        self.headers
            .iter()
            .filter(|(k, _)| k == &key)
            .map(|(_, v)| v.clone())
            .collect()
    }

    fn get_path(&self) -> String {
        self.path.clone()
    }

    fn get_query(&self) -> Value {
        self.query.clone()
    }

    fn get_method(&self) -> http::Method {
        self.method.clone()
    }
}

pub struct TestRequest {
    head: TestRequestHead,
    body: Value,
}

impl TestRequest {
    pub fn new(method: http::Method, path: &str) -> Self {
        Self {
            head: TestRequestHead {
                method,
                path: path.to_string(),
                query: Value::Object(Default::default()),
                headers: vec![],
            },
            body: Value::Null,
        }
    }

    /// A GraphQL POST carrying the given JSON body.
    pub fn graphql(path: &str, body: Value) -> Self {
        Self::new(http::Method::POST, path)
            .with_header("content-type", "application/json")
            .with_body(body)
    }

    pub fn with_body(self, body: Value) -> Self {
        Self { body, ..self }
    }

    pub fn with_query(mut self, query: Value) -> Self {
        self.head.query = query;
        self
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.head
            .headers
            .push((key.to_lowercase(), value.to_string()));
        self
    }
}

impl RequestPayload for TestRequest {
    fn get_head(&self) -> &(dyn RequestHead + Send + Sync) {
        &self.head
    }

    fn take_body(&mut self) -> Value {
        self.body.take()
    }
}

/// Collect a response body into bytes, following streams to their end.
pub async fn body_bytes(body: ResponseBody) -> Vec<u8> {
    match body {
        ResponseBody::Stream(stream) => {
            let chunks: Vec<_> = stream.collect().await;
            chunks
                .into_iter()
                .flat_map(|chunk| chunk.unwrap().to_vec())
                .collect()
        }
        ResponseBody::Bytes(bytes) => bytes,
        ResponseBody::Redirect(_) | ResponseBody::None => vec![],
    }
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(body: ResponseBody) -> Value {
    serde_json::from_slice(&body_bytes(body).await).unwrap()
}
