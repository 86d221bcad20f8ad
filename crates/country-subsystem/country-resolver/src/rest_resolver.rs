// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use async_trait::async_trait;
use common::http::{RequestHead, ResponsePayload};
use core_resolver::plugin::{SubsystemResolutionError, SubsystemRestResolver};
use dataset_store::{
    Dataset,
    query::{Page, paginate},
};
use http::{Method, StatusCode};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::model::Country;

const COUNTRIES_PATH: &str = "/countries";

/// Serves `GET /countries?first=<n>&offset=<m>`: a page of full country records.
pub struct CountryRestResolver {
    dataset: Arc<Dataset<Country>>,
}

#[derive(Error, Debug, PartialEq)]
enum QueryParamError {
    #[error("Query parameter '{0}' is required")]
    Missing(&'static str),

    #[error("Query parameter '{name}' must be a non-negative integer (got '{value}')")]
    Invalid { name: &'static str, value: String },
}

impl CountryRestResolver {
    pub fn new(dataset: Arc<Dataset<Country>>) -> Self {
        Self { dataset }
    }

    fn page(query: &Value) -> Result<Page, QueryParamError> {
        let first = query_param(query, "first")?.ok_or(QueryParamError::Missing("first"))?;
        let offset = query_param(query, "offset")?.unwrap_or(0);

        Ok(Page { first, offset })
    }
}

/// Query parameters arrive as strings, but accept JSON numbers as well.
fn query_param(query: &Value, name: &'static str) -> Result<Option<usize>, QueryParamError> {
    let invalid = |value: String| QueryParamError::Invalid { name, value };

    match query.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => value
            .trim()
            .parse::<usize>()
            .map(Some)
            .map_err(|_| invalid(value.clone())),
        Some(Value::Number(number)) => number
            .as_u64()
            .and_then(|n| usize::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| invalid(number.to_string())),
        Some(other) => Err(invalid(other.to_string())),
    }
}

#[async_trait]
impl SubsystemRestResolver for CountryRestResolver {
    fn id(&self) -> &'static str {
        "countries-rest"
    }

    async fn resolve<'a>(
        &self,
        request_head: &'a (dyn RequestHead + Send + Sync),
    ) -> Result<Option<ResponsePayload>, SubsystemResolutionError> {
        let path = request_head.get_path();
        if request_head.get_method() != Method::GET
            || path.trim_end_matches('/') != COUNTRIES_PATH
        {
            return Ok(None);
        }

        let response = match Self::page(&request_head.get_query()) {
            Ok(page) => {
                debug!(first = page.first, offset = page.offset, "GET /countries");

                let countries = serde_json::to_value(paginate(&self.dataset, page))
                    .map_err(|e| SubsystemResolutionError::UserDisplayError(e.to_string()))?;
                ResponsePayload::json(&countries, StatusCode::OK)
            }
            Err(e) => {
                warn!("Rejected GET /countries: {e}");
                ResponsePayload::error(&e.to_string(), StatusCode::BAD_REQUEST)
            }
        };

        Ok(Some(response))
    }
}
