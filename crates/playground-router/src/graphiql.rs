// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use almanac_env::Environment;
use common::env_const::{get_graphql_http_path, get_playground_http_path};
use serde::Serialize;

static INDEX_HTML: &str = include_str!("graphiql.html");

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GraphiQLConfig {
    pub playground_http_path: String,
    pub graphql_http_path: String,
    pub default_query: String,
}

impl GraphiQLConfig {
    pub fn from_env(env: &dyn Environment, default_query: &str) -> Self {
        Self {
            playground_http_path: get_playground_http_path(env),
            graphql_http_path: get_graphql_http_path(env),
            default_query: default_query.to_string(),
        }
    }
}

/// The GraphiQL page with the endpoint configuration substituted in.
pub(crate) fn index_html(
    config: &GraphiQLConfig,
    title: &str,
) -> Result<String, serde_json::Error> {
    let config = serde_json::to_string(config)?;

    Ok(INDEX_HTML
        .replace(
            "window.almanacConfig = {}",
            &format!("window.almanacConfig = {config}"),
        )
        .replace("%%TITLE%%", title))
}

#[cfg(test)]
mod tests {
    use almanac_env::MapEnvironment;
    use common::env_const::ALMANAC_GRAPHQL_HTTP_PATH;

    use super::*;

    #[test]
    fn substitutes_config() {
        let env = MapEnvironment::from([(ALMANAC_GRAPHQL_HTTP_PATH, "/api/graphql")]);
        let html = index_html(&GraphiQLConfig::from_env(&env, "{ __typename }"), "Countries")
            .unwrap();

        assert!(html.contains(r#""graphqlHttpPath":"/api/graphql""#));
        assert!(html.contains(r#""defaultQuery":"{ __typename }""#));
        assert!(html.contains("<title>Countries</title>"));
        assert!(!html.contains("window.almanacConfig = {};"));
    }
}
