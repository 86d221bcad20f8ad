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
use common::env_const::get_graphql_http_path;
use common::http::{Headers, RequestHead, RequestPayload, ResponseBody, ResponsePayload};
use common::router::Router;
use core_resolver::introspection::definition::schema::Schema;
use core_resolver::plugin::SubsystemGraphQLResolver;
use http::StatusCode;

use ::tracing::instrument;
use almanac_env::{EnvError, Environment};
use async_graphql_parser::Pos;
use async_stream::try_stream;
use bytes::Bytes;
use core_resolver::system_resolver::GraphQLSystemResolver;
use core_resolver::system_resolver::{RequestError, SystemResolutionError};
pub use core_resolver::OperationsPayload;
use serde_json::{Value, json};

use crate::query_depth::query_depth_limits;

pub struct GraphQLRouter {
    system_resolver: GraphQLSystemResolver,
    graphql_path: String,
}

impl GraphQLRouter {
    pub fn new(system_resolver: GraphQLSystemResolver, env: &dyn Environment) -> Self {
        Self {
            system_resolver,
            graphql_path: get_graphql_http_path(env),
        }
    }

    /// Combine the subsystem resolvers (and the introspection resolver, if any) into a router
    /// serving the GraphQL endpoint.
    pub fn from_resolvers(
        mut graphql_resolvers: Vec<Arc<dyn SubsystemGraphQLResolver + Send + Sync>>,
        introspection_resolver: Option<Arc<dyn SubsystemGraphQLResolver + Send + Sync>>,
        schema: Arc<Schema>,
        env: &dyn Environment,
    ) -> Result<Self, EnvError> {
        if let Some(introspection_resolver) = introspection_resolver {
            graphql_resolvers.push(introspection_resolver);
        }

        let (normal_query_depth_limit, introspection_query_depth_limit) =
            query_depth_limits(env)?;

        let system_resolver = GraphQLSystemResolver::new(
            graphql_resolvers,
            schema,
            normal_query_depth_limit,
            introspection_query_depth_limit,
        );

        Ok(Self::new(system_resolver, env))
    }

    fn suitable(&self, request_head: &(dyn RequestHead + Sync)) -> bool {
        request_head.get_path() == self.graphql_path
            && request_head.get_method() == http::Method::POST
    }
}

#[async_trait]
impl Router for GraphQLRouter {
    /// Resolves an incoming query, returning a response stream containing JSON and a set
    /// of HTTP headers. The JSON may be either the data returned by the query, or a list of errors
    /// if something went wrong.
    #[instrument(
        name = "GraphQLRouter::route"
        skip(self, request)
    )]
    async fn route(&self, request: &mut (dyn RequestPayload + Send)) -> Option<ResponsePayload> {
        if !self.suitable(request.get_head()) {
            return None;
        }

        let response = resolve_in_memory(request, &self.system_resolver).await;

        if let Err(SystemResolutionError::RequestError(e)) = response {
            tracing::error!("Error while resolving request: {:?}", e);
            return Some(ResponsePayload::error(
                &e.to_string(),
                StatusCode::BAD_REQUEST,
            ));
        }

        let mut headers = Headers::new();
        headers.insert("content-type".into(), "application/json".into());

        let stream = try_stream! {
            match response {
                Ok(parts) => {
                    let parts_len = parts.len();
                    yield Bytes::from_static(br#"{"data": {"#);
                    for (index, (name, value)) in parts.into_iter().enumerate() {
                        yield Bytes::from_static(b"\"");
                        yield Bytes::from(name);
                        yield Bytes::from_static(br#"":"#);
                        yield Bytes::from(value.to_string());
                        if index != parts_len - 1 {
                            yield Bytes::from_static(b", ");
                        }
                    };
                    yield Bytes::from_static(b"}}");
                },
                Err(err) => {
                    yield Bytes::from(error_body(&err).to_string());
                },
            }
        };

        Some(ResponsePayload {
            body: ResponseBody::Stream(Box::pin(stream)),
            headers,
            status_code: StatusCode::OK,
        })
    }
}

fn error_body(err: &SystemResolutionError) -> Value {
    let mut error = json!({ "message": err.user_error_message() });

    if let SystemResolutionError::Validation(err) = err {
        let locations: Vec<Value> = err.positions().into_iter().map(location).collect();
        error["locations"] = Value::Array(locations);
    } else {
        tracing::warn!("Error while resolving operation: {err:?}");
    }

    json!({ "errors": [error] })
}

fn location(p: Pos) -> Value {
    json!({ "line": p.line, "column": p.column })
}

#[instrument(
    name = "GraphQLRouter::resolve_in_memory"
    skip(system_resolver, request)
)]
async fn resolve_in_memory(
    request: &mut (dyn RequestPayload + Send),
    system_resolver: &GraphQLSystemResolver,
) -> Result<Vec<(String, Value)>, SystemResolutionError> {
    let body = request.take_body();

    let operations_payload = OperationsPayload::from_json(body)
        .map_err(|e| SystemResolutionError::RequestError(RequestError::InvalidBodyJson(e)))?;

    system_resolver.resolve_operations(operations_payload).await
}

#[cfg(test)]
mod tests {
    use async_graphql_parser::types::{FieldDefinition, OperationType, TypeDefinition};
    use common::test_support::{TestRequest, body_json};
    use core_resolver::{
        introspection::definition::subsystem_schema::SubsystemSchema,
        plugin::SubsystemResolutionError, validation::field::ValidatedField,
    };
    use http::Method;

    use almanac_env::MapEnvironment;
    use common::env_const::{ALMANAC_GRAPHQL_HTTP_PATH, ALMANAC_MAX_SELECTION_DEPTH};

    use super::*;

    const SDL: &str = r#"
        type Query {
            greeting(name: String!): Greeting
            broken: Greeting
        }

        type Greeting {
            text: String
            echo: Greeting
        }
    "#;

    struct GreetingResolver {
        schema: SubsystemSchema,
    }

    #[async_trait]
    impl SubsystemGraphQLResolver for GreetingResolver {
        fn id(&self) -> &'static str {
            "greeting"
        }

        async fn resolve<'a>(
            &'a self,
            field: &'a ValidatedField,
            _operation_type: OperationType,
        ) -> Result<Option<Value>, SubsystemResolutionError> {
            match field.name.as_str() {
                "greeting" => {
                    let name = field.arguments["name"].to_string();
                    Ok(Some(json!({ "text": format!("Hello, {}", name.trim_matches('"')) })))
                }
                "broken" => Err(SubsystemResolutionError::UserDisplayError(
                    "Greeting unavailable".to_string(),
                )),
                _ => Ok(None),
            }
        }

        fn schema_queries(&self) -> Vec<FieldDefinition> {
            self.schema.queries.clone()
        }

        fn schema_mutations(&self) -> Vec<FieldDefinition> {
            vec![]
        }

        fn schema_types(&self) -> Vec<TypeDefinition> {
            self.schema.types.clone()
        }
    }

    fn router(env: &MapEnvironment) -> GraphQLRouter {
        let resolvers: Vec<Arc<dyn SubsystemGraphQLResolver + Send + Sync>> =
            vec![Arc::new(GreetingResolver {
                schema: SubsystemSchema::parse(SDL).unwrap(),
            })];
        let schema = Arc::new(Schema::new_from_resolvers(&resolvers, true).unwrap());

        GraphQLRouter::from_resolvers(resolvers, None, schema, env).unwrap()
    }

    async fn post(router: &GraphQLRouter, path: &str, body: Value) -> (StatusCode, Value) {
        let response = router
            .route(&mut TestRequest::graphql(path, body))
            .await
            .unwrap();

        assert_eq!(
            response.headers.get("content-type").as_deref(),
            Some("application/json")
        );

        (response.status_code, body_json(response.body).await)
    }

    #[tokio::test]
    async fn resolves_query() {
        let router = router(&MapEnvironment::new());

        let response = post(
            &router,
            "/graphql",
            json!({ "query": r#"{ hi: greeting(name: "Ada") { text } }"# }),
        )
        .await;

        assert_eq!(
            response,
            (
                StatusCode::OK,
                json!({ "data": { "hi": { "text": "Hello, Ada" } } })
            )
        );
    }

    #[tokio::test]
    async fn validation_errors_carry_locations() {
        let router = router(&MapEnvironment::new());

        let (status, body) = post(
            &router,
            "/graphql",
            json!({ "query": "{\n  greeting(name: \"Ada\") { color }\n}" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["errors"][0]["locations"],
            json!([{ "line": 2, "column": 27 }])
        );
        assert!(
            body["errors"][0]["message"]
                .as_str()
                .unwrap()
                .contains("color")
        );
    }

    #[tokio::test]
    async fn resolver_errors_are_reported() {
        let router = router(&MapEnvironment::new());

        let response = post(&router, "/graphql", json!({ "query": "{ broken { text } }" })).await;

        assert_eq!(
            response,
            (
                StatusCode::OK,
                json!({ "errors": [{ "message": "Greeting unavailable" }] })
            )
        );
    }

    #[tokio::test]
    async fn malformed_body_is_a_bad_request() {
        let router = router(&MapEnvironment::new());

        let response = router
            .route(&mut TestRequest::graphql("/graphql", json!({ "variables": 1 })))
            .await
            .unwrap();

        assert_eq!(response.status_code, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn configured_path_and_depth() {
        let env = MapEnvironment::from([
            (ALMANAC_GRAPHQL_HTTP_PATH, "/api"),
            (ALMANAC_MAX_SELECTION_DEPTH, "2"),
        ]);
        let router = router(&env);

        assert!(
            router
                .route(&mut TestRequest::graphql("/graphql", json!({ "query": "{ __typename }" })))
                .await
                .is_none()
        );
        assert!(
            router
                .route(&mut TestRequest::new(Method::GET, "/api"))
                .await
                .is_none()
        );

        let (_, body) = post(
            &router,
            "/api",
            json!({ "query": r#"{ greeting(name: "Ada") { echo { echo { text } } } }"# }),
        )
        .await;
        assert!(body["errors"][0]["message"].is_string());
    }
}
