// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::pin::pin;
use std::sync::Arc;

use async_graphql_parser::{
    Pos,
    types::{ExecutableDocument, OperationType},
};
use futures::StreamExt;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, error, instrument};

use crate::{
    OperationsPayload,
    introspection::definition::schema::{MUTATION_ROOT_TYPENAME, QUERY_ROOT_TYPENAME, Schema},
    plugin::{SubsystemGraphQLResolver, SubsystemResolutionError},
    validation::{
        document_validator::DocumentValidator, field::ValidatedField,
        operation::ValidatedOperation, validation_error::ValidationError,
    },
};

/// The top-level system resolver.
///
/// Delegates to subsystem resolvers to resolve individual operations.
pub struct GraphQLSystemResolver {
    subsystem_resolvers: Vec<Arc<dyn SubsystemGraphQLResolver + Send + Sync>>,
    pub schema: Arc<Schema>,
    normal_query_depth_limit: usize,
    introspection_query_depth_limit: usize,
}

impl GraphQLSystemResolver {
    pub fn new(
        subsystem_resolvers: Vec<Arc<dyn SubsystemGraphQLResolver + Send + Sync>>,
        schema: Arc<Schema>,
        normal_query_depth_limit: usize,
        introspection_query_depth_limit: usize,
    ) -> Self {
        Self {
            subsystem_resolvers,
            schema,
            normal_query_depth_limit,
            introspection_query_depth_limit,
        }
    }

    /// Resolve the provided top-level operation (which may contain multiple queries or mutations).
    ///
    /// Root fields are resolved in the order they were selected (after fragments are inlined), so
    /// top-level fragments such as the following are supported:
    ///
    /// ```graphql
    /// {
    ///   ...query_info
    /// }
    ///
    /// fragment query_info on Query {
    ///   __type(name: "Country") {
    ///     name
    ///   }
    ///
    ///   __schema {
    ///       types {
    ///       name
    ///     }
    ///   }
    /// }
    /// ```
    #[instrument(
        name = "SystemResolver::resolve_operations"
        skip_all
        )]
    pub async fn resolve_operations(
        &self,
        operations_payload: OperationsPayload,
    ) -> Result<Vec<(String, Value)>, SystemResolutionError> {
        let operation = self.validate_operation(
            &operations_payload.query,
            operations_payload.operation_name,
            operations_payload.variables,
        )?;

        debug!(
            operation_name = ?operation.name,
            fields = operation.fields.len(),
            "Validated operation"
        );

        let mut resolved = Vec::with_capacity(operation.fields.len());
        for field in &operation.fields {
            let value = self.resolve_root_field(operation.typ, field).await?;
            resolved.push((field.output_name(), value));
        }

        Ok(resolved)
    }

    async fn resolve_root_field(
        &self,
        operation_type: OperationType,
        field: &ValidatedField,
    ) -> Result<Value, SystemResolutionError> {
        if field.name.as_str() == "__typename" {
            let root_typename = match operation_type {
                OperationType::Mutation => MUTATION_ROOT_TYPENAME,
                _ => QUERY_ROOT_TYPENAME,
            };
            return Ok(Value::String(root_typename.to_string()));
        }

        self.resolve_operation(operation_type, field).await
    }

    pub(super) async fn resolve_operation(
        &self,
        operation_type: OperationType,
        operation: &ValidatedField,
    ) -> Result<Value, SystemResolutionError> {
        let stream = futures::stream::iter(self.subsystem_resolvers.iter())
            .then(|resolver| async { resolver.resolve(operation, operation_type).await });

        let mut stream = pin!(stream);

        // Really a find_map(), but StreamExt::find_map() is not available
        while let Some(next_val) = stream.next().await {
            if let Some(val) = next_val? {
                // Found a resolver that could return a value (or an error), so we are done resolving
                return Ok(val);
            }
        }

        // Introspection fields are validated against the schema but only resolvable if the
        // introspection subsystem is mounted
        if operation.name.starts_with("__") {
            Err(SystemResolutionError::IntrospectionNotAllowed)
        } else {
            Err(SystemResolutionError::NoResolverFound)
        }
    }

    #[instrument(skip_all)]
    fn validate_operation(
        &self,
        query: &str,
        operation_name: Option<String>,
        variables: Option<Map<String, Value>>,
    ) -> Result<ValidatedOperation, ValidationError> {
        let document = parse_query(query)?;

        let document_validator = DocumentValidator::new(
            &self.schema,
            operation_name,
            variables,
            self.normal_query_depth_limit,
            self.introspection_query_depth_limit,
        );

        document_validator.validate(document)
    }
}

#[instrument(name = "system_resolver::parse_query")]
fn parse_query(query: &str) -> Result<ExecutableDocument, ValidationError> {
    async_graphql_parser::parse_query(query).map_err(|error| {
        error!(%error, "Failed to parse query");
        let (message, pos1, pos2) = match error {
            async_graphql_parser::Error::Syntax {
                message,
                start,
                end,
            } => (format!("Syntax error:\n{message}"), start, end),
            async_graphql_parser::Error::MultipleRoots { root, schema, pos } => {
                (format!("Multiple roots of {root} type"), schema, Some(pos))
            }
            async_graphql_parser::Error::MissingQueryRoot { pos } => {
                ("Missing query root".to_string(), pos, None)
            }
            async_graphql_parser::Error::MultipleOperations {
                anonymous,
                operation,
            } => (
                "Multiple operations".to_string(),
                anonymous,
                Some(operation),
            ),
            async_graphql_parser::Error::OperationDuplicated {
                operation: _,
                first,
                second,
            } => ("Operation duplicated".to_string(), first, Some(second)),
            async_graphql_parser::Error::FragmentDuplicated {
                fragment,
                first,
                second,
            } => (
                format!("Fragment {fragment} duplicated"),
                first,
                Some(second),
            ),
            async_graphql_parser::Error::MissingOperation => {
                ("Missing operation".to_string(), Pos::default(), None)
            }
            _ => ("Unknown error".to_string(), Pos::default(), None),
        };

        ValidationError::QueryParsingFailed(message, pos1, pos2)
    })
}

#[derive(Error, Debug)]
pub enum RequestError {
    #[error("Invalid body JSON {0}")]
    InvalidBodyJson(serde_json::Error),
}

#[derive(Error, Debug)]
pub enum SystemResolutionError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("No subsystem resolver found")]
    NoResolverFound,

    #[error("Introspection is not allowed")]
    IntrospectionNotAllowed,

    #[error("{0}")]
    SubsystemResolutionError(#[from] SubsystemResolutionError),

    #[error("Invalid request {0}")]
    RequestError(#[from] RequestError),
}

impl SystemResolutionError {
    // Message that should be emitted when the error is returned to the user.
    // This should hide any internal details of the error.
    pub fn user_error_message(&self) -> String {
        self.explicit_message()
            .unwrap_or_else(|| "Internal server error".to_string())
    }

    pub fn explicit_message(&self) -> Option<String> {
        match self {
            SystemResolutionError::Validation(error) => Some(error.to_string()),
            SystemResolutionError::SubsystemResolutionError(error) => error.user_error_message(),
            SystemResolutionError::IntrospectionNotAllowed => Some(self.to_string()),
            SystemResolutionError::RequestError(error) => Some(error.to_string()),
            SystemResolutionError::NoResolverFound => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::test_schema::{WidgetResolver, test_schema};

    fn system_resolver() -> GraphQLSystemResolver {
        GraphQLSystemResolver::new(
            vec![Arc::new(WidgetResolver)],
            Arc::new(test_schema()),
            5,
            15,
        )
    }

    fn payload(query: &str) -> OperationsPayload {
        OperationsPayload {
            operation_name: None,
            query: query.to_string(),
            variables: None,
        }
    }

    #[tokio::test]
    async fn resolves_root_fields_in_order() {
        let resolved = system_resolver()
            .resolve_operations(payload(
                "{ second: widgets(first: 1) { name } __typename first: widgets(first: 2) { id } }",
            ))
            .await
            .unwrap();

        assert_eq!(
            resolved,
            vec![
                ("second".to_string(), json!([{"name": "widget-0"}])),
                ("__typename".to_string(), json!("Query")),
                ("first".to_string(), json!([{"id": 0}, {"id": 1}])),
            ]
        );
    }

    #[tokio::test]
    async fn introspection_without_resolver() {
        let error = system_resolver()
            .resolve_operations(payload("{ __schema { queryType { name } } }"))
            .await
            .unwrap_err();

        assert!(matches!(
            error,
            SystemResolutionError::IntrospectionNotAllowed
        ));
        assert_eq!(error.user_error_message(), "Introspection is not allowed");
    }

    #[tokio::test]
    async fn unresolved_field_hides_details() {
        let error = system_resolver()
            .resolve_operations(payload("{ gadget(id: 1) { id } }"))
            .await
            .unwrap_err();

        assert!(matches!(error, SystemResolutionError::NoResolverFound));
        assert_eq!(error.user_error_message(), "Internal server error");
    }

    #[tokio::test]
    async fn syntax_error() {
        let error = system_resolver()
            .resolve_operations(payload("{ widgets(first: 1) { id }"))
            .await
            .unwrap_err();

        match error {
            SystemResolutionError::Validation(ValidationError::QueryParsingFailed(
                message,
                pos,
                _,
            )) => {
                assert!(message.starts_with("Syntax error"), "{message}");
                assert_eq!(pos.line, 1);
            }
            other => panic!("Unexpected error {other:?}"),
        }
    }
}
