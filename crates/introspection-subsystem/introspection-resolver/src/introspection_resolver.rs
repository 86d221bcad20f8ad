// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use async_graphql_parser::types::{FieldDefinition, OperationType, TypeDefinition};
use core_resolver::{
    introspection::definition::schema::Schema,
    plugin::{SubsystemGraphQLResolver, SubsystemResolutionError},
    validation::field::ValidatedField,
};
use serde_json::Value;
use tracing::debug;

use crate::{field_resolver::FieldResolver, root_element::IntrospectionRootElement};

/// Answers `__schema` and `__type` queries against the assembled schema.
pub struct IntrospectionResolver {
    schema: Arc<Schema>,
}

impl IntrospectionResolver {
    pub fn new(schema: Arc<Schema>) -> Self {
        Self { schema }
    }
}

#[async_trait::async_trait]
impl SubsystemGraphQLResolver for IntrospectionResolver {
    fn id(&self) -> &'static str {
        "introspection"
    }

    async fn resolve<'a>(
        &'a self,
        field: &'a ValidatedField,
        _operation_type: OperationType,
    ) -> Result<Option<Value>, SubsystemResolutionError> {
        let name = field.name.as_str();

        if name.starts_with("__") {
            debug!(field = name, "Resolving introspection field");

            let introspection_root = IntrospectionRootElement { name };
            introspection_root
                .resolve_field(field, &self.schema)
                .map(Some)
        } else {
            Ok(None)
        }
    }

    fn schema_queries(&self) -> Vec<FieldDefinition> {
        vec![]
    }

    fn schema_mutations(&self) -> Vec<FieldDefinition> {
        vec![]
    }

    fn schema_types(&self) -> Vec<TypeDefinition> {
        vec![]
    }
}
