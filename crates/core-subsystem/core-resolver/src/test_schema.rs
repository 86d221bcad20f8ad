// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_graphql_parser::types::{FieldDefinition, OperationType, TypeDefinition};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::{
    FieldResolver, Resolver,
    introspection::definition::{schema::Schema, subsystem_schema::SubsystemSchema},
    plugin::{SubsystemGraphQLResolver, SubsystemResolutionError},
    validation::field::ValidatedField,
};

pub(crate) const TEST_SDL: &str = r#"
type Query {
    widgets(first: Int!, offset: Int = 0): [Widget!]!
    widget(name: String!): WidgetResult!
    gadget(id: ID!): Gadget
}

type Mutation {
    createWidget(input: WidgetInput!): Widget!
}

type Widget {
    id: Int!
    name: String!
    tags: [String!]!
    gadget: Gadget
}

type Gadget {
    id: ID!
    widget: Widget
}

type Missing {
    message: String!
}

union WidgetResult = Widget | Missing

enum Size {
    SMALL
    LARGE
}

input WidgetInput {
    name: String!
    tags: [String!]
    size: Size
}
"#;

pub(crate) fn test_schema() -> Schema {
    let subsystem = SubsystemSchema::parse(TEST_SDL).unwrap();
    Schema::new(subsystem.types, subsystem.queries, subsystem.mutations).unwrap()
}

/// Serves `widgets` from a generated sequence; leaves everything else unresolved.
pub(crate) struct WidgetResolver;

struct Widget {
    id: i64,
}

impl FieldResolver for Widget {
    fn type_name(&self) -> &'static str {
        "Widget"
    }

    fn resolve_field(&self, field: &ValidatedField) -> Result<Value, SubsystemResolutionError> {
        match field.name.as_str() {
            "id" => Ok(Value::from(self.id)),
            "name" => Ok(Value::from(format!("widget-{}", self.id))),
            "tags" => Ok(Value::Array(vec![])),
            "gadget" => Ok(Value::Null),
            other => Err(SubsystemResolutionError::InvalidField(
                other.to_string(),
                "Widget",
            )),
        }
    }
}

#[derive(Deserialize)]
struct WidgetsArguments {
    first: i64,
    offset: i64,
}

#[async_trait]
impl SubsystemGraphQLResolver for WidgetResolver {
    fn id(&self) -> &'static str {
        "widget"
    }

    async fn resolve<'a>(
        &'a self,
        operation: &'a ValidatedField,
        operation_type: OperationType,
    ) -> Result<Option<Value>, SubsystemResolutionError> {
        match (operation_type, operation.name.as_str()) {
            (OperationType::Query, "widgets") => {
                let arguments: WidgetsArguments = operation.arguments_as().map_err(|e| {
                    SubsystemResolutionError::MalformedArguments {
                        field: "widgets".to_string(),
                        message: e.to_string(),
                    }
                })?;

                let widgets: Vec<Widget> = (arguments.offset..arguments.offset + arguments.first)
                    .map(|id| Widget { id })
                    .collect();

                widgets.resolve_value(&operation.subfields).map(Some)
            }
            _ => Ok(None),
        }
    }

    fn schema_queries(&self) -> Vec<FieldDefinition> {
        SubsystemSchema::parse(TEST_SDL).unwrap().queries
    }

    fn schema_mutations(&self) -> Vec<FieldDefinition> {
        SubsystemSchema::parse(TEST_SDL).unwrap().mutations
    }

    fn schema_types(&self) -> Vec<TypeDefinition> {
        SubsystemSchema::parse(TEST_SDL).unwrap().types
    }
}
