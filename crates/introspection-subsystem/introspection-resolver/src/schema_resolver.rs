// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_graphql_parser::types::{BaseType, Type};
use async_graphql_value::Name;
use core_resolver::introspection::definition::schema::{
    MUTATION_ROOT_TYPENAME, QUERY_ROOT_TYPENAME, Schema,
};
use core_resolver::plugin::SubsystemResolutionError;
use core_resolver::validation::field::ValidatedField;
use serde_json::Value;

use crate::field_resolver::FieldResolver;

use super::resolver_support::Resolver;

fn root_type(name: &str) -> Type {
    Type {
        base: BaseType::Named(Name::new(name)),
        nullable: true,
    }
}

impl FieldResolver for Schema {
    fn resolve_field(
        &self,
        field: &ValidatedField,
        schema: &Schema,
    ) -> Result<Value, SubsystemResolutionError> {
        match field.name.as_str() {
            "description" => Ok(Value::Null),
            "types" => self.type_definitions.resolve_value(&field.subfields, schema),
            "queryType" => root_type(QUERY_ROOT_TYPENAME).resolve_value(&field.subfields, schema),
            "mutationType" => {
                if self.has_mutations() {
                    root_type(MUTATION_ROOT_TYPENAME).resolve_value(&field.subfields, schema)
                } else {
                    Ok(Value::Null)
                }
            }
            "subscriptionType" => Ok(Value::Null),
            "directives" => self.directives.resolve_value(&field.subfields, schema),
            "__typename" => Ok(Value::String("__Schema".to_string())),
            field_name => Err(SubsystemResolutionError::InvalidField(
                field_name.to_owned(),
                "Schema",
            )),
        }
    }
}
