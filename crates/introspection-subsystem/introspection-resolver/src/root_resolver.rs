// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_graphql_value::ConstValue;
use core_resolver::introspection::definition::schema::Schema;
use core_resolver::plugin::SubsystemResolutionError;
use core_resolver::validation::field::ValidatedField;
use serde_json::Value;

use crate::field_resolver::FieldResolver;
use crate::root_element::IntrospectionRootElement;

use super::resolver_support::Resolver;

impl FieldResolver for IntrospectionRootElement<'_> {
    fn resolve_field(
        &self,
        field: &ValidatedField,
        schema: &Schema,
    ) -> Result<Value, SubsystemResolutionError> {
        match self.name {
            "__type" => resolve_type(field, schema),
            "__schema" => schema.resolve_value(&field.subfields, schema),
            _ => Err(SubsystemResolutionError::InvalidField(
                self.name.into(),
                "introspection root",
            )),
        }
    }
}

fn resolve_type(
    field: &ValidatedField,
    schema: &Schema,
) -> Result<Value, SubsystemResolutionError> {
    let type_name = field
        .arguments
        .get("name")
        .ok_or_else(|| SubsystemResolutionError::MissingArgument("name".to_string()))?;

    match type_name {
        ConstValue::String(name_specified) => schema
            .get_type_definition(name_specified)
            .resolve_value(&field.subfields, schema),
        _ => Ok(Value::Null),
    }
}
