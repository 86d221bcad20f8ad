// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use core_resolver::{
    introspection::definition::schema::{DirectiveDescriptor, Schema},
    plugin::SubsystemResolutionError,
};
use serde_json::Value;

use core_resolver::validation::field::ValidatedField;

use crate::field_resolver::FieldResolver;

use super::resolver_support::Resolver;

impl FieldResolver for DirectiveDescriptor {
    fn resolve_field(
        &self,
        field: &ValidatedField,
        schema: &Schema,
    ) -> Result<Value, SubsystemResolutionError> {
        match field.name.as_str() {
            "name" => Ok(Value::String(self.name.to_owned())),
            "description" => Ok(Value::String(self.description.to_owned())),
            "isRepeatable" => Ok(Value::Bool(false)),
            "locations" => Ok(Value::Array(
                self.locations
                    .iter()
                    .map(|location| Value::String(location.to_string()))
                    .collect(),
            )),
            "args" => self.arguments.resolve_value(&field.subfields, schema),
            "__typename" => Ok(Value::String("__Directive".to_string())),
            field_name => Err(SubsystemResolutionError::InvalidField(
                field_name.to_owned(),
                "Directive",
            )),
        }
    }
}
