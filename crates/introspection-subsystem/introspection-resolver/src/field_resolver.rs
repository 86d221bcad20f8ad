// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use core_resolver::{
    introspection::definition::schema::Schema, plugin::SubsystemResolutionError,
    validation::field::ValidatedField,
};
use serde_json::Value;

/// Resolves the fields of a schema element.
///
/// Unlike values served by data subsystems, schema elements need the full schema at hand to
/// follow type references, hence a separate trait.
pub trait FieldResolver {
    // {
    //   name: ???
    // }
    // `field` is `name` and ??? is the return value
    fn resolve_field(
        &self,
        field: &ValidatedField,
        schema: &Schema,
    ) -> Result<Value, SubsystemResolutionError>;

    fn resolve_fields(
        &self,
        fields: &[ValidatedField],
        schema: &Schema,
    ) -> Result<Vec<(String, Value)>, SubsystemResolutionError> {
        fields
            .iter()
            .map(|field| {
                self.resolve_field(field, schema)
                    .map(|value| (field.output_name(), value))
            })
            .collect()
    }
}
