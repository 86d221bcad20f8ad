// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_graphql_parser::Positioned;
use core_resolver::{
    introspection::definition::schema::Schema, plugin::SubsystemResolutionError,
    validation::field::ValidatedField,
};
use serde_json::Value;

use crate::field_resolver::FieldResolver;

pub(super) trait Resolver {
    fn resolve_value(
        &self,
        fields: &[ValidatedField],
        schema: &Schema,
    ) -> Result<Value, SubsystemResolutionError>;
}

impl<T> Resolver for Vec<T>
where
    T: Resolver,
{
    fn resolve_value(
        &self,
        fields: &[ValidatedField],
        schema: &Schema,
    ) -> Result<Value, SubsystemResolutionError> {
        self.iter()
            .map(|elem| elem.resolve_value(fields, schema))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array)
    }
}

impl<T> Resolver for T
where
    T: FieldResolver,
{
    fn resolve_value(
        &self,
        fields: &[ValidatedField],
        schema: &Schema,
    ) -> Result<Value, SubsystemResolutionError> {
        Ok(Value::Object(FromIterator::from_iter(
            self.resolve_fields(fields, schema)?,
        )))
    }
}

impl<T> Resolver for Positioned<T>
where
    T: Resolver,
{
    fn resolve_value(
        &self,
        fields: &[ValidatedField],
        schema: &Schema,
    ) -> Result<Value, SubsystemResolutionError> {
        self.node.resolve_value(fields, schema)
    }
}

impl<T> Resolver for Option<&T>
where
    T: Resolver,
{
    fn resolve_value(
        &self,
        fields: &[ValidatedField],
        schema: &Schema,
    ) -> Result<Value, SubsystemResolutionError> {
        match self {
            Some(elem) => elem.resolve_value(fields, schema),
            None => Ok(Value::Null),
        }
    }
}
