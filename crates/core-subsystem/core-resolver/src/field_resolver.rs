// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde_json::{Map, Value};

use crate::{plugin::SubsystemResolutionError, validation::field::ValidatedField};

/// Projects a value of a GraphQL object type onto a selection.
///
/// Resolution is synchronous: every value is already in memory by the time it is projected.
pub trait FieldResolver {
    /// The runtime GraphQL type of this value, reported through `__typename` and used to pick
    /// the fields selected through type conditions.
    fn type_name(&self) -> &'static str;

    // {
    //   name: ???
    // }
    // `field` is `name` and ??? is the return value
    fn resolve_field(&self, field: &ValidatedField) -> Result<Value, SubsystemResolutionError>;

    fn resolve_fields(
        &self,
        fields: &[ValidatedField],
    ) -> Result<Vec<(String, Value)>, SubsystemResolutionError> {
        let type_name = self.type_name();

        fields
            .iter()
            .filter(|field| field.applies_to(type_name))
            .map(|field| {
                let value = if field.name == "__typename" {
                    Value::String(type_name.to_string())
                } else {
                    self.resolve_field(field)?
                };
                Ok((field.output_name(), value))
            })
            .collect()
    }
}

/// A value (or a collection of them) that can be projected onto a selection.
pub trait Resolver {
    fn resolve_value(&self, fields: &[ValidatedField]) -> Result<Value, SubsystemResolutionError>;
}

impl<T> Resolver for T
where
    T: FieldResolver,
{
    fn resolve_value(&self, fields: &[ValidatedField]) -> Result<Value, SubsystemResolutionError> {
        Ok(Value::Object(Map::from_iter(self.resolve_fields(fields)?)))
    }
}

impl<T> Resolver for Vec<T>
where
    T: Resolver,
{
    fn resolve_value(&self, fields: &[ValidatedField]) -> Result<Value, SubsystemResolutionError> {
        self.iter()
            .map(|elem| elem.resolve_value(fields))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array)
    }
}

impl<T> Resolver for Option<T>
where
    T: Resolver,
{
    fn resolve_value(&self, fields: &[ValidatedField]) -> Result<Value, SubsystemResolutionError> {
        match self {
            Some(elem) => elem.resolve_value(fields),
            None => Ok(Value::Null),
        }
    }
}

#[cfg(test)]
mod tests {
    use async_graphql_value::{Name, indexmap::IndexMap};
    use serde_json::json;

    use super::*;

    struct Planet(&'static str);

    impl FieldResolver for Planet {
        fn type_name(&self) -> &'static str {
            "Planet"
        }

        fn resolve_field(&self, field: &ValidatedField) -> Result<Value, SubsystemResolutionError> {
            match field.name.as_str() {
                "name" => Ok(json!(self.0)),
                _ => Err(SubsystemResolutionError::InvalidField(
                    field.name.to_string(),
                    "Planet",
                )),
            }
        }
    }

    fn field(name: &str, alias: Option<&str>, type_condition: Option<&str>) -> ValidatedField {
        ValidatedField {
            alias: alias.map(Name::new),
            name: Name::new(name),
            type_condition: type_condition.map(Name::new),
            arguments: IndexMap::new(),
            subfields: vec![],
        }
    }

    #[test]
    fn projects_selection_in_order() {
        let fields = [
            field("__typename", None, None),
            field("name", Some("title"), None),
            field("name", None, Some("Planet")),
            field("moons", None, Some("Moon")),
        ];

        assert_eq!(
            Planet("Mars").resolve_value(&fields).unwrap(),
            json!({ "__typename": "Planet", "title": "Mars", "name": "Mars" })
        );
    }

    #[test]
    fn collections() {
        let fields = [field("name", None, None)];

        assert_eq!(
            vec![Planet("Mars"), Planet("Venus")]
                .resolve_value(&fields)
                .unwrap(),
            json!([{ "name": "Mars" }, { "name": "Venus" }])
        );
        assert_eq!(None::<Planet>.resolve_value(&fields).unwrap(), Value::Null);
    }

    #[test]
    fn unknown_field() {
        let fields = [field("mass", None, None)];

        assert!(matches!(
            Planet("Mars").resolve_value(&fields),
            Err(SubsystemResolutionError::InvalidField(..))
        ));
    }
}
