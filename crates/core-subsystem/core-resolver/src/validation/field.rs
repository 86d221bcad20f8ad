// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_graphql_value::{ConstValue, Name, indexmap::IndexMap};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedField {
    pub alias: Option<Name>,
    /// The name of the field.
    pub name: Name,
    /// The object type this field applies to when selected through a union (`... on Country {
    /// name }`). `None` if the field applies whatever the runtime type is.
    pub type_condition: Option<Name>,
    /// The arguments to the field (with defaults applied), empty if no arguments are provided.
    pub arguments: IndexMap<String, ConstValue>,

    /// The subfields being selected in this field, if it is an object. Empty if no fields are
    /// being selected.
    pub subfields: Vec<ValidatedField>,
}

impl ValidatedField {
    pub fn output_name(&self) -> String {
        self.alias.as_ref().unwrap_or(&self.name).to_string()
    }

    /// Whether this field should be resolved for a value whose runtime type is `type_name`.
    pub fn applies_to(&self, type_name: &str) -> bool {
        self.type_condition
            .as_ref()
            .is_none_or(|condition| condition.as_str() == type_name)
    }

    /// Deserialize the arguments into a typed bundle.
    pub fn arguments_as<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        let arguments = self
            .arguments
            .iter()
            .map(|(name, value)| Ok((name.clone(), value.clone().into_json()?)))
            .collect::<Result<Map<String, Value>, serde_json::Error>>()?;

        serde_json::from_value(Value::Object(arguments))
    }
}
