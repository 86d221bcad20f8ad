// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Results of union type `T | N`, where `N` signals that nothing matched the lookup.

use serde_json::Value;

use crate::{
    FieldResolver, plugin::SubsystemResolutionError, validation::field::ValidatedField,
};

/// The outcome of a lookup. Not finding anything is an ordinary result, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T, N> {
    Found(T),
    NotFound(N),
}

impl<T, N> Lookup<T, N> {
    /// `Found(value)` if there is one, otherwise `NotFound` built by `not_found`.
    pub fn from_option(value: Option<T>, not_found: impl FnOnce() -> N) -> Self {
        match value {
            Some(value) => Lookup::Found(value),
            None => Lookup::NotFound(not_found()),
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }
}

impl<T, N> FieldResolver for Lookup<T, N>
where
    T: FieldResolver,
    N: FieldResolver,
{
    fn type_name(&self) -> &'static str {
        match self {
            Lookup::Found(value) => value.type_name(),
            Lookup::NotFound(not_found) => not_found.type_name(),
        }
    }

    fn resolve_field(&self, field: &ValidatedField) -> Result<Value, SubsystemResolutionError> {
        match self {
            Lookup::Found(value) => value.resolve_field(field),
            Lookup::NotFound(not_found) => not_found.resolve_field(field),
        }
    }
}
