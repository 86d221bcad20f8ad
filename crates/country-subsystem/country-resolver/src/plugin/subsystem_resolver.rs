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
use async_trait::async_trait;

use core_resolver::{
    introspection::definition::{schema::SchemaError, subsystem_schema::SubsystemSchema},
    plugin::{SubsystemGraphQLResolver, SubsystemResolutionError},
    validation::field::ValidatedField,
};
use dataset_store::{Dataset, IdAssignment};
use serde_json::Value;

use crate::{COUNTRIES_SDL, model::Country, operation_resolver::resolve_operation};

pub struct CountrySubsystemResolver {
    pub id: &'static str,
    pub dataset: Arc<Dataset<Country>>,
    pub id_assignment: IdAssignment,
    schema: SubsystemSchema,
}

impl CountrySubsystemResolver {
    pub fn new(
        id: &'static str,
        dataset: Arc<Dataset<Country>>,
        id_assignment: IdAssignment,
    ) -> Result<Self, SchemaError> {
        Ok(Self {
            id,
            dataset,
            id_assignment,
            schema: SubsystemSchema::parse(COUNTRIES_SDL)?,
        })
    }
}

#[async_trait]
impl SubsystemGraphQLResolver for CountrySubsystemResolver {
    fn id(&self) -> &'static str {
        self.id
    }

    async fn resolve<'a>(
        &'a self,
        field: &'a ValidatedField,
        operation_type: OperationType,
    ) -> Result<Option<Value>, SubsystemResolutionError> {
        resolve_operation(field, operation_type, &self.dataset, &self.id_assignment)
    }

    fn schema_queries(&self) -> Vec<FieldDefinition> {
        self.schema.queries.clone()
    }

    fn schema_mutations(&self) -> Vec<FieldDefinition> {
        self.schema.mutations.clone()
    }

    fn schema_types(&self) -> Vec<TypeDefinition> {
        self.schema.types.clone()
    }
}
