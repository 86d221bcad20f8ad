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
use dataset_store::Dataset;
use serde_json::Value;

use crate::{CHAMPIONS_SDL, model::Champion, operation_resolver::resolve_operation};

pub struct ChampionSubsystemResolver {
    pub id: &'static str,
    pub dataset: Arc<Dataset<Champion>>,
    schema: SubsystemSchema,
}

impl ChampionSubsystemResolver {
    pub fn new(id: &'static str, dataset: Arc<Dataset<Champion>>) -> Result<Self, SchemaError> {
        Ok(Self {
            id,
            dataset,
            schema: SubsystemSchema::parse(CHAMPIONS_SDL)?,
        })
    }
}

#[async_trait]
impl SubsystemGraphQLResolver for ChampionSubsystemResolver {
    fn id(&self) -> &'static str {
        self.id
    }

    async fn resolve<'a>(
        &'a self,
        field: &'a ValidatedField,
        operation_type: OperationType,
    ) -> Result<Option<Value>, SubsystemResolutionError> {
        resolve_operation(field, operation_type, &self.dataset)
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
