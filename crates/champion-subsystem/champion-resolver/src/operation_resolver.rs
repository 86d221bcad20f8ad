// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_graphql_parser::types::OperationType;
use core_resolver::{
    Lookup, Resolver, plugin::SubsystemResolutionError, validation::field::ValidatedField,
};
use dataset_store::{
    Dataset,
    query::{filter_by_membership, filter_by_threshold, find_by_exact_field},
};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::debug;

use crate::{
    champion_execution_error::ChampionExecutionError,
    model::{Champion, Champions, NotFoundError},
};

#[derive(Debug, Deserialize)]
pub struct ChampionByNameArguments {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChampionsByTagArguments {
    pub tag: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChampionsByStatArguments {
    pub name: Option<String>,
    pub value: Option<f64>,
}

/// Returns `None` if the field is not a champions operation.
pub fn resolve_operation(
    field: &ValidatedField,
    operation_type: OperationType,
    dataset: &Dataset<Champion>,
) -> Result<Option<Value>, SubsystemResolutionError> {
    if operation_type != OperationType::Query {
        return Ok(None);
    }

    let selection = &field.subfields;

    let resolved = match field.name.as_str() {
        "getChampionByName" => {
            champion_by_name(dataset, arguments(field)?)?.resolve_value(selection)
        }
        "getChampionsByTag" => {
            champions_by_tag(dataset, arguments(field)?)?.resolve_value(selection)
        }
        "getChampionsByStatGte" => {
            champions_by_stat(dataset, arguments(field)?)?.resolve_value(selection)
        }
        _ => return Ok(None),
    };

    resolved.map(Some)
}

fn arguments<T: DeserializeOwned>(field: &ValidatedField) -> Result<T, ChampionExecutionError> {
    field
        .arguments_as()
        .map_err(|source| ChampionExecutionError::MalformedArguments {
            field: field.name.to_string(),
            source,
        })
}

fn collected(
    items: Vec<Champion>,
    not_found: impl FnOnce() -> NotFoundError,
) -> Lookup<Champions, NotFoundError> {
    if items.is_empty() {
        Lookup::NotFound(not_found())
    } else {
        Lookup::Found(Champions { items })
    }
}

pub fn champion_by_name(
    dataset: &Dataset<Champion>,
    arguments: ChampionByNameArguments,
) -> Result<Lookup<Champion, NotFoundError>, ChampionExecutionError> {
    debug!(name = ?arguments.name, "getChampionByName");

    let name = arguments
        .name
        .ok_or(ChampionExecutionError::MissingArgument("name"))?;

    let found = find_by_exact_field(dataset, |c: &Champion| c.name.as_deref(), &name);
    Ok(Lookup::from_option(found, || {
        NotFoundError::no_champion_named(&name)
    }))
}

/// Champions carrying the tag. Tags are compared exactly, including case.
pub fn champions_by_tag(
    dataset: &Dataset<Champion>,
    arguments: ChampionsByTagArguments,
) -> Result<Lookup<Champions, NotFoundError>, ChampionExecutionError> {
    debug!(tag = ?arguments.tag, "getChampionsByTag");

    let tag = arguments
        .tag
        .ok_or(ChampionExecutionError::MissingArgument("tag"))?;

    let items = filter_by_membership(dataset, |c: &Champion| c.tags.as_slice(), &tag);
    Ok(collected(items, || NotFoundError::no_champion_tagged(&tag)))
}

/// Champions whose stat is at least `value`. A champion without the stat never matches.
pub fn champions_by_stat(
    dataset: &Dataset<Champion>,
    arguments: ChampionsByStatArguments,
) -> Result<Lookup<Champions, NotFoundError>, ChampionExecutionError> {
    debug!(name = ?arguments.name, value = ?arguments.value, "getChampionsByStatGte");

    let name = arguments
        .name
        .ok_or(ChampionExecutionError::MissingArgument("name"))?;
    let value = arguments
        .value
        .ok_or(ChampionExecutionError::MissingArgument("value"))?;

    let items = filter_by_threshold(dataset, |c: &Champion| c.stats.get(&name), value);
    Ok(collected(items, || {
        NotFoundError::no_champion_with_stat(&name, value)
    }))
}
