// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use core_resolver::plugin::SubsystemResolutionError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChampionExecutionError {
    #[error("Required argument '{0}' not provided")]
    MissingArgument(&'static str),

    #[error("Malformed arguments to '{field}': {source}")]
    MalformedArguments {
        field: String,
        #[source]
        source: serde_json::Error,
    },
}

impl From<ChampionExecutionError> for SubsystemResolutionError {
    fn from(e: ChampionExecutionError) -> Self {
        match e {
            ChampionExecutionError::MissingArgument(argument) => {
                SubsystemResolutionError::MissingArgument(argument.to_string())
            }
            ChampionExecutionError::MalformedArguments { field, source } => {
                SubsystemResolutionError::MalformedArguments {
                    field,
                    message: source.to_string(),
                }
            }
        }
    }
}
