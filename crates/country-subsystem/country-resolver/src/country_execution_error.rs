// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use core_resolver::plugin::SubsystemResolutionError;
use dataset_store::query::PageError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CountryExecutionError {
    #[error("Required argument '{0}' not provided")]
    MissingArgument(&'static str),

    #[error("Malformed arguments to '{field}': {source}")]
    MalformedArguments {
        field: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0}")]
    InvalidPage(#[from] PageError),
}

impl From<CountryExecutionError> for SubsystemResolutionError {
    fn from(e: CountryExecutionError) -> Self {
        match e {
            CountryExecutionError::MissingArgument(argument) => {
                SubsystemResolutionError::MissingArgument(argument.to_string())
            }
            CountryExecutionError::MalformedArguments { field, source } => {
                SubsystemResolutionError::MalformedArguments {
                    field,
                    message: source.to_string(),
                }
            }
            CountryExecutionError::InvalidPage(_) => {
                SubsystemResolutionError::UserDisplayError(e.to_string())
            }
        }
    }
}
