// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use almanac_env::EnvError;
use core_resolver::{
    introspection::definition::schema::SchemaError, plugin::SubsystemLoadingError,
};
use playground_router::PlaygroundError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SystemLoadingError {
    #[error("Failed to load subsystem '{0}': {1}")]
    SubsystemLoadingError(&'static str, #[source] SubsystemLoadingError),

    #[error("No subsystems to serve")]
    NoSubsystems,

    #[error("{0}")]
    Schema(#[from] SchemaError),

    #[error("{0}")]
    Config(#[from] EnvError),

    #[error("{0}")]
    Playground(#[from] PlaygroundError),
}
