// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod country_execution_error;
mod model;
mod operation_resolver;
mod rest_resolver;

pub mod plugin;

pub use model::{Country, CountryError, CountryInput, Translation};
pub use rest_resolver::CountryRestResolver;

pub(crate) const COUNTRIES_SDL: &str = include_str!("countries.graphql");
