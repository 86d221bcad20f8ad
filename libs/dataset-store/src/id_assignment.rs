// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::str::FromStr;

use crate::Identified;

/// The identifier handed to every created record in [`IdAssignment::Fixed`] mode by default.
pub const FIXED_CREATED_ID: i64 = 4732832;

/// How [`crate::Dataset::append`] picks the identifier of a new record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdAssignment {
    /// Every created record gets the same identifier. Identifiers are therefore not unique.
    Fixed(i64),
    /// One more than the largest identifier currently in the dataset (1 for a dataset without
    /// identifiers).
    Sequential,
}

impl Default for IdAssignment {
    fn default() -> Self {
        IdAssignment::Fixed(FIXED_CREATED_ID)
    }
}

impl IdAssignment {
    pub(crate) fn next_id<R: Identified>(&self, existing: &[R]) -> i64 {
        match self {
            IdAssignment::Fixed(id) => *id,
            IdAssignment::Sequential => {
                existing
                    .iter()
                    .filter_map(Identified::id)
                    .max()
                    .unwrap_or(0)
                    + 1
            }
        }
    }
}

impl FromStr for IdAssignment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fixed" => Ok(IdAssignment::default()),
            "sequential" => Ok(IdAssignment::Sequential),
            other => Err(format!(
                "Unknown identifier mode '{other}'. Expected 'fixed' or 'sequential'"
            )),
        }
    }
}
