// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::HashMap;

use core_resolver::{
    FieldResolver, Resolver, plugin::SubsystemResolutionError, validation::field::ValidatedField,
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// The stats exposed through the `Stats` type. Other keys in the source data are kept but not
/// queryable.
pub const STAT_NAMES: [&str; 20] = [
    "hp",
    "hpperlevel",
    "mp",
    "mpperlevel",
    "movespeed",
    "armor",
    "armorperlevel",
    "spellblock",
    "spellblockperlevel",
    "attackrange",
    "hpregen",
    "hpregenperlevel",
    "mpregen",
    "mpregenperlevel",
    "crit",
    "critperlevel",
    "attackdamage",
    "attackdamageperlevel",
    "attackspeedperlevel",
    "attackspeed",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Champion {
    pub version: Option<String>,
    pub id: Option<String>,
    pub key: Option<String>,
    pub name: Option<String>,
    pub title: Option<String>,
    pub blurb: Option<String>,
    pub info: Option<Info>,
    /// Published champion data calls this `image`
    #[serde(alias = "image")]
    pub sprite: Option<Sprite>,
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    pub partype: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub stats: Stats,
}

/// A `null` in the source data reads the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Info {
    pub attack: Option<i64>,
    pub defense: Option<i64>,
    pub magic: Option<i64>,
    pub difficulty: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sprite {
    pub full: Option<String>,
    pub sprite: Option<String>,
    pub group: Option<String>,
    pub x: Option<i64>,
    pub y: Option<i64>,
    pub w: Option<i64>,
    pub h: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Stats(pub HashMap<String, f64>);

impl Stats {
    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Champions {
    pub items: Vec<Champion>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NotFoundError {
    pub message: String,
}

impl NotFoundError {
    pub fn no_champion_named(name: &str) -> Self {
        Self {
            message: format!("Champion {name} not found"),
        }
    }

    pub fn no_champion_tagged(tag: &str) -> Self {
        Self {
            message: format!("No champion found for tag {tag}"),
        }
    }

    pub fn no_champion_with_stat(name: &str, value: f64) -> Self {
        Self {
            message: format!("No champion found with {name} >= {value}"),
        }
    }
}

fn invalid_field(field: &ValidatedField, container: &'static str) -> SubsystemResolutionError {
    SubsystemResolutionError::InvalidField(field.name.to_string(), container)
}

impl FieldResolver for Champion {
    fn type_name(&self) -> &'static str {
        "Champion"
    }

    fn resolve_field(&self, field: &ValidatedField) -> Result<Value, SubsystemResolutionError> {
        let value = match field.name.as_str() {
            "version" => Value::from(self.version.clone()),
            "id" => Value::from(self.id.clone()),
            "key" => Value::from(self.key.clone()),
            "name" => Value::from(self.name.clone()),
            "title" => Value::from(self.title.clone()),
            "blurb" => Value::from(self.blurb.clone()),
            "info" => self.info.resolve_value(&field.subfields)?,
            "sprite" => self.sprite.resolve_value(&field.subfields)?,
            "tags" => Value::from(self.tags.clone()),
            "partype" => Value::from(self.partype.clone()),
            "stats" => self.stats.resolve_value(&field.subfields)?,
            _ => return Err(invalid_field(field, "Champion")),
        };

        Ok(value)
    }
}

impl FieldResolver for Info {
    fn type_name(&self) -> &'static str {
        "Info"
    }

    fn resolve_field(&self, field: &ValidatedField) -> Result<Value, SubsystemResolutionError> {
        let value = match field.name.as_str() {
            "attack" => self.attack,
            "defense" => self.defense,
            "magic" => self.magic,
            "difficulty" => self.difficulty,
            _ => return Err(invalid_field(field, "Info")),
        };

        Ok(Value::from(value))
    }
}

impl FieldResolver for Sprite {
    fn type_name(&self) -> &'static str {
        "Sprite"
    }

    fn resolve_field(&self, field: &ValidatedField) -> Result<Value, SubsystemResolutionError> {
        let value = match field.name.as_str() {
            "full" => Value::from(self.full.clone()),
            "sprite" => Value::from(self.sprite.clone()),
            "group" => Value::from(self.group.clone()),
            "x" => Value::from(self.x),
            "y" => Value::from(self.y),
            "w" => Value::from(self.w),
            "h" => Value::from(self.h),
            _ => return Err(invalid_field(field, "Sprite")),
        };

        Ok(value)
    }
}

impl FieldResolver for Stats {
    fn type_name(&self) -> &'static str {
        "Stats"
    }

    fn resolve_field(&self, field: &ValidatedField) -> Result<Value, SubsystemResolutionError> {
        let name = field.name.as_str();

        if STAT_NAMES.contains(&name) {
            // Non-finite values have no JSON representation and come out as null
            Ok(Value::from(self.get(name)))
        } else {
            Err(invalid_field(field, "Stats"))
        }
    }
}

impl FieldResolver for Champions {
    fn type_name(&self) -> &'static str {
        "Champions"
    }

    fn resolve_field(&self, field: &ValidatedField) -> Result<Value, SubsystemResolutionError> {
        match field.name.as_str() {
            "items" => self.items.resolve_value(&field.subfields),
            _ => Err(invalid_field(field, "Champions")),
        }
    }
}

impl FieldResolver for NotFoundError {
    fn type_name(&self) -> &'static str {
        "NotFoundError"
    }

    fn resolve_field(&self, field: &ValidatedField) -> Result<Value, SubsystemResolutionError> {
        match field.name.as_str() {
            "message" => Ok(Value::from(self.message.clone())),
            _ => Err(invalid_field(field, "NotFoundError")),
        }
    }
}
