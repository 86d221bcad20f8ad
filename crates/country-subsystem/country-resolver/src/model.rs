// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use core_resolver::{
    FieldResolver, Resolver, plugin::SubsystemResolutionError, validation::field::ValidatedField,
};
use dataset_store::Identified;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// A country record. Every field is optional; missing keys load as `None` and are left out
/// when the record is serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Country {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub native_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_level_domain: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alpha2_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numeric_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alpha3_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currencies: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calling_codes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capital: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_spellings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relevance: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subregion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translations: Option<Translation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub population: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latlng: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demonym: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub borders: Option<Vec<String>>,
    /// Kept as found in the source (some areas are fractional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gini: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezones: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Translation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub de: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub es: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub it: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ja: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nl: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hr: Option<String>,
}

/// Returned in place of a country when a lookup matches nothing (GraphQL type `Error`).
#[derive(Debug, Clone, PartialEq)]
pub struct CountryError {
    pub status: i64,
    pub message: String,
}

impl CountryError {
    pub fn not_found(name: &str) -> Self {
        Self {
            status: 404,
            message: format!("Country {name} not found"),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CountryInput {
    pub name: Option<String>,
    pub capital: Option<String>,
}

impl From<CountryInput> for Country {
    fn from(input: CountryInput) -> Self {
        Country {
            name: input.name,
            capital: input.capital,
            ..Default::default()
        }
    }
}

impl Identified for Country {
    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }
}

impl Country {
    /// The area as a GraphQL `Int` (fractional areas are truncated toward zero)
    fn area_int(&self) -> Option<i64> {
        self.area
            .as_ref()
            .and_then(|area| area.as_i64().or_else(|| area.as_f64().map(|a| a.trunc() as i64)))
    }
}

impl FieldResolver for Country {
    fn type_name(&self) -> &'static str {
        "Country"
    }

    fn resolve_field(&self, field: &ValidatedField) -> Result<Value, SubsystemResolutionError> {
        let value = match field.name.as_str() {
            "id" => Value::from(self.id),
            "name" => Value::from(self.name.clone()),
            "nativeName" => Value::from(self.native_name.clone()),
            "topLevelDomain" => Value::from(self.top_level_domain.clone()),
            "alpha2Code" => Value::from(self.alpha2_code.clone()),
            "numericCode" => Value::from(self.numeric_code.clone()),
            "alpha3Code" => Value::from(self.alpha3_code.clone()),
            "currencies" => Value::from(self.currencies.clone()),
            "callingCodes" => Value::from(self.calling_codes.clone()),
            "capital" => Value::from(self.capital.clone()),
            "altSpellings" => Value::from(self.alt_spellings.clone()),
            "relevance" => Value::from(self.relevance.clone()),
            "region" => Value::from(self.region.clone()),
            "subregion" => Value::from(self.subregion.clone()),
            "language" => Value::from(self.language.clone()),
            "languages" => Value::from(self.languages.clone()),
            "translations" => self.translations.resolve_value(&field.subfields)?,
            "population" => Value::from(self.population),
            "latlng" => Value::from(self.latlng.clone()),
            "demonym" => Value::from(self.demonym.clone()),
            "borders" => Value::from(self.borders.clone()),
            "area" => Value::from(self.area_int()),
            "gini" => Value::from(self.gini),
            "timezones" => Value::from(self.timezones.clone()),
            field_name => {
                return Err(SubsystemResolutionError::InvalidField(
                    field_name.to_owned(),
                    "Country",
                ));
            }
        };

        Ok(value)
    }
}

impl FieldResolver for Translation {
    fn type_name(&self) -> &'static str {
        "Translation"
    }

    fn resolve_field(&self, field: &ValidatedField) -> Result<Value, SubsystemResolutionError> {
        let translation = match field.name.as_str() {
            "de" => &self.de,
            "es" => &self.es,
            "fr" => &self.fr,
            "it" => &self.it,
            "ja" => &self.ja,
            "nl" => &self.nl,
            "hr" => &self.hr,
            field_name => {
                return Err(SubsystemResolutionError::InvalidField(
                    field_name.to_owned(),
                    "Translation",
                ));
            }
        };

        Ok(Value::from(translation.clone()))
    }
}

impl FieldResolver for CountryError {
    fn type_name(&self) -> &'static str {
        "Error"
    }

    fn resolve_field(&self, field: &ValidatedField) -> Result<Value, SubsystemResolutionError> {
        match field.name.as_str() {
            "status" => Ok(Value::from(self.status)),
            "message" => Ok(Value::from(self.message.clone())),
            field_name => Err(SubsystemResolutionError::InvalidField(
                field_name.to_owned(),
                "Error",
            )),
        }
    }
}
