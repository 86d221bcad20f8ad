// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Maps each root field of the countries schema to its resolver.

use async_graphql_parser::types::OperationType;
use core_resolver::{
    Lookup, Resolver, plugin::SubsystemResolutionError, validation::field::ValidatedField,
};
use dataset_store::{
    Dataset, IdAssignment,
    query::{Page, find_by_exact_field, paginate},
};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::debug;

use crate::{
    country_execution_error::CountryExecutionError,
    model::{Country, CountryError, CountryInput},
};

#[derive(Debug, Deserialize)]
pub struct CountriesArguments {
    pub first: i64,
    /// An explicit `null` reads as the first page, like an absent offset.
    pub offset: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct CountryArguments {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateCountryArguments {
    pub country: Option<CountryInput>,
}

/// Resolve a root field against the dataset and project the result onto the field's selection.
///
/// Returns `None` if the field is not a countries operation.
pub fn resolve_operation(
    field: &ValidatedField,
    operation_type: OperationType,
    dataset: &Dataset<Country>,
    id_assignment: &IdAssignment,
) -> Result<Option<Value>, SubsystemResolutionError> {
    let selection = &field.subfields;

    let resolved = match (operation_type, field.name.as_str()) {
        (OperationType::Query, "countries") => {
            countries(dataset, arguments(field)?)?.resolve_value(selection)
        }
        (OperationType::Query, "country") => {
            country(dataset, arguments(field)?)?.resolve_value(selection)
        }
        (OperationType::Mutation, "createCountry") => {
            create_country(dataset, arguments(field)?, id_assignment)?.resolve_value(selection)
        }
        _ => return Ok(None),
    };

    resolved.map(Some)
}

fn arguments<T: DeserializeOwned>(field: &ValidatedField) -> Result<T, CountryExecutionError> {
    field
        .arguments_as()
        .map_err(|source| CountryExecutionError::MalformedArguments {
            field: field.name.to_string(),
            source,
        })
}

/// A page of countries in dataset order.
pub fn countries(
    dataset: &Dataset<Country>,
    arguments: CountriesArguments,
) -> Result<Vec<Country>, CountryExecutionError> {
    debug!(first = arguments.first, offset = ?arguments.offset, "countries");

    let page = Page::new(arguments.first, arguments.offset.unwrap_or(0))?;
    Ok(paginate(dataset, page))
}

/// The first country whose name matches (ignoring case).
pub fn country(
    dataset: &Dataset<Country>,
    arguments: CountryArguments,
) -> Result<Lookup<Country, CountryError>, CountryExecutionError> {
    debug!(name = ?arguments.name, "country");

    let name = arguments
        .name
        .ok_or(CountryExecutionError::MissingArgument("name"))?;

    let found = find_by_exact_field(dataset, |c: &Country| c.name.as_deref(), &name);
    Ok(Lookup::from_option(found, || CountryError::not_found(&name)))
}

/// Append a country built from the input. Nothing about the input is checked.
pub fn create_country(
    dataset: &Dataset<Country>,
    arguments: CreateCountryArguments,
    id_assignment: &IdAssignment,
) -> Result<Country, CountryExecutionError> {
    debug!(input = ?arguments.country, "createCountry");

    let input = arguments
        .country
        .ok_or(CountryExecutionError::MissingArgument("country"))?;

    Ok(dataset.append(Country::from(input), id_assignment))
}

#[cfg(test)]
mod tests {
    use async_graphql_value::{ConstValue, Name, indexmap::IndexMap};
    use core_resolver::introspection::definition::subsystem_schema::SubsystemSchema;
    use dataset_store::FIXED_CREATED_ID;
    use serde_json::json;

    use super::*;
    use crate::COUNTRIES_SDL;

    fn dataset() -> Dataset<Country> {
        let countries = ["Germany", "France", "Japan", "Peru", "Kenya"]
            .into_iter()
            .map(|name| Country {
                name: Some(name.to_string()),
                ..Default::default()
            })
            .collect();

        Dataset::from_records(countries)
    }

    fn names(countries: &[Country]) -> Vec<&str> {
        countries
            .iter()
            .filter_map(|c| c.name.as_deref())
            .collect()
    }

    fn leaf(name: &str) -> ValidatedField {
        ValidatedField {
            alias: None,
            name: Name::new(name),
            type_condition: None,
            arguments: IndexMap::new(),
            subfields: vec![],
        }
    }

    fn field(
        name: &str,
        arguments: serde_json::Value,
        subfields: Vec<ValidatedField>,
    ) -> ValidatedField {
        let arguments = match arguments {
            serde_json::Value::Object(map) => map
                .into_iter()
                .map(|(k, v)| (k, ConstValue::from_json(v).unwrap()))
                .collect(),
            _ => IndexMap::new(),
        };

        ValidatedField {
            alias: None,
            name: Name::new(name),
            type_condition: None,
            arguments,
            subfields,
        }
    }

    fn on(type_name: &str, field: ValidatedField) -> ValidatedField {
        ValidatedField {
            type_condition: Some(Name::new(type_name)),
            ..field
        }
    }

    #[test]
    fn pagination() {
        let dataset = dataset();
        let page = |first, offset| {
            countries(
                &dataset,
                CountriesArguments {
                    first,
                    offset: Some(offset),
                },
            )
            .map(|countries| names(&countries).join(","))
        };

        assert_eq!(page(2, 0).unwrap(), "Germany,France");
        assert_eq!(page(2, 3).unwrap(), "Peru,Kenya");
        assert_eq!(page(10, 4).unwrap(), "Kenya");
        assert_eq!(page(3, 5).unwrap(), "");
        assert_eq!(page(0, 1).unwrap(), "");
        assert!(matches!(
            page(-1, 0),
            Err(CountryExecutionError::InvalidPage(_))
        ));
        assert!(matches!(
            page(1, -2),
            Err(CountryExecutionError::InvalidPage(_))
        ));
    }

    #[test]
    fn null_offset_is_the_first_page() {
        let dataset = dataset();
        let page = |arguments: serde_json::Value| {
            resolve_operation(
                &field("countries", arguments, vec![leaf("name")]),
                OperationType::Query,
                &dataset,
                &IdAssignment::default(),
            )
            .unwrap()
        };

        let first_page = Some(json!([{"name": "Germany"}, {"name": "France"}]));
        assert_eq!(page(json!({"first": 2, "offset": null})), first_page);
        assert_eq!(page(json!({"first": 2})), first_page);
    }

    #[test]
    fn lookup_ignores_case() {
        let dataset = dataset();
        let lookup = |name: &str| {
            country(
                &dataset,
                CountryArguments {
                    name: Some(name.to_string()),
                },
            )
            .unwrap()
        };

        assert_eq!(lookup("germany"), lookup("Germany"));
        assert!(lookup("GERMANY").is_found());
        assert_eq!(
            lookup("Nowhereland"),
            Lookup::NotFound(CountryError {
                status: 404,
                message: "Country Nowhereland not found".to_string()
            })
        );
    }

    #[test]
    fn lookup_requires_name() {
        assert!(matches!(
            country(&dataset(), CountryArguments { name: None }),
            Err(CountryExecutionError::MissingArgument("name"))
        ));
    }

    #[test]
    fn created_country_can_be_found() {
        let dataset = dataset();
        let create = |name: &str, id_assignment: &IdAssignment| {
            create_country(
                &dataset,
                CreateCountryArguments {
                    country: Some(CountryInput {
                        name: Some(name.to_string()),
                        capital: Some("Poseidonis".to_string()),
                    }),
                },
                id_assignment,
            )
            .unwrap()
        };

        let atlantis = create("Atlantis", &IdAssignment::default());
        let lemuria = create("Lemuria", &IdAssignment::default());
        assert_eq!(atlantis.id, Some(FIXED_CREATED_ID));
        assert_eq!(lemuria.id, atlantis.id);

        let mu = create("Mu", &IdAssignment::Sequential);
        assert_eq!(mu.id, Some(FIXED_CREATED_ID + 1));

        assert_eq!(dataset.len(), 8);
        assert_eq!(
            country(
                &dataset,
                CountryArguments {
                    name: Some("atlantis".to_string())
                }
            )
            .unwrap(),
            Lookup::Found(atlantis)
        );
    }

    #[test]
    fn union_projection() {
        let dataset = dataset();
        let selection = vec![
            leaf("__typename"),
            on("Country", leaf("name")),
            on("Error", leaf("status")),
            on("Error", leaf("message")),
        ];

        let found = resolve_operation(
            &field("country", json!({"name": "peru"}), selection.clone()),
            OperationType::Query,
            &dataset,
            &IdAssignment::default(),
        )
        .unwrap();
        assert_eq!(
            found,
            Some(json!({"__typename": "Country", "name": "Peru"}))
        );

        let not_found = resolve_operation(
            &field("country", json!({"name": "Nowhereland"}), selection),
            OperationType::Query,
            &dataset,
            &IdAssignment::default(),
        )
        .unwrap();
        assert_eq!(
            not_found,
            Some(json!({
                "__typename": "Error",
                "status": 404,
                "message": "Country Nowhereland not found"
            }))
        );
    }

    #[test]
    fn missing_argument_is_an_error() {
        let error = resolve_operation(
            &field("createCountry", json!({}), vec![leaf("id")]),
            OperationType::Mutation,
            &dataset(),
            &IdAssignment::default(),
        )
        .unwrap_err();

        assert_eq!(error.to_string(), "Required argument 'country' not provided");
    }

    #[test]
    fn every_root_field_is_resolved() {
        let schema = SubsystemSchema::parse(COUNTRIES_SDL).unwrap();
        let dataset = dataset();

        let root_fields = schema
            .queries
            .iter()
            .map(|f| (OperationType::Query, f))
            .chain(schema.mutations.iter().map(|f| (OperationType::Mutation, f)));

        for (operation_type, definition) in root_fields {
            let field = leaf(definition.name.node.as_str());
            let resolved = resolve_operation(
                &field,
                operation_type,
                &dataset,
                &IdAssignment::default(),
            );

            // Arguments are missing, so an error is expected; `Ok(None)` means no resolver
            assert!(
                !matches!(resolved, Ok(None)),
                "No resolver for {}",
                definition.name.node
            );
        }

        assert!(matches!(
            resolve_operation(
                &leaf("countries"),
                OperationType::Mutation,
                &dataset,
                &IdAssignment::default()
            ),
            Ok(None)
        ));
    }
}
