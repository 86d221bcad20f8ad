// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::HashMap;

use async_graphql_parser::{
    Pos, Positioned,
    types::{
        Directive, Field, FieldDefinition, FragmentDefinition, FragmentSpread, Selection,
        SelectionSet, Type, TypeDefinition, TypeKind,
    },
};
use async_graphql_value::{ConstValue, Name, indexmap::IndexMap};

use crate::{
    introspection::definition::{
        schema::{QUERY_ROOT_TYPENAME, Schema},
        type_introspection::TypeDefinitionIntrospection,
    },
    validation::{field::ValidatedField, validation_error::ValidationError},
};

use super::{
    arguments_validator::ArgumentValidator, operation_validator::Variables, underlying_type,
};

/// Checks the depth of a field: `(depth, is_introspection, pos)`
pub(super) type DepthCheck<'a> = dyn Fn(usize, bool, Pos) -> Result<(), ValidationError> + 'a;

/// Context for validating a selection set.
pub struct SelectionSetValidator<'a> {
    schema: &'a Schema,
    /// The parent type of this field.
    container_type: &'a TypeDefinition,
    variables: &'a Variables,
    fragment_definitions: &'a HashMap<Name, Positioned<FragmentDefinition>>,
    /// Depth of the fields in this selection set (root fields are at depth 1)
    depth: usize,
    /// Whether this selection is part of an introspection query. Unknown at the root level,
    /// where it is decided per field.
    introspection: Option<bool>,
}

impl<'a> SelectionSetValidator<'a> {
    #[must_use]
    pub fn new(
        schema: &'a Schema,
        container_type: &'a TypeDefinition,
        variables: &'a Variables,
        fragment_definitions: &'a HashMap<Name, Positioned<FragmentDefinition>>,
    ) -> Self {
        Self {
            schema,
            container_type,
            variables,
            fragment_definitions,
            depth: 1,
            introspection: None,
        }
    }

    fn with_container(&self, container_type: &'a TypeDefinition) -> Self {
        Self {
            container_type,
            ..*self
        }
    }

    fn nested(&self, container_type: &'a TypeDefinition, introspection: bool) -> Self {
        Self {
            container_type,
            depth: self.depth + 1,
            introspection: Some(introspection),
            ..*self
        }
    }

    /// Validate selection set.
    ///
    /// Validations performed:
    /// - Each field is defined in the `container_type`
    /// - Each fragment referred is defined, applicable to the container, and not recursive
    /// - Arguments to each field are valid (see [ArgumentValidator] for more details)
    /// - Leaf fields have no selection and other fields have one
    /// - The selection is not deeper than allowed
    /// - Fields sharing an output name can be merged
    ///
    /// # Returns
    ///   A vector of validated fields (fragments are resolved and inlined, `@skip`/`@include` are
    ///   applied, and same-named fields are merged, thus normalizing the fields)
    pub(super) fn validate(
        &self,
        selection_set: &Positioned<SelectionSet>,
        depth_check: &DepthCheck,
    ) -> Result<Vec<ValidatedField>, ValidationError> {
        self.validate_with_trail(selection_set, depth_check, &mut vec![])
    }

    fn validate_with_trail(
        &self,
        selection_set: &Positioned<SelectionSet>,
        depth_check: &DepthCheck,
        fragment_trail: &mut Vec<Name>,
    ) -> Result<Vec<ValidatedField>, ValidationError> {
        let fields = self.collect_fields(selection_set, depth_check, fragment_trail)?;
        merge_fields(fields, selection_set.pos)
    }

    fn collect_fields(
        &self,
        selection_set: &Positioned<SelectionSet>,
        depth_check: &DepthCheck,
        fragment_trail: &mut Vec<Name>,
    ) -> Result<Vec<ValidatedField>, ValidationError> {
        let mut fields = vec![];

        for selection in &selection_set.node.items {
            fields.extend(self.validate_selection(selection, depth_check, fragment_trail)?);
        }

        Ok(fields)
    }

    fn validate_selection(
        &self,
        selection: &Positioned<Selection>,
        depth_check: &DepthCheck,
        fragment_trail: &mut Vec<Name>,
    ) -> Result<Vec<ValidatedField>, ValidationError> {
        match &selection.node {
            Selection::Field(field) => {
                if !self.is_selected(&field.node.directives)? {
                    return Ok(vec![]);
                }
                self.validate_field(field, depth_check, fragment_trail)
                    .map(|field| vec![field])
            }
            Selection::FragmentSpread(fragment_spread) => {
                if !self.is_selected(&fragment_spread.node.directives)? {
                    return Ok(vec![]);
                }

                let fragment_name = &fragment_spread.node.fragment_name.node;
                if fragment_trail.contains(fragment_name) {
                    return Err(ValidationError::FragmentCycle(
                        fragment_name.to_string(),
                        fragment_spread.pos,
                    ));
                }

                let fragment_definition = self.fragment_definition(fragment_spread)?;

                fragment_trail.push(fragment_name.clone());
                let fields = self.validate_conditional(
                    &fragment_definition.type_condition.node.on,
                    &fragment_definition.selection_set,
                    depth_check,
                    fragment_trail,
                );
                fragment_trail.pop();

                fields
            }
            Selection::InlineFragment(inline_fragment) => {
                if !self.is_selected(&inline_fragment.node.directives)? {
                    return Ok(vec![]);
                }

                match &inline_fragment.node.type_condition {
                    Some(type_condition) => self.validate_conditional(
                        &type_condition.node.on,
                        &inline_fragment.node.selection_set,
                        depth_check,
                        fragment_trail,
                    ),
                    None => self.collect_fields(
                        &inline_fragment.node.selection_set,
                        depth_check,
                        fragment_trail,
                    ),
                }
            }
        }
    }

    /// Validate the selection of a fragment with a type condition.
    ///
    /// On a union, a condition naming one of its members narrows the container to that member
    /// and marks the resulting fields as applicable only to it. On an object, the condition
    /// must name the object itself or a union it belongs to.
    fn validate_conditional(
        &self,
        type_condition: &Positioned<Name>,
        selection_set: &Positioned<SelectionSet>,
        depth_check: &DepthCheck,
        fragment_trail: &mut Vec<Name>,
    ) -> Result<Vec<ValidatedField>, ValidationError> {
        let condition_name = &type_condition.node;
        let container_name = &self.container_type.name.node;

        let condition_type = self
            .schema
            .get_type_definition(condition_name)
            .ok_or_else(|| {
                ValidationError::UnknownTypeCondition(
                    condition_name.to_string(),
                    type_condition.pos,
                )
            })?;

        if condition_name == container_name {
            return self.collect_fields(selection_set, depth_check, fragment_trail);
        }

        let is_member = |union_type: &TypeDefinition, member_name: &Name| match &union_type.kind
        {
            TypeKind::Union(union_type) => union_type
                .members
                .iter()
                .any(|member| &member.node == member_name),
            _ => false,
        };

        match (&self.container_type.kind, &condition_type.kind) {
            (TypeKind::Union(_), TypeKind::Object(_))
                if is_member(self.container_type, condition_name) =>
            {
                let fields = self.with_container(condition_type).collect_fields(
                    selection_set,
                    depth_check,
                    fragment_trail,
                )?;

                Ok(fields
                    .into_iter()
                    .map(|field| ValidatedField {
                        type_condition: Some(condition_name.clone()),
                        ..field
                    })
                    .collect())
            }
            (TypeKind::Object(_), TypeKind::Union(_))
                if is_member(condition_type, container_name) =>
            {
                self.collect_fields(selection_set, depth_check, fragment_trail)
            }
            _ => Err(ValidationError::InvalidTypeCondition(
                condition_name.to_string(),
                container_name.to_string(),
                type_condition.pos,
            )),
        }
    }

    fn validate_field(
        &self,
        field: &Positioned<Field>,
        depth_check: &DepthCheck,
        fragment_trail: &mut Vec<Name>,
    ) -> Result<ValidatedField, ValidationError> {
        let field_name = field.node.name.node.as_str();

        // Special treatment for the __typename field, since we are not supposed to expose it as
        // a normal field (for example, we should not declare that the "Country" type has a __typename field")
        if field_name == "__typename" {
            return if !field.node.arguments.is_empty() {
                Err(ValidationError::StrayArguments(
                    field
                        .node
                        .arguments
                        .iter()
                        .map(|arg| arg.0.node.to_string())
                        .collect(),
                    field_name.to_string(),
                    field.pos,
                ))
            } else if !field.node.selection_set.node.items.is_empty() {
                Err(ValidationError::ScalarWithField(
                    field_name.to_string(),
                    field.pos,
                ))
            } else {
                Ok(ValidatedField {
                    alias: field.node.alias.as_ref().map(|alias| alias.node.clone()),
                    name: field.node.name.node.clone(),
                    type_condition: None,
                    arguments: IndexMap::new(),
                    subfields: vec![],
                })
            };
        }

        let is_query_root = self.container_type.name.node.as_str() == QUERY_ROOT_TYPENAME;

        // We have to treat the query root type specially, since its __schema and __type fields
        // are not "ordinary" fields, but are instead special-cased in the introspection query
        // (much the same way as the __typename field).
        let field_definition = match field_name {
            "__schema" if is_query_root => &self.schema.schema_field_definition,
            "__type" if is_query_root => &self.schema.type_field_definition,
            _ => self.get_field_definition(field)?,
        };

        let introspection = self
            .introspection
            .unwrap_or_else(|| field_name == "__schema" || field_name == "__type");

        depth_check(self.depth, introspection, field.pos)?;

        let field_type_definition = self.get_type_definition(&field_definition.ty, field)?;
        let has_selection = !field.node.selection_set.node.items.is_empty();

        let subfields = if field_type_definition.is_leaf() {
            if has_selection {
                return Err(ValidationError::ScalarWithField(
                    field_name.to_string(),
                    field.pos,
                ));
            }
            vec![]
        } else {
            if !has_selection {
                return Err(ValidationError::SelectionRequired(
                    field_name.to_string(),
                    field_definition.ty.node.to_string(),
                    field.pos,
                ));
            }
            self.nested(field_type_definition, introspection)
                .validate_with_trail(&field.node.selection_set, depth_check, fragment_trail)?
        };

        let argument_validator =
            ArgumentValidator::new(self.schema, self.variables, field_name, field.pos);

        let arguments = argument_validator.validate(
            &field_definition
                .arguments
                .iter()
                .map(|d| &d.node)
                .collect::<Vec<_>>(),
            &field.node.arguments,
        )?;

        Ok(ValidatedField {
            alias: field.node.alias.as_ref().map(|alias| alias.node.clone()),
            name: field.node.name.node.clone(),
            type_condition: None,
            arguments,
            subfields,
        })
    }

    /// Evaluate `@skip(if:)` and `@include(if:)`. Any other directive is rejected.
    fn is_selected(&self, directives: &[Positioned<Directive>]) -> Result<bool, ValidationError> {
        let mut selected = true;

        for directive in directives {
            let directive_name = directive.node.name.node.as_str();

            let descriptor = self
                .schema
                .directives
                .iter()
                .find(|descriptor| descriptor.name == directive_name)
                .ok_or_else(|| {
                    ValidationError::UnknownDirective(directive_name.to_string(), directive.pos)
                })?;

            let arguments = ArgumentValidator::new(
                self.schema,
                self.variables,
                directive_name,
                directive.pos,
            )
            .validate(
                &descriptor.arguments.iter().collect::<Vec<_>>(),
                &directive.node.arguments,
            )?;

            let condition = matches!(arguments.get("if"), Some(ConstValue::Boolean(true)));

            selected &= match directive_name {
                "skip" => !condition,
                _ => condition,
            };
        }

        Ok(selected)
    }

    fn fragment_definition(
        &self,
        fragment: &Positioned<FragmentSpread>,
    ) -> Result<&'a FragmentDefinition, ValidationError> {
        self.fragment_definitions
            .get(&fragment.node.fragment_name.node)
            .map(|v| &v.node)
            .ok_or_else(|| {
                ValidationError::FragmentDefinitionNotFound(
                    fragment.node.fragment_name.node.as_str().to_string(),
                    fragment.pos,
                )
            })
    }

    fn get_type_definition(
        &self,
        field_type: &Positioned<Type>,
        field: &Positioned<Field>,
    ) -> Result<&'a TypeDefinition, ValidationError> {
        let field_underlying_type_name = underlying_type(&field_type.node);

        self.schema
            .get_type_definition(field_underlying_type_name.as_str())
            .ok_or_else(|| {
                ValidationError::InvalidFieldType(
                    field_underlying_type_name.as_str().to_string(),
                    field.pos,
                )
            })
    }

    fn get_field_definition(
        &self,
        field: &Positioned<Field>,
    ) -> Result<&'a FieldDefinition, ValidationError> {
        self.container_type
            .fields()
            .and_then(|fields| fields.iter().find(|f| f.node.name == field.node.name))
            .map(|f| &f.node)
            .ok_or_else(|| {
                ValidationError::InvalidField(
                    field.node.name.node.as_str().to_string(),
                    self.container_type.name.node.to_string(),
                    field.pos,
                )
            })
    }
}

/// Merge fields that share an output name (and apply to the same runtime type).
///
/// Such fields must select the same underlying field with the same arguments; their
/// selections are combined.
fn merge_fields(
    fields: Vec<ValidatedField>,
    pos: Pos,
) -> Result<Vec<ValidatedField>, ValidationError> {
    let mut merged: Vec<(ValidatedField, bool)> = vec![];

    for field in fields {
        let existing = merged.iter_mut().find(|(existing, _)| {
            existing.output_name() == field.output_name()
                && existing.type_condition == field.type_condition
        });

        match existing {
            Some((existing, combined)) => {
                if existing.name != field.name || existing.arguments != field.arguments {
                    return Err(ValidationError::MergeFailure(field.output_name(), pos));
                }
                existing.subfields.extend(field.subfields);
                *combined = true;
            }
            None => merged.push((field, false)),
        }
    }

    merged
        .into_iter()
        .map(|(mut field, combined)| {
            if combined {
                field.subfields = merge_fields(std::mem::take(&mut field.subfields), pos)?;
            }
            Ok(field)
        })
        .collect()
}
