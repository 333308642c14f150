/*
 *
 *  *
 *  *      Copyright (c) 2018-2025, SnackCloud All rights reserved.
 *  *
 *  *   Redistribution and use in source and binary forms, with or without
 *  *   modification, are permitted provided that the following conditions are met:
 *  *
 *  *   Redistributions of source code must retain the above copyright notice,
 *  *   this list of conditions and the following disclaimer.
 *  *   Redistributions in binary form must reproduce the above copyright
 *  *   notice, this list of conditions and the following disclaimer in the
 *  *   documentation and/or other materials provided with the distribution.
 *  *   Neither the name of the www.snackcloud.cn developer nor the names of its
 *  *   contributors may be used to endorse or promote products derived from
 *  *   this software without specific prior written permission.
 *  *   Author: SnackCloud
 *  *
 *
 */

mod registry;
mod placeholder;

pub use registry::*;
pub use placeholder::*;

use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::{IntoSqlValue, SqlValue};

/// One positional binding of a statement template: the `?` it fills is named
/// by the property the value is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterMapping {
    property: String,
}

impl ParameterMapping {
    pub fn new<S: Into<String>>(property: S) -> Self {
        Self { property: property.into() }
    }

    pub fn property(&self) -> &str {
        &self.property
    }
}

impl From<&str> for ParameterMapping {
    fn from(property: &str) -> Self {
        ParameterMapping::new(property)
    }
}

impl From<String> for ParameterMapping {
    fn from(property: String) -> Self {
        ParameterMapping::new(property)
    }
}

/// Explicit property access for composite parameter objects.
///
/// The data-access layer implements this for its parameter types so values can
/// be read by name without any runtime introspection.
pub trait PropertySource: Send + Sync {
    /// Name used in diagnostics.
    fn type_name(&self) -> &str;

    /// The value of `name`, or `None` if the type has no such property.
    fn property(&self, name: &str) -> Option<SqlValue>;
}

/// The object a statement's parameters are read from.
#[derive(Clone)]
pub enum ParameterObject {
    /// A single value, bound as a whole when its kind has a type handler.
    Value(SqlValue),
    /// Named values, looked up by property.
    Map(IndexMap<String, SqlValue>),
    /// A composite object exposing its fields through [`PropertySource`].
    Source(Arc<dyn PropertySource>),
}

impl ParameterObject {
    pub fn value<V: IntoSqlValue>(value: V) -> Self {
        ParameterObject::Value(value.into_value())
    }

    pub fn source<S: PropertySource + 'static>(source: S) -> Self {
        ParameterObject::Source(Arc::new(source))
    }

    pub fn type_name(&self) -> String {
        match self {
            ParameterObject::Value(v) => v.kind().to_string(),
            ParameterObject::Map(_) => "Map".to_string(),
            ParameterObject::Source(s) => s.type_name().to_string(),
        }
    }

    /// Reads `name` off the object.
    pub fn property(&self, name: &str) -> CoreResult<SqlValue> {
        match self {
            ParameterObject::Map(map) => map
                .get(name)
                .cloned()
                .ok_or_else(|| CoreError::missing_property(name, "Map")),
            ParameterObject::Source(source) => source
                .property(name)
                .ok_or_else(|| CoreError::missing_property(name, source.type_name())),
            ParameterObject::Value(v) => Err(CoreError::no_type_handler(name, v.kind().as_str())),
        }
    }
}

impl fmt::Debug for ParameterObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterObject::Value(v) => f.debug_tuple("Value").field(v).finish(),
            ParameterObject::Map(m) => f.debug_tuple("Map").field(m).finish(),
            ParameterObject::Source(s) => write!(f, "Source({})", s.type_name()),
        }
    }
}

impl From<IndexMap<String, SqlValue>> for ParameterObject {
    fn from(map: IndexMap<String, SqlValue>) -> Self {
        ParameterObject::Map(map)
    }
}

impl From<SqlValue> for ParameterObject {
    fn from(value: SqlValue) -> Self {
        ParameterObject::Value(value)
    }
}

/// A statement template with everything needed to bind it: the ordered
/// mappings, the parameter object and any additional (synthetic) parameters
/// registered while the statement was built.
#[derive(Debug, Clone, Default)]
pub struct BoundStatement {
    sql: String,
    parameter_mappings: Vec<ParameterMapping>,
    parameter_object: Option<ParameterObject>,
    additional_parameters: IndexMap<String, SqlValue>,
}

impl BoundStatement {
    pub fn new<S: Into<String>>(sql: S) -> Self {
        Self {
            sql: sql.into(),
            ..Default::default()
        }
    }

    pub fn with_mappings<I, M>(mut self, mappings: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<ParameterMapping>,
    {
        self.parameter_mappings.extend(mappings.into_iter().map(Into::into));
        self
    }

    pub fn with_parameter_object<P: Into<ParameterObject>>(mut self, parameter_object: P) -> Self {
        self.parameter_object = Some(parameter_object.into());
        self
    }

    pub fn with_additional_parameter<K: Into<String>, V: IntoSqlValue>(mut self, name: K, value: V) -> Self {
        self.additional_parameters.insert(name.into(), value.into_value());
        self
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn parameter_mappings(&self) -> &[ParameterMapping] {
        &self.parameter_mappings
    }

    pub fn parameter_object(&self) -> Option<&ParameterObject> {
        self.parameter_object.as_ref()
    }

    pub fn has_additional_parameter(&self, name: &str) -> bool {
        self.additional_parameters.contains_key(name)
    }

    pub fn additional_parameter(&self, name: &str) -> Option<&SqlValue> {
        self.additional_parameters.get(name)
    }

    /// Resolves the value bound to one mapping.
    ///
    /// Order: additional parameter, then null for an absent or null parameter object,
    /// then the whole object when `registry` has a handler for it, then the
    /// named property of the object.
    pub fn resolve_value(&self, mapping: &ParameterMapping, registry: &TypeHandlerRegistry) -> CoreResult<SqlValue> {
        let property = mapping.property();
        if let Some(value) = self.additional_parameter(property) {
            return Ok(value.clone());
        }
        match &self.parameter_object {
            None | Some(ParameterObject::Value(SqlValue::Null)) => Ok(SqlValue::Null),
            Some(object) if registry.has_type_handler(object) => match object {
                ParameterObject::Value(v) => Ok(v.clone()),
                other => other.property(property),
            },
            Some(object) => object.property(property),
        }
    }

    /// Renders the statement with every resolvable `?` replaced by a literal.
    ///
    /// A mapping that cannot be resolved keeps its `?` and is reported in
    /// [`ReconstructedSql::failures`]; later mappings still line up.
    pub fn to_literal_sql(&self, registry: &TypeHandlerRegistry) -> ReconstructedSql {
        let mut failures = Vec::new();
        let literals = self
            .parameter_mappings
            .iter()
            .map(|mapping| match self.resolve_value(mapping, registry) {
                Ok(value) => Some(value.to_literal()),
                Err(err) => {
                    failures.push(err);
                    None
                }
            })
            .collect::<Vec<_>>();
        let sql = fill_placeholders(&self.sql, literals);
        ReconstructedSql { sql, failures }
    }
}

/// A logging-only rendering of a bound statement.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconstructedSql {
    pub sql: String,
    pub failures: Vec<CoreError>,
}

impl ReconstructedSql {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

impl fmt::Display for ReconstructedSql {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}
