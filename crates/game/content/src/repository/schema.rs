//! Declarative per-entity schemas.
//!
//! A [`Schema`] lists the fields an entry may carry. [`Schema::check`] runs the
//! exact-field check and the per-field type checks in declaration order, then
//! hands back an [`Entry`] whose accessors apply defaults for absent optional
//! fields. A `null` optional field counts as absent.

use std::str::FromStr;

use serde_json::{Map, Value};

use super::fields::{
    assert_exact_fields, require_bool, require_i32, require_int, require_list, require_mapping,
    require_non_empty_str, require_non_negative_number, require_number, require_one_of,
    require_positive, require_str, require_str_list, require_u32,
};
use crate::error::{ContentError, Result};

/// Value domain of a single field.
#[derive(Clone, Copy, Debug)]
pub enum FieldKind {
    Str,
    NonEmptyStr,
    Int,
    NonNegativeInt,
    PositiveInt,
    Number,
    NonNegativeNumber,
    Bool,
    StrList,
    OneOf(&'static [&'static str]),
    Object,
    List,
    /// Shape checked by the table itself.
    Any,
}

#[derive(Clone, Copy, Debug)]
pub struct Field {
    pub name: &'static str,
    pub required: bool,
    pub kind: FieldKind,
}

impl Field {
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            required: true,
            kind,
        }
    }

    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            required: false,
            kind,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Schema {
    /// Entity name used in error contexts (`weapon`, `armour`, ...).
    pub entity: &'static str,
    pub fields: &'static [Field],
}

impl Schema {
    pub const fn new(entity: &'static str, fields: &'static [Field]) -> Self {
        Self { entity, fields }
    }

    /// Validates `raw` as the entry `id` and returns a typed accessor.
    pub fn check<'a>(&self, id: &str, raw: &'a Value) -> Result<Entry<'a>> {
        self.check_in(format!("{} '{}'", self.entity, id), raw)
    }

    /// Like [`check`](Self::check) with a caller-built context, for nested
    /// records such as `quest 'q' objectives[0]`.
    pub fn check_in<'a>(&self, context: String, raw: &'a Value) -> Result<Entry<'a>> {
        let map = require_mapping(raw, &context)?;
        let (required, optional): (Vec<&Field>, Vec<&Field>) =
            self.fields.iter().partition(|field| field.required);
        let names = |fields: Vec<&Field>| fields.iter().map(|f| f.name).collect::<Vec<_>>();
        assert_exact_fields(map, &context, &names(required), &names(optional))?;

        let entry = Entry { context, map };
        for field in self.fields {
            let Some(value) = map.get(field.name) else {
                continue;
            };
            if value.is_null() && !field.required {
                continue;
            }
            check_kind(value, &entry.field_context(field.name), field.kind)?;
        }
        Ok(entry)
    }
}

fn check_kind(value: &Value, context: &str, kind: FieldKind) -> Result<()> {
    match kind {
        FieldKind::Str => require_str(value, context).map(drop),
        FieldKind::NonEmptyStr => require_non_empty_str(value, context).map(drop),
        FieldKind::Int => require_int(value, context).map(drop),
        FieldKind::NonNegativeInt => require_u32(value, context).map(drop),
        FieldKind::PositiveInt => require_positive(value, context).map(drop),
        FieldKind::Number => require_number(value, context).map(drop),
        FieldKind::NonNegativeNumber => require_non_negative_number(value, context).map(drop),
        FieldKind::Bool => require_bool(value, context).map(drop),
        FieldKind::StrList => require_str_list(Some(value), context).map(drop),
        FieldKind::OneOf(names) => {
            let text = require_str(value, context)?;
            if names.contains(&text) {
                Ok(())
            } else {
                Err(ContentError::validation(
                    context,
                    format!("must be one of {names:?}, got '{text}'"),
                ))
            }
        }
        FieldKind::Object => require_mapping(value, context).map(drop),
        FieldKind::List => require_list(value, context).map(drop),
        FieldKind::Any => Ok(()),
    }
}

/// A schema-checked JSON object with typed accessors.
#[derive(Debug)]
pub struct Entry<'a> {
    context: String,
    map: &'a Map<String, Value>,
}

impl<'a> Entry<'a> {
    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn field_context(&self, name: &str) -> String {
        format!("{} {}", self.context, name)
    }

    /// Raw value; `None` when absent or `null`.
    pub fn get(&self, name: &str) -> Option<&'a Value> {
        self.map.get(name).filter(|value| !value.is_null())
    }

    /// Raw value of a field that must be present (it may be `null`).
    pub fn value(&self, name: &str) -> Result<&'a Value> {
        self.map
            .get(name)
            .ok_or_else(|| ContentError::validation(self.field_context(name), "is required"))
    }

    pub fn str(&self, name: &str) -> Result<&'a str> {
        require_str(self.value(name)?, &self.field_context(name))
    }

    /// Non-blank string, returned untrimmed.
    pub fn non_empty_str(&self, name: &str) -> Result<&'a str> {
        require_non_empty_str(self.value(name)?, &self.field_context(name))
    }

    pub fn opt_str(&self, name: &str) -> Result<Option<&'a str>> {
        self.get(name)
            .map(|value| require_str(value, &self.field_context(name)))
            .transpose()
    }

    /// Optional string that must not be blank when present.
    pub fn opt_non_empty_str(&self, name: &str) -> Result<Option<&'a str>> {
        self.get(name)
            .map(|value| require_non_empty_str(value, &self.field_context(name)))
            .transpose()
    }

    pub fn u32(&self, name: &str) -> Result<u32> {
        require_u32(self.value(name)?, &self.field_context(name))
    }

    pub fn opt_u32(&self, name: &str) -> Result<Option<u32>> {
        self.get(name)
            .map(|value| require_u32(value, &self.field_context(name)))
            .transpose()
    }

    pub fn u32_or(&self, name: &str, default: u32) -> Result<u32> {
        Ok(self.opt_u32(name)?.unwrap_or(default))
    }

    pub fn positive(&self, name: &str) -> Result<u32> {
        require_positive(self.value(name)?, &self.field_context(name))
    }

    pub fn positive_or(&self, name: &str, default: u32) -> Result<u32> {
        match self.get(name) {
            Some(value) => require_positive(value, &self.field_context(name)),
            None => Ok(default),
        }
    }

    pub fn i32_or(&self, name: &str, default: i32) -> Result<i32> {
        match self.get(name) {
            Some(value) => require_i32(value, &self.field_context(name)),
            None => Ok(default),
        }
    }

    pub fn number_or(&self, name: &str, default: f64) -> Result<f64> {
        match self.get(name) {
            Some(value) => require_number(value, &self.field_context(name)),
            None => Ok(default),
        }
    }

    pub fn bool_or(&self, name: &str, default: bool) -> Result<bool> {
        match self.get(name) {
            Some(value) => require_bool(value, &self.field_context(name)),
            None => Ok(default),
        }
    }

    /// String list; absent or `null` yields an empty list.
    pub fn str_list(&self, name: &str) -> Result<Vec<String>> {
        require_str_list(self.get(name), &self.field_context(name))
    }

    pub fn one_of<T: FromStr>(&self, name: &str, names: &[&str]) -> Result<T> {
        require_one_of(self.value(name)?, &self.field_context(name), names)
    }

    pub fn object(&self, name: &str) -> Result<&'a Map<String, Value>> {
        require_mapping(self.value(name)?, &self.field_context(name))
    }

    pub fn opt_object(&self, name: &str) -> Result<Option<&'a Map<String, Value>>> {
        self.get(name)
            .map(|value| require_mapping(value, &self.field_context(name)))
            .transpose()
    }

    pub fn list(&self, name: &str) -> Result<&'a [Value]> {
        require_list(self.value(name)?, &self.field_context(name))
    }

    /// List; absent or `null` yields an empty slice.
    pub fn list_or_empty(&self, name: &str) -> Result<&'a [Value]> {
        match self.get(name) {
            Some(value) => require_list(value, &self.field_context(name)),
            None => Ok(&[]),
        }
    }
}
