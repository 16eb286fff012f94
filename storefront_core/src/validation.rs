//! Field-level validation of incoming category and product payloads.
//!
//! Payloads are first deserialized into loosely-typed `Unvalidated*Fields` structs
//! (every field is a raw JSON value), so that a missing field or a field of the wrong
//! type turns into a per-field validation message instead of a generic JSON error.
//!
//! String inputs are trimmed before any rule is checked, and a string that is empty
//! after trimming is treated as if it was not provided at all.
//!
//! Checks that need the store (name uniqueness, category existence) are performed by the
//! caller; their outcome is passed into `validate` so that every violated field
//! is reported in a single [`FieldErrors`].

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::ids::CategoryId;


pub const CATEGORY_NAME_MAX_CHARACTERS: usize = 80;

pub const PRODUCT_NAME_MAX_CHARACTERS: usize = 255;

pub const PRODUCT_DESCRIPTION_MIN_CHARACTERS: usize = 5;

pub const PRODUCT_MINIMUM_PRICE_IN_CENTS: i64 = 1;


pub const CATEGORY_NAME_TAKEN_MESSAGE: &str = "The name has already been taken.";

pub const INVALID_CATEGORY_REFERENCE_MESSAGE: &str = "The selected category id is invalid.";



/// Validation messages, grouped by the name of the field they apply to.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct FieldErrors {
    errors: BTreeMap<String, Vec<String>>,
}

impl FieldErrors {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<F, M>(&mut self, field: F, message: M)
    where
        F: Into<String>,
        M: Into<String>,
    {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[inline]
    pub fn has_errors_for(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    #[inline]
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }

    #[inline]
    pub fn into_map(self) -> BTreeMap<String, Vec<String>> {
        self.errors
    }

    /// A single message for a single field.
    pub fn single<F, M>(field: F, message: M) -> Self
    where
        F: Into<String>,
        M: Into<String>,
    {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    /// Returns `Ok(value)` if no errors were recorded, `Err(self)` otherwise.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}



enum StringField {
    Missing,
    NotAString,
    ContainsControlCharacters,
    Present(String),
}

/// Tabs and line breaks are the only control characters allowed in text fields.
fn is_disallowed_control_character(character: char) -> bool {
    character.is_control() && !matches!(character, '\t' | '\n' | '\r')
}

impl StringField {
    fn from_json_value(value: &Value) -> Self {
        match value {
            Value::Null => Self::Missing,
            Value::String(string) => {
                let trimmed = string.trim();

                if trimmed.is_empty() {
                    Self::Missing
                } else if trimmed.chars().any(is_disallowed_control_character) {
                    Self::ContainsControlCharacters
                } else {
                    Self::Present(trimmed.to_string())
                }
            }
            _ => Self::NotAString,
        }
    }
}


enum IntegerField {
    Missing,
    NotAnInteger,
    Present(i64),
}

impl IntegerField {
    /// Accepts JSON integers as well as strings containing an integer.
    fn from_json_value(value: &Value) -> Self {
        match value {
            Value::Null => Self::Missing,
            Value::Number(number) => match number.as_i64() {
                Some(integer) => Self::Present(integer),
                None => Self::NotAnInteger,
            },
            Value::String(string) => {
                let trimmed = string.trim();

                if trimmed.is_empty() {
                    return Self::Missing;
                }

                match trimmed.parse::<i64>() {
                    Ok(integer) => Self::Present(integer),
                    Err(_) => Self::NotAnInteger,
                }
            }
            _ => Self::NotAnInteger,
        }
    }
}


#[inline]
fn take_field(object: &mut Map<String, Value>, field: &str) -> Value {
    object.remove(field).unwrap_or(Value::Null)
}

#[inline]
fn display_name(field: &str) -> String {
    field.replace('_', " ")
}

fn required_message(field: &str) -> String {
    format!("The {} field is required.", display_name(field))
}

fn string_type_message(field: &str) -> String {
    format!("The {} must be a string.", display_name(field))
}

fn control_characters_message(field: &str) -> String {
    format!("The {} must not contain control characters.", display_name(field))
}

fn integer_type_message(field: &str) -> String {
    format!("The {} must be an integer.", display_name(field))
}


fn require_string(
    errors: &mut FieldErrors,
    field: &'static str,
    value: &Value,
    max_characters: usize,
) -> Option<String> {
    match StringField::from_json_value(value) {
        StringField::Missing => {
            errors.add(field, required_message(field));
            None
        }
        StringField::NotAString => {
            errors.add(field, string_type_message(field));
            None
        }
        StringField::ContainsControlCharacters => {
            errors.add(field, control_characters_message(field));
            None
        }
        StringField::Present(string) => {
            if string.chars().count() > max_characters {
                errors.add(
                    field,
                    format!(
                        "The {} must not be greater than {} characters.",
                        display_name(field),
                        max_characters
                    ),
                );

                return None;
            }

            Some(string)
        }
    }
}

fn require_integer(errors: &mut FieldErrors, field: &'static str, value: &Value) -> Option<i64> {
    match IntegerField::from_json_value(value) {
        IntegerField::Missing => {
            errors.add(field, required_message(field));
            None
        }
        IntegerField::NotAnInteger => {
            errors.add(field, integer_type_message(field));
            None
        }
        IntegerField::Present(integer) => Some(integer),
    }
}



/// Category payload as received from the client (`POST` and `PUT`/`PATCH`).
///
/// Only a JSON object deserializes into this; absent keys become `null`.
#[derive(Deserialize, Clone, PartialEq, Debug, Default)]
#[serde(from = "Map<String, Value>")]
pub struct UnvalidatedCategoryFields {
    pub name: Value,
}

impl From<Map<String, Value>> for UnvalidatedCategoryFields {
    fn from(mut object: Map<String, Value>) -> Self {
        Self {
            name: take_field(&mut object, "name"),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ValidatedCategoryFields {
    pub name: String,
}

impl UnvalidatedCategoryFields {
    /// Returns the trimmed name if it is a non-empty string.
    ///
    /// Use this to look up whether the name is already taken before calling [`Self::validate`].
    pub fn name_candidate(&self) -> Option<String> {
        match StringField::from_json_value(&self.name) {
            StringField::Present(name) => Some(name),
            _ => None,
        }
    }

    /// `name_is_taken` must report whether [`Self::name_candidate`] already belongs
    /// to another category; it is ignored when there is no candidate.
    pub fn validate(self, name_is_taken: bool) -> Result<ValidatedCategoryFields, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = require_string(
            &mut errors,
            "name",
            &self.name,
            CATEGORY_NAME_MAX_CHARACTERS,
        );

        let Some(name) = name else {
            return Err(errors);
        };

        if name_is_taken {
            errors.add("name", CATEGORY_NAME_TAKEN_MESSAGE);
        }

        errors.into_result(ValidatedCategoryFields { name })
    }
}



/// Product payload as received from the client (`POST /products`).
///
/// Only a JSON object deserializes into this; absent keys become `null`.
#[derive(Deserialize, Clone, PartialEq, Debug, Default)]
#[serde(from = "Map<String, Value>")]
pub struct UnvalidatedProductFields {
    pub name: Value,

    pub description: Value,

    pub price_in_cents: Value,

    pub category_id: Value,
}

impl From<Map<String, Value>> for UnvalidatedProductFields {
    fn from(mut object: Map<String, Value>) -> Self {
        Self {
            name: take_field(&mut object, "name"),
            description: take_field(&mut object, "description"),
            price_in_cents: take_field(&mut object, "price_in_cents"),
            category_id: take_field(&mut object, "category_id"),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ValidatedProductFields {
    pub name: String,
    pub description: Option<String>,
    pub price_in_cents: i64,
    pub category_id: CategoryId,
}

impl UnvalidatedProductFields {
    /// Returns the referenced category ID if `category_id` holds an integer.
    ///
    /// Use this to look up whether the category exists before calling [`Self::validate`].
    pub fn category_id_candidate(&self) -> Option<CategoryId> {
        match IntegerField::from_json_value(&self.category_id) {
            IntegerField::Present(id) => Some(CategoryId::new(id)),
            _ => None,
        }
    }

    /// `referenced_category_exists` must report whether the category returned by
    /// [`Self::category_id_candidate`] exists; it is ignored when there is no candidate.
    pub fn validate(
        self,
        referenced_category_exists: bool,
    ) -> Result<ValidatedProductFields, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = require_string(
            &mut errors,
            "name",
            &self.name,
            PRODUCT_NAME_MAX_CHARACTERS,
        );


        let description = match StringField::from_json_value(&self.description) {
            StringField::Missing => None,
            StringField::NotAString => {
                errors.add("description", string_type_message("description"));
                None
            }
            StringField::ContainsControlCharacters => {
                errors.add("description", control_characters_message("description"));
                None
            }
            StringField::Present(description) => {
                if description.chars().count() < PRODUCT_DESCRIPTION_MIN_CHARACTERS {
                    errors.add(
                        "description",
                        format!(
                            "The description must be at least {} characters.",
                            PRODUCT_DESCRIPTION_MIN_CHARACTERS
                        ),
                    );
                }

                Some(description)
            }
        };


        let price_in_cents = require_integer(&mut errors, "price_in_cents", &self.price_in_cents);

        if let Some(price) = price_in_cents {
            if price < PRODUCT_MINIMUM_PRICE_IN_CENTS {
                errors.add(
                    "price_in_cents",
                    format!(
                        "The price in cents must be at least {}.",
                        PRODUCT_MINIMUM_PRICE_IN_CENTS
                    ),
                );
            }
        }


        let category_id = require_integer(&mut errors, "category_id", &self.category_id);

        if category_id.is_some() && !referenced_category_exists {
            errors.add("category_id", INVALID_CATEGORY_REFERENCE_MESSAGE);
        }


        match (name, price_in_cents, category_id) {
            (Some(name), Some(price_in_cents), Some(category_id)) if errors.is_empty() => {
                Ok(ValidatedProductFields {
                    name,
                    description,
                    price_in_cents,
                    category_id: CategoryId::new(category_id),
                })
            }
            _ => Err(errors),
        }
    }
}



#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    fn category_fields(value: Value) -> UnvalidatedCategoryFields {
        serde_json::from_value(value).unwrap()
    }

    fn product_fields(value: Value) -> UnvalidatedProductFields {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn accepts_and_trims_a_valid_category_name() {
        let fields = category_fields(json!({ "name": "  Board games " }));

        assert_eq!(fields.name_candidate().as_deref(), Some("Board games"));
        assert_eq!(
            fields.validate(false).unwrap(),
            ValidatedCategoryFields {
                name: "Board games".to_string()
            }
        );
    }

    #[test]
    fn rejects_missing_blank_and_non_string_category_names() {
        for body in [
            json!({}),
            json!({ "name": null }),
            json!({ "name": "   " }),
        ] {
            let errors = category_fields(body).validate(false).unwrap_err();
            assert_eq!(
                errors.into_map().get("name").unwrap(),
                &vec!["The name field is required.".to_string()]
            );
        }

        let errors = category_fields(json!({ "name": 12 }))
            .validate(false)
            .unwrap_err();
        assert_eq!(
            errors.into_map().get("name").unwrap(),
            &vec!["The name must be a string.".to_string()]
        );
    }

    #[test]
    fn enforces_the_category_name_length_in_characters() {
        let exactly_at_limit = "č".repeat(CATEGORY_NAME_MAX_CHARACTERS);
        assert!(category_fields(json!({ "name": exactly_at_limit }))
            .validate(false)
            .is_ok());

        let over_limit = "a".repeat(CATEGORY_NAME_MAX_CHARACTERS + 1);
        let errors = category_fields(json!({ "name": over_limit }))
            .validate(false)
            .unwrap_err();
        assert!(errors.has_errors_for("name"));
    }

    #[test]
    fn reports_taken_category_names() {
        let errors = category_fields(json!({ "name": "Toys" }))
            .validate(true)
            .unwrap_err();

        assert_eq!(
            errors.into_map().get("name").unwrap(),
            &vec!["The name has already been taken.".to_string()]
        );
    }

    #[test]
    fn accepts_a_valid_product() {
        let fields = product_fields(json!({
            "name": "Chess set",
            "description": "Wooden pieces with a folding board.",
            "price_in_cents": 2599,
            "category_id": 3,
        }));

        assert_eq!(fields.category_id_candidate(), Some(CategoryId::new(3)));

        assert_eq!(
            fields.validate(true).unwrap(),
            ValidatedProductFields {
                name: "Chess set".to_string(),
                description: Some("Wooden pieces with a folding board.".to_string()),
                price_in_cents: 2599,
                category_id: CategoryId::new(3),
            }
        );
    }

    #[test]
    fn treats_missing_and_empty_descriptions_as_null() {
        for description in [json!(null), json!(""), json!("   ")] {
            let validated = product_fields(json!({
                "name": "Dice",
                "description": description,
                "price_in_cents": "150",
                "category_id": "1",
            }))
            .validate(true)
            .unwrap();

            assert_eq!(validated.description, None);
            assert_eq!(validated.price_in_cents, 150);
        }
    }

    #[test]
    fn reports_every_violated_product_field() {
        let errors = product_fields(json!({
            "name": "x".repeat(PRODUCT_NAME_MAX_CHARACTERS + 1),
            "description": "tiny",
            "price_in_cents": 0,
            "category_id": 99,
        }))
        .validate(false)
        .unwrap_err();

        let fields = errors.fields().collect::<Vec<_>>();
        assert_eq!(
            fields,
            vec!["category_id", "description", "name", "price_in_cents"]
        );

        let errors = errors.into_map();
        assert_eq!(
            errors.get("category_id").unwrap(),
            &vec!["The selected category id is invalid.".to_string()]
        );
        assert_eq!(
            errors.get("price_in_cents").unwrap(),
            &vec!["The price in cents must be at least 1.".to_string()]
        );
    }

    #[test]
    fn rejects_non_integer_prices_and_category_ids() {
        let fields = product_fields(json!({
            "name": "Puzzle",
            "price_in_cents": 12.5,
            "category_id": "first",
        }));

        assert_eq!(fields.category_id_candidate(), None);

        let errors = fields.validate(true).unwrap_err().into_map();
        assert_eq!(
            errors.get("price_in_cents").unwrap(),
            &vec!["The price in cents must be an integer.".to_string()]
        );
        assert_eq!(
            errors.get("category_id").unwrap(),
            &vec!["The category id must be an integer.".to_string()]
        );
    }

    #[test]
    fn requires_all_mandatory_product_fields() {
        let errors = product_fields(json!({})).validate(false).unwrap_err();

        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec!["category_id", "name", "price_in_cents"]
        );
    }

    #[test]
    fn only_json_objects_deserialize_into_payloads() {
        assert!(serde_json::from_value::<UnvalidatedCategoryFields>(json!(["Books"])).is_err());
        assert!(serde_json::from_value::<UnvalidatedCategoryFields>(json!("Books")).is_err());
        assert!(
            serde_json::from_value::<UnvalidatedProductFields>(json!(["Dune", null, 1299, 1]))
                .is_err()
        );

        let fields = product_fields(json!({ "name": "Dune", "unknown": true }));
        assert_eq!(fields.name, json!("Dune"));
        assert_eq!(fields.description, Value::Null);
        assert_eq!(fields.category_id_candidate(), None);
    }

    #[test]
    fn rejects_control_characters_in_text_fields() {
        let fields = category_fields(json!({ "name": "Board\u{0000}games" }));
        assert_eq!(fields.name_candidate(), None);

        let errors = fields.validate(false).unwrap_err();
        assert_eq!(
            errors.into_map().get("name").unwrap(),
            &vec!["The name must not contain control characters.".to_string()]
        );

        let errors = product_fields(json!({
            "name": "Dice",
            "description": "Six\u{0007}sided dice",
            "price_in_cents": 150,
            "category_id": 1,
        }))
        .validate(true)
        .unwrap_err();
        assert_eq!(
            errors.into_map().get("description").unwrap(),
            &vec!["The description must not contain control characters.".to_string()]
        );
    }

    #[test]
    fn allows_line_breaks_and_tabs_in_descriptions() {
        let validated = product_fields(json!({
            "name": "Dice",
            "description": "Six sided.\n\tComes in a pouch.",
            "price_in_cents": 150,
            "category_id": 1,
        }))
        .validate(true)
        .unwrap();

        assert_eq!(
            validated.description.as_deref(),
            Some("Six sided.\n\tComes in a pouch.")
        );
    }
}
