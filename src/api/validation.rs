use axum::{
    Json,
    extract::{FromRequest, Request},
};
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::ApiError;
use crate::models::director::DirectorInput;
use crate::models::film::{FilmInput, MAX_RATING, MAX_TITLE_LEN, MIN_RATING};
use crate::models::genre::GenreInput;
use crate::models::review::{DEFAULT_STARS, MAX_STARS, MIN_STARS, ReviewInput};
use crate::services::DirectorService;

pub const MAX_NAME_LEN: usize = 255;
pub const MAX_USERNAME_LEN: usize = 150;

const REQUIRED: &str = "This field is required.";
const NOT_NULL: &str = "This field may not be null.";
const NOT_BLANK: &str = "This field may not be blank.";
const INVALID_STRING: &str = "Not a valid string.";
const INVALID_NUMBER: &str = "A valid number is required.";
const INVALID_INTEGER: &str = "A valid integer is required.";
const INVALID_BOOLEAN: &str = "Must be a valid boolean.";
const INVALID_DATE: &str = "Date has wrong format. Use one of these formats instead: YYYY-MM-DD.";
const INVALID_USERNAME: &str = "Enter a valid username. This value may contain only letters, \
                                numbers, and @/./+/-/_ characters.";
const UNKNOWN_DIRECTOR: &str = "Director does not exist";

/// Field name to messages, serialized as a flat JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        let message = message.into();
        let messages = self.0.entry(field.to_string()).or_default();
        if !messages.contains(&message) {
            messages.push(message);
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    fn into_result<T>(self, value: impl FnOnce() -> Option<T>) -> Result<T, Self> {
        if !self.is_empty() {
            return Err(self);
        }
        value().ok_or_else(|| Self::single("non_field_errors", "Invalid data."))
    }
}

/// A JSON request body that must be an object.
///
/// Unreadable JSON and non-object bodies are rejected with a
/// `non_field_errors` entry instead of axum's plain-text rejection.
pub struct JsonObject(pub Map<String, Value>);

impl<S> FromRequest<S> for JsonObject
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| {
                ApiError::Validation(FieldErrors::single(
                    "non_field_errors",
                    rejection.body_text(),
                ))
            })?;

        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(ApiError::Validation(FieldErrors::single(
                "non_field_errors",
                format!(
                    "Invalid data. Expected a dictionary, but got {}.",
                    type_name(&other)
                ),
            ))),
        }
    }
}

/// Type names as they appear in validation messages.
fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "NoneType",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

/// Looks up a field, recording "required"/"null" errors. Returns the
/// non-null value when present.
fn present<'a>(
    body: &'a Map<String, Value>,
    field: &str,
    errors: &mut FieldErrors,
) -> Option<&'a Value> {
    match body.get(field) {
        None => {
            errors.add(field, REQUIRED);
            None
        }
        Some(Value::Null) => {
            errors.add(field, NOT_NULL);
            None
        }
        Some(value) => Some(value),
    }
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn required_str(
    body: &Map<String, Value>,
    field: &str,
    max_len: Option<usize>,
    trim: bool,
    errors: &mut FieldErrors,
) -> Option<String> {
    let value = present(body, field, errors)?;
    let Some(text) = as_text(value) else {
        errors.add(field, INVALID_STRING);
        return None;
    };

    if text.trim().is_empty() {
        errors.add(field, NOT_BLANK);
        return None;
    }

    let text = if trim { text.trim().to_string() } else { text };
    if let Some(max) = max_len
        && text.chars().count() > max
    {
        errors.add(
            field,
            format!("Ensure this field has no more than {max} characters."),
        );
        return None;
    }

    Some(text)
}

/// Absent or null means no value. The outer `Option` is `None` on error.
fn optional_str(
    body: &Map<String, Value>,
    field: &str,
    errors: &mut FieldErrors,
) -> Option<Option<String>> {
    match body.get(field) {
        None | Some(Value::Null) => Some(None),
        Some(value) => {
            if let Some(text) = as_text(value) {
                Some(Some(text.trim().to_string()))
            } else {
                errors.add(field, INVALID_STRING);
                None
            }
        }
    }
}

fn parse_float(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

fn parse_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < 9.0e15)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn parse_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_i64() {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => None,
        },
        Value::String(s) => match s.as_str() {
            "true" | "True" | "TRUE" | "t" | "T" | "yes" | "Yes" | "YES" | "y" | "Y" | "on"
            | "On" | "ON" | "1" => Some(true),
            "false" | "False" | "FALSE" | "f" | "F" | "no" | "No" | "NO" | "n" | "N" | "off"
            | "Off" | "OFF" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn check_min(field: &str, value: i64, min: i64, errors: &mut FieldErrors) -> bool {
    if value < min {
        errors.add(
            field,
            format!("Ensure this value is greater than or equal to {min}."),
        );
        return false;
    }
    true
}

fn check_max(field: &str, value: i64, max: i64, errors: &mut FieldErrors) -> bool {
    if value > max {
        errors.add(
            field,
            format!("Ensure this value is less than or equal to {max}."),
        );
        return false;
    }
    true
}

fn rating_field(body: &Map<String, Value>, errors: &mut FieldErrors) -> Option<f64> {
    let value = present(body, "rating", errors)?;
    let Some(rating) = parse_float(value) else {
        errors.add("rating", INVALID_NUMBER);
        return None;
    };

    if rating < MIN_RATING {
        errors.add(
            "rating",
            format!("Ensure this value is greater than or equal to {MIN_RATING}."),
        );
        return None;
    }
    if rating > MAX_RATING {
        errors.add(
            "rating",
            format!("Ensure this value is less than or equal to {MAX_RATING}."),
        );
        return None;
    }
    Some(rating)
}

fn bool_field(body: &Map<String, Value>, field: &str, errors: &mut FieldErrors) -> Option<bool> {
    let value = present(body, field, errors)?;
    let parsed = parse_bool(value);
    if parsed.is_none() {
        errors.add(field, INVALID_BOOLEAN);
    }
    parsed
}

fn id_field(body: &Map<String, Value>, field: &str, errors: &mut FieldErrors) -> Option<i64> {
    let value = present(body, field, errors)?;
    let Some(id) = parse_integer(value) else {
        errors.add(field, INVALID_INTEGER);
        return None;
    };
    check_min(field, id, 1, errors).then_some(id)
}

fn genres_field(body: &Map<String, Value>, errors: &mut FieldErrors) -> Option<Vec<i32>> {
    let value = present(body, "genres", errors)?;
    let Value::Array(items) = value else {
        errors.add(
            "genres",
            format!(
                "Expected a list of items but got type \"{}\".",
                type_name(value)
            ),
        );
        return None;
    };

    let mut ids = Vec::with_capacity(items.len());
    let mut valid = true;
    for item in items {
        let Some(id) = parse_integer(item) else {
            errors.add("genres", INVALID_INTEGER);
            valid = false;
            continue;
        };
        if !check_min("genres", id, 1, errors) {
            valid = false;
            continue;
        }
        if let Ok(id) = i32::try_from(id) {
            ids.push(id);
        } else {
            errors.add(
                "genres",
                format!("Invalid pk \"{id}\" - object does not exist."),
            );
            valid = false;
        }
    }

    valid.then_some(ids)
}

/// Validates a film body. Every field is checked before returning, and the
/// director lookup runs only when `director_id` is a well-formed id.
pub async fn validate_film_input(
    body: &Map<String, Value>,
    directors: &dyn DirectorService,
) -> Result<FilmInput, ApiError> {
    let mut errors = FieldErrors::new();

    let title = required_str(body, "title", Some(MAX_TITLE_LEN), true, &mut errors);
    let text = optional_str(body, "text", &mut errors);
    let rating = rating_field(body, &mut errors);
    let is_active = bool_field(body, "is_active", &mut errors);
    let genres = genres_field(body, &mut errors);

    let mut director_id = None;
    if let Some(id) = id_field(body, "director_id", &mut errors) {
        let exists = match i32::try_from(id) {
            Ok(id) => directors.director_exists(id).await?,
            Err(_) => false,
        };
        if exists {
            director_id = i32::try_from(id).ok();
        } else {
            errors.add("director_id", UNKNOWN_DIRECTOR);
        }
    }

    errors
        .into_result(|| {
            Some(FilmInput {
                title: title?,
                text: text?,
                rating: rating?,
                is_active: is_active?,
                director_id: director_id?,
                genres: genres?,
            })
        })
        .map_err(ApiError::Validation)
}

pub fn validate_director_input(body: &Map<String, Value>) -> Result<DirectorInput, FieldErrors> {
    let mut errors = FieldErrors::new();

    let full_name = required_str(body, "full_name", Some(MAX_NAME_LEN), true, &mut errors);

    let birthday = match body.get("birthday") {
        None | Some(Value::Null) => Some(None),
        Some(Value::String(s)) => {
            if let Ok(date) = NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d") {
                Some(Some(date))
            } else {
                errors.add("birthday", INVALID_DATE);
                None
            }
        }
        Some(_) => {
            errors.add("birthday", INVALID_DATE);
            None
        }
    };

    errors.into_result(|| {
        Some(DirectorInput {
            full_name: full_name?,
            birthday: birthday?,
        })
    })
}

pub fn validate_genre_input(body: &Map<String, Value>) -> Result<GenreInput, FieldErrors> {
    let mut errors = FieldErrors::new();
    let name = required_str(body, "name", Some(MAX_NAME_LEN), true, &mut errors);
    errors.into_result(|| Some(GenreInput { name: name? }))
}

pub fn validate_review_input(body: &Map<String, Value>) -> Result<ReviewInput, FieldErrors> {
    let mut errors = FieldErrors::new();

    let text = required_str(body, "text", None, true, &mut errors);

    let stars = match body.get("stars") {
        None => Some(DEFAULT_STARS),
        Some(Value::Null) => {
            errors.add("stars", NOT_NULL);
            None
        }
        Some(value) => match parse_integer(value) {
            Some(stars)
                if check_min("stars", stars, MIN_STARS.into(), &mut errors)
                    && check_max("stars", stars, MAX_STARS.into(), &mut errors) =>
            {
                i32::try_from(stars).ok()
            }
            Some(_) => None,
            None => {
                errors.add("stars", INVALID_INTEGER);
                None
            }
        },
    };

    errors.into_result(|| {
        Some(ReviewInput {
            text: text?,
            stars: stars?,
        })
    })
}

/// Validated registration payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

fn is_username_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_')
}

pub fn validate_registration(body: &Map<String, Value>) -> Result<Credentials, FieldErrors> {
    let mut errors = FieldErrors::new();

    let mut username = required_str(body, "username", Some(MAX_USERNAME_LEN), true, &mut errors);
    if let Some(name) = &username
        && !name.chars().all(is_username_char)
    {
        errors.add("username", INVALID_USERNAME);
        username = None;
    }

    let password = required_str(body, "password", None, false, &mut errors);

    errors.into_result(|| {
        Some(Credentials {
            username: username?,
            password: password?,
        })
    })
}

pub fn validate_login(body: &Map<String, Value>) -> Result<Credentials, FieldErrors> {
    let mut errors = FieldErrors::new();

    let username = required_str(body, "username", None, true, &mut errors);
    let password = required_str(body, "password", None, false, &mut errors);

    errors.into_result(|| {
        Some(Credentials {
            username: username?,
            password: password?,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("test body must be an object"),
        }
    }

    fn messages(errors: &FieldErrors, field: &str) -> Vec<String> {
        errors.get(field).map(<[String]>::to_vec).unwrap_or_default()
    }

    #[test]
    fn test_rating_bounds_are_inclusive() {
        let mut errors = FieldErrors::new();
        assert_eq!(
            rating_field(&object(json!({"rating": 0})), &mut errors),
            Some(0.0)
        );
        assert_eq!(
            rating_field(&object(json!({"rating": 10.0})), &mut errors),
            Some(10.0)
        );
        assert_eq!(
            rating_field(&object(json!({"rating": "7.5"})), &mut errors),
            Some(7.5)
        );
        assert!(errors.is_empty());

        assert_eq!(rating_field(&object(json!({"rating": -0.1})), &mut errors), None);
        assert_eq!(rating_field(&object(json!({"rating": 10.1})), &mut errors), None);
        assert_eq!(
            messages(&errors, "rating"),
            vec![
                "Ensure this value is greater than or equal to 0.",
                "Ensure this value is less than or equal to 10.",
            ]
        );
    }

    #[test]
    fn test_rating_rejects_non_numbers() {
        let mut errors = FieldErrors::new();
        assert_eq!(rating_field(&object(json!({"rating": "high"})), &mut errors), None);
        assert_eq!(rating_field(&object(json!({"rating": true})), &mut errors), None);
        assert_eq!(messages(&errors, "rating"), vec![INVALID_NUMBER]);
    }

    #[test]
    fn test_booleans() {
        for (raw, expected) in [
            (json!(true), Some(true)),
            (json!("false"), Some(false)),
            (json!(1), Some(true)),
            (json!("0"), Some(false)),
            (json!(2), None),
            (json!("maybe"), None),
            (json!([]), None),
        ] {
            assert_eq!(parse_bool(&raw), expected, "{raw}");
        }
    }

    #[test]
    fn test_genres_must_be_a_list_of_positive_ids() {
        let mut errors = FieldErrors::new();
        assert_eq!(
            genres_field(&object(json!({"genres": [3, "1", 2]})), &mut errors),
            Some(vec![3, 1, 2])
        );
        assert!(errors.is_empty());

        assert_eq!(genres_field(&object(json!({"genres": "1"})), &mut errors), None);
        assert_eq!(
            messages(&errors, "genres"),
            vec!["Expected a list of items but got type \"str\"."]
        );

        let mut errors = FieldErrors::new();
        assert_eq!(genres_field(&object(json!({"genres": [0]})), &mut errors), None);
        assert_eq!(
            messages(&errors, "genres"),
            vec!["Ensure this value is greater than or equal to 1."]
        );
    }

    #[test]
    fn test_missing_and_null_fields() {
        let mut errors = FieldErrors::new();
        let body = object(json!({"title": null}));
        assert_eq!(required_str(&body, "title", Some(255), true, &mut errors), None);
        assert_eq!(bool_field(&body, "is_active", &mut errors), None);
        assert_eq!(messages(&errors, "title"), vec![NOT_NULL]);
        assert_eq!(messages(&errors, "is_active"), vec![REQUIRED]);
    }

    #[test]
    fn test_title_length_and_blank() {
        let mut errors = FieldErrors::new();
        let long = "x".repeat(256);
        assert_eq!(
            required_str(&object(json!({"title": long})), "title", Some(255), true, &mut errors),
            None
        );
        assert_eq!(
            required_str(&object(json!({"title": "   "})), "title", Some(255), true, &mut errors),
            None
        );
        assert_eq!(
            messages(&errors, "title"),
            vec![
                "Ensure this field has no more than 255 characters.",
                NOT_BLANK,
            ]
        );

        let exact = "x".repeat(255);
        let mut errors = FieldErrors::new();
        assert_eq!(
            required_str(
                &object(json!({"title": exact.clone()})),
                "title",
                Some(255),
                true,
                &mut errors
            ),
            Some(exact)
        );
    }

    #[test]
    fn test_director_input() {
        let input = validate_director_input(&object(
            json!({"full_name": "Agnès Varda", "birthday": "1928-05-30"}),
        ))
        .unwrap();
        assert_eq!(input.full_name, "Agnès Varda");
        assert_eq!(input.birthday, NaiveDate::from_ymd_opt(1928, 5, 30));

        let errors =
            validate_director_input(&object(json!({"birthday": "30/05/1928"}))).unwrap_err();
        assert_eq!(messages(&errors, "full_name"), vec![REQUIRED]);
        assert_eq!(messages(&errors, "birthday"), vec![INVALID_DATE]);
    }

    #[test]
    fn test_review_stars_default_and_range() {
        let input = validate_review_input(&object(json!({"text": "Slow, then sublime"}))).unwrap();
        assert_eq!(input.stars, DEFAULT_STARS);

        let errors =
            validate_review_input(&object(json!({"text": "meh", "stars": 11}))).unwrap_err();
        assert_eq!(
            messages(&errors, "stars"),
            vec!["Ensure this value is less than or equal to 10."]
        );

        let errors = validate_review_input(&object(json!({"stars": 0}))).unwrap_err();
        assert_eq!(messages(&errors, "text"), vec![REQUIRED]);
        assert_eq!(
            messages(&errors, "stars"),
            vec!["Ensure this value is greater than or equal to 1."]
        );
    }

    #[test]
    fn test_registration_username_rules() {
        let creds = validate_registration(&object(
            json!({"username": "film.buff+1@example", "password": " secret "}),
        ))
        .unwrap();
        assert_eq!(creds.username, "film.buff+1@example");
        assert_eq!(creds.password, " secret ");

        let errors = validate_registration(&object(
            json!({"username": "no spaces", "password": ""}),
        ))
        .unwrap_err();
        assert_eq!(messages(&errors, "username"), vec![INVALID_USERNAME]);
        assert_eq!(messages(&errors, "password"), vec![NOT_BLANK]);

        let errors = validate_registration(&object(
            json!({"username": "u".repeat(151), "password": "x"}),
        ))
        .unwrap_err();
        assert_eq!(
            messages(&errors, "username"),
            vec!["Ensure this field has no more than 150 characters."]
        );
    }

    #[test]
    fn test_login_requires_both_fields() {
        let errors = validate_login(&object(json!({}))).unwrap_err();
        assert_eq!(messages(&errors, "username"), vec![REQUIRED]);
        assert_eq!(messages(&errors, "password"), vec![REQUIRED]);
    }

    #[test]
    fn test_type_names() {
        assert_eq!(type_name(&json!([1])), "list");
        assert_eq!(type_name(&json!(1.5)), "float");
        assert_eq!(type_name(&json!(1)), "int");
        assert_eq!(type_name(&json!(null)), "NoneType");
    }
}
