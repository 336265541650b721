//! Request extractors that reject with [`ApiError`]
//!
//! Axum's stock `Json`, `Query` and `Path` extractors answer bad input with
//! plain-text 400/415 responses. These wrappers turn every parse failure into
//! a 422 with the API's error body, and run `validator` rules on the parsed
//! value, all before a handler touches the database.

use crate::error::ApiError;
use axum::{
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
    Json,
};
use cookbook_shared::types::FieldError;
use serde::de::DeserializeOwned;
use std::error::Error as _;
use validator::Validate;

/// JSON body, deserialized then validated
#[derive(Debug, Clone)]
pub struct ValidJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(json_rejection)?;

        value.validate()?;

        Ok(ValidJson(value))
    }
}

/// Attach the offending field to data errors; other rejections keep axum's text
fn json_rejection(rejection: JsonRejection) -> ApiError {
    let field = match &rejection {
        JsonRejection::JsonDataError(err) => err
            .source()
            .and_then(|source| field_error(&source.to_string())),
        _ => None,
    };

    match field {
        Some(field) => ApiError::InvalidField(field),
        None => ApiError::Validation(rejection.body_text()),
    }
}

/// Parse a serde data error such as ``missing field `title` at line 1 column 2``
/// or `servings: invalid type: string "two", expected i32 at line 1 column 9`
fn field_error(text: &str) -> Option<FieldError> {
    let text = match text.rfind(" at line ") {
        Some(pos) => &text[..pos],
        None => text,
    };

    if let Some(rest) = text.strip_prefix("missing field `") {
        let field = rest.split('`').next().filter(|f| !f.is_empty())?;
        return Some(FieldError {
            field: field.to_string(),
            code: "required".to_string(),
            message: "field is required".to_string(),
        });
    }

    let (path, message) = text.split_once(": ")?;
    if path.is_empty() || path.contains(char::is_whitespace) {
        return None;
    }

    Some(FieldError {
        field: path.to_string(),
        code: "type".to_string(),
        message: message.to_string(),
    })
}

/// Query string, deserialized then validated
#[derive(Debug, Clone)]
pub struct ValidQuery<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequestParts<S> for ValidQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::Validation(rejection.body_text()))?;

        value.validate()?;

        Ok(ValidQuery(value))
    }
}

/// Integer recipe id from the `:id` path segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecipeId(pub i32);

#[axum::async_trait]
impl<S> FromRequestParts<S> for RecipeId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i32>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::Validation(rejection.body_text()))?;

        Ok(RecipeId(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use cookbook_shared::types::{CreateRecipeRequest, ListRecipesQuery};

    fn json_request(body: &str) -> Request {
        Request::builder()
            .method("POST")
            .uri("/")
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_json_accepts_valid_body() {
        let req = json_request(r#"{"title":"Soup","instructions":"Boil water"}"#);
        let ValidJson(recipe) = ValidJson::<CreateRecipeRequest>::from_request(req, &())
            .await
            .unwrap();
        assert_eq!(recipe.title, "Soup");
    }

    #[tokio::test]
    async fn test_valid_json_rejects_malformed_json() {
        let req = json_request(r#"{"title": "Soup""#);
        let err = ValidJson::<CreateRecipeRequest>::from_request(req, &())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn test_valid_json_missing_field_is_named() {
        let req = json_request(r#"{"instructions":"Boil water"}"#);
        let err = ValidJson::<CreateRecipeRequest>::from_request(req, &())
            .await
            .unwrap_err();

        match err {
            ApiError::InvalidField(field) => {
                assert_eq!(field.field, "title");
                assert_eq!(field.code, "required");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_valid_json_wrong_type_is_named() {
        let req = json_request(r#"{"title":"Soup","instructions":"Boil","ingredients":"salt"}"#);
        let err = ValidJson::<CreateRecipeRequest>::from_request(req, &())
            .await
            .unwrap_err();

        match err {
            ApiError::InvalidField(field) => {
                assert_eq!(field.field, "ingredients");
                assert_eq!(field.code, "type");
                assert!(field.message.contains("expected a sequence"));
                assert!(!field.message.contains("at line"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_field_error_parsing() {
        let field = field_error("ingredients[1]: invalid type: integer `3`, expected a string at line 1 column 40")
            .unwrap();
        assert_eq!(field.field, "ingredients[1]");

        let field = field_error("missing field `instructions` at line 1 column 17").unwrap();
        assert_eq!(field.field, "instructions");

        assert!(field_error("invalid type: map, expected a sequence").is_none());
    }

    #[tokio::test]
    async fn test_valid_json_runs_field_rules() {
        let req = json_request(r#"{"title":"Soup","instructions":"Boil","servings":0}"#);
        let err = ValidJson::<CreateRecipeRequest>::from_request(req, &())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidFields(_)));
    }

    #[tokio::test]
    async fn test_valid_query_rejects_non_numeric() {
        let req = Request::builder()
            .uri("/?skip=abc")
            .body(Body::empty())
            .unwrap();
        let (mut parts, _) = req.into_parts();
        let err = ValidQuery::<ListRecipesQuery>::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn test_valid_query_defaults() {
        let req = Request::builder().uri("/").body(Body::empty()).unwrap();
        let (mut parts, _) = req.into_parts();
        let ValidQuery(query) = ValidQuery::<ListRecipesQuery>::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(query, ListRecipesQuery::default());
    }
}
