/**
 * GraphQL HTTP Handlers
 *
 * `GET|POST /graphql` executes a document with the request's
 * `RequestContext` attached as per-request data. `GET /playground` serves
 * an interactive client pointed at `/graphql`.
 *
 * # Error Format
 *
 * Errors raised by resolvers carry their `ApiError` as the original cause
 * and are reshaped to:
 *
 * ```json
 * { "message": "Invalid input.", "status": 422, "data": [{ "message": "Title is invalid." }] }
 * ```
 *
 * Errors without an application cause (syntax errors, unknown fields,
 * bad variables) are passed through in the standard GraphQL shape.
 */

use async_graphql::http::{playground_source, GraphQLPlaygroundConfig};
use async_graphql::ServerError;
use async_graphql_axum::{rejection::GraphQLRejection, GraphQLRequest};
use axum::{
    extract::State,
    response::{Html, IntoResponse},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::backend::error::ApiError;
use crate::backend::graphql::AppSchema;
use crate::backend::middleware::RequestContext;

pub const GRAPHQL_PATH: &str = "/graphql";

const DEFAULT_ERROR_MESSAGE: &str = "An error occurred";

/// Error reshaped from an application cause
#[derive(Debug, Serialize)]
struct FormattedError {
    message: String,
    status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

/// Shape one execution error for the client
pub fn format_error(error: &ServerError) -> Value {
    let Some(cause) = error.source::<ApiError>() else {
        return serde_json::to_value(error).unwrap_or_else(|_| {
            serde_json::json!({ "message": error.message })
        });
    };

    let message = cause.message();
    let formatted = FormattedError {
        message: if message.is_empty() {
            DEFAULT_ERROR_MESSAGE.to_string()
        } else {
            message
        },
        status: cause.status_code().as_u16(),
        data: cause.data(),
    };
    serde_json::to_value(formatted).unwrap_or_else(|_| serde_json::json!({ "message": DEFAULT_ERROR_MESSAGE }))
}

/// Serialize a GraphQL response with reshaped errors
pub fn response_body(response: async_graphql::Response) -> Value {
    let mut body = serde_json::Map::new();
    body.insert(
        "data".to_string(),
        serde_json::to_value(&response.data).unwrap_or(Value::Null),
    );
    if !response.errors.is_empty() {
        body.insert(
            "errors".to_string(),
            Value::Array(response.errors.iter().map(format_error).collect()),
        );
    }
    Value::Object(body)
}

/// Execute a GraphQL request bound to this request's context
///
/// Unparseable requests become a 400 envelope instead of the library's
/// plain-text rejection.
pub async fn graphql_handler(
    State(schema): State<AppSchema>,
    context: RequestContext,
    request: Result<GraphQLRequest, GraphQLRejection>,
) -> Result<Json<Value>, ApiError> {
    let request = request
        .map_err(|GraphQLRejection(e)| ApiError::bad_request(format!("Invalid GraphQL request: {e}")))?
        .into_inner()
        .data(context);
    let response = schema.execute(request).await;

    for error in &response.errors {
        match error.source::<ApiError>() {
            Some(cause) if cause.status_code().is_server_error() => {
                tracing::error!(error = %cause, "GraphQL resolver failed")
            }
            Some(cause) => tracing::debug!(error = %cause, "GraphQL resolver rejected request"),
            None => tracing::debug!(message = %error.message, "GraphQL request error"),
        }
    }

    Ok(Json(response_body(response)))
}

/// Interactive GraphQL Playground
pub async fn graphql_playground() -> impl IntoResponse {
    Html(playground_source(GraphQLPlaygroundConfig::new(GRAPHQL_PATH)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::error::ValidationIssue;
    use async_graphql::Pos;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_without_cause_passes_through() {
        let error = ServerError::new("Unknown field \"nope\"", Some(Pos { line: 1, column: 3 }));
        let value = format_error(&error);
        assert_eq!(value["message"], "Unknown field \"nope\"");
        assert_eq!(value["locations"][0]["line"], 1);
        assert!(value.get("status").is_none());
    }

    #[test]
    fn test_error_with_cause_is_reshaped() {
        let cause = ApiError::validation("Invalid input.", vec![ValidationIssue::new("Title is invalid.")]);
        let error = async_graphql::Error::from(cause).into_server_error(Pos { line: 1, column: 1 });

        assert_eq!(
            format_error(&error),
            serde_json::json!({
                "message": "Invalid input.",
                "status": 422,
                "data": [{ "message": "Title is invalid." }]
            })
        );
    }

    #[test]
    fn test_unauthenticated_cause_has_no_data() {
        let error = async_graphql::Error::from(ApiError::unauthenticated())
            .into_server_error(Pos { line: 1, column: 1 });
        assert_eq!(
            format_error(&error),
            serde_json::json!({ "message": "Not authenticated!", "status": 401 })
        );
    }

    #[test]
    fn test_internal_cause_hides_details() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        let error = async_graphql::Error::from(ApiError::from(io))
            .into_server_error(Pos { line: 1, column: 1 });
        assert_eq!(
            format_error(&error),
            serde_json::json!({ "message": "An error occurred", "status": 500 })
        );
    }
}
