// src/infrastructure/graphql.rs
//! Typed client for the managed GraphQL data API.

use crate::application::DataApi;
use crate::domain::{
    CreateNoteInput, DeleteNoteInput, DomainError, Note, NoteId, UpdateNoteInput,
};
use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, instrument};

const NOTE_FIELDS: &str = "id name description image";

/// How requests authenticate against the data API
#[derive(Clone)]
pub enum Credentials {
    /// Static API key sent as `x-api-key`
    ApiKey(String),
    /// User-pool token sent as `Authorization`
    Token(String),
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::ApiKey(_) => f.write_str("ApiKey(<redacted>)"),
            Credentials::Token(_) => f.write_str("Token(<redacted>)"),
        }
    }
}

#[derive(Debug)]
pub struct GraphqlDataApi {
    endpoint: String,
    client: Client,
    credentials: Credentials,
}

// ── Wire types ──────────────────────────────────────

#[derive(Debug, Serialize)]
struct GraphqlRequest<'a> {
    query: &'a str,
    variables: Value,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphqlResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
    #[serde(default, rename = "errorType")]
    error_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NoteConnection {
    #[serde(default)]
    items: Vec<Option<Note>>,
}

#[derive(Debug, Deserialize)]
struct DeletedNote {
    #[allow(dead_code)]
    id: NoteId,
}

// ── Client impl ─────────────────────────────────────

impl GraphqlDataApi {
    pub fn new(endpoint: &str, credentials: Credentials, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            endpoint: endpoint.to_string(),
            client,
            credentials,
        })
    }

    /// Run one query or mutation and extract `data.<operation>`
    fn execute<T: DeserializeOwned>(
        &self,
        operation: &str,
        query: &str,
        variables: Value,
    ) -> Result<T, DomainError> {
        let request = self
            .client
            .post(&self.endpoint)
            .json(&GraphqlRequest { query, variables });
        let request = match &self.credentials {
            Credentials::ApiKey(key) => request.header("x-api-key", key),
            Credentials::Token(token) => request.header(AUTHORIZATION, token),
        };

        let response = request
            .send()
            .map_err(|e| DomainError::Network(format!("{} failed: {}", operation, e)))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(DomainError::Unauthenticated);
        }
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(DomainError::Api(format!(
                "{} HTTP {}: {}",
                operation, status, body
            )));
        }

        let envelope: GraphqlResponse = response
            .json()
            .map_err(|e| DomainError::Api(format!("Parse {} response: {}", operation, e)))?;
        debug!(operation, errors = envelope.errors.len(), "GraphQL response");

        parse_envelope(operation, envelope)
    }
}

/// Map a response envelope to the operation's payload or a domain error
pub(crate) fn parse_envelope<T: DeserializeOwned>(
    operation: &str,
    envelope: GraphqlResponse,
) -> Result<T, DomainError> {
    if !envelope.errors.is_empty() {
        let not_found = envelope.errors.iter().any(|e| {
            e.error_type
                .as_deref()
                .is_some_and(|t| t.contains("ConditionalCheckFailed"))
        });
        let message = envelope
            .errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        return Err(if not_found {
            DomainError::NotFound(message)
        } else {
            DomainError::Api(message)
        });
    }

    let payload = envelope
        .data
        .and_then(|mut data| data.get_mut(operation).map(Value::take))
        .filter(|payload| !payload.is_null())
        .ok_or_else(|| DomainError::Api(format!("Response has no data.{}", operation)))?;

    serde_json::from_value(payload)
        .map_err(|e| DomainError::Api(format!("Parse {} payload: {}", operation, e)))
}

impl DataApi for GraphqlDataApi {
    #[instrument(level = "debug", skip(self))]
    fn list_notes(&self) -> Result<Vec<Note>, DomainError> {
        let query = format!("query ListNotes {{ listNotes {{ items {{ {} }} }} }}", NOTE_FIELDS);
        let connection: NoteConnection = self.execute("listNotes", &query, json!({}))?;
        Ok(connection.items.into_iter().flatten().collect())
    }

    #[instrument(level = "debug", skip(self))]
    fn create_note(&self, input: &CreateNoteInput) -> Result<Note, DomainError> {
        let query = format!(
            "mutation CreateNote($input: CreateNoteInput!) {{ createNote(input: $input) {{ {} }} }}",
            NOTE_FIELDS
        );
        self.execute("createNote", &query, json!({ "input": input }))
    }

    #[instrument(level = "debug", skip(self))]
    fn update_note(&self, input: &UpdateNoteInput) -> Result<Note, DomainError> {
        let query = format!(
            "mutation UpdateNote($input: UpdateNoteInput!) {{ updateNote(input: $input) {{ {} }} }}",
            NOTE_FIELDS
        );
        self.execute("updateNote", &query, json!({ "input": input }))
    }

    #[instrument(level = "debug", skip(self))]
    fn delete_note(&self, id: &NoteId) -> Result<(), DomainError> {
        let query = "mutation DeleteNote($input: DeleteNoteInput!) { deleteNote(input: $input) { id } }";
        let input = DeleteNoteInput { id: id.clone() };
        let _: DeletedNote = self.execute("deleteNote", query, json!({ "input": input }))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(body: &str) -> GraphqlResponse {
        serde_json::from_str(body).expect("Fixture should be valid JSON")
    }

    #[test]
    fn given_list_response_when_parsing_then_returns_items_without_nulls() {
        let body = r#"{"data": {"listNotes": {"items": [
            {"id": "1", "name": "Cat", "description": "A cat", "image": "Cat"},
            null,
            {"id": "2", "name": "Dog", "description": "A dog", "image": null}
        ], "nextToken": null}}}"#;

        let connection: NoteConnection = parse_envelope("listNotes", envelope(body)).unwrap();
        let notes: Vec<Note> = connection.items.into_iter().flatten().collect();

        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].image.as_deref(), Some("Cat"));
        assert_eq!(notes[1].image, None);
    }

    #[test]
    fn given_create_response_when_parsing_then_returns_note_with_assigned_id() {
        let body = r#"{"data": {"createNote":
            {"id": "a1b2", "name": "A", "description": "B", "image": null}}}"#;

        let note: Note = parse_envelope("createNote", envelope(body)).unwrap();

        assert_eq!(note.id, NoteId::new("a1b2"));
    }

    #[test]
    fn given_conditional_check_error_when_parsing_then_returns_not_found() {
        let body = r#"{"data": {"deleteNote": null}, "errors": [{
            "path": ["deleteNote"],
            "errorType": "DynamoDB:ConditionalCheckFailedException",
            "message": "The conditional request failed"
        }]}"#;

        let result: Result<DeletedNote, _> = parse_envelope("deleteNote", envelope(body));

        assert!(matches!(result, Err(DomainError::NotFound(m)) if m.contains("conditional")));
    }

    #[test]
    fn given_other_errors_when_parsing_then_joins_messages_into_api_error() {
        let body = r#"{"errors": [
            {"message": "Validation error of type FieldUndefined"},
            {"message": "second problem", "errorType": "Unknown"}
        ]}"#;

        let result: Result<Note, _> = parse_envelope("createNote", envelope(body));

        match result {
            Err(DomainError::Api(message)) => {
                assert!(message.contains("FieldUndefined"));
                assert!(message.contains("; second problem"));
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn given_missing_operation_when_parsing_then_returns_api_error() {
        let body = r#"{"data": {"somethingElse": {}}}"#;

        let result: Result<Note, _> = parse_envelope("createNote", envelope(body));

        assert!(matches!(result, Err(DomainError::Api(m)) if m.contains("data.createNote")));
    }

    #[test]
    fn given_credentials_when_debug_formatting_then_redacts_secret() {
        let debug = format!("{:?}", Credentials::ApiKey("da2-secret".to_string()));

        assert!(!debug.contains("da2-secret"));
    }
}
