use axum::body::Bytes;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Request, StatusCode};
use axum::response::IntoResponse;
use pagekit::{
    json_decode, json_encode, json_encode_with_status, JsonError, ResponseError, ResponseStatus,
    ResponseWriter,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, PartialEq)]
struct Todo {
    title: String,
    done: bool,
}

/// A handler in the shape an application would write on top of the helpers.
fn create_todo(req: &Request<Bytes>) -> ResponseWriter {
    let mut w = ResponseWriter::new();
    match json_decode::<Todo, _>(req) {
        Ok(todo) if todo.title.is_empty() => {
            json_encode_with_status(&mut w, "title is required", ResponseStatus::Error).unwrap();
        }
        Ok(todo) => {
            w.write_header(StatusCode::CREATED);
            json_encode(&mut w, todo).unwrap();
        }
        Err(err @ ResponseError::ContentType { .. }) => {
            JsonError::new("expected json", StatusCode::UNSUPPORTED_MEDIA_TYPE)
                .with_source(err)
                .write(&mut w)
                .unwrap();
        }
        Err(err) => {
            JsonError::new(err.to_string(), StatusCode::BAD_REQUEST)
                .write(&mut w)
                .unwrap();
        }
    }
    w
}

fn post(content_type: &str, body: &'static str) -> Request<Bytes> {
    Request::builder()
        .method("POST")
        .header(CONTENT_TYPE, content_type)
        .body(Bytes::from_static(body.as_bytes()))
        .unwrap()
}

#[test]
fn test_created_envelope() {
    let w = create_todo(&post("application/json", r#"{"title":"write docs","done":false}"#));
    assert_eq!(w.status(), StatusCode::CREATED);
    assert_eq!(
        w.body_str(),
        Some(r#"{"status":"ok","data":{"title":"write docs","done":false}}"#)
    );
}

#[test]
fn test_error_envelope_keeps_ok_status_line() {
    let w = create_todo(&post("application/json", r#"{"title":"","done":true}"#));
    assert_eq!(w.status(), StatusCode::OK);
    assert_eq!(
        w.body_str(),
        Some(r#"{"status":"error","data":"title is required"}"#)
    );
}

#[test]
fn test_wrong_content_type() {
    let w = create_todo(&post("text/plain", r#"{"title":"x","done":false}"#));
    assert_eq!(w.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(
        w.body_str(),
        Some(r#"{"message":"expected json","status_code":415}"#)
    );
}

#[test]
fn test_malformed_body() {
    let response = create_todo(&post("application/json", "{not json")).into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
}
