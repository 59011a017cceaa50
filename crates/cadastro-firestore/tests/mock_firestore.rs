//! Mock Firestore tests.
//!
//! These tests use wiremock to simulate the Firestore REST API and check the
//! requests the collection sends and how it reads the answers, without
//! network access or a real project.

use cadastro_core::{
    Collection, CollectionName, Database, Error, FormInput, FormView, RecordId, StoreError,
    StoreUrl, SubmitOutcome, TransportError, UsuarioFields,
};
use cadastro_firestore::{ApiKey, FirestoreCollection, FirestoreConfig, FirestoreDatabase};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DOCS: &str = "/v1/projects/demo/databases/(default)/documents/usuarios";
const NAME_PREFIX: &str = "projects/demo/databases/(default)/documents/usuarios";

/// Helper to open the usuarios collection against a mock server.
fn mock_collection(server: &MockServer) -> FirestoreCollection {
    let url = StoreUrl::new(format!("http://127.0.0.1:{}", server.address().port())).unwrap();
    let config = FirestoreConfig::new("demo", ApiKey::new("test-key")).with_url(url);
    FirestoreDatabase::new(config)
        .unwrap()
        .collection(&CollectionName::default())
}

fn document(id: &str, nome: &str, idade: &str, contato: &str) -> serde_json::Value {
    json!({
        "name": format!("{}/{}", NAME_PREFIX, id),
        "fields": {
            "nome": { "stringValue": nome },
            "idade": { "integerValue": idade },
            "contato": { "stringValue": contato }
        },
        "createTime": "2024-05-01T12:00:00.000000Z",
        "updateTime": "2024-05-01T12:00:00.000000Z"
    })
}

fn fields(nome: &str, idade: &str, contato: &str) -> UsuarioFields {
    FormInput::new(nome, idade, contato).validate().unwrap()
}

// ============================================================================
// List
// ============================================================================

#[tokio::test]
async fn test_list_all_single_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(DOCS))
        .and(query_param("key", "test-key"))
        .and(query_param("pageSize", "300"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documents": [
                document("a1", "Ana", "30", "ana@example.com"),
                document("b2", "Bruno", "25", "11987654321")
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let records = mock_collection(&server).list_all().await.unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id.as_str(), "a1");
    assert_eq!(records[0].idade, Some(30));
    assert_eq!(records[1].contato, "11987654321");
}

#[tokio::test]
async fn test_list_all_empty_collection() {
    let server = MockServer::start().await;

    // An empty collection comes back as an empty object.
    Mock::given(method("GET"))
        .and(path(DOCS))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    assert!(mock_collection(&server).list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_all_follows_page_tokens() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(DOCS))
        .and(query_param("pageToken", "page-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documents": [document("b2", "Bruno", "25", "11987654321")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(DOCS))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documents": [document("a1", "Ana", "30", "ana@example.com")],
            "nextPageToken": "page-2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let records = mock_collection(&server).list_all().await.unwrap();
    let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["a1", "b2"]);
}

#[tokio::test]
async fn test_list_all_keeps_documents_outside_the_form_rules() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(DOCS))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documents": [
                document("a1", "Ana", "30", "ana@example.com"),
                document("bad", "Bob", "20", "12345"),
                { "name": format!("{}/empty", NAME_PREFIX) },
                { "name": "" }
            ]
        })))
        .mount(&server)
        .await;

    let records = mock_collection(&server).list_all().await.unwrap();
    let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["a1", "bad", "empty"]);
    assert!(records[0].is_valid());
    assert_eq!(records[1].contato, "12345");
    assert!(!records[1].is_valid());
    assert_eq!(records[2].nome, "");
    assert_eq!(records[2].idade, None);
}

#[tokio::test]
async fn test_list_all_permission_denied() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(DOCS))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": {
                "code": 403,
                "message": "Missing or insufficient permissions.",
                "status": "PERMISSION_DENIED"
            }
        })))
        .mount(&server)
        .await;

    let err = mock_collection(&server).list_all().await.unwrap_err();
    match err {
        Error::Store(StoreError::Rejected(rejected)) => {
            assert_eq!(rejected.status, 403);
            assert_eq!(rejected.code.as_deref(), Some("PERMISSION_DENIED"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

// ============================================================================
// Insert
// ============================================================================

#[tokio::test]
async fn test_insert_returns_generated_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(DOCS))
        .and(query_param("key", "test-key"))
        .and(body_json(json!({
            "fields": {
                "nome": { "stringValue": "Ana" },
                "idade": { "integerValue": "30" },
                "contato": { "stringValue": "ana@example.com" }
            }
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(document("Xk2fP0aQ9sLmN3bVc7Rt", "Ana", "30", "ana@example.com")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let created = mock_collection(&server)
        .insert(&fields("Ana", "30", "ana@example.com"))
        .await
        .unwrap();

    assert_eq!(created.id.as_str(), "Xk2fP0aQ9sLmN3bVc7Rt");
    assert_eq!(created.idade, Some(30));
}

#[tokio::test]
async fn test_insert_with_unusable_name_is_malformed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(DOCS))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "name": "" })))
        .mount(&server)
        .await;

    let err = mock_collection(&server)
        .insert(&fields("Ana", "30", "ana@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Store(StoreError::MalformedResponse { .. })
    ));
}

// ============================================================================
// Update
// ============================================================================

#[tokio::test]
async fn test_update_sends_mask_and_precondition() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path(format!("{}/a1", DOCS)))
        .and(query_param("key", "test-key"))
        .and(query_param("updateMask.fieldPaths", "idade"))
        .and(query_param("currentDocument.exists", "true"))
        .and(body_json(json!({
            "fields": {
                "nome": { "stringValue": "Ana" },
                "idade": { "integerValue": "31" },
                "contato": { "stringValue": "ana@example.com" }
            }
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(document("a1", "Ana", "31", "ana@example.com")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let id = RecordId::new("a1").unwrap();
    mock_collection(&server)
        .update(&id, &fields("Ana", "31", "ana@example.com"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_update_missing_document() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path(format!("{}/gone", DOCS)))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {
                "code": 404,
                "message": "No document to update",
                "status": "NOT_FOUND"
            }
        })))
        .mount(&server)
        .await;

    let id = RecordId::new("gone").unwrap();
    let err = mock_collection(&server)
        .update(&id, &fields("Ana", "31", "ana@example.com"))
        .await
        .unwrap_err();

    let message = err.to_string();
    assert!(message.contains("404"));
    assert!(message.contains("NOT_FOUND"));
}

// ============================================================================
// Remove
// ============================================================================

#[tokio::test]
async fn test_hand_named_ids_are_encoded_in_the_path() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(format!("{}/ana%20maria%3F", DOCS)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    mock_collection(&server)
        .remove(&RecordId::new("ana maria?").unwrap())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_remove_document() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(format!("{}/a1", DOCS)))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    mock_collection(&server)
        .remove(&RecordId::new("a1").unwrap())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_error_without_json_body() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let err = mock_collection(&server)
        .remove(&RecordId::new("a1").unwrap())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "store error: rejected: HTTP 500");
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    // Reserve a free port, then release it so nothing is listening there.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let url = StoreUrl::new(format!("http://127.0.0.1:{}", port)).unwrap();
    let config = FirestoreConfig::new("demo", ApiKey::new("test-key")).with_url(url);
    let collection = FirestoreDatabase::new(config)
        .unwrap()
        .collection(&CollectionName::default());

    let err = collection.list_all().await.unwrap_err();
    assert!(matches!(
        err,
        Error::Store(StoreError::Transport(TransportError::Connection { .. }))
    ));
}

// ============================================================================
// Form view
// ============================================================================

#[tokio::test]
async fn test_form_view_blocks_invalid_contact_before_any_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(DOCS))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut view = FormView::new(mock_collection(&server));
    view.load().await.unwrap();
    view.set_input(FormInput::new("Bob", "20", "12345"));

    assert!(view.submit().await.is_err());
    assert!(view.records().is_empty());
}

#[tokio::test]
async fn test_form_view_create_then_delete() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(DOCS))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(DOCS))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(document("n3w", "Ana", "30", "ana@example.com")),
        )
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path(format!("{}/n3w", DOCS)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let mut view = FormView::new(mock_collection(&server));
    view.load().await.unwrap();

    view.set_input(FormInput::new("Ana", "30", "ana@example.com"));
    let SubmitOutcome::Created(created) = view.submit().await.unwrap() else {
        panic!("expected a created record");
    };
    assert_eq!(created.id.as_str(), "n3w");
    assert_eq!(view.records().len(), 1);

    view.request_delete(&created.id).unwrap();
    view.cancel_delete();
    assert_eq!(view.records().len(), 1);

    view.request_delete(&created.id).unwrap();
    view.confirm_delete().await.unwrap();
    assert!(view.records().is_empty());
}

#[tokio::test]
async fn test_form_view_fixes_and_deletes_stored_records_outside_the_rules() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(DOCS))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documents": [
                document("a1", "Ana", "30", "ana@example.com"),
                document("b2", "Bob", "20", "12345"),
                {
                    "name": format!("{}/c3", NAME_PREFIX),
                    "fields": {
                        "nome": { "stringValue": "Caio" },
                        "idade": { "doubleValue": "NaN" },
                        "contato": { "stringValue": "caio@example.com" }
                    }
                }
            ]
        })))
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path(format!("{}/b2", DOCS)))
        .and(body_json(json!({
            "fields": {
                "nome": { "stringValue": "Bob" },
                "idade": { "integerValue": "20" },
                "contato": { "stringValue": "11987654321" }
            }
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(document("b2", "Bob", "20", "11987654321")),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path(format!("{}/c3", DOCS)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let mut view = FormView::new(mock_collection(&server));
    assert_eq!(view.load().await.unwrap(), 3);

    let b2 = RecordId::new("b2").unwrap();
    view.select_for_edit(&b2).unwrap();
    assert_eq!(view.state().input.contato, "12345");
    assert!(view.submit().await.is_err());

    view.set_contato("11987654321");
    let SubmitOutcome::Updated(saved) = view.submit().await.unwrap() else {
        panic!("expected an updated record");
    };
    assert!(saved.is_valid());

    let c3 = RecordId::new("c3").unwrap();
    view.select_for_edit(&c3).unwrap();
    assert_eq!(view.state().input.idade, "");
    view.cancel_edit();

    view.request_delete(&c3).unwrap();
    view.confirm_delete().await.unwrap();

    let ids: Vec<_> = view.records().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["a1", "b2"]);
}
