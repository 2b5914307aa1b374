use company_admin::adapters::{HttpService, InMemoryService, MockDataset};
use company_admin::domain::ports::ResourceService;
use company_admin::{
    ActionOutcome, AdminError, Company, CompanyPatch, DeleteTarget, Employee, NewCompany,
    Services, Store, SyncPolicy,
};
use httpmock::prelude::*;
use httpmock::Method::PATCH;
use reqwest::Client;
use serde_json::json;
use std::sync::Arc;

fn companies_service(server: &MockServer) -> HttpService<Company> {
    HttpService::new(Client::new(), &server.url("/api"), "companies")
}

#[tokio::test]
async fn test_get_reads_the_envelope() {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/companies");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!({
                    "result": {
                        "status": "200",
                        "data": [
                            {"id": 1, "name": "Acme", "address": "Main st. 1"},
                            {"id": 2, "name": "Globex", "address": "Elm st. 2"}
                        ]
                    }
                }));
        })
        .await;

    let envelope = companies_service(&server).get().await.unwrap();

    api_mock.assert_async().await;
    assert!(envelope.is_ok());
    let companies = envelope.result.data.unwrap();
    assert_eq!(companies.len(), 2);
    assert_eq!(companies[1].name, "Globex");
}

#[tokio::test]
async fn test_post_sends_draft_without_id() {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/companies")
                .json_body(json!({"name": "Acme", "address": "Main st. 1"}));
            then.status(200).json_body(json!({
                "result": {
                    "status": "200",
                    "data": {"id": 17, "name": "Acme", "address": "Main st. 1"}
                }
            }));
        })
        .await;

    let envelope = companies_service(&server)
        .post(&NewCompany {
            name: "Acme".to_string(),
            address: "Main st. 1".to_string(),
        })
        .await
        .unwrap();

    api_mock.assert_async().await;
    assert_eq!(envelope.result.data.unwrap().id, Some(17));
}

#[tokio::test]
async fn test_patch_targets_the_item_url() {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(PATCH)
                .path("/api/companies/2")
                .json_body(json!({"id": 2, "name": "Beta"}));
            then.status(200).json_body(json!({
                "result": {"status": "200", "data": {"id": 2, "name": "Beta"}}
            }));
        })
        .await;

    let envelope = companies_service(&server)
        .patch(&CompanyPatch::new(2).name("Beta"))
        .await
        .unwrap();

    api_mock.assert_async().await;
    assert_eq!(envelope.result.data.unwrap().name.as_deref(), Some("Beta"));
}

#[tokio::test]
async fn test_delete_single_and_batch() {
    let server = MockServer::start_async().await;
    let single = server
        .mock_async(|when, then| {
            when.method(DELETE).path("/api/companies/3");
            then.status(200)
                .json_body(json!({"result": {"status": "200", "data": {"id": 3}}}));
        })
        .await;
    let batch = server
        .mock_async(|when, then| {
            when.method(DELETE)
                .path("/api/companies")
                .query_param("ids", "1,2");
            then.status(200).json_body(json!({
                "result": {"status": "200", "data": [{"id": 1}, {"id": 2}]}
            }));
        })
        .await;

    let service = companies_service(&server);
    let one = service.delete(&DeleteTarget::One(3)).await.unwrap();
    let many = service.delete(&DeleteTarget::Many(vec![1, 2])).await.unwrap();

    single.assert_async().await;
    batch.assert_async().await;
    assert_eq!(one.result.data.unwrap().ids(), vec![3]);
    assert_eq!(many.result.data.unwrap().ids(), vec![1, 2]);
}

#[tokio::test]
async fn test_http_error_status_is_an_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/companies");
            then.status(500).body("boom");
        })
        .await;

    let err = companies_service(&server).get().await.unwrap_err();
    match err {
        AdminError::UnexpectedStatus { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[tokio::test]
async fn test_store_over_http_falls_back_in_development() {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/companies");
            then.status(503);
        })
        .await;

    let mock = MockDataset::bundled().unwrap();
    let services = Services {
        companies: Arc::new(companies_service(&server)),
        employees: Arc::new(InMemoryService::<Employee>::empty()),
    };
    let store = Store::new(services, SyncPolicy::development(), mock.clone());

    let outcome = store.companies().request_list().await;

    api_mock.assert_async().await;
    assert!(matches!(outcome, ActionOutcome::FellBack { .. }));
    let state = store.snapshot();
    assert_eq!(state.company.entities, mock.companies);
    assert_eq!(state.company.error, None);
}

#[tokio::test]
async fn test_store_over_http_records_error_in_production() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/companies");
            then.status(503);
        })
        .await;

    let services = Services {
        companies: Arc::new(companies_service(&server)),
        employees: Arc::new(InMemoryService::<Employee>::empty()),
    };
    let store = Store::new(services, SyncPolicy::production(), MockDataset::default());

    let outcome = store.companies().request_list().await;

    assert_eq!(
        outcome,
        ActionOutcome::Rejected {
            message: "The server answered with HTTP 503".to_string()
        }
    );
    let state = store.snapshot();
    assert!(state.company.entities.is_empty());
    assert_eq!(
        state.company.error.as_deref(),
        Some("The server answered with HTTP 503")
    );
}

#[tokio::test]
async fn test_server_assigned_id_is_kept_on_collision() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/companies");
            then.status(200).json_body(json!({
                "result": {
                    "status": "200",
                    "data": [
                        {"id": 1, "name": "C1", "address": ""},
                        {"id": 2, "name": "C2", "address": ""}
                    ]
                }
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/companies");
            then.status(200).json_body(json!({
                "result": {"status": "200", "data": {"id": 2, "name": "New", "address": ""}}
            }));
        })
        .await;

    let services = Services {
        companies: Arc::new(companies_service(&server)),
        employees: Arc::new(InMemoryService::<Employee>::empty()),
    };
    let store = Store::new(services, SyncPolicy::production(), MockDataset::default());
    store.companies().request_list().await;

    let outcome = store
        .companies()
        .add(NewCompany {
            name: "New".to_string(),
            address: String::new(),
        })
        .await;

    assert_eq!(outcome, ActionOutcome::Fulfilled);
    let listed: Vec<(u64, String)> = store
        .snapshot()
        .company
        .entities
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect();
    assert_eq!(
        listed,
        vec![(1, "C1".to_string()), (2, "New".to_string())]
    );
}
