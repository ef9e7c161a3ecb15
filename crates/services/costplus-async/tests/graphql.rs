use std::time::Duration;

use costplus_async::types::{
    GetAllProductsVariables, GetCollectionPathsVariables, OrderDirection, ProductOrderField,
    SearchMedicinesVariables,
};
use costplus_async::{Client, CostPlusConfig, HealthStatus, RetryPolicy};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn test_client(server: &MockServer) -> Client {
    let config = CostPlusConfig::new().with_api_base(server.uri());
    Client::with_config(config).with_policy(RetryPolicy {
        max_attempts: 1,
        base_delay: Duration::from_millis(10),
    })
}

#[tokio::test]
async fn search_medicines_parses_typed_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {
                "products": {
                    "edges": [
                        {
                            "node": {
                                "id": "UHJvZHVjdDoxMjM=",
                                "name": "Metformin 500mg",
                                "slug": "metformin-500mg",
                                "collections": [
                                    {"name": "Diabetes", "slug": "diabetes"}
                                ],
                                "retailPrice": 14.35,
                                "variants": [
                                    {
                                        "id": "VmFyaWFudDox",
                                        "sku": "MET-500-30",
                                        "metafields": {"form": "tablet"},
                                        "images": [{"url": "https://cdn.example.com/met.png"}],
                                        "specialtyMedication": false
                                    }
                                ],
                                "isAvailable": true,
                                "metafields": {
                                    "brandGeneric": "generic",
                                    "brandName": "Glucophage"
                                }
                            }
                        }
                    ]
                }
            },
            "extensions": {
                "cost": {"requestedQueryCost": 12.0, "maximumAvailable": 50000.0}
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let resp = client
        .medications()
        .search(SearchMedicinesVariables {
            medication_search: Some("metformin".into()),
        })
        .await
        .unwrap();

    let node = &resp.data.products.edges[0].node;
    assert_eq!(node.name, "Metformin 500mg");
    assert_eq!(node.metafields.brand_name.as_deref(), Some("Glucophage"));
    assert_eq!(node.collections[0].name, "Diabetes");
    assert_eq!(node.variants[0].sku.as_deref(), Some("MET-500-30"));
    assert_eq!(node.retail_price, Some(14.35));
    assert!(resp.extensions.is_some());
}

#[tokio::test]
async fn search_request_carries_query_and_camel_case_variables() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql/"))
        .and(body_partial_json(serde_json::json!({
            "variables": {"medicationSearch": "lisinopril"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {"products": {"edges": []}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    client
        .medications()
        .search(SearchMedicinesVariables {
            medication_search: Some("lisinopril".into()),
        })
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = requests[0].body_json().unwrap();
    let query = body["query"].as_str().unwrap();
    assert!(query.contains("query SearchMedicines"));
    assert!(query.contains("medicationSearch: $medicationSearch"));
}

#[tokio::test]
async fn collection_paths_parse() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {
                "collections": {
                    "edges": [
                        {"node": {"id": "Q29sbGVjdGlvbjozMQ==", "name": "Diabetes", "slug": "diabetes"}},
                        {"node": {"id": "Q29sbGVjdGlvbjo3", "name": "Heart Health", "slug": "heart-health"}}
                    ]
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let resp = client
        .collections()
        .paths(GetCollectionPathsVariables {
            search: Some("hea".into()),
        })
        .await
        .unwrap();

    assert_eq!(resp.data.collections.edges.len(), 2);
    assert_eq!(resp.data.collections.edges[0].node.id, "Q29sbGVjdGlvbjozMQ==");
    assert_eq!(resp.data.collections.edges[1].node.name, "Heart Health");
}

#[tokio::test]
async fn products_page_parses_count_and_cursors() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {
                "products": {
                    "edges": [
                        {"node": {"id": "UHJvZHVjdDox", "name": "Atorvastatin"}}
                    ],
                    "totalCount": 812,
                    "pageInfo": {
                        "startCursor": "YXJyYXljb25uZWN0aW9uOjA=",
                        "endCursor": "YXJyYXljb25uZWN0aW9uOjI0",
                        "hasNextPage": true,
                        "hasPreviousPage": false
                    }
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let resp = client
        .products()
        .list(GetAllProductsVariables {
            before: None,
            after: None,
            first: Some(25),
            last: None,
            direction: OrderDirection::Asc,
            product_order_field: ProductOrderField::Name,
            collection: Some(vec!["Q29sbGVjdGlvbjozMQ==".into()]),
        })
        .await
        .unwrap();

    assert_eq!(resp.data.products.total_count, Some(812));
    let page_info = resp.data.products.page_info.unwrap();
    assert!(page_info.has_next_page);
    assert!(!page_info.has_previous_page);

    // Enum variables serialize in the upstream's SCREAMING_SNAKE_CASE.
    let requests = server.received_requests().await.unwrap();
    let request: &Request = &requests[0];
    let body: serde_json::Value = request.body_json().unwrap();
    assert_eq!(body["variables"]["direction"], "ASC");
    assert_eq!(body["variables"]["productOrderField"], "NAME");
    assert_eq!(body["variables"]["first"], 25);
}

#[tokio::test]
async fn health_check_reports_healthy_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {"__typename": "Query"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let verdict = client.health_check().await;

    assert_eq!(verdict.status, HealthStatus::Healthy);
    assert_eq!(verdict.endpoints.get("graphql_endpoint"), Some(&true));
}

#[tokio::test]
async fn health_check_reports_unhealthy_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("down"))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let verdict = client.health_check().await;

    assert_eq!(verdict.status, HealthStatus::Unhealthy);
    assert_eq!(verdict.endpoints.get("graphql_endpoint"), Some(&false));
}
