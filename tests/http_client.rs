use httpmock::prelude::*;
use serde_json::{json, Value};
use tabular_client::tabular::{
    ApiClient, Condition, Envelope, FetchTableDataRequest, Filter, HttpTransport, RequestLogger,
    TableRow, WireProtocol, UNEXPECTED_ERROR_MESSAGE,
};
use tabular_client::Credentials;

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(Credentials::new("admin", "s3cret", server.url("/api")))
}

#[tokio::test]
async fn ping_over_http() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api")
                .header("authorization", "admin:s3cret")
                .header("content-type", "application/json")
                .json_body(json!({ "command": "Ping" }));
            then.status(200).json_body(json!({ "status": "ok" }));
        })
        .await;

    let env = client_for(&server).ping().await;

    mock.assert_async().await;
    assert!(env.is_ok());
    assert_eq!(env.status_code(), 200);
    assert_eq!(env.data().unwrap().status, "ok");
}

#[tokio::test]
async fn list_tables_over_http() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api")
                .json_body(json!({ "command": "ListTables" }));
            then.status(200)
                .json_body(json!({ "tables": ["users", "orders"] }));
        })
        .await;

    let env = client_for(&server).fetch_tables().await;
    assert_eq!(env.data().unwrap().tables, vec!["users", "orders"]);
}

#[tokio::test]
async fn get_table_with_info_and_defaults() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/api").json_body(json!({
                "command": "GetTable",
                "params": {
                    "tableName": "users",
                    "includeInfo": true,
                    "condition": {
                        "cases": [{ "column": "name", "operator": "like", "value": "a%" }],
                        "logicalOperator": "and"
                    },
                    "limit": 100,
                    "offset": 0
                }
            }));
            then.status(200).json_body(json!({
                "rows": [{ "id": 1, "name": "ann" }],
                "tableInfo": {
                    "columns": [
                        { "cid": 0, "name": "id", "type": "INTEGER", "notnull": 1, "dflt_value": null, "pk": 1 },
                        { "cid": 1, "name": "name", "type": "TEXT", "notnull": 0, "dflt_value": null, "pk": 0 }
                    ],
                    "count": 1
                }
            }));
        })
        .await;

    let request = FetchTableDataRequest::new("users")
        .include_info(true)
        .condition(Condition::all([Filter::like("name", "a%")]));
    let env = client_for(&server).fetch_table_data(request).await;

    mock.assert_async().await;
    let data = env.data().expect("success payload");
    assert_eq!(data.rows[0]["name"], "ann");
    let info = data.table_info.as_ref().expect("table info requested");
    assert_eq!(info.count, 1);
    assert!(info.columns[0].is_primary_key());
}

#[tokio::test]
async fn delete_and_update_over_http() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api").json_body(json!({
                "command": "DeleteRows",
                "params": { "tableName": "users", "ids": ["3", "4"] }
            }));
            then.status(200).json_body(json!({ "rowsAffected": 2 }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api").json_body(json!({
                "command": "UpdateRow",
                "params": { "tableName": "users", "row": { "id": 3, "name": "cy" } }
            }));
            then.status(200).json_body(json!({ "status": "ok" }));
        })
        .await;

    let client = client_for(&server);
    let deleted = client.delete_rows("users", vec!["3", "4"]).await;
    assert_eq!(deleted.data().unwrap().rows_affected, 2);

    let row: TableRow = serde_json::from_value(json!({ "id": 3, "name": "cy" })).unwrap();
    let updated = client.update_row("users", row).await;
    assert_eq!(updated.data().unwrap().status, "ok");
}

#[tokio::test]
async fn not_found_carries_server_message() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api");
            then.status(404).json_body(json!({ "message": "not found" }));
        })
        .await;

    let env = client_for(&server).fetch_tables().await;
    assert_eq!(env, Envelope::error("not found", 404));
    assert_eq!(
        serde_json::to_value(&env).unwrap(),
        json!({ "ok": false, "message": "not found", "statusCode": 404 })
    );
}

#[tokio::test]
async fn legacy_protocol_over_http() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api")
                .json_body(json!({ "query": "Ping" }));
            then.status(401).json_body(json!({ "error": "bad credentials" }));
        })
        .await;

    let client = client_for(&server).with_protocol(WireProtocol::Query);
    assert_eq!(client.ping().await, Envelope::error("bad credentials", 401));
}

#[tokio::test]
async fn unreachable_endpoint_is_normalized() {
    // Port 1 is reserved and nothing listens there
    let client = ApiClient::with_transport(
        Credentials::new("admin", "s3cret", "http://127.0.0.1:1/api"),
        HttpTransport::new(),
    );

    let env = client.ping().await;
    assert_eq!(env, Envelope::error(UNEXPECTED_ERROR_MESSAGE, 500));
}

#[tokio::test]
async fn interceptors_apply_over_http() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api");
            then.status(200).json_body(json!({ "tables": ["b", "a"] }));
        })
        .await;

    let mut client = client_for(&server);
    client
        .add_interceptor(RequestLogger::default())
        .add_interceptor(|env: Envelope<Value>| {
            env.map(|mut data| {
                if let Some(tables) = data["tables"].as_array_mut() {
                    tables.sort_by(|a, b| a.as_str().cmp(&b.as_str()));
                }
                data
            })
        });

    let env = client.fetch_tables().await;
    assert_eq!(env.data().unwrap().tables, vec!["a", "b"]);
}
