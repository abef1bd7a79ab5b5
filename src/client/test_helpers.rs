//! Shared helpers for client tests backed by a wiremock server.

use crate::client::DataMallClient;
use crate::config::Config;
use serde_json::{Value, json};
use std::io::{Cursor, Write};
use std::time::Duration;
use wiremock::MockServer;

/// Account key configured on test clients
pub(crate) const TEST_KEY: &str = "test-account-key";

/// Client pointed at `server`, without an account key
pub(crate) fn client_for(server: &MockServer) -> DataMallClient {
    let config = Config {
        base_url: server.uri(),
        timeout: Duration::from_secs(5),
        ..Default::default()
    };
    DataMallClient::new(config).unwrap()
}

/// Mock server plus a client configured with [`TEST_KEY`]
pub(crate) async fn create_test_client() -> (DataMallClient, MockServer) {
    let server = MockServer::start().await;
    let client = client_for(&server);
    client.configure(TEST_KEY).await;
    (client, server)
}

/// Mock server plus a client that was never configured
pub(crate) async fn create_unconfigured_client() -> (DataMallClient, MockServer) {
    let server = MockServer::start().await;
    let client = client_for(&server);
    (client, server)
}

/// `{"odata.metadata": ..., "value": items}` as DataMall wraps lists
pub(crate) fn envelope(items: Value) -> Value {
    json!({
        "odata.metadata": "https://datamall2.mytransport.sg/ltaodataservice/$metadata",
        "value": items,
    })
}

pub(crate) fn bus_stop(index: usize) -> Value {
    json!({
        "BusStopCode": format!("{index:05}"),
        "RoadName": "Victoria St",
        "Description": format!("Stop {index}"),
        "Latitude": 1.29685,
        "Longitude": 103.853
    })
}

/// A page of `count` bus stops numbered from `start`
pub(crate) fn bus_stop_page(start: usize, count: usize) -> Value {
    envelope(Value::Array((start..start + count).map(bus_stop).collect()))
}

/// Bulk metadata pointing at `link`
pub(crate) fn link_envelope(link: &str) -> Value {
    envelope(json!([{ "Link": link }]))
}

/// In-memory ZIP archive with a single member
pub(crate) fn zip_bytes(name: &str, contents: &[u8]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file(name, zip::write::FileOptions::default())
        .unwrap();
    writer.write_all(contents).unwrap();
    writer.finish().unwrap().into_inner()
}

/// Number of requests the server has seen
pub(crate) async fn request_count(server: &MockServer) -> usize {
    server.received_requests().await.unwrap_or_default().len()
}
