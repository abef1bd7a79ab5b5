//! Canned DataMall payloads for mock-server tests

use serde_json::{Value, json};
use std::io::{Cursor, Write};

/// Service root path the mock client is configured with
pub const SERVICE_ROOT: &str = "/ltaodataservice";

/// Account key used against mock servers
pub const MOCK_KEY: &str = "integration-test-key";

/// Full mock path of a catalog path
pub fn route(path: &str) -> String {
    format!("{SERVICE_ROOT}/{path}")
}

/// Wrap items the way DataMall wraps list responses
pub fn value_page(items: Vec<Value>) -> Value {
    json!({
        "odata.metadata": "https://datamall2.mytransport.sg/ltaodataservice/$metadata",
        "value": items,
    })
}

/// `count` car park records numbered from `start`, alternating lot types
pub fn car_parks(start: usize, count: usize) -> Vec<Value> {
    (start..start + count)
        .map(|i| {
            json!({
                "CarParkID": (i / 2).to_string(),
                "Area": "Marina",
                "Development": format!("Development {}", i / 2),
                "Location": "1.29375 103.85718",
                "AvailableLots": i % 700,
                "LotType": if i % 2 == 0 { "C" } else { "Y" },
                "Agency": "LTA"
            })
        })
        .collect()
}

/// ZIP archive holding one passenger volume CSV
pub fn passenger_volume_zip(csv_name: &str) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file(csv_name, zip::write::FileOptions::default())
        .unwrap();
    writer
        .write_all(
            b"YEAR_MONTH,DAY_TYPE,TIME_PER_HOUR,PT_TYPE,PT_CODE,TOTAL_TAP_IN_VOLUME,TOTAL_TAP_OUT_VOLUME\n\
2024-06,WEEKENDS/HOLIDAY,16,TRAIN,NS1,2011,1834\n",
        )
        .unwrap();
    writer.finish().unwrap().into_inner()
}
