//! FinMind client against a canned local HTTP responder

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::NaiveDate;
use revenue_client::{FinMindClient, FinMindConfig};
use revenue_core::{DateRange, RevenueSource, StockDirectory};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio_test::{assert_err, assert_ok};

/// Serve `status_line` + `body` to every connection, recording request heads
async fn serve(status_line: &'static str, body: String) -> (String, Arc<Mutex<Vec<String>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&requests);

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                match socket.read(&mut buf).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => head.extend_from_slice(&buf[..n]),
                }
            }
            seen.lock().unwrap().push(String::from_utf8_lossy(&head).into_owned());

            let response = format!(
                "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    (format!("http://{addr}/api/v4/data"), requests)
}

fn client(api_base: &str) -> FinMindClient {
    let config = FinMindConfig::builder()
        .api_base(api_base)
        .api_token("secret")
        .request_timeout(Duration::from_secs(5))
        .build()
        .unwrap();
    FinMindClient::new(Arc::new(config)).unwrap()
}

#[tokio::test]
async fn directory_lookup_sends_dataset_query_and_token() {
    let body = serde_json::json!({
        "msg": "success",
        "status": 200,
        "data": [
            {"industry_category": "半導體業", "stock_id": "2330", "stock_name": "台積電", "type": "twse", "date": "2024-05-01"}
        ]
    })
    .to_string();
    let (base, requests) = serve("HTTP/1.1 200 OK", body).await;

    let candidates = assert_ok!(client(&base).search("2330", None).await);
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].display_name, "台積電 (2330)");

    let head = requests.lock().unwrap()[0].clone();
    assert!(head.starts_with("GET /api/v4/data?dataset=TaiwanStockInfo&data_id=2330 "));
    assert!(head.to_ascii_lowercase().contains("authorization: bearer secret"));
}

#[tokio::test]
async fn unfiltered_lookup_omits_data_id() {
    let body = r#"{"msg":"success","status":200,"data":[]}"#.to_string();
    let (base, requests) = serve("HTTP/1.1 200 OK", body).await;

    let candidates = assert_ok!(client(&base).search("", None).await);
    assert!(candidates.is_empty());

    let head = requests.lock().unwrap()[0].clone();
    assert!(head.starts_with("GET /api/v4/data?dataset=TaiwanStockInfo "));
}

#[tokio::test]
async fn revenue_lookup_passes_date_range() {
    let body = serde_json::json!({
        "msg": "success",
        "status": 200,
        "data": [
            {"date": "2024-03-01", "stock_id": "2330", "country": "Taiwan", "revenue": 181648270000_i64, "revenue_month": 2, "revenue_year": 2024},
            {"date": "2024-02-01", "stock_id": "2330", "country": "Taiwan", "revenue": 215785127000_i64, "revenue_month": 1, "revenue_year": 2024}
        ]
    })
    .to_string();
    let (base, requests) = serve("HTTP/1.1 200 OK", body).await;

    let range = DateRange::new(
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
    )
    .unwrap();
    let records = client(&base).monthly_revenue("2330", Some(range)).await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].period_date, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());

    let head = requests.lock().unwrap()[0].clone();
    assert!(head.contains("dataset=TaiwanStockMonthRevenue"));
    assert!(head.contains("start_date=2024-01-01"));
    assert!(head.contains("end_date=2024-03-31"));
}

#[tokio::test]
async fn http_error_is_transport_failure() {
    let (base, _) = serve("HTTP/1.1 502 Bad Gateway", "{}".to_string()).await;

    let err = assert_err!(client(&base).search("2330", None).await);
    assert!(err.is_transport());
}

#[tokio::test]
async fn application_status_is_application_failure() {
    let body = r#"{"msg":"Requests reach the upper limit","status":402}"#.to_string();
    let (base, _) = serve("HTTP/1.1 200 OK", body).await;

    let err = assert_err!(client(&base).search("2330", None).await);
    assert!(err.is_application());
}

#[tokio::test]
async fn malformed_payload_is_data_shape_failure() {
    let (base, _) = serve("HTTP/1.1 200 OK", "not json".to_string()).await;

    let err = assert_err!(client(&base).monthly_revenue("2330", None).await);
    assert!(err.is_data_shape());
}
