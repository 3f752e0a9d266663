//! Failure and success logging, captured through a `tracing_subscriber`
//! writer installed as the thread-local default.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use tax_client::{HttpRequest, HttpResponse, TaxCalculationRequest, TaxServiceClient, Transport, TransportError};
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

struct CaptureWriter<'a>(MutexGuard<'a, Vec<u8>>);

impl Write for CaptureWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Capture {
    type Writer = CaptureWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        CaptureWriter(self.0.lock().unwrap())
    }
}

impl Capture {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }

    fn install(&self) -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .with_max_level(Level::DEBUG)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }
}

/// Answers every request with the same status and body.
struct Reply(u16, &'static str);

#[async_trait]
impl Transport for Reply {
    async fn execute(&self, _request: HttpRequest) -> Result<HttpResponse, TransportError> {
        Ok(HttpResponse::new(self.0, self.1))
    }
}

struct Unreachable;

#[async_trait]
impl Transport for Unreachable {
    async fn execute(&self, _request: HttpRequest) -> Result<HttpResponse, TransportError> {
        Err(TransportError::Network("connection refused".to_string()))
    }
}

#[tokio::test]
async fn each_failure_is_tagged_with_its_operation() {
    let capture = Capture::default();
    let _guard = capture.install();
    let client = TaxServiceClient::new("http://backend.test", Unreachable);

    let _ = client.get_available_tax_years().await;
    let _ = client.calculate_tax(&TaxCalculationRequest::new(1.0, "2023-2024")).await;
    let _ = client.get_tax_rates("2023-2024").await;

    let logs = capture.contents();
    assert!(logs.contains("error fetching tax years"), "{logs}");
    assert!(logs.contains("error calculating tax"), "{logs}");
    assert!(logs.contains("error fetching tax rates"), "{logs}");
    assert!(logs.contains("operation=\"get_tax_rates\""), "{logs}");
    assert!(logs.contains("connection refused"), "{logs}");
    assert_eq!(logs.matches("ERROR").count(), 3, "{logs}");
}

#[tokio::test]
async fn status_failures_are_logged_with_status() {
    let capture = Capture::default();
    let _guard = capture.install();
    let client = TaxServiceClient::new("http://backend.test", Reply(500, "boom"));

    let err = client.get_tax_rates("2023-2024").await.unwrap_err();

    assert_eq!(err.status(), Some(500));
    let logs = capture.contents();
    assert!(logs.contains("HTTP 500: boom"), "{logs}");
}

#[tokio::test]
async fn successful_calculation_is_logged_at_debug() {
    let capture = Capture::default();
    let _guard = capture.install();
    let body = r#"{"grossIncome":80000,"incomeTax":17092,"medicareLevy":1600,"totalTax":18692,"netIncome":61308,"effectiveTaxRate":0.2337,"taxYear":"2023-2024"}"#;
    let client = TaxServiceClient::new("http://backend.test", Reply(200, body));

    client
        .calculate_tax(&TaxCalculationRequest::new(80000.0, "2023-2024"))
        .await
        .unwrap();

    let logs = capture.contents();
    assert!(logs.contains("DEBUG"), "{logs}");
    assert!(logs.contains("tax calculation response"), "{logs}");
    assert!(!logs.contains("ERROR"), "{logs}");
}

#[tokio::test]
async fn successful_reads_log_nothing_at_info() {
    let capture = Capture::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(capture.clone())
        .with_max_level(Level::INFO)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);
    let client = TaxServiceClient::new("http://backend.test", Reply(200, r#"["2023-2024"]"#));

    client.get_available_tax_years().await.unwrap();

    assert!(capture.contents().is_empty());
}
