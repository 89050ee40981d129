//! # Integration Tests
//!
//! End-to-end publishing against a local recording HTTP server.
//!
//! Covers:
//! - Config file -> loader -> publisher -> HTTP request
//! - Status handling (200/201 succeed, anything else fails)
//! - Unreachable destination
//! - Document shape on the wire

#[cfg(test)]
mod contract_tests {
    use contracts::PublishField;

    #[test]
    fn test_field_vocabulary_is_stable() {
        let names: Vec<_> = PublishField::ALL.iter().map(|f| f.as_str()).collect();
        assert_eq!(
            names,
            ["Namespace", "Config", "Data", "Description", "Timestamp", "Unit", "Version"]
        );
        assert_eq!(
            dispatcher::DEFAULT_PUBLISH_FIELDS,
            names.join("|"),
        );
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::net::SocketAddr;
    use std::sync::{Arc, Mutex};

    use axum::body::Bytes;
    use axum::extract::State;
    use axum::http::{header, HeaderMap, StatusCode, Uri};
    use axum::Router;
    use chrono::{Local, TimeZone, Utc};
    use serde_json::{json, Value};

    use config_loader::{ConfigFormat, ConfigLoader};
    use contracts::{ConfigReader, MetricData, MetricRecord, Namespace, PluginConfig};
    use dispatcher::{HttpTransport, PublishError, Publisher};

    /// One request as seen by the server
    #[derive(Debug, Clone)]
    struct Captured {
        path: String,
        content_type: Option<String>,
        document: Value,
    }

    #[derive(Clone)]
    struct ServerState {
        status: StatusCode,
        captured: Arc<Mutex<Vec<Captured>>>,
    }

    /// Local document store answering every POST with a fixed status
    struct MiniStore {
        addr: SocketAddr,
        captured: Arc<Mutex<Vec<Captured>>>,
    }

    impl MiniStore {
        async fn start(status: u16) -> Self {
            let captured = Arc::new(Mutex::new(Vec::new()));
            let state = ServerState {
                status: StatusCode::from_u16(status).unwrap(),
                captured: Arc::clone(&captured),
            };
            let app = Router::new().fallback(record).with_state(state);

            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            tokio::spawn(async move {
                axum::serve(listener, app).await.unwrap();
            });

            Self { addr, captured }
        }

        fn config(&self) -> PluginConfig {
            let content = format!(
                r#"
                address = "127.0.0.1"
                port = {}
                index = "database"
                type = "test"
                index_timestamp = false
                "#,
                self.addr.port()
            );
            ConfigLoader::load_from_str(&content, ConfigFormat::Toml, &dispatcher::config_policy())
                .unwrap()
        }

        fn captured(&self) -> Vec<Captured> {
            self.captured.lock().unwrap().clone()
        }
    }

    async fn record(
        State(state): State<ServerState>,
        uri: Uri,
        headers: HeaderMap,
        body: Bytes,
    ) -> StatusCode {
        let document = serde_json::from_slice(&body).unwrap_or(Value::Null);
        let content_type = headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        state.captured.lock().unwrap().push(Captured {
            path: uri.path().to_string(),
            content_type,
            document,
        });
        state.status
    }

    fn metric(name: &str, data: impl Into<MetricData>) -> MetricRecord {
        MetricRecord::new(Namespace::new(&["intel", name]), data)
    }

    async fn publish(config: &PluginConfig, metrics: &[MetricRecord]) -> Result<(), PublishError> {
        let publisher = Publisher::http()?;
        publisher
            .publish(Some(metrics), Some(config as &dyn ConfigReader))
            .await
    }

    #[tokio::test]
    async fn test_ok_status_publishes_every_metric() {
        let store = MiniStore::start(200).await;
        let config = store.config();
        let metrics: Vec<_> = (0..4).map(|i| metric(&format!("m{i}"), i as i64)).collect();

        publish(&config, &metrics).await.unwrap();

        let captured = store.captured();
        assert_eq!(captured.len(), 4);
        assert!(captured.iter().all(|c| c.path == "/database/test"));
    }

    #[tokio::test]
    async fn test_created_status_is_success() {
        let store = MiniStore::start(201).await;
        let config = store.config();
        publish(&config, &[metric("cpu", 1_i64)]).await.unwrap();
        assert_eq!(store.captured().len(), 1);
    }

    #[tokio::test]
    async fn test_bad_request_fails_publish() {
        let store = MiniStore::start(400).await;
        let config = store.config();

        let err = publish(&config, &[metric("cpu", 1_i64)])
            .await
            .unwrap_err();
        assert!(
            matches!(err, PublishError::Status { status: 400, ref namespace } if namespace == "intel/cpu"),
            "got: {err}"
        );
        assert_eq!(err.to_string(), "Unable to publish metric intel/cpu, status: 400");
    }

    #[tokio::test]
    async fn test_one_rejection_fails_batch_but_all_are_sent() {
        let store = MiniStore::start(404).await;
        let config = store.config();
        let metrics = vec![metric("a", 1_i64), metric("b", 2_i64), metric("c", 3_i64)];

        let err = publish(&config, &metrics).await.unwrap_err();
        assert!(matches!(err, PublishError::Status { status: 404, .. }));
        assert_eq!(store.captured().len(), 3);
    }

    #[tokio::test]
    async fn test_unreachable_store_is_transport_error() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let config = PluginConfig::new()
            .with("address", "127.0.0.1")
            .with("port", i64::from(port));
        let mut config = config;
        dispatcher::config_policy().apply_defaults(&mut config);

        let publisher = Publisher::new(HttpTransport::new().unwrap());
        let err = publisher
            .publish(Some(&[metric("cpu", 1_i64)][..]), Some(&config as &dyn ConfigReader))
            .await
            .unwrap_err();
        assert!(matches!(err, PublishError::Transport { .. }), "got: {err}");
    }

    #[tokio::test]
    async fn test_document_shape_on_the_wire() {
        let store = MiniStore::start(201).await;
        let mut config = store.config();
        config.insert("publish_fields", "Namespace|Data|Unit|Description|Timestamp|Version|Config");

        let timestamp = Utc.with_ymd_and_hms(2016, 10, 16, 12, 0, 0).unwrap();
        let record = MetricRecord::new(
            Namespace::new(&["intel", "cpu"]).add_dynamic_element("core", "core id"),
            0.5_f64,
        )
        .with_unit("%")
        .with_description("CPU utilisation")
        .with_config("interval", 10_i64)
        .with_timestamp(timestamp)
        .with_version(2)
        .with_tag("host", "node-1");

        publish(&config, &[record]).await.unwrap();

        let captured = store.captured();
        assert_eq!(captured[0].content_type.as_deref(), Some("application/json"));
        assert_eq!(
            captured[0].document,
            json!({
                "Namespace": "intel/cpu/*",
                "Data": 0.5,
                "Unit": "%",
                "Description": "CPU utilisation",
                "Timestamp": "2016-10-16T12:00:00Z",
                "Version": 2,
                "Config": { "interval": 10 },
                "host": "node-1",
            })
        );
    }

    #[tokio::test]
    async fn test_tags_override_projected_fields() {
        let store = MiniStore::start(200).await;
        let config = store.config();
        let record = metric("cpu", 1_i64).with_tag("Namespace", "custom");

        publish(&config, &[record]).await.unwrap();
        assert_eq!(store.captured()[0].document["Namespace"], "custom");
    }

    #[tokio::test]
    async fn test_dated_index_path() {
        let store = MiniStore::start(201).await;
        let mut config = store.config();
        config.insert("index_timestamp", true);

        publish(&config, &[metric("cpu", 1_i64)]).await.unwrap();

        let today = Local::now().date_naive().format("%Y.%m.%d");
        assert_eq!(store.captured()[0].path, format!("/database-{today}/test"));
    }

    #[tokio::test]
    async fn test_empty_batch_sends_nothing() {
        let store = MiniStore::start(500).await;
        let config = store.config();

        publish(&config, &[]).await.unwrap();
        assert!(store.captured().is_empty());
    }

    #[tokio::test]
    async fn test_misconfiguration_sends_nothing() {
        let store = MiniStore::start(200).await;
        let mut config = store.config();
        config.insert("port", "not a number");

        let err = publish(&config, &[metric("cpu", 1_i64)])
            .await
            .unwrap_err();
        assert!(err.is_config(), "got: {err}");
        assert!(store.captured().is_empty());
    }
}
