//! End-to-end tests against the axum router

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use event_server::email::{MailBody, MailError, Mailer, OutgoingEmail, XLSX_CONTENT_TYPE};
use event_server::{AppState, Config, create_router};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

const BOUNDARY: &str = "event-test-boundary";

#[derive(Default)]
struct RecordingMailer {
    sent: parking_lot::Mutex<Vec<OutgoingEmail>>,
    fail: bool,
}

impl RecordingMailer {
    fn failing() -> Self {
        Self {
            sent: Default::default(),
            fail: true,
        }
    }

    fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError> {
        if self.fail {
            return Err(MailError::Transport("smtp unavailable".into()));
        }
        self.sent.lock().push(email);
        Ok(())
    }
}

struct Harness {
    _dir: tempfile::TempDir,
    state: AppState,
    mailer: Arc<RecordingMailer>,
}

impl Harness {
    fn new() -> Self {
        Self::with(|_| {}, RecordingMailer::default())
    }

    fn with(tweak: impl FnOnce(&mut Config), mailer: RecordingMailer) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::for_work_dir(dir.path());
        tweak(&mut config);
        let mailer = Arc::new(mailer);
        let state = AppState::with_mailer(config, mailer.clone());
        Self {
            _dir: dir,
            state,
            mailer,
        }
    }

    fn app(&self) -> Router {
        create_router(self.state.clone())
    }
}

fn payload(team: &str, members: usize) -> String {
    let members: Vec<_> = (0..members)
        .map(|i| json!({ "name": format!("{team} member {i}") }))
        .collect();
    json!({
        "team": team,
        "leader": {
            "name": "Eve",
            "email": "eve@example.com",
            "mobile": 5550100,
            "reg": "R-42"
        },
        "members": members,
        "txn": "TXN-001"
    })
    .to_string()
}

fn multipart_body(data: Option<&str>, screenshot: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    if let Some(data) = data {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"data\"\r\n\r\n{data}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((filename, bytes)) = screenshot {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"screenshot\"; \
                 filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn register_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/register")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

async fn body_string(response: axum::response::Response) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

async fn register_team(app: &Router, team: &str) -> StatusCode {
    let response = app
        .clone()
        .oneshot(register_request(multipart_body(
            Some(&payload(team, 4)),
            None,
        )))
        .await
        .unwrap();
    response.status()
}

#[tokio::test]
async fn test_register_team_sends_qr_and_export() {
    let h = Harness::new();
    let response = h
        .app()
        .oneshot(register_request(multipart_body(
            Some(&payload("Alpha", 4)),
            None,
        )))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body, json!({ "message": "Registration successful" }));

    let records = h.state.store.all_records();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.team_name, "Alpha");
    assert_eq!(record.leader.mobile, "5550100");
    assert!(!record.scanned);

    let sent = h.mailer.sent();
    assert_eq!(sent.len(), 2);

    let leader_mail = &sent[0];
    assert_eq!(leader_mail.to, "eve@example.com");
    assert_eq!(leader_mail.subject, "Your Event QR Code");
    let MailBody::Html(html) = &leader_mail.body else {
        panic!("leader mail should be html");
    };
    assert!(html.contains(&format!("http://localhost:3000/scan?id={}", record.id)));
    assert!(html.contains("data:image/png;base64,"));

    let admin_mail = &sent[1];
    assert_eq!(admin_mail.to, "admin@example.com");
    assert_eq!(admin_mail.attachments[0].filename, "Registrations.xlsx");
    assert!(h.state.config.export_path.exists());
}

#[tokio::test]
async fn test_register_rejects_wrong_team_size() {
    let h = Harness::new();
    let response = h
        .app()
        .oneshot(register_request(multipart_body(
            Some(&payload("Beta", 3)),
            None,
        )))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_string(response).await,
        "Team must have exactly 1 leader and 4 members"
    );
    assert!(h.state.store.is_empty());
    assert!(h.mailer.sent().is_empty());
    assert!(!h.state.config.export_path.exists());
}

#[tokio::test]
async fn test_register_rejects_malformed_payload() {
    let h = Harness::new();

    let bad_json = h
        .app()
        .oneshot(register_request(multipart_body(Some("{not json"), None)))
        .await
        .unwrap();
    assert_eq!(bad_json.status(), StatusCode::BAD_REQUEST);

    let missing_data = h
        .app()
        .oneshot(register_request(multipart_body(None, None)))
        .await
        .unwrap();
    assert_eq!(missing_data.status(), StatusCode::BAD_REQUEST);
    assert!(body_string(missing_data).await.starts_with("Malformed registration payload"));

    assert!(h.state.store.is_empty());
}

#[tokio::test]
async fn test_scan_marks_once() {
    let h = Harness::new();
    let app = h.app();
    assert_eq!(register_team(&app, "Gamma").await, StatusCode::OK);
    let id = h.state.store.all_records()[0].id;

    let first = app.clone().oneshot(get(&format!("/scan?id={id}"))).await.unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(body_string(first).await, "Attendance marked successfully");

    let second = app.clone().oneshot(get(&format!("/scan?id={id}"))).await.unwrap();
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(body_string(second).await, "Already scanned");

    assert!(h.state.store.find_by_id(&id).unwrap().scanned);
}

#[tokio::test]
async fn test_scan_unknown_or_missing_id() {
    let h = Harness::new();
    let app = h.app();

    for uri in [
        "/scan?id=00000000-0000-4000-8000-000000000000",
        "/scan?id=not-a-uuid",
        "/scan",
    ] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "Invalid QR code");
    }
    assert!(h.state.store.is_empty());
}

#[tokio::test]
async fn test_scan_does_not_refresh_export_by_default() {
    let h = Harness::new();
    let app = h.app();
    register_team(&app, "Delta").await;
    let id = h.state.store.all_records()[0].id;

    app.clone().oneshot(get(&format!("/scan?id={id}"))).await.unwrap();
    // leader mail + one export mail from the registration only
    assert_eq!(h.mailer.sent().len(), 2);
}

#[tokio::test]
async fn test_scan_refreshes_export_when_enabled() {
    let h = Harness::with(|c| c.export_on_scan = true, RecordingMailer::default());
    let app = h.app();
    register_team(&app, "Delta").await;
    let id = h.state.store.all_records()[0].id;

    app.clone().oneshot(get(&format!("/scan?id={id}"))).await.unwrap();
    let sent = h.mailer.sent();
    assert_eq!(sent.len(), 3);
    assert_eq!(sent[2].to, "admin@example.com");
}

#[tokio::test]
async fn test_download_requires_admin() {
    let h = Harness::new();
    let app = h.app();

    let wrong = app
        .clone()
        .oneshot(get("/download?email=someone@x.com"))
        .await
        .unwrap();
    assert_eq!(wrong.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_string(wrong).await, "Access denied");

    let missing = app.clone().oneshot(get("/download")).await.unwrap();
    assert_eq!(missing.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_download_before_any_registration() {
    let h = Harness::new();
    let response = h
        .app()
        .oneshot(get("/download?email=admin@example.com"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "No registrations yet");
}

#[tokio::test]
async fn test_download_returns_latest_export() {
    let h = Harness::new();
    let app = h.app();
    register_team(&app, "Alpha").await;
    register_team(&app, "Beta").await;

    let response = app
        .clone()
        .oneshot(get("/download?email=admin@example.com"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        XLSX_CONTENT_TYPE
    );
    assert!(
        response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .contains("Registrations.xlsx")
    );

    let bytes = body_bytes(response).await;
    assert!(bytes.starts_with(b"PK"));

    // The file on disk matches the attachment of the latest admin mail
    let sent = h.mailer.sent();
    let last_export = sent.iter().rev().find(|m| m.to == "admin@example.com").unwrap();
    assert_eq!(last_export.attachments[0].data, bytes);
}

#[tokio::test]
async fn test_mail_failure_keeps_record() {
    let h = Harness::with(|_| {}, RecordingMailer::failing());
    let status = register_team(&h.app(), "Epsilon").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(h.state.store.len(), 1);
    assert!(!h.state.config.export_path.exists());
}

#[tokio::test]
async fn test_proof_upload_is_stored_and_served() {
    let h = Harness::new();
    let app = h.app();
    let response = app
        .clone()
        .oneshot(register_request(multipart_body(
            Some(&payload("Zeta", 4)),
            Some(("receipt.png", b"fake-png-bytes")),
        )))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let record = &h.state.store.all_records()[0];
    let stored = record.proof_reference.clone().unwrap();
    assert!(stored.ends_with(".png"));

    let served = app
        .clone()
        .oneshot(get(&format!("/uploads/{stored}")))
        .await
        .unwrap();
    assert_eq!(served.status(), StatusCode::OK);
    assert_eq!(body_bytes(served).await, b"fake-png-bytes");
}

#[tokio::test]
async fn test_empty_proof_part_counts_as_no_upload() {
    let h = Harness::new();
    let response = h
        .app()
        .oneshot(register_request(multipart_body(
            Some(&payload("Eta", 4)),
            Some(("", b"")),
        )))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(h.state.store.all_records()[0].proof_reference.is_none());
}

#[tokio::test]
async fn test_rejected_proof_leaves_no_trace() {
    let h = Harness::new();
    let response = h
        .app()
        .oneshot(register_request(multipart_body(
            Some(&payload("Theta", 4)),
            Some(("malware.exe", b"MZ")),
        )))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(h.state.store.is_empty());
    assert!(!h.state.config.upload_dir.exists());
}

#[tokio::test]
async fn test_register_rate_limit() {
    let h = Harness::with(|c| c.register_rate_limit = 1, RecordingMailer::default());
    let app = h.app();

    assert_eq!(register_team(&app, "Iota").await, StatusCode::OK);
    assert_eq!(
        register_team(&app, "Kappa").await,
        StatusCode::TOO_MANY_REQUESTS
    );
    assert_eq!(h.state.store.len(), 1);
}

#[tokio::test]
async fn test_health_reports_count() {
    let h = Harness::new();
    let app = h.app();
    register_team(&app, "Lambda").await;

    let response = app.clone().oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "event-server");
    assert_eq!(body["registrations"], 1);
}

#[tokio::test]
async fn test_scan_requires_issued_id_form() {
    let h = Harness::new();
    let app = h.app();
    register_team(&app, "Mu").await;
    let issued = h.state.store.all_records()[0].id.to_string();

    for variant in [
        issued.to_uppercase(),
        issued.replace('-', ""),
        format!("urn:uuid:{issued}"),
    ] {
        let response = app
            .clone()
            .oneshot(get(&format!("/scan?id={variant}")))
            .await
            .unwrap();
        assert_eq!(body_string(response).await, "Invalid QR code");
    }
    assert!(!h.state.store.all_records()[0].scanned);

    let response = app
        .clone()
        .oneshot(get(&format!("/scan?id={issued}")))
        .await
        .unwrap();
    assert_eq!(body_string(response).await, "Attendance marked successfully");
}

#[tokio::test]
async fn test_download_denied_after_registrations() {
    let h = Harness::new();
    let app = h.app();
    register_team(&app, "Nu").await;
    assert!(h.state.config.export_path.exists());

    let response = app
        .clone()
        .oneshot(get("/download?email=eve@example.com"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_string(response).await, "Access denied");
}

#[tokio::test]
async fn test_oversized_proof_is_rejected() {
    let h = Harness::with(|c| c.max_upload_bytes = 1024, RecordingMailer::default());
    let app = h.app();

    // Over the proof limit but inside the request body limit
    let just_over = vec![0u8; 2048];
    // Over the request body limit itself
    let far_over = vec![0u8; 1024 + 1024 * 1024 + 4096];

    for proof in [just_over, far_over] {
        let response = app
            .clone()
            .oneshot(register_request(multipart_body(
                Some(&payload("Xi", 4)),
                Some(("receipt.png", &proof)),
            )))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_string(response).await.starts_with("File too large"));
    }

    assert!(h.state.store.is_empty());
    assert!(h.mailer.sent().is_empty());
}
