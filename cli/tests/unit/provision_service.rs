//! Tests for the `provision` application service.
//!
//! Every external capability is a fake from `crate::fakes`; the shared call
//! log records what the pipeline asked for, in order.

#![allow(clippy::expect_used)]

use firebase_provision::application::services::provision::{
    ProvisionOptions, ProvisionReport, provision,
};
use firebase_provision::domain::{ProjectId, ProvisionConfig, ProvisionError};

use crate::fakes::{
    ADMIN_EMAIL, CallLog, FakeBuilder, FakeFirebase, FakeGcloud, FakeTools, MemoryWorkspace,
    RecordingReporter,
};

const CREDENTIAL: &str = "../researcher_hub/firebase-service-account.json";

struct Harness {
    log: CallLog,
    firebase: FakeFirebase,
    gcloud: FakeGcloud,
    builder: FakeBuilder,
    tools: FakeTools,
    workspace: MemoryWorkspace,
    reporter: RecordingReporter,
    config: ProvisionConfig,
    skip_deploy: bool,
}

impl Harness {
    fn fresh() -> Self {
        let log = CallLog::default();
        Self {
            firebase: FakeFirebase::fresh(&log),
            gcloud: FakeGcloud::fresh(&log),
            builder: FakeBuilder { log: log.clone() },
            tools: FakeTools {
                log: log.clone(),
                missing: Vec::new(),
            },
            workspace: MemoryWorkspace::new(),
            reporter: RecordingReporter::default(),
            config: ProvisionConfig::default(),
            skip_deploy: false,
            log,
        }
    }

    fn provisioned() -> Self {
        let mut h = Self::fresh();
        h.firebase = FakeFirebase::provisioned(&h.log);
        h.gcloud = FakeGcloud::provisioned(&h.log);
        h.workspace = MemoryWorkspace::new().with_file(CREDENTIAL, r#"{"type":"service_account"}"#);
        h
    }

    async fn run(&self) -> anyhow::Result<ProvisionReport> {
        provision(
            &self.firebase,
            &self.gcloud,
            &self.builder,
            &self.tools,
            &self.workspace,
            ProvisionOptions {
                reporter: &self.reporter,
                project: ProjectId::parse("my-proj1").expect("valid id"),
                config: &self.config,
                skip_deploy: self.skip_deploy,
            },
        )
        .await
    }
}

fn provision_error(err: &anyhow::Error) -> &ProvisionError {
    err.downcast_ref::<ProvisionError>()
        .expect("error should be a ProvisionError")
}

// ── Happy paths ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_fresh_project_creates_every_resource() {
    let h = Harness::fresh();
    let report = h.run().await.expect("provisioning succeeds");

    assert_eq!(report.hosting_url, "https://my-proj1.web.app");
    assert!(report.project_created);
    assert!(report.web_app_created);
    assert!(!report.credential_reused);
    assert!(report.database_created);
    assert!(report.deployed);
    assert_eq!(report.web_app_id, "1:42:web:cafe");
    assert_eq!(report.admin_account, ADMIN_EMAIL);

    let key_call = format!("create_key {ADMIN_EMAIL}");
    for call in [
        "create_web_app AutoRA Web",
        key_call.as_str(),
        "enable_database_service",
        "create_database nam5",
        "deploy my-proj1",
    ] {
        assert!(h.log.contains(call), "missing call {call}: {:?}", h.log.calls());
    }
}

#[tokio::test]
async fn test_steps_run_in_fixed_order() {
    let h = Harness::fresh();
    h.run().await.expect("provisioning succeeds");

    let order = [
        "probe firebase",
        "create_project my-proj1",
        "confirm_access my-proj1",
        "set_active_project my-proj1",
        "set_quota_project my-proj1",
        "find_web_app",
        "sdk_config 1:42:web:cafe",
        "find_admin_account firebase-adminsdk",
        "database_exists",
        "npm install",
        "npm run build",
        "deploy my-proj1",
    ];
    let positions: Vec<usize> = order
        .iter()
        .map(|c| h.log.position(c).unwrap_or_else(|| panic!("missing {c}")))
        .collect();
    assert!(
        positions.windows(2).all(|w| w[0] < w[1]),
        "out of order: {:?}",
        h.log.calls()
    );
}

#[tokio::test]
async fn test_rerun_against_provisioned_project_creates_nothing() {
    let h = Harness::provisioned();
    let report = h.run().await.expect("re-run succeeds");

    assert!(!report.project_created);
    assert!(!report.web_app_created);
    assert!(report.credential_reused);
    assert!(!report.database_created);
    for call in h.log.calls() {
        assert!(
            !call.starts_with("create_web_app")
                && !call.starts_with("create_key")
                && !call.starts_with("create_database")
                && call != "enable_database_service",
            "unexpected creation call {call}"
        );
    }
    assert_eq!(
        h.workspace.file(CREDENTIAL).as_deref(),
        Some(r#"{"type":"service_account"}"#),
        "existing credential must be left untouched"
    );
}

#[tokio::test]
async fn test_generated_files_have_expected_content() {
    let h = Harness::fresh();
    h.run().await.expect("provisioning succeeds");

    let rc: serde_json::Value =
        serde_json::from_str(&h.workspace.file(".firebaserc").expect("rc written")).expect("json");
    assert_eq!(rc["projects"]["default"], "my-proj1");

    let snippet = h.workspace.file("firebase-config.js").expect("sdk config written");
    assert!(snippet.contains("firebase.initializeApp("));

    let env = h.workspace.file(".env").expect("env written");
    assert_eq!(env.lines().count(), 9);
    assert!(env.ends_with("\"\n"));
    assert!(env.contains("REACT_APP_apiKey=\"AIzaFake\"\n"));
    assert!(env.contains("REACT_APP_completionCode=\"complete\"\n"));

    let hosting: serde_json::Value =
        serde_json::from_str(&h.workspace.file("firebase.json").expect("hosting")).expect("json");
    assert_eq!(hosting["hosting"]["public"], "build");
    assert!(h.workspace.file("firestore.indexes.json").is_some());
    assert!(h.workspace.has_dir("../researcher_hub"));
}

#[tokio::test]
async fn test_project_creation_failure_is_tolerated_when_accessible() {
    let mut h = Harness::fresh();
    h.firebase.create_succeeds = false;
    let report = h.run().await.expect("existing project is reused");
    assert!(!report.project_created);
    let warned = h
        .reporter
        .messages
        .lock()
        .expect("lock")
        .iter()
        .any(|m| m.starts_with("warn: project creation failed"));
    assert!(warned);
}

#[tokio::test]
async fn test_skip_deploy_stops_after_hosting_config() {
    let mut h = Harness::fresh();
    h.skip_deploy = true;
    let report = h.run().await.expect("provisioning succeeds");

    assert!(!report.deployed);
    assert!(h.workspace.file("firebase.json").is_some());
    assert!(!h.log.contains("npm install"));
    assert!(!h.log.contains("deploy my-proj1"));
    assert!(!h.log.contains("probe npm"), "npm is not required when skipping deploy");
}

// ── Terminal failures ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_inaccessible_existing_project_aborts() {
    let mut h = Harness::fresh();
    h.firebase.create_succeeds = false;
    h.gcloud.accessible = false;
    let err = h.run().await.expect_err("must abort");

    assert!(matches!(provision_error(&err), ProvisionError::Inaccessible { .. }));
    assert!(!h.log.contains("set_active_project my-proj1"));
}

#[tokio::test]
async fn test_created_but_inaccessible_project_has_distinct_message() {
    let mut h = Harness::fresh();
    h.gcloud.accessible = false;
    let err = h.run().await.expect_err("must abort");

    assert!(matches!(
        provision_error(&err),
        ProvisionError::CreatedButInaccessible { .. }
    ));
    assert!(err.to_string().contains("was created"));
}

#[tokio::test]
async fn test_unresolved_web_app_dumps_raw_response() {
    let mut h = Harness::fresh();
    h.firebase.created_app = None;
    let err = h.run().await.expect_err("must abort");

    assert!(matches!(
        provision_error(&err),
        ProvisionError::WebAppIdUnresolved { .. }
    ));
    assert!(err.to_string().contains("Quota exceeded"));
    let dump = h.workspace.file("webapp_create.json").expect("dump written");
    assert!(dump.contains("Quota exceeded"));
    assert!(h.log.calls().iter().all(|c| !c.starts_with("sdk_config")));
}

#[tokio::test]
async fn test_sdk_payload_without_wrapper_writes_no_env_file() {
    let mut h = Harness::fresh();
    h.firebase.snippet = r#"{"apiKey":"AIzaFake"}"#.to_string();
    let err = h.run().await.expect_err("must abort");

    assert!(matches!(
        provision_error(&err),
        ProvisionError::SdkConfigNotFound { .. }
    ));
    assert!(h.workspace.file(".env").is_none());
    assert!(!h.log.contains("find_admin_account firebase-adminsdk"));
}

#[tokio::test]
async fn test_sdk_payload_failure_keeps_previous_env_file() {
    let mut h = Harness::fresh();
    h.workspace = MemoryWorkspace::new().with_file(".env", "OLD=\"1\"\n");
    h.firebase.snippet = "firebase.initializeApp({ apiKey: 'unquoted' });".to_string();
    let err = h.run().await.expect_err("must abort");

    assert!(matches!(
        provision_error(&err),
        ProvisionError::SdkConfigMalformed { .. }
    ));
    assert_eq!(h.workspace.file(".env").as_deref(), Some("OLD=\"1\"\n"));
}

#[tokio::test]
async fn test_missing_admin_account_aborts_before_database_and_hosting() {
    let mut h = Harness::fresh();
    h.gcloud.admin_account = None;
    let err = h.run().await.expect_err("must abort");

    assert!(matches!(
        provision_error(&err),
        ProvisionError::AdminAccountMissing { .. }
    ));
    assert!(!h.log.contains("database_exists"));
    assert!(h.workspace.file("firebase.json").is_none());
    assert!(h.workspace.file("firestore.indexes.json").is_none());
}

#[tokio::test]
async fn test_missing_tool_aborts_before_any_provider_call() {
    let mut h = Harness::fresh();
    h.tools.missing = vec!["gcloud"];
    let err = h.run().await.expect_err("must abort");

    assert!(matches!(provision_error(&err), ProvisionError::MissingTool(t) if t == "gcloud"));
    assert!(h.log.calls().iter().all(|c| c.starts_with("probe ")));
}

#[tokio::test]
async fn test_deploy_failure_propagates() {
    let mut h = Harness::fresh();
    h.firebase.deploy_fails = true;
    let err = h.run().await.expect_err("must abort");
    assert!(err.to_string().contains("firebase deploy failed"));
}

#[tokio::test]
async fn test_custom_config_flows_through() {
    let mut h = Harness::fresh();
    h.config.firestore_location = "eur3".to_string();
    h.config.web_app_name = "Study Web".to_string();
    h.config.public_dir = "dist".to_string();
    h.config.env.completion_code = "XYZ123".to_string();
    h.run().await.expect("provisioning succeeds");

    assert!(h.log.contains("create_database eur3"));
    assert!(h.log.contains("create_web_app Study Web"));
    assert!(h.workspace.file("firebase.json").expect("hosting").contains("\"dist\""));
    assert!(
        h.workspace
            .file(".env")
            .expect("env")
            .contains("REACT_APP_completionCode=\"XYZ123\"")
    );
}
