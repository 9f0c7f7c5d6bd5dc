//! End-to-end tests: HTTP router -> application handler -> PandocConverter.
//!
//! A real Pandoc install is not required. Each test writes small shell
//! scripts that behave like `pandoc` (succeeding, failing, or exiting without
//! output) and points the converter at them.

#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use tempfile::TempDir;
use tokio::sync::Mutex;
use tower::ServiceExt;

use pandoc_gateway::adapters::{app_router, ConvertAppState, PandocConverter, TempWorkspace};
use pandoc_gateway::config::ServerConfig;
use pandoc_gateway::ports::DocumentConverter;

// Tests write executables and then spawn them; running them one at a time
// keeps a freshly written script from being exec'd while another thread's
// fork still holds it open.
static SERIAL: Mutex<()> = Mutex::const_new(());

const VERSION_PREAMBLE: &str = r#"#!/bin/sh
if [ "$1" = "--version" ]; then
  echo "pandoc 3.1.9"
  echo "Features: +server +lua"
  exit 0
fi
"#;

struct Fixture {
    root: TempDir,
    workspace: Arc<TempWorkspace>,
}

impl Fixture {
    fn new() -> Self {
        let root = TempDir::new().unwrap();
        std::fs::create_dir(root.path().join("bin")).unwrap();
        std::fs::create_dir(root.path().join("tmp")).unwrap();
        let workspace = Arc::new(TempWorkspace::create_in(root.path().join("tmp")).unwrap());
        Self { root, workspace }
    }

    /// Write an executable script standing in for pandoc.
    fn script(&self, name: &str, body: &str) -> PathBuf {
        let path = self.root.path().join("bin").join(name);
        std::fs::write(&path, body).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    /// Converter that copies the input into the output, prefixed with `DOCX:`,
    /// and records its arguments and working directory next to itself.
    fn working_pandoc(&self) -> PathBuf {
        let body = format!(
            "{}echo \"$@\" > \"$(dirname \"$0\")/args.txt\"\npwd > \"$(dirname \"$0\")/cwd.txt\"\nprintf 'DOCX:' > \"$3\"\ncat \"$1\" >> \"$3\"\n",
            VERSION_PREAMBLE
        );
        self.script("pandoc-ok", &body)
    }

    fn failing_pandoc(&self) -> PathBuf {
        let body = format!(
            "{}echo \"$1\" > \"$(dirname \"$0\")/input-path.txt\"\necho 'pandoc: Unknown extension: bogus' >&2\nexit 64\n",
            VERSION_PREAMBLE
        );
        self.script("pandoc-fail", &body)
    }

    fn silent_pandoc(&self) -> PathBuf {
        let body = format!("{}exit 0\n", VERSION_PREAMBLE);
        self.script("pandoc-silent", &body)
    }

    fn broken_version_pandoc(&self) -> PathBuf {
        self.script(
            "pandoc-broken",
            "#!/bin/sh\necho 'error while loading shared libraries' >&2\nexit 127\n",
        )
    }

    fn missing_pandoc(&self) -> PathBuf {
        self.root.path().join("bin").join("pandoc-not-installed")
    }

    fn bin_file(&self, name: &str) -> String {
        std::fs::read_to_string(self.root.path().join("bin").join(name)).unwrap()
    }

    fn converter(&self, program: &Path) -> PandocConverter {
        PandocConverter::new(Arc::clone(&self.workspace))
            .with_pandoc_path(program.to_string_lossy().into_owned())
    }

    fn app(&self, program: &Path) -> Router {
        let state = ConvertAppState::new(Arc::new(self.converter(program)));
        app_router(state, &ServerConfig::default())
    }

    fn workspace_entries(&self) -> usize {
        std::fs::read_dir(self.workspace.path()).unwrap().count()
    }
}

fn convert_request(body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/convert")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_bytes(response: Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn json_body(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

// ════════════════════════════════════════════════════════════════════════════════
// Success
// ════════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn working_converter_yields_docx_download() {
    let _serial = SERIAL.lock().await;
    let fx = Fixture::new();
    let program = fx.working_pandoc();

    let response = fx
        .app(&program)
        .oneshot(convert_request(r##"{"markdown": "# Hello\n\n$E = mc^2$"}"##))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
    );
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"document.docx\""
    );
    assert_eq!(body_bytes(response).await, b"DOCX:# Hello\n\n$E = mc^2$");
}

#[tokio::test]
async fn converter_receives_fixed_argument_list() {
    let _serial = SERIAL.lock().await;
    let fx = Fixture::new();
    let program = fx.working_pandoc();

    let response = fx
        .app(&program)
        .oneshot(convert_request(r#"{"markdown": "text"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let args = fx.bin_file("args.txt");
    let args: Vec<&str> = args.split_whitespace().collect();
    assert_eq!(args.len(), 8);
    assert!(args[0].ends_with("/input.md"));
    assert_eq!(args[1], "-o");
    assert!(args[2].ends_with("/document.docx"));
    assert_eq!(
        &args[3..],
        ["--from=markdown", "--to=docx", "--standalone", "--wrap=none", "--mathml"]
    );
    assert!(Path::new(args[0]).starts_with(fx.workspace.path()));
}

#[tokio::test]
async fn converter_runs_inside_its_job_directory() {
    let _serial = SERIAL.lock().await;
    let fx = Fixture::new();
    let program = fx.working_pandoc();

    let response = fx
        .app(&program)
        .oneshot(convert_request(r#"{"markdown": "text"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let cwd = PathBuf::from(fx.bin_file("cwd.txt").trim());
    let args = fx.bin_file("args.txt");
    let input = Path::new(args.split_whitespace().next().unwrap());
    assert!(cwd.starts_with(fx.workspace.path()));
    assert_ne!(cwd, fx.workspace.path());
    assert_eq!(input.parent(), Some(cwd.as_path()));
}

#[tokio::test]
async fn concurrent_requests_use_separate_files() {
    let _serial = SERIAL.lock().await;
    let fx = Fixture::new();
    let program = fx.working_pandoc();
    let app = fx.app(&program);

    let (a, b, c) = tokio::join!(
        app.clone().oneshot(convert_request(r#"{"markdown": "alpha"}"#)),
        app.clone().oneshot(convert_request(r#"{"markdown": "beta"}"#)),
        app.clone().oneshot(convert_request(r#"{"markdown": "gamma"}"#)),
    );

    assert_eq!(body_bytes(a.unwrap()).await, b"DOCX:alpha");
    assert_eq!(body_bytes(b.unwrap()).await, b"DOCX:beta");
    assert_eq!(body_bytes(c.unwrap()).await, b"DOCX:gamma");
    assert_eq!(fx.workspace_entries(), 0);
}

// ════════════════════════════════════════════════════════════════════════════════
// Failure classes
// ════════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn missing_markdown_is_client_error() {
    let _serial = SERIAL.lock().await;
    let fx = Fixture::new();
    let program = fx.working_pandoc();

    let response = fx
        .app(&program)
        .oneshot(convert_request(r#"{}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "No markdown provided");
    assert_eq!(fx.workspace_entries(), 0);
}

#[tokio::test]
async fn absent_converter_is_server_error_mentioning_unavailability() {
    let _serial = SERIAL.lock().await;
    let fx = Fixture::new();
    let program = fx.missing_pandoc();

    let response = fx
        .app(&program)
        .oneshot(convert_request(r##"{"markdown": "# Hello"}"##))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = json_body(response).await;
    assert_eq!(json["code"], "CONVERTER_UNAVAILABLE");
    assert!(json["error"].as_str().unwrap().contains("not available"));
    assert_eq!(fx.workspace_entries(), 0);
}

#[tokio::test]
async fn converter_with_broken_version_check_is_unavailable() {
    let _serial = SERIAL.lock().await;
    let fx = Fixture::new();
    let program = fx.broken_version_pandoc();

    let err = fx.converter(&program).probe().await.unwrap_err();

    assert!(err.to_string().contains("not available"));
    assert!(err.to_string().contains("error while loading shared libraries"));
}

#[tokio::test]
async fn failing_converter_returns_captured_stderr() {
    let _serial = SERIAL.lock().await;
    let fx = Fixture::new();
    let program = fx.failing_pandoc();

    let response = fx
        .app(&program)
        .oneshot(convert_request(r##"{"markdown": "# Hello"}"##))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = json_body(response).await;
    assert_eq!(json["code"], "CONVERSION_FAILED");
    assert_eq!(
        json["error"],
        "Pandoc conversion failed: pandoc: Unknown extension: bogus"
    );
}

#[tokio::test]
async fn silent_converter_without_output_is_server_error() {
    let _serial = SERIAL.lock().await;
    let fx = Fixture::new();
    let program = fx.silent_pandoc();

    let response = fx
        .app(&program)
        .oneshot(convert_request(r##"{"markdown": "# Hello"}"##))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = json_body(response).await;
    assert_eq!(json["error"], "Output file was not created");
    assert_eq!(json["code"], "OUTPUT_MISSING");
}

// ════════════════════════════════════════════════════════════════════════════════
// Temporary file lifecycle
// ════════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn input_file_is_removed_after_failed_conversion() {
    let _serial = SERIAL.lock().await;
    let fx = Fixture::new();
    let program = fx.failing_pandoc();

    let response = fx
        .app(&program)
        .oneshot(convert_request(r##"{"markdown": "# Hello"}"##))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let input_path = PathBuf::from(fx.bin_file("input-path.txt").trim());
    assert!(input_path.ends_with("input.md"));
    assert!(!input_path.exists());
    assert_eq!(fx.workspace_entries(), 0);
}

#[tokio::test]
async fn temp_files_are_removed_after_every_outcome() {
    let _serial = SERIAL.lock().await;
    let fx = Fixture::new();
    let programs = [
        fx.working_pandoc(),
        fx.failing_pandoc(),
        fx.silent_pandoc(),
        fx.missing_pandoc(),
    ];

    for program in &programs {
        let response = fx
            .app(program)
            .oneshot(convert_request(r##"{"markdown": "# Hello"}"##))
            .await
            .unwrap();
        let _ = body_bytes(response).await;

        assert_eq!(
            fx.workspace_entries(),
            0,
            "leftover files after running {}",
            program.display()
        );
    }
}

#[tokio::test]
async fn workspace_is_removed_on_close() {
    let _serial = SERIAL.lock().await;
    let fx = Fixture::new();
    let path = fx.workspace.path().to_path_buf();
    let workspace = Arc::try_unwrap(fx.workspace).unwrap();

    workspace.close().unwrap();

    assert!(!path.exists());
}
