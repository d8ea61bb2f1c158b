//! Test helpers for integration tests

use anyhow::{Context, Result};
use axum::Router;
use axum::extract::State;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, LINK};
use axum::http::{HeaderMap, HeaderValue, StatusCode, Uri};
use axum::response::IntoResponse;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

/// Environment variables the binary reads; cleared so the host CI cannot leak in
const CI_VARS: &[&str] = &[
  "GITHUB_ENV",
  "GITHUB_OUTPUT",
  "GITHUB_REPOSITORY",
  "GITHUB_API_URL",
  "GITHUB_TOKEN",
  "SHA",
  "RUST_LOG",
];

/// A scratch project directory with GitHub Actions env files
pub struct TestProject {
  _root: TempDir,
  pub path: PathBuf,
  pub env_file: PathBuf,
  pub output_file: PathBuf,
}

impl TestProject {
  /// Create an empty project (no manifest yet)
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().join("project");
    std::fs::create_dir_all(&path)?;

    let env_file = root.path().join("github_env");
    let output_file = root.path().join("github_output");
    std::fs::write(&env_file, "")?;
    std::fs::write(&output_file, "")?;

    Ok(Self {
      _root: root,
      path,
      env_file,
      output_file,
    })
  }

  /// Create a project with a typical build.zig.zon
  pub fn with_manifest(name: &str, version: &str) -> Result<Self> {
    let project = Self::new()?;
    project.write_manifest(&zon_manifest(name, version))?;
    Ok(project)
  }

  pub fn write_manifest(&self, content: &str) -> Result<()> {
    self.write_file("build.zig.zon", content)
  }

  pub fn write_file(&self, relative: &str, content: &str) -> Result<()> {
    let path = self.path.join(relative);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
  }

  /// Run the binary with GITHUB_ENV / GITHUB_OUTPUT pointing at this project's files
  pub fn run(&self, args: &[&str], envs: &[(&str, &str)]) -> Result<Output> {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_zon-release"));
    cmd.current_dir(&self.path).args(args);
    for var in CI_VARS {
      cmd.env_remove(var);
    }
    cmd.env("GITHUB_ENV", &self.env_file);
    cmd.env("GITHUB_OUTPUT", &self.output_file);
    for (key, value) in envs {
      cmd.env(key, value);
    }
    cmd.output().context("Failed to run zon-release")
  }

  /// Like `run`, but fail unless the command succeeded
  pub fn run_ok(&self, args: &[&str], envs: &[(&str, &str)]) -> Result<Output> {
    let output = self.run(args, envs)?;
    if !output.status.success() {
      anyhow::bail!(
        "zon-release command failed: zon-release {}\nstdout: {}\nstderr: {}",
        args.join(" "),
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
      );
    }
    Ok(output)
  }

  /// Variables exported to GITHUB_ENV, in write order
  pub fn exported(&self) -> Result<Vec<(String, String)>> {
    read_env_file(&self.env_file)
  }

  /// Step outputs written to GITHUB_OUTPUT, in write order
  pub fn outputs(&self) -> Result<Vec<(String, String)>> {
    read_env_file(&self.output_file)
  }
}

pub fn zon_manifest(name: &str, version: &str) -> String {
  format!(
    r#".{{
    .name = "{}",
    .version = "{}",
    .minimum_zig_version = "0.13.0",
    .dependencies = .{{}},
    .paths = .{{
        "build.zig",
        "build.zig.zon",
        "src",
    }},
}}
"#,
    name, version
  )
}

pub fn stdout(output: &Output) -> String {
  String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
  String::from_utf8_lossy(&output.stderr).to_string()
}

/// Parse `NAME<<DELIM ... DELIM` entries
fn read_env_file(path: &Path) -> Result<Vec<(String, String)>> {
  let content = std::fs::read_to_string(path)?;
  let mut lines = content.lines();
  let mut entries = Vec::new();
  while let Some(header) = lines.next() {
    let (name, delimiter) = header
      .split_once("<<")
      .with_context(|| format!("Unexpected env file line: {}", header))?;
    let mut value = Vec::new();
    for line in lines.by_ref() {
      if line == delimiter {
        break;
      }
      value.push(line);
    }
    entries.push((name.to_string(), value.join("\n")));
  }
  Ok(entries)
}

/// Canned response for one request path
#[derive(Clone)]
struct MockResponse {
  status: StatusCode,
  body: String,
  link: Option<String>,
  delay: Option<Duration>,
}

impl MockResponse {
  fn not_found() -> Self {
    Self {
      status: StatusCode::NOT_FOUND,
      body: r#"{"message":"Not Found"}"#.to_string(),
      link: None,
      delay: None,
    }
  }
}

/// A request as seen by the mock API
#[derive(Debug, Clone)]
pub struct RecordedRequest {
  pub path: String,
  pub authorization: Option<String>,
}

#[derive(Clone, Default)]
struct MockState {
  routes: Arc<Mutex<HashMap<String, MockResponse>>>,
  requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// axum server standing in for the hosting API
///
/// Routes are keyed by path and query. Unknown paths answer 404.
pub struct MockApi {
  pub base_url: String,
  state: MockState,
}

impl MockApi {
  pub fn start() -> Result<Self> {
    let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    listener.set_nonblocking(true)?;
    let base_url = format!("http://{}", listener.local_addr()?);

    let state = MockState::default();
    let app = Router::new().fallback(handle).with_state(state.clone());

    let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
    thread::spawn(move || {
      runtime.block_on(async move {
        let listener = tokio::net::TcpListener::from_std(listener).expect("mock listener");
        axum::serve(listener, app).await.expect("mock server");
      });
    });

    Ok(Self { base_url, state })
  }

  /// Answer `path` (including query) with a JSON body
  pub fn respond(&self, path: &str, status: u16, body: &str) {
    self.insert(path, status, body, None, None);
  }

  /// Answer `path` with a JSON body and a `Link: <next>; rel="next"` header
  pub fn respond_with_next(&self, path: &str, body: &str, next_path: &str) {
    let link = format!("<{}{}>; rel=\"next\"", self.base_url, next_path);
    self.insert(path, 200, body, Some(link), None);
  }

  /// Answer `path` only after `delay` has passed
  pub fn respond_after(&self, path: &str, delay: Duration, body: &str) {
    self.insert(path, 200, body, None, Some(delay));
  }

  fn insert(&self, path: &str, status: u16, body: &str, link: Option<String>, delay: Option<Duration>) {
    self.state.routes.lock().unwrap().insert(
      path.to_string(),
      MockResponse {
        status: StatusCode::from_u16(status).expect("valid status"),
        body: body.to_string(),
        link,
        delay,
      },
    );
  }

  pub fn requests(&self) -> Vec<RecordedRequest> {
    self.state.requests.lock().unwrap().clone()
  }
}

async fn handle(State(state): State<MockState>, uri: Uri, headers: HeaderMap) -> impl IntoResponse {
  let path = uri
    .path_and_query()
    .map_or_else(|| uri.path().to_string(), |pq| pq.as_str().to_string());
  let authorization = headers
    .get(AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .map(str::to_string);

  state.requests.lock().unwrap().push(RecordedRequest {
    path: path.clone(),
    authorization,
  });
  let response = state
    .routes
    .lock()
    .unwrap()
    .get(&path)
    .cloned()
    .unwrap_or_else(MockResponse::not_found);

  if let Some(delay) = response.delay {
    tokio::time::sleep(delay).await;
  }

  let mut response_headers = HeaderMap::new();
  response_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
  if let Some(link) = response.link {
    response_headers.insert(LINK, HeaderValue::from_str(&link).expect("valid Link header"));
  }
  (response.status, response_headers, response.body)
}

/// JSON array of matching-refs entries for the given tag names
pub fn refs_json(tags: &[&str]) -> String {
  let entries: Vec<String> = tags
    .iter()
    .map(|tag| {
      format!(
        r#"{{"ref":"refs/tags/{tag}","node_id":"REF_x","url":"https://api.github.com/repos/pmf/mmc-cli/git/refs/tags/{tag}","object":{{"sha":"{sha}","type":"commit","url":"u"}}}}"#,
        tag = tag,
        sha = "0123456789abcdef0123456789abcdef01234567"
      )
    })
    .collect();
  format!("[{}]", entries.join(","))
}

/// Path the client requests first for a version lookup
pub fn matching_refs_path(repo: &str, version: &str) -> String {
  format!("/repos/{}/git/matching-refs/tags/{}?per_page=100", repo, version)
}
