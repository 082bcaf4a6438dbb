#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path as UrlPath, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use parking_lot::Mutex;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use quarry::{DownloadJob, JobId, ProxyEndpoint, Quarry, QuarryBuilder, RetentionPolicy};

/// In-memory repository served over HTTP.
///
/// The same server also answers proxied requests: a proxied request carries
/// an absolute URL and is routed by its path like a direct one.
#[derive(Debug, Default, Clone)]
pub struct FakeRepository {
    /// Version directories listed on each artifact page.
    versions: BTreeMap<String, Vec<String>>,
    /// (artifact, version) pairs whose directory holds the artifact file.
    files: BTreeSet<(String, String)>,
    /// "artifact/version" pages answering 500.
    broken_pages: BTreeSet<String>,
    /// Artifacts whose file download answers 404.
    broken_files: BTreeSet<String>,
    /// (artifact, version) pairs whose file is listed on the first page view only.
    vanishing_files: BTreeSet<(String, String)>,
    /// GED releases: version -> jar file name, `None` for a page without jar.
    ged_releases: BTreeMap<String, Option<String>>,
    /// GED snapshots: version -> jar file name.
    ged_snapshots: BTreeMap<String, Option<String>>,
}

impl FakeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lists `version` on the artifact page and puts the file in it.
    pub fn with_artifact(mut self, artifact: &str, version: &str) -> Self {
        self = self.with_empty_version(artifact, version);
        self.files.insert((artifact.to_string(), version.to_string()));
        self
    }

    /// Lists `version` on the artifact page without any file in it.
    pub fn with_empty_version(mut self, artifact: &str, version: &str) -> Self {
        self.versions
            .entry(artifact.to_string())
            .or_default()
            .push(version.to_string());
        self
    }

    pub fn with_broken_page(mut self, artifact: &str, version: &str) -> Self {
        self.broken_pages.insert(format!("{artifact}/{version}"));
        self
    }

    pub fn with_broken_file(mut self, artifact: &str) -> Self {
        self.broken_files.insert(artifact.to_string());
        self
    }

    /// Lists the file of `artifact` at `version` once, then drops it from the page.
    pub fn with_vanishing_file(mut self, artifact: &str, version: &str) -> Self {
        self = self.with_artifact(artifact, version);
        self.vanishing_files
            .insert((artifact.to_string(), version.to_string()));
        self
    }

    pub fn with_ged_release(mut self, version: &str, jar: &str) -> Self {
        self.ged_releases
            .insert(version.to_string(), Some(jar.to_string()));
        self
    }

    /// Lists a release version whose page holds no jar.
    pub fn with_ged_release_without_jar(mut self, version: &str) -> Self {
        self.ged_releases.insert(version.to_string(), None);
        self
    }

    pub fn with_ged_snapshot(mut self, version: &str, jar: &str) -> Self {
        self.ged_snapshots
            .insert(version.to_string(), Some(jar.to_string()));
        self
    }
}

struct ServerState {
    repo: FakeRepository,
    base: String,
    /// Vanishing files already listed once.
    listed: Mutex<BTreeSet<(String, String)>>,
}

/// Content served for the file of `artifact` at `version`.
pub fn artifact_content(artifact: &str, version: &str) -> String {
    format!("{artifact}:{version}")
}

/// Name of the file of `artifact` at `version` on the repository.
pub fn remote_file_name(artifact: &str, version: &str) -> String {
    format!("{artifact}-{version}-20240101.ear")
}

async fn artifact_page(
    State(state): State<Arc<ServerState>>,
    UrlPath(artifact): UrlPath<String>,
) -> Response {
    match state.repo.versions.get(&artifact) {
        Some(versions) => {
            let mut html = String::from("<html><body>\n<a href=\"../\">../</a>\n");
            for v in versions {
                html.push_str(&format!("<a href=\"{v}/\">{v}/</a>\n"));
            }
            html.push_str("<a href=\"maven-metadata.xml\">maven-metadata.xml</a>\n</body></html>");
            Html(html).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn version_page(
    State(state): State<Arc<ServerState>>,
    UrlPath((artifact, version)): UrlPath<(String, String)>,
) -> Response {
    if state.repo.broken_pages.contains(&format!("{artifact}/{version}")) {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    let listed = state
        .repo
        .versions
        .get(&artifact)
        .is_some_and(|v| v.contains(&version));
    if !listed {
        return StatusCode::NOT_FOUND.into_response();
    }

    let key = (artifact.clone(), version.clone());
    let vanished =
        state.repo.vanishing_files.contains(&key) && !state.listed.lock().insert(key.clone());

    let mut html = String::from("<html><body>\n<a href=\"../\">../</a>\n");
    if state.repo.files.contains(&key) && !vanished {
        let file = remote_file_name(&artifact, &version);
        html.push_str(&format!("<a href=\"{file}\">{file}</a>\n"));
    }
    html.push_str(&format!(
        "<a href=\"{artifact}-{version}.pom\">{artifact}-{version}.pom</a>\n</body></html>"
    ));
    Html(html).into_response()
}

async fn artifact_file(
    State(state): State<Arc<ServerState>>,
    UrlPath((artifact, version, file)): UrlPath<(String, String, String)>,
) -> Response {
    let present = state.repo.files.contains(&(artifact.clone(), version.clone()));
    if state.repo.broken_files.contains(&artifact)
        || !present
        || file != remote_file_name(&artifact, &version)
    {
        return StatusCode::NOT_FOUND.into_response();
    }
    artifact_content(&artifact, &version).into_response()
}

fn ged_project_page(base: &str, kind: &str, versions: &BTreeMap<String, Option<String>>) -> String {
    let mut html = String::from("<html><body>\n");
    for v in versions.keys() {
        html.push_str(&format!("<a href=\"{base}/nexus/{kind}/ged/{v}/\">{v}/</a>\n"));
    }
    html.push_str(&format!(
        "<a href=\"{base}/nexus/{kind}/ged/maven-metadata.xml\">maven-metadata.xml</a>\n</body></html>"
    ));
    html
}

async fn ged_releases(State(state): State<Arc<ServerState>>) -> Response {
    Html(ged_project_page(&state.base, "releases", &state.repo.ged_releases)).into_response()
}

async fn ged_snapshots(State(state): State<Arc<ServerState>>) -> Response {
    Html(ged_project_page(&state.base, "snapshots", &state.repo.ged_snapshots)).into_response()
}

async fn ged_version(
    State(state): State<Arc<ServerState>>,
    UrlPath((kind, version)): UrlPath<(String, String)>,
) -> Response {
    let versions = match kind.as_str() {
        "releases" => &state.repo.ged_releases,
        "snapshots" => &state.repo.ged_snapshots,
        _ => return StatusCode::NOT_FOUND.into_response(),
    };
    match versions.get(&version) {
        Some(Some(jar)) => {
            let url = format!("{}/nexus/{kind}/ged/{version}/{jar}", state.base);
            Html(format!("<html><body>\n<a href=\"{url}\">{jar}</a>\n</body></html>")).into_response()
        }
        Some(None) => {
            let url = format!("{}/nexus/{kind}/ged/{version}/ged-{version}.pom", state.base);
            Html(format!("<html><body>\n<a href=\"{url}\">ged-{version}.pom</a>\n</body></html>"))
                .into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Starts the fake repository on a random local port.
pub async fn start_repository(repo: FakeRepository) -> (SocketAddr, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let state = Arc::new(ServerState {
        repo,
        base: format!("http://{addr}"),
        listed: Mutex::new(BTreeSet::new()),
    });

    let app = Router::new()
        .route("/repo/:artifact", get(artifact_page))
        .route("/repo/:artifact/:version", get(version_page))
        .route("/repo/:artifact/:version/:file", get(artifact_file))
        .route("/nexus/releases/ged/", get(ged_releases))
        .route("/nexus/snapshots/ged/", get(ged_snapshots))
        .route("/nexus/:kind/ged/:version/", get(ged_version))
        .with_state(state);

    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, handle)
}

/// Repository base URL on the fake server.
pub fn repository_url(addr: SocketAddr) -> String {
    format!("http://{addr}/repo")
}

/// A proxy candidate pointing at the fake server.
pub fn live_proxy(addr: SocketAddr) -> ProxyEndpoint {
    ProxyEndpoint::new(addr.ip().to_string(), addr.port())
}

/// A proxy candidate nobody listens on.
pub async fn dead_proxy() -> ProxyEndpoint {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    ProxyEndpoint::new("127.0.0.1", port)
}

/// Creates a temporary directory for testing purposes
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Builds a Quarry against the fake server, behind one dead and one live proxy.
pub async fn build_quarry(addr: SocketAddr, artifacts: &[&str], download_root: &Path) -> Quarry {
    QuarryBuilder::new()
        .repository_url(repository_url(addr))
        .artifacts(artifacts.iter().copied())
        .proxy(dead_proxy().await)
        .proxy(live_proxy(addr))
        .probe_timeout(Duration::from_secs(1))
        .ged_releases_url(format!("http://{addr}/nexus/releases/ged/"))
        .ged_snapshots_url(format!("http://{addr}/nexus/snapshots/ged/"))
        .download_root(download_root.to_path_buf())
        .retention(RetentionPolicy::unbounded())
        .build()
        .expect("Failed to build quarry")
}

/// Polls a job until it leaves the running state.
pub async fn wait_for_job(quarry: &Quarry, id: JobId) -> DownloadJob {
    for _ in 0..500 {
        let job = quarry.job(id).expect("job should exist");
        if job.status.is_terminal() {
            return job;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("job {id} did not finish in time");
}
