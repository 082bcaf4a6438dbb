//! GED jar listing on the fake Nexus.

use quarry::{Error, GedJar};

mod common;
use common::helpers::*;

#[tokio::test]
async fn test_list_ged_versions_releases_then_snapshots() {
    let repo = FakeRepository::new()
        .with_ged_release("1.0", "ged-web-front-1.0.jar")
        .with_ged_release("1.1", "ged-web-front-1.1.jar")
        .with_ged_snapshot("1.2-SNAPSHOT", "ged-web-front-1.2-20240101.jar");
    let (addr, _handle) = start_repository(repo).await;
    let dir = create_temp_dir();
    let quarry = build_quarry(addr, &["x"], dir.path()).await;

    let jars = quarry.list_ged_versions().await.unwrap();

    let names: Vec<(&str, bool)> = jars.iter().map(|j| (j.jar.as_str(), j.snapshot)).collect();
    assert_eq!(
        names,
        vec![
            ("ged-web-front-1.0.jar", false),
            ("ged-web-front-1.1.jar", false),
            ("ged-web-front-1.2-20240101.jar", true),
        ]
    );
    assert_eq!(
        jars[0],
        GedJar::from_url(&format!(
            "http://{addr}/nexus/releases/ged/1.0/ged-web-front-1.0.jar"
        ))
    );
}

#[tokio::test]
async fn test_list_ged_versions_empty() {
    let (addr, _handle) = start_repository(FakeRepository::new()).await;
    let dir = create_temp_dir();
    let quarry = build_quarry(addr, &["x"], dir.path()).await;

    assert!(quarry.list_ged_versions().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_ged_versions_page_without_jar() {
    let repo = FakeRepository::new()
        .with_ged_release("1.0", "ged-web-front-1.0.jar")
        .with_ged_release_without_jar("1.1");
    let (addr, _handle) = start_repository(repo).await;
    let dir = create_temp_dir();
    let quarry = build_quarry(addr, &["x"], dir.path()).await;

    let err = quarry.list_ged_versions().await.unwrap_err();
    match err {
        Error::ArtifactNotFound { artifact } => {
            assert_eq!(artifact, format!("http://{addr}/nexus/releases/ged/1.1"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_list_ged_versions_unreachable() {
    let proxy = dead_proxy().await;
    let quarry = quarry::QuarryBuilder::new()
        .repository_url("http://127.0.0.1/repo")
        .artifact("x")
        .ged_releases_url(format!("http://{}/nexus/releases/ged/", proxy))
        .build()
        .unwrap();

    let err = quarry.list_ged_versions().await.unwrap_err();
    assert!(matches!(err, Error::FetchFailed { .. }));
}
