use crate::common::{TestEnv, is_executable};
use puff_cli::core::PuffError;
use puff_cli::orchestrator::{AssumeYes, InstallOutcome, NoFragments};
use puff_cli::test_utils::{ScriptedFragments, tarball};
use std::fs;

const TOOL_ASSETS: &[&str] = &[
    "tool_darwin_amd64.tar.gz",
    "tool_linux_amd64.tar.gz",
    "checksums.txt",
];

#[tokio::test]
async fn test_catalog_install_writes_binary_and_metadata() {
    let mut env = TestEnv::new_async().await;
    let latest = env.latest_mock("acme/tool", "v1.2.0", TOOL_ASSETS).create_async().await;
    let payload = tarball(&[("tool_1.2.0/tool", b"tool v1.2.0"), ("tool_1.2.0/LICENSE", b"MIT")]);
    let download = env
        .download_mock("acme/tool", "tool_linux_amd64.tar.gz", payload)
        .create_async()
        .await;

    let mut orchestrator = env.orchestrator(NoFragments, AssumeYes);
    let outcome = orchestrator.install("acme/tool").await.unwrap();

    assert_eq!(
        outcome,
        InstallOutcome::Installed {
            version: "v1.2.0".to_string()
        }
    );
    assert_eq!(fs::read(env.binary("tool")).unwrap(), b"tool v1.2.0");
    assert!(is_executable(&env.binary("tool")));
    assert!(!env.binary("LICENSE").exists());

    let state = env.state();
    let entry = state.find("acme/tool").unwrap();
    assert_eq!(entry.version, "v1.2.0");
    assert!(entry.name_fragments.is_empty());

    latest.assert_async().await;
    download.assert_async().await;
}

#[tokio::test]
async fn test_same_version_is_not_downloaded_again() {
    let mut env = TestEnv::new_async().await;
    let latest = env
        .latest_mock("acme/tool", "v1.2.0", TOOL_ASSETS)
        .expect(2)
        .create_async()
        .await;
    let download = env
        .download_mock("acme/tool", "tool_linux_amd64.tar.gz", tarball(&[("tool", b"bin")]))
        .expect(1)
        .create_async()
        .await;

    let mut orchestrator = env.orchestrator(NoFragments, AssumeYes);
    orchestrator.install("acme/tool").await.unwrap();
    let before = env.metadata_bytes();

    let outcome = orchestrator.install("acme/tool").await.unwrap();
    assert_eq!(
        outcome,
        InstallOutcome::AlreadyCurrent {
            version: "v1.2.0".to_string()
        }
    );
    assert_eq!(env.metadata_bytes(), before);

    latest.assert_async().await;
    download.assert_async().await;
}

#[tokio::test]
async fn test_new_version_updates_in_place() {
    let mut env = TestEnv::new_async().await;
    env.write_metadata(
        r#"{"metadata":[
            {"path":"other/first","version":"v9"},
            {"path":"acme/tool","version":"v1.1.0"}
        ]}"#,
    );
    let _latest = env.latest_mock("acme/tool", "v1.2.0", TOOL_ASSETS).create_async().await;
    let _download = env
        .download_mock("acme/tool", "tool_linux_amd64.tar.gz", tarball(&[("tool", b"new")]))
        .create_async()
        .await;

    let mut orchestrator = env.orchestrator(NoFragments, AssumeYes);
    let outcome = orchestrator.install("acme/tool").await.unwrap();

    assert_eq!(
        outcome,
        InstallOutcome::Updated {
            previous: "v1.1.0".to_string(),
            version: "v1.2.0".to_string(),
        }
    );
    let state = env.state();
    let paths: Vec<_> = state.entries().iter().map(|e| e.path.as_str()).collect();
    assert_eq!(paths, vec!["other/first", "acme/tool"]);
    assert_eq!(state.find("acme/tool").unwrap().version, "v1.2.0");
}

#[tokio::test]
async fn test_freeform_install_asks_and_stores_fragments() {
    let mut env = TestEnv::new_async().await;
    let assets = ["fzf-0.50-darwin_amd64.tar.gz", "fzf-0.50-linux_amd64.tar.gz", "fzf-0.50-linux_arm64.tar.gz"];
    let _latest = env.latest_mock("junegunn/fzf", "v0.50", &assets).create_async().await;
    let download = env
        .download_mock("junegunn/fzf", "fzf-0.50-linux_amd64.tar.gz", tarball(&[("fzf", b"fzf amd64")]))
        .create_async()
        .await;

    let mut orchestrator = env.orchestrator(ScriptedFragments::default().answer(&["linux", "amd64"]), AssumeYes);
    orchestrator.install("junegunn/fzf").await.unwrap();

    assert_eq!(fs::read(env.binary("fzf")).unwrap(), b"fzf amd64");
    let state = env.state();
    assert_eq!(state.find("junegunn/fzf").unwrap().name_fragments, vec!["linux", "amd64"]);
    download.assert_async().await;
}

#[tokio::test]
async fn test_stored_fragments_are_reused() {
    let mut env = TestEnv::new_async().await;
    env.write_metadata(
        r#"{"metadata":[{"path":"junegunn/fzf","version":"v0.49","name_parts":["linux","arm64"]}]}"#,
    );
    let assets = ["fzf-0.50-linux_amd64.tar.gz", "fzf-0.50-linux_arm64.tar.gz"];
    let _latest = env.latest_mock("junegunn/fzf", "v0.50", &assets).create_async().await;
    let download = env
        .download_mock("junegunn/fzf", "fzf-0.50-linux_arm64.tar.gz", tarball(&[("fzf", b"arm")]))
        .create_async()
        .await;

    let mut orchestrator = env.orchestrator(ScriptedFragments::default(), AssumeYes);
    let outcome = orchestrator.install("junegunn/fzf").await.unwrap();

    assert!(matches!(outcome, InstallOutcome::Updated { .. }));
    assert_eq!(fs::read(env.binary("fzf")).unwrap(), b"arm");
    download.assert_async().await;
}

#[tokio::test]
async fn test_plain_asset_written_verbatim() {
    let mut env = TestEnv::new_async().await;
    let _latest = env
        .latest_mock("owner/single", "v3", &["single-x86_64", "single-aarch64"])
        .create_async()
        .await;
    let _download = env
        .download_mock("owner/single", "single-x86_64", b"#!/bin/sh\necho hi\n".to_vec())
        .create_async()
        .await;

    let mut orchestrator = env.orchestrator(ScriptedFragments::default().answer(&["x86_64"]), AssumeYes);
    orchestrator.install("owner/single").await.unwrap();

    assert_eq!(fs::read(env.binary("single")).unwrap(), b"#!/bin/sh\necho hi\n");
}

#[tokio::test]
async fn test_release_without_assets_installs_nothing() {
    let mut env = TestEnv::new_async().await;
    let _latest = env.latest_mock("owner/empty", "v1", &[]).create_async().await;
    let before = env.metadata_bytes();

    let mut fragments = ScriptedFragments::default();
    let outcome = {
        let mut orchestrator = env.orchestrator(&mut fragments, AssumeYes);
        orchestrator.install("owner/empty").await.unwrap()
    };

    assert_eq!(outcome, InstallOutcome::NothingToInstall);
    assert!(fragments.asked.is_empty());
    assert_eq!(env.metadata_bytes(), before);
    assert!(!env.binary("empty").exists());
}

#[tokio::test]
async fn test_unmatched_fragments_fail_without_side_effects() {
    let mut env = TestEnv::new_async().await;
    let _latest = env.latest_mock("owner/tool", "v1", &["tool-darwin"]).create_async().await;
    let download = env
        .download_mock("owner/tool", "tool-darwin", b"x".to_vec())
        .expect(0)
        .create_async()
        .await;
    let before = env.metadata_bytes();

    let mut orchestrator = env.orchestrator(ScriptedFragments::default().answer(&["windows"]), AssumeYes);
    let err = orchestrator.install("owner/tool").await.unwrap_err();

    assert!(matches!(err, PuffError::NoMatchingAsset { .. }));
    assert_eq!(env.metadata_bytes(), before);
    download.assert_async().await;
}

#[tokio::test]
async fn test_failed_download_leaves_metadata_untouched() {
    let mut env = TestEnv::new_async().await;
    env.write_metadata(r#"{"metadata":[{"path":"acme/tool","version":"v1.0.0"}]}"#);
    let before = env.metadata_bytes();

    let _latest = env.latest_mock("acme/tool", "v1.2.0", TOOL_ASSETS).create_async().await;
    let _download = env
        .server
        .mock("GET", "/dl/acme/tool/tool_linux_amd64.tar.gz")
        .with_status(500)
        .create_async()
        .await;

    let mut orchestrator = env.orchestrator(NoFragments, AssumeYes);
    let err = orchestrator.install("acme/tool").await.unwrap_err();

    assert!(matches!(err, PuffError::ApiError { status: 500, .. }));
    assert_eq!(env.metadata_bytes(), before);
    assert_eq!(env.state().find("acme/tool").unwrap().version, "v1.0.0");
    assert!(!env.binary("tool").exists());
}

#[tokio::test]
async fn test_archive_without_binary_leaves_metadata_untouched() {
    let mut env = TestEnv::new_async().await;
    let _latest = env.latest_mock("acme/tool", "v1.2.0", TOOL_ASSETS).create_async().await;
    let _download = env
        .download_mock("acme/tool", "tool_linux_amd64.tar.gz", tarball(&[("README.md", b"hi")]))
        .create_async()
        .await;
    let before = env.metadata_bytes();

    let mut orchestrator = env.orchestrator(NoFragments, AssumeYes);
    let err = orchestrator.install("acme/tool").await.unwrap_err();

    assert!(matches!(err, PuffError::BinaryNotFoundInArchive { ref binary, .. } if binary == "tool"));
    assert_eq!(env.metadata_bytes(), before);
}

#[tokio::test]
async fn test_install_all_continues_after_failure() {
    let mut env = TestEnv::new_async().await;
    let _missing = env
        .server
        .mock("GET", "/repos/owner/missing/releases/latest")
        .with_status(404)
        .create_async()
        .await;
    let _latest = env.latest_mock("acme/tool", "v1.2.0", TOOL_ASSETS).create_async().await;
    let _download = env
        .download_mock("acme/tool", "tool_linux_amd64.tar.gz", tarball(&[("tool", b"bin")]))
        .create_async()
        .await;

    let mut orchestrator = env.orchestrator(NoFragments, AssumeYes);
    let report = orchestrator
        .install_all(&["owner/missing".to_string(), "not a path".to_string(), "acme/tool".to_string()])
        .await;

    assert_eq!(report.len(), 3);
    assert!(matches!(report[0].1, Err(PuffError::ApiError { status: 404, .. })));
    assert!(matches!(report[1].1, Err(PuffError::InvalidRepoPath { .. })));
    assert!(matches!(report[2].1, Ok(InstallOutcome::Installed { .. })));
    assert_eq!(env.state().len(), 1);
}
