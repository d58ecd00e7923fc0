use crate::common::TestEnv;
use puff_cli::core::PuffError;
use puff_cli::orchestrator::{AssumeYes, InstallOutcome, NoFragments};
use puff_cli::test_utils::{ScriptedFragments, tarball};
use std::fs;

#[tokio::test]
async fn test_update_all_with_nothing_installed() {
    let env = TestEnv::new_async().await;
    let mut orchestrator = env.orchestrator(NoFragments, AssumeYes);

    let report = orchestrator.update_all().await.unwrap();
    assert!(report.is_empty());
}

#[tokio::test]
async fn test_update_all_keeps_going_and_stored_order() {
    let mut env = TestEnv::new_async().await;
    env.write_metadata(
        r#"{"metadata":[
            {"path":"owner/gone","version":"v1"},
            {"path":"acme/tool","version":"v1.0.0"},
            {"path":"owner/cli","version":"v2","name_parts":["linux"]}
        ]}"#,
    );

    let _gone = env
        .server
        .mock("GET", "/repos/owner/gone/releases/latest")
        .with_status(404)
        .create_async()
        .await;
    let _tool = env
        .latest_mock("acme/tool", "v1.1.0", &["tool_linux_amd64.tar.gz"])
        .create_async()
        .await;
    let _tool_dl = env
        .download_mock("acme/tool", "tool_linux_amd64.tar.gz", tarball(&[("tool", b"1.1.0")]))
        .create_async()
        .await;
    let _cli = env
        .latest_mock("owner/cli", "v2", &["cli-darwin", "cli-linux"])
        .create_async()
        .await;
    let cli_dl = env
        .download_mock("owner/cli", "cli-linux", b"cli".to_vec())
        .expect(0)
        .create_async()
        .await;

    let mut fragments = ScriptedFragments::default();
    let report = {
        let mut orchestrator = env.orchestrator(&mut fragments, AssumeYes);
        orchestrator.update_all().await.unwrap()
    };

    let order: Vec<_> = report.iter().map(|(path, _)| path.as_str()).collect();
    assert_eq!(order, vec!["owner/gone", "acme/tool", "owner/cli"]);
    assert!(matches!(report[0].1, Err(PuffError::ApiError { status: 404, .. })));
    assert!(matches!(report[1].1, Ok(InstallOutcome::Updated { .. })));
    assert!(matches!(report[2].1, Ok(InstallOutcome::AlreadyCurrent { .. })));

    // Stored fragments were reused, nobody was asked.
    assert!(fragments.asked.is_empty());
    cli_dl.assert_async().await;

    assert_eq!(fs::read(env.binary("tool")).unwrap(), b"1.1.0");
    let state = env.state();
    let versions: Vec<_> = state
        .entries()
        .iter()
        .map(|e| (e.path.as_str(), e.version.as_str()))
        .collect();
    assert_eq!(
        versions,
        vec![("owner/gone", "v1"), ("acme/tool", "v1.1.0"), ("owner/cli", "v2")]
    );
}
