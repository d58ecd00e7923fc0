use crate::common::TestEnv;
use puff_cli::orchestrator::{AssumeYes, NoFragments, RemoveOutcome};
use puff_cli::test_utils::ScriptedConfirmer;
use std::fs;

fn seed(env: &TestEnv) {
    env.write_metadata(
        r#"{"metadata":[
            {"path":"owner/plasma","version":"v1"},
            {"path":"owner/other","version":"v3"}
        ]}"#,
    );
    for name in ["plasma", "plasma.bak", "other"] {
        fs::write(env.binary(name), b"bin").unwrap();
    }
}

#[tokio::test]
async fn test_remove_confirmed_deletes_matching_files() {
    let env = TestEnv::new_async().await;
    seed(&env);

    let mut orchestrator = env.orchestrator(NoFragments, AssumeYes);
    let outcome = orchestrator.remove("owner/plasma").await.unwrap();

    assert_eq!(
        outcome,
        RemoveOutcome::Removed {
            files: vec![env.binary("plasma"), env.binary("plasma.bak")],
        }
    );
    assert!(!env.binary("plasma").exists());
    assert!(!env.binary("plasma.bak").exists());
    assert!(env.binary("other").exists());

    let state = env.state();
    assert!(state.find("owner/plasma").is_none());
    assert!(state.find("owner/other").is_some());
}

#[tokio::test]
async fn test_remove_declined_keeps_entry() {
    let env = TestEnv::new_async().await;
    seed(&env);
    let before = env.metadata_bytes();

    let mut confirmer = ScriptedConfirmer::answers(&[true, false]);
    let outcome = {
        let mut orchestrator = env.orchestrator(NoFragments, &mut confirmer);
        orchestrator.remove("owner/plasma").await.unwrap()
    };

    assert_eq!(
        outcome,
        RemoveOutcome::Skipped {
            declined: env.binary("plasma.bak"),
            removed: vec![env.binary("plasma")],
        }
    );
    assert_eq!(confirmer.asked.len(), 2);
    assert!(!env.binary("plasma").exists());
    assert!(env.binary("plasma.bak").exists());
    assert_eq!(env.metadata_bytes(), before);
}

#[tokio::test]
async fn test_remove_unknown_repository() {
    let env = TestEnv::new_async().await;
    seed(&env);

    let mut confirmer = ScriptedConfirmer::default();
    let outcome = {
        let mut orchestrator = env.orchestrator(NoFragments, &mut confirmer);
        orchestrator.remove("owner/missing").await.unwrap()
    };

    assert_eq!(outcome, RemoveOutcome::NotInstalled);
    assert!(confirmer.asked.is_empty());
    assert!(env.binary("plasma").exists());
}

#[tokio::test]
async fn test_remove_with_binary_already_gone() {
    let env = TestEnv::new_async().await;
    env.write_metadata(r#"{"metadata":[{"path":"owner/ghost","version":"v1"}]}"#);

    let mut orchestrator = env.orchestrator(NoFragments, AssumeYes);
    let outcome = orchestrator.remove("owner/ghost").await.unwrap();

    assert_eq!(outcome, RemoveOutcome::Removed { files: Vec::new() });
    assert!(env.state().is_empty());
}
