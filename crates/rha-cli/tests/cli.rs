//! End-to-end command runs against a scratch repository, capturing stdout.

use rha_cli::{command, run, Outcome, DEFAULT_CONFIG_FILE};
use rha_test_utils::GitRepoFixture;

async fn rha(args: &[&str]) -> (anyhow::Result<Outcome>, String) {
    let matches = command()
        .try_get_matches_from(std::iter::once("rha").chain(args.iter().copied()))
        .unwrap();
    let mut out = Vec::new();
    let result = run(&matches, &mut out).await;
    (result, String::from_utf8(out).unwrap())
}

#[tokio::test]
async fn set_get_del_through_gitroot() {
    let repo = GitRepoFixture::new();
    let cwd = repo.subdir("pkg");
    let cwd = cwd.to_str().unwrap();

    let (result, out) = rha(&["set", "@gitroot/out/a.md", "--content", "hello", "--cwd", cwd]).await;
    assert_eq!(result.unwrap(), Outcome::Success);
    let written: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(written["content"], "hello");
    assert_eq!(written["uri"], repo.uri("out/a.md"));
    assert_eq!(written["hash"].as_str().unwrap().len(), 64);

    let (result, out) = rha(&["get", "@gitroot/out/a.md", "--cwd", cwd]).await;
    assert_eq!(result.unwrap(), Outcome::Success);
    assert!(out.contains("\"hello\""));

    let (result, _) = rha(&["del", "@gitroot/out/a.md", "--cwd", cwd]).await;
    assert_eq!(result.unwrap(), Outcome::Success);

    let (result, out) = rha(&["get", "@gitroot/out/a.md", "--cwd", cwd]).await;
    assert_eq!(result.unwrap(), Outcome::NotFound);
    assert!(out.is_empty());
}

#[tokio::test]
async fn versions_flag_keeps_a_copy() {
    let repo = GitRepoFixture::new();
    let root = repo.root().to_str().unwrap().to_string();
    let (result, _) = rha(&["set", "@gitroot/n.md", "--content", "x", "--versions", "--cwd", &root]).await;
    result.unwrap();
    assert_eq!(repo.files_under(".rhachet/artifact/n").len(), 1);
}

#[tokio::test]
async fn readonly_config_refuses_writes() {
    let repo = GitRepoFixture::new();
    repo.write(DEFAULT_CONFIG_FILE, "access = \"readonly\"\n");
    let root = repo.root().to_str().unwrap().to_string();

    let (result, out) = rha(&["set", "@gitroot/n.md", "--content", "x", "--cwd", &root]).await;
    let err = result.unwrap_err();
    assert!(err.to_string().contains("access denied"));
    assert!(out.is_empty());
    assert!(repo.read("n.md").is_none());
}

#[tokio::test]
async fn decode_prints_json() {
    let (result, out) = rha(&["decode", "a/b.[stories].v1.i3.md"]).await;
    result.unwrap();
    let decoded: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(decoded["doctype"], "stories");
    assert_eq!(decoded["extension"], "md");
}

#[tokio::test]
async fn translate_prints_path() {
    let (result, out) = rha(&[
        "translate",
        "@translate(references.0).as(story)",
        "dir/file.[story].md",
    ])
    .await;
    result.unwrap();
    assert_eq!(out, "dir/file.[story].v1.md\n");
}

#[tokio::test]
async fn resolve_output_rewrites_directive() {
    let step = r#"{"output":"@translate(references.0).as(story)","references":"x/y.[stories].v2.md","keep":1}"#;
    let (result, out) = rha(&["resolve-output", step]).await;
    result.unwrap();
    let resolved: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(resolved["output"], "x/y.v2.[story].v1.md");
    assert_eq!(resolved["keep"], 1);
}

#[tokio::test]
async fn resolve_output_reports_bad_references() {
    let step = r#"{"output":"@translate(references.0).as(story)","references":""}"#;
    let (result, _) = rha(&["resolve-output", step]).await;
    assert!(result.unwrap_err().to_string().contains("references must be a non-empty string"));
}
