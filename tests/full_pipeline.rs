use std::io::Write;

use assetmatch::{AppConfig, AssetMatcher, MatchMethod, MatchStrategy, PromptError};
use tempfile::Builder;

const CATALOG_YAML: &str = r#"
assets:
  - id: telescope
    name: Brass Telescope
    description: A vintage brass telescope on a wooden tripod for stargazing.
    url: https://assets.example/telescope.glb
    tags: [telescope, stargazing, astronomy, brass]
  - id: kettle
    name: Tea Kettle
    description: A whistling stovetop kettle for boiling water.
    url: https://assets.example/kettle.glb
    tags: [kettle, tea, kitchen, Boiling]
"#;

fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
    let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn config_yaml(catalog_path: &str, mode: &str) -> String {
    format!(
        r#"
version: "1.0"
semantic:
  mode: "{mode}"
  model_path: "./no/such/model.onnx"
catalog:
  path: "{catalog_path}"
matcher:
  cache_catalog_embeddings: true
"#
    )
}

#[test]
fn stub_config_matches_against_custom_catalog() {
    let catalog = write_temp(".yaml", CATALOG_YAML);
    let config_file = write_temp(
        ".yaml",
        &config_yaml(&catalog.path().display().to_string(), "stub"),
    );

    let config = AppConfig::from_file(config_file.path()).unwrap();
    let matcher = AssetMatcher::from_config(&config).unwrap();
    assert_eq!(matcher.engine().strategy(), MatchStrategy::Semantic);
    assert_eq!(matcher.engine().catalog().len(), 2);

    let result = matcher
        .match_prompt("a kettle for boiling water for tea")
        .unwrap();
    assert_eq!(result.method, MatchMethod::Semantic);
    assert_eq!(result.asset.id, "kettle");
    assert_eq!(result.asset.url, "https://assets.example/kettle.glb");
}

#[test]
fn missing_model_degrades_to_keyword_only() {
    let catalog = write_temp(".yaml", CATALOG_YAML);
    let config = AppConfig::from_yaml(&config_yaml(
        &catalog.path().display().to_string(),
        "onnx",
    ))
    .unwrap();

    let matcher = AssetMatcher::from_config(&config).unwrap();
    assert_eq!(matcher.engine().strategy(), MatchStrategy::KeywordOnly);

    // Tags were lowercased on load, so "boiling" matches.
    let result = matcher.match_prompt("BOILING some water").unwrap();
    assert_eq!(result.method, MatchMethod::Keyword);
    assert_eq!(result.asset.id, "kettle");

    // No tag or description word: first entry.
    let result = matcher.match_prompt("xyzxyz").unwrap();
    assert_eq!(result.asset.id, "telescope");
}

#[test]
fn json_catalog_files_load() {
    let json = r#"{"assets": [{
        "id": "globe",
        "name": "Globe",
        "description": "A desk globe.",
        "url": "https://assets.example/globe.glb",
        "tags": ["globe", "map"]
    }]}"#;
    let catalog = write_temp(".json", json);

    let mut config = AppConfig::default();
    config.catalog.path = Some(catalog.path().to_path_buf());
    config.semantic.mode = assetmatch::EmbeddingMode::Stub;

    let matcher = AssetMatcher::from_config(&config).unwrap();
    let result = matcher.match_prompt("anything").unwrap();
    assert_eq!(result.asset.id, "globe");
}

#[test]
fn reference_catalog_end_to_end() {
    let mut config = AppConfig::default();
    config.semantic.mode = assetmatch::EmbeddingMode::Stub;
    let matcher = AssetMatcher::from_config(&config).unwrap();

    let result = matcher.match_prompt("a modern vase with flowers").unwrap();
    assert_eq!(result.method, MatchMethod::Semantic);
    assert_eq!(result.asset.id, "vase");

    assert_eq!(matcher.match_prompt(""), Err(PromptError::Empty));
}

#[test]
fn result_serializes_for_callers() {
    let mut config = AppConfig::default();
    config.semantic.mode = assetmatch::EmbeddingMode::Stub;
    let matcher = AssetMatcher::from_config(&config).unwrap();

    let result = matcher.match_prompt("an astronaut in space").unwrap();
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["method"], "semantic");
    assert_eq!(json["asset"]["id"], "astronaut");
    assert!(json["score"].is_number());
}
