//! End-to-end tests driving a fixture site through attach, render, and
//! asset emission with the default Tera delegate.

use cornice::config::{ComponentsConfig, Environment};
use cornice::plugin::ComponentsPlugin;
use cornice::render::tera::TeraDelegate;
use serde_json::json;
use std::path::Path;
use tempfile::TempDir;

fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

/// A small site with three components: a templated callout, a templated
/// hero, and a static fragment with no metadata at all.
fn fixture_site() -> TempDir {
    let dir = TempDir::new().unwrap();

    write_file(
        dir.path(),
        "components/callout.md",
        r#"---
name: Callout
defaults:
  heading: Default heading
  level: note
css: |
  .callout { border-left: 4px solid; }
js: |
  document.querySelectorAll('.callout').forEach(initCallout);
---
<aside class="callout callout-{{ level }}"><h3>{{ heading }}</h3></aside>"#,
    );

    write_file(
        dir.path(),
        "components/hero.md",
        r#"---
name: Hero Banner
defaults:
  title: Welcome
css: |
  .hero { min-height: 40vh; }
---
<header class="hero"><h1>{{ title }}</h1></header>"#,
    );

    write_file(dir.path(), "components/divider.md", "<hr class=\"divider\">");

    dir
}

async fn attach(site: &TempDir, config: ComponentsConfig) -> ComponentsPlugin<TeraDelegate> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
    ComponentsPlugin::attach(site.path(), config, TeraDelegate::new()).await.unwrap()
}

#[tokio::test]
async fn attach_exposes_collection_in_discovery_order() {
    let site = fixture_site();
    let plugin = attach(&site, ComponentsConfig::default()).await;

    assert_eq!(plugin.collection_name(), "components");
    assert_eq!(plugin.components().len(), 3);

    let names: Vec<&str> = plugin.components().iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["Callout", "divider", "Hero Banner"]);
}

#[tokio::test]
async fn render_overrides_defaults_with_item_fields() {
    let site = fixture_site();
    let plugin = attach(&site, ComponentsConfig::default()).await;

    let out = plugin
        .render_component(&json!({"type": "callout", "heading": "Hi"}), None)
        .await;
    assert_eq!(
        out,
        "<aside class=\"callout callout-note\"><h3>Hi</h3></aside>"
    );
}

#[tokio::test]
async fn render_uses_defaults_when_item_omits_fields() {
    let site = fixture_site();
    let plugin = attach(&site, ComponentsConfig::default()).await;

    let out = plugin.render_component(&json!({"type": "callout"}), None).await;
    assert!(out.contains("Default heading"));
    assert!(out.contains("callout-note"));
}

#[tokio::test]
async fn render_matches_across_name_spellings() {
    let site = fixture_site();
    let plugin = attach(&site, ComponentsConfig::default()).await;

    for requested in ["hero-banner", "Hero Banner", "HERO_BANNER"] {
        let out = plugin
            .render_component(&json!({"type": requested, "title": "Launch"}), None)
            .await;
        assert_eq!(
            out, "<header class=\"hero\"><h1>Launch</h1></header>",
            "failed for requested type {requested:?}"
        );
    }
}

#[tokio::test]
async fn render_sequence_joins_outputs_in_order() {
    let site = fixture_site();
    let plugin = attach(&site, ComponentsConfig::default()).await;

    let out = plugin
        .render_component(
            &json!([
                {"type": "hero-banner", "title": "Top"},
                {"type": "callout", "heading": "Below"}
            ]),
            None,
        )
        .await;

    let parts: Vec<&str> = out.split('\n').collect();
    assert_eq!(parts.len(), 2);
    assert!(parts[0].contains("Top"));
    assert!(parts[1].contains("Below"));
}

#[tokio::test]
async fn render_static_fragment_via_html_dialect() {
    let site = fixture_site();
    let plugin = attach(&site, ComponentsConfig::default()).await;

    let out = plugin
        .render_component(&json!({"type": "divider"}), Some("html"))
        .await;
    assert_eq!(out, "<hr class=\"divider\">");
}

#[tokio::test]
async fn render_failures_are_silent() {
    let site = fixture_site();
    let plugin = attach(&site, ComponentsConfig::default()).await;

    assert_eq!(plugin.render_component(&json!(null), None).await, "");
    assert_eq!(plugin.render_component(&json!({"heading": "no type"}), None).await, "");
    assert_eq!(
        plugin.render_component(&json!({"type": "missing-type"}), None).await,
        ""
    );
    // Unknown dialect fails inside the delegate, still silently.
    assert_eq!(
        plugin
            .render_component(&json!({"type": "callout"}), Some("liquid"))
            .await,
        ""
    );
}

#[tokio::test]
async fn asset_bundles_concatenate_fragments_in_discovery_order() {
    let site = fixture_site();
    let plugin = attach(&site, ComponentsConfig::default()).await;

    let written = plugin.write_asset_bundles().await.unwrap();
    assert_eq!(written.len(), 2);

    let css = std::fs::read_to_string(site.path().join("assets/css/components.css")).unwrap();
    let callout_pos = css.find(".callout").unwrap();
    let hero_pos = css.find(".hero").unwrap();
    assert!(callout_pos < hero_pos, "fragments must keep discovery order");

    let js = std::fs::read_to_string(site.path().join("assets/js/components.js")).unwrap();
    assert!(js.contains("initCallout"));
}

#[tokio::test]
async fn custom_output_directories_are_honored() {
    let site = fixture_site();
    let config = ComponentsConfig {
        css_output: "dist/styles".into(),
        js_output: "dist/scripts".into(),
        ..ComponentsConfig::default()
    };
    let plugin = attach(&site, config).await;

    plugin.write_asset_bundles().await.unwrap();
    assert!(site.path().join("dist/styles/components.css").exists());
    assert!(site.path().join("dist/scripts/components.js").exists());
}

#[tokio::test]
async fn production_exclusion_covers_the_component_glob() {
    let site = fixture_site();
    let config = ComponentsConfig {
        exclude_in_production: true,
        ..ComponentsConfig::default()
    };
    let plugin = attach(&site, config).await;

    assert!(plugin.output_ignore_globs(Environment::Development).is_empty());
    assert_eq!(
        plugin.output_ignore_globs(Environment::Production),
        vec!["components/**/*.md".to_string()]
    );

    // Exclusion only hides sources from output; the filter keeps working.
    let out = plugin.render_component(&json!({"type": "callout"}), None).await;
    assert!(!out.is_empty());
}

#[tokio::test]
async fn empty_site_attaches_cleanly() {
    let dir = TempDir::new().unwrap();
    let plugin = attach(&dir, ComponentsConfig::default()).await;

    assert!(plugin.components().is_empty());
    assert_eq!(plugin.render_component(&json!({"type": "anything"}), None).await, "");
    assert!(plugin.write_asset_bundles().await.unwrap().is_empty());
}
