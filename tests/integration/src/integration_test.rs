//! End-to-end integration test for the lookup bridge
//!
//! Exercises the complete flow: config discovery -> engine construction ->
//! argument normalization -> hierarchical resolution.

use hiera_core::{Hiera, HieraConfig, LookupEngine, ScopeAdapter};
use hiera_puppet::{
    Error, HieraFunction, LookupEngineProvider, LookupResolver, ResolutionType, Scope, parse_args,
};
use hiera_test_utils::{TestHiera, bindings};
use pretty_assertions::assert_eq;
use serde_json::{Map, Value, json};
use std::fs;

/// Set up a site with node, role, environment and common levels, in the
/// legacy symbol-key config format.
fn setup_site() -> TestHiera {
    let site = TestHiera::new();
    site.write_raw_config(&format!(
        r#"---
:backends:
  - yaml
:logger: console
:merge_behavior: deeper
:hierarchy:
  - "nodes/%{{::fqdn}}"
  - "roles/%{{role}}"
  - "%{{environment}}"
  - common
:yaml:
  :datadir: "{}"
"#,
        site.datadir()
    ));

    site.write_data(
        "nodes/db01.example.com",
        json!({ "postgresql::max_connections": 500 }),
    );
    site.write_data(
        "roles/database",
        json!({
            "classes": ["role::database"],
            "postgresql::max_connections": 200,
            "firewall::rules": { "postgres": { "port": 5432, "sources": ["10.0.0.0/8"] } }
        }),
    );
    site.write_data(
        "production",
        json!({
            "classes": ["profile::backup"],
            "firewall::rules": { "postgres": { "sources": ["192.168.0.0/16"] } },
            "backup::target": "s3://backups/%{environment}/%{fqdn}"
        }),
    );
    site.write_data(
        "common",
        json!({
            "classes": ["profile::base"],
            "postgresql::max_connections": 100,
            "firewall::rules": { "ssh": { "port": 22 } }
        }),
    );
    site
}

fn db01() -> Map<String, Value> {
    bindings(json!({
        "fqdn": "db01.example.com",
        "role": "database",
        "environment": "production"
    }))
}

#[test]
fn test_engine_loads_discovered_config() {
    let site = setup_site();
    let provider = LookupEngineProvider::new()
        .with_candidates(vec![site.alt_datadir("missing.yaml"), site.config_path()]);

    let config = provider.engine_config(&Default::default());
    assert_eq!(config.config_file, Some(site.config_path()));

    let hiera_config = config.to_hiera_config().unwrap();
    assert_eq!(hiera_config.logger, "puppet");
    assert_eq!(hiera_config.hierarchy.len(), 4);
}

#[test]
fn test_full_lookup_flow_from_manifest_call() {
    let site = setup_site();
    let provider = LookupEngineProvider::new().with_candidates(vec![site.config_path()]);
    let resolver = LookupResolver::new(&provider);
    let scope = db01();

    // Manifest call: hiera("postgresql::max_connections") arrives wrapped
    let connections = resolver
        .call(HieraFunction::Hiera, &scope, &[json!(["postgresql::max_connections"])])
        .unwrap();
    assert_eq!(connections, json!(500));

    // Template call: positional arguments
    let target = resolver
        .call(HieraFunction::Hiera, &scope, &[json!("backup::target")])
        .unwrap();
    assert_eq!(target, json!("s3://backups/production/db01.example.com"));

    let classes = resolver.include_classes(&scope, &[json!("classes")]).unwrap();
    assert_eq!(classes, vec!["role::database", "profile::backup", "profile::base"]);

    let rules = resolver
        .call(HieraFunction::HieraHash, &scope, &[json!("firewall::rules")])
        .unwrap();
    assert_eq!(
        rules,
        json!({
            "postgres": { "port": 5432, "sources": ["192.168.0.0/16", "10.0.0.0/8"] },
            "ssh": { "port": 22 }
        })
    );

    assert_eq!(provider.constructions(), 1);
}

#[test]
fn test_node_without_role_falls_through_levels() {
    let site = setup_site();
    let provider = LookupEngineProvider::new().with_candidates(vec![site.config_path()]);
    let resolver = LookupResolver::new(&provider);
    let scope = ScopeAdapter::new(bindings(json!({ "fqdn": "web07.example.com" })));

    let connections = resolver
        .lookup("postgresql::max_connections", None, &scope, None, ResolutionType::Priority)
        .unwrap();
    assert_eq!(connections, json!(100));

    let err = resolver
        .lookup("backup::target", None, &scope, None, ResolutionType::Priority)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Could not find data item backup::target in any Hiera data file and no default supplied"
    );
}

#[test]
fn test_bridge_and_engine_agree() {
    let site = setup_site();
    let provider = LookupEngineProvider::new().with_candidates(vec![site.config_path()]);
    let resolver = LookupResolver::new(&provider);
    let engine = Hiera::new(HieraConfig::load(&site.config_path()).unwrap()).unwrap();
    let scope = db01();
    let adapter = ScopeAdapter::from_scope(&scope as &dyn Scope);

    for key in ["classes", "postgresql::max_connections"] {
        let direct = engine
            .lookup(key, None, &adapter, None, ResolutionType::Array)
            .ok()
            .flatten();
        let bridged = resolver.lookup(key, None, &scope, None, ResolutionType::Array).ok();
        assert_eq!(direct, bridged, "key {key}");
    }
}

#[test]
fn test_broken_data_file_aborts_lookup() {
    let site = setup_site();
    fs::write(
        site.datadir().data_file("production", "yaml").to_native(),
        "classes: [unclosed\n",
    )
    .unwrap();
    let provider = LookupEngineProvider::new().with_candidates(vec![site.config_path()]);
    let resolver = LookupResolver::new(&provider);

    let err = resolver
        .call(HieraFunction::HieraArray, &db01(), &[json!("classes")])
        .unwrap_err();

    assert!(matches!(err, Error::Engine(hiera_core::Error::Fs(_))), "got {:?}", err);
}

#[test]
fn test_parse_args_shapes_agree() {
    let flat = parse_args(&[json!("ntp::servers"), json!(["pool.ntp.org"])]).unwrap();
    let wrapped = parse_args(&[json!(["ntp::servers", ["pool.ntp.org"]])]).unwrap();

    assert_eq!(flat, wrapped);
    assert_eq!(flat.default, Some(json!(["pool.ntp.org"])));
    assert!(matches!(parse_args(&[]), Err(Error::MissingArgument)));
    assert!(matches!(parse_args(&[json!([])]), Err(Error::MissingArgument)));
}
