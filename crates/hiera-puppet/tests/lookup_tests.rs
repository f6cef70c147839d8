//! Bridged lookups against fixture hierarchies

use hiera_puppet::{
    Error, HieraFunction, LookupEngineProvider, LookupResolver, ResolutionType, Scope, ScopeAdapter,
};
use hiera_test_utils::{TestHiera, bindings};
use pretty_assertions::assert_eq;
use serde_json::{Map, Value, json};

/// Host scope that only exposes its full binding set.
struct NodeFacts {
    facts: Map<String, Value>,
}

impl Scope for NodeFacts {
    fn to_mapping(&self) -> Map<String, Value> {
        self.facts.clone()
    }
}

fn web01() -> Map<String, Value> {
    bindings(json!({
        "fqdn": "web01.example.com",
        "environment": "production"
    }))
}

fn setup() -> TestHiera {
    let hiera = TestHiera::new();
    hiera.write_config(&["nodes/%{fqdn}", "%{environment}", "common"]);
    hiera.write_data(
        "nodes/web01.example.com",
        json!({
            "apache::port": 8080,
            "classes": ["role::web"],
            "packages": { "nginx": "1.24" }
        }),
    );
    hiera.write_data(
        "production",
        json!({
            "classes": ["profile::monitoring"],
            "packages": { "openssl": "3.0" },
            "dns::search": "prod.example.com"
        }),
    );
    hiera.write_data(
        "common",
        json!({
            "apache::port": 80,
            "classes": ["profile::base", "role::web"],
            "packages": { "nginx": "1.18", "curl": "8.0" },
            "dns::search": "example.com"
        }),
    );
    hiera
}

fn provider(hiera: &TestHiera) -> LookupEngineProvider {
    LookupEngineProvider::new().with_candidates(vec![hiera.config_path()])
}

#[test]
fn returns_most_specific_value() {
    let hiera = setup();
    let provider = provider(&hiera);
    let resolver = LookupResolver::new(&provider);

    let port = resolver
        .lookup("apache::port", None, &ScopeAdapter::new(web01()), None, ResolutionType::Priority)
        .unwrap();
    let search = resolver
        .lookup("dns::search", None, &ScopeAdapter::new(web01()), None, ResolutionType::Priority)
        .unwrap();

    assert_eq!(port, json!(8080));
    assert_eq!(search, json!("prod.example.com"));
}

#[test]
fn missing_key_without_default_is_lookup_not_found() {
    let hiera = setup();
    let provider = provider(&hiera);
    let resolver = LookupResolver::new(&provider);

    let err = resolver
        .lookup("missing_key", None, &ScopeAdapter::new(web01()), None, ResolutionType::Priority)
        .unwrap_err();

    match err {
        Error::LookupNotFound { ref key } => assert_eq!(key, "missing_key"),
        other => panic!("expected LookupNotFound, got {:?}", other),
    }
    assert!(err.to_string().contains("missing_key"));
}

#[test]
fn missing_key_with_default_returns_default() {
    let hiera = setup();
    let provider = provider(&hiera);
    let resolver = LookupResolver::new(&provider);

    let value = resolver
        .lookup(
            "missing_key",
            Some(&json!("fallback")),
            &ScopeAdapter::new(web01()),
            None,
            ResolutionType::Priority,
        )
        .unwrap();

    assert_eq!(value, json!("fallback"));
}

#[test]
fn mapping_only_scope_matches_prewrapped_adapter() {
    let hiera = setup();
    let provider = provider(&hiera);
    let resolver = LookupResolver::new(&provider);

    let raw_map = web01();
    let facts = NodeFacts { facts: web01() };
    let adapter = ScopeAdapter::new(web01());

    let scopes: [&dyn Scope; 3] = [&raw_map, &facts, &adapter];
    let answers: Vec<Value> = scopes
        .iter()
        .map(|scope| {
            resolver
                .lookup("apache::port", None, *scope, None, ResolutionType::Priority)
                .unwrap()
        })
        .collect();

    assert_eq!(answers, vec![json!(8080), json!(8080), json!(8080)]);
}

#[test]
fn datadir_override_is_applied_per_call() {
    let hiera = setup();
    let staging = hiera.alt_datadir("staging-data");
    hiera.write_data_in(&staging, "common", "yaml", json!({ "apache::port": 9000 }));
    let provider = provider(&hiera);
    let resolver = LookupResolver::new(&provider);

    let mut first = bindings(json!({ "override_hieradata_dir": hiera.datadir().as_str() }));
    first.insert("fqdn".into(), json!("db01.example.com"));
    let second = bindings(json!({ "override_hieradata_dir": staging.as_str() }));

    let from_first = resolver
        .lookup("apache::port", None, &first, None, ResolutionType::Priority)
        .unwrap();
    let from_second = resolver
        .lookup("apache::port", None, &second, None, ResolutionType::Priority)
        .unwrap();

    assert_eq!(from_first, json!(80));
    assert_eq!(from_second, json!(9000));
    assert!(!provider.is_initialized(), "override engines must not be cached");
}

#[test]
fn override_calls_leave_cached_engine_untouched() {
    let hiera = setup();
    let staging = hiera.alt_datadir("staging-data");
    hiera.write_data_in(&staging, "common", "yaml", json!({ "apache::port": 9000 }));
    let provider = provider(&hiera);
    let resolver = LookupResolver::new(&provider);

    let plain = bindings(json!({}));
    let redirected = bindings(json!({ "override_hieradata_dir": staging.as_str() }));

    let before = resolver
        .lookup("apache::port", None, &plain, None, ResolutionType::Priority)
        .unwrap();
    let during = resolver
        .lookup("apache::port", None, &redirected, None, ResolutionType::Priority)
        .unwrap();
    let after = resolver
        .lookup("apache::port", None, &plain, None, ResolutionType::Priority)
        .unwrap();

    assert_eq!((before, during, after), (json!(80), json!(9000), json!(80)));
    assert_eq!(provider.constructions(), 2);
}

#[test]
fn config_override_redirects_hierarchy() {
    let hiera = setup();
    let alternate = TestHiera::new();
    alternate.write_config(&["%{environment}"]);
    alternate.write_data("production", json!({ "apache::port": 7070 }));
    let provider = provider(&hiera);
    let resolver = LookupResolver::new(&provider);

    let mut scope = web01();
    scope.insert(
        "override_hiera_config".into(),
        json!(alternate.config_path().as_str()),
    );

    let port = resolver
        .lookup("apache::port", None, &scope, None, ResolutionType::Priority)
        .unwrap();

    assert_eq!(port, json!(7070));
}

#[test]
fn config_override_without_yaml_extension_is_read_as_yaml() {
    let hiera = setup();
    let alternate = TestHiera::new();
    alternate.write_data("common", json!({ "apache::port": 6060 }));
    let conf = alternate.alt_datadir("hiera.conf");
    std::fs::write(
        conf.to_native(),
        format!(":hierarchy:\n  - common\n:yaml:\n  :datadir: \"{}\"\n", alternate.datadir()),
    )
    .unwrap();
    let provider = provider(&hiera);
    let resolver = LookupResolver::new(&provider);

    let scope = bindings(json!({ "override_hiera_config": conf.as_str() }));
    let port = resolver
        .lookup("apache::port", None, &scope, None, ResolutionType::Priority)
        .unwrap();

    assert_eq!(port, json!(6060));
}

#[test]
fn empty_order_override_searches_full_hierarchy() {
    let hiera = setup();
    let provider = provider(&hiera);
    let resolver = LookupResolver::new(&provider);

    let port = resolver
        .call(
            HieraFunction::Hiera,
            &ScopeAdapter::new(web01()),
            &[json!(["apache::port", null, ""])],
        )
        .unwrap();

    assert_eq!(port, json!(8080));
}

#[test]
fn engine_errors_pass_through() {
    let hiera = setup();
    let provider = provider(&hiera);
    let resolver = LookupResolver::new(&provider);

    let err = resolver
        .lookup("apache::port", None, &ScopeAdapter::new(web01()), None, ResolutionType::Hash)
        .unwrap_err();

    assert!(
        matches!(err, Error::Engine(hiera_core::Error::TypeMismatch { .. })),
        "got {:?}",
        err
    );
}

#[test]
fn order_override_argument_selects_level() {
    let hiera = setup();
    let provider = provider(&hiera);
    let resolver = LookupResolver::new(&provider);

    let port = resolver
        .call(
            HieraFunction::Hiera,
            &ScopeAdapter::new(web01()),
            &[json!(["apache::port", null, "common"])],
        )
        .unwrap();

    assert_eq!(port, json!(80));
}

#[test]
fn hiera_array_merges_levels() {
    let hiera = setup();
    let provider = provider(&hiera);
    let resolver = LookupResolver::new(&provider);

    let classes = resolver
        .call(HieraFunction::HieraArray, &ScopeAdapter::new(web01()), &[json!("classes")])
        .unwrap();

    assert_eq!(
        classes,
        json!(["role::web", "profile::monitoring", "profile::base"])
    );
}

#[test]
fn hiera_hash_merges_levels() {
    let hiera = setup();
    let provider = provider(&hiera);
    let resolver = LookupResolver::new(&provider);

    let packages = resolver
        .call(HieraFunction::HieraHash, &web01(), &[json!(["packages"])])
        .unwrap();

    assert_eq!(
        packages,
        json!({ "nginx": "1.24", "openssl": "3.0", "curl": "8.0" })
    );
}

#[test]
fn hiera_include_returns_class_names() {
    let hiera = setup();
    let provider = provider(&hiera);
    let resolver = LookupResolver::new(&provider);

    let classes = resolver
        .include_classes(&ScopeAdapter::new(web01()), &[json!("classes")])
        .unwrap();

    assert_eq!(classes, vec!["role::web", "profile::monitoring", "profile::base"]);
}

#[test]
fn hiera_include_rejects_non_string_classes() {
    let hiera = setup();
    hiera.write_data("production", json!({ "classes": [["nested"], 5] }));
    let provider = provider(&hiera);
    let resolver = LookupResolver::new(&provider);

    let err = resolver
        .include_classes(&ScopeAdapter::new(web01()), &[json!("classes")])
        .unwrap_err();

    assert!(matches!(err, Error::InvalidClassName { ref value, .. } if value == "5"), "got {:?}", err);
}

#[test]
fn empty_call_is_missing_argument() {
    let hiera = setup();
    let provider = provider(&hiera);
    let resolver = LookupResolver::new(&provider);

    let err = resolver
        .call(HieraFunction::Hiera, &ScopeAdapter::new(web01()), &[json!([])])
        .unwrap_err();

    assert!(matches!(err, Error::MissingArgument));
    assert_eq!(provider.constructions(), 0);
}
