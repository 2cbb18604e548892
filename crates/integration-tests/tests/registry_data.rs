//! Integration tests for storefronts supplied as data.
//!
//! Run with: cargo test -p market-link-integration-tests --test registry_data

use market_link_core::{
    AppIdentity, Format, LinkRequest, LinkResolver, MarketRegistry, Operation, RegistryError,
    ResolvedLink, ResolverConfig, Rule, Source, Storefront, TemplateSpec, UrlPrefix,
};
use serde_json::json;

const SLIDEME_JSON: &str = r#"{
    "storefronts": [
        {
            "tag": "slideme",
            "show_app": [
                {"source": "package", "format": {"kind": "url", "prefix": "sam://details?id="}}
            ],
            "show_all_by_developer": [
                {"source": "vendor_id", "format": {"kind": "url", "prefix": "sam://search?q="}},
                {
                    "source": "developer_prefix",
                    "name": "package_prefix_search",
                    "format": {"kind": "url", "prefix": "sam://search?q=", "suffix": "&type=dev"}
                }
            ]
        }
    ]
}"#;

#[test]
fn test_registered_storefront_resolves() {
    let mut registry = MarketRegistry::builtin();
    registry.extend_from_json(SLIDEME_JSON).unwrap_or_else(|e| panic!("{e}"));
    let resolver = LinkResolver::new(&registry, ResolverConfig::default());
    let slideme = Storefront::new("SlideMe");

    let request = LinkRequest::show_app(slideme.clone(), AppIdentity::new().with_package("com.evernote"));
    assert_eq!(
        resolver.resolve(&request),
        ResolvedLink::Url("sam://details?id=com.evernote".to_owned())
    );

    let request = LinkRequest::show_all(slideme, AppIdentity::new().with_package("com.evernote"));
    assert_eq!(
        resolver.resolve(&request),
        ResolvedLink::Url("sam://search?q=com&type=dev".to_owned())
    );
}

#[test]
fn test_extension_leaves_builtins_alone() {
    let mut registry = MarketRegistry::builtin();
    registry.extend_from_json(SLIDEME_JSON).unwrap_or_else(|e| panic!("{e}"));
    let resolver = LinkResolver::new(&registry, ResolverConfig::default());

    let request = LinkRequest::show_app(Storefront::GOOGLE, AppIdentity::new().with_package("com.evernote"));
    assert_eq!(
        resolver.resolve(&request),
        ResolvedLink::Url("market://details?id=com.evernote".to_owned())
    );
}

#[test]
fn test_legacy_code_can_be_registered() {
    let mut registry = MarketRegistry::builtin();
    let store = Storefront::from_code(6);
    registry
        .register(
            store.clone(),
            Operation::ShowApp,
            TemplateSpec::new().rule(Rule::new(
                Source::Package,
                Format::Url {
                    prefix: UrlPrefix::Scheme {
                        native: "appgallery://details?id=".to_owned(),
                        web: "https://appgallery.example/app/".to_owned(),
                    },
                    suffix: String::new(),
                },
            )),
        )
        .unwrap_or_else(|e| panic!("{e}"));

    let request = LinkRequest::show_app(store, AppIdentity::new().with_package("com.evernote"));

    let native = LinkResolver::new(&registry, ResolverConfig::default());
    assert_eq!(
        native.resolve(&request),
        ResolvedLink::Url("appgallery://details?id=com.evernote".to_owned())
    );

    let web = LinkResolver::new(&registry, ResolverConfig::default().with_native_scheme(false));
    assert_eq!(
        web.resolve(&request),
        ResolvedLink::Url("https://appgallery.example/app/com.evernote".to_owned())
    );
}

#[test]
fn test_numeric_tag_in_file_is_legacy_code() {
    let mut registry = MarketRegistry::builtin();
    registry
        .extend_from_json(
            &json!({
                "storefronts": [{
                    "tag": "6",
                    "show_app": [
                        {"source": "package", "format": {"kind": "url", "prefix": "appgallery://details?id="}}
                    ]
                }]
            })
            .to_string(),
        )
        .unwrap_or_else(|e| panic!("{e}"));
    let resolver = LinkResolver::new(&registry, ResolverConfig::default());

    let store: Storefront = "6".parse().unwrap_or_else(|e| match e {});
    assert_eq!(store, Storefront::from_code(6));
    let request = LinkRequest::show_app(store, AppIdentity::new().with_package("com.evernote"));
    assert_eq!(
        resolver.resolve(&request),
        ResolvedLink::Url("appgallery://details?id=com.evernote".to_owned())
    );
}

#[test]
fn test_code_zero_in_file_is_reserved() {
    let mut registry = MarketRegistry::builtin();
    let result = registry.extend_from_json(
        &json!({
            "storefronts": [{
                "tag": "0",
                "show_app": [
                    {"source": "package", "format": {"kind": "url", "prefix": "x://"}}
                ]
            }]
        })
        .to_string(),
    );

    assert!(matches!(result, Err(RegistryError::ReservedStorefront)));
    assert_eq!(registry, MarketRegistry::builtin());
}

#[test]
fn test_override_builtin_template() {
    let mut registry = MarketRegistry::builtin();
    registry
        .extend_from_json(
            &json!({
                "storefronts": [{
                    "tag": "blackberry",
                    "show_app": [
                        {"source": "app_id", "format": {"kind": "url", "prefix": "https://appworld.blackberry.com/webstore/content/"}}
                    ]
                }]
            })
            .to_string(),
        )
        .unwrap_or_else(|e| panic!("{e}"));
    let resolver = LinkResolver::new(&registry, ResolverConfig::default());

    let request = LinkRequest::show_app(Storefront::BLACKBERRY, AppIdentity::new().with_app_id("56171"));
    assert_eq!(
        resolver.resolve(&request),
        ResolvedLink::Url("https://appworld.blackberry.com/webstore/content/56171".to_owned())
    );

    // Show-all was not in the file and keeps its built-in template.
    let request = LinkRequest::show_all(Storefront::BLACKBERRY, AppIdentity::new().with_vendor_id("24165"));
    assert_eq!(
        resolver.resolve(&request),
        ResolvedLink::Url("appworld://vendor/24165".to_owned())
    );
}

#[test]
fn test_exported_registry_reloads_identically() {
    let registry = MarketRegistry::builtin();
    let json = serde_json::to_value(registry.to_file()).unwrap_or_else(|e| panic!("{e}"));

    let storefronts = json["storefronts"].as_array().map_or(0, Vec::len);
    assert_eq!(storefronts, 5);

    let reloaded = MarketRegistry::from_json(&json.to_string()).unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(reloaded, registry);
}
