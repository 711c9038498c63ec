use typedwire_codegen_rust::{Generator, ImportStyle};
use typedwire_request::{Error, GenerationRequest, VariantSpec};

fn gateway(tokens: &[&str]) -> GenerationRequest {
    GenerationRequest::builder("Gateway")
        .module("example")
        .variants(tokens.iter().map(|t| t.parse::<VariantSpec>().unwrap()))
        .build()
        .unwrap()
}

fn render(requests: &[GenerationRequest]) -> String {
    Generator::new(requests).render().unwrap()
}

/// Lines of the capability enum body, in order.
fn enum_cases(code: &str) -> Vec<&str> {
    code.lines()
        .skip_while(|l| !l.starts_with("pub enum Gateway"))
        .skip(1)
        .take_while(|l| *l != "}")
        .map(str::trim)
        .collect()
}

#[test]
fn test_identical_requests_render_identically() {
    let a = render(&[gateway(&["user=UserGateway", "orders=OrdersGateway"])]);
    let b = render(&[gateway(&["user=UserGateway", "orders=OrdersGateway"])]);
    assert_eq!(a, b);
}

#[test]
fn test_variant_order_is_preserved() {
    let code = render(&[gateway(&["user=UserGateway", "orders=OrdersGateway"])]);
    insta::assert_snapshot!(enum_cases(&code).join(" "), @"UserGateway(UserGateway), OrdersGateway(OrdersGateway),");

    let reversed = render(&[gateway(&["orders=OrdersGateway", "user=UserGateway"])]);
    insta::assert_snapshot!(enum_cases(&reversed).join(" "), @"OrdersGateway(OrdersGateway), UserGateway(UserGateway),");

    let user = reversed.find("\"user\" => Gateway::UserGateway").unwrap();
    let orders = reversed.find("\"orders\" => Gateway::OrdersGateway").unwrap();
    assert!(orders < user);
}

#[test]
fn test_write_path_emits_tag_then_value() {
    let code = render(&[gateway(&["user=UserGateway"])]);
    assert!(code.contains(
        "Gateway::UserGateway(inner) => ::typedwire_runtime::write_envelope(serializer, Self::NAME, Self::KEYS, <UserGateway as ::typedwire_runtime::Tagged<Gateway>>::TAG, inner),"
    ));
    assert!(code.contains(".ok_or_else(|| ::typedwire_runtime::Error::missing_value(Self::NAME))"));
}

#[test]
fn test_read_path_rejects_unknown_tags() {
    let code = render(&[gateway(&["user=UserGateway"])]);
    assert!(code.contains(
        "other => return Err(::typedwire_runtime::Error::unknown_variant(Self::NAME, other)),"
    ));
    assert!(code.contains("self.gateway = Some(value);"));
}

#[test]
fn test_duplicates_are_rejected_before_emission() {
    let err = GenerationRequest::builder("Gateway")
        .module("example")
        .variant("user=UserGateway".parse().unwrap())
        .variant("User=AdminGateway".parse().unwrap())
        .build()
        .unwrap_err();
    assert!(matches!(*err, Error::DuplicateDiscriminator { .. }));
}

#[test]
fn test_empty_variant_list_still_renders() {
    let code = render(&[gateway(&[])]);
    assert!(code.contains("pub enum Gateway {}"));
    assert!(code.contains("pub struct GatewayTyped {"));
    assert!(!code.contains("impl ::typedwire_runtime::Tagged"));
}

#[test]
fn test_hoisted_imports_are_sorted_and_deduplicated() {
    let requests = [gateway(&["user=crate::gw::UserGateway", "orders=crate::gw::OrdersGateway"])];
    let code = Generator::new(&requests)
        .style(ImportStyle::Hoisted)
        .render()
        .unwrap();

    let uses: Vec<&str> = code.lines().filter(|l| l.starts_with("use ")).collect();
    assert_eq!(
        uses,
        [
            "use crate::gw::{OrdersGateway, UserGateway};",
            "use typedwire_runtime::{Error, Keys, RawEnvelope, Tagged, de_error, ser_error, write_envelope};",
            "use typedwire_runtime::serde::{Deserialize, Deserializer, Serialize, Serializer};",
        ]
    );
    assert!(code.contains("impl Tagged<Gateway> for UserGateway {"));
    assert!(code.contains("impl Serialize for GatewayTyped {"));
    assert!(code.contains("impl<'de> Deserialize<'de> for GatewayTyped {"));
}

#[test]
fn test_several_envelopes_share_one_file() {
    let storage = GenerationRequest::builder("Storage")
        .module("example")
        .tag_key("kind")
        .value_key("spec")
        .variant("Disk".parse().unwrap())
        .build()
        .unwrap();
    let code = render(&[gateway(&["user=UserGateway"]), storage]);

    assert_eq!(code.matches("DO NOT EDIT").count(), 1);
    assert!(code.contains("pub struct GatewayTyped {"));
    assert!(code.contains("pub struct StorageTyped {"));
    assert!(code.contains("::typedwire_runtime::Keys::new(\"kind\", \"spec\")"));
    assert!(code.contains("const TAG: &'static str = \"disk\";"));
}

#[test]
fn test_gateway_file_qualified() {
    let code = render(&[gateway(&["user=UserGateway", "orders=OrdersGateway"])]);
    insta::assert_snapshot!("gateway_qualified", code);
}

#[test]
fn test_gateway_file_hoisted() {
    let requests = [gateway(&["user=crate::gw::UserGateway", "orders=crate::gw::OrdersGateway"])];
    let code = Generator::new(&requests)
        .style(ImportStyle::Hoisted)
        .render()
        .unwrap();
    insta::assert_snapshot!("gateway_hoisted", code);
}

#[test]
fn test_gateway_file_without_variants() {
    let code = render(&[gateway(&[])]);
    insta::assert_snapshot!("gateway_empty", code);
}

#[test]
fn test_variant_named_result_keeps_prelude_result() {
    let requests = [gateway(&["crate::gw::Result", "user=UserGateway"])];
    let code = Generator::new(&requests)
        .style(ImportStyle::Hoisted)
        .render()
        .unwrap();
    assert!(code.contains("    Result(crate::gw::Result),"));
    assert!(code.contains("pub fn tag(&self) -> Result<&'static str, Error> {"));
    assert!(!code.contains("use crate::gw"));

    let local = [gateway(&["Result"])];
    let code = Generator::new(&local)
        .style(ImportStyle::Hoisted)
        .render()
        .unwrap();
    assert!(code.contains("    Result(Result),"));
    assert!(code.contains("-> ::core::result::Result<S::Ok, S::Error>"));
    assert!(!code.contains("-> Result<"));
}

#[test]
fn test_serde_derives_are_refused() {
    let err = GenerationRequest::builder("Gateway")
        .module("example")
        .derives(["Debug", "serde::Serialize"])
        .variant("user=UserGateway".parse().unwrap())
        .build()
        .unwrap_err();
    assert!(matches!(*err, Error::ConflictingDerive { .. }));
}

#[test]
fn test_default_derive_only_on_the_envelope() {
    let request = GenerationRequest::builder("Gateway")
        .module("example")
        .derives(["Debug", "Clone", "PartialEq", "Default"])
        .variant("user=UserGateway".parse().unwrap())
        .build()
        .unwrap();
    let code = render(&[request]);
    assert!(code.contains("#[derive(Debug, Clone, PartialEq)]\npub enum Gateway {"));
    assert!(code.contains("#[derive(Debug, Clone, PartialEq, Default)]\npub struct GatewayTyped {"));
}
