use oax_core::error::{Error, ParseError, ResolveError};
use oax_core::parse::{self, operation::HttpMethod, schema::SchemaType};

const GET: &str = include_str!("fixtures/get.yml");
const GET_WITH_REFS: &str = include_str!("fixtures/get_with_references.yml");
const POST_WITH_REFS: &str = include_str!("fixtures/post_with_references.yml");
const PETSTORE: &str = include_str!("fixtures/petstore.yml");

#[test]
fn parse_simple_get() {
    let spec = oax_core::load(GET).expect("should load get.yml");
    assert_eq!(spec.info.title, "Sample API");
    assert_eq!(spec.info.version, "0.1.9");
    assert_eq!(spec.servers.len(), 2);

    assert_eq!(spec.paths.keys().next().map(String::as_str), Some("/users"));
    let get = spec.operation("/users", HttpMethod::Get).expect("should have GET");
    assert_eq!(get.responses.keys().next().map(String::as_str), Some("200"));

    let ok = get.responses["200"].as_response().expect("inline response");
    assert_eq!(ok.description.as_deref(), Some("A JSON array of user names"));
    let schema = ok.content["application/json"].schema.as_ref().unwrap();
    assert!(
        schema
            .schema_type
            .as_ref()
            .is_some_and(|t| t.contains(&SchemaType::Array))
    );
}

#[test]
fn parse_keeps_both_artifacts() {
    let parsed = parse::parse_document(GET_WITH_REFS).unwrap();
    let param = parsed.spec.paths["/users/{id}"].get.as_ref().unwrap().parameters[0]
        .as_parameter()
        .unwrap();
    assert_eq!(
        param.schema.as_ref().unwrap().reference.as_deref(),
        Some("#/components/schemas/UserId")
    );
    assert!(parsed.raw.lookup("#/components/schemas/UserId").is_ok());
}

#[test]
fn parse_get_with_references() {
    let spec = oax_core::load(GET_WITH_REFS).unwrap();
    let get = spec.operation("/users/{id}", HttpMethod::Get).unwrap();
    let id = get.parameters[0].as_parameter().unwrap();
    let schema = id.schema.as_ref().unwrap();
    assert!(schema.reference.is_none());
    assert!(
        schema
            .schema_type
            .as_ref()
            .is_some_and(|t| t.contains(&SchemaType::Integer))
    );
    assert_eq!(schema.format.as_deref(), Some("int64"));

    let verbose = get.parameters[1]
        .as_parameter()
        .expect("parameter reference should be inlined");
    assert_eq!(verbose.name, "verbose");
}

#[test]
fn parse_post_with_references() {
    let spec = oax_core::load(POST_WITH_REFS).unwrap();
    let post = spec.operation("/users/", HttpMethod::Post).unwrap();
    let body = post.request_body.as_ref().unwrap();
    assert!(body.reference.is_none());
    assert!(body.required);
    let schema = body.content.values().next().unwrap().schema.as_ref().unwrap();
    assert!(
        schema
            .schema_type
            .as_ref()
            .is_some_and(|t| t.contains(&SchemaType::Integer))
    );
    assert_eq!(
        schema.description.as_deref(),
        Some("A whole number above zero")
    );
}

#[test]
fn parse_petstore_components() {
    let spec = parse::from_yaml(PETSTORE).unwrap();
    let components = spec.components.as_ref().unwrap();
    assert_eq!(components.schemas.len(), 3);
    assert_eq!(components.security_schemes.len(), 1);
    assert_eq!(spec.paths.len(), 5);
    assert!(spec.paths["/pets/{petId}"].put.is_some());
    assert_eq!(spec.operations().count(), 8);
}

#[test]
fn parse_invalid_version() {
    let yaml = r#"
openapi: "2.0.0"
info:
  title: Test
  version: "1.0"
paths: {}
"#;
    let result = parse::from_yaml(yaml);
    assert!(matches!(result, Err(ParseError::UnsupportedFeature(_))));
}

#[test]
fn parse_missing_required_field_reports_path() {
    let yaml = r#"
openapi: 3.0.3
info:
  title: Test
  version: "1.0"
paths:
  /users:
    get:
      summary: no responses
"#;
    match oax_core::load(yaml) {
        Err(Error::Parse(ParseError::Malformed {
            path,
            line,
            message,
            ..
        })) => {
            assert!(path.starts_with("paths"), "path was {path}");
            assert!(message.contains("responses"), "message was {message}");
            assert!(line.is_some());
        }
        other => panic!("expected malformed document, got {other:?}"),
    }
}

#[test]
fn parse_invalid_yaml() {
    let result = oax_core::load("openapi: [3.0\ninfo: {");
    assert!(matches!(
        result,
        Err(Error::Parse(ParseError::Malformed { .. }))
    ));
}

#[test]
fn parse_json_document() {
    let json = r#"{
  "openapi": "3.0.3",
  "info": { "title": "Json", "version": "1" },
  "paths": { "/ping": { "get": { "responses": { "200": { "description": "pong" } } } } }
}"#;
    let spec = oax_core::load(json).unwrap();
    assert!(spec.operation("/ping", HttpMethod::Get).is_some());
}

#[test]
fn unresolved_reference_aborts_load() {
    let yaml = GET_WITH_REFS.replace(
        "#/components/schemas/UserId'\n        - $ref",
        "#/components/schemas/Nope'\n        - $ref",
    );
    match oax_core::load(&yaml) {
        Err(Error::Resolve(ResolveError::UnresolvedReference(reference))) => {
            assert_eq!(reference, "#/components/schemas/Nope");
        }
        other => panic!("expected unresolved reference, got {other:?}"),
    }
}
