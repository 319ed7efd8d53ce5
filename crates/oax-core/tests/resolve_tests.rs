use oax_core::error::{Error, ResolveError};
use oax_core::parse::operation::HttpMethod;
use oax_core::parse::parameter::ParameterOrRef;
use oax_core::parse::response::ResponseOrRef;
use oax_core::parse::schema::Schema;
use oax_core::parse::spec::Specification;
use oax_core::{parse, resolve};

const GET: &str = include_str!("fixtures/get.yml");
const GET_WITH_REFS: &str = include_str!("fixtures/get_with_references.yml");
const POST_WITH_REFS: &str = include_str!("fixtures/post_with_references.yml");
const PETSTORE: &str = include_str!("fixtures/petstore.yml");
const CYCLIC: &str = include_str!("fixtures/cyclic.yml");

fn all_schemas(spec: &Specification) -> Vec<&Schema> {
    let mut schemas = Vec::new();
    for (_, _, op) in spec.operations() {
        for param in &op.parameters {
            if let ParameterOrRef::Parameter(p) = param {
                schemas.extend(p.schema.as_ref());
            }
        }
        if let Some(body) = &op.request_body {
            schemas.extend(body.content.values().filter_map(|c| c.schema.as_ref()));
        }
        for resp in op.responses.values() {
            if let ResponseOrRef::Response(r) = resp {
                schemas.extend(r.content.values().filter_map(|c| c.schema.as_ref()));
            }
        }
    }
    if let Some(components) = &spec.components {
        schemas.extend(components.schemas.values());
    }
    schemas
}

fn assert_reference_free(spec: &Specification) {
    for (path, method, op) in spec.operations() {
        assert!(
            op.parameters
                .iter()
                .all(|p| matches!(p, ParameterOrRef::Parameter(_))),
            "{method} {path} keeps a parameter reference"
        );
        assert!(
            op.responses
                .values()
                .all(|r| matches!(r, ResponseOrRef::Response(_))),
            "{method} {path} keeps a response reference"
        );
        if let Some(body) = &op.request_body {
            assert!(body.reference.is_none(), "{method} {path} keeps a body reference");
        }
    }
    for schema in all_schemas(spec) {
        assert!(schema.is_resolved(), "unresolved schema: {schema:?}");
    }
}

#[test]
fn resolving_reference_free_document_is_a_no_op() {
    let parsed = parse::parse_document(GET).unwrap();
    let resolved = resolve::resolve(&parsed.spec, &parsed.raw).unwrap();
    assert_eq!(resolved, parsed.spec);
}

#[test]
fn resolution_leaves_input_untouched() {
    let parsed = parse::parse_document(GET_WITH_REFS).unwrap();
    let before = parsed.spec.clone();
    let resolved = resolve::resolve(&parsed.spec, &parsed.raw).unwrap();
    assert_eq!(parsed.spec, before);
    assert_ne!(resolved, before);
}

#[test]
fn resolved_documents_carry_no_references() {
    for doc in [GET_WITH_REFS, POST_WITH_REFS, PETSTORE] {
        let spec = oax_core::load(doc).unwrap();
        assert_reference_free(&spec);
    }
}

#[test]
fn reference_is_replaced_by_resolved_target() {
    let spec = oax_core::load(PETSTORE).unwrap();
    let components = spec.components.as_ref().unwrap();

    let new_pet = &components.schemas["NewPet"];
    assert_eq!(new_pet.properties["owner"], components.schemas["Owner"]);

    let post = spec.operation("/pets", HttpMethod::Post).unwrap();
    let body_schema = post
        .request_body
        .as_ref()
        .unwrap()
        .schema_for("application/json")
        .unwrap();
    assert_eq!(body_schema, new_pet);

    let list = spec.operation("/pets", HttpMethod::Get).unwrap();
    let items = list.responses["200"].as_response().unwrap().content["application/json"]
        .schema
        .as_ref()
        .unwrap()
        .items
        .as_deref()
        .unwrap();
    assert_eq!(items, &components.schemas["Pet"]);
}

#[test]
fn reference_chains_resolve_transitively() {
    let spec = oax_core::load(POST_WITH_REFS).unwrap();
    let components = spec.components.as_ref().unwrap();
    assert_eq!(
        components.schemas["Age"],
        components.schemas["PositiveInteger"]
    );
    let body = spec
        .operation("/users/", HttpMethod::Post)
        .unwrap()
        .request_body
        .as_ref()
        .unwrap();
    assert_eq!(
        body.schema_for("application/json").unwrap(),
        &components.schemas["PositiveInteger"]
    );
}

#[test]
fn missing_target_reports_exact_reference() {
    let yaml = POST_WITH_REFS.replace(
        "'#/components/requestBodies/AgeBody'",
        "'#/components/requestBodies/Gone'",
    );
    let parsed = parse::parse_document(&yaml).unwrap();
    match resolve::resolve(&parsed.spec, &parsed.raw) {
        Err(ResolveError::UnresolvedReference(reference)) => {
            assert_eq!(reference, "#/components/requestBodies/Gone");
        }
        other => panic!("expected unresolved reference, got {other:?}"),
    }
}

#[test]
fn non_local_reference_is_unsupported() {
    let yaml = GET_WITH_REFS.replace(
        "'#/components/parameters/Verbose'",
        "'common.yaml#/components/parameters/Verbose'",
    );
    let result = oax_core::load(&yaml);
    assert!(
        matches!(
            result,
            Err(Error::Resolve(ResolveError::UnsupportedFeature(ref msg)))
                if msg.contains("common.yaml")
        ),
        "got {result:?}"
    );
}

#[test]
fn cyclic_schemas_fail_with_cycle_error() {
    match oax_core::load(CYCLIC) {
        Err(Error::Resolve(ResolveError::CircularReference { reference, chain })) => {
            assert_eq!(reference, "#/components/schemas/Employee");
            assert_eq!(
                chain,
                vec![
                    "#/components/schemas/Employee",
                    "#/components/schemas/Team",
                    "#/components/schemas/Employee",
                ]
            );
        }
        other => panic!("expected circular reference, got {other:?}"),
    }
}
