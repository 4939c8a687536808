//! Integration test for the OpenAPI loader

use rest_provider_generator_common::{GeneratorError, HttpMethod};
use rest_provider_generator_parser::openapi::{DocumentFormat, OpenApiParser};
use std::fs;
use std::path::Path;

const PODS_JSON: &str = r##"{
    "openapi": "3.0.3",
    "info": { "title": "Kubernetes", "version": "v1.27.0" },
    "servers": [{ "url": "https://kubernetes.default.svc" }],
    "paths": {
        "/api/v1/namespaces/{namespace}/pods/{name}": {
            "parameters": [
                { "name": "namespace", "in": "path", "required": true, "schema": { "type": "string" } },
                { "name": "name", "in": "path", "required": true, "schema": { "type": "string" } },
                { "name": "pretty", "in": "query", "schema": { "type": "string" } }
            ],
            "get": {
                "operationId": "readNamespacedPod",
                "summary": "read the specified Pod",
                "tags": ["core_v1"],
                "responses": {
                    "200": {
                        "description": "OK",
                        "content": {
                            "application/json": {
                                "schema": {
                                    "type": "object",
                                    "properties": {
                                        "kind": { "type": "string", "readOnly": true },
                                        "spec": { "$ref": "#/components/schemas/PodSpec" }
                                    }
                                }
                            }
                        }
                    },
                    "default": { "description": "Error" }
                }
            },
            "delete": {
                "operationId": "deleteNamespacedPod",
                "parameters": [
                    { "name": "name", "in": "path", "required": true, "schema": { "type": "integer" } }
                ],
                "responses": { "202": { "description": "Accepted" } }
            }
        }
    }
}"##;

#[test]
fn test_parse_kubernetes_style_openapi() {
    let parser = OpenApiParser::from_json(PODS_JSON).expect("Failed to parse");
    let spec = parser.spec();

    assert_eq!(spec.info.title, "Kubernetes");
    assert_eq!(spec.path_templates(), vec!["/api/v1/namespaces/{namespace}/pods/{name}"]);

    let path = "/api/v1/namespaces/{namespace}/pods/{name}";
    let get = spec.operation(path, HttpMethod::Get).expect("get operation");
    assert_eq!(get.operation_id.as_deref(), Some("readNamespacedPod"));
    assert!(get.response(200).is_some());

    let schema = get.response(200).unwrap().content["application/json"]
        .schema
        .as_ref()
        .unwrap();
    assert!(schema.properties["kind"].read_only);
    assert_eq!(
        schema.properties["spec"].ref_path.as_deref(),
        Some("#/components/schemas/PodSpec")
    );
}

#[test]
fn test_path_parameters_merge_with_operation_overrides() {
    let spec = OpenApiParser::from_json(PODS_JSON).unwrap().into_spec();
    let item = &spec.paths["/api/v1/namespaces/{namespace}/pods/{name}"];

    let get = item.get.as_ref().unwrap();
    let names: Vec<_> = item.path_parameters(get).iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["namespace", "name"]);

    let delete = item.delete.as_ref().unwrap();
    let params = item.path_parameters(delete);
    assert_eq!(params.len(), 2);
    let name = params.iter().find(|p| p.name == "name").unwrap();
    assert_eq!(
        name.schema.as_ref().unwrap().schema_type.as_deref(),
        Some("integer")
    );
}

#[test]
fn test_from_file_sniffs_format() {
    let dir = tempfile::tempdir().unwrap();

    let json_path = dir.path().join("pods.spec");
    fs::write(&json_path, PODS_JSON).unwrap();
    assert!(OpenApiParser::from_file(&json_path).is_ok());

    let yaml_path = dir.path().join("boards.yml");
    fs::write(
        &yaml_path,
        "openapi: 3.1.0\ninfo:\n  title: Boards\n  version: \"1\"\npaths: {}\n",
    )
    .unwrap();
    let spec = OpenApiParser::from_file(&yaml_path).unwrap().into_spec();
    assert!(spec.paths.is_empty());

    assert_eq!(
        DocumentFormat::detect(Path::new("api"), "  {\"openapi\": \"3.0.0\"}"),
        DocumentFormat::Json
    );
}

#[test]
fn test_missing_file_is_spec_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = OpenApiParser::from_file(dir.path().join("missing.yaml"));
    assert!(matches!(result, Err(GeneratorError::SpecLoad(_))));
}
