//! Tera-based codegen engine producing the Kotlin client sources

use async_trait::async_trait;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tera::Tera;

use super::kotlin_context::{KotlinContextBuilder, test_class_name};
use crate::generation::{
    Artifact, ArtifactKind, CodegenEngine, CodegenInput, GenerationError, RenderContext,
};
use crate::infrastructure::templates::TemplateBundle;

const MAIN_SOURCES: &str = "src/main/kotlin";
const TEST_SOURCES: &str = "src/test/kotlin";

/// Renders models, API client interfaces and client tests from a template
/// bundle
pub struct TeraCodegenEngine {
    tera: Tera,
}

impl TeraCodegenEngine {
    pub fn new(bundle: &TemplateBundle) -> Result<Self, GenerationError> {
        bundle.validate()?;

        let mut tera = Tera::default();
        for file in bundle.files() {
            tera.add_raw_template(&file.name, &file.content)?;
        }

        Ok(Self { tera })
    }

    fn render_artifact<T: Serialize>(
        &self,
        kind: ArtifactKind,
        package: &str,
        key: &str,
        view: &T,
        path: PathBuf,
    ) -> Result<Artifact, GenerationError> {
        // Every file gets its own package variables
        let mut context = RenderContext::for_file(package);
        context.add_variable(key, serde_json::to_value(view)?);

        let content = self
            .tera
            .render(kind.template_name(), &context.to_tera_context())?;

        tracing::debug!(kind = %kind, path = %path.display(), "Rendered artifact");
        Ok(Artifact {
            path,
            content,
            kind,
        })
    }
}

fn source_file(root: &str, package_path: &Path, class_name: &str) -> PathBuf {
    Path::new(root)
        .join(package_path)
        .join(format!("{class_name}.kt"))
}

#[async_trait]
impl CodegenEngine for TeraCodegenEngine {
    async fn render(&self, input: CodegenInput<'_>) -> Result<Vec<Artifact>, GenerationError> {
        let builder = KotlinContextBuilder::new(input)?;
        let package = input.target.package_name.as_str();
        let package_path = input.target.package_path();
        let mut artifacts = Vec::new();

        for schema_name in &input.properties.models {
            let model = builder.model(schema_name)?;
            let path = source_file(MAIN_SOURCES, &package_path, &model.class_name);
            artifacts.push(self.render_artifact(ArtifactKind::Model, package, "model", &model, path)?);
        }

        for grouping in &input.properties.apis {
            let api = builder.api(grouping)?;
            let path = source_file(MAIN_SOURCES, &package_path, &api.class_name);
            artifacts.push(self.render_artifact(ArtifactKind::Api, package, "api", &api, path)?);

            if input.properties.generate_tests {
                let test_class = test_class_name(&api.class_name);
                let path = source_file(TEST_SOURCES, &package_path, &test_class);
                artifacts.push(self.render_artifact(
                    ArtifactKind::ApiTest,
                    package,
                    "api",
                    &api,
                    path,
                )?);
            }
        }

        Ok(artifacts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::{
        ApiSpecification, GenerationProperties, GenerationTarget, HttpMethod, Operation, PathItem,
        TypeMappingTable,
    };
    use crate::infrastructure::templates::{EmbeddedTemplateLoader, TemplateFile, TemplateLoader, TemplateSource};
    use serde_json::json;
    use std::collections::BTreeSet;

    fn spec() -> ApiSpecification {
        let mut spec = ApiSpecification::empty("3.0.1", "Node", "1.0");
        spec.paths.insert(
            "/cordapps/obligation-cordapp/obligations".to_string(),
            PathItem {
                operations: vec![Operation {
                    method: HttpMethod::Get,
                    operation_id: None,
                    summary: Some("List obligations".to_string()),
                    description: None,
                    tags: Vec::new(),
                    parameters: Vec::new(),
                    request_body: None,
                    request_body_required: false,
                    response: Some(json!({
                        "type": "array",
                        "items": {"$ref": "#/components/schemas/com.example.Obligation"}
                    })),
                    deprecated: false,
                }],
            },
        );
        spec.schemas.insert(
            "com.example.Obligation".to_string(),
            json!({
                "type": "object",
                "required": ["amount"],
                "properties": {
                    "amount": {"$ref": "#/components/schemas/AmountCurrency"},
                    "paid": {"type": "boolean"}
                }
            }),
        );
        spec
    }

    fn properties(generate_tests: bool) -> GenerationProperties {
        GenerationProperties {
            models: BTreeSet::from(["com.example.Obligation".to_string()]),
            apis: BTreeSet::from(["obligation-cordapp".to_string()]),
            generate_tests,
        }
    }

    async fn engine() -> TeraCodegenEngine {
        let bundle = EmbeddedTemplateLoader::new().load().await.unwrap();
        TeraCodegenEngine::new(&bundle).unwrap()
    }

    #[tokio::test]
    async fn test_render_client() {
        let spec = spec();
        let properties = properties(true);
        let mut table = TypeMappingTable::new();
        table.insert("AmountCurrency", "org.web3j.corda.model.AmountCurrency");
        let target = GenerationTarget::new("com.example.client", "/out", true);

        let artifacts = engine()
            .await
            .render(CodegenInput {
                spec: &spec,
                properties: &properties,
                type_mapping: &table,
                target: &target,
                resource_prefix: "/cordapps",
            })
            .await
            .unwrap();

        let paths: Vec<PathBuf> = artifacts.iter().map(|a| a.path.clone()).collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("src/main/kotlin/com/example/client/Obligation.kt"),
                PathBuf::from("src/main/kotlin/com/example/client/ObligationCordapp.kt"),
                PathBuf::from("src/test/kotlin/com/example/client/ObligationCordappTest.kt"),
            ]
        );

        let model = &artifacts[0].content;
        assert!(model.contains("package com.example.client"));
        assert!(model.contains("data class Obligation("));
        assert!(model.contains("val amount: org.web3j.corda.model.AmountCurrency,"));
        assert!(model.contains("val paid: Boolean? = null"));

        let api = &artifacts[1].content;
        assert!(api.contains("package com.example.client"));
        assert!(api.contains("@Path(\"/cordapps/obligation-cordapp\")"));
        assert!(api.contains("interface ObligationCordapp"));
        assert!(api.contains("@GET"));
        assert!(api.contains("fun getObligations(): List<Obligation>"));

        assert_eq!(artifacts[2].kind, ArtifactKind::ApiTest);
        assert!(artifacts[2].content.contains("class ObligationCordappTest"));
    }

    #[tokio::test]
    async fn test_no_test_artifacts_when_disabled() {
        let spec = spec();
        let properties = properties(false);
        let table = TypeMappingTable::new();
        let target = GenerationTarget::new("com.example.client", "/out", false);

        let artifacts = engine()
            .await
            .render(CodegenInput {
                spec: &spec,
                properties: &properties,
                type_mapping: &table,
                target: &target,
                resource_prefix: "/cordapps",
            })
            .await
            .unwrap();

        assert_eq!(artifacts.len(), 2);
        assert!(artifacts.iter().all(|a| a.kind != ArtifactKind::ApiTest));
    }

    #[tokio::test]
    async fn test_broken_template_is_render_error() {
        let mut bundle = EmbeddedTemplateLoader::new().load().await.unwrap();
        bundle.insert(TemplateFile {
            name: "model.kt".to_string(),
            content: "{{ model.missing.field }}".to_string(),
            source: TemplateSource::Embedded,
        });
        let engine = TeraCodegenEngine::new(&bundle).unwrap();

        let spec = spec();
        let properties = properties(false);
        let table = TypeMappingTable::new();
        let target = GenerationTarget::new("com.example.client", "/out", false);

        let err = engine
            .render(CodegenInput {
                spec: &spec,
                properties: &properties,
                type_mapping: &table,
                target: &target,
                resource_prefix: "/cordapps",
            })
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::TemplateRender(_)));
    }

    #[tokio::test]
    async fn test_model_and_client_sharing_a_name_get_distinct_files() {
        let mut spec = spec();
        spec.schemas.insert(
            "com.example.ObligationCordapp".to_string(),
            json!({"type": "object", "properties": {"id": {"type": "string"}}}),
        );
        if let Some(item) = spec.paths.get_mut("/cordapps/obligation-cordapp/obligations") {
            item.operations[0].response =
                Some(json!({"$ref": "#/components/schemas/com.example.ObligationCordapp"}));
        }
        let mut properties = properties(true);
        properties
            .models
            .insert("com.example.ObligationCordapp".to_string());
        let table = TypeMappingTable::new();
        let target = GenerationTarget::new("com.example.client", "/out", true);

        let artifacts = engine()
            .await
            .render(CodegenInput {
                spec: &spec,
                properties: &properties,
                type_mapping: &table,
                target: &target,
                resource_prefix: "/cordapps",
            })
            .await
            .unwrap();

        let paths: BTreeSet<PathBuf> = artifacts.iter().map(|a| a.path.clone()).collect();
        assert_eq!(paths.len(), artifacts.len());
        assert!(paths.contains(&PathBuf::from(
            "src/main/kotlin/com/example/client/ComExampleObligationCordapp.kt"
        )));

        let model = artifacts
            .iter()
            .find(|a| a.kind == ArtifactKind::Model && a.content.contains("val id: String?"))
            .unwrap();
        assert!(model.content.contains("data class ComExampleObligationCordapp("));
        let api = artifacts.iter().find(|a| a.kind == ArtifactKind::Api).unwrap();
        assert!(api.content.contains("interface ObligationCordapp {"));
        assert!(api.content.contains("ComExampleObligationCordapp"));
    }

    #[tokio::test]
    async fn test_groupings_sharing_a_class_name_render_nothing() {
        let spec = spec();
        let mut properties = properties(false);
        properties.apis.insert("obligation_cordapp".to_string());
        let table = TypeMappingTable::new();
        let target = GenerationTarget::new("com.example.client", "/out", false);

        let err = engine()
            .await
            .render(CodegenInput {
                spec: &spec,
                properties: &properties,
                type_mapping: &table,
                target: &target,
                resource_prefix: "/cordapps",
            })
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_invalid_template_syntax_rejected() {
        let mut bundle = TemplateBundle::new();
        for name in ["model.kt", "api.kt", "api_test.kt"] {
            bundle.insert(TemplateFile {
                name: name.to_string(),
                content: "{% if %}".to_string(),
                source: TemplateSource::Embedded,
            });
        }

        assert!(matches!(
            TeraCodegenEngine::new(&bundle),
            Err(GenerationError::TemplateRender(_))
        ));
    }
}
