//! Command flows: dependency inspection and interactive project creation
//!
//! Both flows take the metadata document and their collaborators as
//! arguments. Nothing here touches the terminal or the network directly.

use crate::action::Action;
use crate::error::{Error, Result};
use crate::metadata::MetadataDocument;
use crate::request::{RequestParam, RequestParameters};
use crate::resolver::{self, DependencyDetails};
use crate::selection::{
    choice_options, dependency_options, grouped_dependency_options, input_text, select_multiple,
    select_single, InputPattern, Prompter,
};
use std::future::Future;

pub const DEFAULT_GROUP_ID: &str = "com.example";
pub const DEFAULT_ARTIFACT_ID: &str = "demo";
pub const DEFAULT_DESCRIPTION: &str = "Demo project for Spring Boot";

/// Executes a generation request and reports the name of what it produced
pub trait Downloader {
    fn download(
        &mut self,
        action: Action,
        parameters: &RequestParameters,
    ) -> impl Future<Output = Result<String>>;
}

/// A fully collected generation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRequest {
    pub action: Action,
    pub parameters: RequestParameters,
}

/// Outcome of `icreate`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedProject {
    pub action: Action,
    pub name: String,
}

impl CreatedProject {
    pub fn confirmation(&self) -> String {
        format!(
            "The {} '{}' is successfully created!",
            self.action.result_noun(),
            self.name
        )
    }
}

/// Pick dependencies and resolve their details
pub fn inspect_dependencies<P: Prompter + ?Sized>(
    metadata: &MetadataDocument,
    prompter: &mut P,
) -> Result<Vec<DependencyDetails>> {
    let options = dependency_options(&metadata.dependencies);
    let ids = select_multiple(prompter, "Dependencies details", &options)?;
    Ok(resolver::describe(&ids, metadata))
}

/// Run the linear prompt sequence and build the request
pub fn collect_project_request<P: Prompter + ?Sized>(
    metadata: &MetadataDocument,
    prompter: &mut P,
) -> Result<ProjectRequest> {
    let project_type = select_single(
        prompter,
        "Project",
        &choice_options(&metadata.project_types),
        metadata.project_types.default_id(),
    )?;
    let token = metadata
        .action_for_type(&project_type)
        .ok_or_else(|| {
            Error::retrieval(
                "metadata",
                format!("project type '{}' declares no action", project_type),
            )
        })?;
    let action = Action::resolve(token)?;

    let mut parameters = RequestParameters::new(&project_type);

    let language = select_single(
        prompter,
        "Language",
        &choice_options(&metadata.languages),
        metadata.languages.default_id(),
    )?;
    parameters.push(RequestParam::Language, language);

    let boot_version = select_single(
        prompter,
        "Spring Boot",
        &choice_options(&metadata.boot_versions),
        metadata.boot_versions.default_id(),
    )?;
    parameters.push(RequestParam::BootVersion, &boot_version);

    let group_id = input_text(
        prompter,
        "Group",
        metadata.group_id.default_or(DEFAULT_GROUP_ID),
        Some(InputPattern::group_id()),
    )?;
    parameters.push(RequestParam::GroupId, &group_id);

    let artifact_id = input_text(
        prompter,
        "Artifact",
        metadata.artifact_id.default_or(DEFAULT_ARTIFACT_ID),
        Some(InputPattern::artifact_id()),
    )?;
    parameters.push(RequestParam::ArtifactId, &artifact_id);

    let name = input_text(prompter, "Name", &artifact_id, None)?;
    parameters
        .push(RequestParam::Name, &name)
        .push(RequestParam::BaseDir, &name);

    let description = input_text(
        prompter,
        "Description",
        metadata.description.default_or(DEFAULT_DESCRIPTION),
        None,
    )?;
    parameters.push(RequestParam::Description, description);

    let package_name = input_text(
        prompter,
        "Package name",
        &format!("{}.{}", group_id, artifact_id),
        None,
    )?;
    parameters.push(RequestParam::PackageName, package_name);

    let packaging = select_single(
        prompter,
        "Packaging",
        &choice_options(&metadata.packaging),
        metadata.packaging.default_id(),
    )?;
    parameters.push(RequestParam::Packaging, packaging);

    let java_version = select_single(
        prompter,
        "Java",
        &choice_options(&metadata.java_versions),
        metadata.java_versions.default_id(),
    )?;
    parameters.push(RequestParam::JavaVersion, java_version);

    let dependencies = select_multiple(
        prompter,
        "Dependencies",
        &grouped_dependency_options(&metadata.dependencies, Some(&boot_version)),
    )?;
    parameters.push_list(RequestParam::Dependencies, &dependencies);

    tracing::debug!(%action, query = %parameters, "collected project request");
    Ok(ProjectRequest { action, parameters })
}

/// Collect the request, then hand it to the downloader
pub async fn create_project<P, D>(
    metadata: &MetadataDocument,
    prompter: &mut P,
    downloader: &mut D,
) -> Result<CreatedProject>
where
    P: Prompter + ?Sized,
    D: Downloader,
{
    let request = collect_project_request(metadata, prompter)?;
    let name = downloader
        .download(request.action, &request.parameters)
        .await?;

    Ok(CreatedProject {
        action: request.action,
        name,
    })
}
