//! Writing downloads to disk
//!
//! Project archives are extracted into the output directory; build files
//! are written as they are. Nothing that already exists is overwritten.

use super::fetcher::{Download, InitializrClient};
use crate::action::Action;
use crate::commands::Downloader;
use crate::error::{Error, Result};
use crate::request::RequestParameters;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use tokio::fs;
use zip::ZipArchive;

/// Write a download into `output_dir` and return the project name.
///
/// Archives are named after the file stem (`demo.zip` -> `demo`), build
/// files after the file itself.
pub async fn write_download(download: &Download, output_dir: &Path) -> Result<String> {
    fs::create_dir_all(output_dir)
        .await
        .map_err(|e| Error::download(output_dir.display().to_string(), e))?;

    match download.action {
        Action::ProjectArchive => {
            let written = extract_archive(&download.bytes, output_dir)?;
            tracing::debug!(
                files = written.len(),
                dir = %output_dir.display(),
                "archive extracted"
            );
            Ok(Path::new(&download.file_name)
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| download.file_name.clone()))
        }
        Action::GradleBuild | Action::MavenPom => {
            let target = output_dir.join(&download.file_name);
            let target_str = target.display().to_string();
            if target.exists() {
                return Err(Error::download(target_str, "file already exists"));
            }
            fs::write(&target, &download.bytes)
                .await
                .map_err(|e| Error::download(target_str, e))?;
            Ok(download.file_name.clone())
        }
    }
}

/// Extract every file of a zip archive below `output_dir`.
///
/// Entries escaping the directory are rejected, as is any entry whose
/// target already exists. Both checks run before anything is written.
pub fn extract_archive(bytes: &[u8], output_dir: &Path) -> Result<Vec<PathBuf>> {
    let location = output_dir.display().to_string();
    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).map_err(|e| Error::download(&location, e))?;

    let mut planned: Vec<(usize, PathBuf)> = Vec::new();
    for i in 0..archive.len() {
        let file = archive
            .by_index(i)
            .map_err(|e| Error::download(&location, e))?;
        let relative = file.enclosed_name().ok_or_else(|| {
            Error::download(&location, format!("unsafe path in archive: {}", file.name()))
        })?;
        if file.is_dir() {
            continue;
        }
        let target = output_dir.join(relative);
        if target.exists() {
            return Err(Error::download(
                target.display().to_string(),
                "file already exists",
            ));
        }
        planned.push((i, target));
    }

    let mut written = Vec::with_capacity(planned.len());
    for (i, target) in planned {
        let mut file = archive
            .by_index(i)
            .map_err(|e| Error::download(&location, e))?;
        let target_str = target.display().to_string();

        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent).map_err(|e| Error::download(&target_str, e))?;
        }

        let mut contents = Vec::new();
        file.read_to_end(&mut contents)
            .map_err(|e| Error::download(&target_str, e))?;
        std::fs::write(&target, &contents).map_err(|e| Error::download(&target_str, e))?;

        // keep wrapper scripts (mvnw, gradlew) executable
        #[cfg(unix)]
        if let Some(mode) = file.unix_mode() {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&target, std::fs::Permissions::from_mode(mode & 0o777))
                .map_err(|e| Error::download(&target_str, e))?;
        }

        written.push(target);
    }

    Ok(written)
}

/// Downloads through an [`InitializrClient`] and writes into a directory
pub struct ProjectDownloader<'a> {
    client: &'a InitializrClient,
    output_dir: PathBuf,
}

impl<'a> ProjectDownloader<'a> {
    pub fn new(client: &'a InitializrClient, output_dir: PathBuf) -> Self {
        Self { client, output_dir }
    }
}

impl Downloader for ProjectDownloader<'_> {
    async fn download(&mut self, action: Action, parameters: &RequestParameters) -> Result<String> {
        let download = self.client.fetch_download(action, parameters).await?;
        write_download(&download, &self.output_dir).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn project_zip(entries: &[(&str, &str, u32)]) -> Vec<u8> {
        let mut buffer = Vec::new();
        {
            let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
            for (path, content, mode) in entries {
                let options = SimpleFileOptions::default()
                    .compression_method(zip::CompressionMethod::Deflated)
                    .unix_permissions(*mode);
                zip.start_file(*path, options).unwrap();
                zip.write_all(content.as_bytes()).unwrap();
            }
            zip.finish().unwrap();
        }
        buffer
    }

    fn demo_download() -> Download {
        Download {
            action: Action::ProjectArchive,
            file_name: "demo.zip".to_string(),
            bytes: project_zip(&[
                ("demo/pom.xml", "<project/>", 0o644),
                ("demo/mvnw", "#!/bin/sh", 0o755),
                (
                    "demo/src/main/java/com/example/demo/DemoApplication.java",
                    "class DemoApplication {}",
                    0o644,
                ),
            ]),
        }
    }

    #[tokio::test]
    async fn test_archive_is_extracted_and_named_by_stem() {
        let dir = tempfile::tempdir().unwrap();

        let name = write_download(&demo_download(), dir.path()).await.unwrap();

        assert_eq!(name, "demo");
        assert!(dir.path().join("demo/pom.xml").exists());
        assert!(dir
            .path()
            .join("demo/src/main/java/com/example/demo/DemoApplication.java")
            .exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_archive_keeps_executable_bit() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().unwrap();

        write_download(&demo_download(), dir.path()).await.unwrap();

        let mode = std::fs::metadata(dir.path().join("demo/mvnw"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o111, 0o111);
    }

    #[tokio::test]
    async fn test_existing_project_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("demo")).unwrap();
        std::fs::write(dir.path().join("demo/pom.xml"), "mine").unwrap();

        let err = write_download(&demo_download(), dir.path())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Download { .. }));
        assert_eq!(
            std::fs::read_to_string(dir.path().join("demo/pom.xml")).unwrap(),
            "mine"
        );
        assert!(!dir.path().join("demo/mvnw").exists());
    }

    #[test]
    fn test_unsafe_entry_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let bytes = project_zip(&[("../escape.txt", "nope", 0o644)]);

        let err = extract_archive(&bytes, dir.path()).unwrap_err();

        assert!(err.to_string().contains("unsafe path"));
        assert!(!dir.path().parent().unwrap().join("escape.txt").exists());
    }

    #[test]
    fn test_invalid_archive() {
        let dir = tempfile::tempdir().unwrap();
        let err = extract_archive(b"not a zip", dir.path()).unwrap_err();
        assert!(matches!(err, Error::Download { .. }));
    }

    #[tokio::test]
    async fn test_build_file_written_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let download = Download {
            action: Action::GradleBuild,
            file_name: "build.gradle".to_string(),
            bytes: b"plugins { id 'java' }".to_vec(),
        };

        let name = write_download(&download, dir.path()).await.unwrap();

        assert_eq!(name, "build.gradle");
        assert_eq!(
            std::fs::read_to_string(dir.path().join("build.gradle")).unwrap(),
            "plugins { id 'java' }"
        );

        let err = write_download(&download, dir.path()).await.unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[tokio::test]
    async fn test_project_downloader_round_trip() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/starter.zip")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-disposition", "attachment; filename=\"demo.zip\"")
            .with_body(demo_download().bytes)
            .create_async()
            .await;
        let client = InitializrClient::new(url::Url::parse(&server.url()).unwrap(), "spell-test");
        let dir = tempfile::tempdir().unwrap();

        let mut parameters = RequestParameters::new("maven-project");
        parameters.push(crate::request::RequestParam::BaseDir, "demo");

        let mut downloader = ProjectDownloader::new(&client, dir.path().to_path_buf());
        let name = downloader
            .download(Action::ProjectArchive, &parameters)
            .await
            .unwrap();

        assert_eq!(name, "demo");
        assert!(dir.path().join("demo/mvnw").exists());
    }
}
