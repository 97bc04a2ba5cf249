//! Chrome-for-Testing driver download and cache
//!
//! Archives are laid out as `{base}/{version}/{platform}/chromedriver-{platform}.zip`
//! and contain a single `chromedriver-{platform}/` directory.

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

use crate::config::DriverConfig;
use crate::{Error, Result};

/// Timeout for the archive download
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// A pinned driver build for one platform
#[derive(Debug, Clone)]
pub struct DriverDownload {
    base_url: String,
    version: String,
    platform: String,
    cache_dir: PathBuf,
}

impl DriverDownload {
    /// Describe the download for the host platform
    pub fn for_host(config: &DriverConfig) -> Result<Self> {
        let platform = platform_key(std::env::consts::OS, std::env::consts::ARCH).ok_or_else(|| {
            Error::driver_not_found(format!(
                "no chromedriver build for {}/{}",
                std::env::consts::OS,
                std::env::consts::ARCH
            ))
        })?;

        Ok(Self::new(
            &config.download_base,
            &config.version,
            platform,
            &config.cache_dir,
        ))
    }

    /// Describe a download explicitly
    pub fn new<P: AsRef<Path>>(base_url: &str, version: &str, platform: &str, cache_dir: P) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            version: version.to_string(),
            platform: platform.to_string(),
            cache_dir: cache_dir.as_ref().to_path_buf(),
        }
    }

    /// Archive file name
    pub fn archive_name(&self) -> String {
        format!("chromedriver-{}.zip", self.platform)
    }

    /// Full archive URL
    pub fn archive_url(&self) -> String {
        format!(
            "{}/{}/{}/{}",
            self.base_url,
            self.version,
            self.platform,
            self.archive_name()
        )
    }

    /// Directory the archive is extracted into
    pub fn install_dir(&self) -> PathBuf {
        self.cache_dir.join(&self.version)
    }

    /// Path of the executable after extraction
    pub fn binary_path(&self) -> PathBuf {
        let exe = if self.platform.starts_with("win") {
            "chromedriver.exe"
        } else {
            "chromedriver"
        };
        self.install_dir()
            .join(format!("chromedriver-{}", self.platform))
            .join(exe)
    }

    /// Return the cached executable, downloading it first if needed
    pub async fn ensure(&self) -> Result<PathBuf> {
        let binary = self.binary_path();
        if is_executable(&binary) {
            debug!("Using cached driver {}", binary.display());
            return Ok(binary);
        }

        let url = self.archive_url();
        info!("Downloading driver from {}", url);

        let http = reqwest::Client::builder().timeout(DOWNLOAD_TIMEOUT).build()?;
        let response = http.get(&url).send().await?.error_for_status()?;
        let bytes = response.bytes().await?.to_vec();

        let dest = self.install_dir();
        let target = binary.clone();
        tokio::task::spawn_blocking(move || -> Result<()> {
            extract_archive(&bytes, &dest)?;
            make_executable(&target)
        })
        .await
        .map_err(|e| Error::internal(format!("Extraction task failed: {}", e)))??;

        if !binary.is_file() {
            return Err(Error::archive(format!(
                "{} missing from {}",
                binary.display(),
                self.archive_name()
            )));
        }

        info!("Driver installed at {}", binary.display());
        Ok(binary)
    }
}

/// Chrome-for-Testing platform key for an OS/arch pair
pub fn platform_key(os: &str, arch: &str) -> Option<&'static str> {
    match (os, arch) {
        ("macos", "aarch64") => Some("mac-arm64"),
        ("macos", "x86_64") => Some("mac-x64"),
        ("linux", "x86_64") => Some("linux64"),
        ("windows", "x86") => Some("win32"),
        ("windows", "x86_64") => Some("win64"),
        _ => None,
    }
}

/// Unpack a zip archive held in memory into `dest`
pub fn extract_archive(bytes: &[u8], dest: &Path) -> Result<()> {
    std::fs::create_dir_all(dest)?;
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| Error::archive(format!("zip: {}", e)))?;
    archive
        .extract(dest)
        .map_err(|e| Error::archive(format!("extract: {}", e)))
}

/// Set the executable bit
#[cfg(unix)]
pub fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))?;
    Ok(())
}

/// Set the executable bit
#[cfg(not(unix))]
pub fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}

/// Whether `path` is a file this process may execute
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// Whether `path` is a file this process may execute
#[cfg(not(unix))]
pub fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn zip_with(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut buf);
            let options = zip::write::SimpleFileOptions::default();
            for (name, body) in entries {
                writer.start_file(*name, options).unwrap();
                writer.write_all(body).unwrap();
            }
            writer.finish().unwrap();
        }
        buf.into_inner()
    }

    #[test]
    fn test_platform_keys() {
        assert_eq!(platform_key("macos", "aarch64"), Some("mac-arm64"));
        assert_eq!(platform_key("macos", "x86_64"), Some("mac-x64"));
        assert_eq!(platform_key("linux", "x86_64"), Some("linux64"));
        assert_eq!(platform_key("windows", "x86_64"), Some("win64"));
        assert_eq!(platform_key("linux", "aarch64"), None);
    }

    #[test]
    fn test_archive_layout() {
        let download = DriverDownload::new(
            "https://storage.example/cft/",
            "142.0.7444.175",
            "linux64",
            "/tmp/cache",
        );

        assert_eq!(download.archive_name(), "chromedriver-linux64.zip");
        assert_eq!(
            download.archive_url(),
            "https://storage.example/cft/142.0.7444.175/linux64/chromedriver-linux64.zip"
        );
        assert_eq!(
            download.binary_path(),
            PathBuf::from("/tmp/cache/142.0.7444.175/chromedriver-linux64/chromedriver")
        );
    }

    #[test]
    fn test_extract_archive() {
        let dir = tempfile::tempdir().unwrap();
        let bytes = zip_with(&[("chromedriver-linux64/chromedriver", b"#!/bin/sh\n")]);

        extract_archive(&bytes, dir.path()).unwrap();

        let binary = dir.path().join("chromedriver-linux64/chromedriver");
        assert_eq!(std::fs::read(&binary).unwrap(), b"#!/bin/sh\n");
    }

    #[test]
    fn test_extract_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let err = extract_archive(b"not a zip", dir.path()).unwrap_err();
        assert!(matches!(err, Error::Archive(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_cached_binary_is_reused() {
        let dir = tempfile::tempdir().unwrap();
        // Unroutable base: any download attempt would fail.
        let download = DriverDownload::new("http://127.0.0.1:1", "1.0.0", "linux64", dir.path());
        let binary = download.binary_path();
        std::fs::create_dir_all(binary.parent().unwrap()).unwrap();
        std::fs::write(&binary, b"#!/bin/sh\n").unwrap();
        make_executable(&binary).unwrap();

        assert_eq!(download.ensure().await.unwrap(), binary);
    }
}
