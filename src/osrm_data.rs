//! OSRM dataset preparation for integration tests.
//!
//! Downloads a Geofabrik extract and runs the OSRM docker preprocessing
//! pipeline (extract, partition, customize) so `osrm-routed` can serve the
//! region with the MLD algorithm. Idempotent: existing artifacts are reused.

use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

#[derive(Debug, Clone)]
pub struct OsrmDataConfig {
    /// Geofabrik region path, e.g. "north-america/us/oregon".
    pub region_path: String,
    /// Directory the per-region data directory is created under.
    pub data_root: PathBuf,
}

impl OsrmDataConfig {
    pub fn new(region_path: impl Into<String>, data_root: impl Into<PathBuf>) -> Self {
        Self {
            region_path: region_path.into(),
            data_root: data_root.into(),
        }
    }

    /// Last segment of the region path, e.g. "oregon".
    pub fn region_name(&self) -> &str {
        self.region_path
            .rsplit('/')
            .next()
            .unwrap_or(&self.region_path)
    }

    pub fn extract_url(&self) -> String {
        format!(
            "https://download.geofabrik.de/{}-latest.osm.pbf",
            self.region_path
        )
    }
}

/// A prepared OSRM dataset ready to serve.
#[derive(Debug, Clone)]
pub struct OsrmData {
    /// Directory to bind-mount into the OSRM container as /data.
    pub data_dir: PathBuf,
    /// Path of the `.osrm` dataset base inside `data_dir`.
    pub dataset_base: PathBuf,
}

#[derive(Debug)]
pub enum OsrmDataError {
    Io(io::Error),
    Http(reqwest::Error),
    Process(String),
}

impl From<io::Error> for OsrmDataError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<reqwest::Error> for OsrmDataError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err)
    }
}

impl fmt::Display for OsrmDataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "io error preparing OSRM data: {}", err),
            Self::Http(err) => write!(f, "download failed: {}", err),
            Self::Process(msg) => write!(f, "preprocessing failed: {}", msg),
        }
    }
}

impl std::error::Error for OsrmDataError {}

impl OsrmData {
    /// Ensure the region's dataset exists under the data root, downloading
    /// and preprocessing as needed.
    pub fn prepare(config: &OsrmDataConfig) -> Result<Self, OsrmDataError> {
        let data_root = if config.data_root.is_absolute() {
            config.data_root.clone()
        } else {
            std::env::current_dir()?.join(&config.data_root)
        };
        let data_dir = data_root.join(config.region_name());
        fs::create_dir_all(&data_dir)?;

        let pbf_path = data_dir.join(format!("{}-latest.osm.pbf", config.region_name()));
        if !pbf_path.exists() {
            tracing::info!(url = %config.extract_url(), "downloading Geofabrik extract");
            download(&config.extract_url(), &pbf_path)?;
        }

        let dataset_base = data_dir.join(format!("{}-latest.osrm", config.region_name()));
        if !dataset_base.exists() {
            osrm_backend(
                &data_dir,
                &["osrm-extract", "-p", "/opt/car.lua", &in_container(&pbf_path)],
            )?;
        }

        if !mld_artifacts_present(&dataset_base) {
            osrm_backend(&data_dir, &["osrm-partition", &in_container(&dataset_base)])?;
            osrm_backend(&data_dir, &["osrm-customize", &in_container(&dataset_base)])?;
        }

        Ok(Self {
            data_dir,
            dataset_base,
        })
    }
}

fn download(url: &str, dest: &Path) -> Result<(), OsrmDataError> {
    let response = reqwest::blocking::get(url)?.error_for_status()?;
    let bytes = response.bytes()?;
    // Write via a temp file so a partial download never looks complete.
    let tmp_path = dest.with_extension("tmp");
    let mut writer = BufWriter::new(File::create(&tmp_path)?);
    writer.write_all(&bytes)?;
    writer.flush()?;
    fs::rename(tmp_path, dest)?;
    Ok(())
}

fn mld_artifacts_present(dataset_base: &Path) -> bool {
    ["osrm.partition", "osrm.mldgr", "osrm.cells"]
        .iter()
        .all(|ext| dataset_base.with_extension(ext).exists())
}

fn in_container(path: &Path) -> String {
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    format!("/data/{}", name)
}

fn osrm_backend(data_dir: &Path, args: &[&str]) -> Result<(), OsrmDataError> {
    let status = Command::new("docker")
        .arg("run")
        .arg("--rm")
        .arg("-t")
        .arg("-v")
        .arg(format!("{}:/data", data_dir.display()))
        .arg("osrm/osrm-backend")
        .args(args)
        .status()?;

    if status.success() {
        Ok(())
    } else {
        Err(OsrmDataError::Process(format!(
            "docker {} exited with status {}",
            args.first().copied().unwrap_or("run"),
            status
        )))
    }
}
