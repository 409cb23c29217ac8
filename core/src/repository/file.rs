use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use tracing::{info, warn};

use crate::model::app_data::AppData;
use crate::repository::traits::AppDataRepository;

const DEFAULT_FILE_NAME: &str = "app_data.json";
const DEFAULT_DIR_NAME: &str = ".parcelcal";

pub fn default_data_dir() -> Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))?;
    Ok(home_dir.join(DEFAULT_DIR_NAME))
}

/// Local JSON snapshot of the whole [`AppData`].
#[derive(Debug, Clone)]
pub struct FileAppDataRepository {
    file_path: PathBuf,
}

impl FileAppDataRepository {
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let mut path = match base_dir {
            Some(dir) => dir,
            None => default_data_dir()?,
        };
        fs::create_dir_all(&path)
            .with_context(|| format!("Could not create data directory {}", path.display()))?;
        path.push(DEFAULT_FILE_NAME);

        Ok(FileAppDataRepository { file_path: path })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn tmp_path(&self) -> PathBuf {
        self.file_path.with_extension("json.tmp")
    }

    fn read_snapshot(&self) -> Result<AppData> {
        let file = File::open(&self.file_path)?;
        let reader = BufReader::new(file);
        let data = serde_json::from_reader(reader)?;
        Ok(data)
    }
}

impl AppDataRepository for FileAppDataRepository {
    /// A missing or unreadable snapshot yields an empty one.
    fn load(&self) -> Result<AppData> {
        if !self.file_path.exists() {
            return Ok(AppData::default());
        }
        match self.read_snapshot() {
            Ok(mut data) => {
                data.normalize();
                Ok(data)
            }
            Err(err) => {
                warn!(
                    path = %self.file_path.display(),
                    error = %err,
                    "failed to parse stored snapshot, starting empty"
                );
                Ok(AppData::default())
            }
        }
    }

    fn save(&self, data: &AppData) -> Result<()> {
        let mut data = data.clone();
        data.normalize();

        // Write beside the snapshot, then swap it in.
        let tmp_path = self.tmp_path();
        let file = File::create(&tmp_path)
            .with_context(|| format!("Could not write {}", tmp_path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &data)?;
        writer.flush()?;
        writer.get_ref().sync_all()?;
        drop(writer);
        fs::rename(&tmp_path, &self.file_path)
            .with_context(|| format!("Could not replace {}", self.file_path.display()))?;

        info!(
            path = %self.file_path.display(),
            counts = data.daily_counts.len(),
            goals = data.monthly_goals.len(),
            holidays = data.holidays.len(),
            "saved snapshot"
        );
        Ok(())
    }
}
