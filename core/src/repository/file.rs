use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::model::task::Task;
use crate::repository::error::StoreError;
use crate::repository::traits::TaskStore;

const DEFAULT_DIR_NAME: &str = ".taskapi";
const DEFAULT_FILE_NAME: &str = "tasks.json";

/// Stores the task collection as a pretty-printed JSON array in one file.
#[derive(Debug, Clone)]
pub struct FileTaskStore {
    file_path: PathBuf,
}

impl FileTaskStore {
    /// Uses `path` as the backing file, creating its parent directory.
    /// The file itself is created on the first save.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }
        Ok(FileTaskStore { file_path })
    }

    /// Keeps `tasks.json` inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::new(dir.as_ref().join(DEFAULT_FILE_NAME))
    }

    /// `~/.taskapi/tasks.json`, or `None` when the home directory is unknown.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(DEFAULT_DIR_NAME).join(DEFAULT_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn read_tasks(&self) -> Result<Vec<Task>, StoreError> {
        let content = match fs::read_to_string(&self.file_path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::io(&self.file_path, e)),
        };

        if content.trim().is_empty() {
            tracing::warn!(path = %self.file_path.display(), "task file is empty, treating as no tasks");
            return Ok(Vec::new());
        }

        serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
            path: self.file_path.clone(),
            source,
        })
    }

    // Write to a sibling file first and rename it over the target, so a
    // reader never sees a half-written collection.
    fn write_tasks(&self, tasks: &[Task]) -> Result<(), StoreError> {
        let temp_path = self.file_path.with_extension("json.tmp");

        let result = write_temp(&temp_path, tasks).and_then(|()| {
            fs::rename(&temp_path, &self.file_path).map_err(|e| StoreError::io(&self.file_path, e))
        });
        if result.is_err() {
            if let Err(e) = fs::remove_file(&temp_path) {
                if e.kind() != io::ErrorKind::NotFound {
                    tracing::warn!(path = %temp_path.display(), error = %e, "could not remove temporary task file");
                }
            }
        }
        result
    }
}

fn write_temp(temp_path: &Path, tasks: &[Task]) -> Result<(), StoreError> {
    let file = File::create(temp_path).map_err(|e| StoreError::io(temp_path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, tasks)?;
    writer.flush().map_err(|e| StoreError::io(temp_path, e))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| StoreError::io(temp_path, e))
}

impl TaskStore for FileTaskStore {
    fn load(&self) -> Result<Vec<Task>, StoreError> {
        let tasks = self.read_tasks()?;
        tracing::debug!(path = %self.file_path.display(), count = tasks.len(), "loaded tasks");
        Ok(tasks)
    }

    fn save(&self, tasks: &[Task]) -> Result<(), StoreError> {
        self.write_tasks(tasks)?;
        tracing::debug!(path = %self.file_path.display(), count = tasks.len(), "saved tasks");
        Ok(())
    }
}
