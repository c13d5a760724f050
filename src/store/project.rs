use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{Result, StudioError};
use crate::model::ProjectDescriptor;
use crate::store::validate::{Parsed, Validate, ValidationFailure, safe_parse};

pub const DESCRIPTOR_FILE: &str = "project.studio";
pub const CACHE_FILE: &str = "Data/Studio/psdk.dat";
pub const CONFIGS_DIR: &str = "Data/configs";
pub const TEXTS_DIR: &str = "Data/Text/Dialogs";

/// Folders holding one JSON document per entity, named by dbSymbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityFolder {
    Creatures,
    Maps,
}

impl EntityFolder {
    pub fn relative_path(self) -> &'static str {
        match self {
            Self::Creatures => "Data/Studio/pokemon",
            Self::Maps => "Data/Studio/maps",
        }
    }
}

/// A document stored in an [`EntityFolder`].
pub trait Entity: Serialize + DeserializeOwned + Validate {
    const FOLDER: EntityFolder;

    fn db_symbol(&self) -> &str;
}

/// An entity file as read from disk, before validation.
#[derive(Debug, Clone)]
pub struct RawFile {
    pub path: PathBuf,
    pub file_name: String,
    pub data: String,
}

/// Root of a game project on disk.
#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
}

impl Project {
    /// Open an existing project; the descriptor must be present.
    pub fn open(root: &Path) -> Result<Self> {
        if !root.join(DESCRIPTOR_FILE).is_file() {
            return Err(StudioError::ProjectNotFound(root.display().to_string()));
        }
        Ok(Self::at(root))
    }

    /// Address a project directory that may not have a descriptor yet.
    pub fn at(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    pub fn descriptor_path(&self) -> PathBuf {
        self.path(DESCRIPTOR_FILE)
    }

    pub fn config_path(&self, file_name: &str) -> PathBuf {
        self.path(CONFIGS_DIR).join(file_name)
    }

    pub fn texts_dir(&self) -> PathBuf {
        self.path(TEXTS_DIR)
    }

    pub fn folder_path(&self, folder: EntityFolder) -> PathBuf {
        self.path(folder.relative_path())
    }

    pub fn descriptor(&self) -> Result<ProjectDescriptor> {
        read_required(&self.descriptor_path(), DESCRIPTOR_FILE)
    }

    /// Every `*.json` document of a folder, sorted by file name. A missing
    /// folder holds no documents.
    pub fn read_folder(&self, folder: EntityFolder) -> Result<Vec<RawFile>> {
        let dir = self.folder_path(folder);
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let data = fs::read_to_string(&path)?;
            files.push(RawFile {
                file_name: entry.file_name().to_string_lossy().into_owned(),
                path,
                data,
            });
        }

        files.sort_by(|a, b| a.file_name.cmp(&b.file_name));
        Ok(files)
    }

    /// Validate a raw entity file, resolving its canonical write-back path.
    pub fn parse_entity<T: Entity>(
        &self,
        file: &RawFile,
    ) -> std::result::Result<Parsed<T>, ValidationFailure> {
        let value: T = safe_parse(&file.data, &file.file_name)?;
        let path = self.entity_path::<T>(value.db_symbol());
        Ok(Parsed { value, path })
    }

    pub fn entity_path<T: Entity>(&self, db_symbol: &str) -> PathBuf {
        self.folder_path(T::FOLDER).join(format!("{db_symbol}.json"))
    }

    pub fn write_entity<T: Entity>(&self, entity: &T) -> Result<PathBuf> {
        let path = self.entity_path::<T>(entity.db_symbol());
        write_json(&path, entity)?;
        Ok(path)
    }

    /// Delete the pre-generated binary cache so the runtime regenerates it.
    pub fn remove_cache_file(&self) -> Result<bool> {
        let path = self.path(CACHE_FILE);
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path)?;
        debug!(path = %path.display(), "removed binary cache");
        Ok(true)
    }
}

/// Read and validate a document whose absence or corruption is fatal.
pub fn read_required<T>(path: &Path, name: &str) -> Result<T>
where
    T: DeserializeOwned + Validate,
{
    if !path.is_file() {
        return Err(StudioError::MissingFile(name.to_string()));
    }
    let data = fs::read_to_string(path)?;
    safe_parse(&data, name).map_err(|_| StudioError::InvalidDocument(name.to_string()))
}

/// Pretty JSON with two-space indent, the layout the editor writes.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StudioMap;
    use tempfile::tempdir;

    fn project_with_descriptor() -> (tempfile::TempDir, Project) {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(DESCRIPTOR_FILE),
            r#"{"studioVersion": "1.4.0", "languagesTranslation": [{"code": "en", "name": "English"}]}"#,
        )
        .unwrap();
        let project = Project::open(dir.path()).unwrap();
        (dir, project)
    }

    #[test]
    fn open_without_descriptor_fails() {
        let dir = tempdir().unwrap();
        let err = Project::open(dir.path()).unwrap_err();
        assert_eq!(err.code(), "project_not_found");
    }

    #[test]
    fn descriptor_is_read() {
        let (_dir, project) = project_with_descriptor();
        let descriptor = project.descriptor().unwrap();
        assert_eq!(descriptor.studio_version, "1.4.0");
    }

    #[test]
    fn corrupt_descriptor_is_invalid_document() {
        let (_dir, project) = project_with_descriptor();
        fs::write(project.descriptor_path(), "{}").unwrap();
        let err = project.descriptor().unwrap_err();
        assert_eq!(err.to_string(), "Fail to parse project.studio");
    }

    #[test]
    fn read_folder_lists_json_documents_sorted() {
        let (_dir, project) = project_with_descriptor();
        let maps = project.folder_path(EntityFolder::Maps);
        fs::create_dir_all(&maps).unwrap();
        fs::write(maps.join("b.json"), "{}").unwrap();
        fs::write(maps.join("a.json"), "{}").unwrap();
        fs::write(maps.join("notes.txt"), "ignored").unwrap();

        let files = project.read_folder(EntityFolder::Maps).unwrap();
        let names: Vec<_> = files.iter().map(|f| f.file_name.as_str()).collect();
        assert_eq!(names, vec!["a.json", "b.json"]);
    }

    #[test]
    fn missing_folder_is_empty() {
        let (_dir, project) = project_with_descriptor();
        assert!(project.read_folder(EntityFolder::Creatures).unwrap().is_empty());
    }

    #[test]
    fn parse_entity_resolves_canonical_path_from_db_symbol() {
        let (_dir, project) = project_with_descriptor();
        let raw = RawFile {
            path: project.path("Data/Studio/maps/old_name.json"),
            file_name: "old_name.json".into(),
            data: r#"{"dbSymbol": "route_2", "mtime": 0}"#.into(),
        };
        let parsed = project.parse_entity::<StudioMap>(&raw).unwrap();
        assert_eq!(parsed.path, project.path("Data/Studio/maps/route_2.json"));
    }

    #[test]
    fn remove_cache_file_reports_whether_it_existed() {
        let (_dir, project) = project_with_descriptor();
        assert!(!project.remove_cache_file().unwrap());
        let cache = project.path(CACHE_FILE);
        fs::create_dir_all(cache.parent().unwrap()).unwrap();
        fs::write(&cache, [0u8, 1, 2]).unwrap();
        assert!(project.remove_cache_file().unwrap());
        assert!(!cache.exists());
    }
}
