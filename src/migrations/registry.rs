use crate::error::{Result, StudioError};
use crate::migrations::{LINK_RESOURCES, MigrationStep, STAMP_MAPS, SYNC_TEXT_LANGUAGES};

/// Released project versions, oldest first.
pub const RELEASED_VERSIONS: [&str; 12] = [
    "1.0.0", "1.0.1", "1.0.2", "1.1.0", "1.1.1", "1.2.0", "1.3.0", "1.4.0", "1.4.1", "1.4.2",
    "1.4.3", "1.4.4",
];

#[derive(Debug, Clone)]
pub struct VersionEntry {
    pub version: &'static str,
    pub steps: Vec<&'static MigrationStep>,
}

/// Read-only map from a recorded project version to the steps that bring it
/// up to date.
#[derive(Debug, Clone)]
pub struct VersionRegistry {
    entries: Vec<VersionEntry>,
}

impl VersionRegistry {
    /// The registry shipped with this tool.
    pub fn builtin() -> Result<Self> {
        Ok(RegistryBuilder::new(&RELEASED_VERSIONS)
            .append_through(&LINK_RESOURCES, "1.3.0")?
            .append_all(&SYNC_TEXT_LANGUAGES)
            .append_all(&STAMP_MAPS)
            .build())
    }

    /// Steps for a version; an unknown version needs none.
    pub fn steps_for(&self, version: &str) -> &[&'static MigrationStep] {
        self.entries
            .iter()
            .find(|entry| entry.version == version)
            .map(|entry| entry.steps.as_slice())
            .unwrap_or(&[])
    }

    pub fn entries(&self) -> &[VersionEntry] {
        &self.entries
    }

    /// Look a step up by id across all versions.
    pub fn step(&self, id: &str) -> Result<&'static MigrationStep> {
        self.entries
            .iter()
            .flat_map(|entry| entry.steps.iter().copied())
            .find(|step| step.id == id)
            .ok_or_else(|| StudioError::UnknownStep(id.to_string()))
    }
}

/// Registry construction is append-only: a step can only be added at the
/// end of a version's list, so lists already shipped keep their order.
#[derive(Debug)]
pub struct RegistryBuilder {
    entries: Vec<VersionEntry>,
}

impl RegistryBuilder {
    pub fn new(versions: &[&'static str]) -> Self {
        Self {
            entries: versions
                .iter()
                .map(|&version| VersionEntry {
                    version,
                    steps: Vec::new(),
                })
                .collect(),
        }
    }

    /// Append a step to every version.
    pub fn append_all(mut self, step: &'static MigrationStep) -> Self {
        for entry in &mut self.entries {
            entry.steps.push(step);
        }
        self
    }

    /// Append a step to the oldest versions, up to and including `last`.
    pub fn append_through(mut self, step: &'static MigrationStep, last: &str) -> Result<Self> {
        let Some(end) = self.entries.iter().position(|entry| entry.version == last) else {
            return Err(StudioError::UndeclaredVersion(last.to_string()));
        };
        for entry in &mut self.entries[..=end] {
            entry.steps.push(step);
        }
        Ok(self)
    }

    pub fn build(self) -> VersionRegistry {
        VersionRegistry {
            entries: self.entries,
        }
    }
}
