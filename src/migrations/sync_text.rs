use std::path::PathBuf;

use tracing::info;

use crate::error::Result;
use crate::migrations::StepContext;
use crate::store::text::{TextTable, text_files};

/// Add a column for every declared language a text table lacks. Only
/// modified tables are written; returns their paths.
pub fn sync_languages(ctx: &mut StepContext<'_>, codes: &[String]) -> Result<Vec<PathBuf>> {
    let project = ctx.project();
    let mut updated = Vec::new();

    for path in text_files(&project.texts_dir())? {
        let mut table = TextTable::load(&path)?;
        let mut dirty = false;
        for code in codes {
            if !table.has_language(code) {
                table.add_language(code);
                dirty = true;
            }
        }

        if dirty {
            info!(path = %path.display(), "updating text file languages");
            table.save(&path)?;
            updated.push(path);
        }
    }

    Ok(updated)
}

pub fn run(ctx: &mut StepContext<'_>) -> Result<()> {
    let codes = ctx.project().descriptor()?.language_codes();
    let updated = sync_languages(ctx, &codes)?;
    info!(updated = updated.len(), "text languages synchronized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::project::Project;
    use std::fs;
    use tempfile::tempdir;

    fn fixture(languages: &str) -> (tempfile::TempDir, Project) {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("project.studio"),
            format!(r#"{{"studioVersion": "1.4.0", "languagesTranslation": {languages}}}"#),
        )
        .unwrap();
        let project = Project::open(dir.path()).unwrap();
        fs::create_dir_all(project.texts_dir()).unwrap();
        (dir, project)
    }

    fn run_step(project: &Project) -> Vec<crate::migrations::Warning> {
        let mut warnings = Vec::new();
        let mut ctx = StepContext::new(project, "sync-text-languages", &mut warnings);
        run(&mut ctx).unwrap();
        warnings
    }

    #[test]
    fn appends_missing_languages_in_declared_order() {
        let (_dir, project) = fixture(
            r#"[{"code": "en", "name": "English"}, {"code": "de", "name": "German"}, {"code": "es", "name": "Spanish"}]"#,
        );
        let path = project.texts_dir().join("100000.csv");
        fs::write(&path, "fr,en\nSalut,Hi\nOui,Yes\n").unwrap();

        run_step(&project);

        let table = TextTable::load(&path).unwrap();
        assert_eq!(table.languages(), ["fr", "en", "de", "es"]);
        assert_eq!(table.rows()[0], vec!["Salut", "Hi", "", ""]);
        assert_eq!(table.rows()[1], vec!["Oui", "Yes", "", ""]);
    }

    #[test]
    fn complete_tables_are_not_rewritten() {
        let (_dir, project) = fixture(r#"[{"code": "en", "name": "English"}]"#);
        let path = project.texts_dir().join("1.csv");
        let original = "en\n\"Hi\"\n";
        fs::write(&path, original).unwrap();

        let mut warnings = Vec::new();
        let mut ctx = StepContext::new(&project, "sync-text-languages", &mut warnings);
        let updated = sync_languages(&mut ctx, &["en".to_string()]).unwrap();

        assert!(updated.is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn running_twice_adds_no_duplicate_columns() {
        let (_dir, project) =
            fixture(r#"[{"code": "en", "name": "English"}, {"code": "it", "name": "Italian"}]"#);
        let path = project.texts_dir().join("3.csv");
        fs::write(&path, "en\nA\nB\n").unwrap();

        run_step(&project);
        let first = fs::read_to_string(&path).unwrap();
        run_step(&project);

        assert_eq!(fs::read_to_string(&path).unwrap(), first);
        let table = TextTable::load(&path).unwrap();
        assert_eq!(table.languages(), ["en", "it"]);
    }

    #[test]
    fn empty_texts_stay_at_their_index() {
        let (_dir, project) =
            fixture(r#"[{"code": "en", "name": "English"}, {"code": "fr", "name": "French"}]"#);
        let path = project.texts_dir().join("1.csv");
        fs::write(&path, "en\nA\n\nC\n").unwrap();

        run_step(&project);

        let table = TextTable::load(&path).unwrap();
        assert_eq!(table.languages(), ["en", "fr"]);
        assert_eq!(table.rows(), [vec!["A", ""], vec!["", ""], vec!["C", ""]]);
    }

    #[test]
    fn missing_descriptor_is_fatal() {
        let (_dir, project) = fixture("[]");
        fs::remove_file(project.descriptor_path()).unwrap();

        let mut warnings = Vec::new();
        let mut ctx = StepContext::new(&project, "sync-text-languages", &mut warnings);
        let err = run(&mut ctx).unwrap_err();
        assert_eq!(err.to_string(), "project.studio file not found");
    }
}
