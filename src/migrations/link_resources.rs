//! Rebuild the resource set of creature forms created before resources were
//! tracked, by probing the project's asset folders.
//!
//! Naming is kept apart from disk access: the `*_candidates` functions list
//! file names in probe order and [`resolve`] picks the winner given an
//! existence check.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::Result;
use crate::migrations::StepContext;
use crate::model::{Creature, CreatureForm, PartialResources, ResourceSet};
use crate::store::project::Entity;
use crate::store::validate::Validate;

/// Probed in this order; when several exist the last one wins.
pub const DEX_EXTENSIONS: [&str; 2] = [".gif", ".png"];
pub const CRY_EXTENSIONS: [&str; 4] = [".wav", ".ogg", ".mp3", ".flac"];
pub const CHARACTER_EXTENSION: &str = ".png";

pub const CHARACTERS_DIR: &str = "graphics/characters";
pub const CRIES_DIR: &str = "audio/se/cries";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DexFolder {
    Icon,
    Front,
    FrontShiny,
    Back,
    BackShiny,
    Footprint,
}

impl DexFolder {
    pub fn relative_path(self) -> &'static str {
        match self {
            Self::Icon => "graphics/pokedex/pokeicon",
            Self::Front => "graphics/pokedex/pokefront",
            Self::FrontShiny => "graphics/pokedex/pokefrontshiny",
            Self::Back => "graphics/pokedex/pokeback",
            Self::BackShiny => "graphics/pokedex/pokebackshiny",
            Self::Footprint => "graphics/pokedex/footprints",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Variant {
    pub female: bool,
    pub shiny: bool,
}

impl Variant {
    pub const BASE: Self = Self {
        female: false,
        shiny: false,
    };
    pub const FEMALE: Self = Self {
        female: true,
        shiny: false,
    };
    pub const SHINY: Self = Self {
        female: false,
        shiny: true,
    };
    pub const FEMALE_SHINY: Self = Self {
        female: true,
        shiny: true,
    };

    fn markers(self) -> String {
        let mut markers = String::new();
        if self.female {
            markers.push('f');
        }
        if self.shiny {
            markers.push('s');
        }
        markers
    }
}

/// File names tried for one extension, most specific first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateGroup {
    pub extension: &'static str,
    pub names: Vec<String>,
}

impl CandidateGroup {
    fn stem_of(&self, name: &str) -> String {
        name.strip_suffix(self.extension).unwrap_or(name).to_string()
    }
}

/// Dex sprite names: `<id:03><f?><s?>[_<form:02>]<ext>`, each extension
/// trying the form-specific name before the shared one.
pub fn dex_candidates(id: u32, form: u32, variant: Variant) -> Vec<CandidateGroup> {
    let base = format!("{id:03}{}", variant.markers());
    DEX_EXTENSIONS
        .iter()
        .map(|&extension| {
            let mut names = Vec::with_capacity(2);
            if form != 0 {
                names.push(format!("{base}_{form:02}{extension}"));
            }
            names.push(format!("{base}{extension}"));
            CandidateGroup { extension, names }
        })
        .collect()
}

/// Overworld sprite name: literal form index, single extension, no fallback.
pub fn character_candidate(id: u32, form: u32, variant: Variant) -> CandidateGroup {
    CandidateGroup {
        extension: CHARACTER_EXTENSION,
        names: vec![format!(
            "{id:03}{}_{form}{CHARACTER_EXTENSION}",
            variant.markers()
        )],
    }
}

pub fn cry_candidates(id: u32) -> Vec<CandidateGroup> {
    CRY_EXTENSIONS
        .iter()
        .map(|&extension| CandidateGroup {
            extension,
            names: vec![format!("{id:03}cry{extension}")],
        })
        .collect()
}

/// Winning file name: within a group the first existing name, across
/// groups the last group that matched.
pub fn resolve<'g>(
    groups: &'g [CandidateGroup],
    exists: impl Fn(&str) -> bool,
) -> Option<(&'g CandidateGroup, &'g str)> {
    groups
        .iter()
        .filter_map(|group| {
            group
                .names
                .iter()
                .find(|name| exists(name))
                .map(|name| (group, name.as_str()))
        })
        .last()
}

/// Asset lookups for one project.
pub struct ResourceProbe<'p> {
    root: &'p Path,
}

impl<'p> ResourceProbe<'p> {
    pub fn new(root: &'p Path) -> Self {
        Self { root }
    }

    fn find(&self, dir: &str, groups: &[CandidateGroup], keep_extension: bool) -> Option<String> {
        let dir: PathBuf = self.root.join(dir);
        resolve(groups, |name| dir.join(name).is_file()).map(|(group, name)| {
            if keep_extension {
                name.to_string()
            } else {
                group.stem_of(name)
            }
        })
    }

    /// Female lookups that find nothing stay unset; the others fall back to
    /// the empty placeholder.
    fn placeholder(found: Option<String>, variant: Variant) -> Option<String> {
        match found {
            Some(stem) => Some(stem),
            None if variant.female => None,
            None => Some(String::new()),
        }
    }

    pub fn dex(&self, folder: DexFolder, id: u32, form: u32, variant: Variant) -> Option<String> {
        let found = self.find(
            folder.relative_path(),
            &dex_candidates(id, form, variant),
            false,
        );
        Self::placeholder(found, variant)
    }

    pub fn character(&self, id: u32, form: u32, variant: Variant) -> Option<String> {
        let found = self.find(
            CHARACTERS_DIR,
            &[character_candidate(id, form, variant)],
            false,
        );
        Self::placeholder(found, variant)
    }

    /// The cry keeps its extension; none found is the empty placeholder.
    pub fn cry(&self, id: u32) -> String {
        self.find(CRIES_DIR, &cry_candidates(id), true)
            .unwrap_or_default()
    }

    pub fn form_resources(&self, id: u32, form: u32) -> PartialResources {
        use DexFolder::*;

        PartialResources {
            icon: self.dex(Icon, id, form, Variant::BASE),
            icon_f: self.dex(Icon, id, form, Variant::FEMALE),
            icon_shiny: self.dex(Icon, id, form, Variant::SHINY),
            icon_shiny_f: self.dex(Icon, id, form, Variant::FEMALE_SHINY),
            front: self.dex(Front, id, form, Variant::BASE),
            front_f: self.dex(Front, id, form, Variant::FEMALE),
            front_shiny: self.dex(FrontShiny, id, form, Variant::BASE),
            front_shiny_f: self.dex(FrontShiny, id, form, Variant::FEMALE),
            back: self.dex(Back, id, form, Variant::BASE),
            back_f: self.dex(Back, id, form, Variant::FEMALE),
            back_shiny: self.dex(BackShiny, id, form, Variant::BASE),
            back_shiny_f: self.dex(BackShiny, id, form, Variant::FEMALE),
            footprint: self.dex(Footprint, id, form, Variant::BASE),
            character: self.character(id, form, Variant::BASE),
            character_f: self.character(id, form, Variant::FEMALE),
            character_shiny: self.character(id, form, Variant::SHINY),
            character_shiny_f: self.character(id, form, Variant::FEMALE_SHINY),
            cry: Some(self.cry(id)),
        }
    }
}

/// Settle `hasFemale` and turn the probed values into a valid set.
///
/// Forms that are not always female keep the probe result when it is
/// consistent. Otherwise female variants are copied from the base ones and
/// `hasFemale` is forced; if that is still incomplete the fallback set fills
/// the gaps.
pub fn reconcile_female(form: &CreatureForm, mut resources: PartialResources) -> ResourceSet {
    if !form.is_always_female()
        && let Ok(set) = resources.assemble(resources.has_female())
    {
        return set;
    }

    resources.backfill_female();
    if let Ok(set) = resources.assemble(true) {
        return set;
    }

    let set = resources.over_fallback();
    debug_assert!(set.validate().is_ok());
    set
}

/// Link resources on every form that has none. Returns whether anything
/// changed.
pub fn link_creature(probe: &ResourceProbe<'_>, creature: &mut Creature) -> bool {
    let id = creature.id;
    let mut changed = false;
    for form in creature.forms.iter_mut().filter(|form| form.resources.is_none()) {
        let probed = probe.form_resources(id, form.form);
        form.resources = Some(reconcile_female(form, probed));
        changed = true;
    }
    changed
}

pub fn run(ctx: &mut StepContext<'_>) -> Result<()> {
    let project = ctx.project();
    project.remove_cache_file()?;

    let probe = ResourceProbe::new(project.root());
    let mut linked = 0usize;

    for file in project.read_folder(Creature::FOLDER)? {
        let mut parsed = match project.parse_entity::<Creature>(&file) {
            Ok(parsed) => parsed,
            Err(failure) => {
                ctx.skip(&file.path, failure.reason);
                continue;
            }
        };

        if !link_creature(&probe, &mut parsed.value) {
            continue;
        }

        let path = project.write_entity(&parsed.value)?;
        debug!(creature = %parsed.value.db_symbol, path = %path.display(), "linked resources");
        linked += 1;
    }

    info!(linked, "resource linking done");
    Ok(())
}
