use chrono::Utc;
use tracing::{debug, info};

use crate::error::Result;
use crate::migrations::StepContext;
use crate::model::StudioMap;
use crate::store::project::Entity;

/// Set every valid map's `mtime` to `mtime` (milliseconds since the epoch).
/// Invalid map files are skipped. Returns the number of maps written.
pub fn stamp_maps(ctx: &mut StepContext<'_>, mtime: i64) -> Result<usize> {
    let project = ctx.project();
    let mut stamped = 0usize;

    for file in project.read_folder(StudioMap::FOLDER)? {
        let mut parsed = match project.parse_entity::<StudioMap>(&file) {
            Ok(parsed) => parsed,
            Err(failure) => {
                ctx.skip(&file.path, failure.reason);
                continue;
            }
        };

        parsed.value.mtime = mtime;
        let path = project.write_entity(&parsed.value)?;
        debug!(map = %parsed.value.db_symbol, path = %path.display(), "stamped map");
        stamped += 1;
    }

    Ok(stamped)
}

/// One timestamp is taken per run and shared by every map.
pub fn run(ctx: &mut StepContext<'_>) -> Result<()> {
    let mtime = Utc::now().timestamp_millis();
    let stamped = stamp_maps(ctx, mtime)?;
    info!(stamped, mtime, "maps stamped");
    Ok(())
}
