pub mod configure;
pub mod migrate;
pub mod run_step;
pub mod steps;

use crate::error::Result;
use crate::migrations::{EventSink, MigrationEvent};
use crate::output::{self, Format};

/// Prints events as they arrive, keeping the first output error for later.
pub(crate) struct PrintSink {
    format: Format,
    error: Option<crate::error::StudioError>,
}

impl PrintSink {
    pub(crate) fn new(format: Format) -> Self {
        Self {
            format,
            error: None,
        }
    }

    pub(crate) fn finish(self) -> Result<()> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl EventSink for PrintSink {
    fn emit(&mut self, event: &MigrationEvent) {
        if let Err(err) = output::print_event(event, self.format)
            && self.error.is_none()
        {
            self.error = Some(err);
        }
    }
}
