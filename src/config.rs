use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::{
    foundation::core::Fps,
    foundation::error::{NinesError, NinesResult},
    widgets::bucket::BucketOpts,
    widgets::calculator::CalculatorOpts,
    widgets::clock::ClockOpts,
    widgets::scale::ScaleOpts,
    widgets::sequence_line::SequenceLineOpts,
};

/// Settings for the demo scenes.
///
/// Every field has a default, so `{}` is a complete configuration file.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub fps: Fps,
    pub bucket: BucketOpts,
    pub scale: ScaleOpts,
    pub clock: ClockOpts,
    pub calculator: CalculatorOpts,
    pub sequence_line: SequenceLineOpts,
}

impl Config {
    /// Parse a configuration from a JSON reader. The result is validated.
    pub fn from_reader<R: std::io::Read>(r: R) -> NinesResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| NinesError::validation(format!("parse config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> NinesResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            NinesError::validation(format!("open config JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn validate(&self) -> NinesResult<()> {
        self.fps.validate()?;
        self.bucket.validate()?;
        self.scale.validate()?;
        self.clock.validate()?;
        self.calculator.validate()?;
        self.sequence_line.validate()?;
        Ok(())
    }

    pub fn to_json_pretty(&self) -> NinesResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| NinesError::serde(e.to_string()))
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
