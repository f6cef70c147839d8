//! Backends reading one data file per hierarchy level

use super::{Backend, datasources};
use crate::cache::DataCache;
use crate::config::{HieraConfig, MergeBehavior};
use crate::interpolate::{interpolate, interpolate_value};
use crate::logger::HieraLogger;
use crate::resolution::{Answer, ResolutionType, type_name};
use crate::scope::KeyAddressable;
use crate::{Error, Result};
use hiera_fs::{ConfigFormat, ConfigStore, NormalizedPath, io};
use serde_json::Value;

/// Backend over a directory of `<level>.yaml` or `<level>.json` files.
#[derive(Debug)]
pub struct FileBackend {
    name: &'static str,
    format: ConfigFormat,
    extension: &'static str,
    datadir: String,
    hierarchy: Vec<String>,
    merge_behavior: MergeBehavior,
    logger: HieraLogger,
    cache: DataCache,
}

impl FileBackend {
    pub fn yaml(config: &HieraConfig, logger: HieraLogger) -> Self {
        Self::new("yaml", ConfigFormat::Yaml, "yaml", config, logger)
    }

    pub fn json(config: &HieraConfig, logger: HieraLogger) -> Self {
        Self::new("json", ConfigFormat::Json, "json", config, logger)
    }

    fn new(
        name: &'static str,
        format: ConfigFormat,
        extension: &'static str,
        config: &HieraConfig,
        logger: HieraLogger,
    ) -> Self {
        logger.debug(format_args!("Hiera {name} backend starting"));
        Self {
            name,
            format,
            extension,
            datadir: config.datadir(name),
            hierarchy: config.hierarchy.clone(),
            merge_behavior: config.merge_behavior,
            logger,
            cache: DataCache::new(),
        }
    }

    /// Uninterpolated data directory.
    pub fn datadir(&self) -> &str {
        &self.datadir
    }

    fn load(&self, path: &NormalizedPath) -> Result<Option<Value>> {
        let Some(content) = io::read_text_if_exists(path)? else {
            return Ok(None);
        };
        if content.trim().is_empty() {
            return Ok(None);
        }

        let data: Value = ConfigStore::new().parse(path, self.format, &content)?;
        match data {
            Value::Null => Ok(None),
            Value::Object(_) => Ok(Some(data)),
            other => Err(Error::InvalidDataFile {
                path: path.to_native(),
                found: type_name(&other),
            }),
        }
    }
}

impl Backend for FileBackend {
    fn name(&self) -> &'static str {
        self.name
    }

    fn lookup(
        &self,
        key: &str,
        scope: &dyn KeyAddressable,
        order_override: Option<&str>,
        resolution: ResolutionType,
    ) -> Result<Option<Value>> {
        self.logger.debug(format_args!(
            "Looking up {key} in {} backend",
            self.name.to_uppercase()
        ));

        let datadir = NormalizedPath::new(interpolate(&self.datadir, scope)?);
        let mut answer = Answer::new(key, resolution, self.merge_behavior);

        for source in datasources(&self.hierarchy, order_override, scope, &self.logger)? {
            self.logger.debug(format_args!("Looking for data source {source}"));
            let path = datadir.data_file(&source, self.extension);

            let Some(data) = self.cache.read(&path, |p| self.load(p))? else {
                self.logger.debug(format_args!("Cannot find datafile {path}, skipping"));
                continue;
            };

            let found = match data.get(key) {
                None | Some(Value::Null) => continue,
                Some(found) => interpolate_value(found, scope)?,
            };
            self.logger.debug(format_args!("Found {key} in {source}"));

            if answer.add(found)? {
                break;
            }
        }

        Ok(answer.into_inner())
    }
}
