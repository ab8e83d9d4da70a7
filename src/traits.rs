use serde::Serialize;

use crate::errors::Result;

/// Types that can be dumped for `--export` style output.
pub trait Exportable {
    fn export(&self) -> Result<String>
    where
        Self: Serialize,
    {
        Ok(serde_yaml::to_string(&self)?)
    }

    fn export_json(&self) -> Result<String>
    where
        Self: Serialize,
    {
        Ok(serde_json::to_string_pretty(&self)?)
    }
}
