use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Type of a locally managed job.
///
/// Only some job types can carry a binding to a remote build configuration;
/// see [`JobType::is_parameterized`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum JobType {
    /// Scripted pipeline job.
    Pipeline,
    /// Classic freestyle project.
    Freestyle,
    /// Multi-configuration project.
    Matrix,
    /// Folder grouping other jobs.
    Folder,
    /// Organization folder scanning a source host.
    Organization,
}

impl JobType {
    /// Returns the job type as a static string.
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::Pipeline => "pipeline",
            JobType::Freestyle => "freestyle",
            JobType::Matrix => "matrix",
            JobType::Folder => "folder",
            JobType::Organization => "organization",
        }
    }

    /// Returns `true` for job types that accept build parameters.
    ///
    /// Containers (folders, organizations) never run builds themselves.
    pub fn is_parameterized(&self) -> bool {
        matches!(
            self,
            JobType::Pipeline | JobType::Freestyle | JobType::Matrix
        )
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobType {
    type Err = ModelError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_lowercase();
        match norm.as_str() {
            "pipeline" => Ok(Self::Pipeline),
            "freestyle" => Ok(Self::Freestyle),
            "matrix" => Ok(Self::Matrix),
            "folder" => Ok(Self::Folder),
            "organization" => Ok(Self::Organization),
            _ => Err(ModelError::UnknownJobType(s.to_string())),
        }
    }
}
