//! Build-matrix loading and entry lookup.
//!
//! The matrix file is a JSON object mapping an application name to a list of
//! build entries, each naming the boards it targets and the extra arguments
//! handed to the build script:
//!
//! ```json
//! { "exampleApp": [ { "boards": ["board1"], "arguments": ["arg1", "arg2"] } ] }
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// One build configuration for an application.
#[derive(Debug, Clone, Deserialize)]
pub struct BuildEntry {
    /// Target boards, in order. Only the first board is built.
    pub boards: Vec<String>,

    /// Opaque tokens passed to the build script verbatim, in order.
    #[serde(default)]
    pub arguments: Vec<String>,
}

/// Mapping from application name to its build entries.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct BuildMatrix {
    apps: BTreeMap<String, Vec<BuildEntry>>,
}

/// Read and parse the build matrix at `path`.
///
/// Anything that is not an object of `name -> [{boards, arguments}]` is
/// rejected at parse time.
pub fn load(path: &Path) -> Result<BuildMatrix> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read build matrix {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse build matrix {}", path.display()))
}

impl BuildMatrix {
    /// Look up the build entry for `app`.
    ///
    /// An application may list several entries, but only the first one is
    /// ever built; additional entries are ignored. A missing key and an
    /// empty entry list report the same failure.
    pub fn entry_for(&self, app: &str) -> Result<&BuildEntry> {
        self.apps
            .get(app)
            .and_then(|entries| entries.first())
            .with_context(|| format!("No build information found for {app}"))
    }
}
