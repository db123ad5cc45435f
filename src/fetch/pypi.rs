//! PyPI package lookups.

use super::{classify, decode_json, HttpSource, Lookup};
use crate::model::{PackageStats, DEFAULT_VERSION};
use serde::Deserialize;

/// Public project page, as opposed to the JSON API.
pub const PROJECT_URL: &str = "https://pypi.org/project";

#[derive(Deserialize)]
struct Project {
    #[serde(default)]
    info: Info,
}

#[derive(Deserialize, Default)]
struct Info {
    version: Option<String>,
}

pub(super) fn package(source: &HttpSource, name: &str) -> Lookup<PackageStats> {
    let path = format!("/pypi/{}/json", name);
    match classify(source.pypi_get(&path), decode_json::<Project>) {
        Lookup::Found(project) => Lookup::Found(PackageStats {
            version: project
                .info
                .version
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_VERSION.to_string()),
        }),
        Lookup::NotFound => Lookup::NotFound,
        Lookup::Unavailable(err) => Lookup::Unavailable(err),
    }
}

/// Link to the project page for `name`.
pub fn project_url(name: &str) -> String {
    format!("{}/{}/", PROJECT_URL, name)
}
