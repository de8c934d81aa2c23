//! Layered loading of [`HostGlobals`] with `figment`.

use crate::error::{ErrorKind, Result};
use crate::globals::HostGlobals;
use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use std::path::{Path, PathBuf};
use tracing::instrument;

/// Prefix of environment variables that override host globals, e.g.
/// `POST_HISTORY_API_NONCE`.
pub const ENV_PREFIX: &str = "POST_HISTORY_";

/// Location of the user-level globals file, if the platform has one.
pub fn default_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "humanmade", "post-history").map(|dirs| dirs.config_dir().join("globals.toml"))
}

/// Builds the layered [`Figment`] without extracting it.
///
/// The file format is picked from the extension; anything that isn't TOML or
/// YAML is read as JSON, the format the host page itself uses.
pub fn figment(file: Option<&Path>, page: HostGlobals) -> Figment {
    let mut figment =
        Figment::from(Serialized::defaults(HostGlobals::server_defaults())).merge(Serialized::defaults(page));
    if let Some(path) = file {
        figment = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => figment.merge(Toml::file(path)),
            Some("yaml" | "yml") => figment.merge(Yaml::file(path)),
            _ => figment.merge(Json::file(path)),
        };
    }
    figment.merge(Env::prefixed(ENV_PREFIX))
}

/// Loads host globals from every source.
///
/// `page` holds whatever was found in the page itself (see
/// [`HostGlobals::from_scripts`]). A `file` that was asked for explicitly
/// must exist.
#[instrument(skip(page))]
pub fn load(file: Option<&Path>, page: HostGlobals) -> Result<HostGlobals> {
    if let Some(path) = file
        && !path.is_file()
    {
        exn::bail!(ErrorKind::NotFound(path.to_path_buf()));
    }
    let globals: HostGlobals = figment(file, page).extract().or_raise(|| ErrorKind::Invalid)?;
    tracing::debug!(complete = globals.resolve().is_some(), "Host globals loaded");
    Ok(globals)
}
