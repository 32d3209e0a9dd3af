use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use toml_edit::{Document, Item, Table};

/// The caller's `Cargo.toml`, used to find how a workspace crate is named
/// from the crate invoking a derive.
///
/// # Example
///
/// ```rust
/// # use arbor_macro_utils::Manifest;
/// let p: syn::Path = Manifest::shared(|m| m.get_crate_path("arbor_serial"));
/// ```
///
/// Reading the manifest is not cheap; resolve each path once per macro
/// invocation and pass it around.
///
/// # Resolution rules
///
/// 1. If the requested crate is listed in `dependencies`, return `::crate_name`.
/// 2. If its name begins with `arbor_` and the caller depends on the facade
///    crate `arbor`, return `::arbor::short_name` (`arbor_serial` becomes
///    `::arbor::serial`).
/// 3. Repeat 1 and 2 in `dev-dependencies`.
/// 4. Otherwise fall back to `::crate_name`.
///
/// A crate that expands its own derive must make the fallback valid with
/// `extern crate self as crate_name;`.
#[derive(Debug)]
pub struct Manifest {
    pub manifest: Document<Box<str>>,
    pub modified_time: SystemTime,
}

const FACADE_NAME: &str = "arbor";
const MEMBER_PREFIX: &str = "arbor_";

impl Manifest {
    #[inline(never)]
    fn manifest_path() -> PathBuf {
        let dir = env::var_os("CARGO_MANIFEST_DIR")
            .expect("CARGO_MANIFEST_DIR should be defined by cargo");
        let path = PathBuf::from(dir).join("Cargo.toml");
        assert!(
            path.exists(),
            "Cargo manifest does not exist at {}",
            path.display()
        );
        path
    }

    #[inline(never)]
    fn modified_time(path: &Path) -> std::io::Result<SystemTime> {
        std::fs::metadata(path).and_then(|metadata| metadata.modified())
    }

    #[inline(never)]
    fn read(path: &Path) -> Document<Box<str>> {
        let text = std::fs::read_to_string(path)
            .unwrap_or_else(|err| panic!("cannot read {}: {err}", path.display()))
            .into_boxed_str();
        Document::parse(text)
            .unwrap_or_else(|err| panic!("cannot parse {}: {err}", path.display()))
    }

    fn parse_path(text: &str) -> syn::Path {
        syn::parse_str(text).unwrap_or_else(|err| panic!("invalid path `{text}`: {err}"))
    }

    fn find_in_deps(deps: &Table, name: &str) -> Option<syn::Path> {
        if deps.contains_key(name) {
            return Some(Self::parse_path(&format!("::{name}")));
        }
        let module = name.strip_prefix(MEMBER_PREFIX)?;
        if deps.contains_key(FACADE_NAME) {
            return Some(Self::parse_path(&format!("::{FACADE_NAME}::{module}")));
        }
        None
    }

    /// The path of the crate `name` as seen from the caller.
    ///
    /// See the type documentation for the resolution order.
    #[inline(never)]
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        for table in ["dependencies", "dev-dependencies"] {
            if let Some(Item::Table(deps)) = self.manifest.get(table)
                && let Some(path) = Self::find_in_deps(deps, name)
            {
                return path;
            }
        }
        Self::parse_path(&format!("::{name}"))
    }

    /// Runs `func` with the caller's manifest, reading it at most once per
    /// modification.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static MANIFESTS: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let path = Self::manifest_path();
        let modified_time =
            Self::modified_time(&path).expect("Cargo.toml should have a modified time");

        let manifests = MANIFESTS.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(manifest) = manifests.get(&path)
            && manifest.modified_time == modified_time
        {
            return func(manifest);
        }
        drop(manifests);

        let manifest = Manifest {
            manifest: Self::read(&path),
            modified_time,
        };
        let result = func(&manifest);

        MANIFESTS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path, manifest);

        result
    }
}

#[cfg(test)]
mod tests {
    use super::Manifest;
    use toml_edit::Document;

    fn manifest(text: &str) -> Manifest {
        Manifest {
            manifest: Document::parse(text.to_owned().into_boxed_str()).unwrap(),
            modified_time: std::time::SystemTime::UNIX_EPOCH,
        }
    }

    fn render(path: &syn::Path) -> String {
        let segments: Vec<String> = path.segments.iter().map(|s| s.ident.to_string()).collect();
        format!("::{}", segments.join("::"))
    }

    #[test]
    fn direct_dependency() {
        let m = manifest("[dependencies]\narbor_serial = \"0.1\"\n");
        assert_eq!(render(&m.get_crate_path("arbor_serial")), "::arbor_serial");
    }

    #[test]
    fn through_facade() {
        let m = manifest("[dependencies]\narbor = \"0.1\"\n");
        assert_eq!(render(&m.get_crate_path("arbor_serial")), "::arbor::serial");
    }

    #[test]
    fn dev_dependency_and_fallback() {
        let m = manifest("[dev-dependencies]\narbor = \"0.1\"\n");
        assert_eq!(render(&m.get_crate_path("arbor_value")), "::arbor::value");
        assert_eq!(render(&m.get_crate_path("other")), "::other");
    }
}
