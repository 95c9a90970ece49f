use anyhow::{Context, Result};
use cmdtree_core::PermissionProvider;
use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::{info, warn};

#[derive(Debug)]
enum PathSegment {
    WildCard,
    Named(String),
}

#[derive(Debug)]
struct PermissionNode {
    path: Vec<PathSegment>,
    value: bool,
}

impl PermissionNode {
    fn matches(&self, permission: &str) -> bool {
        let mut segments = permission.split('.');
        for expected in &self.path {
            match (expected, segments.next()) {
                (PathSegment::WildCard, Some(_)) => return true,
                (PathSegment::Named(name), Some(segment)) if name == segment => {}
                _ => return false,
            }
        }
        segments.next().is_none()
    }
}

/// Permission nodes granted to one principal, first match wins.
#[derive(Debug, Default)]
pub struct PermissionsCache {
    nodes: Vec<PermissionNode>,
}

impl PermissionsCache {
    pub fn get_node_val(&self, name: &str) -> Option<bool> {
        self.nodes
            .iter()
            .find(|node| node.matches(name))
            .map(|node| node.value)
    }

    fn insert(&mut self, name: &str, value: bool) {
        let path = name
            .split('.')
            .map(|s| match s {
                "*" => PathSegment::WildCard,
                s => PathSegment::Named(s.to_owned()),
            })
            .collect();
        self.nodes.push(PermissionNode { path, value });
    }
}

type NodeTable = IndexMap<String, bool>;

/// The on-disk layout of the permissions file.
///
/// ```toml
/// [default]
/// "cmdtree.say" = true
///
/// [groups.moderator]
/// "cmdtree.*" = true
///
/// [principals.alice]
/// "group.moderator" = true
/// ```
#[derive(Debug, Default, Deserialize)]
struct PermissionsFile {
    #[serde(default)]
    default: NodeTable,
    #[serde(default)]
    groups: FxHashMap<String, NodeTable>,
    #[serde(default)]
    principals: FxHashMap<String, NodeTable>,
}

impl PermissionsFile {
    fn load_nodes(
        &self,
        cache: &mut PermissionsCache,
        nodes: &NodeTable,
        visited: &mut FxHashSet<String>,
    ) {
        for (path_str, &value) in nodes {
            cache.insert(path_str, value);

            if let Some(group_name) = path_str.strip_prefix("group.") {
                if !value || !visited.insert(group_name.to_string()) {
                    continue;
                }
                match self.groups.get(group_name) {
                    Some(group) => self.load_nodes(cache, group, visited),
                    None => warn!("Permission group '{}' does not exist", group_name),
                }
            }
        }
    }

    fn build_cache(&self, nodes: Option<&NodeTable>) -> PermissionsCache {
        let mut cache = PermissionsCache::default();
        let mut visited = FxHashSet::default();
        if let Some(nodes) = nodes {
            self.load_nodes(&mut cache, nodes, &mut visited);
        }
        self.load_nodes(&mut cache, &self.default, &mut visited);
        cache
    }
}

#[derive(Debug, Default)]
struct LoadedPermissions {
    principals: FxHashMap<String, PermissionsCache>,
    default: PermissionsCache,
}

impl LoadedPermissions {
    fn parse(contents: &str) -> Result<LoadedPermissions> {
        let file: PermissionsFile = toml::from_str(contents)?;
        let principals = file
            .principals
            .iter()
            .map(|(name, nodes)| (name.clone(), file.build_cache(Some(nodes))))
            .collect();
        Ok(LoadedPermissions {
            principals,
            default: file.build_cache(None),
        })
    }
}

/// Grants permissions to principals by name from a TOML file.
pub struct PermissionsStore {
    path: Option<PathBuf>,
    loaded: RwLock<LoadedPermissions>,
}

impl PermissionsStore {
    /// Loads `path`. A missing file grants nothing.
    pub fn load(path: impl AsRef<Path>) -> Result<PermissionsStore> {
        let path = path.as_ref().to_path_buf();
        let loaded = Self::read(&path)?;
        Ok(PermissionsStore {
            path: Some(path),
            loaded: RwLock::new(loaded),
        })
    }

    pub fn from_toml(contents: &str) -> Result<PermissionsStore> {
        Ok(PermissionsStore {
            path: None,
            loaded: RwLock::new(LoadedPermissions::parse(contents)?),
        })
    }

    fn read(path: &Path) -> Result<LoadedPermissions> {
        if !path.exists() {
            warn!(
                "{} does not exist, only default permissions apply",
                path.display()
            );
            return Ok(LoadedPermissions::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        LoadedPermissions::parse(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Re-reads the backing file. On failure the previous grants stay.
    pub fn reload(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let loaded = Self::read(path)?;
        let principals = loaded.principals.len();
        *self
            .loaded
            .write()
            .map_err(|_| anyhow::anyhow!("Permissions lock was poisoned"))? = loaded;
        info!("Reloaded permissions for {} principals", principals);
        Ok(())
    }
}

impl PermissionProvider<String> for PermissionsStore {
    fn has_permission(&self, principal: &String, permission: &str) -> bool {
        let Ok(loaded) = self.loaded.read() else {
            return false;
        };
        loaded
            .principals
            .get(principal)
            .unwrap_or(&loaded.default)
            .get_node_val(permission)
            .unwrap_or(false)
    }
}
