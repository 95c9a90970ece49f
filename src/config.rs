use anyhow::{Context, Result, bail};
use cmdtree_dispatch::RegistrationEnvironment;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::Path;
use toml_edit::{DocumentMut, value};

trait ConfigSerializeDefault {
    fn fix_config(self, name: &str, doc: &mut DocumentMut);
}

macro_rules! impl_simple_default {
    ( $( $type:ty ),* ) => {
        $(
            impl ConfigSerializeDefault for $type {
                fn fix_config(self, name: &str, doc: &mut DocumentMut) {
                    doc.entry(name).or_insert_with(|| value(self));
                }
            }
        )*
    }
}

impl_simple_default!(String, bool);

macro_rules! gen_config {
    (
        $( $(#[doc = $doc:literal])* $name:ident: $type:ty = $default:expr),*
    ) => {
        #[derive(Debug, Serialize, Deserialize)]
        pub struct Config {
            $(
                $(#[doc = $doc])*
                pub $name: $type,
            )*
        }

        impl Config {
            /// Reads `config_file`, writing any missing keys back with their
            /// defaults so the file documents every option.
            pub fn load(config_file: impl AsRef<Path>) -> Result<Config> {
                let config_file = config_file.as_ref();
                let str = if config_file.exists() {
                    fs::read_to_string(config_file)
                        .with_context(|| format!("Failed to read {}", config_file.display()))?
                } else {
                    String::new()
                };
                let mut doc = str
                    .parse::<DocumentMut>()
                    .with_context(|| format!("{} is not valid TOML", config_file.display()))?;

                $(
                    <$type as ConfigSerializeDefault>::fix_config($default, stringify!($name), &mut doc);
                )*

                let patched = doc.to_string();
                if str != patched {
                    let mut file = fs::OpenOptions::new()
                        .create(true)
                        .write(true)
                        .truncate(true)
                        .open(config_file)
                        .with_context(|| format!("Failed to open {}", config_file.display()))?;
                    write!(file, "{}", patched)?;
                }

                toml::from_str(&patched)
                    .with_context(|| format!("Failed to parse {}", config_file.display()))
            }
        }
    };
}

gen_config! {
    /// Name of the administrative root command.
    admin_root: String = "cmdtree".to_string(),
    /// Permission required for the administrative root and its subcommands.
    admin_permission: String = "cmdtree.admin".to_string(),
    /// File granting permissions to principals.
    permissions_file: String = "permissions.toml".to_string(),
    /// Name the console reports itself as in logs and replies.
    console_name: String = "Console".to_string(),
    /// One of `all`, `dedicated` or `integrated`.
    environment: String = "dedicated".to_string(),
    /// Log every command issued from the console.
    log_commands: bool = true
}

impl Config {
    pub fn registration_environment(&self) -> Result<RegistrationEnvironment> {
        Ok(match self.environment.to_lowercase().as_str() {
            "all" => RegistrationEnvironment::All,
            "dedicated" => RegistrationEnvironment::Dedicated,
            "integrated" => RegistrationEnvironment::Integrated,
            other => bail!("Unknown registration environment: {}", other),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_file(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("cmdtree-{}-{}", std::process::id(), name));
        let _ = fs::remove_file(&path);
        path
    }

    #[test]
    fn missing_file_is_written_with_defaults() {
        let path = scratch_file("defaults.toml");
        let config = Config::load(&path).unwrap();
        assert_eq!(config.admin_root, "cmdtree");
        assert!(config.log_commands);

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("admin_permission = \"cmdtree.admin\""));
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn existing_values_are_kept() {
        let path = scratch_file("existing.toml");
        fs::write(&path, "# server settings\nadmin_root = \"ops\"\n").unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config.admin_root, "ops");
        assert_eq!(config.permissions_file, "permissions.toml");

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("# server settings"));
        assert!(written.contains("admin_root = \"ops\""));
        assert!(written.contains("console_name = \"Console\""));
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn environment_names() {
        let path = scratch_file("environment.toml");
        fs::write(&path, "environment = \"Integrated\"\n").unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(
            config.registration_environment().unwrap(),
            RegistrationEnvironment::Integrated
        );

        fs::write(&path, "environment = \"server\"\n").unwrap();
        assert!(Config::load(&path).unwrap().registration_environment().is_err());
        fs::remove_file(&path).unwrap();
    }
}
