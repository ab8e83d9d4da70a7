pub static BUILTIN_MANAGERS: &str = include_str!("../../data/managers.yaml");
pub static DEFAULT_CONFIG: &str = include_str!("../../data/toolbox-config.yaml");

/// Config file location relative to the user's home directory.
pub static DEFAULT_CONFIG_FILE_PATH: &str = ".config/toolbox/config.yaml";

/// Prefix for environment variables layered over the config file.
pub static ENV_PREFIX: &str = "TOOLBOX";
