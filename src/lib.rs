//! Toolbox - install command validation for package managers
//!
//! Toolbox checks a single-line install command (for example
//! `brew install --cask firefox`) before it is shown to users or stored in a
//! catalog. It recognizes the package manager, checks the install action and
//! the application name, rejects shell injection attempts and reports which
//! extra options were used.
//!
//! # Quick Start
//!
//! ```rust
//! use toolbox::{CommandValidator, ValidationLevel};
//!
//! let validator = CommandValidator::builtin();
//! let details = validator.validate("winget install git", "git", &[], "windows");
//! assert_eq!(details.level, ValidationLevel::Success);
//!
//! let details = validator.validate("apt install git; rm -rf /", "git", &[], "linux");
//! assert!(details.level.is_error());
//! ```
//!
//! # Architecture
//!
//! - [`ManagerCatalog`]: the table of package manager grammars, loaded from YAML
//! - [`CommandValidator`]: the validation pipeline over a catalog
//! - [`ValidationDetails`]: the structured verdict
//! - [`ToolboxConfig`]: user configuration (platform, extra managers, applications)
//! - [`ToolboxError`]: unified error handling
//!
//! # Error Handling
//!
//! Validation itself never fails: every input, however malformed, produces a
//! verdict. Loading catalogs and configuration returns [`Result<T>`] with a
//! [`ToolboxError`].
//!
//! ```rust
//! use toolbox::ManagerCatalog;
//!
//! let err = ManagerCatalog::load_from_str("- id: broken\n  aliases: []").unwrap_err();
//! assert!(err.is_data_error());
//! ```

pub mod commands;
pub mod configuration;
pub mod data;
pub mod errors;
pub mod output;
pub mod traits;
pub mod validation;

// Re-export commonly used types
pub use configuration::{AppEntry, ToolboxConfig};
pub use data::{ManagerCatalog, PackageManagerSpec, Platform};
pub use errors::{Result, ToolboxError};
pub use traits::Exportable;
pub use validation::{CommandValidator, ValidationBand, ValidationDetails, ValidationLevel};
