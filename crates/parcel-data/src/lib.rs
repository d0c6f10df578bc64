//! Disk loading for the parcel factory planner: format-detected config
//! files, JSON plan files and the bundled default layout.

pub mod loader;

pub use loader::{
    DataLoadError, Format, default_config, load_config_file, load_factory_config, load_plan_file,
    save_plan_file,
};
