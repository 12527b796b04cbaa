//! Launch configuration builder: program table, socket directory, VNC probe and argument assembly.

pub mod builder;
pub mod command;
pub mod probe;
pub mod programs;
pub mod socket_dir;

pub use builder::{build_launch_plan, build_launch_plan_with, LaunchEnvironment, LaunchPlan};
pub use command::{LaunchConfig, LauncherEntry, PORT_PLACEHOLDER};
pub use probe::{MarkerProbe, VncLocator, VncProbe, VncVariant};
pub use programs::{ProgramAssets, ProgramEntry, ProgramTable, BUILTIN_PROGRAMS};
pub use socket_dir::{SocketDir, SOCKET_FILE_NAME};
