//! Assembles the VNC shell command and websockify argument vector for one program.

use std::{
    collections::BTreeMap,
    env,
    ffi::OsString,
    path::{Path, PathBuf},
};

use tracing::info;

use crate::{
    lib::{
        errors::LaunchError,
        shell::{self, path_str},
    },
    proxy::config::ProxyConfig,
};

use super::{
    command::{LaunchConfig, LauncherEntry, PORT_PLACEHOLDER},
    probe::{MarkerProbe, VncLocator, VncProbe, VncVariant},
    socket_dir::SocketDir,
};

/// Process environment consulted while building a plan.
#[derive(Debug, Clone, Default)]
pub struct LaunchEnvironment {
    /// `PATH`-style list searched for the VNC server; `None` uses the process `PATH`.
    pub search_path: Option<OsString>,
    /// Directory the VNC server is started in; `None` uses the current directory.
    pub working_dir: Option<PathBuf>,
}

/// A built configuration together with the socket directory it refers to.
#[derive(Debug)]
pub struct LaunchPlan {
    pub config: LaunchConfig,
    pub vnc_server: PathBuf,
    pub variant: VncVariant,
    /// Shell command run by `/bin/sh -c` inside the bridge.
    pub vnc_command: String,
    socket_dir: SocketDir,
}

impl LaunchPlan {
    pub fn socket_dir(&self) -> &SocketDir {
        &self.socket_dir
    }

    pub fn into_parts(self) -> (LaunchConfig, SocketDir) {
        (self.config, self.socket_dir)
    }
}

/// Build a plan against the real environment.
pub fn build_launch_plan(config: &ProxyConfig, program: &str) -> Result<LaunchPlan, LaunchError> {
    let probe = MarkerProbe::new(config.vnc.socket_capable_marker.clone());
    build_launch_plan_with(config, program, &LaunchEnvironment::default(), &probe)
}

/// Build a plan with an explicit environment and variant probe.
pub fn build_launch_plan_with<P: VncProbe>(
    config: &ProxyConfig,
    program: &str,
    environment: &LaunchEnvironment,
    probe: &P,
) -> Result<LaunchPlan, LaunchError> {
    let assets = config.programs.resolve(program, &config.assets.share_dir)?;

    let socket_dir = SocketDir::create(program, config.launch.socket_root.as_deref())?;
    let socket_path = path_str(socket_dir.socket_path())?.to_string();

    let vnc_server = VncLocator::new(
        config.vnc.executable.clone(),
        config.assets.bundled_vncserver(),
    )
    .with_search_path(environment.search_path.clone())
    .resolve();
    let variant = probe.probe(&vnc_server)?;

    let mut vnc_args = vec![path_str(&vnc_server)?.to_string()];
    let mut socket_args = Vec::new();
    if variant.supports_unix_socket() {
        vnc_args.extend(["-rfbunixpath".to_string(), socket_path.clone()]);
        socket_args.extend(["--unix-target".to_string(), socket_path]);
    }

    if !assets.script.exists() {
        return Err(LaunchError::StartupScriptMissing {
            program: program.to_string(),
            path: assets.script,
        });
    }

    vnc_args.extend(
        [
            "-verbose",
            "-xstartup",
            path_str(&assets.script)?,
            "-SecurityTypes",
            "None",
            "-fg",
        ]
        .map(String::from),
    );
    let vnc_command = shell::join(vnc_args.iter().map(String::as_str))?;

    let working_dir = match &environment.working_dir {
        Some(dir) => dir.clone(),
        None => env::current_dir().map_err(|source| LaunchError::CurrentDir { source })?,
    };
    let shell_command = format!(
        "cd {} && {}",
        shell::quote(path_str(&working_dir)?)?,
        vnc_command
    );

    let mut command = vec![
        config.bridge.executable.clone(),
        "-v".to_string(),
        "--web".to_string(),
        path_str(&config.web_dir())?.to_string(),
        "--heartbeat".to_string(),
        config.bridge.heartbeat_secs.to_string(),
        PORT_PLACEHOLDER.to_string(),
    ];
    command.extend(socket_args);
    command.extend(["--".to_string(), "/bin/sh".to_string(), "-c".to_string()]);
    command.push(shell_command);

    let launch_config = LaunchConfig {
        command,
        timeout: config.launch.timeout_secs,
        mappath: BTreeMap::from([("/".to_string(), config.bridge.entry_page.clone())]),
        new_browser_window: config.launch.new_browser_window,
        launcher_entry: LauncherEntry {
            icon_path: path_str(&assets.icon)?.to_string(),
        },
    };

    log_plan(program, &vnc_server, variant, socket_dir.path());

    Ok(LaunchPlan {
        config: launch_config,
        vnc_server,
        variant,
        vnc_command,
        socket_dir,
    })
}

fn log_plan(program: &str, vnc_server: &Path, variant: VncVariant, socket_dir: &Path) {
    info!(
        target: "remote_desktop_proxy::launch",
        program,
        vnc_server = %vnc_server.display(),
        variant = variant.as_str(),
        socket_dir = %socket_dir.display(),
        "Built launch configuration"
    );
}
