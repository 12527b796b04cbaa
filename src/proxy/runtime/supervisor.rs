//! Runs a launch plan and releases its socket directory when the bridge exits.

use std::{
    future::Future,
    io,
    process::Stdio,
    time::{Duration, Instant},
};

use tokio::{
    process::{Child, Command},
    time,
};
use tracing::{info, warn};

use crate::{
    launch::{build_launch_plan_with, LaunchEnvironment, MarkerProbe},
    lib::{errors::SupervisorError, telemetry::LaunchSpan},
    proxy::config::ProxyConfig,
};

const STOP_GRACE_PERIOD: Duration = Duration::from_secs(5);
const STOP_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Outcome of a supervised launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The bridge exited on its own.
    Exited(Option<i32>),
    /// A shutdown signal arrived and the bridge process group was stopped.
    Interrupted,
}

impl SessionEnd {
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            SessionEnd::Exited(code) => *code,
            SessionEnd::Interrupted => None,
        }
    }
}

/// Build a plan for `program`, run it on `port` and wait for it to finish.
pub async fn run_supervised(
    config: &ProxyConfig,
    program: &str,
    port: u16,
) -> Result<SessionEnd, SupervisorError> {
    run_supervised_with(config, program, port, &LaunchEnvironment::default()).await
}

/// Same as [`run_supervised`] with an explicit process environment.
pub async fn run_supervised_with(
    config: &ProxyConfig,
    program: &str,
    port: u16,
    environment: &LaunchEnvironment,
) -> Result<SessionEnd, SupervisorError> {
    run_supervised_until(config, program, port, environment, shutdown_signal()).await
}

/// Run until the bridge exits or `shutdown` resolves.
///
/// The bridge leads its own process group; the whole group is stopped before
/// the socket directory is removed.
pub async fn run_supervised_until<F>(
    config: &ProxyConfig,
    program: &str,
    port: u16,
    environment: &LaunchEnvironment,
    shutdown: F,
) -> Result<SessionEnd, SupervisorError>
where
    F: Future<Output = Result<(), SupervisorError>>,
{
    let span = LaunchSpan::start(program);
    let probe = MarkerProbe::new(config.vnc.socket_capable_marker.clone());
    let plan = {
        let _entered = span.enter();
        build_launch_plan_with(config, program, environment, &probe)?
    };
    let (launch_config, socket_dir) = plan.into_parts();
    let argv = launch_config.command_for_port(port);
    let (executable, args) = argv.split_first().ok_or(SupervisorError::EmptyCommand)?;

    info!(
        target: "remote_desktop_proxy::runtime",
        session_id = %span.session_id(),
        executable = %executable,
        port,
        socket_dir = %socket_dir.path().display(),
        "Starting bridge process"
    );

    let spawn_error = |source: io::Error| SupervisorError::Spawn {
        program: executable.clone(),
        source,
    };
    let mut child = Command::new(executable)
        .args(args)
        .stdin(Stdio::null())
        .process_group(0)
        .kill_on_drop(true)
        .spawn()
        .map_err(spawn_error)?;
    let group = child
        .id()
        .and_then(|pid| libc::pid_t::try_from(pid).ok())
        .ok_or_else(|| spawn_error(io::Error::other("spawned process has no pid")))?;

    let wait_error = |source: io::Error| SupervisorError::Wait {
        program: executable.clone(),
        source,
    };
    tokio::pin!(shutdown);
    let end = tokio::select! {
        status = child.wait() => SessionEnd::Exited(status.map_err(wait_error)?.code()),
        signal = &mut shutdown => {
            signal?;
            warn!(
                target: "remote_desktop_proxy::runtime",
                session_id = %span.session_id(),
                process_group = group,
                "Shutdown requested; stopping bridge process group"
            );
            SessionEnd::Interrupted
        }
    };
    stop_group(&mut child, group).await.map_err(wait_error)?;

    let socket_path = socket_dir.path().to_path_buf();
    socket_dir
        .close()
        .map_err(|source| SupervisorError::Cleanup {
            path: socket_path,
            source,
        })?;

    let status = match end {
        SessionEnd::Exited(Some(0)) => "succeeded",
        SessionEnd::Exited(_) => "failed",
        SessionEnd::Interrupted => "interrupted",
    };
    span.finish(status, end.exit_code());
    Ok(end)
}

/// SIGTERM the group, reap the leader, and SIGKILL whatever survives the grace period.
async fn stop_group(child: &mut Child, group: libc::pid_t) -> Result<(), io::Error> {
    if !signal_group(group, libc::SIGTERM)? {
        return Ok(());
    }

    let deadline = Instant::now() + STOP_GRACE_PERIOD;
    loop {
        child.try_wait()?;
        if !signal_group(group, 0)? {
            return Ok(());
        }
        if Instant::now() >= deadline {
            warn!(
                target: "remote_desktop_proxy::runtime",
                process_group = group,
                grace_ms = STOP_GRACE_PERIOD.as_millis() as u64,
                "Process group outlived SIGTERM; sending SIGKILL"
            );
            signal_group(group, libc::SIGKILL)?;
            child.wait().await?;
            return Ok(());
        }
        time::sleep(STOP_POLL_INTERVAL).await;
    }
}

/// Send `signal` to every process in `group`; `Ok(false)` once the group is empty.
fn signal_group(group: libc::pid_t, signal: libc::c_int) -> Result<bool, io::Error> {
    // SAFETY: killpg takes plain integers and touches no memory of ours.
    let result = unsafe { libc::killpg(group, signal) };
    if result == 0 {
        return Ok(true);
    }
    let err = io::Error::last_os_error();
    if err.raw_os_error() == Some(libc::ESRCH) {
        Ok(false)
    } else {
        Err(err)
    }
}

async fn shutdown_signal() -> Result<(), SupervisorError> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut terminate =
        signal(SignalKind::terminate()).map_err(|source| SupervisorError::Signal { source })?;
    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            result.map_err(|source| SupervisorError::Signal { source })
        }
        _ = terminate.recv() => Ok(()),
    }
}
