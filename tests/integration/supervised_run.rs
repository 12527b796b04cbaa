use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};

use remote_desktop_proxy::{
    lib::errors::SupervisorError,
    proxy::runtime::{run_supervised_until, run_supervised_with, SessionEnd},
};

use crate::common::{write_executable, Workspace, TIGERVNC_SCRIPT};

/// Fake bridge that records its arguments and whether the socket directory exists.
fn install_fake_bridge(workspace: &Workspace, exit_code: i32) -> Result<()> {
    let root = workspace.temp.path();
    let script = format!(
        r#"#!/bin/sh
printf '%s\n' "$@" > "{args}"
while [ "$#" -gt 0 ]; do
  if [ "$1" = "--unix-target" ] && [ -d "$(dirname "$2")" ]; then
    echo present > "{state}"
  fi
  shift
done
exit {exit_code}
"#,
        args = root.join("bridge-args").display(),
        state = root.join("socket-state").display(),
    );
    write_executable(&workspace.bin.join("fake-websockify"), &script)
}

#[tokio::test]
async fn socket_dir_is_removed_after_bridge_exits() -> Result<()> {
    let workspace = Workspace::new()?;
    workspace.install_vncserver(TIGERVNC_SCRIPT)?;
    install_fake_bridge(&workspace, 3)?;
    let mut config = workspace.config();
    config.bridge.executable = workspace
        .bin
        .join("fake-websockify")
        .display()
        .to_string();

    let end = run_supervised_with(&config, "igv", 45678, &workspace.environment()).await?;

    assert_eq!(end, SessionEnd::Exited(Some(3)));
    let args = fs::read_to_string(workspace.temp.path().join("bridge-args"))
        .context("bridge should record its arguments")?;
    let args = args.lines().collect::<Vec<_>>();
    assert!(args.contains(&"45678"), "args: {args:?}");
    assert!(!args.contains(&"{port}"), "args: {args:?}");

    let state = fs::read_to_string(workspace.temp.path().join("socket-state"))
        .context("bridge should see the socket directory")?;
    assert_eq!(state.trim(), "present");

    let socket = args
        .iter()
        .position(|arg| *arg == "--unix-target")
        .and_then(|index| args.get(index + 1))
        .context("--unix-target present")?;
    let socket_dir = Path::new(socket).parent().context("socket parent")?;
    assert!(!socket_dir.exists(), "socket dir must be removed on exit");
    assert!(workspace.socket_dirs()?.is_empty());
    Ok(())
}

#[tokio::test]
async fn missing_bridge_executable_is_a_spawn_error() -> Result<()> {
    let workspace = Workspace::new()?;
    workspace.install_vncserver(TIGERVNC_SCRIPT)?;
    let mut config = workspace.config();
    config.bridge.executable = workspace.bin.join("absent").display().to_string();

    let error = run_supervised_with(&config, "igv", 45678, &workspace.environment())
        .await
        .expect_err("bridge does not exist");

    assert!(
        error.to_string().contains("Failed to spawn"),
        "unexpected error: {error}"
    );
    assert!(workspace.socket_dirs()?.is_empty());
    Ok(())
}

/// Fake bridge that leaves a background child behind, like the nested VNC shell.
fn install_lingering_bridge(workspace: &Workspace, pid_file: &Path) -> Result<()> {
    let script = format!(
        r#"#!/bin/sh
sleep 30 &
echo $! > "{pid}.tmp"
mv "{pid}.tmp" "{pid}"
wait
"#,
        pid = pid_file.display(),
    );
    write_executable(&workspace.bin.join("fake-websockify"), &script)
}

async fn wait_for_pid(pid_file: PathBuf) -> Result<(), SupervisorError> {
    loop {
        if let Ok(contents) = fs::read_to_string(&pid_file) {
            if contents.trim().parse::<u32>().is_ok() {
                return Ok(());
            }
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
}

/// Zombies count as gone: they only wait for their new parent to reap them.
fn process_running(pid: u32) -> bool {
    let Ok(stat) = fs::read_to_string(format!("/proc/{pid}/stat")) else {
        return false;
    };
    stat.rsplit_once(')')
        .and_then(|(_, rest)| rest.split_whitespace().next())
        .is_some_and(|state| state != "Z")
}

#[tokio::test]
async fn interrupt_stops_background_children_before_removing_socket_dir() -> Result<()> {
    let workspace = Workspace::new()?;
    workspace.install_vncserver(TIGERVNC_SCRIPT)?;
    let pid_file = workspace.temp.path().join("session.pid");
    install_lingering_bridge(&workspace, &pid_file)?;
    let mut config = workspace.config();
    config.bridge.executable = workspace
        .bin
        .join("fake-websockify")
        .display()
        .to_string();

    let end = run_supervised_until(
        &config,
        "igv",
        45678,
        &workspace.environment(),
        wait_for_pid(pid_file.clone()),
    )
    .await?;

    assert_eq!(end, SessionEnd::Interrupted);
    let pid: u32 = fs::read_to_string(&pid_file)?.trim().parse()?;
    let mut attempts = 0;
    while process_running(pid) && attempts < 40 {
        tokio::time::sleep(Duration::from_millis(50)).await;
        attempts += 1;
    }
    assert!(!process_running(pid), "background child {pid} outlived the session");
    assert!(workspace.socket_dirs()?.is_empty());
    Ok(())
}
