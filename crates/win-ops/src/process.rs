//! Process launch and termination.

use std::mem::size_of;

use config::ShowMode;
use fe_engine::Result;
use tracing::{debug, warn};
use windows::{
    Win32::System::{
        Diagnostics::ToolHelp::{
            CreateToolhelp32Snapshot, PROCESSENTRY32W, Process32FirstW, Process32NextW,
            TH32CS_SNAPPROCESS,
        },
        Threading::{
            CreateProcessW, INFINITE, OpenProcess, PROCESS_CREATION_FLAGS, PROCESS_INFORMATION,
            PROCESS_TERMINATE, STARTF_USESHOWWINDOW, STARTUPINFOW, TerminateProcess,
            WaitForSingleObject,
        },
    },
    core::{PCWSTR, PWSTR},
};

use crate::{
    error::OsContext,
    util::{close_handle, expand_env, from_wide, to_wide},
    window::show_cmd,
};

/// Start a command line. With `wait`, block until the process exits.
pub(crate) fn launch(command: &str, show: ShowMode, wait: bool) -> Result<()> {
    let expanded = expand_env(command);
    let mut cmdline = to_wide(&expanded);
    let startup = STARTUPINFOW {
        cb: size_of::<STARTUPINFOW>() as u32,
        dwFlags: STARTF_USESHOWWINDOW,
        wShowWindow: show_cmd(show).0 as u16,
        ..Default::default()
    };
    let mut info = PROCESS_INFORMATION::default();
    unsafe {
        CreateProcessW(
            PCWSTR::null(),
            Some(PWSTR(cmdline.as_mut_ptr())),
            None,
            None,
            false,
            PROCESS_CREATION_FLAGS(0),
            None,
            PCWSTR::null(),
            &startup,
            &mut info,
        )
    }
    .os("CreateProcess")?;
    debug!(pid = info.dwProcessId, wait, "Started {}", expanded);

    if wait {
        unsafe { WaitForSingleObject(info.hProcess, INFINITE) };
        debug!(pid = info.dwProcessId, "Process exited");
    }
    close_handle(info.hThread);
    close_handle(info.hProcess);
    Ok(())
}

/// Terminate one process by id.
pub(crate) fn kill_pid(pid: u32, exit_code: u32) -> Result<()> {
    let handle = unsafe { OpenProcess(PROCESS_TERMINATE, false, pid) }.os("OpenProcess")?;
    let result = unsafe { TerminateProcess(handle, exit_code) }.os("TerminateProcess");
    close_handle(handle);
    result
}

/// Ids of every running process whose image name equals `name`, ignoring case.
fn pids_named(name: &str) -> Result<Vec<u32>> {
    let wanted = name.to_lowercase();
    let snapshot =
        unsafe { CreateToolhelp32Snapshot(TH32CS_SNAPPROCESS, 0) }.os("CreateToolhelp32Snapshot")?;
    let mut entry = PROCESSENTRY32W {
        dwSize: size_of::<PROCESSENTRY32W>() as u32,
        ..Default::default()
    };
    let mut pids = Vec::new();
    let mut more = unsafe { Process32FirstW(snapshot, &mut entry) }.is_ok();
    while more {
        if from_wide(&entry.szExeFile).to_lowercase() == wanted {
            pids.push(entry.th32ProcessID);
        }
        more = unsafe { Process32NextW(snapshot, &mut entry) }.is_ok();
    }
    close_handle(snapshot);
    Ok(pids)
}

/// Terminate every process named `name`. Returns how many were terminated.
pub(crate) fn kill_name(name: &str, exit_code: u32) -> Result<usize> {
    let mut killed = 0;
    for pid in pids_named(name)? {
        match kill_pid(pid, exit_code) {
            Ok(()) => killed += 1,
            Err(e) => warn!("Kill {} (pid {}): {}", name, pid, e),
        }
    }
    debug!("Killed {} process(es) named {}", killed, name);
    Ok(killed)
}
