use config::ShowMode;
use fe_engine::{Error, Result, ShortcutSpec};
use tracing::debug;
use windows::{
    Win32::{
        System::Com::{CLSCTX_INPROC_SERVER, CoCreateInstance, IPersistFile},
        UI::Shell::{IShellLinkW, ShellExecuteW, ShellLink},
    },
    core::{HSTRING, Interface},
};

use crate::{
    error::OsContext,
    util::{expand_env, opt_pcwstr},
    window::show_cmd,
};

/// Values at or below this returned by `ShellExecute` are error codes.
const SHELL_EXECUTE_MAX_ERROR: isize = 32;

/// Run a shell verb on a file.
pub(crate) fn shell_execute(
    verb: &str,
    file: &str,
    args: Option<&str>,
    directory: Option<&str>,
    show: ShowMode,
) -> Result<()> {
    let verb_w = HSTRING::from(verb);
    let file_w = HSTRING::from(expand_env(file));
    let args_w = args.map(HSTRING::from);
    let dir_w = directory.map(|d| HSTRING::from(expand_env(d)));
    let code = unsafe {
        ShellExecuteW(
            None,
            &verb_w,
            &file_w,
            opt_pcwstr(args_w.as_ref()),
            opt_pcwstr(dir_w.as_ref()),
            show_cmd(show),
        )
    }
    .0 as isize;
    if code <= SHELL_EXECUTE_MAX_ERROR {
        return Err(Error::os(
            "ShellExecute",
            format!("{} {} returned {}", verb, file, code),
        ));
    }
    Ok(())
}

/// Write a `.lnk` file through the shell link object.
pub(crate) fn create_shortcut(spec: &ShortcutSpec) -> Result<()> {
    let link_path = expand_env(&spec.link);
    unsafe {
        let link: IShellLinkW =
            CoCreateInstance(&ShellLink, None, CLSCTX_INPROC_SERVER).os("CoCreateInstance")?;
        link.SetPath(&HSTRING::from(expand_env(&spec.target)))
            .os("IShellLink::SetPath")?;
        if let Some(args) = &spec.args {
            link.SetArguments(&HSTRING::from(args.as_str()))
                .os("IShellLink::SetArguments")?;
        }
        if let Some(icon) = &spec.icon {
            link.SetIconLocation(&HSTRING::from(expand_env(icon)), spec.icon_index)
                .os("IShellLink::SetIconLocation")?;
        }
        link.SetShowCmd(show_cmd(spec.show))
            .os("IShellLink::SetShowCmd")?;
        let file: IPersistFile = link.cast().os("IPersistFile")?;
        file.Save(&HSTRING::from(link_path.as_str()), true)
            .os("IPersistFile::Save")?;
    }
    debug!("Shortcut written to {}", link_path);
    Ok(())
}
