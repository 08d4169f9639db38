use minish::{Control, Shell};

/// Source the configured rc file, if it exists.
///
/// A missing file is skipped silently; an unreadable one is a warning.
/// Returns `Exit` if the rc file ran `exit`.
pub(crate) fn load_rc(shell: &mut Shell) -> Control {
    let Some(path) = shell.config().rc_file.clone() else {
        return Control::Continue;
    };
    if !path.exists() {
        return Control::Continue;
    }

    match shell.source_file(&path) {
        Ok(control) => control,
        Err(e) => {
            log::warn!("{}: {}", path.display(), e);
            Control::Continue
        }
    }
}
