use crate::runtime_context::RuntimeContext;

use super::BuiltinCommand;

mod filesystem;
mod general;
mod processes;
mod windows;

pub(super) fn builtin_registrations(runtime: RuntimeContext) -> Vec<BuiltinCommand> {
    let mut registrations = general::registrations();
    registrations.extend(filesystem::registrations(runtime.clone()));
    registrations.extend(processes::registrations(runtime.clone()));
    registrations.extend(windows::registrations(runtime));
    registrations
}
