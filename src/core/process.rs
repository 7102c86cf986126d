//! External process capability.
//!
//! The editor session only needs "run this program with these args and wait".
//! Keeping that behind a trait lets tests stand in for a real editor.

use std::ffi::OsString;
use std::io;
use std::process::Command;

use log::debug;

/// Runs a program to completion and reports its exit code.
///
/// `Ok(None)` means the process ended without an exit code (killed by a signal).
/// `Err` means the program could not be started at all.
pub trait Launcher {
    fn launch_blocking(&self, program: &str, args: &[OsString]) -> io::Result<Option<i32>>;
}

/// Launches real child processes that inherit the terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn launch_blocking(&self, program: &str, args: &[OsString]) -> io::Result<Option<i32>> {
        debug!("Spawning {} with {} arg(s)", program, args.len());
        let status = Command::new(program).args(args).status()?;
        Ok(status.code())
    }
}

impl<F> Launcher for F
where
    F: Fn(&str, &[OsString]) -> io::Result<Option<i32>>,
{
    fn launch_blocking(&self, program: &str, args: &[OsString]) -> io::Result<Option<i32>> {
        self(program, args)
    }
}
