//! Scripted stand-in for the `rudix` executable, used by unit tests.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Mutex;

use crate::backend::rudix::DEFAULT_PACKAGE_PREFIX;
use crate::error::Result;
use crate::runner::CommandRunner;
use crate::types::CommandOutput;

#[derive(Default)]
struct State {
    installed: BTreeSet<String>,
    /// Install/remove exit 0 but leave the database untouched
    broken: BTreeSet<String>,
    list_fails: bool,
    calls: Vec<Vec<String>>,
}

/// In-memory package database answering `--list`, `--install` and `--remove`.
pub struct FakeRudix {
    prefix: String,
    state: Mutex<State>,
}

impl Default for FakeRudix {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PACKAGE_PREFIX.to_string(),
            state: Mutex::new(State::default()),
        }
    }
}

impl FakeRudix {
    pub fn with_installed(names: &[&str]) -> Self {
        let fake = Self::default();
        fake.state
            .lock()
            .unwrap()
            .installed
            .extend(names.iter().map(|n| (*n).to_string()));
        fake
    }

    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = prefix.to_string();
        self
    }

    /// Make install/remove of `name` report success without doing anything.
    pub fn break_package(&self, name: &str) {
        self.state.lock().unwrap().broken.insert(name.to_string());
    }

    pub fn fail_list(&self) {
        self.state.lock().unwrap().list_fails = true;
    }

    pub fn installed(&self) -> BTreeSet<String> {
        self.state.lock().unwrap().installed.clone()
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Only the install/remove invocations, in order.
    pub fn mutations(&self) -> Vec<Vec<String>> {
        self.calls()
            .into_iter()
            .filter(|c| c.first().is_some_and(|a| a != "--list"))
            .collect()
    }
}

impl CommandRunner for FakeRudix {
    fn run(&self, _program: &Path, args: &[&str]) -> Result<CommandOutput> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(args.iter().map(|a| (*a).to_string()).collect());

        let ok = |stdout: String| CommandOutput {
            code: Some(0),
            stdout,
            stderr: String::new(),
        };

        let output = match args {
            ["--list"] if state.list_fails => CommandOutput {
                code: Some(1),
                stdout: String::new(),
                stderr: "database locked".to_string(),
            },
            ["--list"] => ok(state
                .installed
                .iter()
                .map(|n| format!("{}{n}\n", self.prefix))
                .collect()),
            ["--install", name] => {
                if !state.broken.contains(*name) {
                    state.installed.insert((*name).to_string());
                }
                ok(format!("Installing {name}...\n"))
            }
            ["--remove", name] => {
                if !state.broken.contains(*name) {
                    state.installed.remove(*name);
                }
                ok(format!("Removing {name}...\n"))
            }
            _ => CommandOutput {
                code: Some(2),
                stdout: String::new(),
                stderr: format!("unknown arguments: {args:?}"),
            },
        };
        Ok(output)
    }
}
