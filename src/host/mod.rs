use clap::ValueEnum;
use std::ffi::OsStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Host {
    /// Detect from the runner's environment
    Auto,
    /// GitHub Actions workflow commands on stdout
    Actions,
    /// Plain lines on stdout, failures on stderr
    Local,
}

/// A host with `Auto` already decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedHost {
    Actions,
    Local,
}

impl Host {
    /// Resolves `Auto` using the value of `GITHUB_ACTIONS`.
    pub fn resolve(self, github_actions: Option<&OsStr>) -> ResolvedHost {
        match self {
            Host::Actions => ResolvedHost::Actions,
            Host::Local => ResolvedHost::Local,
            Host::Auto if github_actions == Some(OsStr::new("true")) => ResolvedHost::Actions,
            Host::Auto => ResolvedHost::Local,
        }
    }
}
