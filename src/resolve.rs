use crate::context::PrimeContext;
use crate::locator::SearchSource;

/// Outcome of resolving one command token against the staged root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedPath {
    /// The token names an existing path under the staged root, as written.
    Literal(String),
    /// The token had to be searched for. `path` is root-relative when found
    /// inside the staged tree, absolute when found on the host.
    Searched { path: String, source: SearchSource },
    /// Searched everywhere without a match.
    NotFound,
}

impl ResolvedPath {
    pub fn search_required(&self) -> bool {
        !matches!(self, Self::Literal(_))
    }

    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Literal(path) | Self::Searched { path, .. } => Some(path),
            Self::NotFound => None,
        }
    }
}

/// Drop one leading `/`, then one leading root prefix (`$SNAP/`).
pub fn strip_command_leaders<'a>(command: &'a str, context: &PrimeContext) -> &'a str {
    let command = command.strip_prefix('/').unwrap_or(command);
    command
        .strip_prefix(context.root_prefix().as_str())
        .unwrap_or(command)
}

pub fn resolve_command_path(command: &str, context: &PrimeContext) -> ResolvedPath {
    let command = strip_command_leaders(command, context);
    let root = context.root();
    if root.join(command).exists() {
        return ResolvedPath::Literal(command.to_string());
    }

    let Some(found) = context.locator().locate(command, root) else {
        return ResolvedPath::NotFound;
    };
    let path = match found.path.strip_prefix(root) {
        Ok(relative) => relative.to_string_lossy().into_owned(),
        Err(_) => found.path.to_string_lossy().into_owned(),
    };
    ResolvedPath::Searched {
        path,
        source: found.source,
    }
}
