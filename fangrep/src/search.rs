use regex::Regex;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::process;
use std::sync::Arc;
use tracing::{debug, info, trace};

use crate::config::SearchConfig;
use crate::errors::{SearchError, SearchResult};
use crate::filters::is_hidden;
use crate::scanner::{emit_matches, scan_file};
use crate::tasks::TaskGroup;

/// One search invocation: the compiled matcher plus traversal options.
///
/// Built once by the driver and shared read-only by every traversal and
/// scan task for the lifetime of the search.
#[derive(Debug)]
pub struct SearchRequest {
    matcher: Regex,
    root_path: PathBuf,
    recursive: bool,
    include_hidden: bool,
}

impl SearchRequest {
    /// Wraps an already-compiled matcher. The root path is normalized
    /// before use.
    pub fn new(matcher: Regex, root_path: &Path, recursive: bool, include_hidden: bool) -> Self {
        Self {
            matcher,
            root_path: normalize_path(root_path),
            recursive,
            include_hidden,
        }
    }

    /// Compiles the configured pattern and builds the request.
    pub fn from_config(config: &SearchConfig) -> SearchResult<Self> {
        let matcher = Regex::new(&config.pattern)
            .map_err(|e| SearchError::invalid_pattern(e.to_string()))?;
        Ok(Self::new(
            matcher,
            &config.root_path,
            config.recursive,
            config.include_hidden,
        ))
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }
}

/// Runs one search to completion.
///
/// Starts a single traversal task on the root path and blocks until every
/// task spawned beneath it has finished. Matched lines are written to
/// stdout by the scan tasks as they complete; there is no central
/// collector, so output order across files varies run to run. Any
/// filesystem error inside a task aborts the whole process (see [`fatal`]).
pub fn search(request: SearchRequest) {
    info!(
        "starting search in {} (recursive: {}, hidden: {})",
        request.root_path.display(),
        request.recursive,
        request.include_hidden
    );

    let request = Arc::new(request);
    let tasks = TaskGroup::new();
    let root = request.root_path.clone();

    tasks.register();
    spawn_traversal(request, root, tasks.clone());
    tasks.wait();

    info!("search complete");
}

/// Prints one diagnostic line and terminates the process.
///
/// Errors are never recovered locally: the first failing task takes the
/// whole search down, abandoning all in-flight tasks.
fn fatal(err: &SearchError) -> ! {
    eprintln!("fangrep: {err}");
    process::exit(1);
}

/// Spawns a traversal task for `path`. The caller must already have
/// registered the task with `tasks`.
fn spawn_traversal(request: Arc<SearchRequest>, path: PathBuf, tasks: TaskGroup) {
    rayon::spawn(move || {
        let _done = tasks.guard();
        if let Err(err) = traverse(&request, &path, &tasks) {
            fatal(&err);
        }
    });
}

/// Spawns a scan task for `path`. The caller must already have registered
/// the task with `tasks`.
fn spawn_scan(request: Arc<SearchRequest>, path: PathBuf, tasks: TaskGroup) {
    rayon::spawn(move || {
        let _done = tasks.guard();
        if let Err(err) = scan_and_emit(&request, &path) {
            fatal(&err);
        }
    });
}

/// Inspects one path and fans out further work.
///
/// Directories enumerate their children and spawn one task per surviving
/// entry: a traversal for each subdirectory when recursion is enabled, a
/// scan for every non-directory regardless of the recursion flag. A path
/// that is itself a file is handed straight to a scanner after passing the
/// hidden-entry filter.
fn traverse(request: &Arc<SearchRequest>, path: &Path, tasks: &TaskGroup) -> SearchResult<()> {
    let metadata = fs::metadata(path).map_err(|e| SearchError::path_stat(path, e))?;

    if metadata.is_dir() {
        debug!("traversing directory: {}", path.display());
        let entries = fs::read_dir(path).map_err(|e| SearchError::directory_read(path, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| SearchError::directory_read(path, e))?;
            let child = entry.path();

            if is_hidden(&child) && !request.include_hidden {
                trace!("skipping hidden entry: {}", child.display());
                continue;
            }

            let file_type = entry
                .file_type()
                .map_err(|e| SearchError::path_stat(&child, e))?;
            if file_type.is_dir() {
                if request.recursive {
                    tasks.register();
                    spawn_traversal(Arc::clone(request), child, tasks.clone());
                } else {
                    trace!("not recursing into: {}", child.display());
                }
            } else {
                tasks.register();
                spawn_scan(Arc::clone(request), child, tasks.clone());
            }
        }
    } else if !is_hidden(path) || request.include_hidden {
        tasks.register();
        spawn_scan(Arc::clone(request), path.to_path_buf(), tasks.clone());
    }

    Ok(())
}

/// Scans one file and writes any matches straight to stdout.
fn scan_and_emit(request: &SearchRequest, path: &Path) -> SearchResult<()> {
    let matches = scan_file(&request.matcher, path)?;
    if !matches.is_empty() {
        emit_matches(&mut io::stdout(), &matches)?;
    }
    Ok(())
}

/// Collapses redundant separators, `.` segments, and lexically resolvable
/// `..` segments, without touching the filesystem.
pub(crate) fn normalize_path(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let can_pop = matches!(
                    cleaned.components().next_back(),
                    Some(Component::Normal(_))
                );
                let at_root = matches!(
                    cleaned.components().next_back(),
                    Some(Component::RootDir | Component::Prefix(_))
                );
                if can_pop {
                    cleaned.pop();
                } else if !at_root {
                    cleaned.push("..");
                }
            }
            other => cleaned.push(other),
        }
    }
    if cleaned.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        cleaned
    }
}
