//! Native library naming and load-once registry
//!
//! The platform's `NativeActivity` resolves the library advertised in the
//! manifest and calls into its `ANativeActivity_onCreate` export. This module
//! owns that name, the shared-object file it maps to, and a registry that
//! guarantees the library is opened at most once per process no matter how
//! often the activity is recreated.

use std::env::consts::{DLL_PREFIX, DLL_SUFFIX};
use std::fmt;
use std::str::FromStr;
use std::sync::{Mutex, PoisonError};

use crate::error::{PlatformError, Result};

/// Name of the co-packaged sample library
pub const MULTIPLATFORM_SAMPLE: &str = "MultiPlatformSample";

/// Activity meta-data key the platform reads to find the native library
pub const LIB_NAME_META_DATA: &str = "android.app.lib_name";

/// Entry point the native-activity contract requires the library to export
pub const NATIVE_ACTIVITY_ENTRY: &str = "ANativeActivity_onCreate";

/// A bare dynamic library name (no prefix, suffix, or directory)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LibraryName(String);

impl LibraryName {
    /// Validate and wrap a bare library name
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(PlatformError::InvalidLibraryName(
                "library name is empty".to_string(),
            ));
        }
        if let Some(bad) = name
            .chars()
            .find(|c| matches!(c, '/' | '\\' | '.') || c.is_whitespace())
        {
            return Err(PlatformError::InvalidLibraryName(format!(
                "'{}' contains '{}'; expected a bare name like '{}'",
                name, bad, MULTIPLATFORM_SAMPLE
            )));
        }
        Ok(Self(name))
    }

    /// The sample library this shim exists to launch
    pub fn multiplatform_sample() -> Self {
        Self(MULTIPLATFORM_SAMPLE.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name following the platform's shared-object convention
    /// (`libMultiPlatformSample.so` on Android)
    pub fn file_name(&self) -> String {
        format!("{}{}{}", DLL_PREFIX, self.0, DLL_SUFFIX)
    }

    /// Meta-data entry that registers this library with the native activity
    pub fn manifest_meta_data(&self) -> (&'static str, &str) {
        (LIB_NAME_META_DATA, &self.0)
    }
}

impl fmt::Display for LibraryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for LibraryName {
    type Err = PlatformError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

/// A library that has been opened and stays mapped for the process lifetime
#[derive(Debug)]
pub struct LoadedLibrary {
    name: LibraryName,
    handle: Option<libloading::Library>,
}

impl LoadedLibrary {
    /// Record a library the platform mapped on our behalf
    pub fn resident(name: LibraryName) -> Self {
        Self { name, handle: None }
    }

    /// Record a library opened through `libloading`
    pub fn with_handle(name: LibraryName, handle: libloading::Library) -> Self {
        Self {
            name,
            handle: Some(handle),
        }
    }

    pub fn name(&self) -> &LibraryName {
        &self.name
    }

    /// Whether this process holds its own handle to the library
    pub fn has_handle(&self) -> bool {
        self.handle.is_some()
    }
}

/// Resolves a library name to a mapped library
pub trait LibraryLoader {
    fn load(&self, name: &LibraryName) -> Result<LoadedLibrary>;
}

/// Loader backed by the system dynamic linker
///
/// Opens the library from the platform search path and, unless disabled,
/// checks that the native-activity entry point resolves.
#[derive(Debug, Clone)]
pub struct DylibLoader {
    entry_symbol: Option<String>,
}

impl DylibLoader {
    pub fn new() -> Self {
        Self {
            entry_symbol: Some(NATIVE_ACTIVITY_ENTRY.to_string()),
        }
    }

    /// Require a different exported symbol, or none at all
    pub fn with_entry_symbol(mut self, symbol: Option<&str>) -> Self {
        self.entry_symbol = symbol.map(str::to_string);
        self
    }
}

impl Default for DylibLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DylibLoader {
    /// Check the entry symbol on an opened library and record it
    fn verify_entry(
        &self,
        name: &LibraryName,
        file_name: String,
        library: libloading::Library,
    ) -> Result<LoadedLibrary> {
        if let Some(symbol) = &self.entry_symbol {
            // SAFETY: the symbol is only looked up, never called.
            let found = unsafe { library.get::<unsafe extern "C" fn()>(symbol.as_bytes()) };
            if found.is_err() {
                return Err(PlatformError::UnresolvedSymbol {
                    library: file_name,
                    symbol: symbol.clone(),
                });
            }
        }

        Ok(LoadedLibrary::with_handle(name.clone(), library))
    }
}

impl LibraryLoader for DylibLoader {
    fn load(&self, name: &LibraryName) -> Result<LoadedLibrary> {
        let file_name = name.file_name();

        // SAFETY: the library is our own cdylib; its initializers are the ones
        // the platform already ran (or would run) when starting the activity.
        let library = unsafe { libloading::Library::new(&file_name) }.map_err(|e| {
            PlatformError::LibraryLoad {
                library: file_name.clone(),
                reason: e.to_string(),
            }
        })?;

        self.verify_entry(name, file_name, library)
    }
}

/// Result of a [`LibraryRegistry::load_once`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// This call opened the library
    Loaded,
    /// An earlier call already did; the loader was not invoked
    AlreadyLoaded,
}

/// Records which libraries this process has loaded
///
/// Calls are serialized by an internal lock, so the first successful load
/// happens-before every later call observes `AlreadyLoaded`.
#[derive(Debug)]
pub struct LibraryRegistry {
    loaded: Mutex<Vec<LoadedLibrary>>,
}

impl LibraryRegistry {
    pub const fn new() -> Self {
        Self {
            loaded: Mutex::new(Vec::new()),
        }
    }

    /// Load `name` through `loader` unless it is already loaded.
    ///
    /// Failures are returned unchanged and leave nothing recorded.
    pub fn load_once<L>(&self, loader: &L, name: &LibraryName) -> Result<LoadOutcome>
    where
        L: LibraryLoader + ?Sized,
    {
        let mut loaded = self.loaded.lock().unwrap_or_else(PoisonError::into_inner);

        if loaded.iter().any(|lib| lib.name() == name) {
            tracing::debug!("Library {} already loaded", name);
            return Ok(LoadOutcome::AlreadyLoaded);
        }

        let library = loader.load(name)?;
        tracing::info!(
            "Loaded native library {} ({})",
            name,
            if library.has_handle() {
                "dlopen"
            } else {
                "resident"
            }
        );
        loaded.push(library);
        Ok(LoadOutcome::Loaded)
    }

    pub fn is_loaded(&self, name: &LibraryName) -> bool {
        self.loaded
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|lib| lib.name() == name)
    }

    pub fn len(&self) -> usize {
        self.loaded
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for LibraryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

static PROCESS_REGISTRY: LibraryRegistry = LibraryRegistry::new();

/// The registry shared by every activity instance in this process
pub fn process_registry() -> &'static LibraryRegistry {
    &PROCESS_REGISTRY
}
