//! Profiling scopes based on the `puffin` crate.
//!
//! With the `profiling` feature disabled the scope macros expand to nothing.

#[cfg(feature = "profiling")]
pub use puffin::{profile_function, profile_scope};

#[cfg(not(feature = "profiling"))]
mod noop {
    macro_rules! profile_function {
        ($($arg:tt)*) => {};
    }

    macro_rules! profile_scope {
        ($($arg:tt)*) => {};
    }

    pub(crate) use profile_function;
    pub(crate) use profile_scope;
}

#[cfg(not(feature = "profiling"))]
pub(crate) use noop::{profile_function, profile_scope};

/// Turn scope collection on or off.
#[inline]
pub fn set_enabled(enabled: bool) {
    #[cfg(feature = "profiling")]
    puffin::set_scopes_on(enabled);
    #[cfg(not(feature = "profiling"))]
    let _ = enabled;
}

/// Mark the start of a new profiling frame.
///
/// Call this once per host frame, before `update`.
#[inline]
pub fn new_frame() {
    #[cfg(feature = "profiling")]
    puffin::GlobalProfiler::lock().new_frame();
}
