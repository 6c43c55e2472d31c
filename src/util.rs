use std::time::Instant;

/// Drop timer that logs how long a decomposition phase took.
///
/// ```ignore
/// let _t = Timed::debug("dilate");
/// // ... solve segments ...
/// // logs "dilate: 1.234ms" when _t goes out of scope
/// ```
pub(crate) struct Timed {
    name: &'static str,
    start: Option<Instant>,
    level: log::Level,
}

impl Timed {
    /// Timer reported at DEBUG level; the start is announced at TRACE.
    pub(crate) fn debug(name: &'static str) -> Self {
        log::trace!("{}...", name);
        Self {
            name,
            start: now(),
            level: log::Level::Debug,
        }
    }

    /// Timer reported at TRACE level, for per-worker phases.
    pub(crate) fn trace(name: &'static str) -> Self {
        Self {
            name,
            start: now(),
            level: log::Level::Trace,
        }
    }
}

impl Drop for Timed {
    fn drop(&mut self) {
        if let Some(start) = self.start {
            log::log!(self.level, "{}: {:.3?}", self.name, start.elapsed());
        }
    }
}

// `Instant::now` panics on wasm32-unknown-unknown.
fn now() -> Option<Instant> {
    #[cfg(target_arch = "wasm32")]
    {
        None
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        Some(Instant::now())
    }
}
