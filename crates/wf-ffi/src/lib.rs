//! C ABI adapter for [`wf_core::Session`].
//!
//! Exposes `init`/`process`/`get_results` with C-compatible linkage, backed
//! by an opaque session handle. The handle is an owned `Box<Session>`
//! round-tripped through `Box::into_raw`/`Box::from_raw`: there is no hidden
//! global, so distinct handles measure distinct recordings independently.
//!
//! This crate is a shim, not part of the measurement design — it holds no
//! logic beyond translating between C arguments and `wf-core`'s API, and is
//! excluded from the workspace's default build because it needs
//! `unsafe_code` where the rest of the workspace denies it.

use std::panic::{self, AssertUnwindSafe};
use std::ptr;

use wf_core::Session;

/// Opaque handle to a measurement session. Only ever seen by callers as a
/// pointer; never dereferenced outside this crate.
pub struct WfSession(Session);

/// C-layout mirror of [`wf_core::Results`].
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct WfResults {
    pub rms_percent: f32,
    pub quasi_peak: f32,
    pub frequency_hz: f32,
}

impl From<wf_core::Results> for WfResults {
    fn from(r: wf_core::Results) -> Self {
        Self {
            rms_percent: r.rms_percent,
            quasi_peak: r.quasi_peak,
            frequency_hz: r.frequency_hz,
        }
    }
}

/// Return codes for [`wf_session_process`] and [`wf_session_get_results`].
pub const WF_OK: i32 = 0;
/// The handle pointer was null.
pub const WF_ERR_NULL_HANDLE: i32 = -1;
/// The sample buffer pointer was null (and `len` was nonzero).
pub const WF_ERR_NULL_BUFFER: i32 = -2;
/// Fewer samples were supplied than one 10 s `process` call requires.
pub const WF_ERR_INSUFFICIENT_SAMPLES: i32 = -3;
/// A Rust panic was caught at the FFI boundary.
pub const WF_ERR_PANIC: i32 = -4;

/// Runs `body`, catching panics so they never unwind across the FFI
/// boundary (doing so is undefined behavior). Returns `default` on panic.
fn guard<F: FnOnce() -> i32>(default: i32, body: F) -> i32 {
    match panic::catch_unwind(AssertUnwindSafe(body)) {
        Ok(code) => code,
        Err(payload) => {
            let msg = payload
                .downcast_ref::<&str>()
                .copied()
                .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
                .unwrap_or("non-string panic payload");
            tracing::error!(panic = msg, "caught panic at wf-ffi boundary");
            default
        }
    }
}

/// Creates a new measurement session for the given sample rate and test
/// tone frequency. Returns null if the arguments are degenerate (zero
/// sample rate or non-finite/non-positive test frequency).
///
/// The returned pointer must eventually be passed to exactly one
/// [`wf_session_free`] call.
#[unsafe(no_mangle)]
pub extern "C" fn wf_session_init(sample_rate_hz: u32, test_frequency_hz: f32) -> *mut WfSession {
    if sample_rate_hz == 0 || !test_frequency_hz.is_finite() || test_frequency_hz <= 0.0 {
        tracing::warn!(sample_rate_hz, test_frequency_hz, "refusing to init session");
        return ptr::null_mut();
    }
    let outcome = panic::catch_unwind(|| Session::init(sample_rate_hz, test_frequency_hz));
    match outcome {
        Ok(session) => Box::into_raw(Box::new(WfSession(session))),
        Err(_) => {
            tracing::error!("panic while initializing session");
            ptr::null_mut()
        }
    }
}

/// Advances the session by exactly one 10-second `process` call.
///
/// `samples` must point to at least `len` valid `i16` values. `filter_type`
/// selects the weighting path (0 unweighted, 1 DIN, 2 Wow, 3 Flutter; any
/// other value falls back to unweighted). Returns `WF_OK` on success, or a
/// negative `WF_ERR_*` code.
///
/// # Safety
/// `handle` must be a live pointer returned by [`wf_session_init`] and not
/// yet passed to [`wf_session_free`]. `samples` must be valid for reads of
/// `len` elements, or null if `len` is zero.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn wf_session_process(
    handle: *mut WfSession,
    samples: *const i16,
    len: usize,
    filter_type: i32,
) -> i32 {
    if handle.is_null() {
        return WF_ERR_NULL_HANDLE;
    }
    if samples.is_null() && len > 0 {
        return WF_ERR_NULL_BUFFER;
    }

    guard(WF_ERR_PANIC, || {
        let session = unsafe { &mut (*handle).0 };
        let slice = if len == 0 {
            &[]
        } else {
            unsafe { std::slice::from_raw_parts(samples, len) }
        };
        match session.process(slice, filter_type) {
            Ok(()) => WF_OK,
            Err(wf_core::Error::InsufficientSamples { got, needed }) => {
                tracing::warn!(got, needed, "process rejected a short block");
                WF_ERR_INSUFFICIENT_SAMPLES
            }
        }
    })
}

/// Writes the session's current measurement snapshot into `*out`. Returns
/// `WF_OK` on success, or a negative `WF_ERR_*` code.
///
/// # Safety
/// `handle` must be a live pointer returned by [`wf_session_init`]. `out`
/// must point to a valid, writable [`WfResults`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn wf_session_get_results(handle: *const WfSession, out: *mut WfResults) -> i32 {
    if handle.is_null() {
        return WF_ERR_NULL_HANDLE;
    }
    if out.is_null() {
        return WF_ERR_NULL_BUFFER;
    }
    guard(WF_ERR_PANIC, || {
        let session = unsafe { &(*handle).0 };
        unsafe { ptr::write(out, session.get_results().into()) };
        WF_OK
    })
}

/// Resets the session to its post-`init` state, as if no samples had been
/// processed. Returns `WF_OK` on success, or `WF_ERR_NULL_HANDLE`.
///
/// # Safety
/// `handle` must be a live pointer returned by [`wf_session_init`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn wf_session_reset(handle: *mut WfSession) -> i32 {
    if handle.is_null() {
        return WF_ERR_NULL_HANDLE;
    }
    guard(WF_ERR_PANIC, || {
        unsafe { (*handle).0.reset() };
        WF_OK
    })
}

/// Destroys a session and frees its memory. `handle` must not be used
/// again after this call.
///
/// # Safety
/// `handle` must be a pointer returned by [`wf_session_init`] that has not
/// already been freed, or null (in which case this is a no-op).
#[unsafe(no_mangle)]
pub unsafe extern "C" fn wf_session_free(handle: *mut WfSession) {
    if handle.is_null() {
        return;
    }
    let _ = guard(WF_OK, || {
        drop(unsafe { Box::from_raw(handle) });
        WF_OK
    });
}
