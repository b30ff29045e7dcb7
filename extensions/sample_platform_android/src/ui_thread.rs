//! Dispatch onto the activity's UI thread
//!
//! `android_main` runs on its own thread, but window and view methods check
//! that they are called from the thread that created the view hierarchy. The
//! UI thread's looper is captured while the platform loads the library
//! (during `NativeActivity.onCreate`, on the UI thread) and jobs are posted to
//! it through a pipe registered with that looper.

use std::os::fd::{AsFd, AsRawFd, BorrowedFd, OwnedFd};
use std::sync::{Arc, OnceLock};

use ndk::looper::{FdEvent, ForeignLooper};
use rustix::pipe::{pipe_with, PipeFlags};

use sample_platform::{PlatformError, Result, UiJob, UiJobQueue};

static UI_THREAD: OnceLock<UiThread> = OnceLock::new();

/// Handle for posting jobs to the UI thread's looper
pub struct UiThread {
    queue: Arc<UiJobQueue>,
    wake_fd: OwnedFd,
    // Keeps the looper alive for as long as the callback is registered
    _looper: ForeignLooper,
}

impl UiThread {
    fn attach_to_current_thread() -> Result<Self> {
        let looper = ForeignLooper::for_thread().ok_or_else(|| {
            PlatformError::Unsupported("calling thread has no looper".to_string())
        })?;

        let (read_fd, wake_fd) = pipe_with(PipeFlags::CLOEXEC | PipeFlags::NONBLOCK)
            .map_err(|e| PlatformError::Unsupported(format!("pipe: {}", e)))?;

        let queue = Arc::new(UiJobQueue::new());
        let callback_queue = Arc::clone(&queue);
        // SAFETY: the read end moves into the callback, which the looper keeps
        // for as long as the registration exists.
        let read_borrowed = unsafe { BorrowedFd::borrow_raw(read_fd.as_raw_fd()) };

        looper
            .add_fd_with_callback(read_borrowed, FdEvent::INPUT, move |fd, _events| {
                let _keep_open = &read_fd;
                drain_wake_bytes(fd);
                callback_queue.run_pending();
                true
            })
            .map_err(|e| PlatformError::Unsupported(format!("looper registration: {:?}", e)))?;

        Ok(Self {
            queue,
            wake_fd,
            _looper: looper,
        })
    }

    /// Queue `job` and wake the UI thread if it is idle
    pub fn post(&self, job: UiJob) -> Result<()> {
        if self.queue.push(job) {
            rustix::io::write(self.wake_fd.as_fd(), &[1u8])
                .map_err(|e| PlatformError::Unsupported(format!("wake UI thread: {}", e)))?;
        }
        Ok(())
    }
}

fn drain_wake_bytes(fd: BorrowedFd<'_>) {
    let mut buf = [0u8; 64];
    while matches!(rustix::io::read(fd, &mut buf), Ok(n) if n > 0) {}
}

/// Capture the calling thread as the UI thread (first call wins).
///
/// Must run on the UI thread; the library constructor and `JNI_OnLoad` both do.
/// Never panics, so it is safe to call from a library constructor.
pub fn capture_ui_thread() -> bool {
    if UI_THREAD.get().is_some() {
        return true;
    }
    match UiThread::attach_to_current_thread() {
        Ok(ui_thread) => {
            let _ = UI_THREAD.set(ui_thread);
            true
        }
        Err(e) => {
            log::warn!("UI thread not captured: {}", e);
            false
        }
    }
}

/// The captured UI thread, if the library was loaded on one
pub fn ui_thread() -> Option<&'static UiThread> {
    UI_THREAD.get()
}
