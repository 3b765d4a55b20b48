//! The animation loop.
//!
//! A [`Driver`] ties a [`Field`] to one drawing surface and to a
//! [`FrameHost`] that schedules callbacks once per display refresh. The host
//! calls [`Driver::on_frame`] whenever a requested frame fires; the driver
//! composites and requests the next one while it is running.
//!
//! Stopping is explicit: [`Driver::stop`] clears the running flag, cancels
//! the pending frame by handle and asks the host to drop its resize listener.
//! A frame that fires anyway (hosts that cannot cancel) finds the driver
//! stopped and returns without touching anything.

use crate::config::FieldConfig;
use crate::error::ConfigError;
use crate::field::Field;
use crate::surface::Surface;

/// Per-refresh callback scheduling supplied by the host environment.
pub trait FrameHost {
    /// Identifies one requested frame.
    type Handle: Copy + std::fmt::Debug;

    /// Ask for [`Driver::on_frame`] to run at the next refresh. `None` means
    /// the host could not schedule.
    fn request_frame(&mut self) -> Option<Self::Handle>;

    /// Withdraw a previously requested frame.
    fn cancel_frame(&mut self, handle: Self::Handle);

    /// Drop resize listeners and any other callbacks registered for the
    /// driver. Called once, on stop.
    fn release(&mut self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopState {
    Idle,
    Running,
    Stopped,
}

/// Owns the field, the surface and the frame loop.
pub struct Driver<S: Surface, H: FrameHost> {
    field: Field,
    surface: Option<S>,
    host: H,
    state: LoopState,
    pending: Option<H::Handle>,
}

impl<S: Surface, H: FrameHost> Driver<S, H> {
    /// Attach to a surface. A missing surface yields a driver that never
    /// starts; a rejected config yields an error.
    pub fn mount(surface: Option<S>, host: H, config: FieldConfig) -> Result<Self, ConfigError> {
        Ok(Self::with_field(surface, host, Field::new(config)?))
    }

    /// Attach with a prepared field, e.g. one built with
    /// [`Field::with_seed`].
    pub fn with_field(surface: Option<S>, host: H, field: Field) -> Self {
        Self {
            field,
            surface,
            host,
            state: LoopState::Idle,
            pending: None,
        }
    }

    /// Size the field to the surface and schedule the first frame.
    ///
    /// Returns `false` without side effects when there is no surface or the
    /// loop already ran.
    pub fn start(&mut self) -> bool {
        if self.state != LoopState::Idle {
            return false;
        }
        let Some(surface) = &self.surface else {
            log::warn!("warp field has no drawing surface; animation disabled");
            return false;
        };

        let (width, height) = surface.size();
        self.field.resize(width, height);
        self.state = LoopState::Running;
        self.pending = self.host.request_frame();
        log::info!("warp field started on {}x{}", width, height);
        true
    }

    /// Frame callback: composite one frame and schedule the next.
    pub fn on_frame(&mut self) {
        if self.state != LoopState::Running {
            return;
        }
        self.pending = None;
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        self.field.tick(surface);
        self.pending = self.host.request_frame();
    }

    /// Resize the surface and respawn the field for the new dimensions.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.state == LoopState::Stopped {
            return;
        }
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        surface.set_size(width, height);
        self.field.resize(width, height);
    }

    /// Halt the loop for good. Safe to call more than once.
    pub fn stop(&mut self) {
        if self.state == LoopState::Stopped {
            return;
        }
        self.state = LoopState::Stopped;
        if let Some(handle) = self.pending.take() {
            self.host.cancel_frame(handle);
        }
        self.host.release();
        log::info!("warp field stopped after {} frames", self.field.frames());
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

impl<S: Surface, H: FrameHost> Drop for Driver<S, H> {
    fn drop(&mut self) {
        self.stop();
    }
}

/// A host driven by hand: frames fire only when the caller says so.
///
/// Useful wherever there is no display refresh to hook into, such as tests,
/// benchmarks and offline rendering.
#[derive(Debug, Default)]
pub struct ManualHost {
    next_handle: u32,
    queued: Option<u32>,
    requested: usize,
    cancelled: Vec<u32>,
    released: usize,
}

impl ManualHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle of the frame waiting to fire.
    pub fn queued(&self) -> Option<u32> {
        self.queued
    }

    /// Take the queued frame, if any; the caller then runs
    /// [`Driver::on_frame`].
    pub fn take_queued(&mut self) -> Option<u32> {
        self.queued.take()
    }

    /// Total frames requested.
    pub fn requested(&self) -> usize {
        self.requested
    }

    /// Handles cancelled so far.
    pub fn cancelled(&self) -> &[u32] {
        &self.cancelled
    }

    /// Times [`FrameHost::release`] was called.
    pub fn released(&self) -> usize {
        self.released
    }
}

impl FrameHost for ManualHost {
    type Handle = u32;

    fn request_frame(&mut self) -> Option<u32> {
        self.next_handle += 1;
        self.requested += 1;
        self.queued = Some(self.next_handle);
        self.queued
    }

    fn cancel_frame(&mut self, handle: u32) {
        if self.queued == Some(handle) {
            self.queued = None;
        }
        self.cancelled.push(handle);
    }

    fn release(&mut self) {
        self.released += 1;
    }
}

/// Run `frames` frames through a [`ManualHost`]-driven driver.
pub fn run_frames<S: Surface>(driver: &mut Driver<S, ManualHost>, frames: usize) {
    for _ in 0..frames {
        if driver.host_mut().take_queued().is_none() {
            break;
        }
        driver.on_frame();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;

    fn driver(surface: Option<RecordingSurface>) -> Driver<RecordingSurface, ManualHost> {
        Driver::with_field(
            surface,
            ManualHost::new(),
            Field::with_seed(FieldConfig::default(), 11).unwrap(),
        )
    }

    #[test]
    fn test_start_schedules_first_frame() {
        let mut d = driver(Some(RecordingSurface::new(1000, 800)));
        assert!(d.start());
        assert!(d.is_running());
        assert_eq!(d.field().len(), 20);
        assert_eq!(d.field().size(), (1000, 800));
        assert_eq!(d.host().requested(), 1);
        assert!(d.host().queued().is_some());

        // second start is refused
        assert!(!d.start());
        assert_eq!(d.host().requested(), 1);
    }

    #[test]
    fn test_missing_surface_never_starts() {
        let mut d = driver(None);
        assert!(!d.start());
        assert!(!d.is_running());
        assert_eq!(d.host().requested(), 0);

        d.on_frame();
        d.resize(100, 100);
        assert_eq!(d.field().frames(), 0);
        assert!(d.field().is_empty());
    }

    #[test]
    fn test_frames_reschedule() {
        let mut d = driver(Some(RecordingSurface::new(640, 480)));
        d.start();
        run_frames(&mut d, 10);
        assert_eq!(d.field().frames(), 10);
        assert_eq!(d.host().requested(), 11);
    }

    #[test]
    fn test_stop_cancels_pending_and_releases() {
        let mut d = driver(Some(RecordingSurface::new(640, 480)));
        d.start();
        run_frames(&mut d, 3);
        let pending = d.host().queued().unwrap();

        d.stop();
        assert!(!d.is_running());
        assert_eq!(d.host().cancelled(), &[pending]);
        assert_eq!(d.host().queued(), None);
        assert_eq!(d.host().released(), 1);
    }

    #[test]
    fn test_stop_twice_is_harmless() {
        let mut d = driver(Some(RecordingSurface::new(640, 480)));
        d.start();
        d.stop();
        let requested = d.host().requested();

        d.stop();
        assert_eq!(d.host().released(), 1);
        assert_eq!(d.host().cancelled().len(), 1);
        assert_eq!(d.host().requested(), requested);
    }

    #[test]
    fn test_late_frame_after_stop_is_noop() {
        let mut d = driver(Some(RecordingSurface::new(640, 480)));
        d.start();
        run_frames(&mut d, 2);
        d.stop();

        let particles = d.field().particles().to_vec();
        let frames = d.field().frames();
        let requested = d.host().requested();

        // a host that could not cancel fires the frame anyway
        d.on_frame();

        assert_eq!(d.field().particles(), particles.as_slice());
        assert_eq!(d.field().frames(), frames);
        assert_eq!(d.host().requested(), requested);
    }

    #[test]
    fn test_resize_rebuilds_field() {
        let mut d = driver(Some(RecordingSurface::new(640, 480)));
        d.start();
        run_frames(&mut d, 5);

        d.resize(1920, 1080);
        assert_eq!(d.field().len(), 20);
        assert_eq!(d.field().size(), (1920, 1080));
        assert_eq!(d.surface().map(|s| s.size()), Some((1920, 1080)));
        assert!(d.is_running());
    }

    #[test]
    fn test_resize_after_stop_ignored() {
        let mut d = driver(Some(RecordingSurface::new(640, 480)));
        d.start();
        d.stop();
        d.resize(10, 10);
        assert_eq!(d.field().size(), (640, 480));
    }

    #[test]
    fn test_mount_rejects_invalid_config() {
        let config = FieldConfig::default().with_speed_range(5.0..2.0);
        let mounted = Driver::mount(
            Some(RecordingSurface::new(800, 600)),
            ManualHost::new(),
            config,
        );
        assert!(matches!(mounted, Err(ConfigError::SpeedRange { .. })));

        let config = FieldConfig::default().with_speed_range(2.0..f32::INFINITY);
        let mounted = Driver::mount(
            Some(RecordingSurface::new(800, 600)),
            ManualHost::new(),
            config,
        );
        assert!(matches!(mounted, Err(ConfigError::NonFinite { .. })));
    }
}
