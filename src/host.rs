//! The hosting environment: containers, resize notifications, and the frame callback.
//!
//! A marquee looks up its container once at construction, subscribes to resize
//! notifications through a [`ResizeSubscription`] it owns, and is paced by a
//! [`FrameClock`]. Dropping the subscription (or calling
//! [`ResizeSubscription::unsubscribe`]) removes it from the host's broadcaster, so a torn
//! down marquee leaves no callback behind.

use core::cell::RefCell;
use std::{
    collections::BTreeMap,
    sync::{Arc, Weak},
};

use embassy_sync::{
    blocking_mutex::{Mutex, raw::CriticalSectionRawMutex},
    signal::Signal,
};

use crate::Result;

/// Display area size, in host pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Viewport {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Viewport {
    /// Create a viewport.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// A host display area that a marquee draws into.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Container {
    /// Host-assigned name.
    pub id: String,
    /// Size at lookup time.
    pub viewport: Viewport,
}

/// Services the hosting environment provides to a marquee.
pub trait Host {
    /// Look up a container by id. `None` when no such container exists.
    fn container(&self, container_id: &str) -> Option<Container>;

    /// Register for resize notifications.
    fn subscribe_resize(&self) -> ResizeSubscription;
}

/// Per-frame callback supplied by the host.
///
/// `next_frame` completes once per display refresh. Returning an error (typically
/// [`Error::HostTornDown`](crate::Error::HostTornDown)) ends
/// [`Marquee::run`](crate::Marquee::run).
pub trait FrameClock {
    /// Wait for the next display refresh.
    async fn next_frame(&mut self) -> Result<()>;
}

impl<C: FrameClock + ?Sized> FrameClock for &mut C {
    async fn next_frame(&mut self) -> Result<()> {
        (**self).next_frame().await
    }
}

/// Holds only the most recent size; older pending sizes are overwritten.
type ResizeSignal = Signal<CriticalSectionRawMutex, Viewport>;

#[derive(Default)]
struct Subscribers {
    next_id: u64,
    by_id: BTreeMap<u64, Arc<ResizeSignal>>,
}

type Registry = Mutex<CriticalSectionRawMutex, RefCell<Subscribers>>;

/// Fans resize notifications out to every live [`ResizeSubscription`].
///
/// Safe to call from a thread other than the one running the frame loop.
pub struct ResizeBroadcaster {
    registry: Arc<Registry>,
}

impl ResizeBroadcaster {
    /// Create a broadcaster with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Mutex::new(RefCell::new(Subscribers::default()))),
        }
    }

    /// Register a new subscriber.
    #[must_use]
    pub fn subscribe(&self) -> ResizeSubscription {
        let signal = Arc::new(ResizeSignal::new());
        let id = self.registry.lock(|subscribers| {
            let mut subscribers = subscribers.borrow_mut();
            let id = subscribers.next_id;
            subscribers.next_id = id.wrapping_add(1);
            subscribers.by_id.insert(id, Arc::clone(&signal));
            id
        });
        log::debug!("host: resize subscriber {id} registered");
        ResizeSubscription {
            id,
            signal,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Deliver `viewport` to every subscriber.
    pub fn broadcast(&self, viewport: Viewport) {
        self.registry.lock(|subscribers| {
            for signal in subscribers.borrow().by_id.values() {
                signal.signal(viewport);
            }
        });
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.registry
            .lock(|subscribers| subscribers.borrow().by_id.len())
    }
}

impl Default for ResizeBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to one registration with a [`ResizeBroadcaster`].
///
/// Dropping the handle unsubscribes.
pub struct ResizeSubscription {
    id: u64,
    signal: Arc<ResizeSignal>,
    registry: Weak<Registry>,
}

impl ResizeSubscription {
    /// Take the latest size delivered since the last call, if any.
    #[must_use]
    pub fn try_take(&self) -> Option<Viewport> {
        self.signal.try_take()
    }

    /// Remove this subscription from its broadcaster.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for ResizeSubscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.lock(|subscribers| {
                subscribers.borrow_mut().by_id.remove(&self.id);
            });
            log::debug!("host: resize subscriber {} removed", self.id);
        }
    }
}

/// In-memory [`Host`] with named containers, for tests, previews, and headless runs.
#[derive(Default)]
pub struct HeadlessHost {
    containers: RefCell<BTreeMap<String, Viewport>>,
    resize: ResizeBroadcaster,
}

impl HeadlessHost {
    /// Create a host with no containers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a container.
    #[must_use]
    pub fn with_container(self, container_id: impl Into<String>, viewport: Viewport) -> Self {
        self.containers
            .borrow_mut()
            .insert(container_id.into(), viewport);
        self
    }

    /// Resize a container and notify subscribers. Unknown ids are ignored.
    pub fn resize(&self, container_id: &str, viewport: Viewport) {
        let known = match self.containers.borrow_mut().get_mut(container_id) {
            Some(size) => {
                *size = viewport;
                true
            }
            None => false,
        };
        if known {
            self.resize.broadcast(viewport);
        } else {
            log::warn!("host: resize for unknown container {container_id:?} ignored");
        }
    }

    /// The host's resize broadcaster.
    #[must_use]
    pub const fn resize_broadcaster(&self) -> &ResizeBroadcaster {
        &self.resize
    }
}

impl Host for HeadlessHost {
    fn container(&self, container_id: &str) -> Option<Container> {
        self.containers
            .borrow()
            .get(container_id)
            .map(|&viewport| Container {
                id: container_id.to_owned(),
                viewport,
            })
    }

    fn subscribe_resize(&self) -> ResizeSubscription {
        self.resize.subscribe()
    }
}

/// [`FrameClock`] that ticks at a fixed period using `embassy_time`.
#[cfg(feature = "ticker")]
pub struct TickerClock(embassy_time::Ticker);

#[cfg(feature = "ticker")]
impl TickerClock {
    /// Tick every `frame_duration`, e.g. [`MarqueeConfig::frame_duration`](crate::MarqueeConfig::frame_duration).
    #[must_use]
    pub fn every(frame_duration: embassy_time::Duration) -> Self {
        Self(embassy_time::Ticker::every(frame_duration))
    }
}

#[cfg(feature = "ticker")]
impl FrameClock for TickerClock {
    async fn next_frame(&mut self) -> Result<()> {
        self.0.next().await;
        Ok(())
    }
}
