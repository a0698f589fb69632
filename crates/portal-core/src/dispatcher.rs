//! Dashboard Dispatcher
//!
//! Owns the navigation state of one session and mounts the selected
//! capability.
//!
//! ```text
//!              select(name)                 load ok + mount ok
//!  Overview ───────────────► Loading ───────────────────────► Ready
//!     ▲                         │   load/mount failed
//!     │ select("overview")      └───────────────────────────► Error ──retry──► Loading
//!     │                    unknown / unbound name
//!     └──────────────────  NotFound
//! ```
//!
//! Every `select` mints a new generation. A load only publishes its result
//! if its generation is still current, so the screen always shows whatever
//! was selected last, never whatever finished loading last.

use crate::capability::{CapabilityId, OVERVIEW};
use crate::implementation::{ComponentLoader, ImplementationMap, View};
use crate::model::SessionUser;
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Weak};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Navigation state
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DispatchState {
    /// Dashboard home
    Overview,
    /// Implementation fetch in flight
    Loading { capability: CapabilityId, generation: u64 },
    /// Mounted
    Ready { capability: CapabilityId, view: View },
    /// Name is not a capability this session can load
    NotFound { requested: String },
    /// Load or initial render failed
    Error { capability: CapabilityId, message: String },
}

impl DispatchState {
    /// Capability the state refers to, if any
    pub fn capability(&self) -> Option<CapabilityId> {
        match self {
            Self::Loading { capability, .. }
            | Self::Ready { capability, .. }
            | Self::Error { capability, .. } => Some(*capability),
            Self::Overview | Self::NotFound { .. } => None,
        }
    }

    pub fn is_overview(&self) -> bool {
        matches!(self, Self::Overview)
    }
}

/// Everything a mounted component receives
#[derive(Debug, Clone)]
pub struct MountProps {
    pub user: SessionUser,
    pub on_navigate: Navigator,
}

struct Nav {
    generation: u64,
}

struct Shared {
    implementations: Arc<ImplementationMap>,
    user: SessionUser,
    /// Capabilities this session may open; `None` admits every bound one
    admitted: Option<HashSet<CapabilityId>>,
    nav: Mutex<Nav>,
    state: watch::Sender<DispatchState>,
}

/// Per-session dispatcher. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct Dispatcher {
    shared: Arc<Shared>,
}

impl Dispatcher {
    /// Dispatcher that admits every bound capability
    pub fn new(implementations: Arc<ImplementationMap>, user: SessionUser) -> Self {
        Self::build(implementations, user, None)
    }

    /// Dispatcher limited to `admitted`; anything else resolves to `NotFound`
    pub fn restricted(
        implementations: Arc<ImplementationMap>,
        user: SessionUser,
        admitted: HashSet<CapabilityId>,
    ) -> Self {
        Self::build(implementations, user, Some(admitted))
    }

    fn build(
        implementations: Arc<ImplementationMap>,
        user: SessionUser,
        admitted: Option<HashSet<CapabilityId>>,
    ) -> Self {
        let (state, _) = watch::channel(DispatchState::Overview);
        Self {
            shared: Arc::new(Shared {
                implementations,
                user,
                admitted,
                nav: Mutex::new(Nav { generation: 0 }),
                state,
            }),
        }
    }

    /// Current state snapshot
    pub fn state(&self) -> DispatchState {
        self.shared.state.borrow().clone()
    }

    /// Receive every state change
    pub fn subscribe(&self) -> watch::Receiver<DispatchState> {
        self.shared.state.subscribe()
    }

    /// Latest generation minted
    pub fn generation(&self) -> u64 {
        self.shared.nav.lock().generation
    }

    pub fn user(&self) -> &SessionUser {
        &self.shared.user
    }

    /// Navigation handle that is not tied to any mounted screen
    pub fn navigator(&self) -> Navigator {
        Navigator {
            shared: Arc::downgrade(&self.shared),
            mounted_at: None,
        }
    }

    /// Navigate to `name`.
    ///
    /// Returns the handle of the spawned load when one was started. Without a
    /// Tokio runtime the load cannot start and the state becomes `Error`.
    pub fn select(&self, name: &str) -> Option<JoinHandle<()>> {
        self.select_from(name, None)
    }

    /// `select`, but only while the generation is still `expected`
    fn select_from(&self, name: &str, expected: Option<u64>) -> Option<JoinHandle<()>> {
        let mut nav = self.shared.nav.lock();
        if let Some(expected) = expected {
            if nav.generation != expected {
                debug!(
                    requested = name,
                    origin = expected,
                    current = nav.generation,
                    "ignoring navigation from a superseded screen"
                );
                return None;
            }
        }
        nav.generation += 1;

        if name == OVERVIEW {
            self.publish(DispatchState::Overview);
            return None;
        }

        let loader = self
            .resolve(name)
            .and_then(|id| Some((id, self.shared.implementations.get(id)?)));

        let Some((capability, loader)) = loader else {
            debug!(requested = name, user = %self.shared.user.id, "capability not available");
            self.publish(DispatchState::NotFound {
                requested: name.to_string(),
            });
            return None;
        };

        let Ok(runtime) = Handle::try_current() else {
            warn!(%capability, "no async runtime to load capability on");
            self.publish(DispatchState::Error {
                capability,
                message: "no async runtime available".to_string(),
            });
            return None;
        };

        let generation = nav.generation;
        self.publish(DispatchState::Loading {
            capability,
            generation,
        });
        drop(nav);

        Some(self.spawn_load(&runtime, capability, loader, generation))
    }

    /// Re-run a failed load under a fresh generation
    pub fn retry(&self) -> Option<JoinHandle<()>> {
        let capability = match self.state() {
            DispatchState::Error { capability, .. } => capability,
            _ => return None,
        };
        self.select(capability.as_str())
    }

    /// Return to the overview
    pub fn back(&self) {
        self.select(OVERVIEW);
    }

    fn resolve(&self, name: &str) -> Option<CapabilityId> {
        let id = CapabilityId::parse(name).filter(|id| !id.is_sentinel())?;
        match &self.shared.admitted {
            Some(admitted) if !admitted.contains(&id) => None,
            _ => Some(id),
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        self.shared.nav.lock().generation == generation
    }

    fn spawn_load(
        &self,
        runtime: &Handle,
        capability: CapabilityId,
        loader: Arc<dyn ComponentLoader>,
        generation: u64,
    ) -> JoinHandle<()> {
        let dispatcher = self.clone();

        runtime.spawn(async move {
            let component = match loader.load().await {
                Ok(component) => component,
                Err(e) => return dispatcher.settle(capability, generation, Err(e.to_string())),
            };

            // A superseded screen is never mounted, so it cannot act on the session
            if !dispatcher.is_current(generation) {
                debug!(%capability, generation, "superseded before mount");
                return;
            }

            let outcome = component
                .mount(dispatcher.mount_props(generation))
                .map_err(|e| e.to_string());
            dispatcher.settle(capability, generation, outcome);
        })
    }

    fn mount_props(&self, generation: u64) -> MountProps {
        MountProps {
            user: self.shared.user.clone(),
            on_navigate: Navigator {
                shared: Arc::downgrade(&self.shared),
                mounted_at: Some(generation),
            },
        }
    }

    fn settle(&self, capability: CapabilityId, generation: u64, outcome: Result<View, String>) {
        let nav = self.shared.nav.lock();
        if nav.generation != generation {
            debug!(
                %capability,
                generation,
                current = nav.generation,
                "discarding superseded load"
            );
            return;
        }

        let state = match outcome {
            Ok(view) => DispatchState::Ready { capability, view },
            Err(message) => {
                warn!(%capability, error = %message, "capability failed to load");
                DispatchState::Error {
                    capability,
                    message,
                }
            }
        };
        self.publish(state);
    }

    fn publish(&self, state: DispatchState) {
        self.shared.state.send_replace(state);
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("user", &self.shared.user.id)
            .field("state", &*self.shared.state.borrow())
            .finish()
    }
}

/// Navigation callback for mounted components.
///
/// Holds a weak reference; once the session's dispatcher is gone navigation
/// is a no-op. A navigator handed to a mounted screen only works while that
/// screen's selection is still the current one.
#[derive(Clone)]
pub struct Navigator {
    shared: Weak<Shared>,
    mounted_at: Option<u64>,
}

impl Navigator {
    /// Same semantics as [`Dispatcher::select`]
    pub fn navigate(&self, name: &str) -> Option<JoinHandle<()>> {
        let shared = self.shared.upgrade()?;
        Dispatcher { shared }.select_from(name, self.mounted_at)
    }
}

impl fmt::Debug for Navigator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Navigator")
            .field("attached", &(self.shared.strong_count() > 0))
            .field("mounted_at", &self.mounted_at)
            .finish()
    }
}
