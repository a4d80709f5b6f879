//! # Resource Controller
//!
//! This module defines the [`ResourceController`], which owns the
//! request/response lifecycle of one remote resource: a single entity fetch or
//! a single form submission.
//!
//! ## Dispatch Model
//!
//! [`load`](ResourceController::load) and [`submit`](ResourceController::submit)
//! are plain synchronous calls. They flip the state to `Pending`, spawn the
//! transport call on the tokio runtime and return a [`Dispatch`] handle
//! right away. The spawned task applies the resolution when the transport
//! answers.
//!
//! * **Exclusivity**: at most one operation per controller is in flight.
//!   Calls made while pending are ignored, not queued.
//! * **Epochs**: every dispatch and every [`reset`](ResourceController::reset)
//!   bumps an epoch counter. A resolution whose epoch is stale is discarded,
//!   so a reset really does leave the controller idle.
//! * **Teardown**: the spawned task only holds a weak reference. If the
//!   controller is dropped first, the resolution is discarded and no on-success
//!   effect runs.
//!
//! ## Observing State
//!
//! The presentation layer never mutates state. It reads
//! [`current_state`](ResourceController::current_state), holds a
//! `watch::Receiver` from [`subscribe`](ResourceController::subscribe), or
//! registers a listener with
//! [`on_transition`](ResourceController::on_transition) that is called on
//! every single transition.

use crate::error::{ControllerError, UserInputError, ValidationError};
use crate::state::ResourceState;
use crate::transport::Transport;
use crate::validation::{PayloadClass, PayloadShape};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};
use tokio::sync::watch;
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, info, warn};

/// Local validation run by a form before its payload is submitted.
pub trait FormInput: Serialize {
    fn validate(&self) -> Result<(), UserInputError>;
}

/// Callback invoked with a snapshot after every state transition.
pub type Listener<T> = Box<dyn Fn(&ResourceState<T>) + Send + Sync>;

type OnSuccess = Box<dyn FnOnce(Value) + Send>;

/// What happened to a `load`/`submit` request.
#[derive(Debug)]
pub enum Dispatch {
    /// The operation was sent to the transport.
    Started(JoinHandle<()>),
    /// Another operation was already in flight; nothing happened.
    Ignored,
    /// Local validation failed; the state is now `Failure` and nothing was sent.
    Rejected,
}

impl Dispatch {
    pub fn is_started(&self) -> bool {
        matches!(self, Dispatch::Started(_))
    }

    /// Waits until the operation's resolution has been applied (or discarded).
    pub async fn settled(self) -> Result<(), JoinError> {
        match self {
            Dispatch::Started(handle) => handle.await,
            Dispatch::Ignored | Dispatch::Rejected => Ok(()),
        }
    }
}

struct Inner<T> {
    resource: String,
    path: String,
    shape: PayloadShape,
    transport: Arc<dyn Transport>,
    state: watch::Sender<ResourceState<T>>,
    epoch: AtomicU64,
    listeners: Mutex<Vec<Listener<T>>>,
}

impl<T: Clone> Inner<T> {
    /// Hands `snapshot`, the state a transition produced, to every listener.
    fn notify(&self, snapshot: &ResourceState<T>) {
        let listeners = self.listeners.lock().unwrap_or_else(|e| e.into_inner());
        for listener in listeners.iter() {
            listener(snapshot);
        }
    }

    /// Applies `transition` to the state and notifies listeners if it
    /// returned a new state.
    fn transition(&self, transition: impl FnOnce(&mut ResourceState<T>) -> bool) -> bool {
        let mut snapshot = None;
        self.state.send_if_modified(|state| {
            if !transition(state) {
                return false;
            }
            snapshot = Some(state.clone());
            true
        });
        match snapshot {
            Some(snapshot) => {
                self.notify(&snapshot);
                true
            }
            None => false,
        }
    }

    /// Moves to `Pending` unless already there. Returns the new epoch.
    fn begin(&self) -> Option<u64> {
        let mut epoch = None;
        self.transition(|state| {
            if state.is_pending() {
                return false;
            }
            epoch = Some(self.epoch.fetch_add(1, Ordering::SeqCst) + 1);
            *state = std::mem::take(state).into_pending();
            true
        });
        epoch
    }

    /// Applies `f` if `epoch` is still current. Returns whether it was applied.
    fn resolve(&self, epoch: u64, f: impl FnOnce(ResourceState<T>) -> ResourceState<T>) -> bool {
        self.transition(|state| {
            if self.epoch.load(Ordering::SeqCst) != epoch || !state.is_pending() {
                return false;
            }
            *state = f(std::mem::take(state));
            true
        })
    }

    /// Fails without dispatching, unless an operation is in flight.
    fn reject(&self, error: ControllerError) -> bool {
        self.transition(|state| {
            if state.is_pending() {
                return false;
            }
            *state = std::mem::take(state).into_failure(error);
            true
        })
    }

    fn reset(&self) {
        self.transition(|state| {
            self.epoch.fetch_add(1, Ordering::SeqCst);
            *state = std::mem::take(state).into_idle();
            true
        });
    }
}

/// Validates `payload` against `shape`, then decodes it into `T`.
fn decode<T: DeserializeOwned>(shape: &PayloadShape, payload: Value) -> Result<(T, PayloadClass), ControllerError> {
    let class = shape.classify(&payload)?;
    let data = serde_json::from_value(payload)
        .map_err(|e| ValidationError::unexpected("$", e.to_string()))?;
    Ok((data, class))
}

/// Lifecycle controller for one remote resource.
///
/// Owned by exactly one presentation unit; it is deliberately not `Clone`.
pub struct ResourceController<T> {
    inner: Arc<Inner<T>>,
}

impl<T> ResourceController<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Creates an idle controller for the resource at `path`.
    ///
    /// `resource` is a short name used in log lines.
    pub fn new(resource: impl Into<String>, path: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        let (state, _) = watch::channel(ResourceState::default());
        Self {
            inner: Arc::new(Inner {
                resource: resource.into(),
                path: path.into(),
                shape: PayloadShape::Any,
                transport,
                state,
                epoch: AtomicU64::new(0),
                listeners: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Sets the shape fetched payloads are classified against.
    pub fn with_shape(mut self, shape: PayloadShape) -> Self {
        let resource = self.inner.resource.clone();
        match Arc::get_mut(&mut self.inner) {
            Some(inner) => inner.shape = shape,
            None => warn!(resource = %resource, "Shape ignored: controller already in use"),
        }
        self
    }

    pub fn resource(&self) -> &str {
        &self.inner.resource
    }

    pub fn path(&self) -> &str {
        &self.inner.path
    }

    /// Immutable snapshot of the current state.
    pub fn current_state(&self) -> ResourceState<T> {
        self.inner.state.borrow().clone()
    }

    /// A receiver that observes the latest state.
    pub fn subscribe(&self) -> watch::Receiver<ResourceState<T>> {
        self.inner.state.subscribe()
    }

    /// Registers a callback for every transition.
    ///
    /// Listeners run while the listener list is locked; a listener must not
    /// register listeners or start operations on the same controller.
    pub fn on_transition(&self, listener: impl Fn(&ResourceState<T>) + Send + Sync + 'static) {
        self.inner
            .listeners
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(Box::new(listener));
    }

    /// Forces the state back to `Idle` and discards any in-flight resolution.
    pub fn reset(&self) {
        debug!(resource = %self.inner.resource, "Reset");
        self.inner.reset();
    }

    /// Starts a read of the resource.
    pub fn load(&self) -> Dispatch
    where
        T: DeserializeOwned,
    {
        let resource = self.inner.resource.clone();
        let Some(epoch) = self.inner.begin() else {
            debug!(resource = %resource, "Load ignored: operation in flight");
            return Dispatch::Ignored;
        };
        debug!(resource = %resource, path = %self.inner.path, epoch, "Load");

        let weak: Weak<Inner<T>> = Arc::downgrade(&self.inner);
        let transport = self.inner.transport.clone();
        let path = self.inner.path.clone();
        let shape = self.inner.shape.clone();

        Dispatch::Started(tokio::spawn(async move {
            let outcome = match transport.get(&path).await {
                Ok(payload) => decode::<T>(&shape, payload),
                Err(e) => Err(e.into()),
            };

            let Some(inner) = weak.upgrade() else {
                debug!(resource = %resource, "Controller dropped, load result discarded");
                return;
            };

            let applied = match outcome {
                Ok((data, class)) => {
                    let applied = inner.resolve(epoch, |_| ResourceState::Success { data });
                    if applied {
                        info!(resource = %resource, ?class, "Loaded");
                    }
                    applied
                }
                Err(e) => {
                    warn!(resource = %resource, error = %e, "Load failed");
                    inner.resolve(epoch, |state| state.into_failure(e))
                }
            };
            if !applied {
                debug!(resource = %resource, epoch, "Stale load result discarded");
            }
        }))
    }

    /// Starts a write of `payload`. The payload is only borrowed, so the
    /// caller still has it for a retry.
    pub fn submit<P: Serialize + ?Sized>(&self, payload: &P) -> Dispatch {
        self.dispatch_post(payload, None)
    }

    /// Like [`submit`](Self::submit), running `on_success` with the response
    /// body exactly once if the write succeeds.
    pub fn submit_with<P, F>(&self, payload: &P, on_success: F) -> Dispatch
    where
        P: Serialize + ?Sized,
        F: FnOnce(Value) + Send + 'static,
    {
        self.dispatch_post(payload, Some(Box::new(on_success)))
    }

    /// Validates `form` locally, then submits it.
    ///
    /// A rejected form moves to `Failure` with a [`UserInputError`] and never
    /// reaches the transport.
    pub fn submit_form<P, F>(&self, form: &P, on_success: F) -> Dispatch
    where
        P: FormInput,
        F: FnOnce(Value) + Send + 'static,
    {
        if let Err(e) = form.validate() {
            debug!(resource = %self.inner.resource, error = %e, "Form rejected");
            return if self.inner.reject(e.into()) {
                Dispatch::Rejected
            } else {
                Dispatch::Ignored
            };
        }
        self.submit_with(form, on_success)
    }

    fn dispatch_post<P: Serialize + ?Sized>(&self, payload: &P, on_success: Option<OnSuccess>) -> Dispatch {
        let resource = self.inner.resource.clone();
        let body = match serde_json::to_value(payload) {
            Ok(body) => body,
            Err(e) => {
                let mut error = UserInputError::default();
                error.reject("payload", e.to_string());
                warn!(resource = %resource, error = %error, "Payload could not be encoded");
                return if self.inner.reject(error.into()) {
                    Dispatch::Rejected
                } else {
                    Dispatch::Ignored
                };
            }
        };

        let Some(epoch) = self.inner.begin() else {
            debug!(resource = %resource, "Submit ignored: operation in flight");
            return Dispatch::Ignored;
        };
        debug!(resource = %resource, path = %self.inner.path, epoch, ?body, "Submit");

        let weak: Weak<Inner<T>> = Arc::downgrade(&self.inner);
        let transport = self.inner.transport.clone();
        let path = self.inner.path.clone();

        Dispatch::Started(tokio::spawn(async move {
            let outcome = transport.post(&path, body).await;

            let Some(inner) = weak.upgrade() else {
                debug!(resource = %resource, "Controller dropped, submit result discarded");
                return;
            };

            match outcome {
                Ok(response) => {
                    if inner.resolve(epoch, ResourceState::into_idle) {
                        info!(resource = %resource, "Submitted");
                        // Run outside of any lock so the effect may call back in.
                        drop(inner);
                        if let Some(effect) = on_success {
                            effect(response);
                        }
                    } else {
                        debug!(resource = %resource, epoch, "Stale submit result discarded");
                    }
                }
                Err(e) => {
                    warn!(resource = %resource, error = %e, "Submit failed");
                    if !inner.resolve(epoch, |state| state.into_failure(e.into())) {
                        debug!(resource = %resource, epoch, "Stale submit result discarded");
                    }
                }
            }
        }))
    }
}
