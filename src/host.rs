//! Root Host
//!
//! [`Host`] is the root attachment point of a widget tree. It plays the part
//! of the plain UI element the tree is mounted in: always load-eligible,
//! owner of the scene graph, and the source of frames and resize events.
//!
//! # Scheduling
//!
//! Everything runs on one thread. Async sequences are tasks on the host's
//! [`LocalPool`]; [`Host::spawn_check`] queues a load evaluation and
//! [`Host::run_until_stalled`] drives the queue.
//!
//! [`LoopMode`] selects who drives frames:
//! - `Independent`: the host keeps its own [`Timer`]; call [`Host::tick`]
//!   once per display refresh.
//! - `Master`: an outer loop owns the clock and calls [`Host::frame`] with
//!   its own multiplier; `tick` does nothing.
//!
//! ```rust,ignore
//! let host = Host::new(HostConfig::default());
//! let root = Component::builder(&host).group().options(options).decorators(vec![]).build();
//! pollster::block_on(host.mount(root))?;
//! pollster::block_on(host.check_if_load())?;
//! host.tick();
//! ```

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use futures::executor::{LocalPool, LocalSpawner};
use futures::future::join_all;
use futures::task::LocalSpawnExt;

use crate::component::callbacks::{CallbackSet, FrameFn, ResizeFn};
use crate::component::decorator::TaskFuture;
use crate::component::Component;
use crate::errors::Diagnostics;
use crate::scene::{NodeHandle, Scene, SceneRef};
use crate::utils::Timer;

const HOST_ORIGIN: &str = "host";

/// Who owns the frame clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopMode {
    #[default]
    Independent,
    Master,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HostConfig {
    pub loop_mode: LoopMode,
    /// Log lifecycle transitions at `info` instead of `debug`.
    pub debug: bool,
}

/// State shared by every component of one tree.
#[derive(Debug, Clone)]
pub struct Context {
    pub scene: SceneRef,
    pub diagnostics: Diagnostics,
    pub loop_mode: LoopMode,
    pub debug: bool,
}

struct HostInner {
    context: Context,
    loop_callbacks: Rc<RefCell<CallbackSet<FrameFn>>>,
    resize_callbacks: Rc<RefCell<CallbackSet<ResizeFn>>>,
    timer: RefCell<Timer>,
    pool: RefCell<LocalPool>,
    spawner: LocalSpawner,
    children: RefCell<Vec<Component>>,
}

/// Root of a widget tree. Cloning yields another handle to the same host.
#[derive(Clone)]
pub struct Host {
    inner: Rc<HostInner>,
}

impl Host {
    #[must_use]
    pub fn new(config: HostConfig) -> Self {
        let pool = LocalPool::new();
        let spawner = pool.spawner();
        Self {
            inner: Rc::new(HostInner {
                context: Context {
                    scene: Scene::shared(),
                    diagnostics: Diagnostics::new(),
                    loop_mode: config.loop_mode,
                    debug: config.debug,
                },
                loop_callbacks: Rc::default(),
                resize_callbacks: Rc::default(),
                timer: RefCell::new(Timer::new()),
                pool: RefCell::new(pool),
                spawner,
                children: RefCell::new(Vec::new()),
            }),
        }
    }

    #[inline]
    #[must_use]
    pub fn context(&self) -> &Context {
        &self.inner.context
    }

    #[inline]
    #[must_use]
    pub fn scene(&self) -> &SceneRef {
        &self.inner.context.scene
    }

    #[inline]
    #[must_use]
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.inner.context.diagnostics
    }

    #[inline]
    #[must_use]
    pub fn loop_mode(&self) -> LoopMode {
        self.inner.context.loop_mode
    }

    /// The scene root, where root groups attach their nodes.
    #[must_use]
    pub fn attachment_point(&self) -> NodeHandle {
        self.inner.context.scene.borrow().root()
    }

    #[must_use]
    pub fn loop_callbacks(&self) -> Rc<RefCell<CallbackSet<FrameFn>>> {
        Rc::clone(&self.inner.loop_callbacks)
    }

    #[must_use]
    pub fn resize_callbacks(&self) -> Rc<RefCell<CallbackSet<ResizeFn>>> {
        Rc::clone(&self.inner.resize_callbacks)
    }

    // ========================================================================
    // Mounted components
    // ========================================================================

    #[must_use]
    pub fn children(&self) -> Vec<Component> {
        self.inner.children.borrow().clone()
    }

    /// Takes ownership of a root component and initialises it.
    pub fn mount(&self, component: Component) -> TaskFuture {
        {
            let mut children = self.inner.children.borrow_mut();
            if !component.is_destroyed() && !children.iter().any(|c| c.ptr_eq(&component)) {
                children.push(component.clone());
            }
        }
        component.init()
    }

    /// Destroys a root component and drops it.
    pub fn unmount(&self, component: &Component) -> TaskFuture {
        self.inner
            .children
            .borrow_mut()
            .retain(|c| !c.ptr_eq(component));
        component.destroy()
    }

    // ========================================================================
    // Evaluation
    // ========================================================================

    /// Asks every mounted component to re-evaluate its load condition.
    pub fn check_if_load(&self) -> TaskFuture {
        let children = self.children();
        Box::pin(async move {
            for result in join_all(children.iter().map(Component::evaluate_load)).await {
                result?;
            }
            Ok(())
        })
    }

    /// Queues [`check_if_load`](Self::check_if_load) on the task queue.
    pub fn spawn_check(&self) {
        let check = self.check_if_load();
        let diagnostics = self.diagnostics().clone();
        self.spawn(async move {
            if let Err(e) = check.await {
                diagnostics.report(HOST_ORIGIN, e);
            }
        });
    }

    /// Queues an arbitrary task.
    pub fn spawn(&self, task: impl Future<Output = ()> + 'static) {
        if let Err(e) = self.inner.spawner.spawn_local(task) {
            log::error!("Task queue rejected a task: {e}");
        }
    }

    /// Runs queued tasks until none can make progress.
    ///
    /// Must not be called from inside a queued task.
    pub fn run_until_stalled(&self) {
        self.inner.pool.borrow_mut().run_until_stalled();
    }

    // ========================================================================
    // Frames
    // ========================================================================

    /// Drives one frame through the root frame callbacks.
    pub fn frame(&self, multiplier: f32) {
        let callbacks = self.inner.loop_callbacks.borrow().snapshot();
        for callback in callbacks {
            callback(multiplier);
        }
    }

    /// Propagates a resize event through the root resize callbacks.
    pub fn resize(&self) {
        let callbacks = self.inner.resize_callbacks.borrow().snapshot();
        for callback in callbacks {
            callback();
        }
    }

    /// Advances the internal clock and drives a frame in `Independent` mode.
    /// Returns whether a frame was driven.
    pub fn tick(&self) -> bool {
        if self.loop_mode() == LoopMode::Master {
            return false;
        }
        let multiplier = self.inner.timer.borrow_mut().tick();
        self.frame(multiplier);
        true
    }

    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.inner.timer.borrow().frame_count
    }
}

impl Default for Host {
    fn default() -> Self {
        Self::new(HostConfig::default())
    }
}
