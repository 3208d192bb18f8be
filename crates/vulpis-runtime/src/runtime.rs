//! The frame loop.

use glam::Vec2;
use vulpis_core::{FontProvider, StateStore, VulpisError};
use vulpis_layout::{FlowLayout, LayoutOptions, LayoutSolver};
use vulpis_render::{CommandGenerator, Renderer};
use vulpis_tree::{NodeTree, ReconcileReport, Reconciler};

use crate::config::RuntimeConfig;
use crate::host::Host;
use crate::input::{dispatch_click, ClickOutcome, InputEvent};

/// What happened during one call to [`Runtime::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameReport {
    /// Set when the host produced a new description this frame
    pub reconciled: Option<ReconcileReport>,
    pub laid_out: bool,
    pub commands: usize,
    pub clicks_handled: usize,
}

/// Drives the host, tree, layout and renderer one frame at a time.
pub struct Runtime<H, R, F, S = FlowLayout>
where
    H: Host,
    R: Renderer,
    F: FontProvider,
    S: LayoutSolver,
{
    config: RuntimeConfig,
    options: LayoutOptions,
    host: H,
    renderer: R,
    fonts: F,
    solver: S,
    tree: NodeTree,
    state: StateStore,
    reconciler: Reconciler,
    generator: CommandGenerator,
    running: bool,
}

impl<H, R, F> Runtime<H, R, F, FlowLayout>
where
    H: Host,
    R: Renderer,
    F: FontProvider,
{
    pub fn new(config: RuntimeConfig, host: H, renderer: R, fonts: F) -> Self {
        Self::with_solver(config, host, renderer, fonts, FlowLayout)
    }
}

impl<H, R, F, S> Runtime<H, R, F, S>
where
    H: Host,
    R: Renderer,
    F: FontProvider,
    S: LayoutSolver,
{
    pub fn with_solver(config: RuntimeConfig, host: H, renderer: R, fonts: F, solver: S) -> Self {
        let options = config.layout_options();
        Self {
            config,
            options,
            host,
            renderer,
            fonts,
            solver,
            tree: NodeTree::new(),
            state: StateStore::new(),
            reconciler: Reconciler::new(),
            generator: CommandGenerator::new(),
            running: true,
        }
    }

    /// Seed the state store before the first frame.
    pub fn with_state(mut self, state: StateStore) -> Self {
        self.state = state;
        self
    }

    /// Run one frame: handle `events`, re-render if state changed, relayout if
    /// the tree needs it, then paint.
    ///
    /// Handler and host failures are reported through [`Host::report_error`]
    /// and the frame continues with the previous tree. Only renderer failures
    /// are returned.
    #[tracing::instrument(skip_all)]
    pub fn step(&mut self, events: &[InputEvent]) -> Result<FrameReport, VulpisError> {
        let mut report = FrameReport::default();

        for event in events {
            match *event {
                InputEvent::Click { x, y } => {
                    match dispatch_click(&self.tree, &mut self.state, Vec2::new(x, y)) {
                        Ok(ClickOutcome::Handled(_)) => report.clicks_handled += 1,
                        Ok(ClickOutcome::Unhandled) => {}
                        Err(e) => {
                            tracing::warn!(error = %e, x, y, "click handler failed");
                            self.host.report_error(&VulpisError::from(e));
                        }
                    }
                }
                InputEvent::Resize { width, height } => {
                    self.options = LayoutOptions::new(width, height);
                    if let Some(root) = self.tree.root() {
                        self.tree.mark_layout_dirty(root);
                    }
                }
                InputEvent::Quit => self.running = false,
            }
        }

        if self.tree.root().is_none() || self.state.is_dirty() {
            self.state.clear_dirty();
            match self.host.render(&mut self.state) {
                Ok(desc) => {
                    report.reconciled = Some(self.reconciler.reconcile_root(&mut self.tree, &desc));
                }
                Err(e) => {
                    tracing::warn!(error = %e, "host render failed, keeping previous tree");
                    self.host.report_error(&VulpisError::from(e));
                }
            }
        }

        if self.tree.needs_layout() {
            self.solver.solve(&mut self.tree, &self.options, &self.fonts);
            self.tree.clear_layout_dirty();
            report.laid_out = true;
        }

        let commands = self.generator.generate(&self.tree, &self.fonts);
        report.commands = commands.len();
        self.renderer.begin_frame()?;
        self.renderer.submit(&commands)?;
        self.renderer.end_frame()?;
        self.tree.clear_paint_dirty();

        Ok(report)
    }

    /// Step until a [`InputEvent::Quit`] arrives, then tear the tree down.
    pub fn run<P>(&mut self, mut poll: P) -> Result<(), VulpisError>
    where
        P: FnMut() -> Vec<InputEvent>,
    {
        tracing::debug!(title = %self.config.window.title, "starting frame loop");
        while self.running {
            let events = poll();
            self.step(&events)?;
        }
        self.teardown();
        Ok(())
    }

    /// Release every node and the handlers they hold.
    pub fn teardown(&mut self) {
        let removed = self.tree.clear();
        tracing::debug!(removed, "tree torn down");
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    pub fn tree(&self) -> &NodeTree {
        &self.tree
    }

    pub fn state(&self) -> &StateStore {
        &self.state
    }

    /// Mutable access to the state. Setting a value marks the store dirty and
    /// triggers a re-render on the next step.
    pub fn state_mut(&mut self) -> &mut StateStore {
        &mut self.state
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn fonts(&self) -> &F {
        &self.fonts
    }
}
