//! Per-page structures, each bound to its own playback controller.
//!
//! A page owns the structure the learner is editing and the algorithm they
//! picked. Edits go through [`PageSlot::update`], which works on a draft: a
//! failed edit leaves the structure, the trace and the cursor untouched,
//! and a successful one invalidates the trace so the next play or step
//! regenerates it from the new structure.

use std::fmt;

use algoscope_core::builders::{ArrayBuilder, Bst, Edge, Graph, NodeId, NodeLabel, SearchData};
use algoscope_core::{
    AlgorithmInfo, Error as CoreError, GraphAlgorithm, GraphParams, SearchAlgorithm, SortAlgorithm,
    Trace, Tracer, TreeTraversal,
};
use algoscope_playback::{
    spawn_playback, Playback, PlaybackConfig, PlaybackStatus, SharedPlayback, TickDelay,
    TokioScheduler,
};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::ApiResult;

/// The four visualizer pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    Sorting,
    Searching,
    Trees,
    Graphs,
}

impl Page {
    pub fn as_str(&self) -> &'static str {
        match self {
            Page::Sorting => "sorting",
            Page::Searching => "searching",
            Page::Trees => "trees",
            Page::Graphs => "graphs",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A page's editable state.
pub trait PageModel: Clone + Send + 'static {
    /// What clients see of the structure.
    type View: Serialize + Send;

    /// Trace the selected algorithm over the current structure.
    fn trace(&self) -> algoscope_core::Result<Trace>;

    fn view(&self) -> Self::View;
}

/// Playback command, shared by the HTTP routes and the WebSocket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Control {
    Play,
    Pause,
    Step,
    StepBack,
    Reset,
    Seek {
        cursor: usize,
    },
    Speed(SpeedSetting),
}

/// A new tick delay, given directly or as a speed slider position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SpeedSetting {
    Delay {
        #[serde(rename = "delayMs")]
        delay_ms: u64,
    },
    Slider {
        slider: u64,
    },
}

impl SpeedSetting {
    pub fn delay(self) -> TickDelay {
        match self {
            SpeedSetting::Delay { delay_ms } => TickDelay::from_millis(delay_ms),
            SpeedSetting::Slider { slider } => TickDelay::from_slider(slider),
        }
    }
}

/// A page's view together with its playback status.
#[derive(Debug, Clone, Serialize)]
pub struct PageResponse<V> {
    pub page: V,
    pub playback: PlaybackStatus,
}

/// A page and the controller replaying its traces.
pub struct PageSlot<P> {
    page: Mutex<P>,
    playback: SharedPlayback,
}

impl<P: PageModel> PageSlot<P> {
    /// Bind `page` to a fresh controller. Must run inside a tokio runtime.
    pub async fn new(page: P, config: PlaybackConfig) -> Self {
        let (playback, _pump) = spawn_playback(config);
        register(&mut *playback.lock().await, page.clone());
        Self {
            page: Mutex::new(page),
            playback,
        }
    }

    pub fn playback(&self) -> &SharedPlayback {
        &self.playback
    }

    pub async fn snapshot(&self) -> PageResponse<P::View> {
        let page = self.page.lock().await;
        let playback = self.playback.lock().await;
        PageResponse {
            page: page.view(),
            playback: playback.status(),
        }
    }

    /// Apply `edit` to a copy of the page and commit it only if it
    /// succeeds.
    pub async fn update<F>(&self, edit: F) -> ApiResult<PageResponse<P::View>>
    where
        F: FnOnce(&mut P) -> algoscope_core::Result<()>,
    {
        let mut page = self.page.lock().await;
        let mut draft = page.clone();
        edit(&mut draft)?;
        *page = draft;

        let mut playback = self.playback.lock().await;
        register(&mut playback, page.clone());
        playback.invalidate();
        Ok(PageResponse {
            page: page.view(),
            playback: playback.status(),
        })
    }

    /// Run a playback command against this page's controller.
    pub async fn control(&self, control: Control) -> ApiResult<PageResponse<P::View>> {
        let page = self.page.lock().await;
        let mut playback = self.playback.lock().await;
        debug!(?control, "playback command");
        match control {
            Control::Play => playback.play()?,
            Control::Pause => playback.pause(),
            Control::Step => {
                playback.step()?;
            }
            Control::StepBack => {
                playback.step_back();
            }
            Control::Reset => playback.reset(),
            Control::Seek { cursor } => {
                playback.seek(cursor);
            }
            Control::Speed(speed) => playback.set_delay(speed.delay()),
        }
        Ok(PageResponse {
            page: page.view(),
            playback: playback.status(),
        })
    }
}

fn register<P: PageModel>(playback: &mut Playback<TokioScheduler>, page: P) {
    playback.set_source(move || page.trace());
}

// Sorting

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortingPage {
    pub array: ArrayBuilder,
    pub algorithm: SortAlgorithm,
}

#[derive(Debug, Clone, Serialize)]
pub struct SortingView {
    pub values: Vec<u32>,
    pub algorithm: SortAlgorithm,
    pub info: &'static AlgorithmInfo,
}

impl PageModel for SortingPage {
    type View = SortingView;

    fn trace(&self) -> algoscope_core::Result<Trace> {
        if self.array.is_empty() {
            return Err(CoreError::EmptyStructure("Array"));
        }
        Ok(self.algorithm.trace(self.array.values(), &()))
    }

    fn view(&self) -> SortingView {
        SortingView {
            values: self.array.values().to_vec(),
            algorithm: self.algorithm,
            info: self.algorithm.info(),
        }
    }
}

// Searching

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchingPage {
    pub data: SearchData,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchingView {
    pub values: Vec<u32>,
    pub target: u32,
    pub algorithm: SearchAlgorithm,
    pub info: &'static AlgorithmInfo,
}

impl PageModel for SearchingPage {
    type View = SearchingView;

    fn trace(&self) -> algoscope_core::Result<Trace> {
        if self.data.is_empty() {
            return Err(CoreError::EmptyStructure("Array"));
        }
        let algorithm = self.data.algorithm();
        Ok(algorithm.trace(self.data.values(), &self.data.target()))
    }

    fn view(&self) -> SearchingView {
        let algorithm = self.data.algorithm();
        SearchingView {
            values: self.data.values().to_vec(),
            target: self.data.target(),
            algorithm,
            info: algorithm.info(),
        }
    }
}

// Trees

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreePage {
    pub tree: Bst,
    pub traversal: TreeTraversal,
}

impl Default for TreePage {
    fn default() -> Self {
        Self {
            tree: Bst::sample(),
            traversal: TreeTraversal::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TreeNodeView {
    pub id: NodeId,
    pub value: u32,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TreeView {
    pub root: Option<NodeId>,
    pub nodes: Vec<TreeNodeView>,
    pub height: Option<usize>,
    pub traversal: TreeTraversal,
    pub info: &'static AlgorithmInfo,
}

impl PageModel for TreePage {
    type View = TreeView;

    fn trace(&self) -> algoscope_core::Result<Trace> {
        if self.tree.is_empty() {
            return Err(CoreError::EmptyStructure("Tree"));
        }
        Ok(self.traversal.trace(&self.tree, &()))
    }

    fn view(&self) -> TreeView {
        let tree = &self.tree;
        TreeView {
            root: tree.root(),
            nodes: tree
                .ids()
                .map(|id| TreeNodeView {
                    id,
                    value: tree.value(id),
                    left: tree.left(id),
                    right: tree.right(id),
                })
                .collect(),
            height: tree.height(),
            traversal: self.traversal,
            info: self.traversal.info(),
        }
    }
}

// Graphs

/// A graph with its start node and optional end node.
///
/// Whenever the graph has nodes, `start` names one of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphPage {
    graph: Graph,
    algorithm: GraphAlgorithm,
    start: Option<NodeLabel>,
    end: Option<NodeLabel>,
}

impl Default for GraphPage {
    fn default() -> Self {
        Self::sample()
    }
}

impl GraphPage {
    /// The sample graph, from A to G.
    pub fn sample() -> Self {
        let mut page = Self {
            graph: Graph::new(),
            algorithm: GraphAlgorithm::default(),
            start: None,
            end: None,
        };
        page.replace_graph(Graph::sample());
        page
    }

    /// Swap in a new graph, running from its first node to its last.
    pub fn replace_graph(&mut self, graph: Graph) {
        self.start = graph.nodes().first().cloned();
        self.end = graph.nodes().last().cloned();
        self.graph = graph;
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn algorithm(&self) -> GraphAlgorithm {
        self.algorithm
    }

    pub fn set_algorithm(&mut self, algorithm: GraphAlgorithm) {
        self.algorithm = algorithm;
    }

    pub fn set_start(&mut self, label: &str) -> algoscope_core::Result<()> {
        let index = self.graph.require(label.trim())?;
        self.start = Some(self.graph.label(index).clone());
        Ok(())
    }

    /// Set or clear the end node.
    pub fn set_end(&mut self, label: Option<&str>) -> algoscope_core::Result<()> {
        self.end = match label.map(str::trim).filter(|l| !l.is_empty()) {
            Some(label) => {
                let index = self.graph.require(label)?;
                Some(self.graph.label(index).clone())
            }
            None => None,
        };
        Ok(())
    }

    pub fn add_node(&mut self, label: &str) -> algoscope_core::Result<()> {
        let index = self.graph.add_node(label)?;
        if self.start.is_none() {
            self.start = Some(self.graph.label(index).clone());
        }
        Ok(())
    }

    pub fn add_edge(&mut self, from: &str, to: &str, weight: u32) -> algoscope_core::Result<()> {
        self.graph.add_edge(from.trim(), to.trim(), weight)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GraphView {
    pub nodes: Vec<NodeLabel>,
    pub edges: Vec<Edge>,
    pub start: Option<NodeLabel>,
    pub end: Option<NodeLabel>,
    pub algorithm: GraphAlgorithm,
    pub info: &'static AlgorithmInfo,
}

impl PageModel for GraphPage {
    type View = GraphView;

    fn trace(&self) -> algoscope_core::Result<Trace> {
        let Some(start) = &self.start else {
            return Err(CoreError::EmptyStructure("Graph"));
        };
        let params = GraphParams::new(
            &self.graph,
            start.as_str(),
            self.end.as_ref().map(NodeLabel::as_str),
        )?;
        Ok(self.algorithm.trace(&self.graph, &params))
    }

    fn view(&self) -> GraphView {
        GraphView {
            nodes: self.graph.nodes().to_vec(),
            edges: self.graph.edges().to_vec(),
            start: self.start.clone(),
            end: self.end.clone(),
            algorithm: self.algorithm,
            info: self.algorithm.info(),
        }
    }
}
