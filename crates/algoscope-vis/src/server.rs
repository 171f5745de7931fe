//! Axum web server with WebSocket streaming of playback status.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::{watch, Mutex};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing::{debug, info, warn};

use algoscope_core::builders::{
    ArrayBuilder, Bst, Graph, Operation, SearchData, ValueQueue, ValueStack,
};
use algoscope_core::{AlgorithmInfo, GraphAlgorithm, SearchAlgorithm, SortAlgorithm, TreeTraversal};
use algoscope_playback::PlaybackStatus;

use crate::config::VisConfig;
use crate::error::{ApiError, ApiJson, ApiResult};
use crate::pages::{
    Control, GraphPage, GraphView, Page, PageResponse, PageSlot, SearchingPage, SearchingView,
    SortingPage, SortingView, SpeedSetting, TreePage, TreeView,
};

/// Size of the array the sorting page starts with.
const INITIAL_ARRAY_LEN: usize = 20;

/// Shared application state.
pub struct AppState {
    sorting: PageSlot<SortingPage>,
    searching: PageSlot<SearchingPage>,
    trees: PageSlot<TreePage>,
    graphs: PageSlot<GraphPage>,
    stack: Mutex<ValueStack>,
    queue: Mutex<ValueQueue>,
    rng: Mutex<StdRng>,
}

impl AppState {
    /// Build every page with its starting structure.
    pub async fn new(config: &VisConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut array = ArrayBuilder::new();
        if let Err(err) = array.randomize(INITIAL_ARRAY_LEN, &mut rng) {
            warn!(%err, "sorting page starts empty");
        }
        let mut data = SearchData::new(SearchAlgorithm::default());
        data.randomize(&mut rng);

        let delays = &config.delays;
        Self {
            sorting: PageSlot::new(
                SortingPage {
                    array,
                    algorithm: SortAlgorithm::default(),
                },
                delays.sorting(),
            )
            .await,
            searching: PageSlot::new(SearchingPage { data }, delays.searching()).await,
            trees: PageSlot::new(TreePage::default(), delays.trees()).await,
            graphs: PageSlot::new(GraphPage::sample(), delays.graphs()).await,
            stack: Mutex::new(ValueStack::new()),
            queue: Mutex::new(ValueQueue::new()),
            rng: Mutex::new(rng),
        }
    }

    async fn page(&self, page: Page) -> Response {
        match page {
            Page::Sorting => Json(self.sorting.snapshot().await).into_response(),
            Page::Searching => Json(self.searching.snapshot().await).into_response(),
            Page::Trees => Json(self.trees.snapshot().await).into_response(),
            Page::Graphs => Json(self.graphs.snapshot().await).into_response(),
        }
    }

    async fn control(&self, page: Page, control: Control) -> ApiResult<Response> {
        Ok(match page {
            Page::Sorting => Json(self.sorting.control(control).await?).into_response(),
            Page::Searching => Json(self.searching.control(control).await?).into_response(),
            Page::Trees => Json(self.trees.control(control).await?).into_response(),
            Page::Graphs => Json(self.graphs.control(control).await?).into_response(),
        })
    }

    async fn subscribe(&self, page: Page) -> watch::Receiver<PlaybackStatus> {
        let playback = match page {
            Page::Sorting => self.sorting.playback(),
            Page::Searching => self.searching.playback(),
            Page::Trees => self.trees.playback(),
            Page::Graphs => self.graphs.playback(),
        };
        playback.lock().await.subscribe()
    }
}

/// Visualization server.
pub struct VisServer {
    config: VisConfig,
    state: Arc<AppState>,
}

impl VisServer {
    /// Create a server. Must run inside a tokio runtime.
    pub async fn new(config: VisConfig) -> Self {
        let state = Arc::new(AppState::new(&config).await);
        Self { config, state }
    }

    /// Build the router for the server.
    pub fn router(&self) -> Router {
        let mut router = Router::new()
            .route("/health", get(|| async { "OK" }))
            .route("/api/catalogue", get(catalogue_handler))
            // Sorting
            .route("/api/sorting", get(|s: AppStateRef| page_handler(s, Page::Sorting)))
            .route("/api/sorting/array", post(sorting_array))
            .route("/api/sorting/random", post(sorting_random))
            .route("/api/sorting/append", post(sorting_append))
            .route("/api/sorting/remove-last", post(sorting_remove_last))
            .route("/api/sorting/clear", post(sorting_clear))
            .route("/api/sorting/algorithm", post(sorting_algorithm))
            // Searching
            .route("/api/searching", get(|s: AppStateRef| page_handler(s, Page::Searching)))
            .route("/api/searching/array", post(searching_array))
            .route("/api/searching/random", post(searching_random))
            .route("/api/searching/append", post(searching_append))
            .route("/api/searching/remove-last", post(searching_remove_last))
            .route("/api/searching/clear", post(searching_clear))
            .route("/api/searching/target", post(searching_target))
            .route("/api/searching/algorithm", post(searching_algorithm))
            // Trees
            .route("/api/trees", get(|s: AppStateRef| page_handler(s, Page::Trees)))
            .route("/api/trees/values", post(trees_values))
            .route("/api/trees/sample", post(trees_sample))
            .route("/api/trees/random", post(trees_random))
            .route("/api/trees/insert", post(trees_insert))
            .route("/api/trees/clear", post(trees_clear))
            .route("/api/trees/traversal", post(trees_traversal))
            // Graphs
            .route("/api/graphs", get(|s: AppStateRef| page_handler(s, Page::Graphs)))
            .route("/api/graphs/sample", post(graphs_sample))
            .route("/api/graphs/random", post(graphs_random))
            .route("/api/graphs/node", post(graphs_node))
            .route("/api/graphs/edge", post(graphs_edge))
            .route("/api/graphs/start", post(graphs_start))
            .route("/api/graphs/end", post(graphs_end))
            .route("/api/graphs/algorithm", post(graphs_algorithm))
            // Playback
            .route("/api/playback/{page}", get(playback_status_handler))
            .route("/api/playback/{page}/play", post(play_handler))
            .route("/api/playback/{page}/pause", post(pause_handler))
            .route("/api/playback/{page}/step", post(step_handler))
            .route("/api/playback/{page}/step-back", post(step_back_handler))
            .route("/api/playback/{page}/reset", post(reset_handler))
            .route("/api/playback/{page}/seek", post(seek_handler))
            .route("/api/playback/{page}/speed", post(speed_handler))
            // Stack and queue
            .route("/api/stack", get(stack_handler))
            .route("/api/stack/push", post(stack_push))
            .route("/api/stack/pop", post(stack_pop))
            .route("/api/stack/peek", post(stack_peek))
            .route("/api/stack/is-empty", post(stack_is_empty))
            .route("/api/stack/clear", post(stack_clear))
            .route("/api/queue", get(queue_handler))
            .route("/api/queue/enqueue", post(queue_enqueue))
            .route("/api/queue/dequeue", post(queue_dequeue))
            .route("/api/queue/front", post(queue_front))
            .route("/api/queue/is-empty", post(queue_is_empty))
            .route("/api/queue/clear", post(queue_clear))
            // WebSocket for live playback status
            .route("/ws/{page}", get(ws_handler));

        if let Some(dir) = &self.config.static_dir {
            router = router.fallback_service(ServeDir::new(dir));
        }

        router
            .layer(CorsLayer::permissive())
            .with_state(self.state.clone())
    }

    /// Run the server on the configured address.
    pub async fn serve(self) -> Result<(), std::io::Error> {
        let listener = tokio::net::TcpListener::bind(self.config.addr).await?;
        info!("Visualization server running on http://{}", self.config.addr);
        axum::serve(listener, self.router()).await
    }
}

type AppStateRef = State<Arc<AppState>>;

// Catalogue

#[derive(Serialize)]
struct CatalogueEntry<A> {
    id: A,
    #[serde(flatten)]
    info: &'static AlgorithmInfo,
}

#[derive(Serialize)]
struct CatalogueResponse {
    sorting: Vec<CatalogueEntry<SortAlgorithm>>,
    searching: Vec<CatalogueEntry<SearchAlgorithm>>,
    trees: Vec<CatalogueEntry<TreeTraversal>>,
    graphs: Vec<CatalogueEntry<GraphAlgorithm>>,
}

async fn catalogue_handler() -> Json<CatalogueResponse> {
    Json(CatalogueResponse {
        sorting: SortAlgorithm::ALL
            .into_iter()
            .map(|id| CatalogueEntry { id, info: id.info() })
            .collect(),
        searching: SearchAlgorithm::ALL
            .into_iter()
            .map(|id| CatalogueEntry { id, info: id.info() })
            .collect(),
        trees: TreeTraversal::ALL
            .into_iter()
            .map(|id| CatalogueEntry { id, info: id.info() })
            .collect(),
        graphs: GraphAlgorithm::ALL
            .into_iter()
            .map(|id| CatalogueEntry { id, info: id.info() })
            .collect(),
    })
}

async fn page_handler(State(state): AppStateRef, page: Page) -> Response {
    state.page(page).await
}

// Request bodies

#[derive(Deserialize)]
struct ValuesRequest {
    values: String,
}

#[derive(Deserialize)]
struct ValueRequest {
    value: u32,
}

#[derive(Deserialize)]
struct SizeRequest {
    size: usize,
}

#[derive(Deserialize)]
struct AlgorithmRequest<A> {
    algorithm: A,
}

#[derive(Deserialize)]
struct TraversalRequest {
    traversal: TreeTraversal,
}

#[derive(Deserialize)]
struct TargetRequest {
    target: u32,
}

#[derive(Deserialize)]
struct NodeRequest {
    node: Option<String>,
}

#[derive(Deserialize)]
struct EdgeRequest {
    from: String,
    to: String,
    weight: u32,
}

type PageResult<V> = ApiResult<Json<PageResponse<V>>>;

// Sorting

async fn sorting_array(
    State(state): AppStateRef,
    ApiJson(req): ApiJson<ValuesRequest>,
) -> PageResult<SortingView> {
    let response = state.sorting.update(|page| page.array.load_text(&req.values)).await?;
    Ok(Json(response))
}

async fn sorting_random(
    State(state): AppStateRef,
    ApiJson(req): ApiJson<SizeRequest>,
) -> PageResult<SortingView> {
    let mut rng = state.rng.lock().await;
    let response = state
        .sorting
        .update(|page| page.array.randomize(req.size, &mut *rng))
        .await?;
    Ok(Json(response))
}

async fn sorting_append(
    State(state): AppStateRef,
    ApiJson(req): ApiJson<ValueRequest>,
) -> PageResult<SortingView> {
    let response = state.sorting.update(|page| page.array.append(req.value)).await?;
    Ok(Json(response))
}

async fn sorting_remove_last(State(state): AppStateRef) -> PageResult<SortingView> {
    let response = state
        .sorting
        .update(|page| {
            page.array.remove_last();
            Ok(())
        })
        .await?;
    Ok(Json(response))
}

async fn sorting_clear(State(state): AppStateRef) -> PageResult<SortingView> {
    let response = state
        .sorting
        .update(|page| {
            page.array.clear();
            Ok(())
        })
        .await?;
    Ok(Json(response))
}

async fn sorting_algorithm(
    State(state): AppStateRef,
    ApiJson(req): ApiJson<AlgorithmRequest<SortAlgorithm>>,
) -> PageResult<SortingView> {
    let response = state
        .sorting
        .update(|page| {
            page.algorithm = req.algorithm;
            Ok(())
        })
        .await?;
    Ok(Json(response))
}

// Searching

async fn searching_array(
    State(state): AppStateRef,
    ApiJson(req): ApiJson<ValuesRequest>,
) -> PageResult<SearchingView> {
    let response = state.searching.update(|page| page.data.load_text(&req.values)).await?;
    Ok(Json(response))
}

async fn searching_random(State(state): AppStateRef) -> PageResult<SearchingView> {
    let mut rng = state.rng.lock().await;
    let response = state
        .searching
        .update(|page| {
            page.data.randomize(&mut *rng);
            Ok(())
        })
        .await?;
    Ok(Json(response))
}

async fn searching_append(
    State(state): AppStateRef,
    ApiJson(req): ApiJson<ValueRequest>,
) -> PageResult<SearchingView> {
    let response = state.searching.update(|page| page.data.append(req.value)).await?;
    Ok(Json(response))
}

async fn searching_remove_last(State(state): AppStateRef) -> PageResult<SearchingView> {
    let response = state
        .searching
        .update(|page| {
            page.data.remove_last();
            Ok(())
        })
        .await?;
    Ok(Json(response))
}

async fn searching_clear(State(state): AppStateRef) -> PageResult<SearchingView> {
    let response = state
        .searching
        .update(|page| {
            page.data.clear();
            Ok(())
        })
        .await?;
    Ok(Json(response))
}

async fn searching_target(
    State(state): AppStateRef,
    ApiJson(req): ApiJson<TargetRequest>,
) -> PageResult<SearchingView> {
    let response = state.searching.update(|page| page.data.set_target(req.target)).await?;
    Ok(Json(response))
}

async fn searching_algorithm(
    State(state): AppStateRef,
    ApiJson(req): ApiJson<AlgorithmRequest<SearchAlgorithm>>,
) -> PageResult<SearchingView> {
    let response = state
        .searching
        .update(|page| {
            page.data.set_algorithm(req.algorithm);
            Ok(())
        })
        .await?;
    Ok(Json(response))
}

// Trees

async fn trees_values(
    State(state): AppStateRef,
    ApiJson(req): ApiJson<ValuesRequest>,
) -> PageResult<TreeView> {
    let response = state
        .trees
        .update(|page| {
            page.tree = Bst::from_text(&req.values)?;
            Ok(())
        })
        .await?;
    Ok(Json(response))
}

async fn trees_sample(State(state): AppStateRef) -> PageResult<TreeView> {
    let response = state
        .trees
        .update(|page| {
            page.tree = Bst::sample();
            Ok(())
        })
        .await?;
    Ok(Json(response))
}

async fn trees_random(State(state): AppStateRef) -> PageResult<TreeView> {
    let mut rng = state.rng.lock().await;
    let response = state
        .trees
        .update(|page| {
            page.tree = Bst::random(&mut *rng);
            Ok(())
        })
        .await?;
    Ok(Json(response))
}

async fn trees_insert(
    State(state): AppStateRef,
    ApiJson(req): ApiJson<ValueRequest>,
) -> PageResult<TreeView> {
    let response = state
        .trees
        .update(|page| {
            if !page.tree.insert(req.value)? {
                debug!(value = req.value, "duplicate value ignored");
            }
            Ok(())
        })
        .await?;
    Ok(Json(response))
}

async fn trees_clear(State(state): AppStateRef) -> PageResult<TreeView> {
    let response = state
        .trees
        .update(|page| {
            page.tree.clear();
            Ok(())
        })
        .await?;
    Ok(Json(response))
}

async fn trees_traversal(
    State(state): AppStateRef,
    ApiJson(req): ApiJson<TraversalRequest>,
) -> PageResult<TreeView> {
    let response = state
        .trees
        .update(|page| {
            page.traversal = req.traversal;
            Ok(())
        })
        .await?;
    Ok(Json(response))
}

// Graphs

async fn graphs_sample(State(state): AppStateRef) -> PageResult<GraphView> {
    let response = state
        .graphs
        .update(|page| {
            page.replace_graph(Graph::sample());
            Ok(())
        })
        .await?;
    Ok(Json(response))
}

async fn graphs_random(
    State(state): AppStateRef,
    ApiJson(req): ApiJson<SizeRequest>,
) -> PageResult<GraphView> {
    let mut rng = state.rng.lock().await;
    let response = state
        .graphs
        .update(|page| {
            page.replace_graph(Graph::random(req.size, &mut *rng)?);
            Ok(())
        })
        .await?;
    Ok(Json(response))
}

async fn graphs_node(
    State(state): AppStateRef,
    ApiJson(req): ApiJson<NodeRequest>,
) -> PageResult<GraphView> {
    let label = req.node.unwrap_or_default();
    let response = state.graphs.update(|page| page.add_node(&label)).await?;
    Ok(Json(response))
}

async fn graphs_edge(
    State(state): AppStateRef,
    ApiJson(req): ApiJson<EdgeRequest>,
) -> PageResult<GraphView> {
    let response = state
        .graphs
        .update(|page| page.add_edge(&req.from, &req.to, req.weight))
        .await?;
    Ok(Json(response))
}

async fn graphs_start(
    State(state): AppStateRef,
    ApiJson(req): ApiJson<NodeRequest>,
) -> PageResult<GraphView> {
    let label = req.node.unwrap_or_default();
    let response = state.graphs.update(|page| page.set_start(&label)).await?;
    Ok(Json(response))
}

async fn graphs_end(
    State(state): AppStateRef,
    ApiJson(req): ApiJson<NodeRequest>,
) -> PageResult<GraphView> {
    let response = state
        .graphs
        .update(|page| page.set_end(req.node.as_deref()))
        .await?;
    Ok(Json(response))
}

async fn graphs_algorithm(
    State(state): AppStateRef,
    ApiJson(req): ApiJson<AlgorithmRequest<GraphAlgorithm>>,
) -> PageResult<GraphView> {
    let response = state
        .graphs
        .update(|page| {
            page.set_algorithm(req.algorithm);
            Ok(())
        })
        .await?;
    Ok(Json(response))
}

// Playback

async fn playback_status_handler(State(state): AppStateRef, Path(page): Path<Page>) -> Response {
    state.page(page).await
}

async fn play_handler(State(state): AppStateRef, Path(page): Path<Page>) -> ApiResult<Response> {
    state.control(page, Control::Play).await
}

async fn pause_handler(State(state): AppStateRef, Path(page): Path<Page>) -> ApiResult<Response> {
    state.control(page, Control::Pause).await
}

async fn step_handler(State(state): AppStateRef, Path(page): Path<Page>) -> ApiResult<Response> {
    state.control(page, Control::Step).await
}

async fn step_back_handler(
    State(state): AppStateRef,
    Path(page): Path<Page>,
) -> ApiResult<Response> {
    state.control(page, Control::StepBack).await
}

async fn reset_handler(State(state): AppStateRef, Path(page): Path<Page>) -> ApiResult<Response> {
    state.control(page, Control::Reset).await
}

#[derive(Deserialize)]
struct SeekRequest {
    cursor: usize,
}

async fn seek_handler(
    State(state): AppStateRef,
    Path(page): Path<Page>,
    ApiJson(req): ApiJson<SeekRequest>,
) -> ApiResult<Response> {
    state.control(page, Control::Seek { cursor: req.cursor }).await
}

async fn speed_handler(
    State(state): AppStateRef,
    Path(page): Path<Page>,
    ApiJson(req): ApiJson<SpeedSetting>,
) -> ApiResult<Response> {
    state.control(page, Control::Speed(req)).await
}

// Stack and queue

#[derive(Deserialize)]
struct ItemRequest {
    value: String,
}

/// Contents and history of a stack or queue, with the answer to the
/// operation that produced it.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LinearResponse {
    /// Stack bottom to top, or queue front to back.
    items: Vec<String>,
    size: usize,
    history: Vec<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_empty: Option<bool>,
}

impl LinearResponse {
    fn stack(stack: &ValueStack) -> Self {
        Self {
            items: stack.items().to_vec(),
            size: stack.len(),
            history: stack.history(),
            value: None,
            is_empty: None,
        }
    }

    fn queue(queue: &ValueQueue) -> Self {
        Self {
            items: queue.items(),
            size: queue.len(),
            history: queue.history(),
            value: None,
            is_empty: None,
        }
    }

    fn with_value(mut self, value: String) -> Self {
        self.value = Some(value);
        self
    }

    fn with_is_empty(mut self, empty: bool) -> Self {
        self.is_empty = Some(empty);
        self
    }
}

async fn stack_handler(State(state): AppStateRef) -> Json<LinearResponse> {
    Json(LinearResponse::stack(&*state.stack.lock().await))
}

async fn stack_push(
    State(state): AppStateRef,
    ApiJson(req): ApiJson<ItemRequest>,
) -> ApiResult<Json<LinearResponse>> {
    let mut stack = state.stack.lock().await;
    stack.push(&req.value)?;
    Ok(Json(LinearResponse::stack(&stack)))
}

async fn stack_pop(State(state): AppStateRef) -> ApiResult<Json<LinearResponse>> {
    let mut stack = state.stack.lock().await;
    let value = stack.pop()?;
    Ok(Json(LinearResponse::stack(&stack).with_value(value)))
}

async fn stack_peek(State(state): AppStateRef) -> ApiResult<Json<LinearResponse>> {
    let mut stack = state.stack.lock().await;
    let value = stack.peek()?;
    Ok(Json(LinearResponse::stack(&stack).with_value(value)))
}

async fn stack_is_empty(State(state): AppStateRef) -> Json<LinearResponse> {
    let mut stack = state.stack.lock().await;
    let empty = stack.check_empty();
    Json(LinearResponse::stack(&stack).with_is_empty(empty))
}

async fn stack_clear(State(state): AppStateRef) -> Json<LinearResponse> {
    let mut stack = state.stack.lock().await;
    stack.clear();
    Json(LinearResponse::stack(&stack))
}

async fn queue_handler(State(state): AppStateRef) -> Json<LinearResponse> {
    Json(LinearResponse::queue(&*state.queue.lock().await))
}

async fn queue_enqueue(
    State(state): AppStateRef,
    ApiJson(req): ApiJson<ItemRequest>,
) -> ApiResult<Json<LinearResponse>> {
    let mut queue = state.queue.lock().await;
    queue.enqueue(&req.value)?;
    Ok(Json(LinearResponse::queue(&queue)))
}

async fn queue_dequeue(State(state): AppStateRef) -> ApiResult<Json<LinearResponse>> {
    let mut queue = state.queue.lock().await;
    let value = queue.dequeue()?;
    Ok(Json(LinearResponse::queue(&queue).with_value(value)))
}

async fn queue_front(State(state): AppStateRef) -> ApiResult<Json<LinearResponse>> {
    let mut queue = state.queue.lock().await;
    let value = queue.front()?;
    Ok(Json(LinearResponse::queue(&queue).with_value(value)))
}

async fn queue_is_empty(State(state): AppStateRef) -> Json<LinearResponse> {
    let mut queue = state.queue.lock().await;
    let empty = queue.check_empty();
    Json(LinearResponse::queue(&queue).with_is_empty(empty))
}

async fn queue_clear(State(state): AppStateRef) -> Json<LinearResponse> {
    let mut queue = state.queue.lock().await;
    queue.clear();
    Json(LinearResponse::queue(&queue))
}

// WebSocket

async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): AppStateRef,
    Path(page): Path<Page>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(socket, state, page))
}

/// Stream every status change of `page`'s controller and accept
/// [`Control`] commands as JSON text frames.
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>, page: Page) {
    let mut status = state.subscribe(page).await;
    debug!(%page, "websocket connected");

    let initial = status.borrow_and_update().clone();
    if send_json(&mut socket, &initial).await.is_err() {
        return;
    }

    loop {
        tokio::select! {
            changed = status.changed() => {
                if changed.is_err() {
                    break;
                }
                let current = status.borrow_and_update().clone();
                if send_json(&mut socket, &current).await.is_err() {
                    break;
                }
            }
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let reply = match serde_json::from_str::<Control>(text.as_str()) {
                            Ok(control) => state.control(page, control).await.err(),
                            Err(err) => {
                                debug!(%err, "unreadable websocket command");
                                let err = algoscope_core::Error::InvalidInput(err.to_string());
                                Some(ApiError::from(err))
                            }
                        };
                        if let Some(err) = reply {
                            let body = json!({ "error": err.to_string() });
                            if send_json(&mut socket, &body).await.is_err() {
                                break;
                            }
                        }
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(err)) => {
                        debug!(%err, "websocket error");
                        break;
                    }
                    Some(Ok(_)) => {}
                }
            }
        }
    }
    debug!(%page, "websocket closed");
}

async fn send_json<T: Serialize>(socket: &mut WebSocket, value: &T) -> Result<(), axum::Error> {
    match serde_json::to_string(value) {
        Ok(json) => socket.send(Message::Text(json.into())).await,
        Err(err) => {
            warn!(%err, "failed to serialize websocket message");
            Ok(())
        }
    }
}
