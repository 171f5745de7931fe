//! Algorithm catalogue: names, complexities and reference code.
//!
//! `TraceStep::highlight` indexes into [`AlgorithmInfo::code`].

/// Static description of one algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AlgorithmInfo {
    pub name: &'static str,
    pub time_complexity: &'static str,
    pub space_complexity: &'static str,
    pub description: &'static str,
    pub code: &'static [&'static str],
}

/// Sorting algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SortAlgorithm {
    #[default]
    Bubble,
    Quick,
    Merge,
    Insertion,
    Selection,
}

/// Searching algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SearchAlgorithm {
    #[default]
    Linear,
    Binary,
}

/// Binary tree traversals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TreeTraversal {
    #[default]
    InOrder,
    PreOrder,
    PostOrder,
    Bfs,
    Dfs,
}

/// Graph traversals and shortest paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum GraphAlgorithm {
    #[default]
    Bfs,
    Dfs,
    Dijkstra,
}

/// Any traced algorithm, tagged by family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "family", content = "algorithm", rename_all = "lowercase")
)]
pub enum Algorithm {
    Sort(SortAlgorithm),
    Search(SearchAlgorithm),
    Tree(TreeTraversal),
    Graph(GraphAlgorithm),
}

impl Algorithm {
    pub fn info(&self) -> &'static AlgorithmInfo {
        match self {
            Algorithm::Sort(a) => a.info(),
            Algorithm::Search(a) => a.info(),
            Algorithm::Tree(a) => a.info(),
            Algorithm::Graph(a) => a.info(),
        }
    }
}

impl From<SortAlgorithm> for Algorithm {
    fn from(a: SortAlgorithm) -> Self {
        Algorithm::Sort(a)
    }
}

impl From<SearchAlgorithm> for Algorithm {
    fn from(a: SearchAlgorithm) -> Self {
        Algorithm::Search(a)
    }
}

impl From<TreeTraversal> for Algorithm {
    fn from(a: TreeTraversal) -> Self {
        Algorithm::Tree(a)
    }
}

impl From<GraphAlgorithm> for Algorithm {
    fn from(a: GraphAlgorithm) -> Self {
        Algorithm::Graph(a)
    }
}

impl SortAlgorithm {
    pub const ALL: [Self; 5] = [
        Self::Bubble,
        Self::Quick,
        Self::Merge,
        Self::Insertion,
        Self::Selection,
    ];

    pub fn info(&self) -> &'static AlgorithmInfo {
        match self {
            Self::Bubble => &BUBBLE,
            Self::Quick => &QUICK,
            Self::Merge => &MERGE,
            Self::Insertion => &INSERTION,
            Self::Selection => &SELECTION,
        }
    }
}

impl SearchAlgorithm {
    pub const ALL: [Self; 2] = [Self::Linear, Self::Binary];

    pub fn info(&self) -> &'static AlgorithmInfo {
        match self {
            Self::Linear => &LINEAR,
            Self::Binary => &BINARY,
        }
    }

    /// Binary search only works on ascending input.
    pub const fn requires_sorted(&self) -> bool {
        matches!(self, Self::Binary)
    }
}

impl TreeTraversal {
    pub const ALL: [Self; 5] = [
        Self::InOrder,
        Self::PreOrder,
        Self::PostOrder,
        Self::Bfs,
        Self::Dfs,
    ];

    pub fn info(&self) -> &'static AlgorithmInfo {
        match self {
            Self::InOrder => &IN_ORDER,
            Self::PreOrder => &PRE_ORDER,
            Self::PostOrder => &POST_ORDER,
            Self::Bfs => &TREE_BFS,
            Self::Dfs => &TREE_DFS,
        }
    }
}

impl GraphAlgorithm {
    pub const ALL: [Self; 3] = [Self::Bfs, Self::Dfs, Self::Dijkstra];

    pub fn info(&self) -> &'static AlgorithmInfo {
        match self {
            Self::Bfs => &GRAPH_BFS,
            Self::Dfs => &GRAPH_DFS,
            Self::Dijkstra => &DIJKSTRA,
        }
    }
}

static BUBBLE: AlgorithmInfo = AlgorithmInfo {
    name: "Bubble Sort",
    time_complexity: "O(n²)",
    space_complexity: "O(1)",
    description: "Repeatedly steps through the list, compares adjacent elements and swaps them \
        if they're in the wrong order.",
    code: &[
        "for (i = 0; i < n-1; i++) {",
        "  for (j = 0; j < n-i-1; j++) {",
        "    if (arr[j] > arr[j+1]) {",
        "      swap(arr[j], arr[j+1]);",
        "    }",
        "  }",
        "}",
    ],
};

static QUICK: AlgorithmInfo = AlgorithmInfo {
    name: "Quick Sort",
    time_complexity: "O(n log n)",
    space_complexity: "O(log n)",
    description: "Partitions the array around a pivot element, then recursively sorts the two \
        sides.",
    code: &[
        "quickSort(arr, low, high) {",
        "  if (low < high) {",
        "    pivot = arr[high]; i = low - 1;",
        "    for (j = low; j < high; j++)",
        "      if (arr[j] < pivot) swap(arr[++i], arr[j]);",
        "    swap(arr[i + 1], arr[high]);",
        "    quickSort(arr, low, i); quickSort(arr, i + 2, high);",
        "  }",
        "}",
    ],
};

static MERGE: AlgorithmInfo = AlgorithmInfo {
    name: "Merge Sort",
    time_complexity: "O(n log n)",
    space_complexity: "O(n)",
    description: "Divides the array into halves, recursively sorts them, then merges the \
        sorted halves back together.",
    code: &[
        "mergeSort(arr, left, right) {",
        "  if (left >= right) return;",
        "  mid = (left + right) / 2;",
        "  mergeSort(arr, left, mid);",
        "  mergeSort(arr, mid + 1, right);",
        "  merge: take the smaller head of both halves;",
        "  copy what remains and write the run back;",
        "}",
    ],
};

static INSERTION: AlgorithmInfo = AlgorithmInfo {
    name: "Insertion Sort",
    time_complexity: "O(n²)",
    space_complexity: "O(1)",
    description: "Builds the sorted array one element at a time by inserting each element into \
        its correct position.",
    code: &[
        "for (i = 1; i < n; i++) {",
        "  key = arr[i]; j = i - 1;",
        "  while (j >= 0 && arr[j] > key) {",
        "    arr[j + 1] = arr[j]; j--;",
        "  }",
        "  arr[j + 1] = key;",
        "}",
    ],
};

static SELECTION: AlgorithmInfo = AlgorithmInfo {
    name: "Selection Sort",
    time_complexity: "O(n²)",
    space_complexity: "O(1)",
    description: "Finds the minimum element and places it at the beginning, then repeats for \
        the remaining unsorted portion.",
    code: &[
        "for (i = 0; i < n-1; i++) {",
        "  min = i;",
        "  for (j = i+1; j < n; j++)",
        "    if (arr[j] < arr[min]) min = j;",
        "  swap(arr[min], arr[i]);",
        "}",
    ],
};

static LINEAR: AlgorithmInfo = AlgorithmInfo {
    name: "Linear Search",
    time_complexity: "O(n)",
    space_complexity: "O(1)",
    description: "Searches through each element sequentially until the target is found or the \
        end is reached.",
    code: &[
        "for (i = 0; i < n; i++) {",
        "  if (arr[i] == target) {",
        "    return i;",
        "  }",
        "}",
        "return -1;",
    ],
};

static BINARY: AlgorithmInfo = AlgorithmInfo {
    name: "Binary Search",
    time_complexity: "O(log n)",
    space_complexity: "O(1)",
    description: "Efficiently searches a sorted array by repeatedly dividing the search \
        interval in half.",
    code: &[
        "left = 0, right = n - 1;",
        "while (left <= right) {",
        "  mid = left + (right - left) / 2;",
        "  if (arr[mid] == target) return mid;",
        "  if (arr[mid] < target) left = mid + 1;",
        "  else right = mid - 1;",
        "}",
        "return -1;",
    ],
};

static IN_ORDER: AlgorithmInfo = AlgorithmInfo {
    name: "In-order Traversal",
    time_complexity: "O(n)",
    space_complexity: "O(h)",
    description: "Visit left subtree, root, then right subtree (Left → Root → Right)",
    code: &[
        "inorder(node) {",
        "  if (node !== null) {",
        "    inorder(node.left);",
        "    visit(node);",
        "    inorder(node.right);",
        "  }",
        "}",
    ],
};

static PRE_ORDER: AlgorithmInfo = AlgorithmInfo {
    name: "Pre-order Traversal",
    time_complexity: "O(n)",
    space_complexity: "O(h)",
    description: "Visit root, left subtree, then right subtree (Root → Left → Right)",
    code: &[
        "preorder(node) {",
        "  if (node !== null) {",
        "    visit(node);",
        "    preorder(node.left);",
        "    preorder(node.right);",
        "  }",
        "}",
    ],
};

static POST_ORDER: AlgorithmInfo = AlgorithmInfo {
    name: "Post-order Traversal",
    time_complexity: "O(n)",
    space_complexity: "O(h)",
    description: "Visit left subtree, right subtree, then root (Left → Right → Root)",
    code: &[
        "postorder(node) {",
        "  if (node !== null) {",
        "    postorder(node.left);",
        "    postorder(node.right);",
        "    visit(node);",
        "  }",
        "}",
    ],
};

static TREE_BFS: AlgorithmInfo = AlgorithmInfo {
    name: "Breadth-First Search",
    time_complexity: "O(n)",
    space_complexity: "O(w)",
    description: "Visit nodes level by level using a queue",
    code: &[
        "bfs(root) {",
        "  queue = [root];",
        "  while (queue.length > 0) {",
        "    node = queue.shift();",
        "    visit(node);",
        "    if (node.left) queue.push(node.left);",
        "    if (node.right) queue.push(node.right);",
        "  }",
        "}",
    ],
};

static TREE_DFS: AlgorithmInfo = AlgorithmInfo {
    name: "Depth-First Search",
    time_complexity: "O(n)",
    space_complexity: "O(h)",
    description: "Visit nodes using an explicit stack (same order as pre-order)",
    code: &[
        "dfs(root) {",
        "  stack = [root];",
        "  while (stack.length > 0) {",
        "    node = stack.pop();",
        "    visit(node);",
        "    if (node.right) stack.push(node.right);",
        "    if (node.left) stack.push(node.left);",
        "  }",
        "}",
    ],
};

static GRAPH_BFS: AlgorithmInfo = AlgorithmInfo {
    name: "Breadth-First Search",
    time_complexity: "O(V + E)",
    space_complexity: "O(V)",
    description: "Explores nodes level by level using a queue data structure",
    code: &[
        "bfs(graph, start) {",
        "  queue = [start];",
        "  visited = new Set();",
        "  while (queue.length > 0) {",
        "    node = queue.shift();",
        "    if (!visited.has(node)) {",
        "      visited.add(node);",
        "      for (neighbor of graph[node]) {",
        "        if (!visited.has(neighbor)) {",
        "          queue.push(neighbor);",
        "        }",
        "      }",
        "    }",
        "  }",
        "}",
    ],
};

static GRAPH_DFS: AlgorithmInfo = AlgorithmInfo {
    name: "Depth-First Search",
    time_complexity: "O(V + E)",
    space_complexity: "O(V)",
    description: "Explores as far as possible along each branch using a stack",
    code: &[
        "dfs(graph, start) {",
        "  stack = [start];",
        "  visited = new Set();",
        "  while (stack.length > 0) {",
        "    node = stack.pop();",
        "    if (!visited.has(node)) {",
        "      visited.add(node);",
        "      for (neighbor of graph[node]) {",
        "        if (!visited.has(neighbor)) {",
        "          stack.push(neighbor);",
        "        }",
        "      }",
        "    }",
        "  }",
        "}",
    ],
};

static DIJKSTRA: AlgorithmInfo = AlgorithmInfo {
    name: "Dijkstra's Algorithm",
    time_complexity: "O(V²)",
    space_complexity: "O(V)",
    description: "Finds shortest path between nodes using weighted edges",
    code: &[
        "dijkstra(graph, start) {",
        "  distances = {};",
        "  visited = new Set();",
        "  for (node of graph) distances[node] = ∞;",
        "  distances[start] = 0;",
        "  while (unvisited nodes remain) {",
        "    current = unvisited node with min distance;",
        "    if (distances[current] == ∞) break;",
        "    visited.add(current);",
        "    for (neighbor of graph[current]) {",
        "      newDist = distances[current] + weight;",
        "      if (newDist < distances[neighbor])",
        "        distances[neighbor] = newDist;",
        "    }",
        "  }",
        "}",
    ],
};
