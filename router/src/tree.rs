use core::{fmt, mem};

use crate::{
    params::Params,
    pattern::{RoutePattern, Segment},
    InsertError,
};

/// A radix tree used for URL path matching.
///
/// See [the crate documentation](crate) for details.
#[derive(Clone)]
pub(crate) struct Node<T> {
    // This node's static prefix. Empty for wildcard nodes and the root.
    pub(crate) prefix: Vec<u8>,

    // The type of this node.
    pub(crate) node_type: NodeType,

    // The priority of this node.
    //
    // Nodes with more routes below them are higher priority and searched first.
    pub(crate) priority: u32,

    // The first byte of every static child, for fast linear search.
    pub(crate) indices: Vec<u8>,

    // Static children. Aligned with `indices`.
    pub(crate) children: Vec<Node<T>>,

    // The `:name` child, tried when no static child matches.
    pub(crate) param: Option<Box<Node<T>>>,

    // The `*name` child, tried when neither static nor param children match.
    pub(crate) catch_all: Option<Box<Node<T>>>,

    // The value stored at this node.
    pub(crate) value: Option<T>,

    // The route the value was registered under.
    pub(crate) route: Option<Box<str>>,
}

/// The types of nodes a tree can hold.
#[derive(PartialEq, Eq, Debug, Clone)]
pub(crate) enum NodeType {
    /// A static prefix, e.g. '/foo'.
    Static,

    /// A route parameter, e.g. '/:id'. Matches up to the next '/'.
    Param(Box<str>),

    /// A catch-all parameter, e.g. '/*file'. Matches the rest of the path.
    CatchAll(Box<str>),
}

impl<T> Node<T> {
    pub(crate) const fn new() -> Self {
        Self {
            prefix: Vec::new(),
            node_type: NodeType::Static,
            priority: 0,
            indices: Vec::new(),
            children: Vec::new(),
            param: None,
            catch_all: None,
            value: None,
            route: None,
        }
    }

    fn with_prefix(prefix: &[u8]) -> Self {
        Self {
            prefix: prefix.to_vec(),
            priority: 1,
            ..Self::new()
        }
    }

    fn wildcard(node_type: NodeType) -> Self {
        Self { node_type, ..Self::new() }
    }

    // Insert a route into the tree.
    pub(crate) fn insert(&mut self, route: &str, val: T) -> Result<(), InsertError> {
        let pattern = RoutePattern::parse(route)?;

        // Detect conflicts before touching the tree so a failed insert leaves it as it was.
        if let Some(err) = self.find_conflict(pattern.segments()) {
            return Err(err);
        }

        self.priority += 1;

        let mut node = self;
        for segment in pattern.segments() {
            node = match *segment {
                Segment::Static(text) => node.insert_static(text.as_bytes()),
                Segment::Param(name) => insert_wildcard(&mut node.param, NodeType::Param(name.into())),
                Segment::CatchAll(name) => insert_wildcard(&mut node.catch_all, NodeType::CatchAll(name.into())),
            };
        }

        node.value = Some(val);
        node.route = Some(route.into());
        Ok(())
    }

    // Walk the existing tree along the given segments and report the route a new insertion
    // would conflict with, if any.
    //
    // Once the walk leaves the existing tree every node below is new, so nothing can conflict.
    fn find_conflict(&self, segments: &[Segment<'_>]) -> Option<InsertError> {
        let mut node = self;

        for segment in segments {
            node = match *segment {
                Segment::Static(text) => node.walk_static(text.as_bytes())?,
                Segment::Param(name) => {
                    let param = node.param.as_deref()?;
                    if !param.is_named(name) {
                        return Some(InsertError::conflict(param.any_route().unwrap_or(name)));
                    }
                    param
                }
                Segment::CatchAll(name) => {
                    let catch_all = node.catch_all.as_deref()?;
                    if !catch_all.is_named(name) {
                        return Some(InsertError::conflict(catch_all.any_route().unwrap_or(name)));
                    }
                    catch_all
                }
            };
        }

        node.value.as_ref()?;
        node.route.as_deref().map(InsertError::conflict)
    }

    // Follow static children consuming exactly `text`.
    fn walk_static(&self, mut text: &[u8]) -> Option<&Node<T>> {
        let mut node = self;

        while !text.is_empty() {
            let i = node.indices.iter().position(|&b| b == text[0])?;
            let child = &node.children[i];

            // A partial match means insertion would split here and branch off into new nodes.
            if !text.starts_with(&child.prefix) {
                return None;
            }

            text = &text[child.prefix.len()..];
            node = child;
        }

        Some(node)
    }

    fn is_named(&self, name: &str) -> bool {
        match self.node_type {
            NodeType::Param(ref n) | NodeType::CatchAll(ref n) => **n == *name,
            NodeType::Static => false,
        }
    }

    // Any route registered at or below this node.
    fn any_route(&self) -> Option<&str> {
        if let Some(route) = self.route.as_deref() {
            return Some(route);
        }

        self.children
            .iter()
            .chain(self.param.as_deref())
            .chain(self.catch_all.as_deref())
            .find_map(Node::any_route)
    }

    // Insert static text below this node, splitting existing nodes where the text diverges.
    //
    // Returns the node the text ends at.
    fn insert_static(&mut self, mut text: &[u8]) -> &mut Node<T> {
        let mut node = self;

        while !text.is_empty() {
            let Some(i) = node.indices.iter().position(|&b| b == text[0]) else {
                node.indices.push(text[0]);
                node.children.push(Node::with_prefix(text));
                let i = node.update_child_priority(node.children.len() - 1, 0);
                return &mut node.children[i];
            };

            let child = &mut node.children[i];
            let common = child
                .prefix
                .iter()
                .zip(text)
                .take_while(|(a, b)| a == b)
                .count();

            // This node has a longer prefix than we need, so move the non-matching suffix into a child.
            if common < child.prefix.len() {
                child.split(common);
            }

            text = &text[common..];
            let i = node.update_child_priority(i, 1);
            node = &mut node.children[i];
        }

        node
    }

    // Split this node at `at`. The suffix and everything below moves into a single child.
    fn split(&mut self, at: usize) {
        let child = Node {
            prefix: self.prefix[at..].to_vec(),
            node_type: NodeType::Static,
            priority: self.priority,
            indices: mem::take(&mut self.indices),
            children: mem::take(&mut self.children),
            param: self.param.take(),
            catch_all: self.catch_all.take(),
            value: self.value.take(),
            route: self.route.take(),
        };

        self.indices = vec![child.prefix[0]];
        self.children = vec![child];
        self.prefix.truncate(at);
    }

    // Increments priority of the given child node, reordering the children if necessary.
    //
    // Returns the new index of the node.
    fn update_child_priority(&mut self, i: usize, increment: u32) -> usize {
        self.children[i].priority += increment;
        let priority = self.children[i].priority;

        // Move the node to the front as necessary.
        let mut updated = i;
        while updated > 0 && self.children[updated - 1].priority < priority {
            self.children.swap(updated - 1, updated);
            updated -= 1;
        }

        // Update the position of the indices to match.
        if updated != i {
            self.indices[updated..=i].rotate_right(1);
        }

        updated
    }

    /// Iterates over the tree in priority order and calls the given visitor with every
    /// registered route and its value.
    pub(crate) fn for_each<'n, F>(&'n self, visitor: &mut F)
    where
        F: FnMut(&'n str, &'n T),
    {
        if let (Some(route), Some(value)) = (self.route.as_deref(), self.value.as_ref()) {
            visitor(route, value);
        }

        for child in self
            .children
            .iter()
            .chain(self.param.as_deref())
            .chain(self.catch_all.as_deref())
        {
            child.for_each(visitor);
        }
    }
}

// Get or create the wildcard child stored in `slot`.
//
// Names were checked by `Node::find_conflict` before any mutation.
fn insert_wildcard<T>(slot: &mut Option<Box<Node<T>>>, node_type: NodeType) -> &mut Node<T> {
    let node = slot.get_or_insert_with(|| Box::new(Node::wildcard(node_type)));
    node.priority += 1;
    node
}

impl<T> Node<T> {
    /// Returns the value matching the given path.
    ///
    /// Children are tried in the order static, parameter, catch-all. When a branch dead-ends
    /// the next one at the same branch point is tried, and parameters captured by the failed
    /// branch are discarded.
    #[inline]
    pub(crate) fn at<'n, 'p>(&'n self, path: &'p str) -> Option<(&'n T, Params<'n, 'p>)> {
        let mut params = Params::new();
        self.at_from(path, 0, &mut params).map(|value| (value, params))
    }

    fn at_from<'n, 'p>(&'n self, path: &'p str, pos: usize, params: &mut Params<'n, 'p>) -> Option<&'n T> {
        let bytes = path.as_bytes();

        match self.node_type {
            NodeType::Static => {
                if !bytes[pos..].starts_with(&self.prefix) {
                    return None;
                }

                let pos = pos + self.prefix.len();

                // Consumed the whole path.
                let Some(&next) = bytes.get(pos) else {
                    return self.value.as_ref();
                };

                let mark = params.len();

                if let Some(i) = self.indices.iter().position(|&b| b == next) {
                    if let Some(value) = self.children[i].at_from(path, pos, params) {
                        return Some(value);
                    }
                    params.truncate(mark);
                }

                if let Some(param) = self.param.as_deref() {
                    if let Some(value) = param.at_from(path, pos, params) {
                        return Some(value);
                    }
                    params.truncate(mark);
                }

                self.catch_all.as_deref()?.at_from(path, pos, params)
            }

            NodeType::Param(ref name) => {
                let end = segment_end(bytes, pos);

                // Double `//` implying an empty parameter, no match.
                if end == pos {
                    return None;
                }

                params.push(name, path.get(pos..end)?);

                // This is the last path segment.
                let Some(&next) = bytes.get(end) else {
                    return self.value.as_ref();
                };

                let i = self.indices.iter().position(|&b| b == next)?;
                self.children[i].at_from(path, end, params)
            }

            NodeType::CatchAll(ref name) => {
                // Catch-all values must not be empty.
                if pos == bytes.len() {
                    return None;
                }

                let value = self.value.as_ref()?;
                params.push(name, path.get(pos..)?);
                Some(value)
            }
        }
    }

    /// Returns the path as registered if it matches a route while ignoring ASCII case.
    ///
    /// Static text takes the casing of the registered route. Parameter values are copied from
    /// the given path unchanged.
    pub(crate) fn find_case_insensitive(&self, path: &str) -> Option<String> {
        let mut out = Vec::with_capacity(path.len());

        if self.case_insensitive_from(path.as_bytes(), 0, &mut out) {
            String::from_utf8(out).ok()
        } else {
            None
        }
    }

    fn case_insensitive_from(&self, path: &[u8], pos: usize, out: &mut Vec<u8>) -> bool {
        let mark = out.len();

        let end = match self.node_type {
            NodeType::Static => {
                let end = pos + self.prefix.len();
                match path.get(pos..end) {
                    Some(s) if s.eq_ignore_ascii_case(&self.prefix) => {}
                    _ => return false,
                }
                out.extend_from_slice(&self.prefix);
                end
            }
            NodeType::Param(_) => {
                let end = segment_end(path, pos);
                if end == pos {
                    return false;
                }
                out.extend_from_slice(&path[pos..end]);
                end
            }
            NodeType::CatchAll(_) => {
                if pos == path.len() || self.value.is_none() {
                    return false;
                }
                out.extend_from_slice(&path[pos..]);
                return true;
            }
        };

        let Some(&next) = path.get(end) else {
            if self.value.is_some() {
                return true;
            }
            out.truncate(mark);
            return false;
        };

        // Up to two static children may match, one per case.
        for (i, index) in self.indices.iter().enumerate() {
            if index.eq_ignore_ascii_case(&next) && self.children[i].case_insensitive_from(path, end, out) {
                return true;
            }
        }

        for wild in self.param.as_deref().into_iter().chain(self.catch_all.as_deref()) {
            if wild.case_insensitive_from(path, end, out) {
                return true;
            }
        }

        out.truncate(mark);
        false
    }
}

// Position of the next '/' at or after `pos`, or the end of the path.
fn segment_end(path: &[u8], pos: usize) -> usize {
    path[pos..]
        .iter()
        .position(|&b| b == b'/')
        .map_or(path.len(), |i| pos + i)
}

impl<T> Default for Node<T> {
    fn default() -> Node<T> {
        Node::new()
    }
}

impl<T> fmt::Debug for Node<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut f = f.debug_struct("Node");
        f.field("value", &self.value.as_ref())
            .field("prefix", &String::from_utf8_lossy(&self.prefix))
            .field("node_type", &self.node_type)
            .field("children", &self.children)
            .field("param", &self.param)
            .field("catch_all", &self.catch_all);

        // Extra information for debugging purposes.
        #[cfg(test)]
        {
            let indices = self.indices.iter().map(|&x| char::from(x)).collect::<Vec<_>>();
            f.field("indices", &indices).field("priority", &self.priority);
        }

        f.finish()
    }
}
