use http::Method;
use switchyard_router::Router;

/// One route tree per HTTP method.
///
/// Methods are few so a linear scan beats hashing here.
#[derive(Clone)]
pub(crate) struct MethodTrieSet<T> {
    trees: Vec<(Method, Router<T>)>,
}

impl<T> MethodTrieSet<T> {
    pub(crate) const fn new() -> Self {
        Self { trees: Vec::new() }
    }

    pub(crate) fn get(&self, method: &Method) -> Option<&Router<T>> {
        self.trees.iter().find(|(m, _)| m == method).map(|(_, tree)| tree)
    }

    pub(crate) fn get_or_insert(&mut self, method: &Method) -> &mut Router<T> {
        let idx = match self.trees.iter().position(|(m, _)| m == method) {
            Some(idx) => idx,
            None => {
                self.trees.push((method.clone(), Router::new()));
                self.trees.len() - 1
            }
        };
        &mut self.trees[idx].1
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&Method, &Router<T>)> {
        self.trees.iter().map(|(method, tree)| (method, tree))
    }
}
