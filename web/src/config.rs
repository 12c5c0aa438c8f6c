/// Behavior switches of [Router](crate::Router). Every switch is on by default.
///
/// # Examples
///
/// ```rust
/// use switchyard_web::RouterConfig;
///
/// let config = RouterConfig::new().redirect_fixed_path(false);
///
/// assert!(config.redirects_trailing_slash());
/// assert!(!config.redirects_fixed_path());
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RouterConfig {
    pub(crate) redirect_trailing_slash: bool,
    pub(crate) redirect_fixed_path: bool,
    pub(crate) handle_method_not_allowed: bool,
    pub(crate) handle_options: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl RouterConfig {
    pub const fn new() -> Self {
        Self {
            redirect_trailing_slash: true,
            redirect_fixed_path: true,
            handle_method_not_allowed: true,
            handle_options: true,
        }
    }

    /// Redirect when the path only differs from a route by a trailing slash.
    ///
    /// `GET` requests are redirected with `301 Moved Permanently`, everything else with
    /// `308 Permanent Redirect`.
    pub const fn redirect_trailing_slash(mut self, value: bool) -> Self {
        self.redirect_trailing_slash = value;
        self
    }

    /// Clean the path and retry the lookup ignoring ASCII case before giving up.
    ///
    /// Superfluous path elements like `../` or `//` are removed. When trailing slash redirection
    /// is on as well, a path with a trailing slash added or removed is tried too.
    pub const fn redirect_fixed_path(mut self, value: bool) -> Self {
        self.redirect_fixed_path = value;
        self
    }

    /// Answer with `405 Method Not Allowed` and the list of allowed methods when the path is
    /// routed for other methods only. Otherwise such requests are not found.
    pub const fn handle_method_not_allowed(mut self, value: bool) -> Self {
        self.handle_method_not_allowed = value;
        self
    }

    /// Answer `OPTIONS` requests automatically when no `OPTIONS` route matches.
    pub const fn handle_options(mut self, value: bool) -> Self {
        self.handle_options = value;
        self
    }

    pub const fn redirects_trailing_slash(&self) -> bool {
        self.redirect_trailing_slash
    }

    pub const fn redirects_fixed_path(&self) -> bool {
        self.redirect_fixed_path
    }

    pub const fn handles_method_not_allowed(&self) -> bool {
        self.handle_method_not_allowed
    }

    pub const fn handles_options(&self) -> bool {
        self.handle_options
    }
}
