/// Returns the canonical form of a URL path.
///
/// The following rules are applied:
///
/// 1. Multiple slashes are replaced by a single slash.
/// 2. Each `.` path element is eliminated.
/// 3. Each `..` path element is eliminated along with the non-`..` element that precedes it.
/// 4. `..` elements that begin a rooted path are eliminated, i.e. `/..` becomes `/`.
///
/// The result always begins with `/`. A trailing slash is kept if the original path had one.
///
/// # Examples
///
/// ```rust
/// use switchyard_router::clean_path;
///
/// assert_eq!(clean_path("/a//b/./c/../d/"), "/a/b/d/");
/// assert_eq!(clean_path("a/../../b"), "/b");
/// assert_eq!(clean_path(""), "/");
/// ```
pub fn clean_path(path: &str) -> String {
    let trailing = path.len() > 1 && path.ends_with('/');

    let mut elements = Vec::new();
    for element in path.split('/') {
        match element {
            "" | "." => {}
            ".." => {
                elements.pop();
            }
            element => elements.push(element),
        }
    }

    let mut out = String::with_capacity(path.len() + 1);
    for element in elements {
        out.push('/');
        out.push_str(element);
    }

    if out.is_empty() || trailing {
        out.push('/');
    }

    out
}

#[cfg(test)]
mod test {
    use super::clean_path;

    #[test]
    fn already_clean() {
        for path in ["/", "/abc", "/a/b/c", "/abc/", "/a/b/c/"] {
            assert_eq!(clean_path(path), path);
        }
    }

    #[test]
    fn missing_root() {
        assert_eq!(clean_path(""), "/");
        assert_eq!(clean_path("a/"), "/a/");
        assert_eq!(clean_path("abc"), "/abc");
        assert_eq!(clean_path("abc/def"), "/abc/def");
    }

    #[test]
    fn double_slash() {
        assert_eq!(clean_path("//"), "/");
        assert_eq!(clean_path("/abc//"), "/abc/");
        assert_eq!(clean_path("/abc//def//ghi"), "/abc/def/ghi");
        assert_eq!(clean_path("//abc"), "/abc");
    }

    #[test]
    fn dot() {
        assert_eq!(clean_path("."), "/");
        assert_eq!(clean_path("./"), "/");
        assert_eq!(clean_path("/abc/./def"), "/abc/def");
        assert_eq!(clean_path("/./abc/def"), "/abc/def");
        assert_eq!(clean_path("/abc/."), "/abc");
    }

    #[test]
    fn dot_dot() {
        assert_eq!(clean_path(".."), "/");
        assert_eq!(clean_path("../../.."), "/");
        assert_eq!(clean_path("/abc/def/ghi/../jkl"), "/abc/def/jkl");
        assert_eq!(clean_path("/abc/def/../ghi/../jkl"), "/abc/jkl");
        assert_eq!(clean_path("/abc/def/.."), "/abc");
        assert_eq!(clean_path("/abc/def/../.."), "/");
        assert_eq!(clean_path("/abc/def/../../.."), "/");
        assert_eq!(clean_path("/abc/def/../../../ghi/jkl/../../../mno"), "/mno");
    }

    #[test]
    fn combination() {
        assert_eq!(clean_path("abc/./../def"), "/def");
        assert_eq!(clean_path("abc//./../def"), "/def");
        assert_eq!(clean_path("abc/../../././../def"), "/def");
        assert_eq!(clean_path("/a//b/./c/../d/"), "/a/b/d/");
    }
}
