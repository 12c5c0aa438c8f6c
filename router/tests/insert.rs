use switchyard_router::{InsertError, Router};

struct InsertTest(Vec<(&'static str, Result<(), InsertError>)>);

impl InsertTest {
    fn run(self) {
        let mut router = Router::new();
        for (route, expected) in self.0 {
            let got = router.insert(route, route.to_owned());
            assert_eq!(got, expected, "{route}");
        }
    }
}

fn conflict(with: &'static str) -> InsertError {
    InsertError::Conflict { with: with.into() }
}

#[test]
fn wildcard_conflict() {
    InsertTest(vec![
        ("/cmd/:tool/:sub", Ok(())),
        ("/cmd/vet", Ok(())),
        ("/foo/bar", Ok(())),
        ("/foo/:name", Ok(())),
        ("/foo/:names", Err(conflict("/foo/:name"))),
        ("/cmd/*path", Ok(())),
        ("/cmd/:xxx/names", Err(conflict("/cmd/:tool/:sub"))),
        ("/cmd/:tool/:xxx/foo", Err(conflict("/cmd/:tool/:sub"))),
        ("/src/*filepath", Ok(())),
        ("/src/*file", Err(conflict("/src/*filepath"))),
        ("/src/:file", Ok(())),
        ("/src/static.json", Ok(())),
        ("/src/$filepathx", Ok(())),
        ("/src/", Ok(())),
        ("/src/foo/bar", Ok(())),
        ("/src1/", Ok(())),
        ("/src1/*filepath", Ok(())),
        ("/src2/*filepath", Ok(())),
        ("/src2/", Ok(())),
        ("/src2", Ok(())),
        ("/search/:query", Ok(())),
        ("/search/valid", Ok(())),
        ("/user_:name", Ok(())),
        ("/user_x", Ok(())),
        ("/user_:bar", Err(conflict("/user_:name"))),
        ("/id:id", Ok(())),
        ("/id/:id", Ok(())),
    ])
    .run()
}

#[test]
fn child_conflict() {
    InsertTest(vec![
        ("/cmd/vet", Ok(())),
        ("/cmd/:tool", Ok(())),
        ("/cmd/:tool/:sub", Ok(())),
        ("/cmd/:tool/misc", Ok(())),
        ("/cmd/:tool/:bad", Err(conflict("/cmd/:tool/:sub"))),
        ("/src/AUTHORS", Ok(())),
        ("/src/*filepath", Ok(())),
        ("/user_x", Ok(())),
        ("/user_:name", Ok(())),
        ("/id/:id", Ok(())),
        ("/id:id", Ok(())),
        ("/:id", Ok(())),
        ("/*filepath", Ok(())),
        ("/:other", Err(conflict("/:id"))),
        ("/*rest", Err(conflict("/*filepath"))),
    ])
    .run()
}

#[test]
fn duplicates() {
    InsertTest(vec![
        ("/", Ok(())),
        ("/", Err(conflict("/"))),
        ("/doc/", Ok(())),
        ("/doc/", Err(conflict("/doc/"))),
        ("/src/*filepath", Ok(())),
        ("/src/*filepath", Err(conflict("/src/*filepath"))),
        ("/search/:query", Ok(())),
        ("/search/:query", Err(conflict("/search/:query"))),
        ("/user_:name", Ok(())),
        ("/user_:name", Err(conflict("/user_:name"))),
    ])
    .run()
}

#[test]
fn invalid_pattern() {
    InsertTest(vec![
        ("", Err(InsertError::MissingLeadingSlash)),
        ("user", Err(InsertError::MissingLeadingSlash)),
        (":id", Err(InsertError::MissingLeadingSlash)),
        ("/user/:", Err(InsertError::UnnamedParam)),
        ("/user/:/x", Err(InsertError::UnnamedParam)),
        ("/src/*", Err(InsertError::UnnamedParam)),
        ("/:a:b", Err(InsertError::TooManyParams)),
        ("/:a*b", Err(InsertError::TooManyParams)),
        ("/src/*path/x", Err(InsertError::InvalidCatchAll)),
        ("/src/*path/", Err(InsertError::InvalidCatchAll)),
        ("/src*path", Err(InsertError::InvalidCatchAll)),
        ("/:id/x/:id", Err(InsertError::DuplicateParam { name: "id".into() })),
        ("/:file/*file", Err(InsertError::DuplicateParam { name: "file".into() })),
    ])
    .run()
}

#[test]
fn unicode() {
    InsertTest(vec![
        ("/α", Ok(())),
        ("/β", Ok(())),
        ("/δ", Ok(())),
        ("/ʊ", Ok(())),
        ("/:lang/ünìcodé", Ok(())),
        ("/:lang/ünìcodé", Err(conflict("/:lang/ünìcodé"))),
    ])
    .run()
}

#[test]
fn failed_insert_leaves_router_unchanged() {
    let mut router = Router::new();
    router.insert("/user/:id", 1).unwrap();

    assert_eq!(router.insert("/user/:name", 2), Err(conflict("/user/:id")));
    assert_eq!(router.insert("/user/:name/posts", 3), Err(conflict("/user/:id")));
    assert_eq!(router.insert("/user/:id", 4), Err(conflict("/user/:id")));

    let matched = router.at("/user/7").unwrap();
    assert_eq!(*matched.value, 1);
    assert_eq!(matched.params.get("id"), Some("7"));
    assert!(matched.params.get("name").is_none());

    assert_eq!(router.routes().count(), 1);
    assert!(router.at("/user/7/posts").is_err());
}

#[test]
fn error_display() {
    assert_eq!(
        conflict("/user/:id").to_string(),
        "insertion failed due to conflict with previously registered route: /user/:id"
    );
    assert_eq!(
        InsertError::MissingLeadingSlash.to_string(),
        "routes must begin with '/'"
    );
}
