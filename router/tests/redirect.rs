use switchyard_router::Router;

fn router(routes: &[&'static str]) -> Router<&'static str> {
    let mut router = Router::new();
    for route in routes {
        router.insert(*route, *route).unwrap();
    }
    router
}

#[test]
fn trailing_slash() {
    let router = router(&[
        "/hi",
        "/b/",
        "/search/:query",
        "/cmd/:tool/",
        "/src/*filepath",
        "/x",
        "/x/y",
        "/y/",
        "/y/z",
        "/0/:id",
        "/0/:id/1",
        "/1/:id/",
        "/1/:id/2",
        "/aa",
        "/a/",
        "/admin",
        "/admin/:category",
        "/admin/:category/:page",
        "/doc",
        "/doc/rust_faq.html",
        "/doc/rust1.html",
        "/no/a",
        "/no/b",
        "/api/hello/:name/bar/",
        "/api/bar/:name",
        "/api/baz/foo",
        "/api/baz/foo/bar",
        "/blog/:p",
        "/posts/:b/:c",
        "/posts/b/:c/d/",
    ]);

    let redirects = [
        ("/hi/", "/hi"),
        ("/b", "/b/"),
        ("/search/rustacean/", "/search/rustacean"),
        ("/cmd/vet", "/cmd/vet/"),
        ("/x/", "/x"),
        ("/y", "/y/"),
        ("/0/rust/", "/0/rust"),
        ("/1/rust", "/1/rust/"),
        ("/a", "/a/"),
        ("/admin/", "/admin"),
        ("/admin/config/", "/admin/config"),
        ("/admin/config/permissions/", "/admin/config/permissions"),
        ("/doc/", "/doc"),
        ("/api/hello/x/bar", "/api/hello/x/bar/"),
        ("/api/baz/foo/", "/api/baz/foo"),
        ("/api/baz/foo/bar/", "/api/baz/foo/bar"),
        ("/blog/rust/", "/blog/rust"),
        ("/posts/b/x/d", "/posts/b/x/d/"),
    ];

    for (path, expected) in redirects {
        assert_eq!(router.trailing_slash_redirect(path).as_deref(), Some(expected), "{path}");
    }

    for path in [
        "/",
        "/hi",
        "/no",
        "/no/",
        "/_",
        "/_/",
        "/api/world/abc",
        "/src/",
        "/posts/b/x/d/e",
    ] {
        assert_eq!(router.trailing_slash_redirect(path), None, "{path}");
    }
}

#[test]
fn trailing_slash_root() {
    let router = router(&["/"]);
    assert_eq!(router.trailing_slash_redirect("/"), None);
    assert_eq!(router.trailing_slash_redirect(""), Some("/".to_owned()));

    let router = router_with_params();
    assert_eq!(router.trailing_slash_redirect("/"), None);
}

fn router_with_params() -> Router<&'static str> {
    router(&["/:name", "/*rest"])
}

const FIXED_PATH_ROUTES: &[&str] = &[
    "/hi",
    "/b/",
    "/ABC/",
    "/search/:query",
    "/cmd/:tool/",
    "/src/*filepath",
    "/x",
    "/x/y",
    "/y/",
    "/y/z",
    "/0/:id",
    "/0/:id/1",
    "/1/:id/",
    "/1/:id/2",
    "/aa",
    "/a/",
    "/doc",
    "/doc/rust_faq.html",
    "/doc/rust1.html",
    "/doc/rust/away",
    "/no/a",
    "/no/b",
    "/Π",
    "/u/apfêl/",
    "/u/äpfêl/",
    "/u/öpfêl",
    "/v/Äpfêl/",
    "/v/Öpfêl",
    "/w/♬",
    "/w/♭/",
    "/w/𠜎",
    "/w/𠜏/",
];

#[test]
fn fixed_path() {
    let router = router(FIXED_PATH_ROUTES);

    let fixed = [
        ("/HI", "/hi"),
        ("/B/", "/b/"),
        ("/abc/", "/ABC/"),
        ("/aBc/", "/ABC/"),
        ("/SEARCH/QUERY", "/search/QUERY"),
        ("/CMD/TOOL/", "/cmd/TOOL/"),
        ("/SRC/FILE/PATH", "/src/FILE/PATH"),
        ("/x/Y", "/x/y"),
        ("/Y/Z", "/y/z"),
        ("/AA", "/aa"),
        ("/DOC", "/doc"),
        ("/DOC/RUST_FAQ.HTML", "/doc/rust_faq.html"),
        ("/DOC/RUST/AWAY", "/doc/rust/away"),
        ("/NO/A", "/no/a"),
        ("/U/apfêl/", "/u/apfêl/"),
        ("/W/♬", "/w/♬"),
        ("/W/𠜏/", "/w/𠜏/"),
        ("//hi", "/hi"),
        ("/../hi", "/hi"),
        ("/x/../HI", "/hi"),
        ("/doc/./RUST1.HTML", "/doc/rust1.html"),
    ];

    for (path, expected) in fixed {
        assert_eq!(router.fixed_path(path, false).as_deref(), Some(expected), "{path}");
    }

    for path in [
        "/hi",
        "/HI/",
        "/B",
        "/abc",
        "/Y",
        "/X/",
        "/DOC/",
        "/no",
        "/NO/A/",
        "/u/ÄPFÊL/",
        "/v/äpfêl/",
        "/src/",
        "/hi/./",
    ] {
        assert_eq!(router.fixed_path(path, false), None, "{path}");
    }
}

#[test]
fn fixed_path_with_trailing_slash() {
    let router = router(FIXED_PATH_ROUTES);

    let fixed = [
        ("/HI/", "/hi"),
        ("/B", "/b/"),
        ("/abc", "/ABC/"),
        ("/Y", "/y/"),
        ("/X/", "/x"),
        ("/DOC/", "/doc"),
        ("/NO/A/", "/no/a"),
        ("/hi/./", "/hi"),
        ("//b", "/b/"),
        ("/SEARCH/QUERY/", "/search/QUERY"),
        ("/CMD/TOOL", "/cmd/TOOL/"),
        ("/W/♭", "/w/♭/"),
    ];

    for (path, expected) in fixed {
        assert_eq!(router.fixed_path(path, true).as_deref(), Some(expected), "{path}");
    }

    for path in ["/", "/no", "/no/", "/_", "/u/ÄPFÊL"] {
        assert_eq!(router.fixed_path(path, true), None, "{path}");
    }
}
