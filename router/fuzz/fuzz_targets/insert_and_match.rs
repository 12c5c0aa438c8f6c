#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (Vec<(String, i32)>, String, Option<bool>)| {
    let mut router = switchyard_router::Router::new();

    for (route, value) in data.0 {
        // failed inserts must leave the router usable.
        let _ = router.insert(route, value);
    }

    match data.2 {
        None => {
            let _ = router.at(&data.1);
            let _ = router.trailing_slash_redirect(&data.1);
        }
        Some(trailing_slash) => {
            let _ = router.fixed_path(&data.1, trailing_slash);
        }
    }
});
