// src/macros.rs
#[macro_export]
macro_rules! s {
    // String shorthand!

    // Zero-arg → String::new()
    () => {
        ::std::string::String::new()
    };
    // Any single expression: literals, consts, vars
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

/// Compile a CSS selector once and hand out a `&'static Selector`.
///
/// Only for literal selectors known at build time; a typo panics on first use
/// and is caught by the extractor tests.
#[macro_export]
macro_rules! sel {
    ($css:expr) => {{
        static SEL: ::std::sync::LazyLock<::scraper::Selector> =
            ::std::sync::LazyLock::new(|| {
                ::scraper::Selector::parse($css).expect(concat!("bad selector: ", $css))
            });
        &*SEL
    }};
}
