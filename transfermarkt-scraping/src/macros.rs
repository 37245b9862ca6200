/// Compiles the CSS selector once and hands out a `&'static Selector`.
#[macro_export]
macro_rules! selector {
    ($s: expr) => {{
        static CACHED: ::once_cell::sync::Lazy<::scraper::Selector> =
            ::once_cell::sync::Lazy::new(|| ::scraper::Selector::parse($s).unwrap());
        &*CACHED
    }};
}

/// Compiles the regex once and hands out a `&'static Regex`.
#[macro_export]
macro_rules! regex {
    ($s: expr) => {{
        static CACHED: ::once_cell::sync::Lazy<::regex::Regex> =
            ::once_cell::sync::Lazy::new(|| ::regex::Regex::new($s).unwrap());
        &*CACHED
    }};
}
