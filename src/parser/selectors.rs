use scraper::Selector;
use std::sync::LazyLock;

macro_rules! selector {
    ($name:ident, $css:expr) => {
        #[allow(clippy::expect_used)]
        pub(crate) static $name: LazyLock<Selector> =
            LazyLock::new(|| Selector::parse($css).expect(concat!("invalid selector: ", $css)));
    };
}

// Listing page
selector!(LIST_SUBJECT, "div.list_subject");
selector!(LIST_DATE, "td.datetime");

// Post page
selector!(VIEW_TITLE, "div.view_title");
selector!(VIEW_PUBLISHED, "tr > td.view_t3");
selector!(VIEW_FILE_CELL, "tr > td.view_t4");

// Redirector page
selector!(FORM, "form");
selector!(HIDDEN_INPUT, "input[type=\"hidden\"]");
selector!(INLINE_SCRIPT, "script:not([src])");
