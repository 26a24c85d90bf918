//! Navigation boundary: URL paths to pages.
//!
//! | Path | Route |
//! |------|-------|
//! | `/` | [`Route::Home`] |
//! | `/category/{category}` | [`Route::Category`] |
//! | `/article/{id}` | [`Route::Article`] |
//!
//! A trailing slash or a trailing `index.html` segment is accepted, so paths
//! copied from a static build resolve to the same page. Parameters are
//! percent-decoded on parse and encoded again by [`Route::path`].

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};
use std::fmt;
use thiserror::Error;

/// Characters escaped inside a path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RouteError {
    #[error("no page at {0}")]
    Unknown(String),
    #[error("missing {param} in {path}")]
    MissingParam { param: &'static str, path: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Category(String),
    Article(String),
}

impl Route {
    pub fn parse(path: &str) -> Result<Route, RouteError> {
        let mut segments: Vec<&str> = path.trim().split('/').filter(|s| !s.is_empty()).collect();
        if segments.last() == Some(&"index.html") {
            segments.pop();
        }

        match segments.as_slice() {
            [] => Ok(Route::Home),
            [kind] if matches!(*kind, "category" | "article") => Err(RouteError::MissingParam {
                param: if *kind == "category" { "category" } else { "id" },
                path: path.to_string(),
            }),
            ["category", category] => Ok(Route::Category(decode(category))),
            ["article", id] => Ok(Route::Article(decode(id))),
            _ => Err(RouteError::Unknown(path.to_string())),
        }
    }

    /// Canonical path of the route.
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Category(category) => format!("/category/{}", encode(category)),
            Route::Article(id) => format!("/article/{}", encode(id)),
        }
    }
}

fn decode(segment: &str) -> String {
    percent_decode_str(segment).decode_utf8_lossy().into_owned()
}

fn encode(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_home() {
        assert_eq!(Route::parse("/"), Ok(Route::Home));
        assert_eq!(Route::parse(""), Ok(Route::Home));
        assert_eq!(Route::parse("/index.html"), Ok(Route::Home));
    }

    #[test]
    fn parses_category_and_article() {
        assert_eq!(
            Route::parse("/category/technology"),
            Ok(Route::Category("technology".to_string()))
        );
        assert_eq!(Route::parse("/article/2/"), Ok(Route::Article("2".to_string())));
        assert_eq!(
            Route::parse("article/999/index.html"),
            Ok(Route::Article("999".to_string()))
        );
    }

    #[test]
    fn missing_parameter_is_reported() {
        assert!(matches!(
            Route::parse("/article/"),
            Err(RouteError::MissingParam { param: "id", .. })
        ));
        assert!(matches!(
            Route::parse("/category"),
            Err(RouteError::MissingParam { param: "category", .. })
        ));
    }

    #[test]
    fn unknown_paths_are_rejected() {
        assert!(matches!(Route::parse("/about"), Err(RouteError::Unknown(_))));
        assert!(matches!(
            Route::parse("/article/1/comments"),
            Err(RouteError::Unknown(_))
        ));
    }

    #[test]
    fn index_html_must_be_a_whole_segment() {
        assert_eq!(
            Route::parse("/article/4index.html"),
            Ok(Route::Article("4index.html".to_string()))
        );
        assert_eq!(
            Route::parse("/category/science/index.html"),
            Ok(Route::Category("science".to_string()))
        );
        assert!(matches!(
            Route::parse("/article/index.html"),
            Err(RouteError::MissingParam { param: "id", .. })
        ));
    }

    #[test]
    fn parameters_are_percent_decoded() {
        assert_eq!(
            Route::parse("/category/science%20fiction"),
            Ok(Route::Category("science fiction".to_string()))
        );
        assert_eq!(
            Route::parse("/article/a%2Fb"),
            Ok(Route::Article("a/b".to_string()))
        );
        assert_eq!(
            Route::Category("science fiction".to_string()).path(),
            "/category/science%20fiction"
        );
    }

    #[test]
    fn path_round_trips_through_parse() {
        for route in [
            Route::Home,
            Route::Category("science fiction".to_string()),
            Route::Article("a/b".to_string()),
            Route::Article("6".to_string()),
        ] {
            assert_eq!(Route::parse(&route.path()), Ok(route.clone()));
            assert_eq!(route.to_string(), route.path());
        }
    }
}
