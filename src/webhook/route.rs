//! Parsing and matching of `prefix:url` webhook routes.

use url::Url;

use crate::error::RunError;
use crate::issue::{IssueIdSet, IssueIdentifier};

const WILDCARD: &str = "*";

/// A single prefix-to-destination mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookRoute {
    prefix: String,
    url: Url,
}

impl WebhookRoute {
    /// Parses one `prefix:url` entry.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Configuration`] when the separator or prefix is
    /// missing, or when the destination is not an absolute `http(s)` URL.
    pub fn parse(entry: &str) -> Result<Self, RunError> {
        let Some((raw_prefix, raw_url)) = entry.split_once(':') else {
            return Err(RunError::configuration(format!(
                "webhook route {entry:?} must have the form prefix:url"
            )));
        };
        let prefix = raw_prefix.trim();
        if prefix.is_empty() {
            return Err(RunError::configuration(format!(
                "webhook route {entry:?} has an empty prefix"
            )));
        }

        let url = Url::parse(raw_url.trim()).map_err(|error| {
            RunError::configuration(format!(
                "webhook route {entry:?} has an invalid URL: {error}"
            ))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(RunError::configuration(format!(
                "webhook route {entry:?} must use http or https"
            )));
        }

        Ok(Self {
            prefix: prefix.to_owned(),
            url,
        })
    }

    /// Prefix token, or `*` for the catch-all route.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Destination URL.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Returns true when the route accepts `id`.
    ///
    /// Matching is a case-sensitive string prefix test; `*` accepts every
    /// identifier.
    #[must_use]
    pub fn matches(&self, id: &IssueIdentifier) -> bool {
        self.prefix == WILDCARD || id.as_str().starts_with(&self.prefix)
    }
}

/// Ordered set of webhook routes built once per run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WebhookRoutes {
    routes: Vec<WebhookRoute>,
}

impl WebhookRoutes {
    /// Parses newline-separated `prefix:url` entries, skipping blank lines.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Configuration`] for the first malformed entry.
    pub fn parse(raw: &str) -> Result<Self, RunError> {
        let routes = raw
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(WebhookRoute::parse)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { routes })
    }

    /// Number of configured routes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns true when no route is configured.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Iterates routes in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = &WebhookRoute> {
        self.routes.iter()
    }

    /// Groups `ids` by destination URL.
    ///
    /// Routes sharing a URL are merged, so each destination appears once with
    /// the union of its matched identifiers. Destinations keep the order of
    /// their first route and destinations without a match are omitted.
    #[must_use]
    pub fn destinations(&self, ids: &IssueIdSet) -> Vec<(&Url, IssueIdSet)> {
        let mut grouped: Vec<(&Url, IssueIdSet)> = Vec::new();
        for route in &self.routes {
            let matched: Vec<&IssueIdentifier> = ids.iter().filter(|id| route.matches(id)).collect();
            if matched.is_empty() {
                continue;
            }
            let position = grouped.iter().position(|(url, _)| *url == route.url());
            if let Some((_, set)) = position.and_then(|existing| grouped.get_mut(existing)) {
                set.extend(matched.into_iter().cloned());
            } else {
                grouped.push((route.url(), matched.into_iter().cloned().collect()));
            }
        }
        grouped
    }
}

impl<'routes> IntoIterator for &'routes WebhookRoutes {
    type Item = &'routes WebhookRoute;
    type IntoIter = std::slice::Iter<'routes, WebhookRoute>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{WebhookRoute, WebhookRoutes};
    use crate::error::RunError;
    use crate::issue::{IssueIdSet, IssueIdentifier};

    fn ids(raw: &[&str]) -> IssueIdSet {
        raw.iter().copied().map(IssueIdentifier::new).collect()
    }

    #[rstest]
    fn parses_entries_and_skips_blank_lines() {
        let routes = WebhookRoutes::parse(
            "ABC:https://hooks.example/abc\n\n  *:https://hooks.example/all  \r\n",
        )
        .expect("routes should parse");

        let prefixes: Vec<_> = routes.iter().map(WebhookRoute::prefix).collect();
        assert_eq!(prefixes, vec!["ABC", "*"]);
        assert_eq!(
            routes
                .iter()
                .nth(1)
                .map(|route| route.url().as_str().to_owned()),
            Some("https://hooks.example/all".to_owned())
        );
    }

    #[rstest]
    #[case("no-separator")]
    #[case(":https://hooks.example")]
    #[case("ABC:not a url")]
    #[case("ABC:ftp://hooks.example")]
    fn rejects_malformed_entries(#[case] raw: &str) {
        let result = WebhookRoutes::parse(raw);

        assert!(
            matches!(result, Err(RunError::Configuration { .. })),
            "expected Configuration error for {raw:?}, got {result:?}"
        );
    }

    #[rstest]
    #[case("ABC", "ABC-12", true)]
    #[case("ABC", "ABCD-1", true)]
    #[case("ABC", "abc-12", false)]
    #[case("XYZ", "ABC-12", false)]
    #[case("*", "ABC-12", true)]
    fn prefix_matching_is_case_sensitive(
        #[case] prefix: &str,
        #[case] id: &str,
        #[case] expected: bool,
    ) {
        let route = WebhookRoute::parse(&format!("{prefix}:https://hooks.example"))
            .expect("route should parse");

        assert_eq!(route.matches(&IssueIdentifier::new(id)), expected);
    }

    #[rstest]
    fn identifier_may_reach_several_destinations() {
        let routes = WebhookRoutes::parse(
            "ABC:https://hooks.example/abc\n*:https://hooks.example/all",
        )
        .expect("routes should parse");

        let destinations = routes.destinations(&ids(&["ABC-1", "XYZ-2"]));

        let rendered: Vec<_> = destinations
            .iter()
            .map(|(url, set)| (url.as_str().to_owned(), set.to_strings()))
            .collect();
        assert_eq!(
            rendered,
            vec![
                (
                    "https://hooks.example/abc".to_owned(),
                    vec!["ABC-1".to_owned()]
                ),
                (
                    "https://hooks.example/all".to_owned(),
                    vec!["ABC-1".to_owned(), "XYZ-2".to_owned()]
                ),
            ]
        );
    }

    #[rstest]
    fn routes_sharing_a_url_are_merged() {
        let routes = WebhookRoutes::parse(
            "ABC:https://hooks.example/one\nXYZ:https://hooks.example/one\n*:https://hooks.example/one",
        )
        .expect("routes should parse");

        let destinations = routes.destinations(&ids(&["XYZ-2", "ABC-1", "QQ-3"]));

        assert_eq!(destinations.len(), 1);
        assert_eq!(
            destinations.first().map(|(_, set)| set.to_strings()),
            Some(vec!["ABC-1".to_owned(), "XYZ-2".to_owned(), "QQ-3".to_owned()])
        );
    }

    #[rstest]
    fn merged_destination_keeps_its_first_position() {
        let routes = WebhookRoutes::parse(
            "ABC:https://hooks.example/one\nXYZ:https://hooks.example/two\n*:https://hooks.example/one",
        )
        .expect("routes should parse");
        assert_eq!(routes.len(), 3);

        let rendered: Vec<_> = routes
            .destinations(&ids(&["ABC-1", "XYZ-2"]))
            .iter()
            .map(|(url, set)| (url.path().to_owned(), set.to_strings(), set.len()))
            .collect();

        assert_eq!(
            rendered,
            vec![
                (
                    "/one".to_owned(),
                    vec!["ABC-1".to_owned(), "XYZ-2".to_owned()],
                    2
                ),
                ("/two".to_owned(), vec!["XYZ-2".to_owned()], 1),
            ]
        );
    }

    #[rstest]
    fn unmatched_identifiers_have_no_destination() {
        let routes =
            WebhookRoutes::parse("ABC:https://hooks.example/abc").expect("routes should parse");

        assert!(routes.destinations(&ids(&["XYZ-2"])).is_empty());
    }
}
